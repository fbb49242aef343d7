//! Session-level response types shared by all three account kinds.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::owners::Owner;
use crate::students::Student;
use crate::super_admins::SuperAdmin;

// Re-export JWT claim types from hostelhub-auth
pub use hostelhub_auth::{Claims, TokenType};

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The account behind the current session, tagged by token type.
///
/// ```json
/// { "type": "admin", "owner": { ... } }
/// ```
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionResponse {
    Admin { owner: Owner },
    Student { student: Student },
    SuperAdmin { super_admin: SuperAdmin },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SuperAdminId;
    use crate::super_admins::SuperAdminStatus;
    use chrono::Utc;

    #[test]
    fn test_session_response_is_tagged() {
        let response = SessionResponse::SuperAdmin {
            super_admin: SuperAdmin {
                id: SuperAdminId::new(1),
                username: "root".to_string(),
                email: "root@hostelhub.test".to_string(),
                name: "Root".to_string(),
                role: "super_admin".to_string(),
                status: SuperAdminStatus::Active,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "super_admin");
        assert_eq!(value["super_admin"]["username"], "root");
    }
}
