use sqlx::PgPool;
use tracing::instrument;

use hostelhub_core::AppError;
use hostelhub_models::{Claims, OwnerId, SessionResponse, StudentId, SuperAdminId, TokenType};

use crate::modules::owners::service::OwnerService;
use crate::modules::students::service::StudentService;
use crate::modules::super_admin::service::SuperAdminService;
use crate::utils::tenant::{Scope, resolve_tenant};

pub struct SessionService;

impl SessionService {
    /// Loads the account a token was issued to. A token whose account has
    /// since been deleted gives 401.
    #[instrument(skip(db, claims), fields(id = claims.id, token_type = %claims.token_type))]
    pub async fn current(db: &PgPool, claims: &Claims) -> Result<SessionResponse, AppError> {
        let gone = || AppError::unauthorized("Session account no longer exists");

        match claims.token_type {
            TokenType::Admin => {
                let owner = OwnerService::find_by_id(db, OwnerId::new(claims.id))
                    .await?
                    .ok_or_else(gone)?;
                Ok(SessionResponse::Admin { owner })
            }
            TokenType::Student => {
                let scope = Scope::Tenant(resolve_tenant(claims)?);
                let student = StudentService::get_student(db, scope, StudentId::new(claims.id))
                    .await
                    .map_err(|e| if e.status.is_client_error() { gone() } else { e })?;
                Ok(SessionResponse::Student { student })
            }
            TokenType::SuperAdmin => {
                let super_admin =
                    SuperAdminService::find_by_id(db, SuperAdminId::new(claims.id))
                        .await?
                        .ok_or_else(gone)?;
                Ok(SessionResponse::SuperAdmin { super_admin })
            }
        }
    }
}
