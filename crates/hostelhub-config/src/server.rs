use crate::env::{flag, parse_or, string_or};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    /// Allows `POST /api/super-admin/signup`. Off unless explicitly enabled.
    pub super_admin_signup_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 30,
            super_admin_signup_enabled: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: string_or("HOST", "0.0.0.0"),
            port: parse_or("PORT", 3000),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 30),
            super_admin_signup_enabled: flag("SUPER_ADMIN_SIGNUP_ENABLED", false),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
