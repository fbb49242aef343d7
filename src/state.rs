use sqlx::PgPool;

use hostelhub_config::{CorsConfig, DatabaseConfig, JwtConfig, OtpConfig, ServerConfig, SmsConfig};

use crate::utils::sms::SmsService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub otp_config: OtpConfig,
    pub server_config: ServerConfig,
    pub sms: SmsService,
}

impl AppState {
    /// State with default settings around `db` and `jwt_config`: no CORS
    /// origins, SMS disabled, default OTP and server settings.
    pub fn with_defaults(db: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            db,
            jwt_config,
            cors_config: CorsConfig {
                allowed_origins: Vec::new(),
            },
            otp_config: OtpConfig::default(),
            server_config: ServerConfig::default(),
            sms: SmsService::new(SmsConfig::disabled()),
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db_config = DatabaseConfig::from_env()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let db = hostelhub_db::init_db_pool(&db_config).await?;

    Ok(AppState {
        db,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        otp_config: OtpConfig::from_env(),
        server_config: ServerConfig::from_env(),
        sms: SmsService::new(SmsConfig::from_env()),
    })
}
