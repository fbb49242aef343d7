//! Super-admin bootstrap.

use sqlx::PgPool;
use validator::Validate;

use hostelhub_core::hash_password;
use hostelhub_models::super_admins::{SuperAdmin, SuperAdminSignupDto, SuperAdminStatus};

use crate::CliResult;

/// Inserts a new active super-admin after validating the input.
pub async fn create_super_admin(db: &PgPool, dto: &SuperAdminSignupDto) -> CliResult<SuperAdmin> {
    dto.validate()?;

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM super_admins WHERE username = $1 OR email = $2)",
    )
    .bind(&dto.username)
    .bind(&dto.email)
    .fetch_one(db)
    .await?;

    if exists {
        return Err(format!(
            "a super-admin with username '{}' or email '{}' already exists",
            dto.username, dto.email
        )
        .into());
    }

    let password_hash = hash_password(&dto.password).map_err(|e| e.error.to_string())?;

    let super_admin = sqlx::query_as::<_, SuperAdmin>(
        r#"INSERT INTO super_admins (username, email, password_hash, name, role, status)
           VALUES ($1, $2, $3, $4, 'super_admin', $5)
           RETURNING id, username, email, name, role, status, created_at, updated_at"#,
    )
    .bind(&dto.username)
    .bind(&dto.email)
    .bind(&password_hash)
    .bind(&dto.name)
    .bind(SuperAdminStatus::Active)
    .fetch_one(db)
    .await?;

    Ok(super_admin)
}
