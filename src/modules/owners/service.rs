use anyhow::anyhow;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use hostelhub_config::OtpConfig;
use hostelhub_core::password::verify_against_dummy;
use hostelhub_core::{AppError, hash_password, verify_password};
use hostelhub_db::{is_unique_violation, violated_constraint};
use hostelhub_models::OwnerId;

use crate::modules::owners::model::{
    Owner, OwnerLoginDto, OwnerRecord, OwnerSignupDto, OwnerStatus, VerifyOtpDto,
};
use crate::utils::otp::{OtpCheck, check_otp, generate_otp, otp_expiry};

/// A stored code, returned so the caller can deliver it.
#[derive(Debug)]
pub struct IssuedOtp {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Maps unique violations on `owners` to 409.
pub(crate) fn owner_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        return match violated_constraint(&e) {
            Some("owners_subdomain_key") => {
                AppError::conflict(anyhow!("Subdomain is already taken"))
            }
            _ => AppError::conflict(anyhow!("Phone number is already registered")),
        };
    }
    AppError::database(e)
}

pub struct OwnerService;

impl OwnerService {
    #[instrument(skip(db))]
    pub async fn find_record_by_phone(
        db: &PgPool,
        phone: &str,
    ) -> Result<Option<OwnerRecord>, AppError> {
        let record = sqlx::query_as::<_, OwnerRecord>("SELECT * FROM owners WHERE phone = $1")
            .bind(phone.trim())
            .fetch_optional(db)
            .await?;
        Ok(record)
    }

    /// Creates a pending owner with a fresh OTP.
    #[instrument(skip(db, dto), fields(phone = %dto.phone))]
    pub async fn signup(
        db: &PgPool,
        dto: OwnerSignupDto,
        otp_config: &OtpConfig,
    ) -> Result<(Owner, IssuedOtp), AppError> {
        let password_hash = hash_password(&dto.password)?;
        let otp = IssuedOtp {
            code: generate_otp(),
            expires_at: otp_expiry(Utc::now(), otp_config.ttl_seconds),
        };

        let owner = sqlx::query_as::<_, Owner>(
            r#"INSERT INTO owners (phone, password_hash, name, status, otp, otp_expire, subdomain)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(dto.phone.trim())
        .bind(&password_hash)
        .bind(dto.name.trim())
        .bind(OwnerStatus::Pending)
        .bind(&otp.code)
        .bind(otp.expires_at)
        .bind(dto.subdomain.as_deref().map(str::trim))
        .fetch_one(db)
        .await
        .map_err(owner_write_error)?;

        info!(owner_id = %owner.id, "Owner signed up, awaiting verification");
        Ok((owner, otp))
    }

    /// Activates the owner once the code matches and has not expired.
    /// Verifying an active owner again is a no-op. After
    /// `otp_config.max_attempts` wrong codes the OTP is discarded and only a
    /// resend can issue a new one.
    #[instrument(skip(db, dto, otp_config), fields(phone = %dto.phone))]
    pub async fn verify_otp(
        db: &PgPool,
        dto: VerifyOtpDto,
        otp_config: &OtpConfig,
    ) -> Result<Owner, AppError> {
        let record = Self::find_record_by_phone(db, &dto.phone)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Owner not found")))?;

        if record.status == OwnerStatus::Active {
            return Ok(Owner::from(record));
        }

        if record.otp_attempts >= otp_config.max_attempts {
            return Err(too_many_attempts());
        }

        match check_otp(&dto.otp, record.otp.as_deref(), record.otp_expire, Utc::now()) {
            OtpCheck::Mismatch => {
                let attempts: i32 = sqlx::query_scalar(
                    r#"UPDATE owners
                       SET otp_attempts = otp_attempts + 1,
                           otp = CASE WHEN otp_attempts + 1 >= $2 THEN NULL ELSE otp END
                       WHERE id = $1
                       RETURNING otp_attempts"#,
                )
                .bind(record.id)
                .bind(otp_config.max_attempts)
                .fetch_one(db)
                .await?;

                if attempts >= otp_config.max_attempts {
                    warn!(
                        owner_id = %record.id,
                        attempts,
                        "OTP discarded after too many wrong codes"
                    );
                    return Err(too_many_attempts());
                }
                return Err(AppError::bad_request(anyhow!("Invalid OTP")));
            }
            OtpCheck::Expired => return Err(AppError::bad_request(anyhow!("OTP expired"))),
            OtpCheck::Valid => {}
        }

        let owner = sqlx::query_as::<_, Owner>(
            r#"UPDATE owners
               SET status = $1, otp = NULL, otp_expire = NULL, otp_attempts = 0, updated_at = NOW()
               WHERE id = $2
               RETURNING *"#,
        )
        .bind(OwnerStatus::Active)
        .bind(record.id)
        .fetch_one(db)
        .await?;

        info!(owner_id = %owner.id, "Owner verified");
        Ok(owner)
    }

    /// Replaces the stored code of a pending owner.
    #[instrument(skip(db, otp_config))]
    pub async fn resend_otp(
        db: &PgPool,
        phone: &str,
        otp_config: &OtpConfig,
    ) -> Result<IssuedOtp, AppError> {
        let record = Self::find_record_by_phone(db, phone)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Owner not found")))?;

        if record.status == OwnerStatus::Active {
            return Err(AppError::bad_request(anyhow!("Owner is already verified")));
        }

        let otp = IssuedOtp {
            code: generate_otp(),
            expires_at: otp_expiry(Utc::now(), otp_config.ttl_seconds),
        };

        sqlx::query(
            r#"UPDATE owners
               SET otp = $1, otp_expire = $2, otp_attempts = 0, updated_at = NOW()
               WHERE id = $3"#,
        )
            .bind(&otp.code)
            .bind(otp.expires_at)
            .bind(record.id)
            .execute(db)
            .await?;

        Ok(otp)
    }

    /// Checks credentials. Unknown phones and wrong passwords are the same
    /// 401; a pending account is only reported after the password matched.
    #[instrument(skip(db, dto), fields(phone = %dto.phone))]
    pub async fn login(db: &PgPool, dto: OwnerLoginDto) -> Result<Owner, AppError> {
        let Some(record) = Self::find_record_by_phone(db, &dto.phone).await? else {
            verify_against_dummy(&dto.password);
            return Err(AppError::unauthorized("Invalid credentials"));
        };

        if !verify_password(&dto.password, &record.password_hash) {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        if record.status == OwnerStatus::Pending {
            return Err(AppError::forbidden(
                "Account not verified. Please verify your phone number",
            ));
        }

        let owner = sqlx::query_as::<_, Owner>(
            "UPDATE owners SET updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(record.id)
        .fetch_one(db)
        .await?;

        Ok(owner)
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: OwnerId) -> Result<Option<Owner>, AppError> {
        let owner = sqlx::query_as::<_, Owner>("SELECT * FROM owners WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(owner)
    }
}

fn too_many_attempts() -> AppError {
    AppError::bad_request(anyhow!("Too many invalid attempts, request a new OTP"))
}
