use sqlx::PgPool;
use tracing::{info, instrument, warn};

use hostelhub_core::password::{is_legacy_secret, verify_against_dummy};
use hostelhub_core::{AppError, hash_password, verify_student_secret};
use hostelhub_models::students::{Student, StudentLoginDto, StudentRecord, StudentStatus};
use hostelhub_models::StudentId;

use crate::modules::students::service::StudentService;
use crate::utils::tenant::Scope;

pub struct PortalService;

impl PortalService {
    #[instrument(skip(db))]
    async fn find_record_by_phone(
        db: &PgPool,
        phone: &str,
    ) -> Result<Option<StudentRecord>, AppError> {
        let record = sqlx::query_as::<_, StudentRecord>("SELECT * FROM students WHERE phone = $1")
            .bind(phone.trim())
            .fetch_optional(db)
            .await?;
        Ok(record)
    }

    /// Checks the credentials of a student.
    ///
    /// A plaintext secret that verifies is replaced by its bcrypt hash. A
    /// failed rehash is logged and does not fail the login.
    #[instrument(skip(db, dto), fields(phone = %dto.phone))]
    pub async fn login(db: &PgPool, dto: StudentLoginDto) -> Result<Student, AppError> {
        let Some(record) = Self::find_record_by_phone(db, &dto.phone).await? else {
            verify_against_dummy(&dto.password);
            return Err(AppError::unauthorized("Invalid credentials"));
        };

        if !verify_student_secret(&dto.password, &record.password) {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        if record.status == StudentStatus::Leave {
            return Err(AppError::forbidden("Student account is inactive"));
        }

        if is_legacy_secret(&record.password) {
            Self::rehash(db, record.id, &dto.password).await;
        }

        StudentService::get_student(db, Scope::Tenant(record.owner_id), record.id).await
    }

    async fn rehash(db: &PgPool, id: StudentId, password: &str) {
        let hashed = match hash_password(password) {
            Ok(hashed) => hashed,
            Err(e) => {
                warn!(student_id = %id, error = %e.error, "Could not hash legacy student secret");
                return;
            }
        };

        let result = sqlx::query("UPDATE students SET password = $1 WHERE id = $2")
            .bind(hashed)
            .bind(id)
            .execute(db)
            .await;

        match result {
            Ok(_) => info!(student_id = %id, "Legacy student secret rehashed"),
            Err(e) => warn!(student_id = %id, error = %e, "Could not store rehashed student secret"),
        }
    }
}
