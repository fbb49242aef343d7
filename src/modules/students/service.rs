//! Student persistence for both owner and super-admin routes.
//!
//! Every function takes a [`Scope`]. Owner handlers pass their tenant,
//! super-admin handlers pass [`Scope::All`].

use anyhow::anyhow;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};

use hostelhub_core::{AppError, PaginationMeta, PaginationParams, hash_password};
use hostelhub_db::is_unique_violation;
use hostelhub_models::{CategoryId, OwnerId, StudentId};

use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentDependents, StudentStatus,
    UpdateStudentDto,
};
use crate::utils::tenant::{Scope, TenantFilter, push_page};

const STUDENT_SELECT: &str = r#"SELECT s.id, s.owner_id, s.category_id, c.title AS category_title,
       s.phone, s.name, s.sms_phone, s.status, s.joining_date, s.booking_amount,
       s.created_at, s.updated_at
FROM students s
LEFT JOIN categories c ON c.id = s.category_id"#;

pub const SEARCH_COLUMNS: &[&str] = &["s.name", "s.phone"];

fn student_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        return AppError::conflict(anyhow!("Phone number is already registered"));
    }
    AppError::database(e)
}

/// Student list filters common to owner and super-admin listings.
#[derive(Debug, Clone, Default)]
pub struct StudentQuery {
    pub search: Option<String>,
    pub status: Option<StudentStatus>,
    pub category_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub pagination: PaginationParams,
}

pub struct StudentService;

impl StudentService {
    /// Fails with 400 unless the category belongs to `owner_id`.
    async fn ensure_category(
        db: &PgPool,
        owner_id: OwnerId,
        category_id: CategoryId,
    ) -> Result<(), AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1 AND owner_id = $2)",
        )
        .bind(category_id)
        .bind(owner_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::bad_request(anyhow!(
                "Category {} does not belong to this owner",
                category_id
            )));
        }
        Ok(())
    }

    #[instrument(skip(db, dto), fields(phone = %dto.phone))]
    pub async fn create_student(
        db: &PgPool,
        owner_id: OwnerId,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        if let Some(category_id) = dto.category_id {
            Self::ensure_category(db, owner_id, category_id).await?;
        }

        let password = hash_password(&dto.password)?;

        let id: StudentId = sqlx::query_scalar(
            r#"INSERT INTO students
                (owner_id, category_id, phone, password, name, sms_phone, status, joining_date, booking_amount)
               VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, CURRENT_DATE), $9)
               RETURNING id"#,
        )
        .bind(owner_id)
        .bind(dto.category_id)
        .bind(dto.phone.trim())
        .bind(&password)
        .bind(dto.name.trim())
        .bind(dto.sms_phone.as_deref().map(str::trim))
        .bind(dto.status.unwrap_or_default())
        .bind(dto.joining_date)
        .bind(dto.booking_amount.unwrap_or(0))
        .fetch_one(db)
        .await
        .map_err(student_write_error)?;

        info!(student_id = %id, owner_id = %owner_id, "Student created");
        Self::get_student(db, Scope::Tenant(owner_id), id).await
    }

    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        scope: Scope,
        query: StudentQuery,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let filter = TenantFilter::new(scope, "s")
            .owner(query.owner_id)
            .search(query.search.as_deref(), SEARCH_COLUMNS)
            .status(query.status)
            .category(query.category_id);

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM students s");
        filter.push_where(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(db).await?;

        let mut page = QueryBuilder::<Postgres>::new(STUDENT_SELECT);
        filter.push_where(&mut page);
        push_page(
            &mut page,
            "s",
            query.pagination.limit(),
            query.pagination.offset(),
        );
        let data = page.build_query_as::<Student>().fetch_all(db).await?;

        Ok(PaginatedStudentsResponse {
            data,
            meta: PaginationMeta::new(&query.pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, scope: Scope, id: StudentId) -> Result<Student, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(STUDENT_SELECT);
        TenantFilter::new(scope, "s")
            .student(Some(id.into_inner()))
            .push_where(&mut query);

        query
            .build_query_as::<Student>()
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    /// Applies the provided fields. A new category must belong to the
    /// student's own owner, whoever is editing.
    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        scope: Scope,
        id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(db, scope, id).await?;

        if let Some(category_id) = dto.category_id {
            Self::ensure_category(db, existing.owner_id, category_id).await?;
        }

        let password = dto.password.as_deref().map(hash_password).transpose()?;

        sqlx::query(
            r#"UPDATE students
               SET name = COALESCE($1, name),
                   phone = COALESCE($2, phone),
                   password = COALESCE($3, password),
                   sms_phone = COALESCE($4, sms_phone),
                   category_id = COALESCE($5, category_id),
                   status = COALESCE($6, status),
                   joining_date = COALESCE($7, joining_date),
                   booking_amount = COALESCE($8, booking_amount),
                   updated_at = NOW()
               WHERE id = $9 AND owner_id = $10"#,
        )
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.phone.as_deref().map(str::trim))
        .bind(password)
        .bind(dto.sms_phone.as_deref().map(str::trim))
        .bind(dto.category_id)
        .bind(dto.status)
        .bind(dto.joining_date)
        .bind(dto.booking_amount)
        .bind(id)
        .bind(existing.owner_id)
        .execute(db)
        .await
        .map_err(student_write_error)?;

        Self::get_student(db, scope, id).await
    }

    #[instrument(skip(conn))]
    pub async fn dependents(
        conn: &mut PgConnection,
        id: StudentId,
    ) -> Result<StudentDependents, AppError> {
        let dependents = sqlx::query_as::<_, StudentDependents>(
            r#"SELECT
                (SELECT COUNT(*) FROM rents WHERE student_id = $1) AS rents,
                (SELECT COUNT(*) FROM payments WHERE student_id = $1) AS payments"#,
        )
        .bind(id)
        .fetch_one(conn)
        .await?;
        Ok(dependents)
    }

    /// Deletes a student without rents or payments; otherwise 409 with the
    /// counts. The student row is locked while counting, so a rent or
    /// payment inserted concurrently either is counted or waits for the
    /// delete.
    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, scope: Scope, id: StudentId) -> Result<(), AppError> {
        let existing = Self::get_student(db, scope, id).await?;

        let mut tx = db.begin().await?;
        sqlx::query("SELECT id FROM students WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        let dependents = Self::dependents(&mut tx, id).await?;
        if !dependents.is_empty() {
            return Err(AppError::dependency(
                "Student still has rents or payments",
                &dependents,
            ));
        }

        sqlx::query("DELETE FROM students WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(existing.owner_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(student_id = %id, "Student deleted");
        Ok(())
    }
}
