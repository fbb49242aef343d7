//! Monthly billing.
//!
//! Rent writes for one owner are serialized with a transaction-scoped
//! advisory lock keyed on the owner id, so a manual create and a bulk
//! generate cannot both bill the same student for the same month.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::{info, instrument};

use hostelhub_core::{AppError, PaginationMeta, PaginationParams};
use hostelhub_models::{CategoryId, OwnerId, RentId, StudentId};

use crate::modules::rents::model::{
    CreateRentDto, CurrentRentParams, CurrentRentResponse, GenerateRentsResponse,
    PaginatedRentsResponse, Rent, RentHistoryParams, RentSummary, month_window,
};
use crate::utils::tenant::{Scope, TenantFilter, push_page};

const RENT_SELECT: &str = r#"SELECT r.id, r.owner_id, r.student_id, r.category_id,
       r.rent_amount, r.external_amount, r.rent_paid, r.external_paid, r.previous_due,
       r.created_at, st.name AS student_name, st.phone AS student_phone,
       c.title AS category_title
FROM rents r
JOIN students st ON st.id = r.student_id
LEFT JOIN categories c ON c.id = r.category_id"#;

const RENT_FROM: &str = "FROM rents r JOIN students st ON st.id = r.student_id";

pub const SEARCH_COLUMNS: &[&str] = &["st.name", "st.phone"];

/// Outstanding balance of the student's latest rent, floored at 0.
const LAST_DUE_SQL: &str = r#"SELECT GREATEST(
        lr.rent_amount + lr.external_amount + COALESCE(lr.previous_due, 0)
        - lr.rent_paid - COALESCE(lr.external_paid, 0), 0)
    FROM rents lr
    WHERE lr.student_id = s.id
    ORDER BY lr.created_at DESC, lr.id DESC
    LIMIT 1"#;

#[derive(Debug, sqlx::FromRow)]
struct BillableStudent {
    id: StudentId,
    category_id: Option<CategoryId>,
    rent_amount: Option<i64>,
    external_amount: Option<i64>,
    previous_due: Option<i64>,
}

async fn lock_owner(tx: &mut Transaction<'_, Postgres>, owner_id: OwnerId) -> Result<(), AppError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(owner_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub struct RentService;

impl RentService {
    /// Rents created in the current month, one page of them plus totals over
    /// every rent matching the filters in that month.
    #[instrument(skip(db))]
    pub async fn get_current(
        db: &PgPool,
        owner_id: OwnerId,
        params: CurrentRentParams,
        now: DateTime<Utc>,
    ) -> Result<CurrentRentResponse, AppError> {
        let (period_start, period_end) = month_window(now);
        let filter = TenantFilter::new(Scope::Tenant(owner_id), "r")
            .search(params.search.as_deref(), SEARCH_COLUMNS)
            .category(params.category_id)
            .created_within(period_start, period_end);

        let mut all = QueryBuilder::<Postgres>::new(RENT_SELECT);
        filter.push_where(&mut all);
        let month = all.build_query_as::<Rent>().fetch_all(db).await?;
        let summary = RentSummary::from_rents(&month);

        let mut page = QueryBuilder::<Postgres>::new(RENT_SELECT);
        filter.push_where(&mut page);
        push_page(
            &mut page,
            "r",
            params.pagination.limit(),
            params.pagination.offset(),
        );
        let data = page.build_query_as::<Rent>().fetch_all(db).await?;

        Ok(CurrentRentResponse {
            data,
            meta: PaginationMeta::new(&params.pagination, month.len() as i64),
            summary,
            period_start,
            period_end,
        })
    }

    /// Paginated rent history. Also serves the student portal, which pins
    /// `student_id` to the session.
    #[instrument(skip(db))]
    pub async fn get_history(
        db: &PgPool,
        scope: Scope,
        params: RentHistoryParams,
    ) -> Result<PaginatedRentsResponse, AppError> {
        let filter = TenantFilter::new(scope, "r")
            .search(params.search.as_deref(), SEARCH_COLUMNS)
            .category(params.category_id)
            .student(params.student_id)
            .created_between(params.from, params.to);

        let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) {RENT_FROM}"));
        filter.push_where(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(db).await?;

        let mut page = QueryBuilder::<Postgres>::new(RENT_SELECT);
        filter.push_where(&mut page);
        push_page(
            &mut page,
            "r",
            params.pagination.limit(),
            params.pagination.offset(),
        );
        let data = page.build_query_as::<Rent>().fetch_all(db).await?;

        Ok(PaginatedRentsResponse {
            data,
            meta: PaginationMeta::new(&params.pagination, total),
        })
    }

    /// Rents of one student, newest first.
    #[instrument(skip(db))]
    pub async fn get_student_rents(
        db: &PgPool,
        owner_id: OwnerId,
        student_id: StudentId,
        pagination: PaginationParams,
    ) -> Result<PaginatedRentsResponse, AppError> {
        let params = RentHistoryParams {
            search: None,
            category_id: None,
            student_id: Some(student_id.into_inner()),
            from: None,
            to: None,
            pagination,
        };
        Self::get_history(db, Scope::Tenant(owner_id), params).await
    }

    #[instrument(skip(db))]
    pub async fn get_rent(db: &PgPool, owner_id: OwnerId, id: RentId) -> Result<Rent, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(RENT_SELECT);
        TenantFilter::new(Scope::Tenant(owner_id), "r").push_where(&mut query);
        query.push(" AND r.id = ");
        query.push_bind(id);

        query
            .build_query_as::<Rent>()
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Rent not found")))
    }

    /// Bills one student for the current month.
    ///
    /// Omitted amounts come from the student's category; a student without a
    /// category must be given both. 409 when the student already has a rent
    /// this month.
    #[instrument(skip(db))]
    pub async fn create_rent(
        db: &PgPool,
        owner_id: OwnerId,
        dto: CreateRentDto,
        now: DateTime<Utc>,
    ) -> Result<Rent, AppError> {
        let (period_start, period_end) = month_window(now);
        let mut tx = db.begin().await?;
        lock_owner(&mut tx, owner_id).await?;

        let student = sqlx::query_as::<_, BillableStudent>(&format!(
            r#"SELECT s.id, s.category_id, c.rent_amount, c.external_amount,
                      ({LAST_DUE_SQL}) AS previous_due
               FROM students s
               LEFT JOIN categories c ON c.id = s.category_id
               WHERE s.owner_id = $1 AND s.id = $2"#
        ))
        .bind(owner_id)
        .bind(dto.student_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        let billed: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(
                SELECT 1 FROM rents
                WHERE student_id = $1 AND created_at >= $2 AND created_at < $3)"#,
        )
        .bind(student.id)
        .bind(period_start)
        .bind(period_end)
        .fetch_one(&mut *tx)
        .await?;

        if billed {
            return Err(AppError::conflict(anyhow!(
                "Student already has a rent for this month"
            )));
        }

        let rent_amount = dto.rent_amount.or(student.rent_amount);
        let external_amount = dto.external_amount.or(student.external_amount);
        let (Some(rent_amount), Some(external_amount)) = (rent_amount, external_amount) else {
            return Err(AppError::bad_request(anyhow!(
                "Student has no category; rent_amount and external_amount are required"
            )));
        };

        let id: RentId = sqlx::query_scalar(
            r#"INSERT INTO rents
                (owner_id, student_id, category_id, rent_amount, external_amount, previous_due, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id"#,
        )
        .bind(owner_id)
        .bind(student.id)
        .bind(student.category_id)
        .bind(rent_amount)
        .bind(external_amount)
        .bind(student.previous_due.unwrap_or(0))
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(rent_id = %id, student_id = %student.id, "Rent created");
        Self::get_rent(db, owner_id, id).await
    }

    /// Bills every living student with a category and no rent this month.
    #[instrument(skip(db))]
    pub async fn generate(
        db: &PgPool,
        owner_id: OwnerId,
        now: DateTime<Utc>,
    ) -> Result<GenerateRentsResponse, AppError> {
        let (period_start, period_end) = month_window(now);
        let mut tx = db.begin().await?;
        lock_owner(&mut tx, owner_id).await?;

        let result = sqlx::query(&format!(
            r#"INSERT INTO rents
                (owner_id, student_id, category_id, rent_amount, external_amount, previous_due, created_at)
               SELECT s.owner_id, s.id, s.category_id, c.rent_amount, c.external_amount,
                      COALESCE(({LAST_DUE_SQL}), 0), $4
               FROM students s
               JOIN categories c ON c.id = s.category_id
               WHERE s.owner_id = $1
                 AND s.status = 'living'
                 AND NOT EXISTS (
                     SELECT 1 FROM rents r
                     WHERE r.student_id = s.id AND r.created_at >= $2 AND r.created_at < $3)"#
        ))
        .bind(owner_id)
        .bind(period_start)
        .bind(period_end)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let created = result.rows_affected();
        info!(owner_id = %owner_id, created, "Monthly rents generated");

        Ok(GenerateRentsResponse {
            created: created as i64,
            period_start,
            period_end,
        })
    }
}
