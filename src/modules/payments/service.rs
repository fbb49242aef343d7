use anyhow::anyhow;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};

use hostelhub_core::{AppError, PaginationMeta};
use hostelhub_models::{OwnerId, StudentId};

use crate::modules::payments::model::{
    CreatePaymentDto, PaginatedPaymentsResponse, Payment, PaymentFilterParams, PaymentKind,
    PaymentReceipt,
};
use crate::modules::rents::service::RentService;
use crate::utils::tenant::{Scope, TenantFilter, push_page};

const PAYMENT_SELECT: &str = r#"SELECT p.id, p.owner_id, p.student_id, p.rent_id, p.amount, p.kind,
       p.note, p.created_at, st.name AS student_name
FROM payments p
JOIN students st ON st.id = p.student_id"#;

pub struct PaymentService;

impl PaymentService {
    /// Stores the payment and credits it to the rent in one transaction.
    ///
    /// The rent row is locked first, so concurrent payments against one rent
    /// apply one after the other.
    #[instrument(skip(db, dto), fields(rent_id = %dto.rent_id, amount = dto.amount))]
    pub async fn record_payment(
        db: &PgPool,
        owner_id: OwnerId,
        dto: CreatePaymentDto,
    ) -> Result<PaymentReceipt, AppError> {
        let mut tx = db.begin().await?;

        let student_id: StudentId = sqlx::query_scalar(
            "SELECT student_id FROM rents WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(dto.rent_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Rent not found")))?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"INSERT INTO payments (owner_id, student_id, rent_id, amount, kind, note)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#,
        )
        .bind(owner_id)
        .bind(student_id)
        .bind(dto.rent_id)
        .bind(dto.amount)
        .bind(dto.kind)
        .bind(dto.note.as_deref().map(str::trim).filter(|n| !n.is_empty()))
        .fetch_one(&mut *tx)
        .await?;

        let credit = match dto.kind {
            PaymentKind::Rent => "UPDATE rents SET rent_paid = rent_paid + $1 WHERE id = $2",
            PaymentKind::External => {
                "UPDATE rents SET external_paid = COALESCE(external_paid, 0) + $1 WHERE id = $2"
            }
        };
        sqlx::query(credit)
            .bind(dto.amount)
            .bind(dto.rent_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(payment_id = %payment.id, student_id = %student_id, "Payment recorded");

        let rent = RentService::get_rent(db, owner_id, dto.rent_id).await?;
        Ok(PaymentReceipt { payment, rent })
    }

    #[instrument(skip(db))]
    pub async fn get_payments(
        db: &PgPool,
        owner_id: OwnerId,
        params: PaymentFilterParams,
    ) -> Result<PaginatedPaymentsResponse, AppError> {
        let filter = TenantFilter::new(Scope::Tenant(owner_id), "p")
            .student(params.student_id)
            .created_between(params.from, params.to);

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM payments p");
        filter.push_where(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(db).await?;

        let mut page = QueryBuilder::<Postgres>::new(PAYMENT_SELECT);
        filter.push_where(&mut page);
        push_page(
            &mut page,
            "p",
            params.pagination.limit(),
            params.pagination.offset(),
        );
        let data = page.build_query_as::<Payment>().fetch_all(db).await?;

        Ok(PaginatedPaymentsResponse {
            data,
            meta: PaginationMeta::new(&params.pagination, total),
        })
    }
}
