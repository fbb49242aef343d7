use anyhow::anyhow;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};

use hostelhub_core::password::verify_against_dummy;
use hostelhub_core::{AppError, PaginationMeta, hash_password, verify_password};
use hostelhub_db::{is_unique_violation, violated_constraint};
use hostelhub_models::{OwnerId, SuperAdminId};

use crate::modules::owners::service::owner_write_error;
use crate::modules::super_admin::model::{
    OwnerDependents, OwnerFilterParams, OwnerWithStats, PaginatedOwnersResponse, SuperAdmin,
    SuperAdminLoginDto, SuperAdminRecord, SuperAdminSignupDto, SuperAdminStatus, UpdateOwnerDto,
};
use crate::utils::tenant::like_pattern;

const OWNER_WITH_STATS_SELECT: &str = r#"SELECT o.*,
       (SELECT COUNT(*) FROM students s WHERE s.owner_id = o.id) AS student_count
FROM owners o"#;

pub struct SuperAdminService;

impl SuperAdminService {
    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn signup(db: &PgPool, dto: SuperAdminSignupDto) -> Result<SuperAdmin, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let super_admin = sqlx::query_as::<_, SuperAdmin>(
            r#"INSERT INTO super_admins (username, email, password_hash, name, role, status)
               VALUES ($1, $2, $3, $4, 'super_admin', $5)
               RETURNING *"#,
        )
        .bind(dto.username.trim())
        .bind(dto.email.trim())
        .bind(&password_hash)
        .bind(dto.name.trim())
        .bind(SuperAdminStatus::Active)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if !is_unique_violation(&e) {
                return AppError::database(e);
            }
            match violated_constraint(&e) {
                Some("super_admins_email_key") => {
                    AppError::conflict(anyhow!("Email is already registered"))
                }
                _ => AppError::conflict(anyhow!("Username is already taken")),
            }
        })?;

        info!(super_admin_id = %super_admin.id, "Super-admin created");
        Ok(super_admin)
    }

    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn login(db: &PgPool, dto: SuperAdminLoginDto) -> Result<SuperAdmin, AppError> {
        let record = sqlx::query_as::<_, SuperAdminRecord>(
            "SELECT * FROM super_admins WHERE username = $1",
        )
        .bind(dto.username.trim())
        .fetch_optional(db)
        .await?;

        let Some(record) = record else {
            verify_against_dummy(&dto.password);
            return Err(AppError::unauthorized("Invalid credentials"));
        };

        if !verify_password(&dto.password, &record.password_hash) {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        if record.status != SuperAdminStatus::Active {
            return Err(AppError::forbidden("Super-admin account is inactive"));
        }

        Ok(record.into())
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(
        db: &PgPool,
        id: SuperAdminId,
    ) -> Result<Option<SuperAdmin>, AppError> {
        let super_admin =
            sqlx::query_as::<_, SuperAdmin>("SELECT * FROM super_admins WHERE id = $1")
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(super_admin)
    }
}

/// Owner management across tenants.
pub struct OwnerAdminService;

impl OwnerAdminService {
    fn push_owner_where(builder: &mut QueryBuilder<'_, Postgres>, params: &OwnerFilterParams) {
        builder.push(" WHERE TRUE");

        if let Some(term) = params.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = like_pattern(term);
            builder.push(" AND (o.name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR o.phone ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR o.subdomain ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(status) = params.status {
            builder.push(" AND o.status = ");
            builder.push_bind(status);
        }
    }

    #[instrument(skip(db))]
    pub async fn get_owners(
        db: &PgPool,
        params: OwnerFilterParams,
    ) -> Result<PaginatedOwnersResponse, AppError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM owners o");
        Self::push_owner_where(&mut count, &params);
        let total: i64 = count.build_query_scalar().fetch_one(db).await?;

        let mut page = QueryBuilder::<Postgres>::new(OWNER_WITH_STATS_SELECT);
        Self::push_owner_where(&mut page, &params);
        page.push(" ORDER BY o.id DESC LIMIT ");
        page.push_bind(params.pagination.limit());
        page.push(" OFFSET ");
        page.push_bind(params.pagination.offset());
        let data = page.build_query_as::<OwnerWithStats>().fetch_all(db).await?;

        Ok(PaginatedOwnersResponse {
            data,
            meta: PaginationMeta::new(&params.pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_owner(db: &PgPool, id: OwnerId) -> Result<OwnerWithStats, AppError> {
        sqlx::query_as::<_, OwnerWithStats>(&format!("{OWNER_WITH_STATS_SELECT} WHERE o.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Owner not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_owner(
        db: &PgPool,
        id: OwnerId,
        dto: UpdateOwnerDto,
    ) -> Result<OwnerWithStats, AppError> {
        let password_hash = dto.password.as_deref().map(hash_password).transpose()?;

        let updated = sqlx::query(
            r#"UPDATE owners
               SET name = COALESCE($1, name),
                   phone = COALESCE($2, phone),
                   status = COALESCE($3, status),
                   subdomain = COALESCE($4, subdomain),
                   sms_activation = COALESCE($5, sms_activation),
                   sms_amount = COALESCE($6, sms_amount),
                   password_hash = COALESCE($7, password_hash),
                   updated_at = NOW()
               WHERE id = $8"#,
        )
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.phone.as_deref().map(str::trim))
        .bind(dto.status)
        .bind(dto.subdomain.as_deref())
        .bind(dto.sms_activation)
        .bind(dto.sms_amount)
        .bind(password_hash)
        .bind(id)
        .execute(db)
        .await
        .map_err(owner_write_error)?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Owner not found")));
        }

        info!(owner_id = %id, "Owner updated by super-admin");
        Self::get_owner(db, id).await
    }

    #[instrument(skip(conn))]
    pub async fn dependents(
        conn: &mut PgConnection,
        id: OwnerId,
    ) -> Result<OwnerDependents, AppError> {
        let dependents = sqlx::query_as::<_, OwnerDependents>(
            r#"SELECT
                (SELECT COUNT(*) FROM students WHERE owner_id = $1) AS students,
                (SELECT COUNT(*) FROM categories WHERE owner_id = $1) AS categories,
                (SELECT COUNT(*) FROM rents WHERE owner_id = $1) AS rents,
                (SELECT COUNT(*) FROM payments WHERE owner_id = $1) AS payments"#,
        )
        .bind(id)
        .fetch_one(conn)
        .await?;
        Ok(dependents)
    }

    /// Deletes an owner with no remaining tenant rows; otherwise 409 with
    /// the per-table counts.
    #[instrument(skip(db))]
    pub async fn delete_owner(db: &PgPool, id: OwnerId) -> Result<(), AppError> {
        Self::get_owner(db, id).await?;

        let mut tx = db.begin().await?;
        sqlx::query("SELECT id FROM owners WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Owner not found")))?;

        let dependents = Self::dependents(&mut tx, id).await?;
        if !dependents.is_empty() {
            return Err(AppError::dependency(
                "Owner still has students, categories, rents or payments",
                &dependents,
            ));
        }

        sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(owner_id = %id, "Owner deleted");
        Ok(())
    }
}
