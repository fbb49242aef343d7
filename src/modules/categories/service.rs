use anyhow::anyhow;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use hostelhub_core::{AppError, PaginationMeta};
use hostelhub_models::{CategoryId, OwnerId};

use crate::modules::categories::model::{
    Category, CategoryDependents, CategoryFilterParams, CreateCategoryDto,
    PaginatedCategoriesResponse, UpdateCategoryDto,
};
use crate::utils::tenant::{Scope, TenantFilter, push_page};

const SEARCH_COLUMNS: &[&str] = &["c.title"];

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(db, dto))]
    pub async fn create_category(
        db: &PgPool,
        owner_id: OwnerId,
        dto: CreateCategoryDto,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories (owner_id, title, rent_amount, external_amount)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
        .bind(owner_id)
        .bind(dto.title.trim())
        .bind(dto.rent_amount)
        .bind(dto.external_amount)
        .fetch_one(db)
        .await?;

        Ok(category)
    }

    #[instrument(skip(db))]
    pub async fn get_categories(
        db: &PgPool,
        owner_id: OwnerId,
        filters: CategoryFilterParams,
    ) -> Result<PaginatedCategoriesResponse, AppError> {
        let filter = TenantFilter::new(Scope::Tenant(owner_id), "c")
            .search(filters.search.as_deref(), SEARCH_COLUMNS);

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM categories c");
        filter.push_where(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(db).await?;

        let mut page = QueryBuilder::<Postgres>::new("SELECT c.* FROM categories c");
        filter.push_where(&mut page);
        push_page(
            &mut page,
            "c",
            filters.pagination.limit(),
            filters.pagination.offset(),
        );
        let data = page.build_query_as::<Category>().fetch_all(db).await?;

        Ok(PaginatedCategoriesResponse {
            data,
            meta: PaginationMeta::new(&filters.pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_category(
        db: &PgPool,
        owner_id: OwnerId,
        id: CategoryId,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Category not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_category(
        db: &PgPool,
        owner_id: OwnerId,
        id: CategoryId,
        dto: UpdateCategoryDto,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"UPDATE categories
               SET title = COALESCE($1, title),
                   rent_amount = COALESCE($2, rent_amount),
                   external_amount = COALESCE($3, external_amount),
                   updated_at = NOW()
               WHERE id = $4 AND owner_id = $5
               RETURNING *"#,
        )
        .bind(dto.title.as_deref().map(str::trim))
        .bind(dto.rent_amount)
        .bind(dto.external_amount)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Category not found")))
    }

    #[instrument(skip(conn))]
    pub async fn dependents(
        conn: &mut PgConnection,
        id: CategoryId,
    ) -> Result<CategoryDependents, AppError> {
        let dependents = sqlx::query_as::<_, CategoryDependents>(
            r#"SELECT
                (SELECT COUNT(*) FROM students WHERE category_id = $1) AS students,
                (SELECT COUNT(*) FROM rents WHERE category_id = $1) AS rents"#,
        )
        .bind(id)
        .fetch_one(conn)
        .await?;
        Ok(dependents)
    }

    /// Deletes a category nothing references; otherwise 409 with the counts.
    #[instrument(skip(db))]
    pub async fn delete_category(
        db: &PgPool,
        owner_id: OwnerId,
        id: CategoryId,
    ) -> Result<(), AppError> {
        Self::get_category(db, owner_id, id).await?;

        let mut tx = db.begin().await?;
        sqlx::query("SELECT id FROM categories WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Category not found")))?;

        let dependents = Self::dependents(&mut tx, id).await?;
        if !dependents.is_empty() {
            return Err(AppError::dependency(
                "Category is still referenced by students or rents",
                &dependents,
            ));
        }

        sqlx::query("DELETE FROM categories WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }
}
