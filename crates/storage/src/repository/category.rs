use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::category::{
    CategoryDetailResponse, CategoryResponse, CategorySummary, CreateCategoryRequest,
    UpdateCategoryRequest,
};
use crate::dto::metric::MetricResponse;
use crate::error::{Result, StorageError};
use crate::models::{Category, CategoryStatus};
use crate::repository::metric as metric_tx;
use crate::services::{credentials, lifecycle, weights};

/// Repository for Category database operations
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new CategoryRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, newest first, with their counts
    pub async fn list(&self) -> Result<Vec<CategorySummary>> {
        self.summaries(None).await
    }

    /// The `limit` most recently created categories
    pub async fn recent(&self, limit: i64) -> Result<Vec<CategorySummary>> {
        self.summaries(Some(limit)).await
    }

    async fn summaries(&self, limit: Option<i64>) -> Result<Vec<CategorySummary>> {
        let categories = sqlx::query_as::<_, CategorySummary>(
            r#"
            SELECT c.category_id, c.name, c.description, c.status, c.share_token, c.created_at,
                   (SELECT COUNT(*) FROM submissions s WHERE s.category_id = c.category_id) AS submission_count,
                   (SELECT COUNT(*) FROM metrics m WHERE m.category_id = c.category_id) AS metric_count,
                   (SELECT COUNT(*) FROM judge_assignments j WHERE j.category_id = c.category_id) AS judge_count
            FROM categories c
            ORDER BY c.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Get a category by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, name, description, status, share_token, created_at, updated_at
            FROM categories
            WHERE category_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(category)
    }

    /// Get a category by the token of its public submission link
    pub async fn find_by_share_token(&self, token: &str) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, name, description, status, share_token, created_at, updated_at
            FROM categories
            WHERE share_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(category)
    }

    /// Category with ordered metrics and submission/judge counts
    pub async fn find_detailed(&self, id: Uuid) -> Result<CategoryDetailResponse> {
        let category = self.find_by_id(id).await?;

        let mut conn = self.pool.acquire().await?;
        let metrics = metric_tx::metrics_for_category(&mut conn, id).await?;

        let (submission_count, judge_count) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM submissions WHERE category_id = $1),
                (SELECT COUNT(*) FROM judge_assignments WHERE category_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(CategoryDetailResponse {
            category: CategoryResponse::from(category),
            metrics: metrics.into_iter().map(MetricResponse::from).collect(),
            submission_count,
            judge_count,
        })
    }

    /// Create a category in DRAFT together with its metrics.
    ///
    /// Metric weights are normalized before anything is written; the
    /// category and its metrics are inserted in one transaction.
    pub async fn create(&self, req: &CreateCategoryRequest) -> Result<CategoryDetailResponse> {
        let raw_weights = req
            .raw_weights()
            .map_err(|e| StorageError::Validation(e.to_string()))?;
        let normalized = weights::normalize(req.weight_mode, raw_weights)?;

        let mut tx = self.pool.begin().await?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, share_token)
            VALUES ($1, $2, $3)
            RETURNING category_id, name, description, status, share_token, created_at, updated_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(credentials::generate_token())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).into_constraint("Share token already exists"))?;

        let mut metrics = Vec::with_capacity(req.metrics.len());
        for (index, weight) in normalized {
            let metric = metric_tx::insert_metric(
                &mut tx,
                category.category_id,
                &req.metrics[index],
                weight,
                index as i32,
            )
            .await?;
            metrics.push(MetricResponse::from(metric));
        }

        tx.commit().await?;

        tracing::info!(
            category_id = %category.category_id,
            metrics = metrics.len(),
            "Created category"
        );

        Ok(CategoryDetailResponse {
            category: CategoryResponse::from(category),
            metrics,
            submission_count: 0,
            judge_count: 0,
        })
    }

    /// Update name and/or description of a category that is not completed
    pub async fn update(&self, id: Uuid, req: &UpdateCategoryRequest) -> Result<Category> {
        let mut tx = self.pool.begin().await?;

        let current = lock_for_update(&mut tx, id).await?;
        lifecycle::ensure(current.status, lifecycle::is_editable, "editing")?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = CURRENT_TIMESTAMP
            WHERE category_id = $1
            RETURNING category_id, name, description, status, share_token, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(category)
    }

    /// Delete a category and, by cascade, everything it owns.
    /// Completed categories are kept.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let category = lock_for_update(&mut tx, id).await?;
        lifecycle::ensure(category.status, lifecycle::is_deletable, "deleting")?;

        sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(category_id = %id, "Deleted category");

        Ok(())
    }
}

/// Load a category and hold its row lock until the transaction ends.
pub async fn lock_for_update(conn: &mut PgConnection, id: Uuid) -> Result<Category> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT category_id, name, description, status, share_token, created_at, updated_at
        FROM categories
        WHERE category_id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound)
}

/// Share-lock a category by share token, blocking status changes until
/// the transaction ends.
pub async fn lock_by_share_token(conn: &mut PgConnection, token: &str) -> Result<Category> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT category_id, name, description, status, share_token, created_at, updated_at
        FROM categories
        WHERE share_token = $1
        FOR SHARE
        "#,
    )
    .bind(token)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound)
}

pub async fn set_status(conn: &mut PgConnection, id: Uuid, status: CategoryStatus) -> Result<Category> {
    sqlx::query_as::<_, Category>(
        r#"
        UPDATE categories
        SET status = $2, updated_at = CURRENT_TIMESTAMP
        WHERE category_id = $1
        RETURNING category_id, name, description, status, share_token, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound)
}
