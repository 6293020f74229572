use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::submission::{CreateSubmissionRequest, SubmissionDetail, SubmissionListEntry};
use crate::error::{Result, StorageError};
use crate::models::{MetricValue, Submission};
use crate::repository::{category as category_tx, metric as metric_tx};
use crate::services::{lifecycle, metric_values};

pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a submission made through a category's share link.
    ///
    /// The category is share-locked while the submission and its values are
    /// written, so it cannot leave LAUNCHED halfway through.
    pub async fn create(&self, req: &CreateSubmissionRequest) -> Result<SubmissionDetail> {
        let mut tx = self.pool.begin().await?;

        let category = category_tx::lock_by_share_token(&mut tx, &req.share_token).await?;
        lifecycle::ensure(category.status, lifecycle::accepts_submissions, "submitting")?;

        let metrics = metric_tx::metrics_for_category(&mut tx, category.category_id).await?;
        let values = metric_values::resolve_values(&metrics, &req.metric_values)?;

        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (category_id, company_name, contact_email, contact_name)
            VALUES ($1, $2, $3, $4)
            RETURNING submission_id, category_id, company_name, contact_email, contact_name,
                      total_score, created_at
            "#,
        )
        .bind(category.category_id)
        .bind(req.company_name.trim())
        .bind(req.contact_email.trim())
        .bind(req.contact_name.trim())
        .fetch_one(&mut *tx)
        .await?;

        let mut stored_values = Vec::with_capacity(values.len());
        for (metric_id, value) in values {
            let stored = sqlx::query_as::<_, MetricValue>(
                r#"
                INSERT INTO metric_values (submission_id, metric_id, text_value, numeric_value)
                VALUES ($1, $2, $3, $4)
                RETURNING metric_value_id, submission_id, metric_id, text_value, numeric_value
                "#,
            )
            .bind(submission.submission_id)
            .bind(metric_id)
            .bind(value.text())
            .bind(value.numeric())
            .fetch_one(&mut *tx)
            .await?;
            stored_values.push(stored);
        }

        tx.commit().await?;

        tracing::info!(
            submission_id = %submission.submission_id,
            category_id = %category.category_id,
            "Received submission"
        );

        Ok(SubmissionDetail {
            submission,
            metric_values: stored_values,
        })
    }

    /// All submissions across categories, newest first
    pub async fn list(&self, params: &PaginationParams) -> Result<(Vec<SubmissionListEntry>, i64)> {
        let total_items = self.count().await?;

        let entries = sqlx::query_as::<_, SubmissionListEntry>(
            r#"
            SELECT s.submission_id, s.category_id, c.name AS category_name, s.company_name,
                   s.contact_email, s.contact_name, s.total_score, s.created_at
            FROM submissions s
            INNER JOIN categories c ON c.category_id = s.category_id
            ORDER BY s.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((entries, total_items))
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submissions")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Submissions of one category with their metric values
    pub async fn list_for_category(&self, category_id: Uuid) -> Result<Vec<SubmissionDetail>> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(self.pool)
        .await?;

        if !exists {
            return Err(StorageError::NotFound);
        }

        let mut conn = self.pool.acquire().await?;
        details_for_category(&mut conn, category_id).await
    }
}

pub async fn submission_ids_for_category(conn: &mut PgConnection, category_id: Uuid) -> Result<Vec<Uuid>> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        "SELECT submission_id FROM submissions WHERE category_id = $1 ORDER BY created_at",
    )
    .bind(category_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(ids)
}

pub async fn set_total_score(conn: &mut PgConnection, submission_id: Uuid, total: Decimal) -> Result<()> {
    sqlx::query("UPDATE submissions SET total_score = $2 WHERE submission_id = $1")
        .bind(submission_id)
        .bind(total)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Submissions ordered best first; ties go to the earlier entry.
pub async fn ranked_submissions(conn: &mut PgConnection, category_id: Uuid) -> Result<Vec<Submission>> {
    let submissions = sqlx::query_as::<_, Submission>(
        r#"
        SELECT submission_id, category_id, company_name, contact_email, contact_name,
               total_score, created_at
        FROM submissions
        WHERE category_id = $1
        ORDER BY total_score DESC NULLS LAST, created_at ASC
        "#,
    )
    .bind(category_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(submissions)
}

/// Submissions of a category, oldest first, each with its metric values.
pub async fn details_for_category(conn: &mut PgConnection, category_id: Uuid) -> Result<Vec<SubmissionDetail>> {
    let submissions = sqlx::query_as::<_, Submission>(
        r#"
        SELECT submission_id, category_id, company_name, contact_email, contact_name,
               total_score, created_at
        FROM submissions
        WHERE category_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(category_id)
    .fetch_all(&mut *conn)
    .await?;

    let values = sqlx::query_as::<_, MetricValue>(
        r#"
        SELECT mv.metric_value_id, mv.submission_id, mv.metric_id, mv.text_value, mv.numeric_value
        FROM metric_values mv
        INNER JOIN submissions s ON s.submission_id = mv.submission_id
        INNER JOIN metrics m ON m.metric_id = mv.metric_id
        WHERE s.category_id = $1
        ORDER BY m.sort_order ASC
        "#,
    )
    .bind(category_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut by_submission: HashMap<Uuid, Vec<MetricValue>> = HashMap::new();
    for value in values {
        by_submission.entry(value.submission_id).or_default().push(value);
    }

    Ok(submissions
        .into_iter()
        .map(|submission| SubmissionDetail {
            metric_values: by_submission
                .remove(&submission.submission_id)
                .unwrap_or_default(),
            submission,
        })
        .collect())
}
