use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{CategoryStatus, Score};
use crate::services::{lifecycle, scoring};

pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a judge's score, overwriting any earlier score for the same
    /// (judge, submission, metric).
    ///
    /// Rejects out-of-range values, metrics from another category, judges
    /// not assigned to the category and categories that are not judging.
    pub async fn upsert(
        &self,
        judge_id: Uuid,
        submission_id: Uuid,
        metric_id: Uuid,
        value: i32,
    ) -> Result<Score> {
        self.record(judge_id, submission_id, metric_id, value, None).await
    }

    /// Same as [`upsert`](Self::upsert), but the submission must belong to
    /// `category_id`; anything else is reported as not found.
    pub async fn upsert_in_category(
        &self,
        category_id: Uuid,
        judge_id: Uuid,
        submission_id: Uuid,
        metric_id: Uuid,
        value: i32,
    ) -> Result<Score> {
        self.record(judge_id, submission_id, metric_id, value, Some(category_id))
            .await
    }

    async fn record(
        &self,
        judge_id: Uuid,
        submission_id: Uuid,
        metric_id: Uuid,
        value: i32,
        scope: Option<Uuid>,
    ) -> Result<Score> {
        scoring::validate_score_value(value)?;

        let mut tx = self.pool.begin().await?;

        let (category_id, status) = sqlx::query_as::<_, (Uuid, CategoryStatus)>(
            r#"
            SELECT c.category_id, c.status
            FROM submissions s
            INNER JOIN categories c ON c.category_id = s.category_id
            WHERE s.submission_id = $1
            FOR SHARE OF c
            "#,
        )
        .bind(submission_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        if scope.is_some_and(|scoped| scoped != category_id) {
            return Err(StorageError::NotFound);
        }

        lifecycle::ensure(status, lifecycle::accepts_scores, "scoring")?;

        let metric_in_category = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM metrics WHERE metric_id = $1 AND category_id = $2)",
        )
        .bind(metric_id)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await?;

        if !metric_in_category {
            return Err(StorageError::Validation(
                "Metric does not belong to the submission's category".to_string(),
            ));
        }

        let assigned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM judge_assignments WHERE judge_id = $1 AND category_id = $2)",
        )
        .bind(judge_id)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await?;

        if !assigned {
            return Err(StorageError::Forbidden(
                "Judge is not assigned to this category".to_string(),
            ));
        }

        let score = sqlx::query_as::<_, Score>(
            r#"
            INSERT INTO scores (judge_id, submission_id, metric_id, value)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (judge_id, submission_id, metric_id)
            DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = CURRENT_TIMESTAMP
            RETURNING score_id, judge_id, submission_id, metric_id, value, created_at, updated_at
            "#,
        )
        .bind(judge_id)
        .bind(submission_id)
        .bind(metric_id)
        .bind(value)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(%judge_id, %submission_id, %metric_id, value, "Recorded score");

        Ok(score)
    }

    /// Scores one judge has given within a category
    pub async fn by_judge_in_category(&self, judge_id: Uuid, category_id: Uuid) -> Result<Vec<Score>> {
        let scores = sqlx::query_as::<_, Score>(
            r#"
            SELECT sc.score_id, sc.judge_id, sc.submission_id, sc.metric_id, sc.value,
                   sc.created_at, sc.updated_at
            FROM scores sc
            INNER JOIN submissions s ON s.submission_id = sc.submission_id
            WHERE sc.judge_id = $1 AND s.category_id = $2
            "#,
        )
        .bind(judge_id)
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }
}

/// Every judge's scores for every submission of a category.
pub async fn scores_for_category(conn: &mut PgConnection, category_id: Uuid) -> Result<Vec<Score>> {
    let scores = sqlx::query_as::<_, Score>(
        r#"
        SELECT sc.score_id, sc.judge_id, sc.submission_id, sc.metric_id, sc.value,
               sc.created_at, sc.updated_at
        FROM scores sc
        INNER JOIN submissions s ON s.submission_id = sc.submission_id
        WHERE s.category_id = $1
        "#,
    )
    .bind(category_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(scores)
}
