use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::category::CreateMetricRequest;
use crate::dto::metric::{UpdateMetricRequest, UpdateWeightsRequest};
use crate::error::{Result, StorageError};
use crate::models::{CategoryStatus, Metric};
use crate::repository::category as category_tx;
use crate::services::{
    lifecycle, scoring,
    weights::{self, WeightMode},
};

pub struct MetricRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MetricRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Metric> {
        let metric = sqlx::query_as::<_, Metric>(
            r#"
            SELECT metric_id, category_id, name, description, metric_type, weight, sort_order
            FROM metrics
            WHERE metric_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(metric)
    }

    /// Rename or re-describe a metric while its category is still a draft
    pub async fn update(&self, id: Uuid, req: &UpdateMetricRequest) -> Result<Metric> {
        let existing = self.find_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        let category = category_tx::lock_for_update(&mut tx, existing.category_id).await?;
        lifecycle::ensure(category.status, lifecycle::allows_metric_changes, "editing metrics")?;

        let metric = sqlx::query_as::<_, Metric>(
            r#"
            UPDATE metrics
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
            WHERE metric_id = $1
            RETURNING metric_id, category_id, name, description, metric_type, weight, sort_order
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(metric)
    }

    /// Delete a metric of a draft category; the remaining weights are
    /// rescaled to sum to 1 in the same transaction.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let existing = self.find_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        let category = category_tx::lock_for_update(&mut tx, existing.category_id).await?;
        lifecycle::ensure(category.status, lifecycle::allows_metric_changes, "deleting metrics")?;

        let remaining: Vec<Metric> = metrics_for_category(&mut tx, category.category_id)
            .await?
            .into_iter()
            .filter(|m| m.metric_id != id)
            .collect();

        if remaining.is_empty() {
            return Err(StorageError::Validation(
                "A category needs at least one metric".to_string(),
            ));
        }

        sqlx::query("DELETE FROM metrics WHERE metric_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let rescaled = weights::normalize(
            WeightMode::Multiplier,
            remaining.iter().map(|m| (m.metric_id, m.weight)).collect(),
        )?;
        for (metric_id, weight) in rescaled {
            set_weight(&mut tx, metric_id, weight).await?;
        }

        tx.commit().await?;

        tracing::info!(metric_id = %id, category_id = %category.category_id, "Deleted metric");

        Ok(())
    }

    /// Replace every weight of a category.
    ///
    /// The request must name each metric of the category exactly once.
    /// When the category is already completed, submission totals are
    /// recomputed before the transaction commits.
    pub async fn update_weights(&self, category_id: Uuid, req: &UpdateWeightsRequest) -> Result<Vec<Metric>> {
        let mut tx = self.pool.begin().await?;

        let category = category_tx::lock_for_update(&mut tx, category_id).await?;
        let metrics = metrics_for_category(&mut tx, category_id).await?;

        if let Some(unknown) = req
            .weights
            .keys()
            .find(|id| !metrics.iter().any(|m| m.metric_id == **id))
        {
            return Err(StorageError::Validation(format!(
                "Metric {unknown} does not belong to this category"
            )));
        }

        let entries = metrics
            .iter()
            .map(|m| {
                req.weights
                    .get(&m.metric_id)
                    .map(|w| (m.metric_id, *w))
                    .ok_or_else(|| StorageError::Validation(format!("Missing weight for '{}'", m.name)))
            })
            .collect::<Result<Vec<(Uuid, Decimal)>>>()?;

        let normalized = weights::normalize(req.mode, entries)?;
        for (metric_id, weight) in normalized {
            set_weight(&mut tx, metric_id, weight).await?;
        }

        if category.status == CategoryStatus::Completed {
            let rescored = scoring::finalize_totals(&mut tx, category_id).await?;
            tracing::info!(%category_id, submissions = rescored, "Recomputed final scores after weight change");
        }

        let updated = metrics_for_category(&mut tx, category_id).await?;
        tx.commit().await?;

        Ok(updated)
    }
}

/// Metrics of a category in display order.
pub async fn metrics_for_category(conn: &mut PgConnection, category_id: Uuid) -> Result<Vec<Metric>> {
    let metrics = sqlx::query_as::<_, Metric>(
        r#"
        SELECT metric_id, category_id, name, description, metric_type, weight, sort_order
        FROM metrics
        WHERE category_id = $1
        ORDER BY sort_order ASC
        "#,
    )
    .bind(category_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(metrics)
}

pub async fn insert_metric(
    conn: &mut PgConnection,
    category_id: Uuid,
    req: &CreateMetricRequest,
    weight: Decimal,
    sort_order: i32,
) -> Result<Metric> {
    let metric = sqlx::query_as::<_, Metric>(
        r#"
        INSERT INTO metrics (category_id, name, description, metric_type, weight, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING metric_id, category_id, name, description, metric_type, weight, sort_order
        "#,
    )
    .bind(category_id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.metric_type)
    .bind(weight)
    .bind(sort_order)
    .fetch_one(&mut *conn)
    .await?;

    Ok(metric)
}

async fn set_weight(conn: &mut PgConnection, metric_id: Uuid, weight: Decimal) -> Result<()> {
    sqlx::query("UPDATE metrics SET weight = $2 WHERE metric_id = $1")
        .bind(metric_id)
        .bind(weight)
        .execute(&mut *conn)
        .await?;

    Ok(())
}
