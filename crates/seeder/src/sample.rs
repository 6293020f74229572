use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::{
    dto::category::{CategoryDetailResponse, CreateCategoryRequest, CreateMetricRequest},
    models::MetricType,
    repository::category::CategoryRepository,
    services::{
        lifecycle::{self, CategoryAction},
        weights::WeightMode,
    },
};

use crate::error::Result;

pub const SAMPLE_CATEGORY_NAME: &str = "Best AI Innovation 2025";

/// (name, type, multiplier in tenths)
const SAMPLE_METRICS: [(&str, MetricType, i64); 4] = [
    ("Annual Cost Savings ($)", MetricType::Numeric, 15),
    ("Key Innovation Description", MetricType::Text, 10),
    ("Users Impacted", MetricType::Numeric, 12),
    ("Technical Excellence", MetricType::Text, 20),
];

#[derive(Debug)]
pub enum SampleOutcome {
    Created(CategoryDetailResponse),
    AlreadyPresent,
}

pub fn sample_category_request() -> CreateCategoryRequest {
    CreateCategoryRequest {
        name: SAMPLE_CATEGORY_NAME.to_string(),
        description: Some(
            "Recognizing groundbreaking AI solutions that transform industries".to_string(),
        ),
        weight_mode: WeightMode::Multiplier,
        metrics: SAMPLE_METRICS
            .iter()
            .map(|(name, metric_type, tenths)| CreateMetricRequest {
                name: name.to_string(),
                description: None,
                metric_type: *metric_type,
                weight: Some(Decimal::new(*tenths, 1)),
            })
            .collect(),
    }
}

/// Create the sample category unless one with the same name exists.
/// With `launch` it is moved to LAUNCHED so the share link works at once.
pub async fn seed_sample_category(pool: &PgPool, launch: bool) -> Result<SampleOutcome> {
    let repo = CategoryRepository::new(pool);

    if repo
        .list()
        .await?
        .iter()
        .any(|category| category.name == SAMPLE_CATEGORY_NAME)
    {
        tracing::info!("Sample category already present, skipping");
        return Ok(SampleOutcome::AlreadyPresent);
    }

    let mut detail = repo.create(&sample_category_request()).await?;

    if launch {
        let launched = lifecycle::apply(pool, detail.category.category_id, CategoryAction::Launch).await?;
        detail.category.status = launched.status;
        detail.category.updated_at = launched.updated_at;
    }

    tracing::info!(
        category_id = %detail.category.category_id,
        status = %detail.category.status,
        "Created sample category"
    );

    Ok(SampleOutcome::Created(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::services::weights;

    #[test]
    fn test_sample_request_has_four_ordered_metrics() {
        let req = sample_category_request();
        let names: Vec<&str> = req.metrics.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Annual Cost Savings ($)",
                "Key Innovation Description",
                "Users Impacted",
                "Technical Excellence",
            ]
        );
        assert_eq!(req.metrics[0].weight, Some(Decimal::new(15, 1)));
        assert_eq!(req.metrics[1].metric_type, MetricType::Text);
    }

    #[test]
    fn test_sample_weights_normalize() {
        let req = sample_category_request();
        let normalized = weights::normalize(req.weight_mode, req.raw_weights().unwrap()).unwrap();

        let sum: Decimal = normalized.iter().map(|(_, w)| *w).sum();
        assert!((sum - Decimal::ONE).abs() < Decimal::new(1, 20));
        // 2.0 / 5.7 is the largest share
        assert!(normalized[3].1 > normalized[0].1);
    }
}
