use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Metric, MetricType};
use crate::services::weights::{self, WeightMode};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricResponse {
    pub metric_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    /// Normalized fraction; the weights of a category sum to 1
    pub weight: Decimal,
    pub weight_percentage: Decimal,
    pub order: i32,
}

/// Request payload for renaming or re-describing a metric
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMetricRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Bulk replacement of every metric weight of a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateWeightsRequest {
    #[serde(default)]
    pub mode: WeightMode,
    /// Weight per metric id, expressed in `mode`
    pub weights: HashMap<Uuid, Decimal>,
}

impl From<Metric> for MetricResponse {
    fn from(metric: Metric) -> Self {
        Self {
            weight_percentage: weights::as_percentage(metric.weight),
            metric_id: metric.metric_id,
            category_id: metric.category_id,
            name: metric.name,
            description: metric.description,
            metric_type: metric.metric_type,
            weight: metric.weight,
            order: metric.sort_order,
        }
    }
}
