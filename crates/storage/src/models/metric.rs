use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "metric_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    Text,
    Numeric,
}

/// A weighted judging criterion of a category.
///
/// `weight` is always the normalized fraction: the weights of one
/// category's metrics sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Metric {
    pub metric_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub weight: Decimal,
    #[serde(rename = "order")]
    pub sort_order: i32,
}
