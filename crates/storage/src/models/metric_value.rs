use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MetricValue {
    pub metric_value_id: Uuid,
    pub submission_id: Uuid,
    pub metric_id: Uuid,
    pub text_value: Option<String>,
    pub numeric_value: Option<Decimal>,
}
