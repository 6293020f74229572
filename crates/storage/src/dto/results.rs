use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::category::CategoryResponse;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResultsResponse {
    pub category: CategoryResponse,
    pub entries: Vec<RankedSubmission>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankedSubmission {
    pub rank: i64,
    pub submission_id: Uuid,
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub total_score: Decimal,
    pub judge_count: i64,
    pub metrics: Vec<MetricAverage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricAverage {
    pub metric_id: Uuid,
    pub name: String,
    pub weight: Decimal,
    /// Mean across judges; absent when nobody scored this metric
    pub average: Option<Decimal>,
    pub score_count: i64,
}
