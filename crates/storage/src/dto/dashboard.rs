use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::category::CategorySummary;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub category_count: i64,
    pub submission_count: i64,
    pub judge_count: i64,
    pub recent_categories: Vec<CategorySummary>,
}
