use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::metric::MetricResponse;
use crate::models::{Category, CategoryStatus, MetricType};
use crate::services::weights::WeightMode;

/// Request payload for creating a category together with its metrics
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    /// How the metric weights below are expressed
    #[serde(default)]
    pub weight_mode: WeightMode,

    #[validate(length(min = 1, message = "At least one metric is required"))]
    #[validate(nested)]
    pub metrics: Vec<CreateMetricRequest>,
}

/// A metric defined inline with its category; its position sets the order
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMetricRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Metric name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub metric_type: MetricType,

    /// Defaults to 1.0 in multiplier mode; required in percentage mode
    pub weight: Option<Decimal>,
}

/// Request payload for updating a category's descriptive fields
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: CategoryStatus,
    pub share_token: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Category row with aggregate counts, as listed on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategorySummary {
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: CategoryStatus,
    pub share_token: String,
    pub created_at: NaiveDateTime,
    pub submission_count: i64,
    pub metric_count: i64,
    pub judge_count: i64,
}

/// Category with its ordered metrics and counts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub metrics: Vec<MetricResponse>,
    pub submission_count: i64,
    pub judge_count: i64,
}

/// Public view of a launched category for the submission form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionFormResponse {
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub metrics: Vec<MetricResponse>,
}

impl CreateCategoryRequest {
    /// Weights in input order, filling in the multiplier default.
    pub fn raw_weights(&self) -> Result<Vec<(usize, Decimal)>, &'static str> {
        self.metrics
            .iter()
            .enumerate()
            .map(|(index, metric)| match (metric.weight, self.weight_mode) {
                (Some(weight), _) => Ok((index, weight)),
                (None, WeightMode::Multiplier) => Ok((index, Decimal::ONE)),
                (None, WeightMode::Percentage) => {
                    Err("Every metric needs a weight when weights are percentages")
                }
            })
            .collect()
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.category_id,
            name: category.name,
            description: category.description,
            status: category.status,
            share_token: category.share_token,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
