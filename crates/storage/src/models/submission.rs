use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Submission {
    pub submission_id: Uuid,
    pub category_id: Uuid,
    pub company_name: String,
    pub contact_email: String,
    pub contact_name: String,
    /// Set once, when the category is completed.
    pub total_score: Option<Decimal>,
    pub created_at: NaiveDateTime,
}
