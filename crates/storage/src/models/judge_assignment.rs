use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JudgeAssignment {
    pub assignment_id: Uuid,
    pub judge_id: Uuid,
    pub category_id: Uuid,
    pub invite_token: String,
    pub invited_at: NaiveDateTime,
}
