use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One judge's 1-10 rating of one submission on one metric.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Score {
    pub score_id: Uuid,
    pub judge_id: Uuid,
    pub submission_id: Uuid,
    pub metric_id: Uuid,
    pub value: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
