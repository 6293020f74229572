use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Organizer-side score upsert naming the judge explicitly
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitScoreRequest {
    pub judge_id: Uuid,
    pub submission_id: Uuid,
    pub metric_id: Uuid,
    #[validate(range(min = 1, max = 10, message = "Score must be between 1 and 10"))]
    pub value: i32,
}

/// Score upsert from a judge's invite link; the judge comes from the token
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct JudgeScoreRequest {
    pub submission_id: Uuid,
    pub metric_id: Uuid,
    #[validate(range(min = 1, max = 10, message = "Score must be between 1 and 10"))]
    pub value: i32,
}
