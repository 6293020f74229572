use sqlx::PgPool;
use storage::{
    dto::score::SubmitScoreRequest, error::Result, models::Score,
    repository::score::ScoreRepository,
};

pub async fn submit_score(pool: &PgPool, request: &SubmitScoreRequest) -> Result<Score> {
    ScoreRepository::new(pool)
        .upsert(
            request.judge_id,
            request.submission_id,
            request.metric_id,
            request.value,
        )
        .await
}
