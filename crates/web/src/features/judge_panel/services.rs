use sqlx::PgPool;
use storage::{
    dto::{judge::JudgePanelResponse, score::JudgeScoreRequest},
    error::Result,
    models::Score,
    repository::judge::JudgeRepository,
};

pub async fn get_panel(pool: &PgPool, invite_token: &str) -> Result<JudgePanelResponse> {
    JudgeRepository::new(pool).panel(invite_token).await
}

pub async fn submit_score(pool: &PgPool, invite_token: &str, request: &JudgeScoreRequest) -> Result<Score> {
    JudgeRepository::new(pool)
        .score_via_token(
            invite_token,
            request.submission_id,
            request.metric_id,
            request.value,
        )
        .await
}
