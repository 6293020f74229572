use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::score::SubmitScoreRequest, models::Score};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/scores",
    request_body = SubmitScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Score recorded, replacing any earlier score for the same judge, submission and metric", body = Score),
        (status = 400, description = "Score out of range or metric not in the submission's category"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Judge is not assigned to the category"),
        (status = 404, description = "Submission not found"),
        (status = 409, description = "Category is not JUDGING")
    ),
    tag = "scores"
)]
pub async fn submit_score(
    State(db): State<Database>,
    Json(req): Json<SubmitScoreRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let score = services::submit_score(db.pool(), &req).await?;

    Ok(Json(score).into_response())
}
