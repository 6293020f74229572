use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{judge::JudgePanelResponse, score::JudgeScoreRequest},
    models::Score,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/judge/{invite_token}",
    params(
        ("invite_token" = String, Path, description = "Token from the judge's invite link")
    ),
    responses(
        (status = 200, description = "Category, metrics, submissions and this judge's scores", body = JudgePanelResponse),
        (status = 404, description = "Unknown invite or category not in judging")
    ),
    tag = "judging"
)]
pub async fn get_panel(
    State(db): State<Database>,
    Path(invite_token): Path<String>,
) -> Result<Response, WebError> {
    let panel = services::get_panel(db.pool(), &invite_token).await?;

    Ok(Json(panel).into_response())
}

#[utoipa::path(
    post,
    path = "/api/judge/{invite_token}/scores",
    params(
        ("invite_token" = String, Path, description = "Token from the judge's invite link")
    ),
    request_body = JudgeScoreRequest,
    responses(
        (status = 200, description = "Score recorded", body = Score),
        (status = 400, description = "Score out of range or metric not in the category"),
        (status = 404, description = "Unknown invite or submission"),
        (status = 409, description = "Category is not JUDGING")
    ),
    tag = "judging"
)]
pub async fn submit_score(
    State(db): State<Database>,
    Path(invite_token): Path<String>,
    Json(req): Json<JudgeScoreRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let score = services::submit_score(db.pool(), &invite_token, &req).await?;

    Ok(Json(score).into_response())
}
