use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::judge::{InviteJudgeRequest, InviteJudgeResponse, JudgeResponse},
};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/judges/invite",
    request_body = InviteJudgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Judge assigned and invitation sent", body = InviteJudgeResponse),
        (status = 200, description = "Judge was already assigned; existing invite returned", body = InviteJudgeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "judges"
)]
pub async fn invite_judge(
    State(state): State<AppState>,
    Json(req): Json<InviteJudgeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let response = services::invite_judge(&state, &req).await?;
    let status = if response.already_invited {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((status, Json(response)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/judges",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Judges with their category assignments", body = Vec<JudgeResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "judges"
)]
pub async fn list_judges(State(db): State<Database>) -> Result<Response, WebError> {
    let judges = services::list_judges(db.pool()).await?;

    Ok(Json(judges).into_response())
}
