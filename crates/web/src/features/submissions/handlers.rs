use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        category::SubmissionFormResponse,
        common::{PaginatedResponse, PaginationParams},
        submission::{CreateSubmissionRequest, SubmissionDetail, SubmissionListEntry},
    },
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/submit/{share_token}",
    params(
        ("share_token" = String, Path, description = "Token from the category's share link")
    ),
    responses(
        (status = 200, description = "Category and metrics to fill in", body = SubmissionFormResponse),
        (status = 404, description = "Unknown link or category not accepting submissions")
    ),
    tag = "submissions"
)]
pub async fn get_submission_form(
    State(db): State<Database>,
    Path(share_token): Path<String>,
) -> Result<Response, WebError> {
    let form = services::get_submission_form(db.pool(), &share_token).await?;

    Ok(Json(form).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission recorded", body = SubmissionDetail),
        (status = 400, description = "Validation error or bad metric values"),
        (status = 404, description = "Unknown share token"),
        (status = 409, description = "Category is not accepting submissions")
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(db): State<Database>,
    Json(req): Json<CreateSubmissionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let submission = services::create_submission(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(submission)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submissions across all categories, newest first", body = PaginatedResponse<SubmissionListEntry>),
        (status = 400, description = "Invalid pagination"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(db): State<Database>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate()?;

    let page = services::list_submissions(db.pool(), &params).await?;

    Ok(Json(page).into_response())
}
