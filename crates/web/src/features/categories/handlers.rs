use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storage::{
    Database,
    dto::{
        category::{
            CategoryDetailResponse, CategoryResponse, CategorySummary, CreateCategoryRequest,
            UpdateCategoryRequest,
        },
        judge::CategoryJudgeEntry,
        metric::{MetricResponse, UpdateWeightsRequest},
        results::CategoryResultsResponse,
        submission::SubmissionDetail,
    },
    services::lifecycle::CategoryAction,
};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::WebError;

use super::services;

/// Category detail together with its public submission link
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryView {
    #[serde(flatten)]
    pub detail: CategoryDetailResponse,
    pub share_link: String,
}

impl CategoryView {
    fn new(detail: CategoryDetailResponse, config: &Config) -> Self {
        Self {
            share_link: config.share_link(&detail.category.share_token),
            detail,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All categories, newest first", body = Vec<CategorySummary>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories"
)]
pub async fn list_categories(State(db): State<Database>) -> Result<Response, WebError> {
    let categories = services::list_categories(db.pool()).await?;

    Ok(Json(categories).into_response())
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Category created in DRAFT", body = CategoryView),
        (status = 400, description = "Validation error or invalid weights"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(db): State<Database>,
    State(config): State<Arc<Config>>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let detail = services::create_category(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(CategoryView::new(detail, &config))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Category with ordered metrics and counts", body = CategoryView),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(db): State<Database>,
    State(config): State<Arc<Config>>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::get_category(db.pool(), id).await?;

    Ok(Json(CategoryView::new(detail, &config)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is completed")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_category(db.pool(), id, &req).await?;

    Ok(Json(CategoryResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Category and everything it owns deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Completed categories cannot be deleted")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_category(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn transition(db: &Database, id: Uuid, action: CategoryAction) -> Result<Response, WebError> {
    let category = services::change_status(db.pool(), id, action).await?;

    Ok(Json(CategoryResponse::from(category)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/categories/{id}/launch",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Category is open for submissions", body = CategoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is not in DRAFT")
    ),
    tag = "categories"
)]
pub async fn launch_category(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    transition(&db, id, CategoryAction::Launch).await
}

#[utoipa::path(
    post,
    path = "/api/categories/{id}/judging",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submissions closed, judging open", body = CategoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is not LAUNCHED")
    ),
    tag = "categories"
)]
pub async fn start_judging(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    transition(&db, id, CategoryAction::StartJudging).await
}

#[utoipa::path(
    post,
    path = "/api/categories/{id}/reopen",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Category accepts submissions again", body = CategoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is not JUDGING")
    ),
    tag = "categories"
)]
pub async fn reopen_category(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    transition(&db, id, CategoryAction::Reopen).await
}

#[utoipa::path(
    post,
    path = "/api/categories/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Final scores computed and category completed", body = CategoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is not JUDGING")
    ),
    tag = "categories"
)]
pub async fn complete_category(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    transition(&db, id, CategoryAction::Complete).await
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}/weights",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateWeightsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Normalized weights; completed categories are rescored", body = Vec<MetricResponse>),
        (status = 400, description = "Invalid weights"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn update_weights(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWeightsRequest>,
) -> Result<Response, WebError> {
    let metrics = services::update_weights(db.pool(), id, &req).await?;

    let response: Vec<MetricResponse> = metrics.into_iter().map(MetricResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}/results",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Ranked submissions with per-metric averages", body = CategoryResultsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is not COMPLETED")
    ),
    tag = "categories"
)]
pub async fn get_category_results(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let results = services::get_results(db.pool(), id).await?;

    Ok(Json(results).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}/submissions",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submissions with their metric values", body = Vec<SubmissionDetail>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn list_category_submissions(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let submissions = services::list_submissions(db.pool(), id).await?;

    Ok(Json(submissions).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}/judges",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Assigned judges with scoring progress", body = Vec<CategoryJudgeEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn list_category_judges(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let judges = services::list_judges(db.pool(), id).await?;

    Ok(Json(judges).into_response())
}
