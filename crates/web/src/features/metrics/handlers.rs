use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::metric::{MetricResponse, UpdateMetricRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    put,
    path = "/api/metrics/{id}",
    params(
        ("id" = Uuid, Path, description = "Metric ID")
    ),
    request_body = UpdateMetricRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Metric updated", body = MetricResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Metric not found"),
        (status = 409, description = "Category is no longer a draft")
    ),
    tag = "metrics"
)]
pub async fn update_metric(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMetricRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let metric = services::update_metric(db.pool(), id, &req).await?;

    Ok(Json(MetricResponse::from(metric)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/metrics/{id}",
    params(
        ("id" = Uuid, Path, description = "Metric ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Metric deleted and remaining weights rescaled"),
        (status = 400, description = "Cannot delete the last metric"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Metric not found"),
        (status = 409, description = "Category is no longer a draft")
    ),
    tag = "metrics"
)]
pub async fn delete_metric(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_metric(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
