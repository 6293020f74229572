use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::dashboard::DashboardResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Totals and the most recent categories", body = DashboardResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard(State(db): State<Database>) -> Result<Response, WebError> {
    let dashboard = services::get_dashboard(db.pool()).await?;

    Ok(Json(dashboard).into_response())
}
