use axum::{Router, routing::get};

use super::handlers::health_check;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
