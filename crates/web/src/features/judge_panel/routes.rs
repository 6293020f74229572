use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{get_panel, submit_score};
use crate::state::AppState;

/// Public routes; the invite token is the judge's credential.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:invite_token", get(get_panel))
        .route("/:invite_token/scores", post(submit_score))
}
