use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{invite_judge, list_judges};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_judges))
        .route("/invite", post(invite_judge))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
