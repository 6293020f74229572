use axum::{Router, middleware, routing::get};

use super::handlers::get_dashboard;
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
