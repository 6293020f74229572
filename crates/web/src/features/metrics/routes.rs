use axum::{Router, middleware, routing::put};

use super::handlers::{delete_metric, update_metric};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/:id", put(update_metric).delete(delete_metric))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
