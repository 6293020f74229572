use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    complete_category, create_category, delete_category, get_category, get_category_results,
    launch_category, list_categories, list_category_judges, list_category_submissions,
    reopen_category, start_judging, update_category, update_weights,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

/// Every category endpoint is organizer-only.
pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/:id/launch", post(launch_category))
        .route("/:id/judging", post(start_judging))
        .route("/:id/reopen", post(reopen_category))
        .route("/:id/complete", post(complete_category))
        .route("/:id/weights", put(update_weights))
        .route("/:id/results", get(get_category_results))
        .route("/:id/submissions", get(list_category_submissions))
        .route("/:id/judges", get(list_category_judges))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
