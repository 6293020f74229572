use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{create_submission, get_submission_form, list_submissions};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

/// Mounted under `/api`: the share-link form and submission are public,
/// the listing is organizer-only.
pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/submissions", get(list_submissions))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/submit/:share_token", get(get_submission_form))
        .route("/submissions", post(create_submission))
        .merge(protected)
}
