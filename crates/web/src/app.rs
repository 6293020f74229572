use std::time::Duration;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{
    categories, dashboard, health, judge_panel, judges, metrics, scores, submissions,
};
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        categories::handlers::list_categories,
        categories::handlers::create_category,
        categories::handlers::get_category,
        categories::handlers::update_category,
        categories::handlers::delete_category,
        categories::handlers::launch_category,
        categories::handlers::start_judging,
        categories::handlers::reopen_category,
        categories::handlers::complete_category,
        categories::handlers::update_weights,
        categories::handlers::get_category_results,
        categories::handlers::list_category_submissions,
        categories::handlers::list_category_judges,
        metrics::handlers::update_metric,
        metrics::handlers::delete_metric,
        submissions::handlers::get_submission_form,
        submissions::handlers::create_submission,
        submissions::handlers::list_submissions,
        scores::handlers::submit_score,
        judges::handlers::invite_judge,
        judges::handlers::list_judges,
        judge_panel::handlers::get_panel,
        judge_panel::handlers::submit_score,
        dashboard::handlers::get_dashboard,
        health::handlers::health_check,
    ),
    components(
        schemas(
            categories::handlers::CategoryView,
            health::handlers::HealthResponse,
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::CreateMetricRequest,
            storage::dto::category::UpdateCategoryRequest,
            storage::dto::category::CategoryResponse,
            storage::dto::category::CategorySummary,
            storage::dto::category::CategoryDetailResponse,
            storage::dto::category::SubmissionFormResponse,
            storage::dto::metric::MetricResponse,
            storage::dto::metric::UpdateMetricRequest,
            storage::dto::metric::UpdateWeightsRequest,
            storage::dto::submission::CreateSubmissionRequest,
            storage::dto::submission::MetricValueInput,
            storage::dto::submission::SubmissionDetail,
            storage::dto::submission::SubmissionListEntry,
            storage::dto::score::SubmitScoreRequest,
            storage::dto::score::JudgeScoreRequest,
            storage::dto::results::CategoryResultsResponse,
            storage::dto::results::RankedSubmission,
            storage::dto::results::MetricAverage,
            storage::dto::judge::InviteJudgeRequest,
            storage::dto::judge::InviteJudgeResponse,
            storage::dto::judge::JudgeInfo,
            storage::dto::judge::JudgeResponse,
            storage::dto::judge::AssignedCategory,
            storage::dto::judge::CategoryJudgeEntry,
            storage::dto::judge::JudgePanelResponse,
            storage::dto::dashboard::DashboardResponse,
            storage::dto::common::PaginationMeta,
            storage::models::Category,
            storage::models::CategoryStatus,
            storage::models::Metric,
            storage::models::MetricType,
            storage::models::MetricValue,
            storage::models::Submission,
            storage::models::Score,
            storage::models::JudgeAssignment,
            storage::services::weights::WeightMode,
        )
    ),
    tags(
        (name = "categories", description = "Organizer category management and lifecycle"),
        (name = "metrics", description = "Organizer metric editing"),
        (name = "submissions", description = "Public share-link submissions and organizer listing"),
        (name = "scores", description = "Organizer-side scoring"),
        (name = "judges", description = "Judge invitations"),
        (name = "judging", description = "Public invite-link judging"),
        (name = "dashboard", description = "Organizer overview"),
        (name = "health", description = "Liveness"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

pub fn router(state: AppState, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let api = Router::new()
        .nest("/categories", categories::routes::routes(api_keys.clone()))
        .nest("/metrics", metrics::routes::routes(api_keys.clone()))
        .nest("/scores", scores::routes::routes(api_keys.clone()))
        .nest("/judges", judges::routes::routes(api_keys.clone()))
        .nest("/dashboard", dashboard::routes::routes(api_keys.clone()))
        .nest("/judge", judge_panel::routes::routes())
        .nest("/health", health::routes::routes())
        .merge(submissions::routes::routes(api_keys));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
