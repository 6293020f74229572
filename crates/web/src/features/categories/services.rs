use sqlx::PgPool;
use storage::{
    dto::{
        category::{CategoryDetailResponse, CategorySummary, CreateCategoryRequest, UpdateCategoryRequest},
        judge::CategoryJudgeEntry,
        metric::UpdateWeightsRequest,
        results::CategoryResultsResponse,
        submission::SubmissionDetail,
    },
    error::Result,
    models::{Category, Metric},
    repository::{
        category::CategoryRepository, judge::JudgeRepository, metric::MetricRepository,
        submission::SubmissionRepository,
    },
    services::{
        lifecycle::{self, CategoryAction},
        scoring,
    },
};
use uuid::Uuid;

pub async fn list_categories(pool: &PgPool) -> Result<Vec<CategorySummary>> {
    CategoryRepository::new(pool).list().await
}

pub async fn get_category(pool: &PgPool, id: Uuid) -> Result<CategoryDetailResponse> {
    CategoryRepository::new(pool).find_detailed(id).await
}

pub async fn create_category(pool: &PgPool, request: &CreateCategoryRequest) -> Result<CategoryDetailResponse> {
    CategoryRepository::new(pool).create(request).await
}

pub async fn update_category(pool: &PgPool, id: Uuid, request: &UpdateCategoryRequest) -> Result<Category> {
    CategoryRepository::new(pool).update(id, request).await
}

pub async fn delete_category(pool: &PgPool, id: Uuid) -> Result<()> {
    CategoryRepository::new(pool).delete(id).await
}

/// Move a category through its lifecycle
pub async fn change_status(pool: &PgPool, id: Uuid, action: CategoryAction) -> Result<Category> {
    lifecycle::apply(pool, id, action).await
}

pub async fn update_weights(pool: &PgPool, id: Uuid, request: &UpdateWeightsRequest) -> Result<Vec<Metric>> {
    MetricRepository::new(pool).update_weights(id, request).await
}

pub async fn get_results(pool: &PgPool, id: Uuid) -> Result<CategoryResultsResponse> {
    scoring::category_results(pool, id).await
}

pub async fn list_submissions(pool: &PgPool, id: Uuid) -> Result<Vec<SubmissionDetail>> {
    SubmissionRepository::new(pool).list_for_category(id).await
}

pub async fn list_judges(pool: &PgPool, id: Uuid) -> Result<Vec<CategoryJudgeEntry>> {
    JudgeRepository::new(pool).list_for_category(id).await
}
