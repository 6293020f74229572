use sqlx::PgPool;
use storage::{
    dto::{
        category::SubmissionFormResponse,
        common::{PaginatedResponse, PaginationParams},
        submission::{CreateSubmissionRequest, SubmissionDetail, SubmissionListEntry},
    },
    error::{Result, StorageError},
    repository::{category::CategoryRepository, submission::SubmissionRepository},
    services::lifecycle,
};

/// Public form behind a share link. Categories that are not taking
/// submissions look the same as unknown links.
pub async fn get_submission_form(pool: &PgPool, share_token: &str) -> Result<SubmissionFormResponse> {
    let repo = CategoryRepository::new(pool);

    let category = repo.find_by_share_token(share_token).await?;
    if !lifecycle::accepts_submissions(category.status) {
        return Err(StorageError::NotFound);
    }

    let detail = repo.find_detailed(category.category_id).await?;

    Ok(SubmissionFormResponse {
        category_id: category.category_id,
        name: category.name,
        description: category.description,
        metrics: detail.metrics,
    })
}

pub async fn create_submission(pool: &PgPool, request: &CreateSubmissionRequest) -> Result<SubmissionDetail> {
    SubmissionRepository::new(pool).create(request).await
}

pub async fn list_submissions(
    pool: &PgPool,
    params: &PaginationParams,
) -> Result<PaginatedResponse<SubmissionListEntry>> {
    let (entries, total_items) = SubmissionRepository::new(pool).list(params).await?;

    Ok(PaginatedResponse::new(entries, params, total_items))
}
