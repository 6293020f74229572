use sqlx::PgPool;

use crate::dto::dashboard::DashboardResponse;
use crate::error::Result;
use crate::repository::category::CategoryRepository;
use crate::repository::submission::SubmissionRepository;
use crate::repository::user::UserRepository;

const RECENT_CATEGORIES: i64 = 5;

pub struct DashboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self) -> Result<DashboardResponse> {
        let categories = CategoryRepository::new(self.pool);

        Ok(DashboardResponse {
            category_count: categories.count().await?,
            submission_count: SubmissionRepository::new(self.pool).count().await?,
            judge_count: UserRepository::new(self.pool).count_judges().await?,
            recent_categories: categories.recent(RECENT_CATEGORIES).await?,
        })
    }
}
