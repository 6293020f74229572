use sqlx::PgPool;
use storage::{
    dto::dashboard::DashboardResponse, error::Result,
    repository::dashboard::DashboardRepository,
};

pub async fn get_dashboard(pool: &PgPool) -> Result<DashboardResponse> {
    DashboardRepository::new(pool).summary().await
}
