use sqlx::PgPool;
use storage::{
    dto::metric::UpdateMetricRequest, error::Result, models::Metric,
    repository::metric::MetricRepository,
};
use uuid::Uuid;

pub async fn update_metric(pool: &PgPool, id: Uuid, request: &UpdateMetricRequest) -> Result<Metric> {
    MetricRepository::new(pool).update(id, request).await
}

pub async fn delete_metric(pool: &PgPool, id: Uuid) -> Result<()> {
    MetricRepository::new(pool).delete(id).await
}
