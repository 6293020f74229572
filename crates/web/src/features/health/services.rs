use sqlx::PgPool;
use storage::error::Result;

pub async fn database_reachable(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
