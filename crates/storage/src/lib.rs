pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::error::Result;

/// Explicitly owned handle on the connection pool.
///
/// Built once at start-up, cloned into request state, closed at shutdown.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool, e.g. one created with `connect_lazy`.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
