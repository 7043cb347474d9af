//! PostgreSQL `FooStore` backed by a sqlx connection pool.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

use super::errors::{StoreError, StoreResult};
use super::{Foo, FooStore};

/// Open a connection pool and check that it can serve a query.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<PgPool> {
    let options = PgConnectOptions::from_str(&config.url).map_err(StoreError::InvalidUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
        .map_err(StoreError::Connect)?;

    if let Err(e) = sqlx::query("SELECT 1").execute(&pool).await {
        pool.close().await;
        return Err(StoreError::Ping(e));
    }

    tracing::info!(max_connections = config.max_connections, "Database is connected");
    Ok(pool)
}

/// PostgreSQL foo store
#[derive(Debug, Clone)]
pub struct PgFooStore {
    pool: PgPool,
}

impl PgFooStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for shutdown and migrations
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FooStore for PgFooStore {
    async fn list(&self) -> StoreResult<Vec<Foo>> {
        sqlx::query_as::<_, Foo>("SELECT id, name FROM foos ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from_select)
    }

    async fn create(&self, name: &str) -> StoreResult<Foo> {
        sqlx::query_as::<_, Foo>("INSERT INTO foos (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::Insert)
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM foos")
            .execute(&self.pool)
            .await
            .map_err(StoreError::Delete)?;

        Ok(result.rows_affected())
    }

    async fn update_by_id(&self, id: i64, name: &str) -> StoreResult<Foo> {
        sqlx::query_as::<_, Foo>("UPDATE foos SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::Update)?
            .ok_or(StoreError::NotFound { id })
    }
}
