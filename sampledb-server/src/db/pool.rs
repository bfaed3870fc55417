//! Database connection pool management
//!
//! Handlers never hold a raw driver pool. They go through [`ConnectionPool`],
//! which hands out boxed [`Connection`]s. Dropping the box returns the
//! connection to the pool, so every exit path releases it exactly once.

use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlArguments, MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::query::Query;

use super::error::DbError;
use super::row::{self, Row};
use super::statement::{Param, Statement};
use crate::config::DatabaseConfig;

/// A connection borrowed from a pool.
#[async_trait]
pub trait Connection: Send {
    /// Run a statement that returns rows.
    async fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<Row>, DbError>;

    /// Run a statement and return the affected-row count.
    async fn execute(&mut self, statement: &Statement) -> Result<u64, DbError>;
}

/// Released back to its pool when dropped.
pub type PooledConnection = Box<dyn Connection>;

/// Bounded set of reusable connections.
///
/// Implementations must make callers wait once the cap is reached rather
/// than fail immediately.
#[async_trait]
pub trait ConnectionPool: Send + Sync {
    async fn acquire(&self) -> Result<PooledConnection, DbError>;
}

/// MariaDB/MySQL pool backed by `sqlx`.
#[derive(Clone)]
pub struct MySqlConnectionPool {
    pool: MySqlPool,
}

impl MySqlConnectionPool {
    /// Build the pool without connecting.
    ///
    /// The first connection is opened on the first `acquire`, so the server
    /// can start while the database is still coming up.
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(options);

        tracing::debug!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_connections = config.max_connections,
            "database pool configured"
        );

        Self { pool }
    }

    /// Wrap an existing `sqlx` pool.
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Close all connections and reject further acquires.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ConnectionPool for MySqlConnectionPool {
    async fn acquire(&self) -> Result<PooledConnection, DbError> {
        let conn = self.pool.acquire().await.map_err(DbError::from_acquire)?;
        Ok(Box::new(MySqlConnection(conn)))
    }
}

struct MySqlConnection(PoolConnection<MySql>);

#[async_trait]
impl Connection for MySqlConnection {
    async fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<Row>, DbError> {
        let rows = bind_params(sqlx::query(statement.sql()), statement.params())
            .fetch_all(&mut *self.0)
            .await
            .map_err(DbError::Query)?;

        rows.iter().map(row::to_json).collect()
    }

    async fn execute(&mut self, statement: &Statement) -> Result<u64, DbError> {
        let result = bind_params(sqlx::query(statement.sql()), statement.params())
            .execute(&mut *self.0)
            .await
            .map_err(DbError::Query)?;

        Ok(result.rows_affected())
    }
}

fn bind_params<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    params: &'q [Param],
) -> Query<'q, MySql, MySqlArguments> {
    params.iter().fold(query, |query, param| match param {
        Param::Text(s) => query.bind(s.as_str()),
        Param::Bool(b) => query.bind(*b),
        Param::Null => query.bind(None::<&str>),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::executor::QueryExecutor;
    use std::sync::Arc;

    // Integration tests require a real database
    // Run with: SAMPLEDB_TEST_DATABASE_URL=mysql://... cargo test -p sampledb-server -- --ignored

    async fn test_pool(max_connections: u32) -> MySqlConnectionPool {
        let url = std::env::var("SAMPLEDB_TEST_DATABASE_URL")
            .expect("SAMPLEDB_TEST_DATABASE_URL required");
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(&url)
            .await
            .expect("pool creation failed");
        MySqlConnectionPool::from_pool(pool)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let pool = test_pool(5).await;
        let mut conn = pool.acquire().await.expect("acquire failed");

        let rows = conn
            .fetch_all(&Statement::new("SELECT 1 AS one"))
            .await
            .expect("query failed");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["one"], serde_json::json!(1));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_access_beyond_cap_waits() {
        let executor = QueryExecutor::new(Arc::new(test_pool(2).await));

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let executor = executor.clone();
                tokio::spawn(async move {
                    let stmt = Statement::new("SELECT CAST(? AS CHAR) AS v").bind(i.to_string());
                    executor.fetch_all(&stmt).await
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let rows = handle.await.expect("task panicked").expect("query failed");
            assert_eq!(rows[0]["v"], serde_json::json!(i.to_string()));
        }
    }
}
