//! Query executor - one statement per call on a borrowed connection

use std::sync::Arc;

use super::error::DbError;
use super::pool::ConnectionPool;
use super::row::Row;
use super::statement::Statement;

/// Runs parameterized statements against a shared pool.
///
/// Each call acquires a connection, runs exactly one statement, and releases
/// the connection before returning, whether the statement succeeded or not.
/// Nothing is retried and errors are not classified beyond [`DbError`].
#[derive(Clone)]
pub struct QueryExecutor {
    pool: Arc<dyn ConnectionPool>,
}

impl QueryExecutor {
    pub fn new(pool: Arc<dyn ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Run a select and return its rows in database order.
    pub async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>, DbError> {
        debug_assert_eq!(statement.placeholder_count(), statement.params().len());
        let mut conn = self.pool.acquire().await?;
        let result = conn.fetch_all(statement).await;
        drop(conn);

        match &result {
            Ok(rows) => {
                tracing::debug!(sql = statement.sql(), rows = rows.len(), "select complete")
            }
            Err(e) => tracing::debug!(sql = statement.sql(), error = %e, "select failed"),
        }
        result
    }

    /// Run an insert, update, or delete and return the affected-row count.
    ///
    /// Zero affected rows is not an error; callers decide what it means.
    pub async fn execute(&self, statement: &Statement) -> Result<u64, DbError> {
        debug_assert_eq!(statement.placeholder_count(), statement.params().len());
        let mut conn = self.pool.acquire().await?;
        let result = conn.execute(statement).await;
        drop(conn);

        match &result {
            Ok(affected) => tracing::debug!(
                kind = ?statement.kind(),
                sql = statement.sql(),
                affected,
                "statement complete"
            ),
            Err(e) => tracing::debug!(
                kind = ?statement.kind(),
                sql = statement.sql(),
                error = %e,
                "statement failed"
            ),
        }
        result
    }
}
