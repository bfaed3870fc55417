//! sampledb-server: HTTP endpoints over the `sample` database
//!
//! Every endpoint runs the same pipeline: sanitize and validate request
//! fields, borrow a pooled connection, run one parameterized statement,
//! release the connection, and map the outcome to a JSON response.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

use std::sync::Arc;

pub use config::{DatabaseConfig, ServerConfig};
pub use db::{ConnectionPool, DbError, MySqlConnectionPool, QueryExecutor};
pub use http::{build_router, ApiError, AppState, ServerError};

/// Build the pool, serve until shutdown, then close the pool.
pub async fn serve(database: DatabaseConfig, server: ServerConfig) -> Result<(), ServerError> {
    let pool = MySqlConnectionPool::new(&database);
    tracing::info!(
        database = %database.database,
        max_connections = database.max_connections,
        "starting sampledb server"
    );

    let result = http::run_server(Arc::new(pool.clone()), server).await;
    pool.close().await;
    result
}
