//! Database layer - connection pool, statements, and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default), injected, never global
//! - One parameterized statement per request, auto-committed
//! - Connections are released on drop, on every exit path
//! - No retries, no caching

pub mod error;
pub mod executor;
pub mod pool;
pub mod repos;
pub mod row;
pub mod statement;

pub use error::DbError;
pub use executor::QueryExecutor;
pub use pool::{Connection, ConnectionPool, MySqlConnectionPool, PooledConnection};
pub use row::Row;
pub use statement::{Param, Statement, StatementKind};
