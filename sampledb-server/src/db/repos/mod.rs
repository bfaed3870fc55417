//! Repository implementations for database access
//!
//! Each repository borrows the shared [`QueryExecutor`](crate::db::QueryExecutor)
//! and issues one parameterized statement per method.

pub mod agents;
pub mod catalog;
pub mod customers;

pub use agents::AgentRepo;
pub use catalog::{CatalogRepo, CatalogTable};
pub use customers::CustomerRepo;
