//! Read-only tables exposed as plain listings

use crate::db::{DbError, QueryExecutor, Row, Statement};

/// Tables with no mutating endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTable {
    Foods,
    Orders,
    Students,
    StudentReports,
}

impl CatalogTable {
    pub fn select_all(self) -> &'static str {
        match self {
            Self::Foods => "SELECT * FROM foods",
            Self::Orders => "SELECT * FROM orders",
            Self::Students => "SELECT * FROM student",
            Self::StudentReports => "SELECT * FROM studentreport",
        }
    }
}

/// Catalog repository
pub struct CatalogRepo<'a> {
    executor: &'a QueryExecutor,
}

impl<'a> CatalogRepo<'a> {
    pub fn new(executor: &'a QueryExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(&self, table: CatalogTable) -> Result<Vec<Row>, DbError> {
        self.executor.fetch_all(&Statement::new(table.select_all())).await
    }
}
