//! Customer repository
//!
//! Updates and deletes target exactly the rows matching `CUST_CODE`.
//! Existence is not checked first; the affected-row count tells the caller
//! whether anything matched.

use crate::db::{DbError, QueryExecutor, Row, Statement};
use crate::models::{CustomerCode, CustomerUpdate};

pub const SELECT_ALL: &str = "SELECT * FROM customer";
pub const SELECT_BY_COUNTRY: &str = "SELECT * FROM customer WHERE CUST_COUNTRY=?";
pub const DELETE_BY_CODE: &str = "DELETE FROM customer WHERE CUST_CODE=?";
pub const UPDATE_BY_CODE: &str =
    "UPDATE customer SET CUST_NAME=?, CUST_CITY=?, CUST_COUNTRY=? WHERE CUST_CODE=?";

/// Customer repository
pub struct CustomerRepo<'a> {
    executor: &'a QueryExecutor,
}

impl<'a> CustomerRepo<'a> {
    pub fn new(executor: &'a QueryExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(&self) -> Result<Vec<Row>, DbError> {
        self.executor.fetch_all(&Statement::new(SELECT_ALL)).await
    }

    /// Customers whose country equals `country` exactly.
    ///
    /// `None` binds SQL NULL, which matches nothing.
    pub async fn list_by_country(&self, country: Option<&str>) -> Result<Vec<Row>, DbError> {
        let stmt = Statement::new(SELECT_BY_COUNTRY).bind(country);
        self.executor.fetch_all(&stmt).await
    }

    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, code: &CustomerCode) -> Result<u64, DbError> {
        let stmt = Statement::new(DELETE_BY_CODE).bind(code.as_str());
        self.executor.execute(&stmt).await
    }

    /// Returns the number of rows updated.
    pub async fn update(&self, update: &CustomerUpdate) -> Result<u64, DbError> {
        let stmt = Statement::new(UPDATE_BY_CODE)
            .bind(update.name.as_str())
            .bind(update.city.as_str())
            .bind(update.country.as_str())
            .bind(update.code.as_str());
        self.executor.execute(&stmt).await
    }
}
