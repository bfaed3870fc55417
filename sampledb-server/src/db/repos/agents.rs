//! Agent repository - insert and list only

use crate::db::{DbError, QueryExecutor, Row, Statement};
use crate::models::NewAgent;

pub const SELECT_ALL: &str = "SELECT * FROM agents";
pub const INSERT: &str = "INSERT INTO agents (AGENT_CODE, AGENT_NAME, WORKING_AREA, COMMISSION, PHONE_NO, COUNTRY) VALUES (?, ?, ?, ?, ?, ?)";

/// Agent repository
pub struct AgentRepo<'a> {
    executor: &'a QueryExecutor,
}

impl<'a> AgentRepo<'a> {
    pub fn new(executor: &'a QueryExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(&self) -> Result<Vec<Row>, DbError> {
        self.executor.fetch_all(&Statement::new(SELECT_ALL)).await
    }

    /// Insert one agent. A duplicate code surfaces as a query error.
    pub async fn insert(&self, agent: &NewAgent) -> Result<(), DbError> {
        let stmt = Statement::new(INSERT)
            .bind(agent.code.as_str())
            .bind(agent.name.as_str())
            .bind(agent.working_area.as_str())
            .bind(agent.commission.as_str())
            .bind(agent.phone_no.as_str())
            .bind(agent.country.as_str());
        self.executor.execute(&stmt).await?;
        Ok(())
    }
}
