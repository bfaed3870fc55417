//! In-memory spy pool for driving the router without a database
//!
//! Interprets exactly the statements the repositories issue, records every
//! statement it runs, and counts acquires and releases.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use sampledb_server::db::repos::{agents, customers, CatalogTable};
use sampledb_server::db::{Connection, ConnectionPool, DbError, PooledConnection, Row, Statement};
use sampledb_server::{build_router, AppState, ServerConfig};
use serde_json::{json, Value};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tower::ServiceExt;

#[derive(Default)]
pub struct SpyState {
    tables: Mutex<HashMap<&'static str, Vec<Row>>>,
    executed: Mutex<Vec<Statement>>,
    pub acquired: AtomicUsize,
    pub released: AtomicUsize,
    in_use: AtomicUsize,
    pub max_in_use: AtomicUsize,
    fail_queries: AtomicBool,
}

#[derive(Clone)]
pub struct SpyPool {
    pub state: Arc<SpyState>,
    permits: Arc<Semaphore>,
    delay: Duration,
}

impl SpyPool {
    pub fn new(max_connections: usize) -> Self {
        let state = SpyState::default();
        {
            let mut tables = state.tables.lock().unwrap();
            tables.insert("customer", seed_customers());
            tables.insert("agents", vec![agent_row("A001", "Subbarao", "Bangalore")]);
            tables.insert("foods", vec![row(json!({ "ITEM_ID": 1, "ITEM_NAME": "Chex Mix" }))]);
            tables.insert(
                "orders",
                vec![row(json!({ "ORD_NUM": 200100, "ORD_AMOUNT": "1000.00" }))],
            );
            tables.insert("student", vec![row(json!({ "NAME": "Alice", "CLASS": "V" }))]);
            tables.insert("studentreport", vec![row(json!({ "ROLLID": 1, "GRADE": "A" }))]);
        }

        Self {
            state: Arc::new(state),
            permits: Arc::new(Semaphore::new(max_connections)),
            delay: Duration::ZERO,
        }
    }

    /// Hold each connection for `delay` so concurrent requests overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fail_queries(&self) {
        self.state.fail_queries.store(true, Ordering::SeqCst);
    }

    pub fn executed(&self) -> Vec<Statement> {
        self.state.executed.lock().unwrap().clone()
    }

    pub fn table(&self, name: &str) -> Vec<Row> {
        self.state.tables.lock().unwrap().get(name).cloned().unwrap_or_default()
    }

    pub fn acquired(&self) -> usize {
        self.state.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.state.released.load(Ordering::SeqCst)
    }

    pub fn router(&self) -> Router {
        build_router(AppState::new(Arc::new(self.clone())), &ServerConfig::default())
    }
}

#[async_trait]
impl ConnectionPool for SpyPool {
    async fn acquire(&self) -> Result<PooledConnection, DbError> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| DbError::PoolExhausted)?;

        self.state.acquired.fetch_add(1, Ordering::SeqCst);
        let now = self.state.in_use.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_use.fetch_max(now, Ordering::SeqCst);

        Ok(Box::new(SpyConnection {
            state: self.state.clone(),
            delay: self.delay,
            _permit: permit,
        }))
    }
}

struct SpyConnection {
    state: Arc<SpyState>,
    delay: Duration,
    _permit: OwnedSemaphorePermit,
}

impl Drop for SpyConnection {
    fn drop(&mut self) {
        self.state.in_use.fetch_sub(1, Ordering::SeqCst);
        self.state.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl SpyConnection {
    async fn record(&self, statement: &Statement) -> Result<(), DbError> {
        self.state.executed.lock().unwrap().push(statement.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.state.fail_queries.load(Ordering::SeqCst) {
            return Err(query_error("simulated failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl Connection for SpyConnection {
    async fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<Row>, DbError> {
        self.record(statement).await?;
        let tables = self.state.tables.lock().unwrap();
        let sql = statement.sql();

        if sql == customers::SELECT_BY_COUNTRY {
            let country = statement.params()[0].as_text();
            return Ok(tables["customer"]
                .iter()
                .filter(|r| country.is_some() && r["CUST_COUNTRY"].as_str() == country)
                .cloned()
                .collect());
        }

        let table = match sql {
            s if s == customers::SELECT_ALL => "customer",
            s if s == agents::SELECT_ALL => "agents",
            s if s == CatalogTable::Foods.select_all() => "foods",
            s if s == CatalogTable::Orders.select_all() => "orders",
            s if s == CatalogTable::Students.select_all() => "student",
            s if s == CatalogTable::StudentReports.select_all() => "studentreport",
            other => return Err(query_error(&format!("unexpected select: {other}"))),
        };
        Ok(tables[table].clone())
    }

    async fn execute(&mut self, statement: &Statement) -> Result<u64, DbError> {
        self.record(statement).await?;
        let mut tables = self.state.tables.lock().unwrap();
        let params: Vec<&str> = statement
            .params()
            .iter()
            .map(|p| p.as_text().unwrap_or_default())
            .collect();

        match statement.sql() {
            s if s == customers::DELETE_BY_CODE => {
                let rows = tables.get_mut("customer").unwrap();
                let before = rows.len();
                rows.retain(|r| r["CUST_CODE"] != params[0]);
                Ok((before - rows.len()) as u64)
            }
            s if s == customers::UPDATE_BY_CODE => {
                let mut affected = 0;
                for r in tables.get_mut("customer").unwrap() {
                    if r["CUST_CODE"] == params[3] {
                        r.insert("CUST_NAME".into(), json!(params[0]));
                        r.insert("CUST_CITY".into(), json!(params[1]));
                        r.insert("CUST_COUNTRY".into(), json!(params[2]));
                        affected += 1;
                    }
                }
                Ok(affected)
            }
            s if s == agents::INSERT => {
                let rows = tables.get_mut("agents").unwrap();
                if rows.iter().any(|r| r["AGENT_CODE"] == params[0]) {
                    return Err(query_error("Duplicate entry for key 'PRIMARY'"));
                }
                rows.push(row(json!({
                    "AGENT_CODE": params[0],
                    "AGENT_NAME": params[1],
                    "WORKING_AREA": params[2],
                    "COMMISSION": params[3],
                    "PHONE_NO": params[4],
                    "COUNTRY": params[5],
                })));
                Ok(1)
            }
            other => Err(query_error(&format!("unexpected statement: {other}"))),
        }
    }
}

fn query_error(message: &str) -> DbError {
    DbError::Query(sqlx::Error::Protocol(message.to_owned()))
}

fn row(value: Value) -> Row {
    value.as_object().cloned().unwrap()
}

fn customer_row(code: &str, name: &str, city: &str, country: &str) -> Row {
    row(json!({
        "CUST_CODE": code,
        "CUST_NAME": name,
        "CUST_CITY": city,
        "WORKING_AREA": city,
        "CUST_COUNTRY": country,
        "GRADE": 2,
        "AGENT_CODE": "A001",
    }))
}

fn agent_row(code: &str, name: &str, area: &str) -> Row {
    row(json!({
        "AGENT_CODE": code,
        "AGENT_NAME": name,
        "WORKING_AREA": area,
        "COMMISSION": "0.11",
        "PHONE_NO": "077-12346674",
        "COUNTRY": "India",
    }))
}

fn seed_customers() -> Vec<Row> {
    vec![
        customer_row("C00001", "Micheal", "New York", "USA"),
        customer_row("C00002", "Bolt", "New York", "USA"),
        customer_row("C00003", "Martin", "Torento", "Canada"),
        customer_row("C00004", "Winston", "Brisban", "Australia"),
    ]
}

/// Send one request and decode the JSON response body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
