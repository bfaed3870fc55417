//! Read-only listings: foods, orders, students, student reports

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::{CatalogRepo, CatalogTable};
use crate::db::Row;
use crate::http::error::ApiError;
use crate::http::server::AppState;

async fn list(state: &AppState, table: CatalogTable) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = CatalogRepo::new(&state.executor).list(table).await?;
    Ok(Json(rows))
}

/// GET /getFoodList
async fn list_foods(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Row>>, ApiError> {
    list(&state, CatalogTable::Foods).await
}

/// GET /getOrders
async fn list_orders(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Row>>, ApiError> {
    list(&state, CatalogTable::Orders).await
}

/// GET /getStudents
async fn list_students(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Row>>, ApiError> {
    list(&state, CatalogTable::Students).await
}

/// GET /getStudentreport
async fn list_student_reports(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Row>>, ApiError> {
    list(&state, CatalogTable::StudentReports).await
}

/// Catalog routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/getFoodList", get(list_foods))
        .route("/getOrders", get(list_orders))
        .route("/getStudents", get(list_students))
        .route("/getStudentreport", get(list_student_reports))
}
