//! Customer endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::{validate_body, MutationResponse};
use crate::db::repos::CustomerRepo;
use crate::db::Row;
use crate::http::error::ApiError;
use crate::http::extractors::{QueryParams, RawFields};
use crate::http::server::AppState;
use crate::models::{CustomerCode, CustomerUpdate, BY_COUNTRY_RULES, UPDATE_RULES};

const CODE_REQUIRED: &str = "Customer Code is required";

/// `?customerCode=` query string
#[derive(Debug, Deserialize)]
pub struct CustomerCodeParams {
    #[serde(rename = "customerCode")]
    pub customer_code: Option<String>,
}

impl CustomerCodeParams {
    fn require(&self) -> Result<CustomerCode, ApiError> {
        CustomerCode::from_query(self.customer_code.as_deref()).ok_or(ApiError::MissingParameter {
            message: CODE_REQUIRED,
        })
    }
}

/// GET /getCustomers
async fn list_customers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = CustomerRepo::new(&state.executor).list().await?;
    Ok(Json(rows))
}

/// POST /getCustomersByCountry - exact match on the sanitized country
async fn customers_by_country(
    State(state): State<Arc<AppState>>,
    RawFields(body): RawFields,
) -> Result<Json<Vec<Row>>, ApiError> {
    let fields = validate_body(&BY_COUNTRY_RULES, &body, "customers_by_country")?;
    let rows = CustomerRepo::new(&state.executor)
        .list_by_country(fields.text("country"))
        .await?;
    Ok(Json(rows))
}

/// DELETE /deleteCustomer?customerCode=
///
/// A code that matches nothing still answers 200, with `affectedRows: 0`.
#[instrument(skip(state))]
async fn delete_customer(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<CustomerCodeParams>,
) -> Result<Json<MutationResponse>, ApiError> {
    let code = params.require()?;
    let affected = CustomerRepo::new(&state.executor).delete(&code).await?;

    tracing::info!(customer_code = code.as_str(), affected, "customer deleted");
    Ok(Json(MutationResponse::with_affected(
        "Customer deleted successfully",
        affected,
    )))
}

/// PATCH /updateCustomer?customerCode=
///
/// Body rules are checked before the query parameter.
#[instrument(skip(state, body))]
async fn update_customer(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<CustomerCodeParams>,
    RawFields(body): RawFields,
) -> Result<Json<MutationResponse>, ApiError> {
    let fields = validate_body(&UPDATE_RULES, &body, "update_customer")?;
    let code = params.require()?;
    let update = CustomerUpdate::new(code, fields)?;

    let affected = CustomerRepo::new(&state.executor).update(&update).await?;

    tracing::info!(customer_code = update.code.as_str(), affected, "customer updated");
    Ok(Json(MutationResponse::with_affected(
        "Customer updated successfully",
        affected,
    )))
}

/// Customer routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/getCustomers", get(list_customers))
        .route("/getCustomersByCountry", post(customers_by_country))
        .route("/deleteCustomer", delete(delete_customer))
        .route("/updateCustomer", patch(update_customer))
}
