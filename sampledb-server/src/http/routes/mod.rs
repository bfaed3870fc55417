//! Route handlers organized by resource

pub mod agents;
pub mod catalog;
pub mod customers;
pub mod health;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::error::ApiError;
use crate::models::{Fields, RuleSet};

/// Body of a successful insert, update, or delete
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_rows: Option<u64>,
}

impl MutationResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            affected_rows: None,
        }
    }

    pub fn with_affected(message: &'static str, affected_rows: u64) -> Self {
        Self {
            message,
            affected_rows: Some(affected_rows),
        }
    }
}

/// Run `rules` over a request body, logging rejections.
pub(crate) fn validate_body(
    rules: &RuleSet,
    body: &Map<String, Value>,
    operation: &'static str,
) -> Result<Fields, ApiError> {
    rules.validate(body).map_err(|errors| {
        tracing::debug!(operation, fields = ?errors.fields(), "request rejected");
        ApiError::Validation(errors)
    })
}
