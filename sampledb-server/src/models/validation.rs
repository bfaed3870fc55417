//! Validation error types

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Why a single rule rejected a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is absent, null, or empty after sanitization
    Empty { field: &'static str },

    /// Field was not received as a string
    NotString { field: &'static str },

    /// Field could not be coerced to a boolean
    NotBoolean { field: &'static str },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::NotString { field } | Self::NotBoolean { field } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::NotString { field } => write!(f, "{} must be a string", field),
            Self::NotBoolean { field } => write!(f, "{} must be a boolean", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// One entry of a 400 response body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub location: &'static str,
    pub message: String,
    /// Value after sanitization, `null` when absent
    pub value: Value,
    #[serde(skip)]
    pub kind: ValidationError,
}

impl FieldError {
    pub(crate) fn new(kind: ValidationError, message: Option<&'static str>, value: Value) -> Self {
        Self {
            field: kind.field(),
            location: "body",
            message: message.map_or_else(|| kind.to_string(), str::to_owned),
            value,
            kind,
        }
    }
}

/// Non-empty, ordered list of field failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self(errors))
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Names of the failing fields, in order, with repeats.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(kind: ValidationError) -> Self {
        Self(vec![FieldError::new(kind, None, Value::Null)])
    }
}
