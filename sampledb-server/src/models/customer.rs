//! Customer request models and their rule sets

use once_cell::sync::Lazy;

use super::rules::{Fields, RuleSet};
use super::validation::ValidationError;

/// Rules for `POST /getCustomersByCountry`: sanitize only, nothing is required.
pub static BY_COUNTRY_RULES: Lazy<RuleSet> =
    Lazy::new(|| RuleSet::new().field("country", |f| f.trim().escape()));

/// Rules for the body of `PATCH /updateCustomer`
pub static UPDATE_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new()
        .field("customerName", |f| {
            f.trim().escape().not_empty().with_message("Customer name is required")
        })
        .field("customerCity", |f| {
            f.trim().escape().not_empty().with_message("Customer city is required")
        })
        .field("customerCountry", |f| {
            f.trim().escape().not_empty().with_message("Customer country is required")
        })
});

/// Business key of a customer row (`CUST_CODE`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomerCode(String);

impl CustomerCode {
    /// Trim a raw query value; blank or absent means there is no code.
    pub fn from_query(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// New values for one customer, keyed by its code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub code: CustomerCode,
    pub name: String,
    pub city: String,
    pub country: String,
}

impl CustomerUpdate {
    /// Build from fields that passed [`UPDATE_RULES`].
    pub fn new(code: CustomerCode, mut fields: Fields) -> Result<Self, ValidationError> {
        Ok(Self {
            code,
            name: fields.take_text("customerName")?,
            city: fields.take_text("customerCity")?,
            country: fields.take_text("customerCountry")?,
        })
    }
}
