//! Agent request model

use once_cell::sync::Lazy;

use super::rules::{Fields, RuleSet};
use super::validation::ValidationError;

/// Rules for the body of `PUT /addAgent`. Every field is a required string.
pub static NEW_AGENT_RULES: Lazy<RuleSet> = Lazy::new(|| {
    ["agentCode", "agentName", "workingArea", "commission", "phoneNo", "country"]
        .into_iter()
        .fold(RuleSet::new(), |rules, name| {
            rules.field(name, |f| f.trim().escape().not_empty().is_string())
        })
});

/// Agent row to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgent {
    pub code: String,
    pub name: String,
    pub working_area: String,
    pub commission: String,
    pub phone_no: String,
    pub country: String,
}

impl NewAgent {
    /// Build from fields that passed [`NEW_AGENT_RULES`].
    pub fn new(mut fields: Fields) -> Result<Self, ValidationError> {
        Ok(Self {
            code: fields.take_text("agentCode")?,
            name: fields.take_text("agentName")?,
            working_area: fields.take_text("workingArea")?,
            commission: fields.take_text("commission")?,
            phone_no: fields.take_text("phoneNo")?,
            country: fields.take_text("country")?,
        })
    }
}
