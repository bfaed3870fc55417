//! Request models with validation at construction
//!
//! Raw request fields pass through a [`RuleSet`] first. Typed models are only
//! built from the sanitized output, so handlers never see unescaped input.

pub mod agent;
pub mod customer;
pub mod rules;
pub mod validation;

pub use agent::{NewAgent, NEW_AGENT_RULES};
pub use customer::{CustomerCode, CustomerUpdate, BY_COUNTRY_RULES, UPDATE_RULES};
pub use rules::{escape_html, Check, FieldRules, FieldValue, Fields, RuleSet, Sanitizer};
pub use validation::{FieldError, ValidationError, ValidationErrors};
