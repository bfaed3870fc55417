//! Declarative sanitize-then-validate rules for request fields
//!
//! A [`RuleSet`] names the fields an endpoint reads. Each field owns an
//! ordered list of sanitizers and an ordered list of checks. Sanitizers
//! always run before checks, whatever order the builder calls came in.
//!
//! ```
//! use sampledb_server::models::RuleSet;
//! use serde_json::json;
//!
//! let rules = RuleSet::new().field("name", |f| f.trim().escape().not_empty());
//! let body = json!({ "name": "  <b>  " });
//! let fields = rules.validate(body.as_object().unwrap()).unwrap();
//! assert_eq!(fields.text("name"), Some("&lt;b&gt;"));
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::validation::{FieldError, ValidationError, ValidationErrors};

/// Transformation applied before any check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    /// Strip leading and trailing whitespace
    Trim,
    /// Replace HTML-sensitive characters with entities
    Escape,
}

/// Rule that can reject a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    NotEmpty,
    /// The sanitized value is text
    IsString,
    /// Coerce to a boolean, rejecting anything not recognizably true/false
    ToBoolean,
}

/// Sanitized value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            other => Some(Self::Text(other.to_string())),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
        }
    }

    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Rules for one field
#[derive(Debug, Clone)]
pub struct FieldRules {
    name: &'static str,
    sanitizers: Vec<Sanitizer>,
    checks: Vec<(Check, Option<&'static str>)>,
}

impl FieldRules {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            sanitizers: Vec::new(),
            checks: Vec::new(),
        }
    }

    pub fn trim(mut self) -> Self {
        self.sanitizers.push(Sanitizer::Trim);
        self
    }

    pub fn escape(mut self) -> Self {
        self.sanitizers.push(Sanitizer::Escape);
        self
    }

    pub fn not_empty(mut self) -> Self {
        self.checks.push((Check::NotEmpty, None));
        self
    }

    pub fn is_string(mut self) -> Self {
        self.checks.push((Check::IsString, None));
        self
    }

    pub fn to_boolean(mut self) -> Self {
        self.checks.push((Check::ToBoolean, None));
        self
    }

    /// Replace the message reported by the most recently added check.
    pub fn with_message(mut self, message: &'static str) -> Self {
        if let Some((_, slot)) = self.checks.last_mut() {
            *slot = Some(message);
        }
        self
    }

    fn apply(&self, raw: Option<&Value>, errors: &mut Vec<FieldError>) -> Option<FieldValue> {
        // Sanitizers stringify whatever they touch; untouched numbers stay non-text.
        let mut textual = matches!(raw, Some(Value::String(_)));
        let mut value = raw.and_then(FieldValue::from_json);
        if !self.sanitizers.is_empty() {
            textual |= value.is_some();
        }

        for sanitizer in &self.sanitizers {
            value = value.map(|v| {
                let text = v.into_text();
                FieldValue::Text(match sanitizer {
                    Sanitizer::Trim => text.trim().to_owned(),
                    Sanitizer::Escape => escape_html(&text),
                })
            });
        }

        for (check, message) in &self.checks {
            let failure = match check {
                Check::NotEmpty => match &value {
                    None => Some(ValidationError::Empty { field: self.name }),
                    Some(FieldValue::Text(s)) if s.is_empty() => {
                        Some(ValidationError::Empty { field: self.name })
                    }
                    Some(_) => None,
                },
                Check::IsString => match &value {
                    Some(FieldValue::Text(_)) if textual => None,
                    _ => Some(ValidationError::NotString { field: self.name }),
                },
                Check::ToBoolean => match value.as_ref().and_then(coerce_bool) {
                    Some(b) => {
                        value = Some(FieldValue::Bool(b));
                        None
                    }
                    None => Some(ValidationError::NotBoolean { field: self.name }),
                },
            };

            if let Some(kind) = failure {
                let shown = value.as_ref().map_or(Value::Null, FieldValue::to_json);
                errors.push(FieldError::new(kind, *message, shown));
            }
        }

        value
    }
}

/// Ordered rules for every field an endpoint reads
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(
        mut self,
        name: &'static str,
        build: impl FnOnce(FieldRules) -> FieldRules,
    ) -> Self {
        self.fields.push(build(FieldRules::new(name)));
        self
    }

    /// Sanitize and validate `input`.
    ///
    /// Fields without rules are dropped. Pure: never touches the database.
    pub fn validate(&self, input: &Map<String, Value>) -> Result<Fields, ValidationErrors> {
        let mut errors = Vec::new();
        let mut values = HashMap::with_capacity(self.fields.len());

        for rules in &self.fields {
            if let Some(value) = rules.apply(input.get(rules.name), &mut errors) {
                values.insert(rules.name, value);
            }
        }

        match ValidationErrors::new(errors) {
            Some(errors) => Err(errors),
            None => Ok(Fields(values)),
        }
    }
}

/// Sanitized field values that passed every check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(HashMap<&'static str, FieldValue>);

impl Fields {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(FieldValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Remove a text field, failing as empty if it is not there.
    pub fn take_text(&mut self, name: &'static str) -> Result<String, ValidationError> {
        match self.0.remove(name) {
            Some(FieldValue::Text(s)) => Ok(s),
            _ => Err(ValidationError::Empty { field: name }),
        }
    }
}

/// Replace characters that are unsafe in HTML with their entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            c => out.push(c),
        }
    }
    out
}

fn coerce_bool(value: &FieldValue) -> Option<bool> {
    match value {
        FieldValue::Bool(b) => Some(*b),
        FieldValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
    }
}
