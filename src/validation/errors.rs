//! Field-level validation errors

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Messages used by the validators
pub mod messages {
    pub const MISSING: &str = "Missing data for required field.";
    pub const NOT_STRING: &str = "Not a valid string.";
    pub const NOT_INTEGER: &str = "Not a valid integer.";
    pub const NOT_LIST: &str = "Not a valid list.";
    pub const INVALID_INPUT: &str = "Invalid input type.";
    pub const UNKNOWN_FIELD: &str = "Unknown field.";
    pub const BLANK: &str = "Must not be blank.";
}

/// Key used for errors that concern the payload as a whole
pub const SCHEMA_KEY: &str = "_schema";

/// Validation failures keyed by field path, e.g. `toppings[1].topping_id`.
///
/// Keys are kept sorted so responses are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors with a single message on one field
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Field paths with at least one message
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
