//! Request payload validators
//!
//! Payloads are checked field by field against the raw JSON so that every
//! failure can be reported against its field path:
//! - Required fields are present
//! - Field types match exactly, with no coercion
//! - Names are non-empty after trimming and at most 100 characters
//! - No undeclared fields exist (a client-echoed `id` is tolerated)
//!
//! All failures in a payload are collected before returning.

use serde_json::{Map, Value};

use super::errors::{messages, ValidationErrors, SCHEMA_KEY};

/// Longest accepted name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Body of `POST /toppings` and `PUT /toppings/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToppingPayload {
    /// Trimmed name
    pub name: String,
}

/// Body of `POST /pizzas` and `PUT /pizzas/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PizzaPayload {
    /// Trimmed name
    pub name: String,
    /// Referenced topping ids, in request order
    pub topping_ids: Vec<i64>,
}

impl ToppingPayload {
    const FIELDS: &'static [&'static str] = &["id", "name"];

    /// Validate a raw request body
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationErrors> {
        Self::from_value(&parse_json(body)?)
    }

    /// Validate a JSON document
    pub fn from_value(value: &Value) -> Result<Self, ValidationErrors> {
        let object = as_object(value)?;
        let mut errors = ValidationErrors::new();

        reject_unknown(object, Self::FIELDS, "", &mut errors);
        let name = validate_name(object, &mut errors);

        errors.into_result(Self {
            name: name.unwrap_or_default(),
        })
    }
}

impl PizzaPayload {
    const FIELDS: &'static [&'static str] = &["id", "name", "toppings"];
    const REFERENCE_FIELDS: &'static [&'static str] = &["topping_id"];

    /// Validate a raw request body
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationErrors> {
        Self::from_value(&parse_json(body)?)
    }

    /// Validate a JSON document. A missing `toppings` list means no toppings.
    pub fn from_value(value: &Value) -> Result<Self, ValidationErrors> {
        let object = as_object(value)?;
        let mut errors = ValidationErrors::new();

        reject_unknown(object, Self::FIELDS, "", &mut errors);
        let name = validate_name(object, &mut errors);
        let topping_ids = match object.get("toppings") {
            None => Vec::new(),
            Some(value) => validate_references(value, &mut errors),
        };

        errors.into_result(Self {
            name: name.unwrap_or_default(),
            topping_ids,
        })
    }
}

/// Parse a `{id}` path segment
pub fn parse_id(raw: &str) -> Result<i64, ValidationErrors> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationErrors::single("id", messages::NOT_INTEGER))
}

fn parse_json(body: &[u8]) -> Result<Value, ValidationErrors> {
    serde_json::from_slice(body)
        .map_err(|e| ValidationErrors::single(SCHEMA_KEY, format!("Invalid JSON: {}", e)))
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    value
        .as_object()
        .ok_or_else(|| ValidationErrors::single(SCHEMA_KEY, messages::INVALID_INPUT))
}

fn reject_unknown(
    object: &Map<String, Value>,
    allowed: &[&str],
    prefix: &str,
    errors: &mut ValidationErrors,
) {
    for key in object.keys() {
        if !allowed.contains(&key.as_str()) {
            errors.add(format!("{}{}", prefix, key), messages::UNKNOWN_FIELD);
        }
    }
}

fn validate_name(object: &Map<String, Value>, errors: &mut ValidationErrors) -> Option<String> {
    let value = match object.get("name") {
        None | Some(Value::Null) => {
            errors.add("name", messages::MISSING);
            return None;
        }
        Some(value) => value,
    };

    let Some(raw) = value.as_str() else {
        errors.add("name", messages::NOT_STRING);
        return None;
    };

    let name = raw.trim();
    if name.is_empty() {
        errors.add("name", messages::BLANK);
        return None;
    }
    if name.chars().count() > MAX_NAME_LEN {
        errors.add(
            "name",
            format!("Longer than maximum length {}.", MAX_NAME_LEN),
        );
        return None;
    }

    Some(name.to_string())
}

fn validate_references(value: &Value, errors: &mut ValidationErrors) -> Vec<i64> {
    let Some(items) = value.as_array() else {
        errors.add("toppings", messages::NOT_LIST);
        return Vec::new();
    };

    let mut ids = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let prefix = format!("toppings[{}]", index);

        let Some(reference) = item.as_object() else {
            errors.add(prefix, messages::INVALID_INPUT);
            continue;
        };

        reject_unknown(
            reference,
            PizzaPayload::REFERENCE_FIELDS,
            &format!("{}.", prefix),
            errors,
        );

        let field = format!("{}.topping_id", prefix);
        match reference.get("topping_id") {
            None | Some(Value::Null) => errors.add(field, messages::MISSING),
            Some(id) => match id.as_i64() {
                Some(id) => ids.push(id),
                None => errors.add(field, messages::NOT_INTEGER),
            },
        }
    }

    ids
}
