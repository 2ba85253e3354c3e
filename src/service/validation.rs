//! Request validation: required fields and column identifiers.

use crate::config::{EntityDef, Fields};
use crate::error::AppError;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create/update body for `entity`. Required fields must be present and truthy;
    /// for open entities every key must be a plain column identifier.
    pub fn validate(entity: &EntityDef, body: &Map<String, Value>) -> Result<(), AppError> {
        if entity.required_fields().any(|f| body.get(f).map_or(true, is_falsy)) {
            return Err(AppError::missing_required_fields());
        }
        if let Fields::Open = entity.fields {
            if let Some(bad) = body.keys().find(|k| !is_identifier(k)) {
                return Err(AppError::Validation(format!("invalid field name: {}", bad)));
            }
        }
        Ok(())
    }
}

/// null, false, 0, and "" do not satisfy a required field.
fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn is_identifier(s: &str) -> bool {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("identifier pattern"))
        .is_match(s)
}
