//! Values bound to statement placeholders.

use serde_json::{Map, Value};

/// A value bound to a PostgreSQL placeholder. Never interpolated into SQL text.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    /// Primary key, bound as BIGINT.
    Id(i64),
    /// Entity fields, bound as one JSONB document and expanded by `jsonb_populate_record`.
    Record(Map<String, Value>),
}

impl BindValue {
    pub fn as_id(&self) -> Option<i64> {
        match self {
            BindValue::Id(id) => Some(*id),
            BindValue::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Map<String, Value>> {
        match self {
            BindValue::Record(m) => Some(m),
            BindValue::Id(_) => None,
        }
    }
}
