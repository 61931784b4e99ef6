//! Schema-less instance of a host entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A record whose attributes are stored as loosely typed JSON values.
///
/// A field that was never written reads the same as an explicit null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    /// Name of the entity type this document belongs to
    pub entity: String,
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl Document {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity: entity.into(),
            values: Map::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field).filter(|v| !v.is_null())
    }

    pub fn is_null(&self, field: &str) -> bool {
        self.get(field).is_none()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    /// Write `Some` as a value and `None` as null
    pub fn set_optional<V: Into<Value>>(&mut self, field: impl Into<String>, value: Option<V>) {
        let value = value.map(Into::into).unwrap_or(Value::Null);
        self.values.insert(field.into(), value);
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    /// Timestamps are stored as RFC 3339 strings
    pub fn get_timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.get_str(field)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn set_timestamp(&mut self, field: impl Into<String>, value: Option<DateTime<Utc>>) {
        self.set_optional(field, value.map(|dt| dt.to_rfc3339()));
    }
}
