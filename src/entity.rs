//! Entity model
//!
//! An entity is an opaque record owned by the remote store, identified
//! uniquely by its `(partition_key, row_key)` pair. Beyond the two key
//! attributes the payload is an arbitrary JSON property bag that the
//! access layer never inspects.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single record in a partition/row-keyed table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Partition key (first half of the unique identity)
    pub partition_key: String,

    /// Row key (second half of the unique identity)
    pub row_key: String,

    /// Store-assigned entity tag for optimistic concurrency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Store-assigned last-modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Opaque property bag
    #[serde(flatten)]
    pub properties: JsonObject,
}

impl Entity {
    /// Create a new entity with the given keys and no properties
    pub fn new(partition_key: impl Into<String>, row_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            row_key: row_key.into(),
            etag: None,
            timestamp: None,
            properties: JsonObject::new(),
        }
    }

    /// Add a property
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get a property by name
    pub fn property(&self, key: &str) -> Option<&JsonValue> {
        self.properties.get(key)
    }

    /// Validate that both key attributes are present
    pub fn validate_keys(&self) -> Result<()> {
        validate_key_pair(&self.partition_key, &self.row_key)
    }
}

/// Validate a `(partition_key, row_key)` pair before any network activity
pub fn validate_key_pair(partition_key: &str, row_key: &str) -> Result<()> {
    if partition_key.is_empty() {
        return Err(Error::validation("partition key must not be empty"));
    }
    if row_key.is_empty() {
        return Err(Error::validation("row key must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_entity_builder() {
        let entity = Entity::new("orders", "0001")
            .with_property("amount", 42)
            .with_property("status", "shipped");

        assert_eq!(entity.partition_key, "orders");
        assert_eq!(entity.row_key, "0001");
        assert_eq!(entity.property("amount"), Some(&json!(42)));
        assert_eq!(entity.property("status"), Some(&json!("shipped")));
        assert_eq!(entity.property("missing"), None);
    }

    #[test]
    fn test_entity_wire_format() {
        let entity = Entity::new("p", "r").with_property("name", "alice");
        let wire = serde_json::to_value(&entity).unwrap();

        assert_eq!(
            wire,
            json!({"partitionKey": "p", "rowKey": "r", "name": "alice"})
        );

        let parsed: Entity = serde_json::from_value(wire).unwrap();
        assert_eq!(parsed, entity);
    }

    #[test]
    fn test_entity_roundtrip_with_metadata() {
        let wire = json!({
            "partitionKey": "p",
            "rowKey": "r",
            "etag": "W/\"7\"",
            "timestamp": "2026-01-05T12:00:00Z",
            "count": 3
        });

        let parsed: Entity = serde_json::from_value(wire).unwrap();
        assert_eq!(parsed.etag.as_deref(), Some("W/\"7\""));
        assert!(parsed.timestamp.is_some());
        assert_eq!(parsed.property("count"), Some(&json!(3)));
    }

    #[test]
    fn test_validate_key_pair() {
        assert!(validate_key_pair("p", "r").is_ok());
        assert!(validate_key_pair("", "r").unwrap_err().is_validation());
        assert!(validate_key_pair("p", "").unwrap_err().is_validation());
        assert!(Entity::new("", "r").validate_keys().is_err());
    }
}
