//! Schema documents and schema override fragments
//!
//! A [`SchemaNode`] is an ordered JSON object. Keys are kept in insertion
//! order, so rendered schemas read `type`, `format`, structural keys, then
//! `description`/`x-example`, the way they were built.

use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recognized schema keys
pub mod keys {
    pub const TYPE: &str = "type";
    pub const FORMAT: &str = "format";
    pub const PROPERTIES: &str = "properties";
    pub const ITEMS: &str = "items";
    pub const ADDITIONAL_PROPERTIES: &str = "additionalProperties";
    pub const ENUM: &str = "enum";
    pub const UNIQUE_ITEMS: &str = "uniqueItems";
    pub const DESCRIPTION: &str = "description";
    pub const EXAMPLE: &str = "x-example";
    pub const REF: &str = "$ref";
    pub const DEFINITIONS: &str = "definitions";
}

/// One node of a generated schema tree
///
/// A node is either a reference (`$ref` alone) or a full definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaNode(Map<String, Value>);

impl SchemaNode {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reference node pointing at `uri`
    pub fn reference(uri: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert(keys::REF.to_string(), Value::String(uri.into()));
        Self(map)
    }

    /// Whether this node is a `$ref`
    pub fn is_reference(&self) -> bool {
        self.0.contains_key(keys::REF)
    }

    /// The `$ref` target, if this node is a reference
    pub fn reference_uri(&self) -> Option<&str> {
        self.0.get(keys::REF).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a key, replacing (in place) any existing value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.0.get(keys::TYPE).and_then(Value::as_str)
    }

    pub fn format(&self) -> Option<&str> {
        self.0.get(keys::FORMAT).and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get(keys::DESCRIPTION).and_then(Value::as_str)
    }

    pub fn example(&self) -> Option<&Value> {
        self.0.get(keys::EXAMPLE)
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get(keys::PROPERTIES).and_then(Value::as_object)
    }

    pub fn items(&self) -> Option<&Value> {
        self.0.get(keys::ITEMS)
    }

    /// Copy every key of `fragment` into this node; fragment keys win
    pub fn merge(&mut self, fragment: &SchemaOverride) {
        for (key, value) in fragment.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        node.into_value()
    }
}

impl From<Map<String, Value>> for SchemaNode {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for SchemaNode {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(SchemaError::Serialization(format!(
                "schema node must be a JSON object, got {other}"
            ))),
        }
    }
}

/// Explicit schema keys attached to a type or a property
///
/// Fragments are merged verbatim over computed keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaOverride(Map<String, Value>);

impl SchemaOverride {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an override from a JSON object literal
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build an override from a JSON value, which must be an object
    pub fn from_value(value: Value) -> SchemaResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(SchemaError::InvalidConfig(format!(
                "schema override must be a JSON object, got {other}"
            ))),
        }
    }

    /// Add a key (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
