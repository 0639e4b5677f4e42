//! Record type for stored values.

use crate::error::Error;
use docgraph_proto::Value;

/// A stored record: an ordered list of named field values.
///
/// Records are encoded as JSON objects in the backend. Field order inside
/// a record is not significant; the assembler projects fields in schema
/// order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record from named fields.
    pub fn from_fields(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    /// Add a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Check whether a field is present.
    pub fn has(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    /// The record's integer key (`id` field), if present.
    pub fn key(&self) -> Option<i64> {
        self.get("id").and_then(Value::as_i64)
    }

    /// Iterate over the fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Serialize the record to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut map = serde_json::Map::with_capacity(self.fields.len());
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_json());
        }
        serde_json::to_vec(&map).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize a record from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))?;

        let mut fields = Vec::with_capacity(map.len());
        for (name, json) in map {
            let value = Value::from_json(&json).ok_or_else(|| {
                Error::Serialization(format!("unsupported value shape in field '{}'", name))
            })?;
            fields.push((name, value));
        }
        Ok(Self { fields })
    }
}
