use serde::{Deserialize, Serialize};

/// One field of a resource type's `attributes` payload.
///
/// Absent schema keys are stored as empty strings (or `None` for `minimum`)
/// so the row shape is fixed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeDefinition {
    pub id: i64,
    pub for_resource: i64,
    pub name: String,
    pub description: String,
    pub required: bool,
    pub data_type: String,
    pub default: String,
    pub example: String,
    pub minimum: Option<i64>,
    /// JSON-serialized `enum` list, or empty.
    pub choices: String,
    pub data_format: String,
}

impl AttributeDefinition {
    /// Decode the serialized allowed-choices list.
    ///
    /// Returns an empty list when no choices were declared or the stored
    /// text is not a JSON array.
    #[must_use]
    pub fn choices(&self) -> Vec<serde_json::Value> {
        if self.choices.is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<serde_json::Value>(&self.choices) {
            Ok(serde_json::Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }

    /// Serialize a choices list into the stored representation.
    #[must_use]
    pub fn encode_choices(choices: &[serde_json::Value]) -> String {
        serde_json::Value::Array(choices.to_vec()).to_string()
    }
}
