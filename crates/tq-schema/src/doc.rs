//! Model of the Swagger/OpenAPI description document.
//!
//! Only the top-level `paths` and `definitions` maps are parsed eagerly.
//! Operations and definitions are decoded on access so that one malformed
//! entry cannot fail the whole document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Path segment marking a single-item endpoint.
const ID_SEGMENT: &str = "{id}";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiDoc {
    #[serde(default)]
    paths: Map<String, Value>,
    #[serde(default)]
    definitions: Map<String, Value>,
}

/// The `get` operation of one path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Operation {
    /// Resource name carried by the first tag.
    #[must_use]
    pub fn resource_name(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl ApiDoc {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] if the text is not a JSON object with
    /// object-valued `paths`/`definitions`.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build a document from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] if the value has the wrong shape.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Every path in document order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Paths that list a collection (not ending in an id segment).
    pub fn list_paths(&self) -> impl Iterator<Item = &str> {
        self.paths().filter(|path| !path.ends_with(ID_SEGMENT))
    }

    #[must_use]
    pub fn has_path(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// Whether `<path>/{id}` exists next to a list path.
    #[must_use]
    pub fn has_single_item_path(&self, list_path: &str) -> bool {
        self.has_path(&format!("{list_path}/{ID_SEGMENT}"))
    }

    /// Decode the `get` operation of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingOperation`] if the path or its `get`
    /// operation is absent or cannot be decoded.
    pub fn operation(&self, path: &str) -> Result<Operation, SchemaError> {
        let missing = || SchemaError::MissingOperation {
            path: path.to_string(),
        };
        let get = self
            .paths
            .get(path)
            .and_then(|item| item.get("get"))
            .ok_or_else(missing)?;
        Operation::deserialize(get).map_err(|_| missing())
    }

    /// The `attributes.properties` schema map of `<resource>Resource`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingDefinition`] if the definition is absent,
    /// or [`SchemaError::MalformedDefinition`] if it has no attributes object.
    pub fn attribute_schemas(&self, resource: &str) -> Result<&Map<String, Value>, SchemaError> {
        let name = format!("{resource}Resource");
        let definition = self
            .definitions
            .get(&name)
            .ok_or_else(|| SchemaError::MissingDefinition { name: name.clone() })?;
        definition
            .pointer("/properties/attributes/properties")
            .and_then(Value::as_object)
            .ok_or(SchemaError::MalformedDefinition {
                name,
                reason: "no properties.attributes.properties object".into(),
            })
    }
}
