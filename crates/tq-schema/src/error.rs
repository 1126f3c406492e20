//! Introspection error types.

use thiserror::Error;

/// Errors raised while deriving the metamodel from an API description document.
///
/// Apart from [`SchemaError::Parse`], these never abort a run: they are
/// recorded against the entity being derived and introspection moves on.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not valid JSON or not an object.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A path has no `get` operation, or the operation is malformed.
    #[error("no usable GET operation for path '{path}'")]
    MissingOperation { path: String },

    /// A path's operation has no `tags[0]` naming its resource.
    #[error("GET operation for path '{path}' has no resource tag")]
    MissingTag { path: String },

    /// Two list paths claim the same resource name.
    #[error("resource '{name}' already derived from another path (skipping '{path}')")]
    DuplicateResource { name: String, path: String },

    /// The `include` parameter description has no bulleted paragraph.
    #[error("include description for '{resource}' has no bulleted list")]
    MalformedIncludeDescription { resource: String },

    /// `definitions[<Name>Resource]` is absent.
    #[error("no definition '{name}' in API document")]
    MissingDefinition { name: String },

    /// A definition exists but does not have the expected shape.
    #[error("definition '{name}' is malformed: {reason}")]
    MalformedDefinition { name: String, reason: String },

    /// The naming heuristic produced a name no resource type carries.
    #[error("'{identifier}' does not name a resource type (tried '{candidate}')")]
    UnresolvedName {
        identifier: String,
        candidate: String,
    },
}
