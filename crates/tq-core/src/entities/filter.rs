use serde::{Deserialize, Serialize};

/// A `filter[<name>]` parameter accepted by one resource type's list endpoint.
///
/// Unique by `(for_resource, name)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterDefinition {
    pub id: i64,
    pub for_resource: i64,
    pub name: String,
    pub associated_resource: Option<i64>,
}

impl FilterDefinition {
    /// Wire-level parameter name, e.g. `filter[route]`.
    #[must_use]
    pub fn param_name(&self) -> String {
        format!("filter[{}]", self.name)
    }
}
