use serde::{Deserialize, Serialize};

/// A name that can be side-loaded through the API's `include` parameter.
///
/// Unique by name. `included_by` lists the resource types whose list endpoint
/// advertises this include, in discovery order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncludeOption {
    pub id: i64,
    pub name: String,
    /// Resource type the include resolves to, if the naming heuristic found one.
    pub associated_resource: Option<i64>,
    pub included_by: Vec<i64>,
}

impl IncludeOption {
    #[must_use]
    pub fn is_included_by(&self, resource_type_id: i64) -> bool {
        self.included_by.contains(&resource_type_id)
    }
}
