use serde::{Deserialize, Serialize};

/// Resource types whose list endpoint rejects requests without a filter.
pub const FILTER_REQUIRED_RESOURCES: &[&str] = &[
    "LiveFacility",
    "Prediction",
    "Schedule",
    "Service",
    "Shape",
    "Trip",
];

/// A named entity exposed by the remote API (e.g. `Stop`, `Route`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceType {
    pub id: i64,
    /// List endpoint path, e.g. `/stops`.
    pub path: String,
    pub name: String,
    pub description: String,
    /// Whether a sibling `<path>/{id}` single-item endpoint exists.
    pub can_specify_id: bool,
    pub requires_filters: bool,
}

impl ResourceType {
    /// Whether listing `name` requires at least one filter.
    #[must_use]
    pub fn name_requires_filters(name: &str) -> bool {
        FILTER_REQUIRED_RESOURCES.contains(&name)
    }

    /// Lowercased name used in `fields[...]` parameters.
    #[must_use]
    pub fn fieldset_key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_requirement_is_a_fixed_list() {
        assert!(ResourceType::name_requires_filters("Trip"));
        assert!(ResourceType::name_requires_filters("LiveFacility"));
        assert!(!ResourceType::name_requires_filters("Stop"));
        assert!(!ResourceType::name_requires_filters("trip"));
    }

    #[test]
    fn fieldset_key_is_lowercase_name() {
        let rt = ResourceType {
            id: 1,
            path: "/route_patterns".into(),
            name: "RoutePattern".into(),
            description: String::new(),
            can_specify_id: true,
            requires_filters: false,
        };
        assert_eq!(rt.fieldset_key(), "routepattern");
    }
}
