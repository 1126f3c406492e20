//! Outcome of an introspection run.

use serde::Serialize;
use tq_core::metamodel::MetamodelCounts;

/// Derivation stages, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ResourceTypes,
    IncludeOptions,
    FilterDefinitions,
    AttributeDefinitions,
}

/// A problem confined to one entity. The rest of the run carried on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityIssue {
    pub stage: Stage,
    /// Path or resource type name the issue belongs to.
    pub entity: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntrospectionReport {
    /// Entities created by this run.
    pub created: MetamodelCounts,
    /// Stages that did nothing because rows of that kind already existed.
    pub skipped_stages: Vec<Stage>,
    pub issues: Vec<EntityIssue>,
    /// Include/filter identifiers left without an associated resource type.
    pub unresolved: Vec<String>,
}

impl IntrospectionReport {
    /// True when every stage was skipped.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created == MetamodelCounts::default() && self.skipped_stages.len() == 4
    }

    pub(crate) fn issue(&mut self, stage: Stage, entity: &str, error: &crate::SchemaError) {
        tracing::warn!(?stage, entity, %error, "introspection issue");
        self.issues.push(EntityIssue {
            stage,
            entity: entity.to_string(),
            message: error.to_string(),
        });
    }

    pub(crate) fn skip(&mut self, stage: Stage) {
        tracing::debug!(?stage, "rows already present; skipping stage");
        self.skipped_stages.push(stage);
    }

    pub(crate) fn unresolved(&mut self, identifier: &str) {
        if !self.unresolved.iter().any(|u| u == identifier) {
            self.unresolved.push(identifier.to_string());
        }
    }
}
