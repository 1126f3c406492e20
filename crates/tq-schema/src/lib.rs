//! # tq-schema
//!
//! Derives the transitq metamodel from the remote API's Swagger document.
//!
//! Derivation runs in four stages, each of which is skipped when the
//! metamodel already holds entities of its kind:
//!
//! 1. [`derive_resource_types`] from list paths
//! 2. [`derive_include_options`] from `include` parameter descriptions
//! 3. [`derive_filter_definitions`] from `filter[...]` parameters
//! 4. [`derive_attribute_definitions`] from `<Name>Resource` definitions
//!
//! Problems with a single entity are recorded in the
//! [`IntrospectionReport`] and never abort the run.

mod attributes;
pub mod doc;
mod error;
mod filters;
mod includes;
pub mod naming;
pub mod report;
mod resources;

pub use attributes::derive_attribute_definitions;
pub use doc::{ApiDoc, Operation, Parameter};
pub use error::SchemaError;
pub use filters::derive_filter_definitions;
pub use includes::derive_include_options;
pub use naming::NamingVocabulary;
pub use report::{EntityIssue, IntrospectionReport, Stage};
pub use resources::derive_resource_types;

use tq_core::Metamodel;

/// Run every derivation stage against `model`, in dependency order.
///
/// Resource types come first because the other stages resolve names
/// against them.
pub fn introspect(
    doc: &ApiDoc,
    model: &mut Metamodel,
    vocabulary: &NamingVocabulary,
) -> IntrospectionReport {
    let mut report = IntrospectionReport::default();

    derive_resource_types(doc, model, &mut report);
    derive_include_options(doc, model, vocabulary, &mut report);
    derive_filter_definitions(doc, model, vocabulary, &mut report);
    derive_attribute_definitions(doc, model, &mut report);

    tracing::info!(
        resource_types = report.created.resource_types,
        include_options = report.created.include_options,
        filters = report.created.filters,
        attributes = report.created.attributes,
        issues = report.issues.len(),
        unresolved = report.unresolved.len(),
        "introspection finished"
    );
    report
}
