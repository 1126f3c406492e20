//! Query building error types.

use thiserror::Error;
use tq_core::CoreError;

#[derive(Debug, Error)]
pub enum QueryError {
    /// A selection references an id the metamodel does not hold.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("resource type '{resource}' has no include option '{include}'")]
    UnknownInclude { resource: String, include: String },

    #[error("resource type '{resource}' has no attribute '{attribute}'")]
    UnknownAttribute { resource: String, attribute: String },

    #[error("resource type '{resource}' has no filter '{filter}'")]
    UnknownFilter { resource: String, filter: String },

    /// The attribute's resource type is neither the primary nor an included one.
    #[error("attribute '{spec}' belongs to '{resource}', which the query does not touch")]
    UntouchedResource { spec: String, resource: String },

    #[error("listing '{resource}' requires at least one filter")]
    FiltersRequired { resource: String },

    #[error("invalid filter '{spec}': expected <name>=<value>[,<value>...]")]
    InvalidFilterSpec { spec: String },
}
