//! # tq-query
//!
//! Query Parameter Builder for transitq.
//!
//! A [`Selection`] names a primary resource type, include options,
//! attributes and attached filters by metamodel id. [`build_params`] turns
//! it into ordered request parameters and [`request_url`] into the
//! canonical URL. [`SelectionSpec`] resolves the textual form typed on the
//! command line.

mod builder;
mod error;
mod params;
mod resolve;
mod selection;
mod url;

pub use builder::build_params;
pub use error::QueryError;
pub use params::QueryParams;
pub use resolve::SelectionSpec;
pub use selection::{FilterValue, Selection, VALUE_SEPARATOR};
pub use url::request_url;
