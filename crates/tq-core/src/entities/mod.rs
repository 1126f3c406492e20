//! Entity structs for the remote API metamodel.
//!
//! Every entity is derived from the API description document during
//! introspection and is immutable afterwards. Ids are assigned by the
//! metamodel store and are stable for the lifetime of the database.

mod attribute;
mod filter;
mod include;
mod resource_type;

pub use attribute::AttributeDefinition;
pub use filter::FilterDefinition;
pub use include::IncludeOption;
pub use resource_type::{FILTER_REQUIRED_RESOURCES, ResourceType};
