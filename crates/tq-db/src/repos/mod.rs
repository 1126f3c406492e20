//! Repositories for the metamodel tables.
//!
//! Each module exposes connection-level functions (usable inside a
//! transaction) and adds read methods to `TqDb` via `impl TqDb` blocks.

pub mod attributes;
pub mod filters;
pub mod includes;
pub mod resource_types;
