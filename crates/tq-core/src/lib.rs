//! # tq-core
//!
//! Core types and error types shared by every transitq crate.
//!
//! This crate provides:
//! - Entity structs for the remote API metamodel (resource types, include
//!   options, filter definitions, attribute definitions)
//! - The in-memory [`Metamodel`] with id and name lookups
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod metamodel;

pub use entities::{AttributeDefinition, FilterDefinition, IncludeOption, ResourceType};
pub use errors::CoreError;
pub use metamodel::Metamodel;
