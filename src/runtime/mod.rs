//! Runtime support for generated entity classes
//!
//! The generated Java code relies on a small base library: typed triple
//! add/load helpers, a target model that deduplicates entities while a
//! reachability closure is written, and an injected factory that builds
//! referenced entities during loading. This module is that library for
//! Rust callers, driven by the same classifications the generators use.
//!
//! Entities live in an [`EntityGraph`] arena and refer to each other by
//! [`EntityId`]. Forward and reverse edges are kept in step by a single
//! [`EntityGraph::link`] operation.

mod binding;
mod factory;
mod graph;
mod literal;
mod load;
mod target;

pub use binding::{ClassBinding, PropertyBinding};
pub use factory::{Constructor, EntityFactory};
pub use graph::{Entity, EntityGraph, EntityId, FieldValue};
pub use literal::{Literal, LiteralValue};
pub use load::{Node, load_array, load_value, object_iris, statements_about};
pub use target::TargetModel;

use thiserror::Error;

use crate::classifier::Classification;

/// Errors raised by the runtime
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// No constructor is registered for a class
    #[error("no factory registered for class {0}")]
    MissingFactory(String),

    /// An entity id does not belong to this graph
    #[error("unknown entity #{0}")]
    UnknownEntity(usize),

    /// The entity's class has no such property
    #[error("class {class} has no property {property}")]
    UnknownProperty { class: String, property: String },

    /// The property is used with the wrong kind of operation
    #[error("property {property} is a {actual} property, not {expected}")]
    ClassificationMismatch {
        property: String,
        expected: String,
        actual: Classification,
    },

    /// A reference points at an entity of a class the property does not accept
    #[error("property {property} expects {expected}, got {actual}")]
    RangeMismatch {
        property: String,
        expected: String,
        actual: String,
    },

    /// A literal could not be converted to the requested type
    #[error("invalid {datatype} literal '{lexical}'")]
    InvalidLiteral { lexical: String, datatype: String },

    /// The underlying graph rejected a statement
    #[error("graph error: {0}")]
    Graph(String),
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
