//! The type universe hallmark resolves tags against.
//!
//! # Architecture
//!
//! ```text
//! TypeGraphBuilder ──build()──► TypeGraph
//!                                   │ implements
//!                                   ├── TypeIntrospector       (tags, parent, interfaces, enclosing)
//!                                   ├── RepeatableAggregator   (containers unwrapped)
//!                                   ├── AttributeMerger        (defaults, instance, alias overrides)
//!                                   └── EnclosingConfigReader  (nested-configuration lookup)
//! ```
//!
//! The resolver only talks to the traits, so any other universe (a
//! compiler's item table, a plugin registry) can stand in for `TypeGraph`.

mod decl;
mod enclosing;
mod error;
mod graph;
mod introspect;
mod merge;
mod repeatable;
mod scan;

pub use decl::{AttrAlias, AttrDecl, TypeDecl, TypeFlags, TypeKind};
pub use error::{BuildError, SynthesisError};
pub use graph::{TypeGraph, TypeGraphBuilder};
pub use introspect::{
    AttributeMerger, EnclosingConfigReader, RepeatableAggregator, TagProvider, TypeIntrospector,
};

/// Qualified-name prefix of the reserved built-in tag namespace.
///
/// Tag types under this prefix describe tags themselves (retention,
/// documentation, inheritance, repetition) and are never followed as
/// meta-tags.
pub const RESERVED_TAG_NAMESPACE: &str = "lang::tag::";
