//! Errors raised while building a graph or synthesizing tags.

use hallmark_ir::TypeId;
use thiserror::Error;

/// A structural problem found by [`TypeGraphBuilder::build`](crate::TypeGraphBuilder::build).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("type name `{0}` is declared twice")]
    DuplicateName(String),

    #[error("`{0}` is in the reserved `lang::` namespace")]
    ReservedName(String),

    #[error("{0} does not refer to a declared type")]
    UnknownType(TypeId),

    #[error("`{ty}` cannot extend `{parent}`: only classes can be extended by classes")]
    InvalidParent { ty: String, parent: String },

    #[error("`{ty}` cannot implement `{interface}`: it is not an interface")]
    NotAnInterface { ty: String, interface: String },

    #[error("`{ty}` carries a tag of `{tag}`, which is not a tag type")]
    NotATagType { ty: String, tag: String },

    #[error("`{0}` is not a class and cannot have a parent")]
    ParentOnNonClass(String),

    #[error("parent chain of `{0}` is cyclic")]
    ParentCycle(String),

    #[error("enclosing chain of `{0}` is cyclic")]
    EnclosingCycle(String),

    #[error("`{0}` is its own ancestor through parent, interface or enclosing links")]
    InheritanceCycle(String),
}

/// Merged attributes could not be turned into a tag instance.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("{0} is not a tag type")]
    NotATagType(TypeId),

    #[error("`{tag}` declares no attribute `{attribute}` (synthesizing for `{origin}`)")]
    UnknownAttribute {
        tag: String,
        attribute: String,
        origin: String,
    },

    #[error("`{tag}` attribute `{attribute}` has no value and no default (synthesizing for `{origin}`)")]
    MissingAttribute {
        tag: String,
        attribute: String,
        origin: String,
    },
}
