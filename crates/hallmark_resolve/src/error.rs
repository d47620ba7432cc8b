//! Resolution errors.

use hallmark_ir::TypeId;
use hallmark_types::SynthesisError;
use thiserror::Error;

/// Broad category of a [`ResolveError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed something that can never be resolved.
    InvalidArgument,
    /// The operation is not available on this value.
    UnsupportedOperation,
    /// The type universe answered inconsistently.
    IllegalState,
}

/// An error raised by the resolver or a descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("{0} is not a tag type")]
    NotATagType(TypeId),

    #[error("{0} is a reserved tag type and is never resolved")]
    ReservedTagType(TypeId),

    #[error("the list of candidate tag types must not be empty")]
    EmptyCandidates,

    #[error("a repeatable descriptor needs at least one tag instance")]
    EmptyRepeatable,

    #[error("`{operation}` is not supported: {reason}")]
    Unsupported {
        operation: &'static str,
        reason: &'static str,
    },

    #[error("no merged attributes for {tag_type} in the hierarchy of {root}")]
    MissingAttributes { root: TypeId, tag_type: TypeId },

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::NotATagType(_)
            | ResolveError::ReservedTagType(_)
            | ResolveError::EmptyCandidates
            | ResolveError::EmptyRepeatable => ErrorKind::InvalidArgument,
            ResolveError::Unsupported { .. } => ErrorKind::UnsupportedOperation,
            ResolveError::MissingAttributes { .. } | ResolveError::Synthesis(_) => {
                ErrorKind::IllegalState
            }
        }
    }
}
