//! Error types for the embedding routines.

use thiserror::Error;

/// Everything that can go wrong when building contexts or moving elements between them.
///
/// Degenerate algebraic outcomes (the zero element, the zero polynomial) are not errors; they are
/// returned as ordinary values and documented on the functions that produce them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    #[error("modulus is not monic")]
    NotMonic,

    #[error("modulus must have positive degree")]
    ConstantModulus,

    #[error("modulus is reducible")]
    Reducible,

    /// The target field of a basis change is not a subfield of the source.
    #[error("a degree-{to} field is not a subfield of a degree-{from} field")]
    NotSubfield { from: usize, to: usize },

    /// An input element is not reduced modulo the modulus of its context.
    #[error("element with {len} coefficients is not reduced modulo a degree-{modulus_degree} modulus")]
    NotReduced { len: usize, modulus_degree: usize },

    #[error("dual vector has {actual} coordinates, expected {expected}")]
    DualLengthMismatch { expected: usize, actual: usize },

    #[error("invalid tensor descriptor: {reason}")]
    InvalidTensor { reason: &'static str },

    /// A randomized search hit its attempt ceiling.
    #[error("randomized search did not converge after {attempts} attempts")]
    DidNotConverge { attempts: usize },
}

/// Result type alias for embedding operations.
pub type EmbedResult<T> = core::result::Result<T, EmbedError>;
