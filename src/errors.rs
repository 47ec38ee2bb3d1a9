//! Error types for domain construction.

use thiserror::Error;

/// Reasons why an evaluation domain cannot be constructed.
///
/// All variants describe bad input or an unsuitable field and are
/// recoverable; internal consistency failures inside a running transform are
/// asserted instead, since they indicate a bug rather than bad input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// The field does not define a large-subgroup root of unity, so no
    /// mixed-radix domain exists for it at any size.
    #[error("field does not define a large subgroup root of unity")]
    UnsupportedField,

    /// The smallest admissible domain size exceeds the configured maximum
    /// degree bound.
    #[error("domain of size {size} exceeds the maximum supported degree {max_degree}")]
    SizeTooLarge {
        /// The smallest admissible size for the request.
        size: u64,
        /// The configured maximum polynomial degree.
        max_degree: u64,
    },

    /// No combination of small-subgroup and power-of-two exponents reaches
    /// the requested size within the field's adicity limits.
    #[error("no subgroup of size at least {min_size} fits the field's adicity bounds")]
    SizeInfeasible {
        /// The requested minimum domain size.
        min_size: u64,
    },

    /// The chosen size does not factor as `2^j * base^i` within the
    /// configured adicities.
    #[error("{size} does not factor as a power of two times a power of {base}")]
    DecompositionMismatch {
        /// The size that failed to decompose.
        size: u64,
        /// The configured small-subgroup base.
        base: u64,
    },
}
