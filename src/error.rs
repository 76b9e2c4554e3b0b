//! This module defines the custom error types for the library.
//!
//! Two layers of failure exist in this crate:
//!
//! - [`EigenInverseError`] is returned when a call is malformed (inconsistent buffer lengths,
//!   a zero starting vector, a non-finite target eigenvalue). The algorithm never starts.
//! - [`PrimitiveError`] is what a [`crate::backend::NumericPrimitives`] implementation reports
//!   when a factorization or solve cannot be carried out. The inverse-iteration core turns these
//!   into a [`crate::algorithms::Termination`] value, so they never escape a well-formed call.
//!
//! Using the [`thiserror`] crate allows us to create idiomatic error types with minimal
//! boilerplate.
use thiserror::Error;

/// Represents all possible errors that can occur when setting up a perturbed inverse iteration.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct EigenInverseError(#[from] EigenInverseErrorKind);

/// Private enum containing the distinct kinds of errors.
#[derive(Error, Debug, PartialEq)]
pub(crate) enum EigenInverseErrorKind {
    /// Two buffers that must describe the same dimension disagree.
    #[error("Dimension mismatch: {what} has length {actual}, expected {expected}.")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Indicates that an invalid input parameter was provided to a function.
    #[error("Invalid input parameter: {0}")]
    InputError(String),
}

impl PartialEq for EigenInverseError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl EigenInverseError {
    pub(crate) fn dimension_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        EigenInverseErrorKind::DimensionMismatch {
            what,
            expected,
            actual,
        }
        .into()
    }

    pub(crate) fn input(message: impl Into<String>) -> Self {
        EigenInverseErrorKind::InputError(message.into()).into()
    }
}

/// Failure status of a numeric primitive.
///
/// The tridiagonal factorization and solve of a backend report these instead of the integer
/// `info` codes of LAPACK-style routines.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveError {
    /// The pivot at `index` (0-based) was not strictly positive, so the shifted matrix is not
    /// positive definite.
    #[error("Non-positive pivot encountered at index {index} during tridiagonal factorization.")]
    NonPositivePivot { index: usize },

    /// The solve produced a non-finite entry at `index`.
    #[error("Tridiagonal solve produced a non-finite entry at index {index}.")]
    NonFiniteSolution { index: usize },

    /// The slices handed to the primitive do not describe a consistent problem size.
    #[error("Length mismatch in numeric primitive: expected {expected}, got {actual}.")]
    LengthMismatch { expected: usize, actual: usize },
}
