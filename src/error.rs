//! Construction-time validation errors.

use thiserror::Error;

/// Error raised while building a constraint.
///
/// These are precondition violations caught before any solving begins,
/// never solver outcomes: an unsatisfiable problem is reported by
/// [`solve`](crate::solve) returning `None`, not by an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CspError {
    /// The operator symbol is not one of `==`, `!=`, `<`, `<=`, `>`, `>=`.
    #[error("invalid constraint operator: {0:?}")]
    InvalidOperator(String),

    /// A variable index is negative.
    #[error("invalid variable index: {0}")]
    InvalidVariableIndex(i64),

    /// A binary constraint compares a variable with itself.
    #[error("binary constraint compares variable {0} with itself")]
    SelfReference(usize),
}
