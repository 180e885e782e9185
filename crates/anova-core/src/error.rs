//! Error types for model fitting and variance decomposition
//!
//! Provides a unified error type for formula parsing, model frame
//! extraction, least-squares fitting and the ANOVA routines.

use thiserror::Error;

/// Core error type for model fitting operations
#[derive(Error, Debug)]
pub enum Error {
    /// Formula string could not be parsed
    #[error("Invalid formula '{formula}': {reason}")]
    Formula { formula: String, reason: String },

    /// Formula or call referenced a column the dataset does not have
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Column has a dtype the model cannot use
    #[error("Type mismatch in column '{column}': expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: String,
        got: String,
    },

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Error raised by polars while reading the dataset
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a formula error
    pub fn formula(formula: &str, reason: impl Into<String>) -> Self {
        Self::Formula {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an error for a column with an unusable dtype
    pub fn type_mismatch(column: &str, expected: &str, got: impl std::fmt::Debug) -> Self {
        Self::TypeMismatch {
            column: column.to_string(),
            expected: expected.to_string(),
            got: format!("{got:?}"),
        }
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }
}
