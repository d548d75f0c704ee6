//! Error types for solver construction and stepping

use std::fmt;

/// Main error type for all solver operations
///
/// Contradictions are not errors: a domain emptying during propagation is an
/// expected outcome of the greedy algorithm and is reported through the solve
/// status instead.
#[derive(Debug)]
pub enum SolverError {
    /// Solve parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Pixel buffer doesn't meet exemplar requirements
    InvalidSourceData {
        /// Description of what's wrong with the buffer
        reason: String,
    },

    /// Weighted selection over a domain with zero total weight
    ///
    /// Indicates a propagation bookkeeping bug rather than a contradiction;
    /// the chosen cell should have held at least one weighted candidate.
    EmptySelection {
        /// Grid position (row, col) of the offending cell
        position: [usize; 2],
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::EmptySelection { position } => {
                write!(
                    f,
                    "Weighted selection at ({}, {}) found no candidates with nonzero weight",
                    position[0], position[1]
                )
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> SolverError {
    SolverError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
