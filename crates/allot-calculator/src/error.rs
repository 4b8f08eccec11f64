use allot_types::AmountError;
use thiserror::Error;

/// Errors reported by the calculator facade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("calculator '{0}' not found")]
    NotFound(String),

    #[error("calculator '{calculator}' requires a user amount")]
    MissingInput { calculator: String },

    #[error(transparent)]
    Amount(#[from] AmountError),
}
