use thiserror::Error;

/// Errors produced while converting or combining fixed-point amounts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input is not a decimal digit string (or not a number at all).
    #[error("cannot parse '{input}' as an amount: {reason}")]
    Parse {
        /// The offending input, as received.
        input: String,
        /// Short description of what is wrong with it.
        reason: &'static str,
    },

    /// Two amounts with different precisions met in one computation.
    #[error("precision mismatch: {left} vs {right} decimals")]
    PrecisionMismatch {
        /// Decimals of the left-hand operand.
        left: u8,
        /// Decimals of the right-hand operand.
        right: u8,
    },

    /// The value does not fit the integer width used for amounts.
    #[error("amount overflow in {operation}")]
    Overflow {
        /// The operation that overflowed.
        operation: &'static str,
    },

    /// A subtraction would go below zero.
    #[error("amount underflow in {operation}")]
    Underflow {
        /// The operation that underflowed.
        operation: &'static str,
    },

    /// Division by a zero amount.
    #[error("division by zero in {operation}")]
    DivisionByZero {
        /// The operation that divided.
        operation: &'static str,
    },

    /// A floating-point input was NaN or infinite.
    #[error("'{input}' is not a finite number")]
    NonFinite {
        /// The offending input, as received.
        input: String,
    },

    /// A floating-point input was below zero.
    #[error("'{input}' is negative")]
    Negative {
        /// The offending input, as received.
        input: String,
    },

    /// The requested precision cannot be represented.
    #[error("unsupported precision: {decimals} decimals (max {max})")]
    UnsupportedPrecision {
        /// Requested number of fractional digits.
        decimals: u8,
        /// Largest supported number of fractional digits.
        max: u8,
    },
}

impl AmountError {
    /// Shorthand for a [`AmountError::Parse`] error.
    pub fn parse(input: impl Into<String>, reason: &'static str) -> Self {
        AmountError::Parse { input: input.into(), reason }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AmountError::Parse { .. } => "parse",
            AmountError::PrecisionMismatch { .. } => "precision",
            AmountError::Overflow { .. }
            | AmountError::Underflow { .. }
            | AmountError::DivisionByZero { .. } => "arithmetic",
            AmountError::NonFinite { .. } | AmountError::Negative { .. } => "user_input",
            AmountError::UnsupportedPrecision { .. } => "configuration",
        }
    }
}
