use allot_types::{AmountError, ContractCounters, FixedPointAmount};

use crate::normalizer::Normalizer;

pub type CalculationResult = Result<FixedPointAmount, AmountError>;

/// Calculator inputs, all normalized to one precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorInputs {
    /// The user's contribution, when the calculation needs one
    pub input: Option<FixedPointAmount>,
    pub allocation: FixedPointAmount,
    pub balance: FixedPointAmount,
    pub reserved: FixedPointAmount,
}

impl CalculatorInputs {
    /// Normalizes the raw counters, and the user amount if present.
    pub fn from_raw(
        normalizer: &Normalizer,
        user_input: Option<&str>,
        counters: &ContractCounters,
    ) -> Result<Self, AmountError> {
        Ok(Self {
            input: user_input.map(|raw| normalizer.user_input(raw)).transpose()?,
            allocation: normalizer.decimal_string(counters.total_allocation())?,
            balance: normalizer.decimal_string(counters.total_balance())?,
            reserved: normalizer.decimal_string(counters.total_reserved_used())?,
        })
    }
}

/// A trait for calculator plugins.
pub trait CalculatorPlugin: Send + Sync {
    /// The name of the calculator.
    fn name(&self) -> &str;

    /// Whether `CalculatorInputs::input` must be present.
    fn requires_input(&self) -> bool {
        false
    }

    /// Performs the calculation.
    fn calculate(&self, inputs: &CalculatorInputs) -> CalculationResult;
}
