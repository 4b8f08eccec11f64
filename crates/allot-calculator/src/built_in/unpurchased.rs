//! Unpurchased Allocation Calculator
//!
//! result = allocation - reserved

use crate::calculator::UNPURCHASED;
use crate::plugin::{CalculationResult, CalculatorInputs, CalculatorPlugin};

#[derive(Debug, Default)]
pub struct UnpurchasedCalculator;

impl CalculatorPlugin for UnpurchasedCalculator {
    fn name(&self) -> &str {
        UNPURCHASED
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalculationResult {
        inputs.allocation.checked_sub(inputs.reserved, "unpurchased")
    }
}
