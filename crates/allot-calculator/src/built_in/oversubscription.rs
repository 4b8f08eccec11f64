//! Oversubscription Allocation Calculator
//!
//! Scales a contribution down to its share of the allocation that is still
//! open, once the reserved-used amount is taken out of both sides:
//!
//! result = floor(input * (allocation - reserved) / (balance - reserved))
//!
//! Returns 0 when `balance - reserved` is 0.

use allot_types::AmountError;
use tracing::debug;

use crate::calculator::ALLOCATION;
use crate::plugin::{CalculationResult, CalculatorInputs, CalculatorPlugin};

#[derive(Debug, Default)]
pub struct OversubscriptionCalculator;

impl CalculatorPlugin for OversubscriptionCalculator {
    fn name(&self) -> &str {
        ALLOCATION
    }

    fn requires_input(&self) -> bool {
        true
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalculationResult {
        let input = inputs
            .input
            .ok_or_else(|| AmountError::parse("", "missing user amount"))?;

        let available_allocation =
            inputs.allocation.checked_sub(inputs.reserved, "available_allocation")?;
        let available_balance = inputs.balance.checked_sub(inputs.reserved, "available_balance")?;

        if available_balance.is_zero() {
            debug!("available balance is zero, allocation is zero");
            input.ensure_same_precision(&available_allocation)?;
            return Ok(available_balance);
        }

        input.mul_div_floor(available_allocation, available_balance)
    }
}
