use allot_types::{AmountError, ContractCounters, FixedPointAmount};
use tracing::{debug, warn};

use crate::built_in::{
    oversubscription::OversubscriptionCalculator, unpurchased::UnpurchasedCalculator,
};
use crate::display::denormalize;
use crate::error::CalculatorError;
use crate::normalizer::Normalizer;
use crate::plugin::CalculatorInputs;
use crate::plugin_manager::PluginManager;

/// Name of the oversubscription allocation calculator.
pub const ALLOCATION: &str = "allocation";
/// Name of the unpurchased-allocation calculator.
pub const UNPURCHASED: &str = "unpurchased";

/// Looks calculators up by name and feeds them normalized inputs.
pub struct Calculator {
    normalizer: Normalizer,
    plugin_manager: PluginManager,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_normalizer(Normalizer::default())
    }

    pub fn with_normalizer(normalizer: Normalizer) -> Self {
        let mut plugin_manager = PluginManager::new();
        plugin_manager.register(Box::new(OversubscriptionCalculator));
        plugin_manager.register(Box::new(UnpurchasedCalculator));
        Self { normalizer, plugin_manager }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn calculator_names(&self) -> Vec<&str> {
        self.plugin_manager.names()
    }

    /// Runs `calculator_name` on already-normalized inputs.
    pub fn calculate(
        &self,
        calculator_name: &str,
        inputs: &CalculatorInputs,
    ) -> Result<FixedPointAmount, CalculatorError> {
        let plugin = self
            .plugin_manager
            .get(calculator_name)
            .ok_or_else(|| CalculatorError::NotFound(calculator_name.to_string()))?;

        if plugin.requires_input() && inputs.input.is_none() {
            return Err(CalculatorError::MissingInput { calculator: calculator_name.to_string() });
        }

        let result = plugin.calculate(inputs)?;
        debug!(calculator = calculator_name, %result, "calculation finished");
        Ok(result)
    }

    /// Normalizes the raw strings, then runs `calculator_name`.
    pub fn calculate_raw(
        &self,
        calculator_name: &str,
        user_input: Option<&str>,
        counters: &ContractCounters,
    ) -> Result<FixedPointAmount, CalculatorError> {
        let inputs = CalculatorInputs::from_raw(&self.normalizer, user_input, counters)?;
        self.calculate(calculator_name, &inputs)
    }

    /// Oversubscription allocation as a fixed-point integer string, `"0"` on
    /// any failure.
    pub fn allocation_or_zero(&self, user_input: &str, counters: &ContractCounters) -> String {
        match self.calculate_raw(ALLOCATION, Some(user_input), counters) {
            Ok(result) => result.to_string(),
            Err(error) => {
                warn!(%error, user_input, "allocation failed, reporting zero");
                "0".to_string()
            }
        }
    }

    /// Renders a fixed-point integer string for display.
    pub fn try_display(&self, fixed_point: &str) -> Result<String, AmountError> {
        let amount = self.normalizer.fixed_point(fixed_point)?;
        Ok(denormalize(amount).to_string())
    }

    /// Like [`Calculator::try_display`], returning the input unchanged when it
    /// is not a fixed-point integer.
    pub fn display(&self, fixed_point: &str) -> String {
        self.try_display(fixed_point).unwrap_or_else(|error| {
            debug!(%error, fixed_point, "not a fixed-point integer, showing as-is");
            fixed_point.to_string()
        })
    }
}
