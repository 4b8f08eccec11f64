//! Fixed-point allocation calculators.
//!
//! This crate turns the raw contract counters and a user's typed amount into
//! the share of allocation the user can expect when a sale is oversubscribed.
//! Everything here is pure: counters are passed in as values, and the same
//! inputs always give the same output.
//!
//! The `try_*` functions return typed errors. [`compute_allocation`] and
//! [`format_for_display`] are the presentation boundary: they never fail, and
//! show `"0"` (or the raw input) instead.

pub mod built_in;
pub mod calculator;
pub mod display;
pub mod error;
pub mod normalizer;
pub mod plugin;
pub mod plugin_manager;
pub mod token;

pub use allot_types::{AmountError, ContractCounters, FixedPointAmount};
pub use calculator::{ALLOCATION, Calculator, UNPURCHASED};
pub use display::{DisplayAmount, denormalize, render_whole};
pub use error::CalculatorError;
pub use normalizer::{Normalizer, normalize_decimal_string, normalize_user_input};
pub use token::token_estimate;

/// Oversubscription allocation for `user_input` against `counters`.
pub fn try_compute_allocation(
    user_input: &str,
    counters: &ContractCounters,
) -> Result<FixedPointAmount, CalculatorError> {
    Calculator::new().calculate_raw(ALLOCATION, Some(user_input), counters)
}

/// Oversubscription allocation as a fixed-point integer string (not yet
/// denormalized), or `"0"` if anything in the pipeline fails.
pub fn compute_allocation(user_input: &str, counters: &ContractCounters) -> String {
    Calculator::new().allocation_or_zero(user_input, counters)
}

/// Renders a fixed-point integer string as a decimal.
pub fn try_format_for_display(fixed_point: &str) -> Result<String, AmountError> {
    Calculator::new().try_display(fixed_point)
}

/// Renders a fixed-point integer string as a decimal, or returns it unchanged
/// if it is not one.
pub fn format_for_display(fixed_point: &str) -> String {
    Calculator::new().display(fixed_point)
}
