//! Allot Types
//!
//! This crate defines the value types shared across the allocation workspace
//! (currently `allot-calculator` and `allot-api`): the 256-bit
//! [`FixedPointAmount`], the [`ContractCounters`] triple read from the sale
//! contract, and the [`AmountError`] taxonomy for the numeric pipeline.

#![warn(missing_docs)]

mod amount;
mod counters;
mod error;

pub use amount::{DEFAULT_DECIMALS, FixedPointAmount, MAX_DECIMALS};
pub use counters::ContractCounters;
pub use error::AmountError;

/// 256-bit unsigned integer, the width of the on-chain counters.
pub use ruint::aliases::U256;
