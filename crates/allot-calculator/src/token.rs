//! Sale-token estimates.

use allot_types::{AmountError, FixedPointAmount};

/// How many sale tokens `amount` buys at `price` quote units per token:
/// `floor(amount / price)`, kept at the amount's precision.
pub fn token_estimate(
    amount: FixedPointAmount,
    price: FixedPointAmount,
) -> Result<FixedPointAmount, AmountError> {
    let one = FixedPointAmount::new(amount.scale(), amount.decimals())?;
    amount.mul_div_floor(one, price)
}
