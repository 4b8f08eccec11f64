//! Denormalization for presentation.

use std::fmt;

use allot_types::{FixedPointAmount, U256};

/// An amount split into its whole units and fractional remainder.
///
/// `Display` renders `whole[.fraction]`: the remainder is zero-padded to the
/// precision, trailing zeros are stripped, and a zero remainder renders as the
/// whole part alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayAmount {
    pub whole: U256,
    pub fraction: U256,
    pub decimals: u8,
}

impl fmt::Display for DisplayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fraction.is_zero() {
            return write!(f, "{}", self.whole);
        }
        let width = usize::from(self.decimals);
        let padded = format!("{:0>width$}", self.fraction.to_string());
        write!(f, "{}.{}", self.whole, padded.trim_end_matches('0'))
    }
}

/// Splits `amount` into whole units and remainder.
pub fn denormalize(amount: FixedPointAmount) -> DisplayAmount {
    let scale = amount.scale();
    DisplayAmount {
        whole: amount.raw() / scale,
        fraction: amount.raw() % scale,
        decimals: amount.decimals(),
    }
}

/// Whole units only, fraction dropped.
pub fn render_whole(amount: FixedPointAmount) -> String {
    denormalize(amount).whole.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(raw: u64) -> FixedPointAmount {
        FixedPointAmount::from_raw(U256::from(raw))
    }

    #[test]
    fn splits_whole_and_fraction() {
        let parts = denormalize(amount(1_500_000));
        assert_eq!(parts.whole, U256::from(1u64));
        assert_eq!(parts.fraction, U256::from(500_000u64));
    }

    #[test]
    fn renders_whole_numbers_without_point() {
        assert_eq!(denormalize(amount(5_000_000)).to_string(), "5");
        assert_eq!(denormalize(amount(0)).to_string(), "0");
    }

    #[test]
    fn renders_fraction_padded_and_trimmed() {
        assert_eq!(denormalize(amount(1_500_000)).to_string(), "1.5");
        assert_eq!(denormalize(amount(1_000_001)).to_string(), "1.000001");
        assert_eq!(denormalize(amount(42)).to_string(), "0.000042");
        assert_eq!(denormalize(amount(123_456_780)).to_string(), "123.45678");
    }

    #[test]
    fn render_whole_drops_fraction() {
        assert_eq!(render_whole(amount(1_999_999)), "1");
        assert_eq!(render_whole(amount(999_999)), "0");
    }
}
