use std::fmt;

use ruint::aliases::{U256, U512};

use crate::AmountError;

/// Fractional digits carried by every amount in this system.
pub const DEFAULT_DECIMALS: u8 = 6;

/// Largest precision accepted; `10^38` still leaves headroom inside 256 bits.
pub const MAX_DECIMALS: u8 = 38;

/// A non-negative decimal quantity stored as a 256-bit integer scaled by
/// `10^decimals`.
///
/// Amounts only combine with amounts of the same precision; every binary
/// operation checks this and fails with [`AmountError::PrecisionMismatch`]
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPointAmount {
    raw: U256,
    decimals: u8,
}

impl FixedPointAmount {
    /// Creates an amount from an already-scaled integer at `decimals` precision.
    pub fn new(raw: U256, decimals: u8) -> Result<Self, AmountError> {
        if decimals > MAX_DECIMALS {
            return Err(AmountError::UnsupportedPrecision { decimals, max: MAX_DECIMALS });
        }
        Ok(Self { raw, decimals })
    }

    /// Creates an amount at [`DEFAULT_DECIMALS`] precision.
    pub const fn from_raw(raw: U256) -> Self {
        Self { raw, decimals: DEFAULT_DECIMALS }
    }

    /// Zero at the given precision.
    pub fn zero(decimals: u8) -> Result<Self, AmountError> {
        Self::new(U256::ZERO, decimals)
    }

    /// The scaled integer.
    pub const fn raw(&self) -> U256 {
        self.raw
    }

    /// Number of fractional digits.
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// `10^decimals`, the integer value of one whole unit.
    pub fn scale(&self) -> U256 {
        Self::scale_for(self.decimals)
    }

    /// `10^decimals` for an arbitrary supported precision.
    pub fn scale_for(decimals: u8) -> U256 {
        U256::from(10u64).pow(U256::from(decimals))
    }

    /// Fails unless `other` has the same precision as `self`.
    pub fn ensure_same_precision(&self, other: &Self) -> Result<(), AmountError> {
        if self.decimals == other.decimals {
            Ok(())
        } else {
            Err(AmountError::PrecisionMismatch { left: self.decimals, right: other.decimals })
        }
    }

    /// `self - rhs`, failing with [`AmountError::Underflow`] below zero.
    pub fn checked_sub(self, rhs: Self, operation: &'static str) -> Result<Self, AmountError> {
        self.ensure_same_precision(&rhs)?;
        let raw = self.raw.checked_sub(rhs.raw).ok_or(AmountError::Underflow { operation })?;
        Ok(Self { raw, decimals: self.decimals })
    }

    /// `floor(self * numerator / denominator)` in exact integer arithmetic.
    ///
    /// Multiplies before dividing. The product is formed in 512 bits, so only a
    /// quotient wider than 256 bits is rejected.
    pub fn mul_div_floor(self, numerator: Self, denominator: Self) -> Result<Self, AmountError> {
        self.ensure_same_precision(&numerator)?;
        self.ensure_same_precision(&denominator)?;
        if denominator.is_zero() {
            return Err(AmountError::DivisionByZero { operation: "mul_div_floor" });
        }

        let quotient = widen(self.raw) * widen(numerator.raw) / widen(denominator.raw);

        let (low, high) = quotient.as_limbs().split_at(U256::LIMBS);
        if high.iter().any(|&limb| limb != 0) {
            return Err(AmountError::Overflow { operation: "mul_div_floor" });
        }
        Ok(Self { raw: U256::from_limbs_slice(low), decimals: self.decimals })
    }
}

fn widen(value: U256) -> U512 {
    U512::from_limbs_slice(value.as_limbs())
}

/// Renders the scaled integer, not the human-readable decimal.
impl fmt::Display for FixedPointAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(raw: u64) -> FixedPointAmount {
        FixedPointAmount::from_raw(U256::from(raw))
    }

    #[test]
    fn scale_matches_precision() {
        assert_eq!(amount(0).scale(), U256::from(1_000_000u64));
        assert_eq!(FixedPointAmount::scale_for(0), U256::from(1u64));
        assert_eq!(FixedPointAmount::scale_for(18), U256::from(1_000_000_000_000_000_000u128));
    }

    #[test]
    fn rejects_unsupported_precision() {
        let err = FixedPointAmount::new(U256::ZERO, MAX_DECIMALS + 1).unwrap_err();
        assert_eq!(err, AmountError::UnsupportedPrecision { decimals: 39, max: 38 });
    }

    #[test]
    fn checked_sub_underflows() {
        let err = amount(1).checked_sub(amount(2), "available_balance").unwrap_err();
        assert_eq!(err, AmountError::Underflow { operation: "available_balance" });
        assert_eq!(amount(5).checked_sub(amount(2), "x").unwrap(), amount(3));
    }

    #[test]
    fn mixing_precisions_is_rejected() {
        let six = amount(1_000_000);
        let eighteen = FixedPointAmount::new(U256::from(1u64), 18).unwrap();

        assert_eq!(
            six.checked_sub(eighteen, "x").unwrap_err(),
            AmountError::PrecisionMismatch { left: 6, right: 18 }
        );
        assert!(matches!(
            six.mul_div_floor(six, eighteen),
            Err(AmountError::PrecisionMismatch { .. })
        ));
    }

    #[test]
    fn mul_div_floor_truncates() {
        // 7 * 2 / 3 = 4.666.. -> 4
        assert_eq!(amount(7).mul_div_floor(amount(2), amount(3)).unwrap(), amount(4));
    }

    #[test]
    fn mul_div_floor_rejects_zero_denominator() {
        assert_eq!(
            amount(7).mul_div_floor(amount(2), amount(0)).unwrap_err(),
            AmountError::DivisionByZero { operation: "mul_div_floor" }
        );
    }

    #[test]
    fn mul_div_floor_survives_wide_products() {
        let max = FixedPointAmount::from_raw(U256::MAX);
        // MAX * MAX / MAX needs 512 bits in the middle.
        assert_eq!(max.mul_div_floor(max, max).unwrap(), max);
    }

    #[test]
    fn mul_div_floor_reports_quotient_overflow() {
        let max = FixedPointAmount::from_raw(U256::MAX);
        assert_eq!(
            max.mul_div_floor(amount(2), amount(1)).unwrap_err(),
            AmountError::Overflow { operation: "mul_div_floor" }
        );
    }

    #[test]
    fn displays_raw_integer() {
        assert_eq!(amount(5_000_000).to_string(), "5000000");
    }
}
