//! Precision normalization.
//!
//! Two conversions produce [`FixedPointAmount`]s and they are not
//! interchangeable:
//!
//! * [`Normalizer::decimal_string`] takes counter strings that are already
//!   scaled to the system precision (a decimal point, if any, only pads or
//!   truncates the fraction).
//! * [`Normalizer::user_input`] takes a plain human amount and scales it by
//!   `10^decimals` through an `f64`. Inputs with more significant digits than
//!   an `f64` carries lose precision on this path; that boundary is accepted.

use allot_types::{AmountError, DEFAULT_DECIMALS, FixedPointAmount, U256};

/// Converts external representations into amounts at one fixed precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    decimals: u8,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self { decimals: DEFAULT_DECIMALS }
    }
}

impl Normalizer {
    pub fn new(decimals: u8) -> Result<Self, AmountError> {
        // Validates the precision once, up front.
        FixedPointAmount::zero(decimals)?;
        Ok(Self { decimals })
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Parses a fixed-point integer string: ASCII digits only.
    pub fn fixed_point(&self, value: &str) -> Result<FixedPointAmount, AmountError> {
        if value.is_empty() {
            return Err(AmountError::parse(value, "empty string"));
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::parse(value, "expected decimal digits"));
        }
        self.parse_digits(value)
    }

    /// Normalizes a pre-scaled counter string.
    ///
    /// Without a decimal point the digits are taken as-is. With one, the
    /// fraction is right-padded with zeros to the precision and anything past
    /// it is dropped (truncation, never rounding), then both parts are joined.
    pub fn decimal_string(&self, value: &str) -> Result<FixedPointAmount, AmountError> {
        let Some((whole, fraction)) = value.split_once('.') else {
            return self.fixed_point(value);
        };

        if fraction.contains('.') {
            return Err(AmountError::parse(value, "more than one decimal point"));
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(AmountError::parse(value, "no digits"));
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(AmountError::parse(value, "expected decimal digits"));
        }

        let width = usize::from(self.decimals);
        let kept = &fraction[..fraction.len().min(width)];
        let digits = format!("{whole}{kept:0<width$}");
        self.parse_digits(&digits)
    }

    /// Normalizes a human-entered amount: `trunc(parse_f64(raw) * 10^decimals)`.
    pub fn user_input(&self, raw: &str) -> Result<FixedPointAmount, AmountError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AmountError::parse(raw, "empty input"));
        }

        let value: f64 =
            trimmed.parse().map_err(|_| AmountError::parse(raw, "not a number"))?;
        if !value.is_finite() {
            return Err(AmountError::NonFinite { input: raw.to_string() });
        }
        if value < 0.0 {
            return Err(AmountError::Negative { input: raw.to_string() });
        }

        let scaled = (value * 10f64.powi(i32::from(self.decimals))).trunc();
        let raw = U256::try_from(scaled)
            .map_err(|_| AmountError::Overflow { operation: "normalize_user_input" })?;
        FixedPointAmount::new(raw, self.decimals)
    }

    fn parse_digits(&self, digits: &str) -> Result<FixedPointAmount, AmountError> {
        // Digits are validated by the callers, so the only failure left is width.
        let raw = U256::from_str_radix(digits, 10)
            .map_err(|_| AmountError::Overflow { operation: "normalize_decimal_string" })?;
        FixedPointAmount::new(raw, self.decimals)
    }
}

/// [`Normalizer::decimal_string`] at the system precision.
pub fn normalize_decimal_string(value: &str) -> Result<FixedPointAmount, AmountError> {
    Normalizer::default().decimal_string(value)
}

/// [`Normalizer::user_input`] at the system precision.
pub fn normalize_user_input(raw: &str) -> Result<FixedPointAmount, AmountError> {
    Normalizer::default().user_input(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(amount: FixedPointAmount) -> U256 {
        amount.raw()
    }

    #[test]
    fn integer_strings_are_taken_verbatim() {
        assert_eq!(raw(normalize_decimal_string("1000000000").unwrap()), U256::from(1_000_000_000u64));
        assert_eq!(raw(normalize_decimal_string("0").unwrap()), U256::ZERO);
    }

    #[test]
    fn fraction_is_padded_to_precision() {
        assert_eq!(raw(normalize_decimal_string("1.5").unwrap()), U256::from(1_500_000u64));
        assert_eq!(raw(normalize_decimal_string(".5").unwrap()), U256::from(500_000u64));
        assert_eq!(raw(normalize_decimal_string("7.").unwrap()), U256::from(7_000_000u64));
    }

    #[test]
    fn fraction_beyond_precision_is_truncated() {
        assert_eq!(raw(normalize_decimal_string("1.1234567").unwrap()), U256::from(1_123_456u64));
        assert_eq!(raw(normalize_decimal_string("0.9999999").unwrap()), U256::from(999_999u64));
    }

    #[test]
    fn malformed_counter_strings_are_rejected() {
        for bad in ["", ".", "abc", "1.2.3", "-5", "1e6", " 12", "0x10"] {
            assert!(
                matches!(normalize_decimal_string(bad), Err(AmountError::Parse { .. })),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn counter_wider_than_256_bits_overflows() {
        let too_wide = "9".repeat(80);
        assert_eq!(
            normalize_decimal_string(&too_wide).unwrap_err(),
            AmountError::Overflow { operation: "normalize_decimal_string" }
        );
    }

    #[test]
    fn user_input_is_scaled_and_truncated() {
        assert_eq!(raw(normalize_user_input("10").unwrap()), U256::from(10_000_000u64));
        assert_eq!(raw(normalize_user_input("0.5").unwrap()), U256::from(500_000u64));
        assert_eq!(raw(normalize_user_input(" 2.25 ").unwrap()), U256::from(2_250_000u64));
        // 1.23456789 * 1e6 = 1234567.89 -> 1234567
        assert_eq!(raw(normalize_user_input("1.23456789").unwrap()), U256::from(1_234_567u64));
    }

    #[test]
    fn user_input_wider_than_128_bits_is_kept() {
        let amount = normalize_user_input("1e40").unwrap();

        assert!(amount.raw() > U256::from(u128::MAX));
        assert_eq!(amount.raw(), U256::try_from(1e40f64 * 1e6).unwrap());
    }

    #[test]
    fn user_input_rejects_garbage() {
        assert!(matches!(normalize_user_input(""), Err(AmountError::Parse { .. })));
        assert!(matches!(normalize_user_input("   "), Err(AmountError::Parse { .. })));
        assert!(matches!(normalize_user_input("ten"), Err(AmountError::Parse { .. })));
        assert!(matches!(normalize_user_input("inf"), Err(AmountError::NonFinite { .. })));
        assert!(matches!(normalize_user_input("NaN"), Err(AmountError::NonFinite { .. })));
        assert!(matches!(normalize_user_input("-1"), Err(AmountError::Negative { .. })));
        assert!(matches!(normalize_user_input("1e300"), Err(AmountError::Overflow { .. })));
    }

    #[test]
    fn custom_precision_applies_to_both_paths() {
        let normalizer = Normalizer::new(2).unwrap();
        assert_eq!(normalizer.decimal_string("1.239").unwrap().raw(), U256::from(123u64));
        assert_eq!(normalizer.user_input("1.5").unwrap().raw(), U256::from(150u64));
        assert_eq!(normalizer.user_input("1.5").unwrap().decimals(), 2);
    }

    #[test]
    fn rejects_unsupported_precision() {
        assert!(matches!(Normalizer::new(200), Err(AmountError::UnsupportedPrecision { .. })));
    }
}
