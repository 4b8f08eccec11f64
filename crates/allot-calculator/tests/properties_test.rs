use allot_calculator::{
    ContractCounters, compute_allocation, format_for_display, normalize_decimal_string,
};
use allot_types::U256;
use proptest::prelude::*;

proptest! {
    #[test]
    fn integer_strings_normalize_exactly(n in any::<u128>()) {
        let amount = normalize_decimal_string(&n.to_string()).unwrap();
        prop_assert_eq!(amount.raw(), U256::from(n));
    }

    #[test]
    fn long_fractions_truncate_to_six_digits(whole in any::<u64>(), fraction in "[0-9]{7,20}") {
        let amount = normalize_decimal_string(&format!("{whole}.{fraction}")).unwrap();

        let kept: u64 = fraction[..6].parse().unwrap();
        let expected = U256::from(whole) * U256::from(1_000_000u64) + U256::from(kept);
        prop_assert_eq!(amount.raw(), expected);
    }

    #[test]
    fn display_round_trips_short_fractions(whole in any::<u64>(), fraction in "[0-9]{0,6}") {
        let input = format!("{whole}.{fraction}");
        let trimmed = fraction.trim_end_matches('0');
        let expected = if trimmed.is_empty() { whole.to_string() } else { format!("{whole}.{trimmed}") };

        let amount = normalize_decimal_string(&input).unwrap();
        prop_assert_eq!(format_for_display(&amount.to_string()), expected);
    }

    #[test]
    fn integer_strings_display_as_scaled_values(n in any::<u64>()) {
        let amount = normalize_decimal_string(&n.to_string()).unwrap();

        let whole = n / 1_000_000;
        let fraction = format!("{:06}", n % 1_000_000);
        let fraction = fraction.trim_end_matches('0');
        let expected = if fraction.is_empty() { whole.to_string() } else { format!("{whole}.{fraction}") };
        prop_assert_eq!(format_for_display(&amount.to_string()), expected);
    }

    #[test]
    fn used_up_balance_always_yields_zero(
        allocation in any::<u64>(),
        reserved in any::<u64>(),
        input in 0u32..1_000_000,
    ) {
        let counters = ContractCounters::new(
            allocation.to_string(),
            reserved.to_string(),
            reserved.to_string(),
        );
        prop_assert_eq!(compute_allocation(&input.to_string(), &counters), "0");
    }

    #[test]
    fn oversubscribed_sales_never_exceed_the_contribution(
        allocation in 1u64..,
        extra in any::<u32>(),
        input in 0u32..1_000_000,
    ) {
        let balance = u128::from(allocation) + u128::from(extra);
        let counters = ContractCounters::new(allocation.to_string(), balance.to_string(), "0");

        let result: u128 = compute_allocation(&input.to_string(), &counters).parse().unwrap();
        prop_assert!(result <= u128::from(input) * 1_000_000);
    }
}
