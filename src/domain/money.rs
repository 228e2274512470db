//! Monetary type for exact revenue arithmetic.

use rust_decimal::Decimal;

/// Money represented as a Decimal for precision. All sums and averages in
/// the aggregation engine use this type so repeated runs produce identical
/// totals.
pub type Money = Decimal;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_sums_are_exact() {
        let total: Money = [dec!(0.1), dec!(0.2), dec!(0.3)]
            .into_iter()
            .sum();
        assert_eq!(total, dec!(0.6));
    }
}
