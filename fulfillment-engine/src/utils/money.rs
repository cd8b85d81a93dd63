//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as `f64` in the record store; sums and averages go
//! through `Decimal` internally and are rounded to 2 decimal places
//! (half-up) before being converted back for the caller.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert an `f64` amount to `Decimal`. Non-finite inputs collapse to 0.
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Convert a `Decimal` back to `f64`, rounded to 2 dp.
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp(DECIMAL_PLACES)
        .to_f64()
        .unwrap_or(0.0)
}

/// Sum a sequence of `f64` amounts precisely.
pub fn sum_amounts<I: IntoIterator<Item = f64>>(amounts: I) -> Decimal {
    amounts.into_iter().map(to_decimal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_avoids_float_drift() {
        // 0.1 + 0.2 != 0.3 in f64; it does through Decimal
        let total = to_f64(sum_amounts([0.1, 0.2]));
        assert_eq!(total, 0.3);
    }

    #[test]
    fn test_non_finite_collapses_to_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }
}
