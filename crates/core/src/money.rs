//! Fixed-point monetary quantity.
//!
//! `Money` wraps a base-10 decimal (96-bit mantissa + scale). It never goes
//! through floating point, so adding and subtracting amounts with at most two
//! fractional digits always yields a value with at most two fractional digits.

use core::ops::Neg;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Number of fractional digits balances are kept at.
pub const CENT_SCALE: u32 = 2;

/// A signed decimal amount of money.
///
/// Construction does not validate precision; that is the job of the amount
/// policy. Equality and ordering are by numeric value, so `1.5 == 1.50`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Zero, at cent scale (`0.00`).
    pub fn zero() -> Self {
        Self(Decimal::new(0, CENT_SCALE))
    }

    /// Build an amount from an integral number of cents (`1050` is `10.50`).
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, CENT_SCALE))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Number of fractional digits as written (`12.340` has scale 3).
    pub fn scale(&self) -> u32 {
        self.0.scale()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Same value written with exactly two fractional digits.
    ///
    /// Only meaningful for values whose scale is already at most two; larger
    /// scales are rounded half-even.
    pub fn at_cent_scale(self) -> Money {
        let mut value = self.0;
        if value.scale() > CENT_SCALE {
            value = value.round_dp(CENT_SCALE);
        }
        value.rescale(CENT_SCALE);
        Money(value)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl ValueObject for Money {}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parses plain (`12.34`) and scientific (`1.23e-4`) notation, keeping the
    /// scale exactly as written.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = if trimmed.contains(['e', 'E']) {
            Decimal::from_scientific(trimmed)
        } else {
            Decimal::from_str(trimmed)
        };
        parsed
            .map(Money)
            .map_err(|e| DomainError::invalid_amount(format!("{trimmed}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_keeps_written_scale() {
        assert_eq!("12.340".parse::<Money>().unwrap().scale(), 3);
        assert_eq!("12".parse::<Money>().unwrap().scale(), 0);
        assert_eq!("1.23e-4".parse::<Money>().unwrap().scale(), 6);
    }

    #[test]
    fn parse_rejects_non_numbers() {
        assert!(matches!(
            "ten".parse::<Money>(),
            Err(DomainError::InvalidAmount(_))
        ));
    }

    #[test]
    fn equality_ignores_trailing_zeros() {
        assert_eq!(Money::new(dec!(1.5)), Money::new(dec!(1.50)));
        assert_eq!(Money::from_cents(900), Money::new(dec!(9)));
    }

    #[test]
    fn cent_scale_pads_integral_values() {
        let money = Money::new(dec!(9)).at_cent_scale();
        assert_eq!(money.to_string(), "9.00");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(-1000)).unwrap();
        assert_eq!(json, "\"-10.00\"");
        let back: Money = serde_json::from_str("\"5.25\"").unwrap();
        assert_eq!(back, Money::from_cents(525));
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let max = Money::new(Decimal::MAX);
        assert!(max.checked_add(Money::from_cents(100)).is_none());
    }

    proptest! {
        #[test]
        fn sums_of_cent_amounts_stay_at_cent_precision(
            a in -1_000_000_000i64..1_000_000_000i64,
            b in -1_000_000_000i64..1_000_000_000i64,
        ) {
            let sum = Money::from_cents(a).checked_add(Money::from_cents(b)).unwrap();
            let diff = Money::from_cents(a).checked_sub(Money::from_cents(b)).unwrap();
            prop_assert!(sum.scale() <= CENT_SCALE);
            prop_assert!(diff.scale() <= CENT_SCALE);
            prop_assert_eq!(sum.at_cent_scale(), sum);
        }
    }
}
