//! Input policies applied before any mutation touches the store.

use ledger_core::{CENT_SCALE, DomainError, DomainResult, Money};

/// Amount policy: at most two fractional digits.
///
/// Purely syntactic. Sign and magnitude are not inspected here; callers that
/// need a positive amount check it themselves.
pub fn validate_amount(amount: Money) -> DomainResult<()> {
    if amount.scale() > CENT_SCALE {
        return Err(DomainError::invalid_amount(amount.to_string()));
    }
    Ok(())
}

/// Name policy: letters, ASCII digits, spaces, underscores and hyphens only.
pub fn validate_name(name: &str) -> DomainResult<()> {
    if name.is_empty() || !name.chars().all(is_name_char) {
        return Err(DomainError::invalid_name(name));
    }
    Ok(())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_alphabetic() || matches!(c, '_' | ' ' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn cent_amounts_pass() {
        assert!(validate_amount(money("12.34")).is_ok());
        assert!(validate_amount(money("12")).is_ok());
        assert!(validate_amount(Money::new(Decimal::ZERO)).is_ok());
    }

    #[test]
    fn sign_is_not_inspected() {
        assert!(validate_amount(money("-12.34")).is_ok());
    }

    #[test]
    fn large_integral_amounts_pass() {
        assert!(validate_amount(Money::new(Decimal::from(i64::MAX))).is_ok());
        assert!(validate_amount(Money::new(Decimal::MAX)).is_ok());
    }

    #[test]
    fn cent_fractions_fail() {
        let err = validate_amount(money("12.345")).unwrap_err();
        assert_eq!(err, DomainError::InvalidAmount("12.345".to_string()));
    }

    #[test]
    fn trailing_zero_beyond_cents_fails() {
        assert!(validate_amount(Money::new(dec!(12.340))).is_err());
    }

    #[test]
    fn scientific_notation_with_small_exponent_fails() {
        assert!(validate_amount(money("1.23e-4")).is_err());
    }

    #[test]
    fn plain_names_pass() {
        assert!(validate_name("Aleksandra Magura-Witkowska").is_ok());
        assert!(validate_name("secret_agent_007").is_ok());
    }

    #[test]
    fn unicode_letters_pass() {
        assert!(validate_name("Ąłękśądrą").is_ok());
    }

    #[test]
    fn injection_attempt_fails() {
        let err = validate_name("h4ck3r' OR 1 == 1;").unwrap_err();
        assert!(matches!(err, DomainError::InvalidName(_)));
    }

    #[test]
    fn empty_name_fails() {
        assert!(validate_name("").is_err());
    }

    proptest! {
        #[test]
        fn amounts_with_more_than_two_digits_always_fail(
            mantissa in -1_000_000_000i64..1_000_000_000i64,
            scale in 3u32..10u32,
        ) {
            let mut value = Decimal::new(mantissa, 0);
            value.rescale(scale);
            prop_assert!(validate_amount(Money::new(value)).is_err());
        }

        #[test]
        fn amounts_with_at_most_two_digits_always_pass(
            mantissa in any::<i64>(),
            scale in 0u32..=2u32,
        ) {
            prop_assert!(validate_amount(Money::new(Decimal::new(mantissa, scale))).is_ok());
        }

        #[test]
        fn names_from_allowed_alphabet_pass(name in "[A-Za-z0-9_ -]{1,40}") {
            prop_assert!(validate_name(&name).is_ok());
        }
    }
}
