//! Money value object.

use super::errors::ValidationError;
use crate::formatter::currency::{format_amount, normalized_amount};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A non-negative amount parsed from currency input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Mask `raw` as a currency amount and parse the result.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidAmount` when no digits survive masking.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let result = format_amount(raw);
        let invalid = || ValidationError::InvalidAmount(raw.to_string());

        if !result.is_valid {
            return Err(invalid());
        }

        let text = normalized_amount(&result.formatted_value).ok_or_else(invalid)?;
        let value = Decimal::from_str(&text).map_err(|_| invalid())?;
        Ok(Self(value))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repairs_separators() {
        let money = Money::parse("12.34.56").unwrap();
        assert_eq!(money.amount(), Decimal::from_str("12.3456").unwrap());
    }

    #[test]
    fn test_parse_leading_separator() {
        assert_eq!(
            Money::parse(".5").unwrap().amount(),
            Decimal::from_str("0.5").unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("abc").is_err());
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Money::parse("1250").unwrap().to_string(), "1250.00");
        assert_eq!(Money::zero().to_string(), "0.00");
    }
}
