//! Peso prices with display-string normalization.
//!
//! Product documents in the hosted store carry prices in whatever shape the
//! page that wrote them used: a number, `"170"`, `"₱170.00"`, `"1,250.50"`.
//! [`Price::parse`] is the single normalization point; anything that cannot
//! be normalized to a positive decimal is rejected, which is what keeps a
//! zero-cost order from being created silently at checkout.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty after stripping formatting.
    #[error("price cannot be empty")]
    Empty,
    /// The input does not parse as a decimal number.
    #[error("price is not a number: {0:?}")]
    NotNumeric(String),
    /// The parsed amount is zero or negative.
    #[error("price must be greater than zero (got {0})")]
    NotPositive(Decimal),
}

/// A unit price in Philippine pesos.
///
/// Stored as a [`Decimal`] rounded to two decimal places. Arithmetic on
/// prices never goes through floating point.
///
/// ## Examples
///
/// ```
/// use tindahan_core::Price;
///
/// let price = Price::parse("₱170.00").unwrap();
/// assert_eq!(price.to_string(), "₱170.00");
///
/// assert!(Price::parse("1,250.50").is_ok());
/// assert!(Price::parse("free").is_err());
/// assert!(Price::parse("0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Parse a `Price` from a display string or raw number string.
    ///
    /// Strips currency symbols (`₱`, `P`, `PHP`), thousands separators, and
    /// surrounding whitespace, then parses the remainder as a decimal and
    /// rounds to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, non-numeric, or not strictly
    /// positive.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let cleaned: String = s
            .trim()
            .trim_start_matches("PHP")
            .trim_start_matches("Php")
            .trim_start_matches('₱')
            .trim_start_matches('P')
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        if cleaned.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount: Decimal = cleaned
            .parse()
            .map_err(|_| PriceError::NotNumeric(s.to_owned()))?;

        Self::from_amount(amount)
    }

    /// Create a `Price` from an already-numeric amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] if the amount is zero or negative.
    pub fn from_amount(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive(amount));
        }
        Ok(Self(amount.round_dp(2)))
    }

    /// The amount in pesos.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for `quantity` units of this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₱{:.2}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        let price = Price::parse("170").unwrap();
        assert_eq!(price.amount(), Decimal::new(170, 0));
    }

    #[test]
    fn test_parse_peso_sign() {
        let price = Price::parse("₱170.00").unwrap();
        assert_eq!(price.amount(), Decimal::new(17000, 2));
    }

    #[test]
    fn test_parse_thousands_separator() {
        let price = Price::parse("1,250.50").unwrap();
        assert_eq!(price.amount(), Decimal::new(125050, 2));
    }

    #[test]
    fn test_parse_php_prefix_and_whitespace() {
        let price = Price::parse("  PHP 499.99 ").unwrap();
        assert_eq!(price.amount(), Decimal::new(49999, 2));
    }

    #[test]
    fn test_parse_non_numeric() {
        assert!(matches!(
            Price::parse("free"),
            Err(PriceError::NotNumeric(_))
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
        assert_eq!(Price::parse("₱"), Err(PriceError::Empty));
    }

    #[test]
    fn test_parse_zero_rejected() {
        assert!(matches!(
            Price::parse("0.00"),
            Err(PriceError::NotPositive(_))
        ));
    }

    #[test]
    fn test_parse_negative_rejected() {
        assert!(matches!(
            Price::parse("-5"),
            Err(PriceError::NotPositive(_))
        ));
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let price = Price::parse("10.005").unwrap();
        assert_eq!(price.amount(), Decimal::new(1000, 2));
    }

    #[test]
    fn test_times_quantity() {
        let price = Price::parse("170").unwrap();
        assert_eq!(price.times(2), Decimal::new(340, 0));
    }

    #[test]
    fn test_display() {
        let price = Price::parse("170").unwrap();
        assert_eq!(price.to_string(), "₱170.00");
    }
}
