//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront sells in a single currency (USD), so a [`Price`] is just a
//! decimal amount in dollars. It travels over the wire as a JSON number
//! (`29.99`) to stay compatible with the existing API, but all arithmetic is
//! done in [`Decimal`] so cart totals never accumulate float drift.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A non-currency-tagged amount in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    ///
    /// ```
    /// use fashion_cube_core::Price;
    ///
    /// assert_eq!(Price::from_cents(2999).to_string(), "$29.99");
    /// ```
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Whether this price is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Round half away from zero to whole cents.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiply by a line-item quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Scale by a ratio expressed in basis points (1/10000), rounded to cents.
    ///
    /// `Price::from_cents(10000).scale_bps(7500)` is `$75.00`.
    #[must_use]
    pub fn scale_bps(self, basis_points: u32) -> Self {
        Self(self.0 * Decimal::new(i64::from(basis_points), 4)).round_to_cents()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_json_number() {
        let price = Price::from_cents(2999);
        assert_eq!(serde_json::to_string(&price).unwrap(), "29.99");
    }

    #[test]
    fn test_deserializes_numbers_and_integers() {
        let price: Price = serde_json::from_str("79.99").unwrap();
        assert_eq!(price, Price::from_cents(7999));
        let price: Price = serde_json::from_str("100").unwrap();
        assert_eq!(price, Price::from_cents(10000));
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_cents(1050).times(2), Price::from_cents(99)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(2199));
    }

    #[test]
    fn test_scale_bps_rounds_half_away_from_zero() {
        // 0.05 * 0.5 = 0.025 -> 0.03
        assert_eq!(Price::from_cents(5).scale_bps(5000), Price::from_cents(3));
        assert_eq!(Price::from_cents(10000).scale_bps(7500), Price::from_cents(7500));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::ZERO.to_string(), "$0.00");
        assert_eq!(Price::from_cents(150).to_string(), "$1.50");
    }
}
