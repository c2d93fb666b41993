use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fraction expressed as a decimal, e.g. `0.0005` for five basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    /// Builds a percentage from hundredths of a basis point, the unit pool
    /// fee tiers are quoted in (`500` is `0.05%`).
    pub fn from_hundredths_of_bip(value: u32) -> Self {
        Self(Decimal::new(i64::from(value), 6))
    }

    /// Value in percent points (`0.0005` becomes `0.05`).
    pub fn as_percent(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_hundredths_of_bip() {
        assert_eq!(Percentage::from_hundredths_of_bip(500).0, dec!(0.0005));
        assert_eq!(Percentage::from_hundredths_of_bip(500).as_percent(), dec!(0.05));
    }

    #[test]
    fn test_display_uses_two_decimals() {
        assert_eq!(Percentage::from_hundredths_of_bip(100).to_string(), "0.01%");
        assert_eq!(Percentage::from_hundredths_of_bip(3000).to_string(), "0.30%");
        assert_eq!(Percentage::from_hundredths_of_bip(10_000).to_string(), "1.00%");
    }
}
