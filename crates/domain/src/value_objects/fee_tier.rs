//! Pool fee tiers and the fixed set of tiers accepted when matching pools.

use crate::error::DomainError;
use crate::value_objects::percentage::Percentage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Pool fee tier in hundredths of a basis point (`3000` is `0.3%`).
///
/// Values outside [`FeeTier::SUPPORTED`] can still be represented, since the
/// indexing service may report them; they are simply never matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(u32);

impl FeeTier {
    /// 0.01%.
    pub const LOWEST: Self = Self(100);
    /// 0.05%.
    pub const LOW: Self = Self(500);
    /// 0.3%.
    pub const MEDIUM: Self = Self(3000);
    /// 1%.
    pub const HIGH: Self = Self(10_000);

    /// Every tier a request may ask for.
    pub const SUPPORTED: [Self; 4] = [Self::LOWEST, Self::LOW, Self::MEDIUM, Self::HIGH];

    /// Wraps a raw fee tier exactly as reported by the server.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Creates a fee tier, rejecting values outside the supported set.
    pub fn supported(value: u32) -> Result<Self, DomainError> {
        let tier = Self(value);
        if tier.is_supported() {
            Ok(tier)
        } else {
            Err(DomainError::UnsupportedFeeTier(value))
        }
    }

    /// Raw value in hundredths of a basis point.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn is_supported(self) -> bool {
        Self::SUPPORTED.contains(&self)
    }

    /// The tier as a fraction of the traded amount.
    #[must_use]
    pub fn percentage(self) -> Percentage {
        Percentage::from_hundredths_of_bip(self.0)
    }

    /// Display label such as `"0.05%"`.
    ///
    /// Labels of supported tiers have the same width, so ordering labels as
    /// strings orders them by tier.
    #[must_use]
    pub fn label(self) -> String {
        self.percentage().to_string()
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.percentage())
    }
}

/// A non-empty set of supported fee tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTierSet(BTreeSet<FeeTier>);

impl FeeTierSet {
    /// Builds a set from raw values; every value must be a supported tier.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Result<Self, DomainError> {
        let tiers = values
            .into_iter()
            .map(FeeTier::supported)
            .collect::<Result<BTreeSet<_>, _>>()?;
        if tiers.is_empty() {
            return Err(DomainError::NoFeeTiers);
        }
        Ok(Self(tiers))
    }

    /// All supported tiers.
    #[must_use]
    pub fn all() -> Self {
        Self(FeeTier::SUPPORTED.into_iter().collect())
    }

    /// A set holding a single tier.
    #[must_use]
    pub fn single(tier: FeeTier) -> Self {
        Self(BTreeSet::from([tier]))
    }

    #[must_use]
    pub fn contains(&self, tier: FeeTier) -> bool {
        self.0.contains(&tier)
    }

    /// Iterates tiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = FeeTier> + '_ {
        self.0.iter().copied()
    }
}

impl Default for FeeTierSet {
    fn default() -> Self {
        Self::single(FeeTier::MEDIUM)
    }
}
