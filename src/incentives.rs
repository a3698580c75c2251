//! Incentives

use std::{fmt, ops::BitOr};

use serde::{Deserialize, Serialize};

/// The calculation strategy a rebate uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncentiveType {
    /// Pay the rebate amount verbatim.
    FixedCashAmount,

    /// Pay `price * percentage * volume`.
    FixedRateRebate,

    /// Pay the rebate amount for every unit of volume.
    AmountPerUom,

    /// Any incentive name this version does not know about.
    #[serde(other)]
    Unrecognized,
}

impl IncentiveType {
    /// The three incentive kinds that have a calculation rule.
    pub const KNOWN: [IncentiveType; 3] = [
        IncentiveType::FixedCashAmount,
        IncentiveType::FixedRateRebate,
        IncentiveType::AmountPerUom,
    ];

    /// Incentive name as used in fixtures and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            IncentiveType::FixedCashAmount => "FixedCashAmount",
            IncentiveType::FixedRateRebate => "FixedRateRebate",
            IncentiveType::AmountPerUom => "AmountPerUom",
            IncentiveType::Unrecognized => "Unrecognized",
        }
    }

    fn bit(self) -> u8 {
        match self {
            IncentiveType::FixedCashAmount => 1,
            IncentiveType::FixedRateRebate => 1 << 1,
            IncentiveType::AmountPerUom => 1 << 2,
            IncentiveType::Unrecognized => 0,
        }
    }
}

impl fmt::Display for IncentiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of incentive kinds a product can be rebated with.
///
/// `Unrecognized` never occupies a bit, so it is never supported.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<IncentiveType>", into = "Vec<IncentiveType>")]
pub struct SupportedIncentives(u8);

impl SupportedIncentives {
    /// No supported incentives.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every known incentive.
    pub fn all() -> Self {
        IncentiveType::KNOWN.into_iter().collect()
    }

    /// Add an incentive to the set.
    pub fn insert(&mut self, incentive: IncentiveType) {
        self.0 |= incentive.bit();
    }

    /// Whether the set includes `incentive`.
    pub fn supports(self, incentive: IncentiveType) -> bool {
        let bit = incentive.bit();

        bit != 0 && self.0 & bit == bit
    }

    /// Whether the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the supported incentives in declaration order.
    pub fn iter(self) -> impl Iterator<Item = IncentiveType> {
        IncentiveType::KNOWN
            .into_iter()
            .filter(move |incentive| self.supports(*incentive))
    }
}

impl fmt::Debug for SupportedIncentives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl From<IncentiveType> for SupportedIncentives {
    fn from(incentive: IncentiveType) -> Self {
        Self(incentive.bit())
    }
}

impl BitOr for SupportedIncentives {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<IncentiveType> for SupportedIncentives {
    type Output = Self;

    fn bitor(self, rhs: IncentiveType) -> Self::Output {
        Self(self.0 | rhs.bit())
    }
}

impl BitOr for IncentiveType {
    type Output = SupportedIncentives;

    fn bitor(self, rhs: Self) -> Self::Output {
        SupportedIncentives(self.bit() | rhs.bit())
    }
}

impl FromIterator<IncentiveType> for SupportedIncentives {
    fn from_iter<I: IntoIterator<Item = IncentiveType>>(iter: I) -> Self {
        let mut set = Self::empty();

        for incentive in iter {
            set.insert(incentive);
        }

        set
    }
}

impl From<Vec<IncentiveType>> for SupportedIncentives {
    fn from(incentives: Vec<IncentiveType>) -> Self {
        incentives.into_iter().collect()
    }
}

impl From<SupportedIncentives> for Vec<IncentiveType> {
    fn from(set: SupportedIncentives) -> Self {
        set.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn single_incentive_supports_only_itself() {
        let set = SupportedIncentives::from(IncentiveType::FixedRateRebate);

        assert!(set.supports(IncentiveType::FixedRateRebate));
        assert!(!set.supports(IncentiveType::FixedCashAmount));
        assert!(!set.supports(IncentiveType::AmountPerUom));
    }

    #[test]
    fn combined_set_supports_each_member() {
        let set = IncentiveType::FixedCashAmount | IncentiveType::AmountPerUom;

        assert!(set.supports(IncentiveType::FixedCashAmount));
        assert!(set.supports(IncentiveType::AmountPerUom));
        assert!(!set.supports(IncentiveType::FixedRateRebate));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![IncentiveType::FixedCashAmount, IncentiveType::AmountPerUom]
        );
    }

    #[test]
    fn unrecognized_is_never_supported() {
        let set = SupportedIncentives::all() | IncentiveType::Unrecognized;

        assert!(!set.supports(IncentiveType::Unrecognized));
        assert_eq!(set, SupportedIncentives::all());
    }

    #[test]
    fn empty_set_supports_nothing() {
        let set = SupportedIncentives::empty();

        assert!(set.is_empty());
        assert!(IncentiveType::KNOWN.iter().all(|i| !set.supports(*i)));
    }

    #[test]
    fn deserializes_from_list_and_ignores_unknown_names() -> TestResult {
        let set: SupportedIncentives =
            serde_norway::from_str("[FixedCashAmount, TieredVolume, AmountPerUom]")?;

        assert_eq!(
            set,
            IncentiveType::FixedCashAmount | IncentiveType::AmountPerUom
        );

        Ok(())
    }

    #[test]
    fn unknown_incentive_name_deserializes_as_unrecognized() -> TestResult {
        let incentive: IncentiveType = serde_norway::from_str("TieredVolume")?;

        assert_eq!(incentive, IncentiveType::Unrecognized);

        Ok(())
    }
}
