//! Rebate Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_decimal},
    incentives::IncentiveType,
    rebates::Rebate,
};

/// Wrapper for rebates in YAML
#[derive(Debug, Deserialize)]
pub struct RebatesFixture {
    /// Map of rebate identifier -> rebate fixture
    pub rebates: FxHashMap<String, RebateFixture>,
}

/// Rebate Fixture
#[derive(Debug, Deserialize)]
pub struct RebateFixture {
    /// Incentive name; unknown names load as [`IncentiveType::Unrecognized`]
    pub incentive: IncentiveType,

    /// Cash amount (e.g., "2.50"), zero when omitted
    pub amount: Option<String>,

    /// Percentage multiplier (e.g., "10"), zero when omitted
    pub percentage: Option<String>,
}

impl RebateFixture {
    /// Build the rebate stored under `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidDecimal`] if the amount or percentage is malformed.
    pub fn into_rebate(self, identifier: String) -> Result<Rebate, FixtureError> {
        Ok(Rebate {
            identifier,
            incentive: self.incentive,
            amount: parse_decimal("amount", self.amount.as_deref())?,
            percentage: parse_decimal("percentage", self.percentage.as_deref())?,
        })
    }
}
