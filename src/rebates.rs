//! Rebates

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::incentives::IncentiveType;

/// Rebate definition, keyed by its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebate {
    /// Unique rebate identifier
    pub identifier: String,

    /// Calculation strategy
    pub incentive: IncentiveType,

    /// Cash amount, in currency units
    pub amount: Decimal,

    /// Multiplier applied to the product price by fixed rate rebates.
    ///
    /// Used as given: a value of `10` multiplies the price by ten.
    pub percentage: Decimal,
}

impl Rebate {
    /// Create a rebate with zero amount and percentage.
    pub fn new(identifier: impl Into<String>, incentive: IncentiveType) -> Self {
        Self {
            identifier: identifier.into(),
            incentive,
            amount: Decimal::ZERO,
            percentage: Decimal::ZERO,
        }
    }

    /// Set the cash amount.
    #[must_use]
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Set the percentage multiplier.
    #[must_use]
    pub fn with_percentage(mut self, percentage: Decimal) -> Self {
        self.percentage = percentage;
        self
    }
}
