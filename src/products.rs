//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::incentives::{IncentiveType, SupportedIncentives};

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub identifier: String,

    /// Incentive kinds this product can be rebated with
    pub supported_incentives: SupportedIncentives,

    /// Unit price, in currency units
    pub price: Decimal,
}

impl Product {
    /// Create a product with a zero price.
    pub fn new(
        identifier: impl Into<String>,
        supported_incentives: impl Into<SupportedIncentives>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            supported_incentives: supported_incentives.into(),
            price: Decimal::ZERO,
        }
    }

    /// Set the unit price.
    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Whether rebates of the given kind may be applied to this product.
    pub fn supports(&self, incentive: IncentiveType) -> bool {
        self.supported_incentives.supports(incentive)
    }
}
