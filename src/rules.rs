//! Calculation rules
//!
//! One variant per known incentive kind. Each variant carries only the rebate
//! fields its rule reads; the product and volume are supplied on application.

use rust_decimal::Decimal;

use crate::{
    calculator::{CalculateRebateResult, CalculatorError},
    incentives::IncentiveType,
    products::Product,
    rebates::Rebate,
};

/// A rebate's calculation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Pay `amount` once, regardless of volume.
    FixedCashAmount {
        /// Rebate amount
        amount: Decimal,
    },

    /// Pay `price * percentage * volume`.
    FixedRateRebate {
        /// Rebate percentage, applied verbatim
        percentage: Decimal,
    },

    /// Pay `amount * volume`.
    AmountPerUom {
        /// Rebate amount per unit
        amount: Decimal,
    },
}

impl Rule {
    /// Select the rule for a rebate's incentive kind.
    ///
    /// Returns `None` for [`IncentiveType::Unrecognized`].
    pub fn for_rebate(rebate: &Rebate) -> Option<Self> {
        match rebate.incentive {
            IncentiveType::FixedCashAmount => Some(Rule::FixedCashAmount {
                amount: rebate.amount,
            }),
            IncentiveType::FixedRateRebate => Some(Rule::FixedRateRebate {
                percentage: rebate.percentage,
            }),
            IncentiveType::AmountPerUom => Some(Rule::AmountPerUom {
                amount: rebate.amount,
            }),
            IncentiveType::Unrecognized => None,
        }
    }

    /// Incentive kind this rule implements.
    pub fn incentive(&self) -> IncentiveType {
        match self {
            Rule::FixedCashAmount { .. } => IncentiveType::FixedCashAmount,
            Rule::FixedRateRebate { .. } => IncentiveType::FixedRateRebate,
            Rule::AmountPerUom { .. } => IncentiveType::AmountPerUom,
        }
    }

    /// Whether the rule can be applied to `product` at `volume`.
    ///
    /// The product must support the rule's incentive kind, and every value
    /// the rule multiplies must be non-zero.
    pub fn is_applicable(&self, product: &Product, volume: Decimal) -> bool {
        if !product.supports(self.incentive()) {
            return false;
        }

        match self {
            Rule::FixedCashAmount { amount } => !amount.is_zero(),
            Rule::FixedRateRebate { percentage } => {
                !percentage.is_zero() && !product.price.is_zero() && !volume.is_zero()
            }
            Rule::AmountPerUom { amount } => !amount.is_zero() && !volume.is_zero(),
        }
    }

    /// Apply the rule, producing a failed result when it is not applicable.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::AmountOverflow`] if the rebate amount cannot
    /// be represented as a [`Decimal`].
    pub fn apply(
        &self,
        product: &Product,
        volume: Decimal,
    ) -> Result<CalculateRebateResult, CalculatorError> {
        if !self.is_applicable(product, volume) {
            return Ok(CalculateRebateResult::failure());
        }

        let amount = match self {
            Rule::FixedCashAmount { amount } => Some(*amount),
            Rule::FixedRateRebate { percentage } => product
                .price
                .checked_mul(*percentage)
                .and_then(|amount| amount.checked_mul(volume)),
            Rule::AmountPerUom { amount } => amount.checked_mul(volume),
        };

        let amount = amount.ok_or(CalculatorError::AmountOverflow {
            incentive: self.incentive(),
        })?;

        Ok(CalculateRebateResult::success(amount))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(incentive: IncentiveType, price: Decimal) -> Product {
        Product::new("product", incentive).with_price(price)
    }

    #[test]
    fn for_rebate_selects_rule_by_incentive() {
        let rebate = Rebate::new("r", IncentiveType::FixedRateRebate)
            .with_amount(Decimal::ONE)
            .with_percentage(Decimal::TEN);

        assert_eq!(
            Rule::for_rebate(&rebate),
            Some(Rule::FixedRateRebate {
                percentage: Decimal::TEN
            })
        );

        let rebate = Rebate::new("r", IncentiveType::Unrecognized).with_amount(Decimal::ONE);

        assert_eq!(Rule::for_rebate(&rebate), None);
    }

    #[test]
    fn fixed_cash_amount_ignores_volume_and_price() -> TestResult {
        let rule = Rule::FixedCashAmount {
            amount: Decimal::new(1250, 2),
        };

        let result = rule.apply(
            &product(IncentiveType::FixedCashAmount, Decimal::ZERO),
            Decimal::ZERO,
        )?;

        assert_eq!(result, CalculateRebateResult::success(Decimal::new(1250, 2)));

        Ok(())
    }

    #[test]
    fn fixed_rate_rebate_multiplies_price_percentage_and_volume() -> TestResult {
        let rule = Rule::FixedRateRebate {
            percentage: Decimal::new(15, 2),
        };

        let result = rule.apply(
            &product(IncentiveType::FixedRateRebate, Decimal::new(1999, 2)),
            Decimal::from(3),
        )?;

        // 19.99 * 0.15 * 3, unrounded
        assert_eq!(result.rebate_amount(), Decimal::new(89_955, 4));
        assert!(result.is_success());

        Ok(())
    }

    #[test]
    fn fixed_rate_rebate_requires_every_factor() -> TestResult {
        let rule = Rule::FixedRateRebate {
            percentage: Decimal::TEN,
        };
        let priced = product(IncentiveType::FixedRateRebate, Decimal::TEN);
        let free = product(IncentiveType::FixedRateRebate, Decimal::ZERO);

        assert_eq!(
            rule.apply(&priced, Decimal::ZERO)?,
            CalculateRebateResult::failure()
        );
        assert_eq!(
            rule.apply(&free, Decimal::ONE)?,
            CalculateRebateResult::failure()
        );

        let zero_percent = Rule::FixedRateRebate {
            percentage: Decimal::ZERO,
        };

        assert_eq!(
            zero_percent.apply(&priced, Decimal::ONE)?,
            CalculateRebateResult::failure()
        );

        Ok(())
    }

    #[test]
    fn amount_per_uom_multiplies_amount_and_volume() -> TestResult {
        let rule = Rule::AmountPerUom {
            amount: Decimal::new(25, 2),
        };

        let result = rule.apply(
            &product(IncentiveType::AmountPerUom, Decimal::ZERO),
            Decimal::new(125, 1),
        )?;

        assert_eq!(result, CalculateRebateResult::success(Decimal::new(3125, 3)));

        Ok(())
    }

    #[test]
    fn amount_per_uom_requires_amount_and_volume() {
        let supported = product(IncentiveType::AmountPerUom, Decimal::TEN);

        assert!(!Rule::AmountPerUom {
            amount: Decimal::ZERO
        }
        .is_applicable(&supported, Decimal::ONE));

        assert!(!Rule::AmountPerUom {
            amount: Decimal::ONE
        }
        .is_applicable(&supported, Decimal::ZERO));
    }

    #[test]
    fn rules_require_product_support() {
        let unsupported = product(IncentiveType::FixedRateRebate, Decimal::TEN);

        let rule = Rule::FixedCashAmount {
            amount: Decimal::ONE,
        };

        assert!(!rule.is_applicable(&unsupported, Decimal::ONE));

        let rule = Rule::AmountPerUom {
            amount: Decimal::ONE,
        };

        assert!(!rule.is_applicable(&unsupported, Decimal::ONE));
    }

    #[test]
    fn overflowing_amount_is_an_error() {
        let rule = Rule::AmountPerUom {
            amount: Decimal::MAX,
        };

        let result = rule.apply(
            &product(IncentiveType::AmountPerUom, Decimal::ZERO),
            Decimal::TEN,
        );

        assert!(matches!(
            result,
            Err(CalculatorError::AmountOverflow {
                incentive: IncentiveType::AmountPerUom
            })
        ));
    }
}
