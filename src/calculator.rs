//! Rebate calculator

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Span, debug, info, warn};

use crate::{
    incentives::IncentiveType,
    rules::Rule,
    stores::{ProductLookup, RebateLookup, ResultStore, StoreError},
};

/// Errors that can occur while calculating a rebate.
///
/// Missing entities and inapplicable rebates are not errors; they produce a
/// failed [`CalculateRebateResult`].
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// A collaborator store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The calculated amount does not fit in a `Decimal`.
    #[error("rebate amount overflowed for {incentive} rebate")]
    AmountOverflow {
        /// Incentive kind of the overflowing rule
        incentive: IncentiveType,
    },
}

/// Request to calculate a rebate for a volume of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateRebateRequest {
    /// Rebate to apply
    pub rebate_identifier: String,

    /// Product being transacted
    pub product_identifier: String,

    /// Number of product units transacted
    pub volume: Decimal,
}

impl CalculateRebateRequest {
    /// Create a new request.
    pub fn new(
        rebate_identifier: impl Into<String>,
        product_identifier: impl Into<String>,
        volume: Decimal,
    ) -> Self {
        Self {
            rebate_identifier: rebate_identifier.into(),
            product_identifier: product_identifier.into(),
            volume,
        }
    }
}

/// Outcome of a rebate calculation.
///
/// A failed result always carries a zero amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CalculateRebateResult {
    success: bool,
    rebate_amount: Decimal,
}

impl CalculateRebateResult {
    /// A successful calculation of `amount`.
    pub fn success(amount: Decimal) -> Self {
        Self {
            success: true,
            rebate_amount: amount,
        }
    }

    /// A failed calculation.
    pub fn failure() -> Self {
        Self {
            success: false,
            rebate_amount: Decimal::ZERO,
        }
    }

    /// Whether a rebate amount was calculated.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Calculated amount, zero on failure.
    pub fn rebate_amount(&self) -> Decimal {
        self.rebate_amount
    }
}

/// Calculates rebates using lookups for rebates and products, recording
/// successful calculations in a result store.
#[derive(Debug, Clone)]
pub struct RebateCalculator<R, P, S> {
    rebates: R,
    products: P,
    results: S,
}

impl<R, P, S> RebateCalculator<R, P, S>
where
    R: RebateLookup,
    P: ProductLookup,
    S: ResultStore,
{
    /// Create a calculator over the given collaborators.
    pub fn new(rebates: R, products: P, results: S) -> Self {
        Self {
            rebates,
            products,
            results,
        }
    }

    /// Rebate lookup
    pub fn rebates(&self) -> &R {
        &self.rebates
    }

    /// Product lookup
    pub fn products(&self) -> &P {
        &self.products
    }

    /// Result store
    pub fn results(&self) -> &S {
        &self.results
    }

    /// Calculate the rebate for a request.
    ///
    /// Returns a failed result without further lookups as soon as the request
    /// is absent, the rebate is unknown, or the product is unknown. Otherwise
    /// the rebate's incentive kind selects the rule to apply; successful
    /// results are written to the result store exactly once.
    ///
    /// # Errors
    ///
    /// - [`CalculatorError::Store`]: a lookup or the result store failed.
    /// - [`CalculatorError::AmountOverflow`]: the amount cannot be represented.
    #[tracing::instrument(
        name = "rebates.calculator.calculate",
        skip(self, request),
        fields(
            rebate_identifier = tracing::field::Empty,
            product_identifier = tracing::field::Empty,
            volume = tracing::field::Empty,
            incentive = tracing::field::Empty
        ),
        err
    )]
    pub fn calculate(
        &self,
        request: Option<&CalculateRebateRequest>,
    ) -> Result<CalculateRebateResult, CalculatorError> {
        let Some(request) = request else {
            debug!("no request provided");

            return Ok(CalculateRebateResult::failure());
        };

        let span = Span::current();

        span.record(
            "rebate_identifier",
            tracing::field::display(&request.rebate_identifier),
        );

        span.record(
            "product_identifier",
            tracing::field::display(&request.product_identifier),
        );

        span.record("volume", tracing::field::display(request.volume));

        let Some(rebate) = self.rebates.get_rebate(&request.rebate_identifier)? else {
            debug!("rebate not found");

            return Ok(CalculateRebateResult::failure());
        };

        let Some(product) = self.products.get_product(&request.product_identifier)? else {
            debug!("product not found");

            return Ok(CalculateRebateResult::failure());
        };

        span.record("incentive", tracing::field::display(rebate.incentive));

        let Some(rule) = Rule::for_rebate(&rebate) else {
            warn!("unrecognized incentive type");

            return Ok(CalculateRebateResult::failure());
        };

        let result = rule.apply(&product, request.volume)?;

        if result.is_success() {
            self.results
                .store_calculation_result(&rebate, result.rebate_amount())?;

            info!(amount = %result.rebate_amount(), "calculated rebate");
        } else {
            debug!("rebate not applicable to product and volume");
        }

        Ok(result)
    }
}
