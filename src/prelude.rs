//! Rebates prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calculator::{CalculateRebateRequest, CalculateRebateResult, CalculatorError, RebateCalculator},
    fixtures::{Fixture, FixtureError},
    incentives::{IncentiveType, SupportedIncentives},
    products::Product,
    rebates::Rebate,
    report::{CalculationReport, ReportError},
    rules::Rule,
    stores::{
        InMemoryProductStore, InMemoryRebateStore, ProductLookup, RebateLookup, ResultStore,
        StoreError, StoredCalculation,
    },
};
