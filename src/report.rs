//! Calculation report

use std::io;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::calculator::{CalculateRebateRequest, CalculateRebateResult};

/// Errors that can occur when rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Summed rebate amounts overflowed.
    #[error("total rebate amount overflowed")]
    TotalOverflow,

    /// An amount has no representation in the currency's minor units.
    #[error("amount {0} cannot be represented in minor units")]
    NotRepresentable(Decimal),

    /// Writing the report failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Requests and their outcomes, rendered as a table.
#[derive(Debug, Clone)]
pub struct CalculationReport {
    rows: Vec<(CalculateRebateRequest, CalculateRebateResult)>,
    currency: &'static Currency,
}

impl CalculationReport {
    /// Create an empty report displaying amounts in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            rows: Vec::new(),
            currency,
        }
    }

    /// Add a calculated request.
    pub fn push(&mut self, request: CalculateRebateRequest, result: CalculateRebateResult) {
        self.rows.push((request, result));
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of successful calculations
    pub fn successes(&self) -> usize {
        self.rows
            .iter()
            .filter(|(_, result)| result.is_success())
            .count()
    }

    /// Sum of all rebate amounts.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TotalOverflow`] if the sum cannot be represented.
    pub fn total(&self) -> Result<Decimal, ReportError> {
        self.rows
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, result)| {
                acc.checked_add(result.rebate_amount())
            })
            .ok_or(ReportError::TotalOverflow)
    }

    /// Render the table and summary to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be formatted or writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        builder.push_record(["Rebate", "Product", "Volume", "Outcome", "Amount"]);

        for (request, result) in &self.rows {
            let outcome = if result.is_success() {
                "calculated"
            } else {
                "not applicable"
            };

            builder.push_record([
                request.rebate_identifier.clone(),
                request.product_identifier.clone(),
                request.volume.normalize().to_string(),
                outcome.to_string(),
                self.format_amount(result.rebate_amount())?,
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..3), Alignment::right());
        table.modify(Columns::new(4..5), Alignment::right());

        writeln!(out, "\n{table}")?;
        writeln!(
            out,
            " Calculated: {} of {}",
            self.successes(),
            self.rows.len()
        )?;
        writeln!(out, " Total:      {}", self.format_amount(self.total()?)?)?;

        Ok(())
    }

    fn format_amount(&self, amount: Decimal) -> Result<String, ReportError> {
        let minor = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|value| value.to_i64())
            .ok_or(ReportError::NotRepresentable(amount))?;

        Ok(Money::from_minor(minor, self.currency).to_string())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn report() -> CalculationReport {
        let mut report = CalculationReport::new(GBP);

        report.push(
            CalculateRebateRequest::new("spring", "widget", Decimal::TEN),
            CalculateRebateResult::success(Decimal::ONE_HUNDRED),
        );

        report.push(
            CalculateRebateRequest::new("loyalty", "gadget", Decimal::ONE),
            CalculateRebateResult::failure(),
        );

        report.push(
            CalculateRebateRequest::new("bulk", "widget", Decimal::new(25, 1)),
            CalculateRebateResult::success(Decimal::new(1255, 2)),
        );

        report
    }

    #[test]
    fn totals_and_successes() -> TestResult {
        let report = report();

        assert_eq!(report.len(), 3);
        assert_eq!(report.successes(), 2);
        assert_eq!(report.total()?, Decimal::new(11255, 2));

        Ok(())
    }

    #[test]
    fn write_to_renders_rows_and_summary() -> TestResult {
        let mut out = Vec::new();

        report().write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("spring"));
        assert!(rendered.contains("not applicable"));
        assert!(rendered.contains("100.00"));
        assert!(rendered.contains("12.55"));
        assert!(rendered.contains("Calculated: 2 of 3"));
        assert!(rendered.contains("112.55"));

        Ok(())
    }

    #[test]
    fn total_overflow_is_reported() {
        let mut report = CalculationReport::new(GBP);

        for _ in 0..2 {
            report.push(
                CalculateRebateRequest::new("max", "widget", Decimal::ONE),
                CalculateRebateResult::success(Decimal::MAX),
            );
        }

        assert!(matches!(report.total(), Err(ReportError::TotalOverflow)));
    }

    #[test]
    fn empty_report_renders_zero_total() -> TestResult {
        let report = CalculationReport::new(GBP);
        let mut out = Vec::new();

        report.write_to(&mut out)?;

        assert!(report.is_empty());
        assert!(String::from_utf8(out)?.contains("Calculated: 0 of 0"));

        Ok(())
    }
}
