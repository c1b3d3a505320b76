use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::interest::{AccruedInterest, DayCountConvention};

/// engine for simple-interest accrual between two dates
#[derive(Debug, Clone, Copy, Default)]
pub struct AccrualEngine {
    pub convention: DayCountConvention,
}

impl AccrualEngine {
    pub fn new(convention: DayCountConvention) -> Self {
        Self { convention }
    }

    /// actual calendar days from start to end
    pub fn calculate_days(&self, start: NaiveDate, end: NaiveDate) -> Result<u32> {
        if end < start {
            return Err(CalculatorError::InvalidDateRange { start, end });
        }
        // a NaiveDate span always fits in u32 days
        Ok((end - start).num_days() as u32)
    }

    /// calculate simple interest (no compounding)
    pub fn calculate_simple_interest(&self, principal: Money, annual_rate: Rate, days: u32) -> Money {
        let year_basis = Decimal::from(self.convention.year_basis());
        let interest = principal.as_decimal() * annual_rate.as_decimal() * Decimal::from(days) / year_basis;
        Money::from_decimal(interest)
    }

    /// interest accrued on `principal` from `start` to `end`
    ///
    /// Principal and rate must both be positive.
    pub fn accrue(
        &self,
        principal: Money,
        annual_rate: Rate,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AccruedInterest> {
        if !principal.is_positive() {
            return Err(CalculatorError::InvalidPrincipal { principal });
        }
        if annual_rate.is_negative() || annual_rate.is_zero() {
            return Err(CalculatorError::InvalidInterestRate { rate: annual_rate });
        }

        let days = self.calculate_days(start, end)?;
        let interest = self.calculate_simple_interest(principal, annual_rate, days);

        tracing::debug!(
            days,
            convention = %self.convention,
            interest = %interest,
            "accrued simple interest"
        );

        Ok(AccruedInterest {
            principal,
            annual_rate,
            start_date: start,
            end_date: end,
            convention: self.convention,
            days,
            year_basis: self.convention.year_basis(),
            interest,
            total: principal + interest,
        })
    }
}
