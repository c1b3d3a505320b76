pub mod emi;
pub mod export;
pub mod schedule;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::loan::LoanTerms;

pub use emi::compute_emi;
pub use export::{CsvExporter, SCHEDULE_COLUMNS};
pub use schedule::{generate_schedule, PaymentRecord, ScheduleIter};

/// headline figures shown next to the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub monthly_emi: Money,
    /// emi times number of months
    pub total_payment: Money,
    pub total_interest: Money,
}

impl LoanSummary {
    pub fn from_terms(terms: &LoanTerms) -> Self {
        let monthly_emi = terms.emi();
        let total_payment = monthly_emi * rust_decimal::Decimal::from(terms.term_months());

        Self {
            monthly_emi,
            total_payment,
            total_interest: total_payment - terms.principal(),
        }
    }
}

/// amortization schedule together with its inputs and totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub interest_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub emi: Money,
    pub records: Vec<PaymentRecord>,
    pub total_interest: Money,
    pub total_payment: Money,
    pub total_principal: Money,
}

impl AmortizationSchedule {
    /// generate payment schedule
    pub fn generate(terms: &LoanTerms) -> Self {
        let emi = terms.emi();
        let records = generate_schedule(
            terms.principal(),
            terms.annual_rate(),
            terms.term_months(),
            terms.start_date(),
            emi,
        );

        let total_interest = records.iter().map(|r| r.interest_component).sum();
        let total_payment = records.iter().map(|r| r.payment_amount).sum();
        let total_principal = records.iter().map(|r| r.principal_component).sum();

        Self {
            principal: terms.principal(),
            interest_rate: terms.annual_rate(),
            term_months: terms.term_months(),
            start_date: terms.start_date(),
            emi,
            records,
            total_interest,
            total_payment,
            total_principal,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// get record for a 1-based period number
    pub fn get_record(&self, period_index: u32) -> Option<&PaymentRecord> {
        let idx = period_index.checked_sub(1)?;
        self.records.get(idx as usize)
    }

    /// remaining balance after a period, the full principal before period 1
    pub fn balance_after_period(&self, period_index: u32) -> Money {
        if period_index == 0 {
            return self.principal;
        }
        self.get_record(period_index)
            .map(|r| r.closing_balance)
            .unwrap_or(Money::ZERO)
    }

    /// serialize for debugging and monitoring
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
