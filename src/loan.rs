use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{compute_emi, AmortizationSchedule, LoanSummary};
use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::types::Tenure;

/// validated, immutable loan inputs for one calculation
///
/// Deserializing runs the same validation as [`LoanTerms::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedLoanTerms")]
pub struct LoanTerms {
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    start_date: NaiveDate,
}

#[derive(Deserialize)]
struct UncheckedLoanTerms {
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    start_date: NaiveDate,
}

impl TryFrom<UncheckedLoanTerms> for LoanTerms {
    type Error = CalculatorError;

    fn try_from(raw: UncheckedLoanTerms) -> Result<Self> {
        LoanTerms::new(raw.principal, raw.annual_rate, raw.term_months, raw.start_date)
    }
}

impl LoanTerms {
    /// validate and construct loan terms
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
        start_date: NaiveDate,
    ) -> Result<Self> {
        validate_inputs(principal, annual_rate, term_months)?;

        Ok(Self {
            principal,
            annual_rate,
            term_months,
            start_date,
        })
    }

    pub fn builder<'a>() -> LoanTermsBuilder<'a> {
        LoanTermsBuilder::new()
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// fixed monthly installment for these terms
    pub fn emi(&self) -> Money {
        compute_emi(self.principal, self.annual_rate, self.term_months)
    }

    /// headline figures: emi, total payment, total interest
    pub fn summary(&self) -> LoanSummary {
        LoanSummary::from_terms(self)
    }

    /// full month-by-month schedule
    pub fn schedule(&self) -> AmortizationSchedule {
        AmortizationSchedule::generate(self)
    }
}

/// checks shared by the builder and the calculator config
pub(crate) fn validate_inputs(principal: Money, annual_rate: Rate, term_months: u32) -> Result<()> {
    if !principal.is_positive() {
        return Err(CalculatorError::InvalidPrincipal { principal });
    }

    if annual_rate.is_negative() {
        return Err(CalculatorError::InvalidInterestRate { rate: annual_rate });
    }

    if term_months == 0 {
        return Err(CalculatorError::InvalidTerm {
            message: "tenure must be at least one month".to_string(),
        });
    }

    Ok(())
}

/// builder collecting raw calculator input
pub struct LoanTermsBuilder<'a> {
    principal: Option<Money>,
    annual_rate: Option<Rate>,
    tenure: Option<Tenure>,
    start_date: Option<NaiveDate>,
    time_provider: Option<&'a SafeTimeProvider>,
}

impl Default for LoanTermsBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> LoanTermsBuilder<'a> {
    pub fn new() -> Self {
        Self {
            principal: None,
            annual_rate: None,
            tenure: None,
            start_date: None,
            time_provider: None,
        }
    }

    /// time source used to default the start date to today
    pub fn set_time(mut self, time: &'a SafeTimeProvider) -> Self {
        self.time_provider = Some(time);
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn annual_rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    /// rate as typed into the form, 8.0 means 8% per annum
    pub fn annual_rate_percent(mut self, percent: Decimal) -> Self {
        self.annual_rate = Some(Rate::from_annual_percent(percent));
        self
    }

    pub fn tenure(mut self, tenure: Tenure) -> Self {
        self.tenure = Some(tenure);
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.tenure = Some(Tenure::Months(months));
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Build with stored time or system time if not set
    pub fn build(self) -> Result<LoanTerms> {
        match self.time_provider {
            Some(time) => self.build_with_time(time),
            None => {
                let time = SafeTimeProvider::new(TimeSource::System);
                self.build_with_time(&time)
            }
        }
    }

    /// Build with explicit time provider
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<LoanTerms> {
        let principal = self.principal.ok_or(CalculatorError::InvalidConfiguration {
            message: "Principal required".to_string(),
        })?;

        let annual_rate = self.annual_rate.ok_or(CalculatorError::InvalidConfiguration {
            message: "Rate required".to_string(),
        })?;

        let tenure = self.tenure.ok_or(CalculatorError::InvalidConfiguration {
            message: "Tenure required".to_string(),
        })?;

        let start_date = self
            .start_date
            .unwrap_or_else(|| time_provider.now().date_naive());

        LoanTerms::new(principal, annual_rate, tenure.total_months(), start_date)
    }
}
