use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::CsvExporter;
use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::interest::{AccrualEngine, DayCountConvention};
use crate::loan::{validate_inputs, LoanTermsBuilder};
use crate::types::Tenure;

/// calculator defaults and presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub currency_symbol: String,
    pub default_principal: Money,
    /// percent per annum, 8.0 means 8%
    pub default_annual_rate_percent: Decimal,
    pub default_tenure: Tenure,
    pub day_count_convention: DayCountConvention,
    pub export_file_name: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            default_principal: Money::from_major(500_000),
            default_annual_rate_percent: dec!(8.0),
            default_tenure: Tenure::Years(dec!(10)),
            day_count_convention: DayCountConvention::Actual365,
            export_file_name: "emi_amortization_schedule.csv".to_string(),
        }
    }
}

impl CalculatorConfig {
    /// load from json, missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_inputs(
            self.default_principal,
            self.default_rate(),
            self.default_tenure.total_months(),
        )?;

        if self.export_file_name.trim().is_empty() {
            return Err(CalculatorError::InvalidConfiguration {
                message: "export file name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn default_rate(&self) -> Rate {
        Rate::from_annual_percent(self.default_annual_rate_percent)
    }

    /// builder pre-filled with the default form values
    pub fn loan_terms_builder<'a>(&self) -> LoanTermsBuilder<'a> {
        LoanTermsBuilder::new()
            .principal(self.default_principal)
            .annual_rate(self.default_rate())
            .tenure(self.default_tenure)
    }

    pub fn accrual_engine(&self) -> AccrualEngine {
        AccrualEngine::new(self.day_count_convention)
    }

    pub fn csv_exporter(&self) -> CsvExporter {
        CsvExporter::with_currency(self.currency_symbol.as_str())
    }
}
