use std::io;

use crate::amortization::{AmortizationSchedule, PaymentRecord};
use crate::decimal::Money;
use crate::errors::{CalculatorError, Result};

/// export column order, monetary columns come after `Date`
pub const SCHEDULE_COLUMNS: [&str; 7] = [
    "Month #",
    "Date",
    "Opening Balance",
    "EMI",
    "Principal Component",
    "Interest Component",
    "Closing Balance",
];

/// writes schedules as comma-separated rows
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    currency_symbol: Option<String>,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// label monetary columns with a currency, e.g. `EMI (₹)`
    pub fn with_currency(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            currency_symbol: (!symbol.is_empty()).then_some(symbol),
        }
    }

    pub fn headers(&self) -> Vec<String> {
        SCHEDULE_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, name)| match (&self.currency_symbol, i >= 2) {
                (Some(symbol), true) => format!("{} ({})", name, symbol),
                _ => name.to_string(),
            })
            .collect()
    }

    pub fn write_records<W: io::Write>(&self, records: &[PaymentRecord], writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(self.headers())?;
        for record in records {
            wtr.write_record(row(record))?;
        }
        wtr.flush()?;

        tracing::debug!(rows = records.len(), "schedule exported as csv");
        Ok(())
    }

    pub fn write_schedule<W: io::Write>(&self, schedule: &AmortizationSchedule, writer: W) -> Result<()> {
        self.write_records(&schedule.records, writer)
    }

    pub fn to_csv_string(&self, schedule: &AmortizationSchedule) -> Result<String> {
        let mut buf = Vec::new();
        self.write_schedule(schedule, &mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| CalculatorError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

fn row(record: &PaymentRecord) -> [String; 7] {
    [
        record.period_index.to_string(),
        record.period_date.map(|d| d.to_string()).unwrap_or_default(),
        cents(record.opening_balance),
        cents(record.payment_amount),
        cents(record.principal_component),
        cents(record.interest_component),
        cents(record.closing_balance),
    ]
}

fn cents(amount: Money) -> String {
    format!("{:.2}", amount.round_cents().as_decimal())
}

/// write a schedule with plain column names
pub fn write_csv<W: io::Write>(schedule: &AmortizationSchedule, writer: W) -> Result<()> {
    CsvExporter::new().write_schedule(schedule, writer)
}

pub fn to_csv_string(schedule: &AmortizationSchedule) -> Result<String> {
    CsvExporter::new().to_csv_string(schedule)
}
