pub mod amortization;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod loan;
pub mod types;

// re-export key types
pub use amortization::{
    compute_emi, generate_schedule, AmortizationSchedule, CsvExporter, LoanSummary,
    PaymentRecord, ScheduleIter,
};
pub use config::CalculatorConfig;
pub use decimal::{Money, Rate};
pub use errors::{CalculatorError, Result};
pub use interest::{AccrualEngine, AccruedInterest, DayCountConvention};
pub use loan::{LoanTerms, LoanTermsBuilder};
pub use types::{Tenure, TenureUnit};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
