use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// unit a tenure is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenureUnit {
    Years,
    Months,
}

/// loan tenure as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tenure {
    /// fractional years allowed, e.g. 2.5 years
    Years(Decimal),
    /// whole months
    Months(u32),
}

impl Tenure {
    pub fn unit(&self) -> TenureUnit {
        match self {
            Tenure::Years(_) => TenureUnit::Years,
            Tenure::Months(_) => TenureUnit::Months,
        }
    }

    /// total months, partial months are dropped (2.55 years -> 30 months)
    ///
    /// Negative or out-of-range year counts collapse to 0, which the
    /// loan validation rejects.
    pub fn total_months(&self) -> u32 {
        match self {
            Tenure::Months(months) => *months,
            Tenure::Years(years) => (*years * Decimal::from(12))
                .trunc()
                .to_u32()
                .unwrap_or(0),
        }
    }
}

impl Default for Tenure {
    fn default() -> Self {
        Tenure::Years(Decimal::from(10))
    }
}
