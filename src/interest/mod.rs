pub mod accrual;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Money, Rate};

pub use accrual::AccrualEngine;

/// day count convention for simple interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// actual days / 365
    #[default]
    Actual365,
    /// actual days / 360
    Actual360,
}

impl DayCountConvention {
    /// days in the year used as the divisor
    pub fn year_basis(&self) -> u32 {
        match self {
            DayCountConvention::Actual365 => 365,
            DayCountConvention::Actual360 => 360,
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayCountConvention::Actual365 => write!(f, "Actual/365"),
            DayCountConvention::Actual360 => write!(f, "Actual/360"),
        }
    }
}

/// interest accrued between two dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccruedInterest {
    pub principal: Money,
    pub annual_rate: Rate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub convention: DayCountConvention,
    pub days: u32,
    pub year_basis: u32,
    pub interest: Money,
    /// principal plus interest
    pub total: Money,
}
