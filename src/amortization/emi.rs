use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};

/// Fixed monthly installment for a fully amortizing loan.
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), with r = annual rate / 12.
///
/// Returns `Money::ZERO` when `term_months` is 0, meaning "nothing to
/// compute". A zero rate degrades to straight-line repayment `P / n`.
/// Sign checks on principal and rate are left to the caller.
pub fn compute_emi(principal: Money, annual_rate: Rate, term_months: u32) -> Money {
    if term_months == 0 {
        tracing::trace!("emi requested for zero-month term");
        return Money::ZERO;
    }

    let monthly_rate = annual_rate.monthly_rate().as_decimal();

    if monthly_rate.is_zero() {
        return principal / Decimal::from(term_months);
    }

    let ratio = match compound_factor(monthly_rate, term_months) {
        // (1 + r)^n / ((1 + r)^n - 1)
        Some(compound) => compound / (compound - Decimal::ONE),
        None => {
            // factor beyond decimal range, the ratio has converged to 1
            tracing::debug!(
                term_months,
                monthly_rate = %monthly_rate,
                "compound factor overflowed, using interest-only limit"
            );
            Decimal::ONE
        }
    };

    Money::from_decimal(principal.as_decimal() * monthly_rate * ratio)
}

/// (1 + rate)^periods, or `None` if it leaves the decimal range
pub(crate) fn compound_factor(rate: Decimal, periods: u32) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        compound = compound.checked_mul(base)?;
    }
    Some(compound)
}
