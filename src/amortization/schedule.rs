use std::iter::FusedIterator;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// leftover balance below this is folded into the final payment
pub const RESIDUAL_TOLERANCE: Money = Money::CENT;

/// one period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// 1-based period number
    pub period_index: u32,
    /// `None` when the date falls outside the representable calendar
    pub period_date: Option<NaiveDate>,
    pub opening_balance: Money,
    pub payment_amount: Money,
    pub interest_component: Money,
    pub principal_component: Money,
    pub closing_balance: Money,
}

/// Build the full month-by-month schedule.
///
/// Empty when `term_months` is 0 or `principal` is not positive.
pub fn generate_schedule(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    start_date: NaiveDate,
    payment_amount: Money,
) -> Vec<PaymentRecord> {
    let records: Vec<PaymentRecord> =
        ScheduleIter::new(principal, annual_rate, term_months, start_date, payment_amount).collect();

    tracing::debug!(
        term_months,
        periods = records.len(),
        principal = %principal,
        "amortization schedule generated"
    );

    records
}

/// Lazily yields schedule records one period at a time.
///
/// Single pass: once exhausted it keeps returning `None`.
#[derive(Debug, Clone)]
pub struct ScheduleIter {
    principal: Money,
    monthly_rate: Decimal,
    term_months: u32,
    payment_amount: Money,
    first_date: Option<NaiveDate>,
    next_index: u32,
    balance: Money,
    finished: bool,
}

impl ScheduleIter {
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
        start_date: NaiveDate,
        payment_amount: Money,
    ) -> Self {
        let finished = term_months == 0 || !principal.is_positive();
        if finished {
            tracing::debug!(term_months, principal = %principal, "nothing to schedule");
        }

        Self {
            principal,
            monthly_rate: annual_rate.monthly_rate().as_decimal(),
            term_months,
            payment_amount,
            first_date: first_period_date(start_date),
            next_index: 1,
            balance: principal,
            finished,
        }
    }

    /// balance still outstanding before the next yielded period
    pub fn remaining_balance(&self) -> Money {
        self.balance
    }

    fn split_payment(&self) -> (Money, Money) {
        if self.monthly_rate > Decimal::ZERO {
            let interest = Money::from_decimal(self.balance.as_decimal() * self.monthly_rate);
            (interest, self.payment_amount - interest)
        } else {
            (Money::ZERO, self.principal / Decimal::from(self.term_months))
        }
    }
}

impl Iterator for ScheduleIter {
    type Item = PaymentRecord;

    fn next(&mut self) -> Option<PaymentRecord> {
        if self.finished || self.next_index > self.term_months {
            self.finished = true;
            return None;
        }

        let index = self.next_index;
        let opening_balance = self.balance;
        let (interest_component, mut principal_component) = self.split_payment();
        let mut payment_amount = self.payment_amount;

        if principal_component > opening_balance {
            tracing::trace!(
                period = index,
                overshoot = %(principal_component - opening_balance),
                "clamping principal to remaining balance"
            );
            principal_component = opening_balance;
            payment_amount = principal_component + interest_component;
        } else if index == self.term_months {
            let residual = opening_balance - principal_component;
            if residual >= RESIDUAL_TOLERANCE {
                tracing::warn!(
                    residual = %residual,
                    "payment too small to amortize the loan within its term"
                );
            } else if residual.is_positive() {
                tracing::trace!(period = index, residual = %residual, "sweeping residual into final payment");
                principal_component = opening_balance;
                payment_amount += residual;
            }
        }

        let closing_balance = opening_balance - principal_component;

        let record = PaymentRecord {
            period_index: index,
            period_date: self.first_date.and_then(|first| period_date(first, index)),
            opening_balance,
            payment_amount,
            interest_component,
            principal_component,
            closing_balance,
        };

        self.balance = closing_balance;
        self.next_index += 1;

        if !closing_balance.is_positive() {
            if index < self.term_months {
                tracing::debug!(
                    period = index,
                    term_months = self.term_months,
                    "loan repaid early, stopping schedule"
                );
            }
            self.finished = true;
        }

        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let remaining = (self.term_months + 1).saturating_sub(self.next_index) as usize;
        (remaining.min(1), Some(remaining))
    }
}

impl FusedIterator for ScheduleIter {}

/// first month-start on or after `start` (a start on the 1st is kept)
pub fn first_period_date(start: NaiveDate) -> Option<NaiveDate> {
    if start.day() == 1 {
        return Some(start);
    }
    start.with_day(1)?.checked_add_months(Months::new(1))
}

/// date of period `index` counted from the first period date
pub fn period_date(first: NaiveDate, index: u32) -> Option<NaiveDate> {
    first.checked_add_months(Months::new(index.saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute_emi;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule_for(principal: i64, percent: Decimal, months: u32) -> Vec<PaymentRecord> {
        let principal = Money::from_major(principal);
        let rate = Rate::from_annual_percent(percent);
        let emi = compute_emi(principal, rate, months);
        generate_schedule(principal, rate, months, date(2024, 1, 1), emi)
    }

    #[test]
    fn test_home_loan_schedule_closes_to_zero() {
        let records = schedule_for(500_000, dec!(8.0), 120);

        assert_eq!(records.len(), 120);
        assert_eq!(records[0].opening_balance, Money::from_major(500_000));
        assert_eq!(records.last().unwrap().closing_balance, Money::ZERO);

        // first month interest is 500000 * 0.08 / 12
        assert_eq!(records[0].interest_component.round_cents(), Money::from_decimal(dec!(3333.33)));

        for pair in records.windows(2) {
            assert_eq!(pair[1].opening_balance, pair[0].closing_balance);
            assert_eq!(pair[1].period_index, pair[0].period_index + 1);
            // interest shrinks as the balance is repaid
            assert!(pair[1].interest_component < pair[0].interest_component);
        }

        let repaid: Money = records.iter().map(|r| r.principal_component).sum();
        assert!((repaid - Money::from_major(500_000)).abs() <= Money::CENT);
    }

    #[test]
    fn test_closing_equals_opening_minus_principal() {
        for record in schedule_for(250_000, dec!(9.75), 60) {
            assert_eq!(
                record.closing_balance,
                record.opening_balance - record.principal_component
            );
            assert!(!record.closing_balance.is_negative());
        }
    }

    #[test]
    fn test_payments_are_constant_except_last() {
        let records = schedule_for(100_000, dec!(12), 12);
        let emi = records[0].payment_amount;

        for record in &records[..11] {
            assert_eq!(record.payment_amount, emi);
        }
        assert!((records[11].payment_amount - emi).abs() < Money::CENT);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let records = schedule_for(120_000, Decimal::ZERO, 12);

        assert_eq!(records.len(), 12);
        for record in &records {
            assert_eq!(record.principal_component, Money::from_major(10_000));
            assert_eq!(record.interest_component, Money::ZERO);
            assert_eq!(record.payment_amount, Money::from_major(10_000));
        }
        assert_eq!(records[11].closing_balance, Money::ZERO);
    }

    #[test]
    fn test_zero_rate_uneven_split_sweeps_residual() {
        // 100 / 3 leaves a sub-cent residual after three equal parts
        let records = schedule_for(100, Decimal::ZERO, 3);
        let share = Money::from_major(100) / Decimal::from(3);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].principal_component, share);
        assert_eq!(records[1].principal_component, share);
        assert_eq!(records[2].principal_component, records[2].opening_balance);
        assert_eq!(records[2].closing_balance, Money::ZERO);

        let repaid: Money = records.iter().map(|r| r.principal_component).sum();
        assert!((repaid - Money::from_major(100)).abs() < Money::CENT);
    }

    #[test]
    fn test_single_month_loan() {
        let records = schedule_for(1_000, dec!(6.0), 1);

        assert_eq!(records.len(), 1);
        let only = &records[0];
        assert_eq!(only.principal_component, Money::from_major(1_000));
        assert_eq!(only.interest_component, Money::from_major(5));
        assert_eq!(only.payment_amount, Money::from_major(1_005));
        assert_eq!(only.closing_balance, Money::ZERO);
    }

    #[test]
    fn test_overpayment_is_clamped_and_stops_early() {
        let principal = Money::from_major(1_000);
        let rate = Rate::from_percentage(12);

        // pays far more than needed, first period closes the loan
        let records = generate_schedule(principal, rate, 12, date(2024, 1, 1), Money::from_major(5_000));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].principal_component, principal);
        assert_eq!(records[0].interest_component, Money::from_major(10));
        assert_eq!(records[0].payment_amount, Money::from_major(1_010));
        assert_eq!(records[0].closing_balance, Money::ZERO);
    }

    #[test]
    fn test_partial_overpayment_terminates_before_term() {
        let principal = Money::from_major(1_000);
        let records = generate_schedule(principal, Rate::ZERO, 10, date(2024, 1, 1), Money::from_major(400));

        // zero rate ignores the supplied payment for the principal split
        assert_eq!(records.len(), 10);

        let rate = Rate::from_percentage(12);
        let records = generate_schedule(principal, rate, 10, date(2024, 1, 1), Money::from_major(400));
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].closing_balance, Money::ZERO);
        assert!(records[2].payment_amount < Money::from_major(400));
    }

    #[test]
    fn test_underpayment_leaves_balance_open() {
        let principal = Money::from_major(1_000);
        let rate = Rate::from_percentage(12);
        let records = generate_schedule(principal, rate, 3, date(2024, 1, 1), Money::from_major(50));

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].payment_amount, Money::from_major(50));
        assert_eq!(records[2].closing_balance, Money::from_decimal(dec!(878.796)));
    }

    #[test]
    fn test_short_payment_is_not_absorbed_by_final_period() {
        // EMI is 8884.8788; paying 8884.84 leaves about 0.49 after a year
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(12);
        let payment = Money::from_decimal(dec!(8884.84));
        let records = generate_schedule(principal, rate, 12, date(2024, 1, 1), payment);

        assert_eq!(records.len(), 12);
        let last = records.last().unwrap();
        assert_eq!(last.payment_amount, payment);
        assert!(last.closing_balance > RESIDUAL_TOLERANCE);
        assert!(last.closing_balance < Money::ONE);
        assert_eq!(last.closing_balance.round_cents(), Money::from_decimal(dec!(0.49)));
    }

    #[test]
    fn test_long_high_rate_loans_close_to_zero() {
        for (principal, percent, months) in [
            (100_000, dec!(18), 1_200),
            (1_000_000, dec!(24), 900),
            (5_000_000, dec!(15), 2_400),
        ] {
            let records = schedule_for(principal, percent, months);
            let last = records.last().unwrap();

            assert_eq!(records.len(), months as usize);
            assert_eq!(last.closing_balance, Money::ZERO);
            // only the last period may deviate from the EMI, and by less than a cent
            let emi = records[0].payment_amount;
            assert!((last.payment_amount - emi).abs() < Money::CENT);

            let repaid: Money = records.iter().map(|r| r.principal_component).sum();
            assert!((repaid - Money::from_major(principal)).abs() < Money::CENT);
        }
    }

    #[test]
    fn test_degenerate_inputs_give_empty_schedule() {
        let rate = Rate::from_percentage(8);
        let start = date(2024, 1, 1);

        assert!(generate_schedule(Money::from_major(1_000), rate, 0, start, Money::ZERO).is_empty());
        assert!(generate_schedule(Money::ZERO, rate, 12, start, Money::ZERO).is_empty());
        assert!(generate_schedule(Money::from_major(-10), rate, 12, start, Money::ONE).is_empty());
    }

    #[test]
    fn test_generation_is_repeatable() {
        let first = schedule_for(750_000, dec!(7.25), 240);
        let second = schedule_for(750_000, dec!(7.25), 240);
        assert_eq!(first, second);
    }

    #[test]
    fn test_iterator_is_lazy_and_fused() {
        let principal = Money::from_major(12_000);
        let rate = Rate::from_percentage(10);
        let emi = compute_emi(principal, rate, 24);
        let mut iter = ScheduleIter::new(principal, rate, 24, date(2024, 1, 1), emi);

        assert_eq!(iter.size_hint(), (1, Some(24)));

        let first_three: Vec<_> = iter.by_ref().take(3).collect();
        assert_eq!(first_three.len(), 3);
        assert_eq!(iter.remaining_balance(), first_three[2].closing_balance);

        let rest: Vec<_> = iter.by_ref().collect();
        assert_eq!(rest.len(), 21);
        assert_eq!(rest[0].period_index, 4);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_period_dates_align_to_month_start() {
        let principal = Money::from_major(3_000);
        let rate = Rate::from_percentage(6);
        let emi = compute_emi(principal, rate, 3);

        let on_first = generate_schedule(principal, rate, 3, date(2024, 1, 1), emi);
        let dates: Vec<_> = on_first.iter().map(|r| r.period_date).collect();
        assert_eq!(
            dates,
            vec![Some(date(2024, 1, 1)), Some(date(2024, 2, 1)), Some(date(2024, 3, 1))]
        );

        // mid-month start rolls forward to the next month start
        let mid_month = generate_schedule(principal, rate, 3, date(2024, 1, 31), emi);
        let dates: Vec<_> = mid_month.iter().map(|r| r.period_date).collect();
        assert_eq!(
            dates,
            vec![Some(date(2024, 2, 1)), Some(date(2024, 3, 1)), Some(date(2024, 4, 1))]
        );
    }

    #[test]
    fn test_year_rollover_dates() {
        assert_eq!(first_period_date(date(2024, 12, 15)), Some(date(2025, 1, 1)));
        assert_eq!(period_date(date(2024, 11, 1), 3), Some(date(2025, 1, 1)));
        assert_eq!(period_date(date(2024, 11, 1), 1), Some(date(2024, 11, 1)));
    }

    #[test]
    fn test_unrepresentable_dates_are_none() {
        assert_eq!(first_period_date(NaiveDate::MAX), None);

        let principal = Money::from_major(100);
        let records = generate_schedule(principal, Rate::ZERO, 2, NaiveDate::MAX, Money::from_major(50));
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.period_date.is_none()));
    }
}
