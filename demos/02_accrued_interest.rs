/// accrued interest - simple interest between two dates
use chrono::NaiveDate;
use emi_calculator_rs::{AccrualEngine, DayCountConvention, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let end = NaiveDate::from_ymd_opt(2024, 9, 30).ok_or("bad date")?;
    let principal = Money::from_major(10_000);
    let rate = Rate::from_percentage(8);

    for convention in [DayCountConvention::Actual365, DayCountConvention::Actual360] {
        let accrued = AccrualEngine::new(convention).accrue(principal, rate, start, end)?;
        println!(
            "{:<10} {} days / {} -> interest {} (total {})",
            convention.to_string(),
            accrued.days,
            accrued.year_basis,
            accrued.interest.to_display(),
            accrued.total.to_display(),
        );
    }

    // end before start is rejected rather than producing negative interest
    let err = AccrualEngine::default()
        .accrue(principal, rate, end, start)
        .unwrap_err();
    println!("\nrejected: {}", err);

    Ok(())
}
