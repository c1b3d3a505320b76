/// quick start - minimal example to get started
use emi_calculator_rs::{Decimal, LoanTerms, Money, Tenure};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 5 lakh home loan at 8% for 10 years, starting today
    let terms = LoanTerms::builder()
        .principal(Money::from_major(500_000))
        .annual_rate_percent(Decimal::from(8))
        .tenure(Tenure::Years(Decimal::from(10)))
        .build()?;

    let summary = terms.summary();
    println!("monthly emi:    {}", summary.monthly_emi.to_display());
    println!("total interest: {}", summary.total_interest.to_display());
    println!("total payment:  {}", summary.total_payment.to_display());

    Ok(())
}
