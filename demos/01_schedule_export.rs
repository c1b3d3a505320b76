/// schedule export - full amortization table as csv and json
use chrono::NaiveDate;
use emi_calculator_rs::{CalculatorConfig, Decimal, Money};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = CalculatorConfig::from_json(r#"{ "currency_symbol": "₹" }"#)?;

    // 2 lakh car loan at 9.5% for 3 years
    let terms = config
        .loan_terms_builder()
        .principal(Money::from_major(200_000))
        .annual_rate_percent(Decimal::new(95, 1))
        .term_months(36)
        .start_date(NaiveDate::from_ymd_opt(2024, 4, 15).ok_or("bad date")?)
        .build()?;

    let schedule = terms.schedule();

    println!("=== {} ===\n", config.export_file_name);
    config.csv_exporter().write_schedule(&schedule, std::io::stdout())?;

    println!("\n=== last period as json ===\n");
    if let Some(last) = schedule.records.last() {
        println!("{}", serde_json::to_string_pretty(last)?);
    }

    println!(
        "\ntotal interest {} {}",
        config.currency_symbol,
        schedule.total_interest.to_display()
    );

    Ok(())
}
