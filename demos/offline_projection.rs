//! Example: Projection engine on synthetic data, no network
//!
//! Run with: cargo run --example offline_projection

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use leap_finder::prelude::*;

fn main() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let spot = 150.0;

    // Five years of weekly closes growing ~0.25%/week with a wobble
    let start = Utc.with_ymd_and_hms(2021, 10, 18, 0, 0, 0).unwrap();
    let samples: Vec<HistoricalSample> = (0..262)
        .map(|i| {
            let trend = 60.0 * 1.0025_f64.powi(i);
            let wobble = 1.0 + 0.04 * ((i as f64) * 0.7).sin();
            let sample = HistoricalSample::new(start + Duration::weeks(i as i64), trend * wobble);
            if i % 13 == 0 {
                sample.with_dividend(0.22)
            } else {
                sample
            }
        })
        .collect();
    let mut history = HistoricalSeries::new("DEMO", samples);
    history.drop_partial_bar();

    println!("=== Calibration ===\n");
    let est = estimate(&history, Lookback::FiveYears).unwrap();
    println!("Weekly returns used: {}", est.returns_used);
    println!("Mean growth:  {:.5}", est.stats.mean_growth);
    println!("Stdev growth: {:.5}", est.stats.stdev_growth);
    for warning in &est.warnings {
        println!("Warning: {}", warning);
    }

    println!("\n=== Simulation ===\n");
    let matrix = simulate(spot, &est.stats, 1000, 125, today, Some(7)).unwrap();
    for weeks in [52, 78, 104, 124] {
        let date = matrix.column_date(weeks);
        println!(
            "Week {:>3} ({}): median ${:.2}",
            weeks,
            date,
            expected_value(&matrix, date)
        );
    }

    println!("\n=== Evaluation ===\n");
    let expiry = today + Duration::days(456);
    let calls = [160.0, 180.0, 200.0, 240.0]
        .iter()
        .zip([32.0, 24.5, 18.0, 0.0])
        .map(|(&strike, ask)| Contract::new(expiry, strike).with_quote(Some(ask * 0.95), Some(ask)))
        .collect();

    let mut book = ContractBook::new();
    book.insert(expiry, calls);
    let summary = evaluate(&matrix, &mut book);

    print!("{}", render_chain("DEMO", expiry, &book[&expiry]));
    println!(
        "\n{} rows evaluated, {} without a usable ask",
        summary.rows, summary.failed_rows
    );
}
