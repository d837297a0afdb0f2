//! Console rendering of a LEAP report

use chrono::NaiveDate;
use std::fmt::Write;

use super::LeapReport;
use crate::core::Contract;

const HEADERS: [&str; 6] = [
    "Strike Price",
    "Bid Price",
    "Ask Price",
    "Daily Volume",
    "Implied Expiration Value",
    "Implied Factorial Gain",
];

fn price_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_nan() => "NaN".to_string(),
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

fn row_cells(contract: &Contract) -> [String; 6] {
    [
        format!("{:.2}", contract.strike),
        price_cell(contract.bid),
        price_cell(contract.ask),
        contract
            .volume
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string()),
        price_cell(contract.implied_expiration_value),
        price_cell(contract.implied_factorial_gain),
    ]
}

/// Right-aligned table for one expiry
pub fn render_chain(ticker: &str, expiry: NaiveDate, contracts: &[Contract]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "LEAP call option information for {} for {}", ticker, expiry);

    if contracts.is_empty() {
        let _ = writeln!(out, "  (no liquid out-of-the-money calls)");
        return out;
    }

    let rows: Vec<[String; 6]> = contracts.iter().map(row_cells).collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let header: Vec<String> = HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:>w$}", h, w = *w))
        .collect();
    let _ = writeln!(out, "{}", header.join("  "));

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>w$}", c, w = *w))
            .collect();
        let _ = writeln!(out, "{}", line.join("  "));
    }

    out
}

/// Full report: header, warnings, then one table per expiry
pub fn render(report: &LeapReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Current price: ${:.2}", report.spot);
    let _ = writeln!(
        out,
        "Weekly growth over {}: mean {:.4}, stdev {:.4} ({:+.1}%/yr drift, {:.1}%/yr vol)",
        report.lookback,
        report.stats.mean_growth,
        report.stats.stdev_growth,
        report.stats.annualized_drift() * 100.0,
        report.stats.annualized_vol() * 100.0
    );

    for warning in &report.warnings {
        let _ = writeln!(out, "Warning: {}", warning);
    }

    if report.chains.is_empty() {
        let _ = writeln!(out, "\nNo LEAP expirations found for {}.", report.ticker);
        return out;
    }

    for (expiry, contracts) in &report.chains {
        let _ = writeln!(out);
        out.push_str(&render_chain(&report.ticker, *expiry, contracts));
    }

    if report.summary.failed_rows > 0 {
        let _ = writeln!(
            out,
            "\n{} contract(s) had no ask price; gain shown as NaN.",
            report.summary.failed_rows
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ContractBook, Lookback};
    use crate::models::{CalibrationWarning, EvaluationSummary, ReturnStatistics};

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2028, 1, 21).unwrap()
    }

    fn evaluated(strike: f64, ask: Option<f64>, value: f64, gain: f64) -> Contract {
        let mut c = Contract::new(expiry(), strike).with_quote(ask.map(|a| a - 0.2), ask);
        c.implied_expiration_value = Some(value);
        c.implied_factorial_gain = Some(gain);
        c
    }

    #[test]
    fn test_render_chain() {
        let rows = vec![
            evaluated(110.0, Some(4.0), 12.5, 3.13).with_volume(40),
            evaluated(120.0, None, 2.5, f64::NAN),
        ];
        let table = render_chain("ABC", expiry(), &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "LEAP call option information for ABC for 2028-01-21");
        assert!(lines[1].starts_with("Strike Price"));
        assert!(lines[1].ends_with("Implied Factorial Gain"));
        assert!(lines[2].contains("110.00"));
        assert!(lines[2].trim_end().ends_with("3.13"));
        assert!(lines[3].trim_end().ends_with("NaN"));
        assert!(lines[3].contains(" - "));
        // Columns line up
        assert_eq!(lines[1].len(), lines[2].len());
        assert_eq!(lines[2].len(), lines[3].len());
    }

    #[test]
    fn test_render_report() {
        let mut chains = ContractBook::new();
        chains.insert(expiry(), vec![evaluated(110.0, None, 0.0, f64::NAN)]);

        let report = LeapReport {
            ticker: "ABC".into(),
            spot: 101.234,
            as_of: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            lookback: Lookback::FiveYears,
            stats: ReturnStatistics::new(1.0, 0.0),
            warnings: vec![CalibrationWarning::InsufficientHistory {
                available: 50,
                expected: 261,
                years: 5,
            }],
            chains,
            summary: EvaluationSummary { expirations: 1, rows: 1, failed_rows: 1 },
        };

        let text = render(&report);
        assert!(text.starts_with("Current price: $101.23\n"));
        assert!(text.contains("Warning: Less than 5 year(s) of data exists for this stock"));
        assert!(text.contains("for ABC for 2028-01-21"));
        assert!(text.contains("1 contract(s) had no ask price"));
    }

    #[test]
    fn test_render_no_leaps() {
        let report = LeapReport {
            ticker: "ABC".into(),
            spot: 10.0,
            as_of: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            lookback: Lookback::OneYear,
            stats: ReturnStatistics::new(1.0, 0.01),
            warnings: Vec::new(),
            chains: ContractBook::new(),
            summary: EvaluationSummary::default(),
        };

        assert!(render(&report).contains("No LEAP expirations found for ABC."));
    }
}
