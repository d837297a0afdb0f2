//! Weekly return calibration
//!
//! Turns a weekly close series into the growth-factor statistics that drive
//! the random walk:
//!
//! r_i = (C_i - C_{i-1}) / C_{i-1}
//! mean growth = 1 + E[r]
//! stdev growth = sqrt(E[(r - E[r])²])   (population, divide by N)
//!
//! Weeks that paid a dividend are removed first, since the ex-dividend drop
//! would read as a loss.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fmt;

use crate::core::{HistoricalSeries, LeapError, LeapResult, Lookback};

/// Weekly growth-factor statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatistics {
    /// 1 + average fractional weekly change
    pub mean_growth: f64,
    /// Population standard deviation of fractional weekly changes
    pub stdev_growth: f64,
}

impl ReturnStatistics {
    pub fn new(mean_growth: f64, stdev_growth: f64) -> Self {
        Self { mean_growth, stdev_growth }
    }

    /// Both moments are usable as Normal parameters
    pub fn is_finite(&self) -> bool {
        self.mean_growth.is_finite() && self.stdev_growth.is_finite()
    }

    /// Annualized drift, for display
    pub fn annualized_drift(&self) -> f64 {
        (self.mean_growth - 1.0) * crate::core::WEEKS_PER_YEAR
    }

    /// Annualized volatility, for display
    pub fn annualized_vol(&self) -> f64 {
        self.stdev_growth * crate::core::WEEKS_PER_YEAR.sqrt()
    }
}

/// Non-fatal calibration problems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalibrationWarning {
    /// The series is shorter than the lookback window nominally holds
    InsufficientHistory {
        available: usize,
        expected: usize,
        years: u32,
    },
    /// Fewer than two usable samples, so the statistics are NaN
    NoUsableReturns { samples: usize },
}

impl fmt::Display for CalibrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationWarning::InsufficientHistory { available, expected, years } => write!(
                f,
                "Less than {} year(s) of data exists for this stock ({} of {} weeks)",
                years, available, expected
            ),
            CalibrationWarning::NoUsableReturns { samples } => write!(
                f,
                "No usable weekly returns ({} non-dividend samples); growth statistics are undefined",
                samples
            ),
        }
    }
}

/// Output of a calibration run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnEstimate {
    pub stats: ReturnStatistics,
    /// Number of finite weekly returns behind the statistics
    pub returns_used: usize,
    pub warnings: Vec<CalibrationWarning>,
}

/// Fractional week-over-week changes of the non-dividend closes.
///
/// Non-finite changes (zero prior close, missing data) are dropped.
pub fn weekly_returns(series: &HistoricalSeries) -> Vec<f64> {
    let closes: Vec<f64> = series.without_dividends().map(|s| s.close).collect();

    closes
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .filter(|r| r.is_finite())
        .collect()
}

/// Calibrate growth statistics from a weekly series.
///
/// The caller must already have removed the trailing, still-open bar.
pub fn estimate(series: &HistoricalSeries, lookback: Lookback) -> LeapResult<ReturnEstimate> {
    if series.is_empty() {
        return Err(LeapError::data_unavailable(format!(
            "no price history for {}",
            series.symbol
        )));
    }

    let mut warnings = Vec::new();

    let expected = lookback.nominal_weeks();
    if series.len() < expected {
        let warning = CalibrationWarning::InsufficientHistory {
            available: series.len(),
            expected,
            years: lookback.years(),
        };
        tracing::warn!("{}: {}", series.symbol, warning);
        warnings.push(warning);
    }

    let returns = weekly_returns(series);

    let stats = ReturnStatistics::new(
        1.0 + returns.iter().mean(),
        returns.iter().population_std_dev(),
    );

    if returns.is_empty() {
        let warning = CalibrationWarning::NoUsableReturns {
            samples: series.without_dividends().count(),
        };
        tracing::warn!("{}: {}", series.symbol, warning);
        warnings.push(warning);
    }

    tracing::info!(
        "Calibrated {} from {} weekly returns: mean growth {:.5}, stdev {:.5}",
        series.symbol,
        returns.len(),
        stats.mean_growth,
        stats.stdev_growth
    );

    Ok(ReturnEstimate {
        stats,
        returns_used: returns.len(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HistoricalSample;
    use chrono::{Duration, TimeZone, Utc};

    fn weekly(closes: &[f64]) -> HistoricalSeries {
        let start = Utc.with_ymd_and_hms(2021, 1, 4, 0, 0, 0).unwrap();
        let samples = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| HistoricalSample::new(start + Duration::weeks(i as i64), c))
            .collect();
        HistoricalSeries::new("TEST", samples)
    }

    #[test]
    fn test_flat_history() {
        let series = weekly(&[50.0; 300]);
        let est = estimate(&series, Lookback::FiveYears).unwrap();

        assert_eq!(est.stats.mean_growth, 1.0);
        assert_eq!(est.stats.stdev_growth, 0.0);
        assert_eq!(est.returns_used, 299);
        assert!(est.warnings.is_empty());
    }

    #[test]
    fn test_population_stdev() {
        // Returns: +10%, -10%
        let series = weekly(&[100.0, 110.0, 99.0]);
        let est = estimate(&series, Lookback::OneYear).unwrap();

        assert!((est.stats.mean_growth - 1.0).abs() < 1e-12);
        // Population stdev of [0.1, -0.1] is 0.1 (sample stdev would be 0.1414)
        assert!((est.stats.stdev_growth - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_dividend_weeks_excluded() {
        let mut series = weekly(&[100.0, 50.0, 100.0, 200.0]);
        // The 50.0 week paid a dividend; returns come from 100 -> 100 -> 200
        series.samples[1] = series.samples[1].with_dividend(0.5);

        let returns = weekly_returns(&series);
        assert_eq!(returns, vec![0.0, 1.0]);

        let est = estimate(&series, Lookback::OneYear).unwrap();
        assert!((est.stats.mean_growth - 1.5).abs() < 1e-12);
        assert!((est.stats.stdev_growth - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_returns_dropped() {
        let series = weekly(&[0.0, 10.0, 11.0]);
        let returns = weekly_returns(&series);

        assert_eq!(returns.len(), 1);
        assert!((returns[0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_underfilled_window_warns_once() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let series = weekly(&closes);
        let est = estimate(&series, Lookback::FiveYears).unwrap();

        let underfill: Vec<_> = est
            .warnings
            .iter()
            .filter(|w| matches!(w, CalibrationWarning::InsufficientHistory { .. }))
            .collect();
        assert_eq!(underfill.len(), 1);
        assert_eq!(
            underfill[0],
            &CalibrationWarning::InsufficientHistory { available: 50, expected: 261, years: 5 }
        );
        assert_eq!(est.returns_used, 49);
    }

    #[test]
    fn test_single_sample_is_undefined() {
        let series = weekly(&[42.0]);
        let est = estimate(&series, Lookback::OneYear).unwrap();

        assert!(est.stats.mean_growth.is_nan());
        assert!(est.stats.stdev_growth.is_nan());
        assert!(!est.stats.is_finite());
        assert!(est
            .warnings
            .contains(&CalibrationWarning::NoUsableReturns { samples: 1 }));
    }

    #[test]
    fn test_empty_series() {
        let series = HistoricalSeries::new("NONE", Vec::new());
        assert!(matches!(
            estimate(&series, Lookback::FiveYears),
            Err(LeapError::DataUnavailable(_))
        ));
    }

    #[test]
    fn test_annualized_display_values() {
        let stats = ReturnStatistics::new(1.002, 0.03);
        assert!((stats.annualized_drift() - 0.10434).abs() < 1e-9);
        assert!(stats.annualized_vol() > 0.21 && stats.annualized_vol() < 0.22);
    }
}
