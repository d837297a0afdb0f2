//! Weekly price history
//!
//! Chronological weekly closes with dividend flags, and the lookback
//! windows the history can be requested for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{LeapError, LeapResult};

/// Nominal number of weeks in a year
pub const WEEKS_PER_YEAR: f64 = 52.17;

/// Historical calibration window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Lookback {
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
}

impl Lookback {
    pub fn years(&self) -> u32 {
        match self {
            Lookback::OneYear => 1,
            Lookback::TwoYears => 2,
            Lookback::FiveYears => 5,
            Lookback::TenYears => 10,
        }
    }

    /// Weekly samples a fully populated window should contain
    pub fn nominal_weeks(&self) -> usize {
        (self.years() as f64 * WEEKS_PER_YEAR).ceil() as usize
    }

    /// Yahoo chart `range` parameter
    pub fn range_param(&self) -> &'static str {
        match self {
            Lookback::OneYear => "1y",
            Lookback::TwoYears => "2y",
            Lookback::FiveYears => "5y",
            Lookback::TenYears => "10y",
        }
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Lookback::FiveYears
    }
}

impl TryFrom<u32> for Lookback {
    type Error = LeapError;

    fn try_from(years: u32) -> LeapResult<Self> {
        match years {
            1 => Ok(Lookback::OneYear),
            2 => Ok(Lookback::TwoYears),
            5 => Ok(Lookback::FiveYears),
            10 => Ok(Lookback::TenYears),
            other => Err(LeapError::invalid_parameter(format!(
                "lookback must be 1, 2, 5 or 10 years, got {}",
                other
            ))),
        }
    }
}

impl From<Lookback> for u32 {
    fn from(lookback: Lookback) -> u32 {
        lookback.years()
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.years() {
            1 => write!(f, "1 year"),
            n => write!(f, "{} years", n),
        }
    }
}

/// One weekly bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSample {
    /// Start of the week
    pub timestamp: DateTime<Utc>,
    /// Closing price
    pub close: f64,
    /// Dividend paid during the week (0.0 if none)
    pub dividend: f64,
}

impl HistoricalSample {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close, dividend: 0.0 }
    }

    pub fn with_dividend(mut self, dividend: f64) -> Self {
        self.dividend = dividend;
        self
    }

    pub fn is_dividend(&self) -> bool {
        self.dividend != 0.0
    }
}

/// Chronological weekly closes for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub symbol: String,
    pub samples: Vec<HistoricalSample>,
}

impl HistoricalSeries {
    pub fn new(symbol: impl Into<String>, samples: Vec<HistoricalSample>) -> Self {
        Self {
            symbol: symbol.into(),
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Remove the most recent bar; the current week has not closed yet
    pub fn drop_partial_bar(&mut self) -> Option<HistoricalSample> {
        self.samples.pop()
    }

    /// Samples that did not pay a dividend, order preserved
    pub fn without_dividends(&self) -> impl Iterator<Item = &HistoricalSample> {
        self.samples.iter().filter(|s| !s.is_dividend())
    }

    /// Closing prices, order preserved
    pub fn closes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.close).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn weekly(closes: &[f64]) -> HistoricalSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let samples = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| HistoricalSample::new(start + Duration::weeks(i as i64), c))
            .collect();
        HistoricalSeries::new("TEST", samples)
    }

    #[test]
    fn test_lookback_conversion() {
        assert_eq!(Lookback::try_from(5).unwrap(), Lookback::FiveYears);
        assert_eq!(Lookback::try_from(10).unwrap(), Lookback::TenYears);
        assert!(matches!(
            Lookback::try_from(3),
            Err(LeapError::InvalidParameter(_))
        ));
        assert!(Lookback::try_from(0).is_err());
    }

    #[test]
    fn test_nominal_weeks() {
        assert_eq!(Lookback::OneYear.nominal_weeks(), 53);
        assert_eq!(Lookback::TwoYears.nominal_weeks(), 105);
        assert_eq!(Lookback::FiveYears.nominal_weeks(), 261);
        assert_eq!(Lookback::TenYears.nominal_weeks(), 522);
    }

    #[test]
    fn test_lookback_serde() {
        let parsed: Lookback = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Lookback::TwoYears);
        assert!(serde_json::from_str::<Lookback>("7").is_err());
        assert_eq!(serde_json::to_string(&Lookback::TenYears).unwrap(), "10");
    }

    #[test]
    fn test_drop_partial_bar() {
        let mut series = weekly(&[10.0, 11.0, 12.0]);
        let dropped = series.drop_partial_bar().unwrap();

        assert_eq!(dropped.close, 12.0);
        assert_eq!(series.closes(), vec![10.0, 11.0]);
    }

    #[test]
    fn test_without_dividends() {
        let mut series = weekly(&[10.0, 11.0, 12.0, 13.0]);
        series.samples[2] = series.samples[2].with_dividend(0.25);

        let kept: Vec<f64> = series.without_dividends().map(|s| s.close).collect();
        assert_eq!(kept, vec![10.0, 11.0, 13.0]);
    }
}
