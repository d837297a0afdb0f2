//! LEAP search
//!
//! Ties data retrieval and the projection engine together for one ticker:
//!
//! 1. **Selection**: LEAP expirations, liquid out-of-the-money calls
//! 2. **Calibration**: weekly growth statistics from the lookback window
//! 3. **Projection**: simulated price paths, median payoff per expiry
//!
//! The result is a `LeapReport`, rendered for the console by `report`.

mod config;
mod search;
pub mod report;

pub use config::*;
pub use search::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{ContractBook, Lookback};
use crate::models::{CalibrationWarning, EvaluationSummary, ReturnStatistics};

/// Result of a LEAP query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeapReport {
    /// Ticker, upper-cased
    pub ticker: String,
    /// Spot price the simulation started from
    pub spot: f64,
    /// Query date (column 0 of the simulation)
    pub as_of: NaiveDate,
    /// Calibration window
    pub lookback: Lookback,
    /// Calibrated weekly growth statistics
    pub stats: ReturnStatistics,
    /// Non-fatal calibration problems
    pub warnings: Vec<CalibrationWarning>,
    /// Annotated calls by expiry
    pub chains: ContractBook,
    /// Row counts from evaluation
    pub summary: EvaluationSummary,
}

impl LeapReport {
    /// No LEAP listings passed the filters
    pub fn is_empty(&self) -> bool {
        self.chains.values().all(|rows| rows.is_empty())
    }

    /// Contract with the highest finite gain ratio
    pub fn best_gain(&self) -> Option<&crate::core::Contract> {
        self.chains
            .values()
            .flatten()
            .filter(|c| c.implied_factorial_gain.map(f64::is_finite).unwrap_or(false))
            .max_by(|a, b| {
                let ga = a.implied_factorial_gain.unwrap_or(0.0);
                let gb = b.implied_factorial_gain.unwrap_or(0.0);
                ga.total_cmp(&gb)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Contract;

    #[test]
    fn test_best_gain_skips_nan() {
        let expiry = NaiveDate::from_ymd_opt(2028, 1, 21).unwrap();
        let mut rows = vec![
            Contract::new(expiry, 150.0),
            Contract::new(expiry, 160.0),
            Contract::new(expiry, 170.0),
        ];
        rows[0].implied_factorial_gain = Some(1.25);
        rows[1].implied_factorial_gain = Some(f64::NAN);
        rows[2].implied_factorial_gain = Some(0.4);

        let mut chains = ContractBook::new();
        chains.insert(expiry, rows);

        let report = LeapReport {
            ticker: "TEST".into(),
            spot: 140.0,
            as_of: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            lookback: Lookback::FiveYears,
            stats: ReturnStatistics::new(1.002, 0.03),
            warnings: Vec::new(),
            chains,
            summary: EvaluationSummary::default(),
        };

        assert!(!report.is_empty());
        assert_eq!(report.best_gain().map(|c| c.strike), Some(150.0));
    }
}
