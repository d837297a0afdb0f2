//! Configuration for a LEAP query

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::{LeapError, LeapResult, Lookback};
use crate::data::{LEAP_MIN_DAYS, MAX_TRADE_AGE_DAYS};
use crate::models::{DEFAULT_PATH_COUNT, DEFAULT_WEEK_COUNT, MAX_WEEK_COUNT};

/// Configuration for LEAP search and price projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Number of simulated price paths
    /// Default: 1000
    pub path_count: usize,

    /// Simulation horizon in weeks, column 0 is today
    /// Default: 125 (~2.4 years, past the longest listed LEAPs)
    pub week_count: usize,

    /// History window used to calibrate weekly returns
    /// Default: 5 years
    pub lookback: Lookback,

    /// Fixed RNG seed; None draws from OS entropy
    /// Default: None
    pub seed: Option<u64>,

    /// Expirations must be strictly more than this many days out
    /// Default: 365
    pub min_days_to_expiry: i64,

    /// Drop listings whose last trade is older than this many days
    /// Default: 60
    pub max_trade_age_days: i64,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            path_count: DEFAULT_PATH_COUNT,
            week_count: DEFAULT_WEEK_COUNT,
            lookback: Lookback::default(),
            seed: None,
            min_days_to_expiry: LEAP_MIN_DAYS,
            max_trade_age_days: MAX_TRADE_AGE_DAYS,
        }
    }
}

impl FinderConfig {
    /// Small, seeded run for quick looks
    pub fn quick() -> Self {
        Self {
            path_count: 200,
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> LeapResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> LeapResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| LeapError::Serialization(e.to_string()))?;

        // An out-of-set lookback is a bad setting, not bad JSON
        if let Some(years) = value.get("lookback").and_then(|v| v.as_u64()) {
            let years = u32::try_from(years).map_err(|_| {
                LeapError::invalid_parameter(format!("lookback of {} years not supported", years))
            })?;
            Lookback::try_from(years)?;
        }

        let config: Self =
            serde_json::from_value(value).map_err(|e| LeapError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> LeapResult<()> {
        if self.path_count == 0 {
            return Err(LeapError::invalid_parameter("path_count must be positive"));
        }
        if self.week_count == 0 {
            return Err(LeapError::invalid_parameter("week_count must be positive"));
        }
        if self.week_count > MAX_WEEK_COUNT {
            return Err(LeapError::invalid_parameter(format!(
                "week_count must be at most {}",
                MAX_WEEK_COUNT
            )));
        }
        if self.min_days_to_expiry < 0 {
            return Err(LeapError::invalid_parameter("min_days_to_expiry must not be negative"));
        }
        if self.max_trade_age_days < 0 {
            return Err(LeapError::invalid_parameter("max_trade_age_days must not be negative"));
        }
        Ok(())
    }
}
