//! LeapFinder - Main facade for a LEAP query
//!
//! Fetch, filter, calibrate, simulate, evaluate.

use chrono::{NaiveDate, Utc};

use crate::core::{ContractBook, LeapError, LeapResult};
use crate::data::{leap_expirations, liquid_otm_calls, MarketDataSource};
use crate::models::{estimate, evaluate, simulate};

use super::{FinderConfig, LeapReport};

/// Runs the full query pipeline against a market data source
pub struct LeapFinder<S: MarketDataSource> {
    source: S,
    config: FinderConfig,
}

impl<S: MarketDataSource> LeapFinder<S> {
    /// Create a finder with default configuration
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: FinderConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(source: S, config: FinderConfig) -> Self {
        Self { source, config }
    }

    /// Get current configuration
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Run a query dated today (UTC)
    pub fn run(&self, ticker: &str) -> LeapResult<LeapReport> {
        self.run_as_of(ticker, Utc::now().date_naive())
    }

    /// Run a query as of a given date
    ///
    /// Any data or parameter failure aborts the whole query; rows whose gain
    /// ratio cannot be computed are kept with a NaN gain.
    pub fn run_as_of(&self, ticker: &str, today: NaiveDate) -> LeapResult<LeapReport> {
        self.config.validate()?;

        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(LeapError::invalid_parameter("ticker must not be empty"));
        }

        let spot = self.source.spot_price(&ticker)?;
        tracing::info!("{} spot price: {:.2}", ticker, spot);

        let expirations = self.source.expirations(&ticker)?;
        let leaps = leap_expirations(&expirations, today, self.config.min_days_to_expiry);
        tracing::info!(
            "{}: {} of {} expirations are LEAPs",
            ticker,
            leaps.len(),
            expirations.len()
        );

        let mut chains = ContractBook::new();
        for expiry in leaps {
            let calls = self.source.call_chain(&ticker, expiry).map_err(|e| match e {
                LeapError::DataUnavailable(msg) => LeapError::data_unavailable(format!(
                    "chain for {} expiring {}: {}",
                    ticker, expiry, msg
                )),
                other => other,
            })?;
            let calls = liquid_otm_calls(calls, spot, today, self.config.max_trade_age_days);
            chains.insert(expiry, calls);
        }

        let mut history = self.source.weekly_history(&ticker, self.config.lookback)?;
        history.drop_partial_bar();

        let estimate = estimate(&history, self.config.lookback)?;

        let matrix = simulate(
            spot,
            &estimate.stats,
            self.config.path_count,
            self.config.week_count,
            today,
            self.config.seed,
        )?;

        let summary = evaluate(&matrix, &mut chains);
        if summary.failed_rows > 0 {
            tracing::warn!(
                "{}: {} of {} contracts have no ask; gain left undefined",
                ticker,
                summary.failed_rows,
                summary.rows
            );
        }

        Ok(LeapReport {
            ticker,
            spot,
            as_of: today,
            lookback: self.config.lookback,
            stats: estimate.stats,
            warnings: estimate.warnings,
            chains,
            summary,
        })
    }
}
