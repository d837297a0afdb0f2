//! Market data source abstraction
//!
//! Everything a query needs from the outside world. `YahooClient` is the
//! live implementation; `StaticSource` serves fixed data for offline runs
//! and tests.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::core::{Contract, HistoricalSeries, LeapError, LeapResult, Lookback};

pub trait MarketDataSource {
    /// Latest traded price of the underlying
    fn spot_price(&self, symbol: &str) -> LeapResult<f64>;

    /// Listed option expiration dates
    fn expirations(&self, symbol: &str) -> LeapResult<Vec<NaiveDate>>;

    /// Call listings for one expiration
    fn call_chain(&self, symbol: &str, expiry: NaiveDate) -> LeapResult<Vec<Contract>>;

    /// Weekly closes for the lookback window, chronological, including the
    /// still-open current week
    fn weekly_history(&self, symbol: &str, lookback: Lookback) -> LeapResult<HistoricalSeries>;
}

/// In-memory data for a single symbol
#[derive(Debug, Clone)]
pub struct StaticSource {
    pub symbol: String,
    pub spot: f64,
    pub chains: HashMap<NaiveDate, Vec<Contract>>,
    /// Expirations listed without a chain behind them
    pub listed: Vec<NaiveDate>,
    pub history: HistoricalSeries,
}

impl StaticSource {
    pub fn new(symbol: impl Into<String>, spot: f64, history: HistoricalSeries) -> Self {
        Self {
            symbol: symbol.into(),
            spot,
            chains: HashMap::new(),
            listed: Vec::new(),
            history,
        }
    }

    pub fn with_chain(mut self, expiry: NaiveDate, calls: Vec<Contract>) -> Self {
        self.chains.insert(expiry, calls);
        self
    }

    /// List an expiration whose chain cannot be fetched
    pub fn with_listed_expiry(mut self, expiry: NaiveDate) -> Self {
        self.listed.push(expiry);
        self
    }

    fn check_symbol(&self, symbol: &str) -> LeapResult<()> {
        if symbol.eq_ignore_ascii_case(&self.symbol) {
            Ok(())
        } else {
            Err(LeapError::data_unavailable(format!("unknown symbol {}", symbol)))
        }
    }
}

impl MarketDataSource for StaticSource {
    fn spot_price(&self, symbol: &str) -> LeapResult<f64> {
        self.check_symbol(symbol)?;
        Ok(self.spot)
    }

    fn expirations(&self, symbol: &str) -> LeapResult<Vec<NaiveDate>> {
        self.check_symbol(symbol)?;
        let mut dates: Vec<NaiveDate> = self
            .chains
            .keys()
            .chain(self.listed.iter())
            .copied()
            .collect();
        dates.sort();
        dates.dedup();
        Ok(dates)
    }

    fn call_chain(&self, symbol: &str, expiry: NaiveDate) -> LeapResult<Vec<Contract>> {
        self.check_symbol(symbol)?;
        self.chains
            .get(&expiry)
            .cloned()
            .ok_or_else(|| LeapError::data_unavailable(format!("no chain for {} {}", symbol, expiry)))
    }

    fn weekly_history(&self, symbol: &str, _lookback: Lookback) -> LeapResult<HistoricalSeries> {
        self.check_symbol(symbol)?;
        Ok(self.history.clone())
    }
}
