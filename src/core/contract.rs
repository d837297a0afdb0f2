//! Option contract listings
//!
//! A call listing as fetched from the chain, plus the two fields the
//! evaluator fills in once a price projection exists.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contracts grouped by expiration date, earliest first
pub type ContractBook = BTreeMap<NaiveDate, Vec<Contract>>;

/// Single option listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Expiration date
    pub expiry: NaiveDate,
    /// Strike price
    pub strike: f64,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
    /// Volume traded in the last session
    pub volume: Option<u64>,
    /// Time of the most recent trade
    pub last_trade: Option<DateTime<Utc>>,
    /// Exchange contract symbol (e.g., "AAPL270115C00200000")
    pub contract_symbol: Option<String>,
    /// Median simulated payoff at expiry, net of strike, floored at zero
    pub implied_expiration_value: Option<f64>,
    /// Implied expiration value divided by ask; NaN when ask is zero or missing
    pub implied_factorial_gain: Option<f64>,
}

impl Contract {
    /// Create an unannotated listing
    pub fn new(expiry: NaiveDate, strike: f64) -> Self {
        Self {
            expiry,
            strike,
            bid: None,
            ask: None,
            volume: None,
            last_trade: None,
            contract_symbol: None,
            implied_expiration_value: None,
            implied_factorial_gain: None,
        }
    }

    /// Builder-style quote setter
    pub fn with_quote(mut self, bid: Option<f64>, ask: Option<f64>) -> Self {
        self.bid = bid;
        self.ask = ask;
        self
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_last_trade(mut self, last_trade: DateTime<Utc>) -> Self {
        self.last_trade = Some(last_trade);
        self
    }

    /// Days since the last trade, if the listing has ever traded
    pub fn days_since_trade(&self, today: NaiveDate) -> Option<i64> {
        self.last_trade
            .map(|ts| (today - ts.date_naive()).num_days())
    }

    /// Call is out of the money at `spot`
    pub fn is_otm_call(&self, spot: f64) -> bool {
        self.strike > spot
    }

    /// Gain ratio could not be computed for this row
    pub fn gain_failed(&self) -> bool {
        self.implied_factorial_gain.map(f64::is_nan).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_days_since_trade() {
        let expiry = NaiveDate::from_ymd_opt(2027, 1, 15).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let traded = Utc.with_ymd_and_hms(2026, 2, 20, 15, 30, 0).unwrap();

        let contract = Contract::new(expiry, 200.0).with_last_trade(traded);
        assert_eq!(contract.days_since_trade(today), Some(9));

        let never = Contract::new(expiry, 200.0);
        assert_eq!(never.days_since_trade(today), None);
    }

    #[test]
    fn test_annotation_flags() {
        let expiry = NaiveDate::from_ymd_opt(2027, 1, 15).unwrap();
        let mut contract = Contract::new(expiry, 200.0).with_quote(Some(9.5), Some(10.0));

        assert!(!contract.gain_failed());
        assert!(contract.is_otm_call(180.0));
        assert!(!contract.is_otm_call(220.0));

        contract.implied_expiration_value = Some(0.0);
        contract.implied_factorial_gain = Some(f64::NAN);
        assert!(contract.gain_failed());
    }
}
