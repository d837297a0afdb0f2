//! Core data types for LEAP Finder
//!
//! Defines fundamental types:
//! - Contract: Strike, expiry, quote and the derived payoff fields
//! - HistoricalSeries: Weekly closes with dividend flags
//! - Lookback: Allowed calibration windows
//! - LeapError: Error taxonomy shared by every module

pub mod contract;
pub mod history;
pub mod error;

pub use contract::*;
pub use history::*;
pub use error::*;
