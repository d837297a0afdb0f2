//! Data fetching
//!
//! Handles:
//! - Market data source trait and an in-memory implementation
//! - Yahoo Finance API for quotes, option chains and weekly history (free)
//! - LEAP and liquidity filters over the fetched chains

pub mod source;
pub mod yahoo;
pub mod filters;

pub use source::*;
pub use yahoo::*;
pub use filters::*;
