//! # LEAP Finder - Monte Carlo projection of long-dated call payoffs
//!
//! Finds long-dated call options (LEAPs) with a high realistic return on
//! investment, assuming the underlying keeps growing the way it did over a
//! historical lookback window.
//!
//! ## Overview
//!
//! The projection engine has three stages:
//! - **Calibration**: Weekly growth mean and stdev from historical closes
//! - **Simulation**: Independent random walks on those growth factors
//! - **Evaluation**: Median simulated price at each expiry, payoff net of
//!   strike, and payoff divided by the ask (the "factorial gain")
//!
//! ## Key Components
//!
//! - **Data Fetching**: Yahoo Finance quotes, option chains and weekly history
//! - **Filters**: LEAP expirations, liquid out-of-the-money calls
//! - **Models**: Return estimator, path simulator, evaluator
//! - **Finder**: Query pipeline and console report
//!
//! ## Usage
//!
//! ```rust,no_run
//! use leap_finder::prelude::*;
//!
//! let client = YahooClient::new().unwrap();
//! let finder = LeapFinder::with_config(client, FinderConfig::default());
//!
//! let report = finder.run("AAPL").unwrap();
//! println!("{}", render(&report));
//! ```
//!
//! ## What This Model Does NOT Do
//!
//! - Price options under risk-neutral assumptions (no Black-Scholes, no Greeks)
//! - Floor simulated prices at zero
//! - Cache or persist any data between queries

pub mod core;
pub mod data;
pub mod finder;
pub mod models;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        Contract, ContractBook, HistoricalSample, HistoricalSeries, LeapError, LeapResult,
        Lookback,
    };

    // Data fetching
    pub use crate::data::{
        leap_expirations, liquid_otm_calls, MarketDataSource, StaticSource, YahooClient,
    };

    // Models
    pub use crate::models::{
        estimate, evaluate, expected_value, nearest_index, simulate, simulate_path,
        CalibrationWarning, EvaluationSummary, ReturnEstimate, ReturnStatistics,
        SimulationMatrix,
    };

    // Finder
    pub use crate::finder::report::{render, render_chain};
    pub use crate::finder::{FinderConfig, LeapFinder, LeapReport};
}

// Re-export main types at crate root
pub use crate::core::{LeapError, LeapResult};
pub use crate::finder::{FinderConfig, LeapFinder, LeapReport};
