//! Price projection engine
//!
//! Implements:
//! - Return calibration (weekly growth mean and stdev from history)
//! - Random-walk path simulation
//! - Contract evaluation (median payoff and return multiple per expiry)

pub mod returns;
pub mod simulation;
pub mod evaluator;

pub use returns::*;
pub use simulation::*;
pub use evaluator::*;
