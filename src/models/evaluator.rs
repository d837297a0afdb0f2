//! Contract evaluation against simulated prices
//!
//! For each expiration the simulated week nearest in calendar days is taken
//! as the outcome distribution. Its median (not mean: the compounded walk
//! is right-skewed) is the expected price at expiry, and each call is
//! valued as max(0, median - strike).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median};

use super::simulation::SimulationMatrix;
use crate::core::{Contract, ContractBook};

/// Row counts from one evaluation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Expirations evaluated
    pub expirations: usize,
    /// Contracts annotated
    pub rows: usize,
    /// Contracts whose gain ratio is NaN
    pub failed_rows: usize,
}

/// Round to cents
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Index of the date nearest to `target` (lowest index on ties)
pub fn nearest_index(dates: &[NaiveDate], target: NaiveDate) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;

    for (i, &date) in dates.iter().enumerate() {
        let distance = (date - target).num_days().abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }

    best.map(|(i, _)| i)
}

/// Median simulated price for the week nearest `expiry`, rounded to cents
pub fn expected_value(matrix: &SimulationMatrix, expiry: NaiveDate) -> f64 {
    let week = matrix.nearest_column(expiry);
    let outcomes = Data::new(matrix.column(week).to_vec());
    round2(outcomes.median())
}

/// Fill in the derived fields of one contract given the expected price.
///
/// Returns false if the gain ratio could not be computed.
pub fn annotate(contract: &mut Contract, ev: f64) -> bool {
    let value = round2((ev - contract.strike).max(0.0));
    contract.implied_expiration_value = Some(value);

    match contract.ask {
        Some(ask) if ask > 0.0 && ask.is_finite() => {
            contract.implied_factorial_gain = Some(round2(value / ask));
            true
        }
        _ => {
            contract.implied_factorial_gain = Some(f64::NAN);
            false
        }
    }
}

/// Annotate every contract in `book` from the simulated distribution.
///
/// The matrix is left untouched; a second call with the same inputs writes
/// the same values.
pub fn evaluate(matrix: &SimulationMatrix, book: &mut ContractBook) -> EvaluationSummary {
    let mut summary = EvaluationSummary::default();
    let horizon = matrix.horizon();

    for (&expiry, contracts) in book.iter_mut() {
        if expiry > horizon {
            tracing::debug!(
                "Expiry {} is past the simulation horizon {}; using the last week",
                expiry,
                horizon
            );
        }

        let ev = expected_value(matrix, expiry);
        summary.expirations += 1;

        for contract in contracts.iter_mut() {
            summary.rows += 1;
            if !annotate(contract, ev) {
                summary.failed_rows += 1;
                tracing::debug!(
                    "No gain ratio for {} strike {:.2}: ask is {:?}",
                    expiry,
                    contract.strike,
                    contract.ask
                );
            }
        }
    }

    summary
}
