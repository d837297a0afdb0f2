//! Weekly random-walk price simulation
//!
//! Each path is a multiplicative walk on weekly growth factors:
//!
//! S_0 = spot
//! S_c = S_{c-1} * G_c,   G_c ~ N(mean_growth, stdev_growth)
//!
//! drawn independently per path and per week. Prices are not floored at
//! zero; a wide growth distribution can push a path negative.
//!
//! Rows are independent of each other, columns are not: week c of a path
//! needs week c-1 of the same path.

use chrono::{Duration, NaiveDate};
use ndarray::{Array1, Array2, ArrayView1};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::returns::ReturnStatistics;
use crate::core::{LeapError, LeapResult};

/// Default number of simulated paths
pub const DEFAULT_PATH_COUNT: usize = 1000;
/// Default horizon in weeks (~2.4 years)
pub const DEFAULT_WEEK_COUNT: usize = 125;
/// Longest horizon accepted (~100 years); keeps column dates in range
pub const MAX_WEEK_COUNT: usize = 5218;

/// Simulated prices, rows = paths, columns = weeks from `start`
#[derive(Debug, Clone)]
pub struct SimulationMatrix {
    values: Array2<f64>,
    start: NaiveDate,
}

impl SimulationMatrix {
    /// Wrap a precomputed grid
    pub fn from_values(values: Array2<f64>, start: NaiveDate) -> LeapResult<Self> {
        if values.nrows() == 0 || values.ncols() == 0 {
            return Err(LeapError::invalid_parameter(
                "simulation matrix must have at least one path and one week",
            ));
        }
        if values.ncols() > MAX_WEEK_COUNT
            || start
                .checked_add_signed(Duration::weeks(values.ncols() as i64 - 1))
                .is_none()
        {
            return Err(LeapError::invalid_parameter(format!(
                "simulation horizon of {} weeks from {} is out of range",
                values.ncols(),
                start
            )));
        }
        Ok(Self { values, start })
    }

    pub fn path_count(&self) -> usize {
        self.values.nrows()
    }

    pub fn week_count(&self) -> usize {
        self.values.ncols()
    }

    /// Calendar date a column stands for
    pub fn column_date(&self, week: usize) -> NaiveDate {
        self.start + Duration::weeks(week as i64)
    }

    /// Calendar dates of all columns
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.week_count()).map(|w| self.column_date(w)).collect()
    }

    /// Last simulated date
    pub fn horizon(&self) -> NaiveDate {
        self.column_date(self.week_count() - 1)
    }

    /// Outcomes across all paths for one week
    pub fn column(&self, week: usize) -> ArrayView1<'_, f64> {
        self.values.column(week)
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Column whose date is nearest to `date`
    pub fn nearest_column(&self, date: NaiveDate) -> usize {
        super::evaluator::nearest_index(&self.dates(), date).unwrap_or(0)
    }
}

/// Normal distribution of weekly growth factors
pub fn growth_distribution(stats: &ReturnStatistics) -> LeapResult<Normal<f64>> {
    if !stats.is_finite() {
        return Err(LeapError::invalid_parameter(format!(
            "growth statistics are not finite (mean {}, stdev {})",
            stats.mean_growth, stats.stdev_growth
        )));
    }

    if stats.stdev_growth < 0.0 {
        return Err(LeapError::invalid_parameter(format!(
            "growth stdev must not be negative, got {}",
            stats.stdev_growth
        )));
    }

    Normal::new(stats.mean_growth, stats.stdev_growth)
        .map_err(|e| LeapError::invalid_parameter(format!("growth distribution: {}", e)))
}

/// Simulate a single path of `week_count` prices starting at `spot`
pub fn simulate_path<R: Rng + ?Sized>(
    spot: f64,
    growth: &Normal<f64>,
    week_count: usize,
    rng: &mut R,
) -> Vec<f64> {
    let mut path = Vec::with_capacity(week_count);
    if week_count == 0 {
        return path;
    }

    let mut price = spot;
    path.push(price);

    for _ in 1..week_count {
        price *= growth.sample(rng);
        path.push(price);
    }

    path
}

/// Simulate `path_count` independent paths over `week_count` weeks.
///
/// With a seed the result is reproducible; without one the generator is
/// seeded from OS entropy.
pub fn simulate(
    spot: f64,
    stats: &ReturnStatistics,
    path_count: usize,
    week_count: usize,
    start: NaiveDate,
    seed: Option<u64>,
) -> LeapResult<SimulationMatrix> {
    if path_count == 0 {
        return Err(LeapError::invalid_parameter("path_count must be positive"));
    }
    if week_count == 0 {
        return Err(LeapError::invalid_parameter("week_count must be positive"));
    }
    if week_count > MAX_WEEK_COUNT {
        return Err(LeapError::invalid_parameter(format!(
            "week_count must be at most {}, got {}",
            MAX_WEEK_COUNT, week_count
        )));
    }
    if !spot.is_finite() || spot <= 0.0 {
        return Err(LeapError::invalid_parameter(format!(
            "spot price must be positive, got {}",
            spot
        )));
    }

    let growth = growth_distribution(stats)?;

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut values = Array2::<f64>::zeros((path_count, week_count));
    for mut row in values.rows_mut() {
        let path = simulate_path(spot, &growth, week_count, &mut rng);
        row.assign(&Array1::from(path));
    }

    tracing::info!(
        "Simulated {} paths over {} weeks from spot {:.2}",
        path_count,
        week_count,
        spot
    );

    SimulationMatrix::from_values(values, start)
}
