//! Strategy comparison on growing prefixes of an input.
//!
//! Runs every strategy on the first 2, 3, … n locations, always starting
//! at the first one, and records cost and wall-clock time per strategy.
//! The exact strategy is skipped once a prefix exceeds
//! [`MAX_EXACT_LOCATIONS`].

use std::time::Duration;

use serde::Serialize;

use crate::distance::DistanceModel;
use crate::error::Result;
use crate::exact::MAX_EXACT_LOCATIONS;
use crate::models::{validate_locations, Location};
use crate::optimizer::{Optimizer, OptimizerConfig, Strategy};

/// Results for one prefix size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRow {
    /// Number of locations in the prefix.
    pub size: usize,
    /// Nearest-neighbour route cost.
    pub nn_cost: f64,
    /// Nearest-neighbour run time.
    pub nn_elapsed: Duration,
    /// Nearest-neighbour + 2-opt route cost.
    pub two_opt_cost: f64,
    /// Nearest-neighbour + 2-opt run time, construction included.
    pub two_opt_elapsed: Duration,
    /// Optimal cost, if the prefix was small enough to enumerate.
    pub exact_cost: Option<f64>,
    /// Exhaustive search run time.
    pub exact_elapsed: Option<Duration>,
}

/// Benchmarks all strategies on each prefix of `locations`.
///
/// # Examples
///
/// ```
/// use u_tour::benchmark::prefix_benchmark;
/// use u_tour::distance::Euclidean;
/// use u_tour::models::Location;
///
/// let locations: Vec<Location> = (0..5)
///     .map(|i| Location::new(format!("L{i}"), i as f64, (i % 2) as f64).unwrap())
///     .collect();
/// let rows = prefix_benchmark(&locations, &Euclidean, false).unwrap();
/// assert_eq!(rows.len(), 4);
/// assert!(rows.iter().all(|r| r.two_opt_cost <= r.nn_cost + 1e-9));
/// ```
pub fn prefix_benchmark<M: DistanceModel>(
    locations: &[Location],
    model: &M,
    closed_tour: bool,
) -> Result<Vec<BenchmarkRow>> {
    validate_locations(locations)?;
    let optimizer = Optimizer::with_model(model);
    let base = OptimizerConfig::new().with_closed_tour(closed_tour);
    let n = locations.len();
    let sizes = if n == 1 { 1..=1 } else { 2..=n };

    let mut rows = Vec::with_capacity(sizes.clone().count());
    for size in sizes {
        let prefix = &locations[..size];
        let nn = optimizer.optimize(
            prefix,
            &base.clone().with_strategy(Strategy::NearestNeighbour),
        )?;
        let two_opt = optimizer.optimize(
            prefix,
            &base.clone().with_strategy(Strategy::NearestNeighbourTwoOpt),
        )?;
        let exact = if size <= MAX_EXACT_LOCATIONS {
            Some(optimizer.optimize(prefix, &base.clone().with_strategy(Strategy::Exact))?)
        } else {
            None
        };

        log::debug!(
            "benchmark: size={size} nn={:.3} nn+2opt={:.3} exact={:?}",
            nn.total_cost(),
            two_opt.total_cost(),
            exact.as_ref().map(|e| e.total_cost())
        );
        rows.push(BenchmarkRow {
            size,
            nn_cost: nn.total_cost(),
            nn_elapsed: nn.elapsed,
            two_opt_cost: two_opt.total_cost(),
            two_opt_elapsed: two_opt.elapsed,
            exact_cost: exact.as_ref().map(|e| e.total_cost()),
            exact_elapsed: exact.as_ref().map(|e| e.elapsed),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Euclidean;
    use crate::error::RoutingError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_locations(n: usize, seed: u64) -> Vec<Location> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|i| {
                Location::new(
                    format!("L{i}"),
                    rng.random_range(0.0..100.0),
                    rng.random_range(0.0..100.0),
                )
                .expect("valid")
            })
            .collect()
    }

    #[test]
    fn test_rows_cover_prefixes() {
        let locs = random_locations(12, 2);
        let rows = prefix_benchmark(&locs, &Euclidean, true).expect("valid");
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0].size, 2);
        assert_eq!(rows[10].size, 12);
    }

    #[test]
    fn test_cost_ordering() {
        let locs = random_locations(9, 4);
        for row in prefix_benchmark(&locs, &Euclidean, false).expect("valid") {
            let exact = row.exact_cost.expect("small prefix");
            assert!(exact <= row.two_opt_cost + 1e-9);
            assert!(row.two_opt_cost <= row.nn_cost + 1e-9);
        }
    }

    #[test]
    fn test_exact_skipped_past_limit() {
        let locs = random_locations(MAX_EXACT_LOCATIONS + 2, 6);
        let rows = prefix_benchmark(&locs, &Euclidean, false).expect("valid");
        let last = rows.last().expect("rows");
        assert!(last.exact_cost.is_none());
        assert!(last.exact_elapsed.is_none());
        assert!(rows[MAX_EXACT_LOCATIONS - 2].exact_cost.is_some());
    }

    #[test]
    fn test_single_location() {
        let locs = random_locations(1, 0);
        let rows = prefix_benchmark(&locs, &Euclidean, false).expect("valid");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].nn_cost, 0.0);
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            prefix_benchmark(&[], &Euclidean, false),
            Err(RoutingError::EmptyInput)
        ));
    }
}
