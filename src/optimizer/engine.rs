//! The optimize entry point.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::{OptimizerConfig, Strategy};
use crate::constructive::NearestNeighbourBuilder;
use crate::distance::{DistanceModel, Euclidean};
use crate::error::Result;
use crate::exact::brute_force;
use crate::local_search::{Convergence, TwoOptImprover};
use crate::models::{validate_locations, Location, Route};

/// Final route of an optimize call plus how it was obtained.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedRoute {
    /// Final visiting order and its cost.
    pub route: Route,
    /// Strategy that produced it.
    pub strategy: Strategy,
    /// Whether 2-opt converged, ran out of budget, or did not run.
    pub convergence: Convergence,
    /// 2-opt scans started.
    pub passes: usize,
    /// 2-opt moves applied.
    pub moves: usize,
    /// Cost of the route before improvement.
    pub construction_cost: f64,
    /// Wall-clock time spent in the call.
    pub elapsed: Duration,
}

impl OptimizedRoute {
    /// Total cost of the final route.
    pub fn total_cost(&self) -> f64 {
        self.route.total_cost()
    }

    /// Stop ids in visit order.
    pub fn ids(&self) -> Vec<&str> {
        self.route.ids()
    }
}

/// Runs construction and improvement over a distance model.
///
/// Holds no state between calls, so one optimizer can serve any number of
/// independent inputs, including from several threads at once.
///
/// # Examples
///
/// ```
/// use u_tour::local_search::Convergence;
/// use u_tour::models::Location;
/// use u_tour::optimizer::{Optimizer, OptimizerConfig};
///
/// let locations = vec![
///     Location::new("A", 0.0, 0.0).unwrap(),
///     Location::new("B", 10.0, 0.0).unwrap(),
///     Location::new("C", 0.0, 10.0).unwrap(),
///     Location::new("D", 7.0, 7.0).unwrap(),
/// ];
/// let result = Optimizer::new()
///     .optimize(&locations, &OptimizerConfig::default())
///     .unwrap();
/// assert_eq!(result.ids(), vec!["A", "B", "D", "C"]);
/// assert_eq!(result.convergence, Convergence::Converged);
/// assert!(result.total_cost() < result.construction_cost);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Optimizer<M = Euclidean> {
    model: M,
}

impl Optimizer<Euclidean> {
    /// Creates an optimizer using straight-line distances.
    pub fn new() -> Self {
        Self { model: Euclidean }
    }
}

impl<M: DistanceModel> Optimizer<M> {
    /// Creates an optimizer over a custom distance model.
    pub fn with_model(model: M) -> Self {
        Self { model }
    }

    /// Distance model in use.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Computes a route over `locations` according to `config`.
    ///
    /// Fails with [`RoutingError::EmptyInput`](crate::error::RoutingError::EmptyInput),
    /// [`InvalidLocation`](crate::error::RoutingError::InvalidLocation) or
    /// [`DuplicateLocationId`](crate::error::RoutingError::DuplicateLocationId)
    /// for unusable input. Running out of 2-opt budget is not an error; it
    /// shows up as [`Convergence::BudgetExhausted`].
    pub fn optimize(
        &self,
        locations: &[Location],
        config: &OptimizerConfig,
    ) -> Result<OptimizedRoute> {
        let started = Instant::now();
        validate_locations(locations)?;
        config.validate()?;
        let kind = config.route_kind();
        let start = config.start.as_deref();

        if config.max_iterations.is_some() && !config.strategy.improves() {
            log::warn!(
                "optimizer: max_iterations ignored for strategy={}",
                config.strategy
            );
        }

        let mut route = match config.strategy {
            Strategy::Exact => brute_force(locations, &self.model, start, kind)?,
            Strategy::NearestNeighbour | Strategy::NearestNeighbourTwoOpt => {
                let builder = NearestNeighbourBuilder::new(kind);
                match &config.multi_start {
                    Some(starts) => builder.build_multi_start(locations, &self.model, starts)?,
                    None => builder.build(locations, &self.model, start)?,
                }
            }
        };
        let construction_cost = route.total_cost();

        let (convergence, passes, moves) = if config.strategy.improves() {
            let report = TwoOptImprover::new()
                .with_max_iterations(config.max_iterations)
                .improve(&mut route, &self.model)?;
            (report.status, report.passes, report.moves)
        } else {
            (Convergence::NotRun, 0, 0)
        };

        let elapsed = started.elapsed();
        log::info!(
            "optimizer: strategy={} n={} cost={:.3} convergence={convergence:?} elapsed_ms={}",
            config.strategy,
            route.len(),
            route.total_cost(),
            elapsed.as_millis()
        );
        Ok(OptimizedRoute {
            route,
            strategy: config.strategy,
            convergence,
            passes,
            moves,
            construction_cost,
            elapsed,
        })
    }
}

/// Optimizes `locations` with straight-line distances.
pub fn optimize(locations: &[Location], config: &OptimizerConfig) -> Result<OptimizedRoute> {
    Optimizer::new().optimize(locations, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::MultiStart;
    use crate::distance::CostMatrix;
    use crate::error::RoutingError;
    use crate::models::RouteKind;
    use crate::optimizer::Strategy;
    use proptest::prelude::*;

    fn loc(id: &str, x: f64, y: f64) -> Location {
        Location::new(id, x, y).expect("valid")
    }

    fn square() -> Vec<Location> {
        vec![
            loc("A", 0.0, 0.0),
            loc("B", 10.0, 0.0),
            loc("C", 10.0, 10.0),
            loc("D", 0.0, 10.0),
        ]
    }

    fn crossing() -> Vec<Location> {
        vec![
            loc("A", 0.0, 0.0),
            loc("B", 10.0, 0.0),
            loc("C", 0.0, 10.0),
            loc("D", 7.0, 7.0),
        ]
    }

    #[test]
    fn test_square_path_no_improvement() {
        let config = OptimizerConfig::new().with_start("A");
        let result = optimize(&square(), &config).expect("valid");
        assert_eq!(result.ids(), vec!["A", "B", "C", "D"]);
        assert!((result.total_cost() - 30.0).abs() < 1e-10);
        assert_eq!(result.moves, 0);
        assert_eq!(result.convergence, Convergence::Converged);
        assert_eq!(result.route.kind(), RouteKind::Open);
    }

    #[test]
    fn test_crossing_is_uncrossed() {
        let nn_only = OptimizerConfig::new()
            .with_strategy(Strategy::NearestNeighbour)
            .with_start("A");
        let nn = optimize(&crossing(), &nn_only).expect("valid");
        assert_eq!(nn.ids(), vec!["A", "D", "B", "C"]);
        assert_eq!(nn.convergence, Convergence::NotRun);

        let improved = optimize(&crossing(), &OptimizerConfig::new().with_start("A"))
            .expect("valid");
        assert_eq!(improved.ids(), vec!["A", "B", "D", "C"]);
        assert!(improved.total_cost() < nn.total_cost());
        assert!((improved.construction_cost - nn.total_cost()).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_square_has_no_crossing() {
        // C and D tie as nearest to A; input order picks C and the path never crosses.
        let locs = vec![
            loc("A", 0.0, 0.0),
            loc("B", 10.0, 10.0),
            loc("C", 10.0, 0.0),
            loc("D", 0.0, 10.0),
        ];
        let nn_only = OptimizerConfig::new()
            .with_strategy(Strategy::NearestNeighbour)
            .with_start("A");
        let nn = optimize(&locs, &nn_only).expect("valid");
        assert_eq!(nn.ids(), vec!["A", "C", "B", "D"]);
        assert!((nn.total_cost() - 30.0).abs() < 1e-10);

        let improved = optimize(&locs, &OptimizerConfig::new().with_start("A")).expect("valid");
        assert_eq!(improved.ids(), vec!["A", "C", "B", "D"]);
        assert_eq!(improved.moves, 0);
        assert_eq!(improved.convergence, Convergence::Converged);
    }

    #[test]
    fn test_single_location() {
        let result = optimize(&[loc("only", 5.0, 5.0)], &OptimizerConfig::new()).expect("valid");
        assert_eq!(result.route.len(), 1);
        assert_eq!(result.total_cost(), 0.0);
        assert_eq!(result.moves, 0);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            optimize(&[], &OptimizerConfig::new()),
            Err(RoutingError::EmptyInput)
        ));
    }

    #[test]
    fn test_zero_budget() {
        let config = OptimizerConfig::new().with_start("A").with_max_iterations(0);
        let result = optimize(&crossing(), &config).expect("valid");
        assert_eq!(result.ids(), vec!["A", "D", "B", "C"]);
        assert_eq!(result.convergence, Convergence::BudgetExhausted);
        assert_eq!(result.total_cost(), result.construction_cost);
    }

    #[test]
    fn test_duplicate_ids() {
        let mut locs = square();
        locs.push(loc("B", 3.0, 3.0));
        assert!(matches!(
            optimize(&locs, &OptimizerConfig::new()),
            Err(RoutingError::DuplicateLocationId(id)) if id == "B"
        ));
    }

    #[test]
    fn test_unknown_start() {
        let config = OptimizerConfig::new().with_start("Depot");
        assert!(matches!(
            optimize(&square(), &config),
            Err(RoutingError::UnknownStart(_))
        ));
    }

    #[test]
    fn test_unknown_strategy_from_config() {
        assert!(matches!(
            OptimizerConfig::from_json(r#"{"strategy":"tabu"}"#),
            Err(RoutingError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_conflicting_config() {
        let config = OptimizerConfig::new()
            .with_start("A")
            .with_multi_start(MultiStart::All);
        assert!(matches!(
            optimize(&square(), &config),
            Err(RoutingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_closed_tour() {
        let config = OptimizerConfig::new().with_closed_tour(true);
        let result = optimize(&square(), &config).expect("valid");
        assert!((result.total_cost() - 40.0).abs() < 1e-10);
        assert!(result.route.is_closed());
    }

    #[test]
    fn test_exact_strategy() {
        let config = OptimizerConfig::new().with_strategy(Strategy::Exact);
        let result = optimize(&crossing(), &config).expect("valid");
        assert_eq!(result.ids(), vec!["A", "B", "D", "C"]);
        assert_eq!(result.convergence, Convergence::NotRun);
    }

    #[test]
    fn test_multi_start() {
        let config = OptimizerConfig::new()
            .with_strategy(Strategy::NearestNeighbour)
            .with_multi_start(MultiStart::All);
        let result = optimize(&crossing(), &config).expect("valid");
        assert_eq!(result.ids(), vec!["B", "D", "C", "A"]);
    }

    #[test]
    fn test_custom_model() {
        // A line A-B-C-D in cost terms, whatever the coordinates say.
        let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        #[rustfmt::skip]
        let cm = CostMatrix::new(ids, vec![
            0.0, 1.0, 2.0, 3.0,
            1.0, 0.0, 1.0, 2.0,
            2.0, 1.0, 0.0, 1.0,
            3.0, 2.0, 1.0, 0.0,
        ]).expect("valid");
        let locs = vec![
            loc("A", 0.0, 0.0),
            loc("C", 0.0, 0.0),
            loc("D", 0.0, 0.0),
            loc("B", 0.0, 0.0),
        ];
        let result = Optimizer::with_model(cm)
            .optimize(&locs, &OptimizerConfig::new())
            .expect("valid");
        assert_eq!(result.ids(), vec!["A", "B", "C", "D"]);
        assert_eq!(result.total_cost(), 3.0);
    }

    /// Charges double for northward legs; relies on the default symmetry flag.
    struct Uphill;

    impl DistanceModel for Uphill {
        fn cost(&self, from: &Location, to: &Location) -> f64 {
            let d = from.distance_to(to);
            if to.y() > from.y() {
                2.0 * d
            } else {
                d
            }
        }
    }

    #[test]
    fn test_asymmetric_custom_model_converges() {
        let locs: Vec<Location> = (0..9)
            .map(|i| loc(&format!("L{i}"), ((i * 37) % 11) as f64, ((i * 53) % 13) as f64))
            .collect();
        for closed in [false, true] {
            let config = OptimizerConfig::new().with_closed_tour(closed);
            let result = Optimizer::with_model(Uphill)
                .optimize(&locs, &config)
                .expect("valid");
            assert_eq!(result.convergence, Convergence::Converged);
            assert!(result.total_cost() <= result.construction_cost + 1e-9);
            let mut fresh = result.route.clone();
            let recomputed = fresh.recompute_cost(&Uphill).expect("priced");
            assert!((recomputed - result.total_cost()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_custom_model_missing_id() {
        let cm = CostMatrix::new(vec!["A".into()], vec![0.0]).expect("valid");
        assert!(matches!(
            Optimizer::with_model(cm).optimize(&square(), &OptimizerConfig::new()),
            Err(RoutingError::MissingCost { .. })
        ));
    }

    #[test]
    fn test_result_serializes() {
        let result = optimize(&square(), &OptimizerConfig::new()).expect("valid");
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["strategy"], "nn+2opt");
        assert_eq!(json["convergence"], "converged");
        assert_eq!(json["route"]["kind"], "open");
        assert_eq!(json["route"]["stops"][0]["id"], "A");
    }

    #[test]
    fn test_parallel_calls_are_independent() {
        let optimizer = Optimizer::new();
        let config = OptimizerConfig::new();
        let (a, b) = std::thread::scope(|s| {
            let a = s.spawn(|| optimizer.optimize(&square(), &config));
            let b = s.spawn(|| optimizer.optimize(&crossing(), &config));
            (a.join(), b.join())
        });
        let a = a.expect("no panic").expect("valid");
        let b = b.expect("no panic").expect("valid");
        assert_eq!(a.ids(), vec!["A", "B", "C", "D"]);
        assert_eq!(b.ids(), vec!["A", "B", "D", "C"]);
    }

    proptest! {
        #[test]
        fn optimize_is_deterministic(
            coords in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 1..30),
            closed in any::<bool>(),
        ) {
            let locs: Vec<Location> = coords
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| loc(&format!("L{i}"), x, y))
                .collect();
            let config = OptimizerConfig::new().with_closed_tour(closed);
            let a = optimize(&locs, &config).expect("valid");
            let b = optimize(&locs, &config).expect("valid");
            prop_assert_eq!(a.ids(), b.ids());
            prop_assert_eq!(a.total_cost().to_bits(), b.total_cost().to_bits());
            prop_assert!(a.total_cost() <= a.construction_cost + 1e-9);
            prop_assert!(a.route.is_permutation_of(&locs));
        }
    }
}
