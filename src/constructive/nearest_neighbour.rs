//! Nearest-neighbour constructive heuristic.
//!
//! Builds a route greedily: starting from a chosen stop, always travel to the
//! nearest unvisited stop. Ties go to the stop that comes first in input
//! order, so the result depends only on the input order and the start.
//!
//! # Complexity
//!
//! O(n²) cost evaluations per start. Multi-start reuses one cost table, so
//! trying every start costs O(n²) evaluations plus O(n³) lookups.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for TSP. While solution
//! quality is typically 15-25% above optimal, it provides a fast baseline.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::distance::{DistanceMatrix, DistanceModel};
use crate::error::{Result, RoutingError};
use crate::models::{validate_locations, Location, Route, RouteKind};

/// Which starting stops a multi-start construction tries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiStart {
    /// Every location in turn.
    All,
    /// `count` distinct locations drawn with a seeded RNG.
    Sample {
        /// Number of starts to try; all locations if it exceeds the input size.
        count: usize,
        /// RNG seed; the same seed always draws the same starts.
        seed: u64,
    },
}

impl MultiStart {
    /// Start indices to try for an input of `n` locations, ascending.
    pub fn candidates(&self, n: usize) -> Result<Vec<usize>> {
        match *self {
            MultiStart::All => Ok((0..n).collect()),
            MultiStart::Sample { count: 0, .. } => Err(RoutingError::InvalidConfig(
                "multi-start sample count must be at least 1".into(),
            )),
            MultiStart::Sample { count, .. } if count >= n => Ok((0..n).collect()),
            MultiStart::Sample { count, seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut picked = rand::seq::index::sample(&mut rng, n, count).into_vec();
                picked.sort_unstable();
                Ok(picked)
            }
        }
    }
}

/// Constructs routes with the nearest-neighbour heuristic.
///
/// # Examples
///
/// ```
/// use u_tour::constructive::NearestNeighbourBuilder;
/// use u_tour::distance::Euclidean;
/// use u_tour::models::{Location, RouteKind};
///
/// let locations = vec![
///     Location::new("A", 0.0, 0.0).unwrap(),
///     Location::new("B", 10.0, 0.0).unwrap(),
///     Location::new("C", 10.0, 10.0).unwrap(),
///     Location::new("D", 0.0, 10.0).unwrap(),
/// ];
/// let builder = NearestNeighbourBuilder::new(RouteKind::Open);
/// let route = builder.build(&locations, &Euclidean, Some("A")).unwrap();
/// assert_eq!(route.ids(), vec!["A", "B", "C", "D"]);
/// assert!((route.total_cost() - 30.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbourBuilder {
    kind: RouteKind,
}

impl NearestNeighbourBuilder {
    /// Creates a builder producing routes of the given kind.
    pub fn new(kind: RouteKind) -> Self {
        Self { kind }
    }

    /// Builds a route starting at `start`, or at the first location if `None`.
    ///
    /// Fails with [`RoutingError::EmptyInput`] for an empty slice and
    /// [`RoutingError::UnknownStart`] if `start` names no input location.
    pub fn build<M>(&self, locations: &[Location], model: &M, start: Option<&str>) -> Result<Route>
    where
        M: DistanceModel + ?Sized,
    {
        validate_locations(locations)?;
        let start = start_index(locations, start)?;
        let distances = DistanceMatrix::from_model(locations, model)?;
        let order = nearest_neighbour_order(&distances, start);
        self.route_from_order(locations, &order, model)
    }

    /// Runs the heuristic from several starts and keeps the cheapest route.
    ///
    /// Ties go to the start that comes first in input order.
    pub fn build_multi_start<M>(
        &self,
        locations: &[Location],
        model: &M,
        starts: &MultiStart,
    ) -> Result<Route>
    where
        M: DistanceModel + ?Sized,
    {
        validate_locations(locations)?;
        let candidates = starts.candidates(locations.len())?;
        let distances = DistanceMatrix::from_model(locations, model)?;
        let closed = self.kind == RouteKind::Closed;

        let mut best: Option<(Vec<usize>, f64)> = None;
        for &start in &candidates {
            let order = nearest_neighbour_order(&distances, start);
            let cost = distances.path_cost(&order, closed);
            log::debug!(
                "nn.multi_start: start={} cost={cost:.3}",
                locations[start].id()
            );
            if best.as_ref().map_or(true, |(_, best_cost)| cost < *best_cost) {
                best = Some((order, cost));
            }
        }

        let (order, cost) = best.ok_or(RoutingError::EmptyInput)?;
        log::debug!(
            "nn.multi_start: tried={} best_start={} cost={cost:.3}",
            candidates.len(),
            locations[order[0]].id()
        );
        self.route_from_order(locations, &order, model)
    }

    fn route_from_order<M>(&self, locations: &[Location], order: &[usize], model: &M) -> Result<Route>
    where
        M: DistanceModel + ?Sized,
    {
        let stops = order.iter().map(|&i| locations[i].clone()).collect();
        Route::from_stops(stops, self.kind, model)
    }
}

/// Resolves an optional start id to its input index (0 when `None`).
pub(crate) fn start_index(locations: &[Location], start: Option<&str>) -> Result<usize> {
    match start {
        None => Ok(0),
        Some(id) => locations
            .iter()
            .position(|l| l.id() == id)
            .ok_or_else(|| RoutingError::UnknownStart(id.to_string())),
    }
}

/// Greedy visiting order over matrix indices, beginning at `start`.
pub(crate) fn nearest_neighbour_order(distances: &DistanceMatrix, start: usize) -> Vec<usize> {
    let n = distances.size();
    let mut unvisited: Vec<usize> = (0..n).filter(|&i| i != start).collect();
    let mut order = Vec::with_capacity(n);
    order.push(start);
    let mut current = start;

    // `unvisited` stays in input order, so ties resolve to the lowest index.
    while let Some(next) = distances.nearest_neighbour(current, &unvisited) {
        if let Some(pos) = unvisited.iter().position(|&i| i == next) {
            unvisited.remove(pos);
        }
        order.push(next);
        current = next;
    }
    order
}
