//! 2-opt route improvement.
//!
//! # Algorithm
//!
//! For each pair of non-adjacent edges (r[i], r[i+1]) and (r[j], r[j+1]),
//! compute the saving from reversing the segment between them:
//!
//! ```text
//! gain = d(r[i], r[i+1]) + d(r[j], r[j+1]) - d(r[i], r[j]) - d(r[i+1], r[j+1])
//! ```
//!
//! If gain > [`IMPROVEMENT_EPSILON`], reverse r[i+1..=j] and restart the scan
//! (first-improvement strategy). Pairs are scanned by increasing i, then
//! increasing j. A scan that finds nothing proves a local optimum.
//!
//! Open paths only exchange edges that exist, so both endpoints stay put.
//! Closed tours also consider the edge from the last stop back to the first.
//! For asymmetric models the gain also counts the reversed interior edges.
//!
//! # Complexity
//!
//! O(n²) per scan, one move applied per scan.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceModel;
use crate::error::Result;
use crate::models::Route;

/// Smallest gain that counts as an improvement.
pub const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// How an improvement phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convergence {
    /// A full scan found no improving move: the route is a local optimum.
    Converged,
    /// The pass budget ran out before a local optimum was proven.
    BudgetExhausted,
    /// No improvement phase was run.
    NotRun,
}

/// Outcome of a [`TwoOptImprover::improve`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementReport {
    /// Whether a local optimum was reached.
    pub status: Convergence,
    /// Number of scans started.
    pub passes: usize,
    /// Number of segment reversals applied.
    pub moves: usize,
    /// Route cost before improvement.
    pub initial_cost: f64,
    /// Route cost after improvement.
    pub final_cost: f64,
}

impl ImprovementReport {
    /// Returns `true` if the route is a proven local optimum.
    pub fn converged(&self) -> bool {
        self.status == Convergence::Converged
    }

    /// Cost saved by the improvement phase.
    pub fn gain(&self) -> f64 {
        self.initial_cost - self.final_cost
    }
}

/// Improves routes in place with 2-opt local search.
///
/// # Examples
///
/// ```
/// use u_tour::distance::Euclidean;
/// use u_tour::local_search::{Convergence, TwoOptImprover};
/// use u_tour::models::{Location, Route, RouteKind};
///
/// let stops = vec![
///     Location::new("A", 0.0, 0.0).unwrap(),
///     Location::new("D", 7.0, 7.0).unwrap(),
///     Location::new("B", 10.0, 0.0).unwrap(),
///     Location::new("C", 0.0, 10.0).unwrap(),
/// ];
/// let mut route = Route::from_stops(stops, RouteKind::Open, &Euclidean).unwrap();
/// let before = route.total_cost();
///
/// let report = TwoOptImprover::new().improve(&mut route, &Euclidean).unwrap();
/// assert_eq!(report.status, Convergence::Converged);
/// assert_eq!(route.ids(), vec!["A", "B", "D", "C"]);
/// assert!(route.total_cost() < before);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoOptImprover {
    max_iterations: Option<usize>,
}

impl TwoOptImprover {
    /// Creates an improver that runs until a local optimum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the number of scans; `None` removes the limit.
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Configured scan budget.
    pub fn max_iterations(&self) -> Option<usize> {
        self.max_iterations
    }

    /// Applies 2-opt moves to `route` until a local optimum or the budget.
    ///
    /// The route cost never increases. Routes with fewer than 4 stops have
    /// no pair of non-adjacent edges and are returned untouched as
    /// [`Convergence::Converged`].
    pub fn improve<M>(&self, route: &mut Route, model: &M) -> Result<ImprovementReport>
    where
        M: DistanceModel + ?Sized,
    {
        model.validate(route.stops())?;
        let initial_cost = route.total_cost();
        if route.len() < 4 {
            return Ok(ImprovementReport {
                status: Convergence::Converged,
                passes: 0,
                moves: 0,
                initial_cost,
                final_cost: initial_cost,
            });
        }

        let mut passes = 0;
        let mut moves = 0;
        let status = loop {
            if self.max_iterations.is_some_and(|max| passes >= max) {
                break Convergence::BudgetExhausted;
            }
            passes += 1;
            match first_improvement(route, model) {
                Some((i, j, gain)) => {
                    log::trace!("two_opt: pass={passes} i={i} j={j} gain={gain:.6}");
                    route.reverse_segment(i + 1, j, model)?;
                    moves += 1;
                }
                None => break Convergence::Converged,
            }
        };

        // Re-sum once to drop rounding drift from the incremental updates.
        if moves > 0 {
            route.recompute_cost(model)?;
        }
        let final_cost = route.total_cost();
        log::debug!(
            "two_opt: status={status:?} passes={passes} moves={moves} cost={initial_cost:.3}->{final_cost:.3}"
        );
        Ok(ImprovementReport {
            status,
            passes,
            moves,
            initial_cost,
            final_cost,
        })
    }
}

/// Scans edge pairs in order and returns the first improving move.
fn first_improvement<M>(route: &Route, model: &M) -> Option<(usize, usize, f64)>
where
    M: DistanceModel + ?Sized,
{
    let n = route.len();
    let closed = route.is_closed();
    // Open paths need an edge after r[j], so j stops at n-2.
    let last_j = if closed { n - 1 } else { n - 2 };
    let symmetric = model.is_symmetric();

    for i in 0..n.saturating_sub(2) {
        for j in (i + 2)..=last_j {
            if closed && i == 0 && j == n - 1 {
                // Both edges touch r[0]; they are adjacent around the tour.
                continue;
            }
            let gain = move_gain(route, model, i, j, symmetric);
            if gain > IMPROVEMENT_EPSILON {
                return Some((i, j, gain));
            }
        }
    }
    None
}

/// Saving from reversing `r[i+1..=j]`.
fn move_gain<M>(route: &Route, model: &M, i: usize, j: usize, symmetric: bool) -> f64
where
    M: DistanceModel + ?Sized,
{
    let r = route.stops();
    let after_j = (j + 1) % r.len();
    let mut gain = model.cost(&r[i], &r[i + 1]) + model.cost(&r[j], &r[after_j])
        - model.cost(&r[i], &r[j])
        - model.cost(&r[i + 1], &r[after_j]);
    if !symmetric {
        for k in (i + 1)..j {
            gain += model.cost(&r[k], &r[k + 1]) - model.cost(&r[k + 1], &r[k]);
        }
    }
    gain
}
