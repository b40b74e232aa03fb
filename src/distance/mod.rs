//! Travel cost between locations.
//!
//! - [`DistanceModel`] — pluggable pairwise cost
//! - [`Euclidean`] — straight-line distance (the default)
//! - [`CostMatrix`] — caller-supplied cost table keyed by location id
//! - [`DistanceMatrix`] — dense per-call table of model costs over the input order

mod cost_matrix;
mod matrix;

pub use cost_matrix::CostMatrix;
pub use matrix::DistanceMatrix;

use crate::error::{Result, RoutingError};
use crate::models::Location;

/// Computes the travel cost between two locations.
///
/// Implementations must be pure: the same pair always yields the same
/// non-negative cost, and calls may happen in any order from any thread.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{DistanceModel, Euclidean};
/// use u_tour::models::Location;
///
/// let a = Location::new("A", 0.0, 0.0).unwrap();
/// let b = Location::new("B", 3.0, 4.0).unwrap();
/// assert!((Euclidean.cost(&a, &b) - 5.0).abs() < 1e-10);
/// ```
pub trait DistanceModel: Send + Sync {
    /// Cost of travelling from `from` to `to`.
    fn cost(&self, from: &Location, to: &Location) -> f64;

    /// Returns `true` if `cost(a, b) == cost(b, a)` for every pair.
    ///
    /// Defaults to `false`. Models that return `false` get exact 2-opt gains
    /// and full cost recomputation after a segment reversal; override this
    /// only when symmetry holds for every pair.
    fn is_symmetric(&self) -> bool {
        false
    }

    /// Checks that this model can price every pair in `locations`.
    fn validate(&self, _locations: &[Location]) -> Result<()> {
        Ok(())
    }
}

impl<M: DistanceModel + ?Sized> DistanceModel for &M {
    fn cost(&self, from: &Location, to: &Location) -> f64 {
        (**self).cost(from, to)
    }

    fn is_symmetric(&self) -> bool {
        (**self).is_symmetric()
    }

    fn validate(&self, locations: &[Location]) -> Result<()> {
        (**self).validate(locations)
    }
}

/// Prices one edge, rejecting negative or non-finite costs.
pub(crate) fn checked_cost<M>(model: &M, from: &Location, to: &Location) -> Result<f64>
where
    M: DistanceModel + ?Sized,
{
    let c = model.cost(from, to);
    if !c.is_finite() || c < 0.0 {
        return Err(RoutingError::InvalidCost {
            from: from.id().to_string(),
            to: to.id().to_string(),
            cost: c,
        });
    }
    Ok(c)
}

/// Straight-line distance `sqrt(dx² + dy²)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl DistanceModel for Euclidean {
    fn cost(&self, from: &Location, to: &Location) -> f64 {
        from.distance_to(to)
    }

    fn is_symmetric(&self) -> bool {
        true
    }
}
