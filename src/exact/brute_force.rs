//! Brute-force route search.
//!
//! Fixes the start stop and enumerates every ordering of the others in
//! lexicographic index order, keeping the first strictly cheapest one.
//! Useful as a quality baseline for the heuristics on small inputs.

use crate::constructive::start_index;
use crate::distance::{DistanceMatrix, DistanceModel};
use crate::error::{Result, RoutingError};
use crate::models::{validate_locations, Location, Route, RouteKind};

/// Largest input [`brute_force`] accepts (9! orderings of the non-start stops).
pub const MAX_EXACT_LOCATIONS: usize = 10;

/// Finds a cheapest route over `locations` starting at `start`.
///
/// Fails with [`RoutingError::InputTooLarge`] above [`MAX_EXACT_LOCATIONS`].
///
/// # Examples
///
/// ```
/// use u_tour::distance::Euclidean;
/// use u_tour::exact::brute_force;
/// use u_tour::models::{Location, RouteKind};
///
/// let locations = vec![
///     Location::new("A", 0.0, 0.0).unwrap(),
///     Location::new("B", 10.0, 0.0).unwrap(),
///     Location::new("C", 0.0, 10.0).unwrap(),
///     Location::new("D", 7.0, 7.0).unwrap(),
/// ];
/// let route = brute_force(&locations, &Euclidean, None, RouteKind::Open).unwrap();
/// assert_eq!(route.ids(), vec!["A", "B", "D", "C"]);
/// ```
pub fn brute_force<M>(
    locations: &[Location],
    model: &M,
    start: Option<&str>,
    kind: RouteKind,
) -> Result<Route>
where
    M: DistanceModel + ?Sized,
{
    validate_locations(locations)?;
    if locations.len() > MAX_EXACT_LOCATIONS {
        return Err(RoutingError::InputTooLarge {
            len: locations.len(),
            max: MAX_EXACT_LOCATIONS,
        });
    }
    let start = start_index(locations, start)?;
    let distances = DistanceMatrix::from_model(locations, model)?;
    let closed = kind == RouteKind::Closed;

    let mut order: Vec<usize> = std::iter::once(start)
        .chain((0..locations.len()).filter(|&i| i != start))
        .collect();
    let mut best_order = order.clone();
    let mut best_cost = distances.path_cost(&order, closed);
    let mut evaluated: u64 = 1;

    while next_permutation(&mut order[1..]) {
        evaluated += 1;
        let cost = distances.path_cost(&order, closed);
        if cost < best_cost {
            best_cost = cost;
            best_order.copy_from_slice(&order);
        }
    }
    log::debug!("brute_force: n={} orderings={evaluated} cost={best_cost:.3}", order.len());

    let stops = best_order.iter().map(|&i| locations[i].clone()).collect();
    Route::from_stops(stops, kind, model)
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` (leaving `items` sorted descending) once the last
/// permutation has been reached.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&i| items[i] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
