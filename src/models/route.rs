//! Route type and its cost-preserving mutations.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{validate_locations, Location};
use crate::distance::{checked_cost, DistanceModel};
use crate::error::{Result, RoutingError};

/// Whether a route ends at its last stop or returns to the first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Path from the first stop to the last.
    #[default]
    Open,
    /// Tour that travels back from the last stop to the first.
    Closed,
}

impl RouteKind {
    /// `Closed` if `closed` is true, `Open` otherwise.
    pub fn from_closed(closed: bool) -> Self {
        if closed {
            Self::Closed
        } else {
            Self::Open
        }
    }
}

/// An ordered sequence of distinct locations with its total travel cost.
///
/// The cached cost always matches the current ordering: every mutation
/// either applies the exact edge delta or recomputes the sum.
///
/// # Examples
///
/// ```
/// use u_tour::distance::Euclidean;
/// use u_tour::models::{Location, Route, RouteKind};
///
/// let stops = vec![
///     Location::new("A", 0.0, 0.0).unwrap(),
///     Location::new("B", 10.0, 10.0).unwrap(),
///     Location::new("C", 10.0, 0.0).unwrap(),
/// ];
/// let mut route = Route::from_stops(stops, RouteKind::Open, &Euclidean).unwrap();
/// let delta = route.reverse_segment(1, 2, &Euclidean).unwrap();
/// assert!(delta < 0.0);
/// assert_eq!(route.ids(), vec!["A", "C", "B"]);
/// assert!((route.total_cost() - 20.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    stops: Vec<Location>,
    kind: RouteKind,
    total_cost: f64,
}

impl Route {
    /// Creates an empty route.
    pub fn new(kind: RouteKind) -> Self {
        Self {
            stops: Vec::new(),
            kind,
            total_cost: 0.0,
        }
    }

    /// Creates a route visiting `stops` in the given order.
    ///
    /// Fails if `stops` is empty, contains a repeated id, or the model
    /// cannot price one of its edges.
    pub fn from_stops<M>(stops: Vec<Location>, kind: RouteKind, model: &M) -> Result<Self>
    where
        M: DistanceModel + ?Sized,
    {
        validate_locations(&stops)?;
        model.validate(&stops)?;
        let mut route = Self {
            stops,
            kind,
            total_cost: 0.0,
        };
        route.recompute_cost(model)?;
        Ok(route)
    }

    /// Appends a stop, updating the cost by the edges it adds and removes.
    pub fn push<M>(&mut self, stop: Location, model: &M) -> Result<()>
    where
        M: DistanceModel + ?Sized,
    {
        if self.stops.contains(&stop) {
            return Err(RoutingError::DuplicateLocationId(stop.id().to_string()));
        }
        if let Some(last) = self.stops.last() {
            let mut delta = checked_cost(model, last, &stop)?;
            if self.is_closed() {
                let first = &self.stops[0];
                delta += checked_cost(model, &stop, first)?;
                if self.stops.len() > 1 {
                    delta -= checked_cost(model, last, first)?;
                }
            }
            self.total_cost += delta;
        }
        self.stops.push(stop);
        Ok(())
    }

    /// Reverses `stops[from..=to]` in place and returns the cost change.
    ///
    /// A negative return value means the route got cheaper. For symmetric
    /// models only the two boundary edges are re-priced; otherwise the
    /// whole route is re-summed.
    ///
    /// # Panics
    ///
    /// Panics if `from > to` or `to >= self.len()`.
    pub fn reverse_segment<M>(&mut self, from: usize, to: usize, model: &M) -> Result<f64>
    where
        M: DistanceModel + ?Sized,
    {
        let n = self.stops.len();
        assert!(
            from <= to && to < n,
            "segment {from}..={to} out of bounds for route of {n} stops"
        );
        if from == to {
            return Ok(0.0);
        }

        let full_tour = self.is_closed() && to - from + 1 == n;
        if !model.is_symmetric() || full_tour {
            let before = self.total_cost;
            self.stops[from..=to].reverse();
            self.recompute_cost(model)?;
            return Ok(self.total_cost - before);
        }

        let mut delta = 0.0;
        if let Some(p) = self.predecessor(from) {
            let prev = &self.stops[p];
            delta += checked_cost(model, prev, &self.stops[to])?
                - checked_cost(model, prev, &self.stops[from])?;
        }
        if let Some(q) = self.successor(to) {
            let next = &self.stops[q];
            delta += checked_cost(model, &self.stops[from], next)?
                - checked_cost(model, &self.stops[to], next)?;
        }
        self.stops[from..=to].reverse();
        self.total_cost += delta;
        Ok(delta)
    }

    /// Re-sums the cost from scratch and returns it.
    pub fn recompute_cost<M>(&mut self, model: &M) -> Result<f64>
    where
        M: DistanceModel + ?Sized,
    {
        let mut total = 0.0;
        for i in 0..self.stops.len() {
            if let Some(j) = self.successor(i) {
                total += checked_cost(model, &self.stops[i], &self.stops[j])?;
            }
        }
        self.total_cost = total;
        Ok(total)
    }

    /// Index of the stop visited after position `i`, if any.
    pub fn successor(&self, i: usize) -> Option<usize> {
        let n = self.stops.len();
        if i + 1 < n {
            Some(i + 1)
        } else if self.is_closed() && n > 1 {
            Some(0)
        } else {
            None
        }
    }

    /// Index of the stop visited before position `i`, if any.
    pub fn predecessor(&self, i: usize) -> Option<usize> {
        let n = self.stops.len();
        if i > 0 {
            Some(i - 1)
        } else if self.is_closed() && n > 1 {
            Some(n - 1)
        } else {
            None
        }
    }

    /// Returns the stops in visit order.
    pub fn stops(&self) -> &[Location] {
        &self.stops
    }

    /// Consumes the route, returning its stops in visit order.
    pub fn into_stops(self) -> Vec<Location> {
        self.stops
    }

    /// Returns the stop ids in visit order.
    pub fn ids(&self) -> Vec<&str> {
        self.stops.iter().map(Location::id).collect()
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if this route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Total travel cost along the route.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Open path or closed tour.
    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    /// Returns `true` for a closed tour.
    pub fn is_closed(&self) -> bool {
        self.kind == RouteKind::Closed
    }

    /// Returns `true` if this route visits exactly the stops in `locations`.
    pub fn is_permutation_of(&self, locations: &[Location]) -> bool {
        if self.stops.len() != locations.len() {
            return false;
        }
        let mine: HashSet<&str> = self.stops.iter().map(Location::id).collect();
        mine.len() == self.stops.len() && locations.iter().all(|l| mine.contains(l.id()))
    }
}
