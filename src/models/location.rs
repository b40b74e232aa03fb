//! Location type and input validation.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};

/// A single stop: a unique identifier plus a 2D coordinate.
///
/// Locations are immutable once created. Equality and hashing use the id
/// only, so two records with the same id are the same stop.
///
/// # Examples
///
/// ```
/// use u_tour::models::Location;
///
/// let depot = Location::new("Depot", 0.0, 0.0).unwrap();
/// let c = Location::new("C1", 3.0, 4.0).unwrap();
/// assert_eq!(depot.id(), "Depot");
/// assert!((depot.distance_to(&c) - 5.0).abs() < 1e-10);
///
/// assert!(Location::new("bad", f64::NAN, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LocationRecord")]
pub struct Location {
    id: String,
    x: f64,
    y: f64,
}

/// Wire form of a location, validated through [`Location::new`].
#[derive(Deserialize)]
struct LocationRecord {
    id: String,
    x: f64,
    y: f64,
}

impl TryFrom<LocationRecord> for Location {
    type Error = RoutingError;

    fn try_from(r: LocationRecord) -> Result<Self> {
        Location::new(r.id, r.x, r.y)
    }
}

impl Location {
    /// Creates a new location.
    ///
    /// Fails with [`RoutingError::InvalidLocation`] if either coordinate is
    /// non-finite or the id is empty.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(RoutingError::invalid_location(id, "empty id"));
        }
        if !x.is_finite() {
            return Err(RoutingError::invalid_location(id, format!("x is {x}")));
        }
        if !y.is_finite() {
            return Err(RoutingError::invalid_location(id, format!("y is {y}")));
        }
        Ok(Self { id, x, y })
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Checks that `locations` is usable as optimizer input.
///
/// Rejects an empty slice, duplicate ids, and non-finite coordinates.
pub fn validate_locations(locations: &[Location]) -> Result<()> {
    if locations.is_empty() {
        return Err(RoutingError::EmptyInput);
    }
    let mut seen = HashSet::with_capacity(locations.len());
    for loc in locations {
        if !loc.x.is_finite() || !loc.y.is_finite() {
            return Err(RoutingError::invalid_location(
                loc.id(),
                "non-finite coordinate",
            ));
        }
        if !seen.insert(loc.id()) {
            return Err(RoutingError::DuplicateLocationId(loc.id().to_string()));
        }
    }
    Ok(())
}
