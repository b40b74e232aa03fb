//! Domain model types.
//!
//! Provides the two values the engine works on: immutable locations and
//! routes as ordered sequences of them with a cached travel cost.

mod location;
mod route;

pub use location::{validate_locations, Location};
pub use route::{Route, RouteKind};
