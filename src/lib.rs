//! # u-tour
//!
//! Single-route tour optimization: order a set of stops so the total travel
//! cost is small, using nearest-neighbour construction and 2-opt local search.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Location, Route)
//! - [`distance`] — Distance models (Euclidean, supplied cost matrix)
//! - [`constructive`] — Nearest-neighbour construction, single or multi-start
//! - [`local_search`] — 2-opt improvement
//! - [`exact`] — Brute-force baseline for tiny inputs
//! - [`optimizer`] — Configuration and the `optimize` entry point
//! - [`benchmark`] — Strategy comparison over input prefixes
//!
//! ## Example
//!
//! ```
//! use u_tour::models::Location;
//! use u_tour::optimizer::{optimize, OptimizerConfig};
//!
//! let stops = vec![
//!     Location::new("Depot", 0.0, 0.0).unwrap(),
//!     Location::new("C1", 10.0, 0.0).unwrap(),
//!     Location::new("C2", 10.0, 10.0).unwrap(),
//!     Location::new("C3", 0.0, 10.0).unwrap(),
//! ];
//! let config = OptimizerConfig::new().with_closed_tour(true);
//! let result = optimize(&stops, &config).unwrap();
//! assert!((result.total_cost() - 40.0).abs() < 1e-10);
//! ```

pub mod benchmark;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod exact;
pub mod local_search;
pub mod models;
pub mod optimizer;

pub use error::{Result, RoutingError};
