//! Constructive heuristics for building initial routes.
//!
//! - [`NearestNeighbourBuilder`] — greedy nearest-neighbour, O(n²), single or multi-start

mod nearest_neighbour;

pub(crate) use nearest_neighbour::start_index;
pub use nearest_neighbour::{MultiStart, NearestNeighbourBuilder};
