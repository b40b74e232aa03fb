//! Exhaustive search for tiny inputs.
//!
//! - [`brute_force`] — optimal route by enumerating every ordering, O(n!)

mod brute_force;

pub use brute_force::{brute_force, MAX_EXACT_LOCATIONS};
