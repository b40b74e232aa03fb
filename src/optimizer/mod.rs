//! Orchestration of construction and improvement.
//!
//! - [`OptimizerConfig`] — per-call options, parsed from JSON or built in code
//! - [`Optimizer`] — runs the configured [`Strategy`] over a distance model
//! - [`optimize`] — shorthand for the Euclidean default

mod config;
mod engine;

pub use config::{OptimizerConfig, Strategy};
pub use engine::{optimize, OptimizedRoute, Optimizer};
