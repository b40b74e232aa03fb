//! Local search operators for improving routes.
//!
//! - [`TwoOptImprover`] — segment-reversal 2-opt, first-improvement

mod two_opt;

pub use two_opt::{Convergence, ImprovementReport, TwoOptImprover, IMPROVEMENT_EPSILON};
