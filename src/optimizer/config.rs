//! Optimizer configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constructive::MultiStart;
use crate::error::{Result, RoutingError};
use crate::models::RouteKind;

/// Which stages [`Optimizer::optimize`](super::Optimizer::optimize) runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    /// Nearest-neighbour construction only (`"nn"`).
    NearestNeighbour,
    /// Nearest-neighbour followed by 2-opt (`"nn+2opt"`).
    #[default]
    NearestNeighbourTwoOpt,
    /// Exhaustive search for tiny inputs (`"exact"`).
    Exact,
}

impl Strategy {
    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::NearestNeighbour => "nn",
            Strategy::NearestNeighbourTwoOpt => "nn+2opt",
            Strategy::Exact => "exact",
        }
    }

    /// Returns `true` if this strategy runs the 2-opt stage.
    pub fn improves(&self) -> bool {
        *self == Strategy::NearestNeighbourTwoOpt
    }
}

impl FromStr for Strategy {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nn" => Ok(Strategy::NearestNeighbour),
            "nn+2opt" | "nn_2opt" | "nn-2opt" => Ok(Strategy::NearestNeighbourTwoOpt),
            "exact" | "bf" => Ok(Strategy::Exact),
            _ => Err(RoutingError::UnknownStrategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = RoutingError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Strategy> for String {
    fn from(s: Strategy) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a single optimize call.
///
/// Every field has a default, so an empty JSON object is a valid config.
///
/// Parse with [`OptimizerConfig::from_json`] to get typed errors. Going
/// through serde directly (`serde_json::from_str::<OptimizerConfig>`, or a
/// field of a larger document) still rejects unknown strategies, but the
/// failure arrives as the deserializer's own error carrying the
/// [`RoutingError::UnknownStrategy`] message.
///
/// # Examples
///
/// ```
/// use u_tour::optimizer::{OptimizerConfig, Strategy};
///
/// let config = OptimizerConfig::from_json(
///     r#"{"strategy": "nn", "start": "Depot", "closed_tour": true}"#,
/// ).unwrap();
/// assert_eq!(config.strategy, Strategy::NearestNeighbour);
/// assert_eq!(config.start.as_deref(), Some("Depot"));
///
/// assert!(OptimizerConfig::from_json(r#"{"strategy": "annealing"}"#).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct OptimizerConfig {
    /// Stages to run.
    pub strategy: Strategy,
    /// Id of the first stop; the first input location if `None`.
    pub start: Option<String>,
    /// Upper bound on 2-opt scans; unlimited if `None`.
    pub max_iterations: Option<usize>,
    /// Return to the start after the last stop.
    pub closed_tour: bool,
    /// Try several nearest-neighbour starts and keep the best.
    pub multi_start: Option<MultiStart>,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    strategy: Option<String>,
    start: Option<String>,
    max_iterations: Option<usize>,
    closed_tour: bool,
    multi_start: Option<MultiStart>,
}

impl TryFrom<RawConfig> for OptimizerConfig {
    type Error = RoutingError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let strategy = match raw.strategy {
            Some(name) => name.parse()?,
            None => Strategy::default(),
        };
        Ok(Self {
            strategy,
            start: raw.start,
            max_iterations: raw.max_iterations,
            closed_tour: raw.closed_tour,
            multi_start: raw.multi_start,
        })
    }
}

impl OptimizerConfig {
    /// Default configuration: `nn+2opt`, open path, no budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object.
    ///
    /// Unknown strategy names fail with [`RoutingError::UnknownStrategy`];
    /// malformed JSON and unknown fields with [`RoutingError::Config`].
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the start location id.
    pub fn with_start(mut self, id: impl Into<String>) -> Self {
        self.start = Some(id.into());
        self
    }

    /// Sets the 2-opt scan budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Chooses between an open path and a closed tour.
    pub fn with_closed_tour(mut self, closed: bool) -> Self {
        self.closed_tour = closed;
        self
    }

    /// Enables multi-start construction.
    pub fn with_multi_start(mut self, starts: MultiStart) -> Self {
        self.multi_start = Some(starts);
        self
    }

    /// Route kind implied by `closed_tour`.
    pub fn route_kind(&self) -> RouteKind {
        RouteKind::from_closed(self.closed_tour)
    }

    /// Rejects combinations of options that contradict each other.
    pub fn validate(&self) -> Result<()> {
        if self.multi_start.is_some() {
            if self.start.is_some() {
                return Err(RoutingError::InvalidConfig(
                    "`start` and `multi_start` are mutually exclusive".into(),
                ));
            }
            if self.strategy == Strategy::Exact {
                return Err(RoutingError::InvalidConfig(
                    "`multi_start` does not apply to the exact strategy".into(),
                ));
            }
        }
        Ok(())
    }
}
