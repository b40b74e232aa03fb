//! Error type shared by every stage of the optimizer.

use thiserror::Error;

/// Errors raised while validating input or running an optimization.
///
/// All errors are detected synchronously. The engine is deterministic, so
/// retrying a failed call with the same input yields the same error.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No locations were supplied.
    #[error("no locations supplied")]
    EmptyInput,

    /// A location record has a non-finite or otherwise malformed coordinate.
    #[error("invalid location '{id}': {reason}")]
    InvalidLocation {
        /// Identifier of the offending record.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two input records share the same id.
    #[error("duplicate location id '{0}'")]
    DuplicateLocationId(String),

    /// The configured strategy name is not recognised.
    #[error("unknown strategy '{0}' (expected one of: nn, nn+2opt, exact)")]
    UnknownStrategy(String),

    /// The requested start id is not among the input locations.
    #[error("start location '{0}' is not in the input")]
    UnknownStart(String),

    /// A distance model produced a negative or non-finite cost.
    #[error("invalid cost {cost} from '{from}' to '{to}'")]
    InvalidCost {
        /// Origin location id.
        from: String,
        /// Destination location id.
        to: String,
        /// The offending value.
        cost: f64,
    },

    /// A supplied cost matrix has no entry for a pair of stops.
    #[error("no cost from '{from}' to '{to}' in the supplied matrix")]
    MissingCost {
        /// Origin location id.
        from: String,
        /// Destination location id.
        to: String,
    },

    /// Input is too large for the exhaustive solver.
    #[error("{len} locations exceed the exact solver limit of {max}")]
    InputTooLarge {
        /// Number of locations supplied.
        len: usize,
        /// Largest accepted input.
        max: usize,
    },

    /// Configuration values are individually valid but inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;

impl RoutingError {
    pub(crate) fn invalid_location(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLocation {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(RoutingError::EmptyInput.to_string(), "no locations supplied");
        assert_eq!(
            RoutingError::DuplicateLocationId("A".into()).to_string(),
            "duplicate location id 'A'"
        );
        let e = RoutingError::invalid_location("B", "x is NaN");
        assert_eq!(e.to_string(), "invalid location 'B': x is NaN");
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<u32>("not json").expect_err("malformed");
        let e: RoutingError = err.into();
        assert!(matches!(e, RoutingError::Config(_)));
    }
}
