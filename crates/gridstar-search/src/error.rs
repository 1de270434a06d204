use std::fmt;

use gridstar_core::Point;

use crate::search::Status;

/// Which end of a search an endpoint error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFault {
    OutOfBounds,
    Blocked,
}

impl fmt::Display for EndpointFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("out of bounds"),
            Self::Blocked => f.write_str("blocked"),
        }
    }
}

/// Caller misuse or budget exhaustion reported by the engine.
///
/// Not finding a path is not an error: it ends the search in
/// [`Status::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Start or goal lies outside the grid or on a blocked cell.
    #[error("{endpoint} {point} is {fault}")]
    InvalidEndpoint {
        endpoint: Endpoint,
        point: Point,
        fault: EndpointFault,
    },

    /// Start equals goal and the configuration forbids it.
    #[error("start and goal are both {0}")]
    SameEndpoint(Point),

    /// A path was requested before the search was solved.
    #[error("no path available, search is {0}")]
    NoPathYet(Status),

    /// `run` used up its step budget without resolving the search.
    #[error("search unresolved after {max_steps} steps")]
    StepLimitExceeded { max_steps: usize },

    /// `start` was called before `set_endpoints`.
    #[error("start and goal have not been set")]
    EndpointsNotSet,

    /// The grid or endpoints were edited while a search is running.
    #[error("cannot edit the grid while a search is running")]
    SearchRunning,

    /// A grid edit addressed a cell outside the grid.
    #[error("{0} is outside the grid")]
    OutOfBounds(Point),

    /// `configure` was given a non-positive dimension.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Result type used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let e = EngineError::InvalidEndpoint {
            endpoint: Endpoint::Goal,
            point: Point::new(9, 1),
            fault: EndpointFault::OutOfBounds,
        };
        assert_eq!(e.to_string(), "goal (9, 1) is out of bounds");
        assert_eq!(
            EngineError::NoPathYet(Status::Running).to_string(),
            "no path available, search is running"
        );
    }
}
