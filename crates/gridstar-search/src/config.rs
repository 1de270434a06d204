/// Tunables for a [`PathfindingEngine`](crate::PathfindingEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// When `true`, `start == goal` is a trivially solved search with the
    /// single-cell path `[start]`. When `false` it is rejected with
    /// [`EngineError::SameEndpoint`](crate::EngineError::SameEndpoint).
    pub allow_same_endpoint: bool,
    /// Step budget for [`PathfindingEngine::run_to_completion`](crate::PathfindingEngine::run_to_completion).
    /// `None` uses one more than the number of grid cells, which always
    /// suffices since every step closes a distinct cell.
    pub step_limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            allow_same_endpoint: true,
            step_limit: None,
        }
    }
}
