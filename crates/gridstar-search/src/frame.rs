//! Snapshots of search progress for step-by-step playback.

use gridstar_core::Point;

use crate::engine::PathfindingEngine;
use crate::error::{EngineError, EngineResult};
use crate::search::{Search, Status};

/// The visible state of a search between two steps.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchFrame {
    /// Value of the step counter when the frame was taken.
    pub step: usize,
    pub status: Status,
    /// Open cells, row-major.
    pub open: Vec<Point>,
    /// Closed cells, in closing order.
    pub closed: Vec<Point>,
    /// Path to the most recently expanded cell (the full path once solved).
    pub path: Vec<Point>,
}

impl SearchFrame {
    /// The frame of an engine with no search.
    pub fn ready() -> Self {
        Self {
            step: 0,
            status: Status::Ready,
            open: Vec::new(),
            closed: Vec::new(),
            path: Vec::new(),
        }
    }
}

impl Search {
    /// Snapshot of the current progress.
    pub fn frame(&self) -> SearchFrame {
        SearchFrame {
            step: self.steps(),
            status: self.status(),
            open: self.open_set(),
            closed: self.closed_set(),
            path: self.partial_path(),
        }
    }
}

impl PathfindingEngine {
    /// Snapshot of the current progress.
    pub fn frame(&self) -> SearchFrame {
        self.session()
            .map(Search::frame)
            .unwrap_or_else(SearchFrame::ready)
    }
}

/// Start a search on `engine` and collect every frame until it resolves.
///
/// The first frame is the state right after `start`; one more follows each
/// step. Fails with [`EngineError::StepLimitExceeded`] after `max_steps`
/// steps, leaving the search running.
pub fn record(engine: &mut PathfindingEngine, max_steps: usize) -> EngineResult<Vec<SearchFrame>> {
    engine.start()?;
    let mut frames = vec![engine.frame()];
    let mut taken = 0;
    while engine.status() == Status::Running {
        if taken == max_steps {
            log::warn!("recording stopped after {max_steps} steps");
            return Err(EngineError::StepLimitExceeded { max_steps });
        }
        engine.step();
        frames.push(engine.frame());
        taken += 1;
    }
    log::debug!("recorded {} frames, search {}", frames.len(), engine.status());
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstar_core::Layout;

    use crate::config::SearchConfig;

    fn engine_for(text: &str) -> PathfindingEngine {
        let l = Layout::parse(text).unwrap();
        let mut e = PathfindingEngine::with_grid(l.grid, SearchConfig::default());
        if let (Some(s), Some(g)) = (l.start, l.goal) {
            e.set_endpoints(s, g).unwrap();
        }
        e
    }

    #[test]
    fn records_one_frame_per_step_plus_initial() {
        let mut e = engine_for("S...G");
        let frames = record(&mut e, 100).unwrap();
        // Five cells are closed one per step.
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[0].status, Status::Running);
        assert_eq!(frames[0].open, vec![Point::new(0, 0)]);
        assert!(frames[0].closed.is_empty());

        let last = frames.last().unwrap();
        assert_eq!(last.status, Status::Solved);
        assert_eq!(last.path.len(), 5);
        assert_eq!(last.path, e.current_path().unwrap());
        for (i, f) in frames.iter().enumerate() {
            assert_eq!(f.closed.len(), i);
        }
    }

    #[test]
    fn frame_path_follows_expansion() {
        let mut e = engine_for(
            "\
S..
.#.
..G",
        );
        let frames = record(&mut e, 100).unwrap();
        for f in &frames[1..] {
            assert_eq!(f.path.first(), Some(&Point::new(0, 0)));
            assert_eq!(f.path.last(), f.closed.last());
        }
    }

    #[test]
    fn records_failure() {
        let mut e = engine_for("S#G");
        let frames = record(&mut e, 100).unwrap();
        assert_eq!(frames.last().map(|f| f.status), Some(Status::Failed));
    }

    #[test]
    fn recording_respects_budget() {
        let mut e = engine_for("S........G");
        assert_eq!(
            record(&mut e, 4),
            Err(EngineError::StepLimitExceeded { max_steps: 4 })
        );
        assert_eq!(e.status(), Status::Running);
    }

    #[test]
    fn recording_propagates_start_errors() {
        let mut e = engine_for("...");
        assert_eq!(record(&mut e, 10), Err(EngineError::EndpointsNotSet));
        assert_eq!(e.frame(), SearchFrame::ready());
    }
}
