//! The [`PathfindingEngine`] facade: one obstacle grid, one pair of
//! endpoints, and at most one search session over them.

use gridstar_core::{ObstacleGrid, Point};

use crate::config::SearchConfig;
use crate::error::{EngineError, EngineResult};
use crate::search::{CellScore, Search, Status};

/// Owns a grid and drives step-wise A* searches over it.
///
/// The engine is an explicit value the caller keeps and passes around; it
/// never touches global state. Grid and endpoint edits are refused while a
/// search is [`Status::Running`], and discard a finished search so that
/// [`status`](Self::status) returns to [`Status::Ready`].
#[derive(Default)]
pub struct PathfindingEngine {
    grid: ObstacleGrid,
    config: SearchConfig,
    endpoints: Option<(Point, Point)>,
    session: Option<Search>,
}

impl PathfindingEngine {
    /// Create an engine with an empty (0×0) grid.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create an engine over an existing grid.
    pub fn with_grid(grid: ObstacleGrid, config: SearchConfig) -> Self {
        Self {
            grid,
            config,
            endpoints: None,
            session: None,
        }
    }

    // -----------------------------------------------------------------------
    // Grid setup
    // -----------------------------------------------------------------------

    /// Allocate a new `width × height` grid with every cell open.
    ///
    /// Always discards the current session, even a running one. Endpoints
    /// are kept only if both still fit.
    pub fn configure(&mut self, width: i32, height: i32) -> EngineResult<()> {
        if width <= 0 || height <= 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        if self.session.take().is_some() {
            log::debug!("configure discarded the current search");
        }
        self.grid = ObstacleGrid::new(width, height);
        self.retain_endpoints();
        log::debug!("configured {width}x{height} grid");
        Ok(())
    }

    /// Change the grid size, keeping obstacles in the overlapping region.
    pub fn resize(&mut self, width: i32, height: i32) -> EngineResult<()> {
        if width <= 0 || height <= 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        self.ensure_idle()?;
        self.grid = self.grid.resized(width, height);
        self.retain_endpoints();
        log::debug!("resized grid to {width}x{height}");
        Ok(())
    }

    /// Set or clear the obstacle at `(x, y)`.
    pub fn set_blocked(&mut self, x: i32, y: i32, blocked: bool) -> EngineResult<()> {
        self.ensure_idle()?;
        let p = Point::new(x, y);
        if !self.grid.set_blocked(p, blocked) {
            return Err(EngineError::OutOfBounds(p));
        }
        Ok(())
    }

    /// Unblock every cell.
    pub fn clear_obstacles(&mut self) -> EngineResult<()> {
        self.ensure_idle()?;
        self.grid.clear();
        Ok(())
    }

    /// Declare the endpoints of the next search.
    ///
    /// Validation happens in [`start`](Self::start).
    pub fn set_endpoints(
        &mut self,
        start: impl Into<Point>,
        goal: impl Into<Point>,
    ) -> EngineResult<()> {
        self.ensure_idle()?;
        self.endpoints = Some((start.into(), goal.into()));
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Searching
    // -----------------------------------------------------------------------

    /// Begin a new search between the declared endpoints.
    ///
    /// Any previous session is discarded first, so a failed start leaves
    /// the engine [`Status::Ready`].
    pub fn start(&mut self) -> EngineResult<Status> {
        self.session = None;
        let (start, goal) = self.endpoints.ok_or(EngineError::EndpointsNotSet)?;
        let search = Search::new(&self.grid, start, goal, &self.config)?;
        let status = search.status();
        self.session = Some(search);
        Ok(status)
    }

    /// Advance the current search by one step. Returns the status reached;
    /// without a session this is a no-op returning [`Status::Ready`].
    pub fn step(&mut self) -> Status {
        match self.session.as_mut() {
            Some(search) => search.step(&self.grid),
            None => Status::Ready,
        }
    }

    /// Step until the search resolves or `max_steps` steps were taken.
    pub fn run(&mut self, max_steps: usize) -> EngineResult<Status> {
        match self.session.as_mut() {
            Some(search) => search.run(&self.grid, max_steps),
            None => Ok(Status::Ready),
        }
    }

    /// [`run`](Self::run) with the configured step limit.
    pub fn run_to_completion(&mut self) -> EngineResult<Status> {
        self.run(self.step_limit())
    }

    /// The step budget used by [`run_to_completion`](Self::run_to_completion).
    pub fn step_limit(&self) -> usize {
        self.config.step_limit.unwrap_or(self.grid.len() + 1)
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Current status; [`Status::Ready`] when no search exists.
    pub fn status(&self) -> Status {
        self.session
            .as_ref()
            .map_or(Status::Ready, |search| search.status())
    }

    /// Cells currently in the open set, row-major.
    pub fn open_set_snapshot(&self) -> Vec<Point> {
        self.session
            .as_ref()
            .map(Search::open_set)
            .unwrap_or_default()
    }

    /// Cells in the closed set, in closing order.
    pub fn closed_set_snapshot(&self) -> Vec<Point> {
        self.session
            .as_ref()
            .map(Search::closed_set)
            .unwrap_or_default()
    }

    /// The solved start-to-goal path.
    pub fn current_path(&self) -> EngineResult<&[Point]> {
        match &self.session {
            Some(search) => search.path(),
            None => Err(EngineError::NoPathYet(Status::Ready)),
        }
    }

    /// Path from the start to the most recently expanded cell.
    pub fn partial_path(&self) -> Vec<Point> {
        self.session
            .as_ref()
            .map(Search::partial_path)
            .unwrap_or_default()
    }

    /// Bookkeeping of a single cell in the current search.
    pub fn cell(&self, p: impl Into<Point>) -> Option<CellScore> {
        self.session.as_ref()?.cell(p.into())
    }

    /// Steps taken by the current search.
    pub fn steps(&self) -> usize {
        self.session.as_ref().map_or(0, Search::steps)
    }

    pub fn grid(&self) -> &ObstacleGrid {
        &self.grid
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The declared `(start, goal)` pair.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        self.endpoints
    }

    /// The current search session, if any.
    pub fn session(&self) -> Option<&Search> {
        self.session.as_ref()
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Refuse edits during a running search; drop a finished one.
    fn ensure_idle(&mut self) -> EngineResult<()> {
        match self.status() {
            Status::Running => Err(EngineError::SearchRunning),
            _ => {
                self.session = None;
                Ok(())
            }
        }
    }

    fn retain_endpoints(&mut self) {
        if let Some((start, goal)) = self.endpoints {
            if !self.grid.contains(start) || !self.grid.contains(goal) {
                log::debug!("endpoints {start} -> {goal} no longer fit, cleared");
                self.endpoints = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Endpoint, EndpointFault};

    fn engine(width: i32, height: i32) -> PathfindingEngine {
        let mut e = PathfindingEngine::default();
        e.configure(width, height).unwrap();
        e
    }

    #[test]
    fn five_by_five_corner_to_corner() {
        let mut e = engine(5, 5);
        e.set_endpoints((0, 0), (4, 4)).unwrap();
        assert_eq!(e.start(), Ok(Status::Running));
        assert_eq!(e.run(100), Ok(Status::Solved));
        assert_eq!(e.current_path().unwrap().len(), 9);
    }

    #[test]
    fn ready_until_started() {
        let mut e = engine(3, 3);
        assert_eq!(e.status(), Status::Ready);
        assert_eq!(e.step(), Status::Ready);
        assert_eq!(e.run(10), Ok(Status::Ready));
        assert!(e.open_set_snapshot().is_empty());
        assert!(e.closed_set_snapshot().is_empty());
        assert_eq!(e.current_path(), Err(EngineError::NoPathYet(Status::Ready)));
        assert_eq!(e.start(), Err(EngineError::EndpointsNotSet));
    }

    #[test]
    fn current_path_before_resolution() {
        let mut e = engine(4, 4);
        e.set_endpoints((0, 0), (3, 3)).unwrap();
        e.start().unwrap();
        e.step();
        assert_eq!(e.current_path(), Err(EngineError::NoPathYet(Status::Running)));
    }

    #[test]
    fn wall_row_fails_and_has_no_path() {
        let mut e = engine(4, 3);
        for x in 0..4 {
            e.set_blocked(x, 1, true).unwrap();
        }
        e.set_endpoints((0, 0), (3, 2)).unwrap();
        e.start().unwrap();
        assert_eq!(e.run_to_completion(), Ok(Status::Failed));
        assert_eq!(e.current_path(), Err(EngineError::NoPathYet(Status::Failed)));
        assert_eq!(e.step(), Status::Failed);
    }

    #[test]
    fn edits_are_refused_while_running() {
        let mut e = engine(4, 4);
        e.set_endpoints((0, 0), (3, 3)).unwrap();
        e.start().unwrap();
        assert_eq!(e.set_blocked(1, 1, true), Err(EngineError::SearchRunning));
        assert_eq!(e.set_endpoints((0, 0), (1, 1)), Err(EngineError::SearchRunning));
        assert_eq!(e.resize(8, 8), Err(EngineError::SearchRunning));
        assert_eq!(e.clear_obstacles(), Err(EngineError::SearchRunning));
        assert!(!e.grid().is_blocked(Point::new(1, 1)));
        assert_eq!(e.status(), Status::Running);
    }

    #[test]
    fn edits_after_resolution_reset_to_ready() {
        let mut e = engine(4, 4);
        e.set_endpoints((0, 0), (3, 3)).unwrap();
        e.start().unwrap();
        e.run_to_completion().unwrap();
        assert_eq!(e.status(), Status::Solved);

        e.set_blocked(1, 1, true).unwrap();
        assert_eq!(e.status(), Status::Ready);
        assert!(e.closed_set_snapshot().is_empty());
        assert_eq!(e.endpoints(), Some((Point::new(0, 0), Point::new(3, 3))));
    }

    #[test]
    fn configure_tears_down_running_search() {
        let mut e = engine(4, 4);
        e.set_blocked(2, 2, true).unwrap();
        e.set_endpoints((0, 0), (3, 3)).unwrap();
        e.start().unwrap();
        e.configure(6, 6).unwrap();
        assert_eq!(e.status(), Status::Ready);
        assert_eq!(e.grid().blocked_count(), 0);
        assert_eq!(e.endpoints(), Some((Point::new(0, 0), Point::new(3, 3))));

        e.configure(2, 2).unwrap();
        assert_eq!(e.endpoints(), None);
    }

    #[test]
    fn configure_rejects_bad_dimensions() {
        let mut e = PathfindingEngine::default();
        assert_eq!(
            e.configure(0, 5),
            Err(EngineError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn resize_keeps_obstacles() {
        let mut e = engine(4, 4);
        e.set_blocked(1, 1, true).unwrap();
        e.set_blocked(3, 3, true).unwrap();
        e.resize(2, 2).unwrap();
        assert!(e.grid().is_blocked(Point::new(1, 1)));
        assert_eq!(e.grid().blocked_count(), 1);
        e.clear_obstacles().unwrap();
        assert_eq!(e.grid().blocked_count(), 0);
    }

    #[test]
    fn set_blocked_out_of_bounds() {
        let mut e = engine(2, 2);
        assert_eq!(
            e.set_blocked(5, 0, true),
            Err(EngineError::OutOfBounds(Point::new(5, 0)))
        );
    }

    #[test]
    fn blocked_endpoint_leaves_engine_ready() {
        let mut e = engine(3, 3);
        e.set_blocked(2, 2, true).unwrap();
        e.set_endpoints((0, 0), (2, 2)).unwrap();
        assert_eq!(
            e.start(),
            Err(EngineError::InvalidEndpoint {
                endpoint: Endpoint::Goal,
                point: Point::new(2, 2),
                fault: EndpointFault::Blocked,
            })
        );
        assert_eq!(e.status(), Status::Ready);
    }

    #[test]
    fn same_endpoint_follows_config() {
        let mut e = engine(3, 3);
        e.set_endpoints((1, 1), (1, 1)).unwrap();
        assert_eq!(e.start(), Ok(Status::Solved));
        assert_eq!(e.current_path().unwrap(), &[Point::new(1, 1)]);

        let mut strict = PathfindingEngine::new(SearchConfig {
            allow_same_endpoint: false,
            ..SearchConfig::default()
        });
        strict.configure(3, 3).unwrap();
        strict.set_endpoints((1, 1), (1, 1)).unwrap();
        assert_eq!(
            strict.start(),
            Err(EngineError::SameEndpoint(Point::new(1, 1)))
        );
    }

    #[test]
    fn configured_step_limit_is_enforced() {
        let mut e = PathfindingEngine::new(SearchConfig {
            step_limit: Some(2),
            ..SearchConfig::default()
        });
        e.configure(10, 1).unwrap();
        e.set_endpoints((0, 0), (9, 0)).unwrap();
        e.start().unwrap();
        assert_eq!(
            e.run_to_completion(),
            Err(EngineError::StepLimitExceeded { max_steps: 2 })
        );
        assert_eq!(e.steps(), 2);
        assert_eq!(e.partial_path(), vec![Point::new(0, 0), Point::new(1, 0)]);
    }

    #[test]
    fn restart_after_solved_searches_again() {
        let mut e = engine(3, 1);
        e.set_endpoints((0, 0), (2, 0)).unwrap();
        e.start().unwrap();
        e.run_to_completion().unwrap();
        assert_eq!(e.start(), Ok(Status::Running));
        assert_eq!(e.steps(), 0);
        assert_eq!(e.cell((0, 0)).map(|c| c.g), Some(0));
    }
}
