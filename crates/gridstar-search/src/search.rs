use std::fmt;

use gridstar_core::{Point, Range};

use crate::config::SearchConfig;
use crate::distance::manhattan;
use crate::error::{Endpoint, EndpointFault, EngineError, EngineResult};
use crate::open_set::OpenSet;
use crate::traits::Passable;

/// Sentinel `g`/`f` value for cells no search has reached.
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

/// Lifecycle of a search.
///
/// `Ready → Running → {Solved | Failed}`. A [`Search`] value is never
/// `Ready`; that state belongs to an engine with no session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Ready,
    Running,
    Solved,
    Failed,
}

impl Status {
    /// Whether no further step can change the search.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Solved | Self::Failed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Solved => "solved",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Which set a cell belongs to. Every cell is in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Unvisited,
    Open,
    Closed,
}

/// Bookkeeping of one reached cell, as returned by [`Search::cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellScore {
    /// Best known cost from the start.
    pub g: i32,
    /// `g` plus the Manhattan estimate to the goal.
    pub f: i32,
    /// Cell this one was best reached from; `None` for the start.
    pub predecessor: Option<Point>,
    pub state: CellState,
}

#[derive(Clone, Copy)]
struct Node {
    g: i32,
    f: i32,
    parent: usize,
    state: CellState,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: NO_PARENT,
            state: CellState::Unvisited,
        }
    }
}

/// One A* search session, advanced a step at a time.
///
/// The session does not hold the grid: each [`step`](Self::step) reads the
/// terrain it is given. Passing different terrain than the session was
/// created with, or editing it mid-search, gives unspecified (but memory
/// safe) results; start a new session instead.
pub struct Search {
    rng: Range,
    width: usize,
    start: Point,
    goal: Point,
    goal_idx: usize,
    nodes: Vec<Node>,
    open: OpenSet,
    open_len: usize,
    closed: Vec<usize>,
    last: Option<usize>,
    steps: usize,
    status: Status,
    path: Option<Vec<Point>>,
}

impl Search {
    /// Begin a search from `start` to `goal`.
    ///
    /// Both endpoints must be inside the grid and passable. When they are
    /// equal the search is solved immediately with path `[start]`, unless
    /// `config` forbids it.
    pub fn new<P: Passable>(
        pather: &P,
        start: Point,
        goal: Point,
        config: &SearchConfig,
    ) -> EngineResult<Self> {
        let rng = pather.bounds();
        let width = rng.width().max(0) as usize;
        let start_idx = endpoint_idx(pather, rng, Endpoint::Start, start)?;
        let goal_idx = endpoint_idx(pather, rng, Endpoint::Goal, goal)?;
        if start == goal && !config.allow_same_endpoint {
            return Err(EngineError::SameEndpoint(start));
        }

        let mut search = Self {
            rng,
            width,
            start,
            goal,
            goal_idx,
            nodes: vec![Node::default(); rng.len()],
            open: OpenSet::default(),
            open_len: 0,
            closed: Vec::new(),
            last: None,
            steps: 0,
            status: Status::Running,
            path: None,
        };

        let h = manhattan(start, goal);
        let node = &mut search.nodes[start_idx];
        node.g = 0;
        node.f = h;

        if start_idx == goal_idx {
            node.state = CellState::Closed;
            search.closed.push(start_idx);
            search.last = Some(start_idx);
            search.path = Some(vec![start]);
            search.status = Status::Solved;
            log::debug!("search {start} -> {goal}: endpoints coincide, solved");
            return Ok(search);
        }

        node.state = CellState::Open;
        search.open.push(start_idx, h, 0);
        search.open_len = 1;
        log::debug!("search {start} -> {goal} started on {rng}");
        Ok(search)
    }

    /// Advance the search by one expansion.
    ///
    /// Does nothing once the search is solved or failed. Otherwise pops the
    /// best frontier cell, closes it, and either finishes (goal reached or
    /// frontier exhausted) or relaxes its four neighbours.
    pub fn step<P: Passable>(&mut self, pather: &P) -> Status {
        if self.status != Status::Running {
            return self.status;
        }

        let Some(ci) = self.pop_open() else {
            self.status = Status::Failed;
            log::debug!(
                "search {} -> {} failed after {} steps, {} cells closed",
                self.start,
                self.goal,
                self.steps,
                self.closed.len()
            );
            return self.status;
        };

        self.nodes[ci].state = CellState::Closed;
        self.closed.push(ci);
        self.last = Some(ci);

        if ci == self.goal_idx {
            let path = self.trace(ci);
            log::debug!(
                "search {} -> {} solved after {} steps, path of {} cells",
                self.start,
                self.goal,
                self.steps,
                path.len()
            );
            self.path = Some(path);
            self.status = Status::Solved;
            return self.status;
        }

        let current = self.point(ci);
        let g = self.nodes[ci].g + 1;
        for np in current.neighbors_4() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            if pather.passable(np) {
                self.relax(ni, np, g, ci);
            }
        }

        self.steps += 1;
        log::trace!(
            "step {}: expanded {current}, open {}, closed {}",
            self.steps,
            self.open_len,
            self.closed.len()
        );
        self.status
    }

    /// Step until the search resolves.
    ///
    /// Fails with [`EngineError::StepLimitExceeded`] after `max_steps` calls
    /// to [`step`](Self::step) without resolution; the session stays
    /// running and may be resumed.
    pub fn run<P: Passable>(&mut self, pather: &P, max_steps: usize) -> EngineResult<Status> {
        let mut taken = 0;
        while self.status == Status::Running {
            if taken == max_steps {
                log::warn!(
                    "search {} -> {} unresolved after {max_steps} steps",
                    self.start,
                    self.goal
                );
                return Err(EngineError::StepLimitExceeded { max_steps });
            }
            self.step(pather);
            taken += 1;
        }
        Ok(self.status)
    }

    /// Current status.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Number of steps that expanded a cell without resolving the search.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of cells currently in the open set.
    pub fn open_len(&self) -> usize {
        self.open_len
    }

    /// Number of cells in the closed set.
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Cells in the open set, in row-major order.
    pub fn open_set(&self) -> Vec<Point> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.state == CellState::Open)
            .map(|(i, _)| self.point(i))
            .collect()
    }

    /// Cells in the closed set, in the order they were closed.
    pub fn closed_set(&self) -> Vec<Point> {
        self.closed.iter().map(|&i| self.point(i)).collect()
    }

    /// The start-to-goal path. Only available once solved.
    pub fn path(&self) -> EngineResult<&[Point]> {
        match &self.path {
            Some(path) => Ok(path),
            None => Err(EngineError::NoPathYet(self.status)),
        }
    }

    /// The cell closed by the most recent step, if any.
    pub fn last_expanded(&self) -> Option<Point> {
        self.last.map(|i| self.point(i))
    }

    /// Predecessor chain from the start to the most recently expanded cell.
    ///
    /// Empty before the first step. Equal to [`path`](Self::path) once
    /// solved.
    pub fn partial_path(&self) -> Vec<Point> {
        self.last.map(|i| self.trace(i)).unwrap_or_default()
    }

    /// Bookkeeping for `p`, or `None` if it is outside the grid or not yet
    /// reached.
    pub fn cell(&self, p: Point) -> Option<CellScore> {
        let n = self.nodes[self.idx(p)?];
        if n.state == CellState::Unvisited {
            return None;
        }
        Some(CellScore {
            g: n.g,
            f: n.f,
            predecessor: (n.parent != NO_PARENT).then(|| self.point(n.parent)),
            state: n.state,
        })
    }

    /// Offer cost `g` via `parent` to cell `ni`. Closed cells and open cells
    /// already reached as cheaply are left alone; a cheaper route to an open
    /// cell pushes a fresh heap entry and leaves the old one to be skipped.
    fn relax(&mut self, ni: usize, np: Point, g: i32, parent: usize) -> bool {
        let n = &mut self.nodes[ni];
        match n.state {
            CellState::Closed => return false,
            CellState::Open if g >= n.g => return false,
            CellState::Open => {}
            CellState::Unvisited => {
                n.state = CellState::Open;
                self.open_len += 1;
            }
        }
        n.g = g;
        n.f = g + manhattan(np, self.goal);
        n.parent = parent;
        self.open.push(ni, n.f, g);
        true
    }

    fn pop_open(&mut self) -> Option<usize> {
        while let Some(entry) = self.open.pop() {
            let n = &self.nodes[entry.idx];
            // Skip superseded entries.
            if n.state != CellState::Open || n.g != entry.g {
                continue;
            }
            self.open_len -= 1;
            return Some(entry.idx);
        }
        None
    }

    fn trace(&self, mut ci: usize) -> Vec<Point> {
        let mut path = Vec::new();
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        flat_idx(self.rng, self.width, p)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

#[inline]
fn flat_idx(rng: Range, width: usize, p: Point) -> Option<usize> {
    if !rng.contains(p) {
        return None;
    }
    let x = (p.x - rng.min.x) as usize;
    let y = (p.y - rng.min.y) as usize;
    Some(y * width + x)
}

fn endpoint_idx<P: Passable>(
    pather: &P,
    rng: Range,
    endpoint: Endpoint,
    p: Point,
) -> EngineResult<usize> {
    let reject = |fault| EngineError::InvalidEndpoint {
        endpoint,
        point: p,
        fault,
    };
    let idx = flat_idx(rng, rng.width().max(0) as usize, p)
        .ok_or_else(|| reject(EndpointFault::OutOfBounds))?;
    if !pather.passable(p) {
        return Err(reject(EndpointFault::Blocked));
    }
    Ok(idx)
}
