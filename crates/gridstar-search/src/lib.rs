//! Step-wise A* search over obstacle grids.
//!
//! The search finds a minimum-cost 4-directional path between two cells of
//! an [`ObstacleGrid`](gridstar_core::ObstacleGrid) and exposes its progress
//! one expansion at a time, so a caller can draw the frontier and explored
//! cells as the search unfolds:
//!
//! - [`PathfindingEngine`] owns a grid, the endpoints and the current
//!   [`Search`] session, and refuses grid edits while a search runs.
//! - [`Search`] is the session itself; it can also be driven directly over
//!   any [`Passable`] terrain.
//! - [`record`] collects a [`SearchFrame`] per step for playback.
//!
//! Every move costs 1 and the heuristic is [`manhattan`] distance, so the
//! first path found is optimal and no closed cell is ever reopened. Ties in
//! `f` are broken on lower `g`, then on insertion order: identical inputs
//! always expand cells in the same order.
//!
//! ```
//! use gridstar_search::{PathfindingEngine, SearchConfig, Status};
//!
//! let mut engine = PathfindingEngine::new(SearchConfig::default());
//! engine.configure(5, 5)?;
//! engine.set_blocked(2, 1, true)?;
//! engine.set_endpoints((0, 0), (4, 4))?;
//! engine.start()?;
//! while engine.step() == Status::Running {
//!     let _frontier = engine.open_set_snapshot();
//! }
//! assert_eq!(engine.current_path()?.len(), 9);
//! # Ok::<(), gridstar_search::EngineError>(())
//! ```

mod config;
mod distance;
mod engine;
mod error;
mod frame;
mod open_set;
mod search;
mod traits;

pub use config::SearchConfig;
pub use distance::manhattan;
pub use engine::PathfindingEngine;
pub use error::{Endpoint, EndpointFault, EngineError, EngineResult};
pub use frame::{SearchFrame, record};
pub use search::{CellScore, CellState, Search, Status, UNREACHABLE};
pub use traits::Passable;
