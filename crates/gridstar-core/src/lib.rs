//! **gridstar-core** — grid geometry and obstacle maps.
//!
//! This crate provides the foundational types shared by the *gridstar*
//! crates: cell coordinates and rectangles, the obstacle grid a search reads,
//! and a small text format for writing grids by hand.

pub mod geom;
pub mod grid;
pub mod layout;

pub use geom::{Point, Range};
pub use grid::ObstacleGrid;
pub use layout::{Layout, LayoutError};
