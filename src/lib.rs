//! # grid_astar
//!
//! Shortest paths on a binary occupancy grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Movement is either
//! 4-connected (orthogonal steps of cost 1, Manhattan heuristic) or 8-connected (diagonal
//! steps cost `sqrt(2)`, Euclidean heuristic). Grids have caller-supplied dimensions and
//! every search owns its own bookkeeping, so a grid can be shared between searches.
//!
//! Cells are [Point]s where `y` is the row and `x` the column; use [cell] and [RowCol] to
//! stay in row/column terms.
//!
//! ```
//! use grid_astar::{cell, find_path, Connectivity, OccupancyGrid};
//!
//! let grid: OccupancyGrid = "...\n.#.\n...".parse().unwrap();
//! let path = find_path(&grid, cell(0, 0), cell(2, 2), Connectivity::Four).unwrap();
//! assert_eq!(path.len(), 5);
//! ```
mod closed_set;
pub mod components;
mod connectivity;
mod error;
mod frontier;
pub mod grid;
pub mod path;
mod records;
pub mod search;

pub use closed_set::ClosedSet;
pub use components::Components;
pub use connectivity::Connectivity;
pub use error::{Result, SearchError};
pub use frontier::Frontier;
pub use grid::OccupancyGrid;
pub use path::{is_valid_path, path_cost, reconstruct_path, Path};
pub use records::{CellRecord, CellTable};
pub use search::{AstarSearch, NoopObserver, SearchConfig, SearchObserver, SearchState};

pub use grid_util::point::Point;

/// Cost of a horizontal or vertical step.
pub const CARDINAL_COST: f64 = 1.0;
/// Cost of a diagonal step.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Builds the [Point] for the cell at `row`, `col`.
pub fn cell(row: i32, col: i32) -> Point {
    Point::new(col, row)
}

/// Row/column view of a [Point].
pub trait RowCol {
    fn row(&self) -> i32;
    fn col(&self) -> i32;
}

impl RowCol for Point {
    fn row(&self) -> i32 {
        self.y
    }
    fn col(&self) -> i32 {
        self.x
    }
}

/// Runs a single search with the default [SearchConfig] for the given connectivity.
pub fn find_path(
    grid: &OccupancyGrid,
    start: Point,
    goal: Point,
    connectivity: Connectivity,
) -> Result<Path> {
    AstarSearch::new(grid, SearchConfig::new(connectivity)).find_path(start, goal)
}
