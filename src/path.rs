use crate::connectivity::Connectivity;
use crate::error::{Result, SearchError};
use crate::grid::OccupancyGrid;
use crate::records::CellTable;
use grid_util::point::Point;
use itertools::Itertools;
use log::error;

/// A shortest path found by a search, from start to goal inclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    cells: Vec<Point>,
    cost: f64,
    expanded: usize,
}

impl Path {
    pub(crate) fn new(cells: Vec<Point>, cost: f64, expanded: usize) -> Path {
        debug_assert!(!cells.is_empty());
        Path {
            cells,
            cost,
            expanded,
        }
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Point> {
        self.cells
    }

    pub fn start(&self) -> Point {
        self.cells[0]
    }

    pub fn goal(&self) -> Point {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells on the path, start and goal included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total step cost, i.e. the `g` of the goal.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of cells expanded before the goal was reached.
    pub fn expanded(&self) -> usize {
        self.expanded
    }
}

/// Walks parent links back from `goal` to the self-parented start and returns the cells in
/// start-to-goal order. A chain that breaks off or runs longer than the table has cells is
/// reported as [SearchError::CorruptParentChain].
pub fn reconstruct_path(table: &CellTable, goal: Point) -> Result<Vec<Point>> {
    let mut path = vec![goal];
    let mut current = goal;
    loop {
        let Some(parent) = table.parent(current) else {
            error!("Cell {:?} on the path from {:?} has no parent", current, goal);
            return Err(SearchError::CorruptParentChain { cell: goal });
        };
        if parent == current {
            break;
        }
        if path.len() >= table.len() {
            error!("Parent chain from {:?} is longer than the grid", goal);
            return Err(SearchError::CorruptParentChain { cell: goal });
        }
        path.push(parent);
        current = parent;
    }
    path.reverse();
    Ok(path)
}

/// Sum of step costs along consecutive cells. Pairs that are not 8-adjacent contribute
/// their straight-line distance.
pub fn path_cost(cells: &[Point]) -> f64 {
    cells
        .iter()
        .tuple_windows()
        .map(|(a, b)| Connectivity::Eight.estimate(*a, *b))
        .sum()
}

/// Checks that every cell is in bounds and traversable and that consecutive cells are
/// adjacent under `connectivity`.
pub fn is_valid_path(grid: &OccupancyGrid, connectivity: Connectivity, cells: &[Point]) -> bool {
    cells.iter().all(|c| grid.is_traversable(*c))
        && cells
            .iter()
            .tuple_windows()
            .all(|(a, b)| connectivity.adjacent(*a, *b))
}
