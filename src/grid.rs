use crate::error::{Result, SearchError};
use core::fmt;
use fixedbitset::FixedBitSet;
use grid_util::point::Point;
use std::str::FromStr;

const FREE_CHAR: char = '.';
const BLOCKED_CHAR: char = '#';

/// [OccupancyGrid] stores which cells of a `rows` x `cols` map may be entered. A set bit in
/// the underlying [FixedBitSet] marks a traversable cell, a cleared bit an obstacle. Cells
/// are addressed with [Point]s whose `y` is the row and `x` the column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: usize,
    cols: usize,
    traversable: FixedBitSet,
}

impl Default for OccupancyGrid {
    fn default() -> OccupancyGrid {
        OccupancyGrid::new(0, 0, true)
    }
}

impl OccupancyGrid {
    /// Creates a grid in which every cell is traversable (`true`) or blocked (`false`).
    pub fn new(rows: usize, cols: usize, traversable: bool) -> OccupancyGrid {
        let mut bits = FixedBitSet::with_capacity(rows * cols);
        if traversable {
            bits.insert_range(..);
        }
        OccupancyGrid {
            rows,
            cols,
            traversable: bits,
        }
    }

    /// Builds a grid from a row-major boolean matrix where `true` marks a free cell.
    pub fn from_rows(matrix: Vec<Vec<bool>>) -> Result<OccupancyGrid> {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, Vec::len);
        let mut grid = OccupancyGrid::new(rows, cols, false);
        for (row, values) in matrix.into_iter().enumerate() {
            if values.len() != cols {
                return Err(SearchError::RaggedGrid {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            for (col, free) in values.into_iter().enumerate() {
                grid.traversable.set(row * cols + col, free);
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn in_bounds(&self, cell: Point) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.y as usize) < self.rows && (cell.x as usize) < self.cols
    }

    /// Whether the cell can be entered. Out-of-bounds cells are never traversable.
    pub fn is_traversable(&self, cell: Point) -> bool {
        self.in_bounds(cell) && self.traversable.contains(self.index(cell))
    }

    /// Marks a cell as free or blocked. Ignores cells outside the grid.
    pub fn set(&mut self, cell: Point, traversable: bool) {
        if self.in_bounds(cell) {
            let ix = self.index(cell);
            self.traversable.set(ix, traversable);
        }
    }

    /// Number of traversable cells.
    pub fn free_count(&self) -> usize {
        self.traversable.count_ones(..)
    }

    /// Linear id of an in-bounds cell, `row * cols + col`.
    pub fn index(&self, cell: Point) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.y as usize * self.cols + cell.x as usize
    }

    /// Inverse of [index](Self::index).
    pub fn cell_at(&self, index: usize) -> Point {
        Point::new((index % self.cols) as i32, (index / self.cols) as i32)
    }

    /// Iterates over all traversable cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.traversable.ones().map(move |ix| self.cell_at(ix))
    }
}

impl FromStr for OccupancyGrid {
    type Err = SearchError;

    /// Parses one line per row, `.` for a free cell and `#` for an obstacle. Blank lines and
    /// surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<OccupancyGrid> {
        let matrix = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| match ch {
                        FREE_CHAR => Ok(true),
                        BLOCKED_CHAR => Ok(false),
                        ch => Err(SearchError::InvalidMapChar { ch, row, col }),
                    })
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<Vec<Vec<bool>>>>()?;
        OccupancyGrid::from_rows(matrix)
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows as i32 {
            let line = (0..self.cols as i32)
                .map(|col| {
                    if self.is_traversable(Point::new(col, row)) {
                        FREE_CHAR
                    } else {
                        BLOCKED_CHAR
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
