use crate::error::SearchError;
use crate::{CARDINAL_COST, DIAGONAL_COST};
use grid_util::point::Point;

/// `(d_row, d_col)` offsets of the 3x3 neighbourhood, scanned row by row from the top-left,
/// centre excluded.
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The set of moves allowed from a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Orthogonal moves only.
    Four,
    /// Orthogonal and diagonal moves.
    #[default]
    Eight,
}

impl Connectivity {
    pub fn allows_diagonal(self) -> bool {
        self == Connectivity::Eight
    }

    /// Neighbour offsets as `(d_row, d_col)` in fixed scan order.
    pub fn offsets(self) -> impl Iterator<Item = (i32, i32)> {
        MOORE_OFFSETS
            .into_iter()
            .filter(move |&(dr, dc)| self.allows_diagonal() || dr == 0 || dc == 0)
    }

    /// Cells adjacent to `cell`, in scan order. Bounds and occupancy are not checked.
    pub fn neighbours(self, cell: Point) -> impl Iterator<Item = Point> {
        self.offsets().map(move |(dr, dc)| Point::new(cell.x + dc, cell.y + dr))
    }

    /// Whether `b` can be reached from `a` in a single move.
    pub fn adjacent(self, a: Point, b: Point) -> bool {
        let dr = (a.y - b.y).abs();
        let dc = (a.x - b.x).abs();
        match self {
            Connectivity::Four => dr + dc == 1,
            Connectivity::Eight => dr.max(dc) == 1,
        }
    }

    /// Cost of moving between two adjacent cells.
    pub fn step_cost(self, a: Point, b: Point) -> f64 {
        debug_assert!(self.adjacent(a, b));
        if a.x != b.x && a.y != b.y {
            DIAGONAL_COST
        } else {
            CARDINAL_COST
        }
    }

    /// Admissible and consistent estimate of the cost from `a` to `b`: the Manhattan
    /// distance on a 4-grid, the Euclidean distance on an 8-grid.
    pub fn estimate(self, a: Point, b: Point) -> f64 {
        let dr = f64::from((a.y - b.y).abs());
        let dc = f64::from((a.x - b.x).abs());
        match self {
            Connectivity::Four => dr + dc,
            Connectivity::Eight => dr.hypot(dc),
        }
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = SearchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            other => Err(SearchError::InvalidConnectivity(other)),
        }
    }
}

impl From<Connectivity> for u8 {
    fn from(connectivity: Connectivity) -> u8 {
        match connectivity {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }
}
