use fixedbitset::FixedBitSet;
use grid_util::point::Point;

/// Cells that have been expanded. Append-only for the lifetime of a search.
#[derive(Clone, Debug)]
pub struct ClosedSet {
    rows: usize,
    cols: usize,
    members: FixedBitSet,
    len: usize,
}

impl ClosedSet {
    pub fn new(rows: usize, cols: usize) -> ClosedSet {
        ClosedSet {
            rows,
            cols,
            members: FixedBitSet::with_capacity(rows * cols),
            len: 0,
        }
    }

    fn ix(&self, cell: Point) -> Option<usize> {
        let inside = cell.x >= 0
            && cell.y >= 0
            && (cell.y as usize) < self.rows
            && (cell.x as usize) < self.cols;
        inside.then(|| cell.y as usize * self.cols + cell.x as usize)
    }

    /// Marks `cell` as expanded. Returns true if it was not closed before.
    pub fn insert(&mut self, cell: Point) -> bool {
        match self.ix(cell) {
            Some(ix) if !self.members.put(ix) => {
                self.len += 1;
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, cell: Point) -> bool {
        self.ix(cell).is_some_and(|ix| self.members.contains(ix))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
