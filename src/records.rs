use grid_util::point::Point;

/// Cost bookkeeping for a single cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRecord {
    /// Best known cost from the start.
    pub g: f64,
    /// Estimated remaining cost to the goal.
    pub h: f64,
    /// `g + h`
    pub f: f64,
    /// Predecessor on the best known path. The start points at itself.
    pub parent: Option<Point>,
}

impl Default for CellRecord {
    fn default() -> CellRecord {
        CellRecord {
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
            parent: None,
        }
    }
}

impl CellRecord {
    pub fn new(g: f64, h: f64, parent: Point) -> CellRecord {
        CellRecord {
            g,
            h,
            f: g + h,
            parent: Some(parent),
        }
    }

    /// Record of the start cell, whose parent is itself.
    pub fn start(start: Point) -> CellRecord {
        CellRecord::new(0.0, 0.0, start)
    }

    pub fn is_discovered(&self) -> bool {
        self.parent.is_some()
    }
}

/// One [CellRecord] per grid cell, addressed by linear id `row * cols + col`.
#[derive(Clone, Debug)]
pub struct CellTable {
    cols: usize,
    records: Vec<CellRecord>,
}

impl CellTable {
    pub fn new(rows: usize, cols: usize) -> CellTable {
        CellTable {
            cols,
            records: vec![CellRecord::default(); rows * cols],
        }
    }

    fn ix(&self, cell: Point) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x as usize >= self.cols {
            return None;
        }
        let ix = cell.y as usize * self.cols + cell.x as usize;
        (ix < self.records.len()).then_some(ix)
    }

    pub fn get(&self, cell: Point) -> Option<&CellRecord> {
        self.ix(cell).map(|ix| &self.records[ix])
    }

    pub fn get_mut(&mut self, cell: Point) -> Option<&mut CellRecord> {
        self.ix(cell).map(move |ix| &mut self.records[ix])
    }

    /// Overwrites the record of `cell`. Returns false if the cell is outside the table.
    pub fn set(&mut self, cell: Point, record: CellRecord) -> bool {
        match self.get_mut(cell) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub fn parent(&self, cell: Point) -> Option<Point> {
        self.get(cell).and_then(|r| r.parent)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
