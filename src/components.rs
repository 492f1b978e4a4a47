//! Connected regions of free cells, used to reject unreachable goals before searching.
use crate::connectivity::Connectivity;
use crate::grid::OccupancyGrid;
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

/// [Components] groups the traversable cells of an [OccupancyGrid] into connected
/// components under a [Connectivity] using a [UnionFind] over linear cell ids.
#[derive(Clone, Debug)]
pub struct Components {
    connectivity: Connectivity,
    rows: usize,
    cols: usize,
    sets: UnionFind<usize>,
}

impl Components {
    /// Links every free cell to its free neighbours. Only the forward half of the
    /// neighbourhood is visited since union is symmetric.
    pub fn build(grid: &OccupancyGrid, connectivity: Connectivity) -> Components {
        info!(
            "Generating connected components for a {}x{} grid",
            grid.rows(),
            grid.cols()
        );
        let mut sets = UnionFind::new(grid.cell_count());
        for point in grid.free_cells() {
            let parent_ix = grid.index(point);
            connectivity
                .offsets()
                .filter(|&(dr, dc)| dr > 0 || (dr == 0 && dc > 0))
                .map(|(dr, dc)| Point::new(point.x + dc, point.y + dr))
                .filter(|p| grid.is_traversable(*p))
                .for_each(|p| {
                    sets.union(parent_ix, grid.index(p));
                });
        }
        Components {
            connectivity,
            rows: grid.rows(),
            cols: grid.cols(),
            sets,
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    fn ix(&self, cell: Point) -> Option<usize> {
        let inside = cell.x >= 0
            && cell.y >= 0
            && (cell.y as usize) < self.rows
            && (cell.x as usize) < self.cols;
        inside.then(|| cell.y as usize * self.cols + cell.x as usize)
    }

    /// Representative id of the component `cell` belongs to.
    pub fn component(&self, cell: Point) -> Option<usize> {
        self.ix(cell).map(|ix| self.sets.find(ix))
    }

    /// Checks if `a` and `b` are on the same component. Cells outside the grid are never
    /// reachable.
    pub fn reachable(&self, a: Point, b: Point) -> bool {
        match (self.ix(a), self.ix(b)) {
            (Some(a), Some(b)) => self.sets.equiv(a, b),
            _ => false,
        }
    }
}
