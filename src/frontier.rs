use crate::records::CellRecord;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

struct SmallestCostHolder {
    estimated_cost: f64,
    heuristic: f64,
    order: u64,
    cell: Point,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so every key is reversed: smallest f first, then the
        // smallest h (closest to the goal), then the cell that was discovered first.
        other
            .estimated_cost
            .total_cmp(&self.estimated_cost)
            .then_with(|| other.heuristic.total_cmp(&self.heuristic))
            .then_with(|| other.order.cmp(&self.order))
    }
}

struct OpenEntry {
    record: CellRecord,
    order: u64,
}

/// The open set of an A* search. Each open cell appears exactly once and carries its
/// [CellRecord]. Improving a record pushes a fresh heap entry and leaves the old one behind;
/// outdated entries are recognised by their stale `f` and skipped on extraction.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<SmallestCostHolder>,
    open: FxIndexMap<Point, OpenEntry>,
    inserted: u64,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }

    /// Opens `cell` with the given record. Returns false, leaving the frontier untouched,
    /// if the cell is already open.
    pub fn insert(&mut self, cell: Point, record: CellRecord) -> bool {
        if self.open.contains_key(&cell) {
            return false;
        }
        let order = self.inserted;
        self.inserted += 1;
        self.open.insert(cell, OpenEntry { record, order });
        self.heap.push(SmallestCostHolder {
            estimated_cost: record.f,
            heuristic: record.h,
            order,
            cell,
        });
        true
    }

    /// Lowers the cost of an open cell if `new_g` beats its current `g`, re-parenting it.
    /// Returns whether the record changed.
    pub fn update_if_better(&mut self, cell: Point, new_g: f64, parent: Point) -> bool {
        let Some(entry) = self.open.get_mut(&cell) else {
            return false;
        };
        if new_g >= entry.record.g {
            return false;
        }
        let record = &mut entry.record;
        record.g = new_g;
        record.f = new_g + record.h;
        record.parent = Some(parent);
        self.heap.push(SmallestCostHolder {
            estimated_cost: record.f,
            heuristic: record.h,
            order: entry.order,
            cell,
        });
        true
    }

    /// Removes and returns the open cell with the smallest `f`, preferring smaller `h` and
    /// then earlier discovery on ties.
    pub fn extract_best(&mut self) -> Option<(Point, CellRecord)> {
        while let Some(SmallestCostHolder {
            estimated_cost,
            cell,
            ..
        }) = self.heap.pop()
        {
            // Costs only ever decrease, so an entry whose f differs from the live record was
            // superseded by a later update.
            let live = self
                .open
                .get(&cell)
                .is_some_and(|entry| entry.record.f == estimated_cost);
            if live {
                return self
                    .open
                    .swap_remove(&cell)
                    .map(|entry| (cell, entry.record));
            }
        }
        None
    }

    pub fn contains(&self, cell: Point) -> bool {
        self.open.contains_key(&cell)
    }

    pub fn get(&self, cell: Point) -> Option<&CellRecord> {
        self.open.get(&cell).map(|entry| &entry.record)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
