//! The A* engine: input validation, the expansion loop and goal detection.
use crate::closed_set::ClosedSet;
use crate::components::Components;
use crate::connectivity::Connectivity;
use crate::error::{Result, SearchError};
use crate::frontier::Frontier;
use crate::grid::OccupancyGrid;
use crate::path::{reconstruct_path, Path};
use crate::records::{CellRecord, CellTable};
use grid_util::point::Point;
use log::{debug, info, trace, warn};

/// Search settings.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SearchConfig {
    /// Allowed moves; also selects the heuristic.
    pub connectivity: Connectivity,
    /// Gives up with [SearchError::ExpansionLimit] instead of expanding more cells than this.
    pub max_expansions: Option<usize>,
    /// Labels connected components first and answers [SearchError::NoPath] without
    /// expanding anything when start and goal are disconnected.
    pub component_precheck: bool,
}

impl SearchConfig {
    pub fn new(connectivity: Connectivity) -> SearchConfig {
        SearchConfig {
            connectivity,
            ..Default::default()
        }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> SearchConfig {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_component_precheck(mut self, enabled: bool) -> SearchConfig {
        self.component_precheck = enabled;
        self
    }
}

/// Outcome of one iteration of the main loop.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchState {
    Running,
    Succeeded(Path),
    Failed(SearchError),
}

/// Hook for watching a search without touching its logic. Every method defaults to a no-op.
pub trait SearchObserver {
    /// `cell` was taken off the frontier and is about to be expanded.
    fn cell_expanded(&mut self, _cell: Point, _record: &CellRecord) {}
    /// `cell` was opened or received a cheaper `g`.
    fn cost_updated(&mut self, _cell: Point, _record: &CellRecord) {}
    /// The goal was reached.
    fn path_found(&mut self, _path: &Path) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Bookkeeping owned by a single run.
struct SearchRun {
    goal: Point,
    frontier: Frontier,
    closed: ClosedSet,
    settled: CellTable,
}

/// A* over an [OccupancyGrid]. The grid is only borrowed; every call to
/// [find_path](Self::find_path) builds and drops its own frontier, closed set and records.
pub struct AstarSearch<'g> {
    grid: &'g OccupancyGrid,
    config: SearchConfig,
    components: Option<Components>,
}

impl<'g> AstarSearch<'g> {
    pub fn new(grid: &'g OccupancyGrid, config: SearchConfig) -> AstarSearch<'g> {
        let components = config
            .component_precheck
            .then(|| Components::build(grid, config.connectivity));
        AstarSearch {
            grid,
            config,
            components,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Checks a request before any search state exists: bounds first, then occupancy, then
    /// identical endpoints.
    pub fn validate(&self, start: Point, goal: Point) -> Result<()> {
        for cell in [start, goal] {
            if !self.grid.in_bounds(cell) {
                return Err(SearchError::OutOfBounds { cell });
            }
        }
        for cell in [start, goal] {
            if !self.grid.is_traversable(cell) {
                return Err(SearchError::Blocked { cell });
            }
        }
        if start == goal {
            return Err(SearchError::TrivialRequest);
        }
        Ok(())
    }

    /// Computes a shortest path from `start` to `goal`.
    pub fn find_path(&self, start: Point, goal: Point) -> Result<Path> {
        self.find_path_observed(start, goal, &mut NoopObserver)
    }

    /// Like [find_path](Self::find_path), reporting progress to `observer`.
    pub fn find_path_observed<O: SearchObserver>(
        &self,
        start: Point,
        goal: Point,
        observer: &mut O,
    ) -> Result<Path> {
        if let Err(e) = self.validate(start, goal) {
            debug!("Rejected request {:?} -> {:?}: {}", start, goal, e);
            return Err(e);
        }
        if let Some(components) = &self.components {
            if !components.reachable(start, goal) {
                info!("{:?} is not reachable from {:?}", goal, start);
                return Err(SearchError::NoPath);
            }
            info!("{:?} is reachable from {:?}, computing path", goal, start);
        }

        let (rows, cols) = self.grid.dimensions();
        let mut run = SearchRun {
            goal,
            frontier: Frontier::new(),
            closed: ClosedSet::new(rows, cols),
            settled: CellTable::new(rows, cols),
        };
        run.frontier.insert(start, CellRecord::start(start));

        loop {
            match self.step(&mut run, observer) {
                SearchState::Running => {}
                SearchState::Succeeded(path) => {
                    info!(
                        "Found path of {} cells with cost {:.3} after {} expansions",
                        path.len(),
                        path.cost(),
                        path.expanded()
                    );
                    observer.path_found(&path);
                    return Ok(path);
                }
                SearchState::Failed(e) => {
                    if e == SearchError::NoPath && self.components.is_some() {
                        warn!("Reachable goal could not be pathed to, are the components correct?");
                    } else {
                        debug!("Search {:?} -> {:?} failed: {}", start, goal, e);
                    }
                    return Err(e);
                }
            }
        }
    }

    /// One iteration of the main loop: extract the best open cell, stop on the goal, otherwise
    /// close the cell and relax its neighbours.
    fn step<O: SearchObserver>(&self, run: &mut SearchRun, observer: &mut O) -> SearchState {
        let Some((current, record)) = run.frontier.extract_best() else {
            return SearchState::Failed(SearchError::NoPath);
        };
        run.settled.set(current, record);

        if current == run.goal {
            return match reconstruct_path(&run.settled, current) {
                Ok(cells) => SearchState::Succeeded(Path::new(cells, record.g, run.closed.len())),
                Err(e) => SearchState::Failed(e),
            };
        }

        if let Some(limit) = self.config.max_expansions {
            if run.closed.len() >= limit {
                return SearchState::Failed(SearchError::ExpansionLimit {
                    expanded: run.closed.len(),
                });
            }
        }
        run.closed.insert(current);
        trace!(
            "Expanding {:?} with g={:.3} h={:.3} f={:.3}",
            current,
            record.g,
            record.h,
            record.f
        );
        observer.cell_expanded(current, &record);

        let connectivity = self.config.connectivity;
        for neighbour in connectivity.neighbours(current) {
            if !self.grid.is_traversable(neighbour) || run.closed.contains(neighbour) {
                continue;
            }
            let tentative_g = record.g + connectivity.step_cost(current, neighbour);
            let changed = if run.frontier.contains(neighbour) {
                run.frontier.update_if_better(neighbour, tentative_g, current)
            } else {
                let h = connectivity.estimate(neighbour, run.goal);
                run.frontier.insert(neighbour, CellRecord::new(tentative_g, h, current))
            };
            if changed {
                if let Some(updated) = run.frontier.get(neighbour) {
                    trace!("Cost of {:?} set to g={:.3}", neighbour, updated.g);
                    observer.cost_updated(neighbour, updated);
                }
            }
        }
        SearchState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{is_valid_path, path_cost};
    use crate::{cell, DIAGONAL_COST};

    fn search(grid: &OccupancyGrid, connectivity: Connectivity) -> AstarSearch<'_> {
        AstarSearch::new(grid, SearchConfig::new(connectivity))
    }

    #[derive(Default)]
    struct Recorder {
        expanded: Vec<Point>,
        updates: usize,
        found: Option<usize>,
    }

    impl SearchObserver for Recorder {
        fn cell_expanded(&mut self, cell: Point, _record: &CellRecord) {
            self.expanded.push(cell);
        }
        fn cost_updated(&mut self, _cell: Point, _record: &CellRecord) {
            self.updates += 1;
        }
        fn path_found(&mut self, path: &Path) {
            self.found = Some(path.len());
        }
    }

    /// Asserts that identical start and goal are rejected rather than answered with a
    /// single-cell path.
    #[test]
    fn equal_start_goal() {
        for connectivity in [Connectivity::Four, Connectivity::Eight] {
            let grid = OccupancyGrid::new(1, 1, true);
            let result = search(&grid, connectivity).find_path(cell(0, 0), cell(0, 0));
            assert_eq!(result, Err(SearchError::TrivialRequest));
        }
    }

    /// Asserts that the optimal solution around a central obstacle is found.
    #[test]
    fn solve_simple_problem() {
        // |S..|
        // |.#.|
        // |..G|
        for (connectivity, expected) in [(Connectivity::Four, 5), (Connectivity::Eight, 4)] {
            let grid: OccupancyGrid = "...\n.#.\n...".parse().unwrap();
            let path = search(&grid, connectivity)
                .find_path(cell(0, 0), cell(2, 2))
                .unwrap();
            assert_eq!(path.len(), expected);
            assert!(is_valid_path(&grid, connectivity, path.cells()));
        }
    }

    #[test]
    fn open_grid_fixture() {
        let grid = OccupancyGrid::new(5, 5, true);
        let four = search(&grid, Connectivity::Four)
            .find_path(cell(0, 0), cell(4, 4))
            .unwrap();
        assert_eq!(four.len(), 9);
        assert_eq!(four.cost(), 8.0);

        let eight = search(&grid, Connectivity::Eight)
            .find_path(cell(0, 0), cell(4, 4))
            .unwrap();
        assert_eq!(eight.len(), 5);
        assert!((eight.cost() - 4.0 * DIAGONAL_COST).abs() < 1e-9);
        assert!((path_cost(eight.cells()) - eight.cost()).abs() < 1e-9);
    }

    #[test]
    fn rejects_invalid_endpoints() {
        let grid: OccupancyGrid = "..\n.#".parse().unwrap();
        let s = search(&grid, Connectivity::Four);
        assert_eq!(
            s.find_path(cell(0, 0), cell(2, 0)),
            Err(SearchError::OutOfBounds { cell: cell(2, 0) })
        );
        assert_eq!(
            s.find_path(cell(-1, 0), cell(0, 1)),
            Err(SearchError::OutOfBounds { cell: cell(-1, 0) })
        );
        assert_eq!(
            s.find_path(cell(0, 0), cell(1, 1)),
            Err(SearchError::Blocked { cell: cell(1, 1) })
        );
        // Bounds are checked before occupancy.
        assert_eq!(
            s.find_path(cell(1, 1), cell(0, 9)),
            Err(SearchError::OutOfBounds { cell: cell(0, 9) })
        );
    }

    #[test]
    fn wall_means_no_path() {
        let grid: OccupancyGrid = "..#..\n..#..\n..#..".parse().unwrap();
        for connectivity in [Connectivity::Four, Connectivity::Eight] {
            let mut recorder = Recorder::default();
            let result = search(&grid, connectivity).find_path_observed(
                cell(1, 0),
                cell(1, 4),
                &mut recorder,
            );
            assert_eq!(result, Err(SearchError::NoPath));
            // Everything left of the wall was expanded exactly once.
            assert_eq!(recorder.expanded.len(), 6);
            assert_eq!(recorder.found, None);
        }
    }

    #[test]
    fn precheck_skips_expansion() {
        let grid: OccupancyGrid = "..#..\n..#..".parse().unwrap();
        let config = SearchConfig::new(Connectivity::Eight).with_component_precheck(true);
        let mut recorder = Recorder::default();
        let result =
            AstarSearch::new(&grid, config).find_path_observed(cell(0, 0), cell(0, 4), &mut recorder);
        assert_eq!(result, Err(SearchError::NoPath));
        assert!(recorder.expanded.is_empty());

        let reachable = AstarSearch::new(&grid, config).find_path(cell(0, 0), cell(1, 1));
        assert!(reachable.is_ok());
    }

    #[test]
    fn diagonal_gap_is_shorter() {
        // |S#.|
        // |.#.|
        // |..G| without the corner, 8-connectivity cuts each turn diagonally.
        let grid: OccupancyGrid = ".#.\n.#.\n...".parse().unwrap();
        let four = search(&grid, Connectivity::Four)
            .find_path(cell(0, 0), cell(0, 2))
            .unwrap();
        let eight = search(&grid, Connectivity::Eight)
            .find_path(cell(0, 0), cell(0, 2))
            .unwrap();
        assert_eq!(four.len(), 7);
        assert_eq!(eight.len(), 5);
        assert!(eight.cost() < four.cost());
    }

    /// Moving diagonally between two blocked cells is allowed under 8-connectivity.
    #[test]
    fn test_diagonal_switch_path() {
        // |.#|
        // |#.|
        let grid: OccupancyGrid = ".#\n#.".parse().unwrap();
        assert_eq!(
            search(&grid, Connectivity::Four).find_path(cell(0, 0), cell(1, 1)),
            Err(SearchError::NoPath)
        );
        let path = search(&grid, Connectivity::Eight)
            .find_path(cell(0, 0), cell(1, 1))
            .unwrap();
        assert_eq!(path.cells(), &[cell(0, 0), cell(1, 1)]);
    }

    #[test]
    fn expansion_limit_stops_search() {
        let grid = OccupancyGrid::new(20, 20, true);
        let config = SearchConfig::new(Connectivity::Four).with_max_expansions(3);
        let mut recorder = Recorder::default();
        let result = AstarSearch::new(&grid, config).find_path_observed(
            cell(0, 0),
            cell(19, 19),
            &mut recorder,
        );
        assert_eq!(result, Err(SearchError::ExpansionLimit { expanded: 3 }));
        assert_eq!(recorder.expanded.len(), 3);
    }

    /// Each iteration reports its own outcome: the start is expanded, then the goal ends it.
    #[test]
    fn step_reports_each_state() {
        let grid = OccupancyGrid::new(1, 2, true);
        let s = search(&grid, Connectivity::Four);
        let mut run = SearchRun {
            goal: cell(0, 1),
            frontier: Frontier::new(),
            closed: ClosedSet::new(1, 2),
            settled: CellTable::new(1, 2),
        };
        run.frontier.insert(cell(0, 0), CellRecord::start(cell(0, 0)));
        assert_eq!(s.step(&mut run, &mut NoopObserver), SearchState::Running);
        match s.step(&mut run, &mut NoopObserver) {
            SearchState::Succeeded(path) => assert_eq!(path.cells(), &[cell(0, 0), cell(0, 1)]),
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(
            s.step(&mut run, &mut NoopObserver),
            SearchState::Failed(SearchError::NoPath)
        );
    }

    /// A zero budget expands nothing, not even the start.
    #[test]
    fn zero_expansion_budget() {
        let grid = OccupancyGrid::new(3, 3, true);
        let config = SearchConfig::new(Connectivity::Eight).with_max_expansions(0);
        let mut recorder = Recorder::default();
        let result = AstarSearch::new(&grid, config).find_path_observed(
            cell(0, 0),
            cell(2, 2),
            &mut recorder,
        );
        assert_eq!(result, Err(SearchError::ExpansionLimit { expanded: 0 }));
        assert!(recorder.expanded.is_empty());
        assert_eq!(recorder.updates, 0);
    }

    /// A budget equal to the work actually needed still finds the path.
    #[test]
    fn exact_expansion_budget() {
        let grid = OccupancyGrid::new(1, 4, true);
        let config = SearchConfig::new(Connectivity::Four).with_max_expansions(3);
        let path = AstarSearch::new(&grid, config)
            .find_path(cell(0, 0), cell(0, 3))
            .unwrap();
        assert_eq!(path.expanded(), 3);
    }

    #[test]
    fn observer_sees_every_expansion() {
        let grid = OccupancyGrid::new(1, 4, true);
        let mut recorder = Recorder::default();
        let path = search(&grid, Connectivity::Four)
            .find_path_observed(cell(0, 0), cell(0, 3), &mut recorder)
            .unwrap();
        assert_eq!(recorder.expanded, vec![cell(0, 0), cell(0, 1), cell(0, 2)]);
        assert_eq!(recorder.updates, 3);
        assert_eq!(recorder.found, Some(4));
        assert_eq!(path.expanded(), 3);
    }

    #[test]
    fn repeated_searches_agree() {
        let grid: OccupancyGrid = "......\n.##.#.\n...#..\n.#....".parse().unwrap();
        let s = search(&grid, Connectivity::Eight);
        let first = s.find_path(cell(3, 0), cell(0, 5)).unwrap();
        for _ in 0..5 {
            assert_eq!(s.find_path(cell(3, 0), cell(0, 5)).unwrap(), first);
        }
    }
}
