use grid_util::point::Point;
use thiserror::Error;

/// Every way a path request can fail, from malformed inputs to an exhausted frontier.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("cell ({}, {}) lies outside the grid", .cell.y, .cell.x)]
    OutOfBounds { cell: Point },

    #[error("cell ({}, {}) is not traversable", .cell.y, .cell.x)]
    Blocked { cell: Point },

    #[error("start and goal are the same cell")]
    TrivialRequest,

    #[error("no path exists between start and goal")]
    NoPath,

    #[error("search gave up after expanding {expanded} cells")]
    ExpansionLimit { expanded: usize },

    /// The parent chain starting at `cell` never reaches the start. This is a bug in the
    /// search, never a property of the input.
    #[error("parent chain from ({}, {}) does not reach the start", .cell.y, .cell.x)]
    CorruptParentChain { cell: Point },

    #[error("connectivity must be 4 or 8, got {0}")]
    InvalidConnectivity(u8),

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    InvalidMapChar { ch: char, row: usize, col: usize },
}

impl SearchError {
    /// True for failures caused by the request itself rather than by the search.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SearchError::OutOfBounds { .. }
                | SearchError::Blocked { .. }
                | SearchError::TrivialRequest
                | SearchError::InvalidConnectivity(_)
                | SearchError::RaggedGrid { .. }
                | SearchError::InvalidMapChar { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
