/*!
Maze generation.

- grid:      the binary wall/open map, its counters, queries and text rendering
- generator: randomized backtracking carver over a two-cell lattice
*/

use std::fmt;

use crate::cell::Cell;

pub mod generator;
pub mod grid;

pub use generator::{CarveStats, MazeLayout, generate, generate_with_rng};
pub use grid::{CellState, Grid};

/// Configuration errors raised before carving starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// Either side is below the minimum the carver supports.
    TooSmall { width: u32, length: u32 },
    /// The entrance or gate lies outside the grid.
    OutOfBounds { cell: Cell, width: u32, length: u32 },
    /// The gate does not share an edge with the entrance.
    NotAdjacent { entrance: Cell, gate: Cell },
    /// Level settings failed validation.
    InvalidSettings(&'static str),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MazeError::TooSmall { width, length } => {
                write!(f, "maze {width}x{length} is too small to carve (minimum 3x3)")
            }
            MazeError::OutOfBounds {
                cell,
                width,
                length,
            } => write!(
                f,
                "cell ({}, {}) is outside the {width}x{length} maze",
                cell.x, cell.z
            ),
            MazeError::NotAdjacent { entrance, gate } => write!(
                f,
                "gate ({}, {}) is not next to entrance ({}, {})",
                gate.x, gate.z, entrance.x, entrance.z
            ),
            MazeError::InvalidSettings(reason) => write!(f, "invalid level settings: {reason}"),
        }
    }
}

impl std::error::Error for MazeError {}
