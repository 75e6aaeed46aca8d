//! Randomized backtracking maze carver.
//!
//! The carver walks a two-cell stride lattice from a seed cell. At each cell it shuffles the
//! four directions once, then tries them in that order: if the cell two steps away is inside
//! the grid and still a wall, both the in-between cell and the far cell are dug and the walk
//! continues from the far cell. When all four directions are exhausted the walk backtracks.
//!
//! The walk is driven by an explicit stack of frames instead of recursion, so large mazes
//! cannot overflow the call stack. Each frame stores its shuffled directions and how many it
//! has tried, which reproduces the recursive visiting order exactly (including the order in
//! which random numbers are drawn).
//!
//! Cells whose lattice parity differs from the seed are never visited and stay walls. That
//! yields one-cell walls between one-cell corridors.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Grid, MazeError};
use crate::{
    cell::{Cell, Direction},
    constants::MIN_MAZE_SIDE,
};

/// Entrance and gate cells of a maze.
///
/// Both cells are dug before carving starts; carving is seeded from `entrance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeLayout {
    pub width: u32,
    pub length: u32,
    /// Carving seed, one cell inside the border.
    pub entrance: Cell,
    /// Edge-adjacent opening next to the entrance.
    pub gate: Cell,
}

impl MazeLayout {
    /// Entrance at `(width / 2, 1)` with the gate on the border at `(width / 2, 0)`.
    pub fn centered(width: u32, length: u32) -> Self {
        Self {
            width,
            length,
            entrance: Cell::new(width / 2, 1),
            gate: Cell::new(width / 2, 0),
        }
    }

    /// Check the layout can be carved.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.width < MIN_MAZE_SIDE || self.length < MIN_MAZE_SIDE {
            return Err(MazeError::TooSmall {
                width: self.width,
                length: self.length,
            });
        }
        for cell in [self.entrance, self.gate] {
            if cell.x >= self.width || cell.z >= self.length {
                return Err(MazeError::OutOfBounds {
                    cell,
                    width: self.width,
                    length: self.length,
                });
            }
        }
        if !self.entrance.is_adjacent(self.gate) {
            return Err(MazeError::NotAdjacent {
                entrance: self.entrance,
                gate: self.gate,
            });
        }
        Ok(())
    }
}

/// One pending cell on the carving stack.
struct Frame {
    cell: Cell,
    dirs: [Direction; 4],
    next: usize,
}

impl Frame {
    fn new<R: Rng + ?Sized>(cell: Cell, rng: &mut R) -> Self {
        let mut dirs = Direction::ALL;
        dirs.shuffle(rng);
        Self { cell, dirs, next: 0 }
    }
}

/// Carving statistics returned alongside the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarveStats {
    /// Number of two-cell dig operations performed by the walk.
    pub carves: usize,
    /// Deepest stack reached (the recursion depth of the equivalent recursive walk).
    pub max_depth: usize,
}

/// Generate a maze for `layout` using `rng` for the direction shuffles.
///
/// Identical layouts and identically seeded generators produce identical grids.
pub fn generate_with_rng<R: Rng + ?Sized>(
    layout: &MazeLayout,
    rng: &mut R,
) -> Result<(Grid, CarveStats), MazeError> {
    layout.validate()?;

    let mut grid = Grid::filled(layout.width, layout.length);
    grid.dig(layout.entrance);
    grid.dig(layout.gate);

    let stats = carve(&mut grid, layout.entrance, rng);

    log::debug!(
        "carved {}x{} maze: {} carves, depth {}, {} walls",
        layout.width,
        layout.length,
        stats.carves,
        stats.max_depth,
        grid.wall_count()
    );

    Ok((grid, stats))
}

/// Generate a maze with the thread-local RNG.
pub fn generate(width: u32, length: u32, entrance: Cell, gate: Cell) -> Result<Grid, MazeError> {
    let layout = MazeLayout {
        width,
        length,
        entrance,
        gate,
    };
    generate_with_rng(&layout, &mut rand::thread_rng()).map(|(grid, _)| grid)
}

/// Backtracking walk from `seed` over `grid`, digging in place.
fn carve<R: Rng + ?Sized>(grid: &mut Grid, seed: Cell, rng: &mut R) -> CarveStats {
    let (width, length) = (grid.width(), grid.length());
    let mut stats = CarveStats::default();
    let mut stack = vec![Frame::new(seed, rng)];

    while let Some(top) = stack.last_mut() {
        if top.next == top.dirs.len() {
            stack.pop();
            continue;
        }
        let dir = top.dirs[top.next];
        top.next += 1;
        let cell = top.cell;

        let Some(far) = cell.offset(dir, 2, width, length) else {
            continue;
        };
        if grid.is_open(far) {
            continue;
        }
        // `far` is in bounds, so the cell between is as well.
        let Some(near) = cell.offset(dir, 1, width, length) else {
            continue;
        };

        grid.dig(near);
        grid.dig(far);
        stats.carves += 1;

        stack.push(Frame::new(far, rng));
        stats.max_depth = stats.max_depth.max(stack.len());
    }

    stats
}
