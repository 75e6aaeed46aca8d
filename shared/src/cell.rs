//! Maze cell coordinates and the grid/world mapping.
//!
//! This module centralizes the cell scheme so it's easy to reason about maze sizing
//! and to test correctness.
//!
//! # Model
//! - A [`Cell`] is an integer `(x, z)` pair inside a `width x length` grid.
//! - World units are one cell per unit; the grid is centred on the world origin.
//! - Y is up. Cells only address the XZ plane.
//!
//! # Mapping
//! A cell's centre in world space is shifted by half a cell:
//! - `wx = x + 0.5 - width / 2`
//! - `wz = z + 0.5 - length / 2`
//!
//! The inverse floors back to integer coordinates and rejects anything outside the grid.

/// Integer coordinates of one maze cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u32,
    pub z: u32,
}

impl Cell {
    #[inline]
    pub const fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }

    /// Move `distance` cells in `dir`, or `None` if that leaves a `width x length` grid.
    #[inline]
    pub fn offset(self, dir: Direction, distance: u32, width: u32, length: u32) -> Option<Cell> {
        let (dx, dz) = dir.delta();
        let x = self.x as i64 + dx * distance as i64;
        let z = self.z as i64 + dz * distance as i64;
        if x < 0 || z < 0 || x >= width as i64 || z >= length as i64 {
            return None;
        }
        Some(Cell::new(x as u32, z as u32))
    }

    /// True if `other` shares an edge with this cell.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z) == 1
    }
}

/// The four cardinal carving directions on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// -Z
    North,
    /// +Z
    South,
    /// -X
    West,
    /// +X
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit step `(dx, dz)` for this direction.
    #[inline]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }
}

/// World-space `(x, z)` of the centre of `cell` in a `width x length` grid.
#[inline]
pub fn cell_center_world(cell: Cell, width: u32, length: u32) -> (f32, f32) {
    (
        cell.x as f32 + 0.5 - width as f32 * 0.5,
        cell.z as f32 + 0.5 - length as f32 * 0.5,
    )
}

/// Cell containing the world-space point `(x, z)`, or `None` outside the grid.
///
/// This is the inverse of [`cell_center_world`] up to floor behavior.
#[inline]
pub fn world_to_cell(x: f32, z: f32, width: u32, length: u32) -> Option<Cell> {
    let gx = (x + width as f32 * 0.5).floor();
    let gz = (z + length as f32 * 0.5).floor();
    if !gx.is_finite() || !gz.is_finite() || gx < 0.0 || gz < 0.0 {
        return None;
    }
    if gx >= width as f32 || gz >= length as f32 {
        return None;
    }
    Some(Cell::new(gx as u32, gz as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_by_distance_and_respects_bounds() {
        let c = Cell::new(2, 1);
        assert_eq!(c.offset(Direction::South, 2, 5, 5), Some(Cell::new(2, 3)));
        assert_eq!(c.offset(Direction::East, 1, 5, 5), Some(Cell::new(3, 1)));
        assert_eq!(c.offset(Direction::North, 1, 5, 5), Some(Cell::new(2, 0)));

        // Two north from z = 1 leaves the grid.
        assert_eq!(c.offset(Direction::North, 2, 5, 5), None);
        // Two east from x = 2 lands on the last column, three does not.
        assert_eq!(c.offset(Direction::East, 2, 5, 5), Some(Cell::new(4, 1)));
        assert_eq!(c.offset(Direction::East, 3, 5, 5), None);
    }

    #[test]
    fn directions_are_distinct_unit_steps() {
        for (i, a) in Direction::ALL.iter().enumerate() {
            let (dx, dz) = a.delta();
            assert_eq!(dx.abs() + dz.abs(), 1);
            for b in &Direction::ALL[i + 1..] {
                assert_ne!(a.delta(), b.delta());
            }
        }
    }

    #[test]
    fn adjacency_is_edge_sharing_only() {
        let c = Cell::new(3, 3);
        assert!(c.is_adjacent(Cell::new(3, 4)));
        assert!(c.is_adjacent(Cell::new(2, 3)));
        assert!(!c.is_adjacent(Cell::new(4, 4)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn cell_centres_are_half_cell_shifted() {
        // 23 wide: the middle column (11) is centred on the origin.
        let (x, z) = cell_center_world(Cell::new(11, 11), 23, 23);
        assert!(x.abs() < 1.0e-6);
        assert!(z.abs() < 1.0e-6);

        let (x0, z0) = cell_center_world(Cell::new(0, 0), 23, 23);
        assert!((x0 + 11.0).abs() < 1.0e-6);
        assert!((z0 + 11.0).abs() < 1.0e-6);
    }

    #[test]
    fn world_to_cell_inverts_cell_center() {
        for &(x, z) in &[(0u32, 0u32), (4, 7), (22, 22), (11, 0)] {
            let cell = Cell::new(x, z);
            let (wx, wz) = cell_center_world(cell, 23, 23);
            assert_eq!(world_to_cell(wx, wz, 23, 23), Some(cell));
        }
    }

    #[test]
    fn world_to_cell_rejects_points_outside_grid() {
        assert_eq!(world_to_cell(-12.0, 0.0, 23, 23), None);
        assert_eq!(world_to_cell(0.0, 11.6, 23, 23), None);
        assert_eq!(world_to_cell(f32::NAN, 0.0, 23, 23), None);
    }
}
