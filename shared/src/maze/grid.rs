use std::collections::VecDeque;
use std::fmt;

use crate::cell::{Cell, Direction};

/// State of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Wall,
    Open,
}

/// A `width x length` binary map of walls and open cells.
///
/// Storage is row-major along Z: index = `z * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    length: u32,
    cells: Vec<CellState>,
    /// Remaining walls, maintained by [`Grid::dig`].
    walls: usize,
}

impl Grid {
    /// A grid where every cell is a wall.
    pub fn filled(width: u32, length: u32) -> Self {
        let n = width as usize * length as usize;
        Self {
            width,
            length,
            cells: vec![CellState::Wall; n],
            walls: n,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Remaining wall counter.
    ///
    /// Starts at `width * length` and drops by one per cell dug, so it always equals the
    /// number of [`CellState::Wall`] cells.
    #[inline]
    pub fn wall_count(&self) -> usize {
        self.walls
    }

    #[inline]
    pub fn open_count(&self) -> usize {
        self.cells.len() - self.walls
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.z < self.length
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        cell.z as usize * self.width as usize + cell.x as usize
    }

    /// State of `cell`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<CellState> {
        if self.contains(cell) {
            Some(self.cells[self.index(cell)])
        } else {
            None
        }
    }

    /// Tri-state wall lookup: `Some(true)` wall, `Some(false)` open, `None` out of bounds.
    #[inline]
    pub fn is_wall_at(&self, x: u32, z: u32) -> Option<bool> {
        self.get(Cell::new(x, z)).map(|s| s == CellState::Wall)
    }

    #[inline]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.get(cell) == Some(CellState::Open)
    }

    /// Mark `cell` open. Digging an open cell is a no-op.
    ///
    /// Panics if `cell` is outside the grid; callers bounds-check first.
    pub fn dig(&mut self, cell: Cell) {
        let i = self.index(cell);
        if self.cells[i] == CellState::Wall {
            self.cells[i] = CellState::Open;
            self.walls -= 1;
        }
    }

    /// Iterate `(x, z, is_wall)` for every cell, X fastest.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, bool)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, state)| {
            let x = (i % width as usize) as u32;
            let z = (i / width as usize) as u32;
            (x, z, *state == CellState::Wall)
        })
    }

    /// Iterate the wall cells only.
    pub fn wall_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells()
            .filter(|&(_, _, wall)| wall)
            .map(|(x, z, _)| Cell::new(x, z))
    }

    /// Open 4-neighbours of `cell`.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            cell.offset(dir, 1, self.width, self.length)
                .filter(|&n| self.is_open(n))
        })
    }

    /// Breadth-first shortest path over open cells, both ends included.
    ///
    /// Returns `None` if either end is a wall or no path exists.
    pub fn shortest_path(&self, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        if !self.is_open(from) || !self.is_open(to) {
            return None;
        }

        let mut parent: Vec<Option<Cell>> = vec![None; self.cells.len()];
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();

        seen[self.index(from)] = true;
        queue.push_back(from);

        while let Some(cell) = queue.pop_front() {
            if cell == to {
                let mut path = vec![to];
                let mut cur = to;
                while let Some(p) = parent[self.index(cur)] {
                    path.push(p);
                    cur = p;
                }
                path.reverse();
                return Some(path);
            }
            for n in self.open_neighbors(cell) {
                let i = self.index(n);
                if !seen[i] {
                    seen[i] = true;
                    parent[i] = Some(cell);
                    queue.push_back(n);
                }
            }
        }

        None
    }

    /// Number of open cells reachable from `start` through open cells.
    pub fn reachable_count(&self, start: Cell) -> usize {
        if !self.is_open(start) {
            return 0;
        }
        let mut seen = vec![false; self.cells.len()];
        let mut stack = vec![start];
        seen[self.index(start)] = true;
        let mut count = 0;
        while let Some(cell) = stack.pop() {
            count += 1;
            for n in self.open_neighbors(cell) {
                let i = self.index(n);
                if !seen[i] {
                    seen[i] = true;
                    stack.push(n);
                }
            }
        }
        count
    }

    /// Number of undirected edges between 4-adjacent open cells.
    pub fn open_edge_count(&self) -> usize {
        let mut edges = 0;
        for (x, z, wall) in self.cells() {
            if wall {
                continue;
            }
            let cell = Cell::new(x, z);
            for dir in [Direction::East, Direction::South] {
                if let Some(n) = cell.offset(dir, 1, self.width, self.length) {
                    if self.is_open(n) {
                        edges += 1;
                    }
                }
            }
        }
        edges
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for z in 0..self.length {
            if z > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                let cell = Cell::new(x, z);
                f.write_str(if self.is_open(cell) { "  " } else { "██" })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_grid_is_all_walls() {
        let g = Grid::filled(4, 3);
        assert_eq!(g.wall_count(), 12);
        assert_eq!(g.open_count(), 0);
        assert!(g.cells().all(|(_, _, wall)| wall));
    }

    #[test]
    fn dig_keeps_wall_counter_in_sync() {
        let mut g = Grid::filled(5, 5);
        g.dig(Cell::new(1, 1));
        g.dig(Cell::new(1, 1));
        g.dig(Cell::new(2, 1));
        assert_eq!(g.wall_count(), 23);
        assert_eq!(g.cells().filter(|&(_, _, w)| w).count(), g.wall_count());
    }

    #[test]
    fn tri_state_lookup() {
        let mut g = Grid::filled(3, 3);
        g.dig(Cell::new(1, 1));
        assert_eq!(g.is_wall_at(1, 1), Some(false));
        assert_eq!(g.is_wall_at(0, 1), Some(true));
        assert_eq!(g.is_wall_at(3, 1), None);
        assert_eq!(g.is_wall_at(1, 3), None);
    }

    #[test]
    fn cells_iterates_x_fastest() {
        let g = Grid::filled(3, 2);
        let coords: Vec<(u32, u32)> = g.cells().map(|(x, z, _)| (x, z)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn shortest_path_follows_corridor() {
        // An L-shaped corridor.
        let mut g = Grid::filled(4, 4);
        for c in [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)] {
            g.dig(Cell::new(c.0, c.1));
        }
        let path = g.shortest_path(Cell::new(0, 0), Cell::new(2, 2)).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&Cell::new(0, 0)));
        assert_eq!(path.last(), Some(&Cell::new(2, 2)));
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]));
        }

        assert_eq!(g.shortest_path(Cell::new(0, 0), Cell::new(3, 3)), None);
    }

    #[test]
    fn display_draws_two_chars_per_cell() {
        let mut g = Grid::filled(3, 2);
        g.dig(Cell::new(1, 0));
        assert_eq!(g.to_string(), "██  ██\n██████");
    }

    #[test]
    fn edge_count_counts_each_pair_once() {
        let mut g = Grid::filled(3, 3);
        for x in 0..3 {
            for z in 0..2 {
                g.dig(Cell::new(x, z));
            }
        }
        // 2x3 block: 2 rows of 2 horizontal edges + 3 vertical edges.
        assert_eq!(g.open_edge_count(), 7);
        assert_eq!(g.reachable_count(Cell::new(0, 0)), 6);
    }
}
