//! Packed board with incrementally maintained neighbor counts.
//!
//! Every cell is a single byte (see [`Cell`]). Spawning or killing a cell
//! updates the counts of its eight neighbors immediately, so a generation step
//! never has to rescan the neighborhood of every cell.

use super::{BoardError, Cell};

/// The eight neighbor directions as (dx, dy)
#[rustfmt::skip]
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Resolve the offset to apply along one axis when stepping from `position`
/// in `direction` (-1, 0 or 1) on an axis of `size` cells.
///
/// With wrap enabled, stepping off the low edge yields `size - 1` and stepping
/// off the high edge yields `-(size - 1)`. Without wrap, a step that leaves
/// `[0, size)` has no neighbor and yields `None`.
pub fn resolve_neighbor_offset(
    position: usize,
    direction: isize,
    size: usize,
    wrap: bool,
) -> Option<isize> {
    debug_assert!(position < size);
    let last = size as isize - 1;

    if wrap {
        return Some(match direction {
            d if d < 0 && position == 0 => last,
            d if d > 0 && position as isize == last => -last,
            d => d,
        });
    }

    let target = position as isize + direction;
    (0..=last).contains(&target).then_some(direction)
}

/// Neighbor indices of one cell, at most eight
struct Neighbors {
    indices: [usize; 8],
    len: usize,
}

impl Neighbors {
    fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len]
    }
}

/// Flat row-major board of packed cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedBoard {
    width: usize,
    height: usize,
    wrap: bool,
    cells: Vec<Cell>,
}

impl PackedBoard {
    /// Create a board with every cell dead
    pub fn new(width: usize, height: usize, wrap: bool) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidSize { width, height });
        }

        Ok(Self {
            width,
            height,
            wrap,
            cells: vec![Cell::DEAD; width * height],
        })
    }

    /// Get board dimensions as (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn wrap(&self) -> bool {
        self.wrap
    }

    /// Packed cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells on the board
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    const fn position(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize, BoardError> {
        if x < self.width && y < self.height {
            Ok(self.index(x, y))
        } else {
            Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Packed cell at (x, y)
    pub fn cell(&self, x: usize, y: usize) -> Result<Cell, BoardError> {
        self.checked_index(x, y).map(|idx| self.cells[idx])
    }

    /// Alive flag of the cell at (x, y)
    pub fn cell_state(&self, x: usize, y: usize) -> Result<bool, BoardError> {
        self.cell(x, y).map(Cell::is_alive)
    }

    /// Bring the cell at (x, y) to life.
    ///
    /// Returns `Ok(false)` without touching any count when the cell is
    /// already alive, so repeated calls cannot corrupt neighbor counts.
    pub fn spawn_cell(&mut self, x: usize, y: usize) -> Result<bool, BoardError> {
        let idx = self.checked_index(x, y)?;
        Ok(self.spawn_at(idx))
    }

    /// Kill the cell at (x, y). Returns `Ok(false)` if it was already dead.
    pub fn kill_cell(&mut self, x: usize, y: usize) -> Result<bool, BoardError> {
        let idx = self.checked_index(x, y)?;
        Ok(self.kill_at(idx))
    }

    pub(crate) fn spawn_at(&mut self, idx: usize) -> bool {
        if self.cells[idx].is_alive() {
            return false;
        }
        self.cells[idx].set_alive();
        self.update_neighbors(idx, true);
        true
    }

    pub(crate) fn kill_at(&mut self, idx: usize) -> bool {
        if !self.cells[idx].is_alive() {
            return false;
        }
        self.cells[idx].set_dead();
        self.update_neighbors(idx, false);
        true
    }

    /// Collect the indices of the neighbors of the cell at `idx`, applying
    /// wrap substitution. A neighbor resolving to the cell itself is skipped.
    fn neighbors_of(&self, idx: usize) -> Neighbors {
        let (x, y) = self.position(idx);
        let mut neighbors = Neighbors { indices: [0; 8], len: 0 };

        for (dx, dy) in OFFSETS {
            let Some(ox) = resolve_neighbor_offset(x, dx, self.width, self.wrap) else {
                continue;
            };
            let Some(oy) = resolve_neighbor_offset(y, dy, self.height, self.wrap) else {
                continue;
            };
            let nx = (x as isize + ox) as usize;
            let ny = (y as isize + oy) as usize;
            let neighbor = self.index(nx, ny);
            if neighbor != idx {
                neighbors.indices[neighbors.len] = neighbor;
                neighbors.len += 1;
            }
        }

        neighbors
    }

    fn update_neighbors(&mut self, idx: usize, alive: bool) {
        let neighbors = self.neighbors_of(idx);
        for &n in neighbors.as_slice() {
            if alive {
                self.cells[n].add_neighbor();
            } else {
                self.cells[n].remove_neighbor();
            }
        }
    }

    /// Rebuild every neighbor count from the alive flags alone
    fn recompute_neighbors(&mut self) {
        self.cells
            .iter_mut()
            .for_each(|cell| *cell = cell.without_neighbors());

        for idx in 0..self.cells.len() {
            if self.cells[idx].is_alive() {
                self.update_neighbors(idx, true);
            }
        }
    }

    /// Change the board dimensions.
    ///
    /// Alive flags of cells present in both the old and new board are kept;
    /// neighbor counts are recomputed because moving an edge changes the
    /// neighbor sets of the cells along it.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), BoardError> {
        let mut resized = Self::new(width, height, self.wrap)?;

        for y in 0..self.height.min(height) {
            for x in 0..self.width.min(width) {
                if self.cells[self.index(x, y)].is_alive() {
                    let idx = resized.index(x, y);
                    resized.cells[idx].set_alive();
                }
            }
        }

        resized.recompute_neighbors();
        *self = resized;
        debug_assert!(self.audit().is_none());
        Ok(())
    }

    /// Switch edge wrapping on or off, recomputing all counts
    pub fn set_wrap(&mut self, wrap: bool) {
        if self.wrap != wrap {
            self.wrap = wrap;
            self.recompute_neighbors();
        }
    }

    /// Kill every cell and reset every count
    pub fn clear(&mut self) {
        self.cells.fill(Cell::DEAD);
    }

    /// Count alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over the positions of all alive cells in row-major order
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(idx, _)| self.position(idx))
    }

    /// Count alive neighbors of (x, y) by looking at them directly
    pub fn brute_force_neighbors(&self, x: usize, y: usize) -> u8 {
        let (w, h) = (self.width as isize, self.height as isize);

        OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let (nx, ny) = (x as isize + dx, y as isize + dy);
                if self.wrap {
                    Some((nx.rem_euclid(w), ny.rem_euclid(h)))
                } else {
                    ((0..w).contains(&nx) && (0..h).contains(&ny)).then_some((nx, ny))
                }
            })
            .filter(|&(nx, ny)| (nx as usize, ny as usize) != (x, y))
            .filter(|&(nx, ny)| self.cells[self.index(nx as usize, ny as usize)].is_alive())
            .count() as u8
    }

    /// Find the first cell whose stored neighbor count disagrees with a
    /// brute-force count. `None` means the board is consistent.
    pub fn audit(&self) -> Option<(usize, usize)> {
        (0..self.cells.len())
            .map(|idx| self.position(idx))
            .find(|&(x, y)| {
                self.cells[self.index(x, y)].neighbors() != self.brute_force_neighbors(x, y)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            PackedBoard::new(0, 5, false),
            Err(BoardError::InvalidSize { width: 0, height: 5 })
        );
        assert!(PackedBoard::new(5, 0, true).is_err());
    }

    #[test]
    fn test_new_board_is_dead() {
        let board = PackedBoard::new(7, 4, false).unwrap();
        assert_eq!(board.dimensions(), (7, 4));
        assert_eq!(board.area(), 28);
        assert!(board.cells().iter().all(|c| c.is_quiescent()));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut board = PackedBoard::new(3, 3, false).unwrap();
        let err = BoardError::OutOfBounds { x: 3, y: 0, width: 3, height: 3 };
        assert_eq!(board.cell_state(3, 0), Err(err.clone()));
        assert_eq!(board.spawn_cell(3, 0), Err(err.clone()));
        assert_eq!(board.kill_cell(3, 0), Err(err));
        assert!(board.cell_state(0, 3).is_err());
    }

    #[test]
    fn test_resolve_offset_without_wrap() {
        assert_eq!(resolve_neighbor_offset(0, -1, 5, false), None);
        assert_eq!(resolve_neighbor_offset(4, 1, 5, false), None);
        assert_eq!(resolve_neighbor_offset(2, -1, 5, false), Some(-1));
        assert_eq!(resolve_neighbor_offset(2, 1, 5, false), Some(1));
        assert_eq!(resolve_neighbor_offset(0, 0, 5, false), Some(0));
    }

    #[test]
    fn test_resolve_offset_with_wrap() {
        assert_eq!(resolve_neighbor_offset(0, -1, 5, true), Some(4));
        assert_eq!(resolve_neighbor_offset(4, 1, 5, true), Some(-4));
        assert_eq!(resolve_neighbor_offset(2, -1, 5, true), Some(-1));
        assert_eq!(resolve_neighbor_offset(0, 1, 5, true), Some(1));
        // Single-cell axis wraps onto itself
        assert_eq!(resolve_neighbor_offset(0, -1, 1, true), Some(0));
        assert_eq!(resolve_neighbor_offset(0, 1, 1, true), Some(0));
    }

    #[test]
    fn test_spawn_updates_neighbors() {
        let mut board = PackedBoard::new(5, 5, false).unwrap();
        assert!(board.spawn_cell(2, 2).unwrap());

        assert!(board.cell_state(2, 2).unwrap());
        assert_eq!(board.cell(2, 2).unwrap().neighbors(), 0);
        for (x, y) in [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)] {
            assert_eq!(board.cell(x, y).unwrap().neighbors(), 1, "at ({x},{y})");
        }
        assert_eq!(board.cell(0, 0).unwrap().neighbors(), 0);
    }

    #[test]
    fn test_spawn_is_idempotent() {
        let mut board = PackedBoard::new(5, 5, false).unwrap();
        assert!(board.spawn_cell(1, 1).unwrap());
        assert!(!board.spawn_cell(1, 1).unwrap());
        assert_eq!(board.cell(2, 2).unwrap().neighbors(), 1);
        assert_eq!(board.audit(), None);
    }

    #[test]
    fn test_kill_is_idempotent() {
        let mut board = PackedBoard::new(5, 5, false).unwrap();
        assert!(!board.kill_cell(1, 1).unwrap());
        board.spawn_cell(1, 1).unwrap();
        assert!(board.kill_cell(1, 1).unwrap());
        assert!(!board.kill_cell(1, 1).unwrap());
        assert!(board.cells().iter().all(|c| c.is_quiescent()));
    }

    #[test]
    fn test_wraparound_neighbor_only_with_wrap() {
        let mut wrapped = PackedBoard::new(6, 4, true).unwrap();
        wrapped.spawn_cell(0, 1).unwrap();
        assert_eq!(wrapped.cell(5, 1).unwrap().neighbors(), 1);
        assert_eq!(wrapped.cell(5, 0).unwrap().neighbors(), 1);
        assert_eq!(wrapped.cell(5, 2).unwrap().neighbors(), 1);

        let mut bounded = PackedBoard::new(6, 4, false).unwrap();
        bounded.spawn_cell(0, 1).unwrap();
        assert_eq!(bounded.cell(5, 1).unwrap().neighbors(), 0);
        assert_eq!(bounded.cell(5, 0).unwrap().neighbors(), 0);
    }

    #[test]
    fn test_corner_wraps_diagonally() {
        let mut board = PackedBoard::new(4, 4, true).unwrap();
        board.spawn_cell(0, 0).unwrap();
        assert_eq!(board.cell(3, 3).unwrap().neighbors(), 1);
        assert_eq!(board.audit(), None);
    }

    #[test]
    fn test_tiny_torus_skips_self() {
        let mut board = PackedBoard::new(1, 1, true).unwrap();
        board.spawn_cell(0, 0).unwrap();
        assert_eq!(board.cell(0, 0).unwrap().neighbors(), 0);

        let mut board = PackedBoard::new(2, 1, true).unwrap();
        board.spawn_cell(0, 0).unwrap();
        assert_eq!(board.audit(), None);
    }

    #[test]
    fn test_random_mutations_keep_counts_consistent() {
        let mut rng = StdRng::seed_from_u64(0x1CE);
        for &(w, h, wrap) in &[(1, 1, true), (2, 3, true), (9, 7, false), (9, 7, true), (16, 3, true)] {
            let mut board = PackedBoard::new(w, h, wrap).unwrap();
            for _ in 0..500 {
                let x = rng.random_range(0..w);
                let y = rng.random_range(0..h);
                if rng.random_bool(0.6) {
                    board.spawn_cell(x, y).unwrap();
                } else {
                    board.kill_cell(x, y).unwrap();
                }
                assert_eq!(board.audit(), None, "{w}x{h} wrap={wrap}");
            }
        }
    }

    #[test]
    fn test_resize_keeps_alive_and_recomputes() {
        let mut board = PackedBoard::new(6, 6, true).unwrap();
        board.spawn_cell(0, 0).unwrap();
        board.spawn_cell(3, 3).unwrap();
        board.spawn_cell(5, 5).unwrap();

        board.resize(4, 4).unwrap();
        assert_eq!(board.dimensions(), (4, 4));
        assert!(board.cell_state(0, 0).unwrap());
        assert!(board.cell_state(3, 3).unwrap());
        assert_eq!(board.population(), 2);
        // (0,0) and (3,3) are diagonal neighbors across the new wrapped edge
        assert_eq!(board.cell(0, 0).unwrap().neighbors(), 1);
        assert_eq!(board.audit(), None);
    }

    #[test]
    fn test_shrink_then_grow_loses_outside_cells() {
        let mut board = PackedBoard::new(8, 8, false).unwrap();
        let inside = [(1, 1), (2, 1), (3, 2)];
        let outside = [(6, 6), (7, 0)];
        for &(x, y) in inside.iter().chain(outside.iter()) {
            board.spawn_cell(x, y).unwrap();
        }

        board.resize(5, 5).unwrap();
        board.resize(8, 8).unwrap();

        for (x, y) in inside {
            assert!(board.cell_state(x, y).unwrap());
        }
        for (x, y) in outside {
            assert!(!board.cell_state(x, y).unwrap());
        }
        assert_eq!(board.population(), inside.len());
        assert_eq!(board.audit(), None);
    }

    #[test]
    fn test_resize_to_zero_rejected() {
        let mut board = PackedBoard::new(4, 4, false).unwrap();
        board.spawn_cell(1, 1).unwrap();
        assert!(board.resize(0, 4).is_err());
        assert_eq!(board.dimensions(), (4, 4));
        assert!(board.cell_state(1, 1).unwrap());
    }

    #[test]
    fn test_set_wrap_recomputes() {
        let mut board = PackedBoard::new(5, 5, false).unwrap();
        board.spawn_cell(0, 2).unwrap();
        assert_eq!(board.cell(4, 2).unwrap().neighbors(), 0);

        board.set_wrap(true);
        assert_eq!(board.cell(4, 2).unwrap().neighbors(), 1);
        assert_eq!(board.audit(), None);

        board.set_wrap(false);
        assert_eq!(board.cell(4, 2).unwrap().neighbors(), 0);
        assert_eq!(board.audit(), None);
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let mut board = PackedBoard::new(5, 5, true).unwrap();
        board.spawn_cell(2, 2).unwrap();
        board.spawn_cell(0, 4).unwrap();
        board.clear();
        assert_eq!(board.population(), 0);
        assert!(board.cells().iter().all(|c| c.raw() == 0));
    }

    #[test]
    fn test_alive_cells_row_major() {
        let mut board = PackedBoard::new(4, 3, false).unwrap();
        board.spawn_cell(3, 0).unwrap();
        board.spawn_cell(0, 2).unwrap();
        board.spawn_cell(1, 0).unwrap();
        let alive: Vec<_> = board.alive_cells().collect();
        assert_eq!(alive, vec![(1, 0), (3, 0), (0, 2)]);
    }
}
