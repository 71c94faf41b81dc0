/// Cell is one packed byte of the board.
///
/// Bit 0 is the alive flag, bits 1-7 hold the number of live neighbors.
/// The count is stored shifted left by one so that adding or removing a
/// neighbor never touches the alive flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(transparent)]
pub struct Cell(u8);

const ALIVE: u8 = 0x01;
const NEIGHBOR: u8 = 0x02;

/// Upper bound of the neighbor count field
pub const MAX_NEIGHBORS: u8 = 8;

impl Cell {
    /// Dead cell with no live neighbors
    pub const DEAD: Cell = Cell(0);

    /// Build a cell from its raw packed byte
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw packed byte
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        self.0 & ALIVE == ALIVE
    }

    /// Number of live neighbors recorded for this cell
    pub const fn neighbors(self) -> u8 {
        self.0 >> 1
    }

    /// Dead with no live neighbors: nothing can happen to it next generation
    pub const fn is_quiescent(self) -> bool {
        self.0 == 0
    }

    pub(crate) fn set_alive(&mut self) {
        self.0 |= ALIVE;
    }

    pub(crate) fn set_dead(&mut self) {
        self.0 &= !ALIVE;
    }

    pub(crate) fn add_neighbor(&mut self) {
        debug_assert!(self.neighbors() < MAX_NEIGHBORS, "neighbor count overflow");
        self.0 += NEIGHBOR;
    }

    pub(crate) fn remove_neighbor(&mut self) {
        debug_assert!(self.neighbors() > 0, "neighbor count underflow");
        self.0 -= NEIGHBOR;
    }

    /// Drop the neighbor count, keep the alive flag
    pub(crate) fn without_neighbors(self) -> Self {
        Self(self.0 & ALIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_cell_is_zero() {
        assert_eq!(Cell::DEAD.raw(), 0);
        assert!(!Cell::DEAD.is_alive());
        assert_eq!(Cell::DEAD.neighbors(), 0);
        assert!(Cell::DEAD.is_quiescent());
    }

    #[test]
    fn test_neighbor_updates_keep_alive_flag() {
        let mut cell = Cell::DEAD;
        cell.set_alive();
        for _ in 0..MAX_NEIGHBORS {
            cell.add_neighbor();
        }
        assert!(cell.is_alive());
        assert_eq!(cell.neighbors(), 8);
        assert_eq!(cell.raw(), 0b0001_0001);

        cell.remove_neighbor();
        assert!(cell.is_alive());
        assert_eq!(cell.neighbors(), 7);
    }

    #[test]
    fn test_alive_flag_keeps_neighbors() {
        let mut cell = Cell::from_raw(3 << 1);
        cell.set_alive();
        assert_eq!(cell.neighbors(), 3);
        cell.set_dead();
        assert_eq!(cell.neighbors(), 3);
        assert!(!cell.is_alive());
        assert!(!cell.is_quiescent());
    }

    #[test]
    fn test_without_neighbors() {
        let cell = Cell::from_raw((5 << 1) | 1);
        assert_eq!(cell.without_neighbors(), Cell::from_raw(1));
    }
}
