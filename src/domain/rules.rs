use super::Cell;

/// What happens to one cell in the next generation
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transition {
    Unchanged,
    Birth,
    Death,
}

/// Threshold rules of the Life family.
///
/// A dead cell is born with exactly `birth` live neighbors. A live cell
/// survives while its neighbor count lies in
/// `under_population..=over_population`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rules {
    pub birth: u8,
    pub under_population: u8,
    pub over_population: u8,
}

impl Rules {
    /// Conway's Game of Life (B3/S23)
    pub const CONWAY: Rules = Rules::new(3, 2, 3);

    pub const fn new(birth: u8, under_population: u8, over_population: u8) -> Self {
        Self {
            birth,
            under_population,
            over_population,
        }
    }

    /// Pure function to compute the fate of a packed cell
    pub const fn evolve(&self, cell: Cell) -> Transition {
        let neighbors = cell.neighbors();
        if cell.is_alive() {
            if neighbors < self.under_population || neighbors > self.over_population {
                Transition::Death
            } else {
                Transition::Unchanged
            }
        } else if neighbors == self.birth {
            Transition::Birth
        } else {
            Transition::Unchanged
        }
    }

    /// Rule in B/S notation, e.g. "B3/S23"
    pub fn notation(&self) -> String {
        let survive: String = (self.under_population..=self.over_population)
            .map(|n| n.to_string())
            .collect();
        format!("B{}/S{}", self.birth, survive)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::CONWAY
    }
}
