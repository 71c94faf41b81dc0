use rand::Rng;

use super::{BoardError, Cell, PackedBoard, Preset, Rules, Transition};

/// Engine owns the packed board and the rule thresholds and advances the
/// simulation one generation at a time.
#[derive(Clone, Debug)]
pub struct Engine {
    board: PackedBoard,
    rules: Rules,
    generation: u64,
    /// Previous generation, reused between steps
    snapshot: Vec<Cell>,
    /// Jump over dead cells without neighbors while stepping
    skip_quiescent: bool,
}

impl Engine {
    /// Create an engine with an empty board
    pub fn new(width: usize, height: usize, rules: Rules, wrap: bool) -> Result<Self, BoardError> {
        Ok(Self {
            board: PackedBoard::new(width, height, wrap)?,
            rules,
            generation: 0,
            snapshot: Vec::new(),
            skip_quiescent: true,
        })
    }

    pub fn board(&self) -> &PackedBoard {
        &self.board
    }

    pub const fn rules(&self) -> Rules {
        self.rules
    }

    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    /// Turn the quiescent-cell skip on or off. Results are identical either
    /// way; only the scan cost changes.
    pub fn set_skip_quiescent(&mut self, skip: bool) {
        self.skip_quiescent = skip;
    }

    /// Generations computed since the last clear
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        self.board.dimensions()
    }

    pub const fn wrap(&self) -> bool {
        self.board.wrap()
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.board.set_wrap(wrap);
    }

    pub fn cell_state(&self, x: usize, y: usize) -> Result<bool, BoardError> {
        self.board.cell_state(x, y)
    }

    pub fn spawn_cell(&mut self, x: usize, y: usize) -> Result<bool, BoardError> {
        self.board.spawn_cell(x, y)
    }

    pub fn kill_cell(&mut self, x: usize, y: usize) -> Result<bool, BoardError> {
        self.board.kill_cell(x, y)
    }

    /// Flip the cell at (x, y), returning its new state
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<bool, BoardError> {
        if self.board.cell_state(x, y)? {
            self.board.kill_cell(x, y)?;
            Ok(false)
        } else {
            self.board.spawn_cell(x, y)?;
            Ok(true)
        }
    }

    /// Advance exactly one generation.
    ///
    /// Decisions are read from a snapshot of the previous generation while
    /// births and deaths are applied to the live board, so count updates made
    /// during this step never influence another cell's decision.
    pub fn step(&mut self) {
        self.snapshot.clear();
        self.snapshot.extend_from_slice(self.board.cells());

        // A dead cell without neighbors only changes under a birth-on-zero rule
        let skip_quiescent = self.skip_quiescent && self.rules.birth != 0;
        let len = self.snapshot.len();
        let mut idx = 0;

        while idx < len {
            if skip_quiescent {
                while idx < len && self.snapshot[idx].is_quiescent() {
                    idx += 1;
                }
                if idx == len {
                    break;
                }
            }

            match self.rules.evolve(self.snapshot[idx]) {
                Transition::Birth => {
                    self.board.spawn_at(idx);
                }
                Transition::Death => {
                    self.board.kill_at(idx);
                }
                Transition::Unchanged => {}
            }
            idx += 1;
        }

        self.generation += 1;
    }

    /// Resize the board, keeping overlapping alive cells
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), BoardError> {
        self.board.resize(width, height)
    }

    /// Kill all cells and reset the generation counter
    pub fn clear_game(&mut self) {
        self.board.clear();
        self.generation = 0;
    }

    /// Clear, then bring each cell to life with probability `density`
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        self.clear_game();
        for idx in 0..self.board.area() {
            if rng.random_bool(density) {
                self.board.spawn_at(idx);
            }
        }
    }

    /// Capture the alive cells as a preset trimmed to their bounding box
    pub fn capture(&self, name: impl Into<String>) -> Preset {
        Preset::new(name, self.board.alive_cells().collect())
    }

    /// Clear the board and place `preset` so its center lands on the board
    /// center. Cells falling outside the board are skipped.
    ///
    /// Returns the number of cells placed.
    pub fn place_centered(&mut self, preset: &Preset) -> usize {
        self.clear_game();

        let (width, height) = self.board.dimensions();
        // Cells whose translation underflows or overflows can't be on the board
        let shift = |v: usize, board: usize, span: usize| {
            v.checked_add(board / 2)?.checked_sub(span / 2)
        };

        preset
            .cells
            .iter()
            .filter_map(|&(x, y)| Some((shift(x, width, preset.width)?, shift(y, height, preset.height)?)))
            .filter(|&(x, y)| matches!(self.board.spawn_cell(x, y), Ok(true)))
            .count()
    }
}
