use tracing::{debug, warn};

use super::{Intent, PresetError, PresetStore, Prompt};
use crate::domain::{Engine, Preset};

/// Share of cells brought to life by a randomize
const RANDOM_DENSITY: f64 = 0.3;

/// Session state machine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Normal play, paused or not
    Running,
    /// Composing a preset name; board mutations are rejected
    PausedForInput { prompt: Prompt, draft: String },
    /// Terminal state
    Quit,
}

/// Result of applying one intent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected,
    Quit,
}

/// GameState orchestrates the simulation.
/// It is owned by a single task; every mutation goes through [`GameState::apply`]
/// or [`GameState::tick`].
#[derive(Debug)]
pub struct GameState {
    pub engine: Engine,
    pub presets: PresetStore,
    pub mode: Mode,
    pub is_running: bool,
    pub hide_menu: bool,
    pub hide_all: bool,
    /// Last recoverable error, shown until the next intent
    pub status: Option<String>,
    /// Resize received while the name form was open
    pending_resize: Option<(usize, usize)>,
}

impl GameState {
    pub fn new(engine: Engine, presets: PresetStore) -> Self {
        Self {
            engine,
            presets,
            mode: Mode::Running,
            is_running: false,
            hide_menu: false,
            hide_all: false,
            status: None,
            pending_resize: None,
        }
    }

    /// Advance one generation if playing. Returns whether a step happened.
    pub fn tick(&mut self) -> bool {
        if self.mode != Mode::Running || !self.is_running {
            return false;
        }
        self.engine.step();
        true
    }

    /// Apply one intent between generations
    pub fn apply(&mut self, intent: Intent) -> Outcome {
        if intent == Intent::Quit {
            self.mode = Mode::Quit;
            self.is_running = false;
            return Outcome::Quit;
        }

        let outcome = match self.mode {
            Mode::Quit => Outcome::Rejected,
            Mode::Running => self.apply_running(intent),
            Mode::PausedForInput { prompt, .. } => self.apply_input(prompt, intent),
        };

        if outcome == Outcome::Rejected {
            debug!(mode = ?self.mode, "intent rejected");
        }
        outcome
    }

    fn apply_running(&mut self, intent: Intent) -> Outcome {
        self.status = None;

        match intent {
            Intent::TogglePlay => self.is_running = !self.is_running,
            Intent::Step if !self.is_running => self.engine.step(),
            Intent::ToggleCell { x, y } if !self.is_running => {
                if let Err(err) = self.engine.toggle_cell(x, y) {
                    return self.fail(err.to_string());
                }
            }
            Intent::Clear => self.engine.clear_game(),
            Intent::Randomize => {
                self.engine.randomize(&mut rand::rng(), RANDOM_DENSITY);
                self.is_running = false;
            }
            Intent::ToggleWrap => {
                let wrap = !self.engine.wrap();
                self.engine.set_wrap(wrap);
            }
            Intent::Resize { width, height } => return self.resize(width, height),
            Intent::BeginInput(prompt) => {
                self.is_running = false;
                self.mode = Mode::PausedForInput { prompt, draft: String::new() };
            }
            Intent::SavePreset(name) => {
                let saved = self.save_board(&name).map(|_| ());
                return self.report(saved);
            }
            Intent::OpenPreset(name) => {
                let opened = self.open_preset(&name).map(|_| ());
                return self.report(opened);
            }
            Intent::CyclePreset => {
                let cycled = self.cycle_presets().map(|_| ());
                return self.report(cycled);
            }
            Intent::ToggleMenu => {
                self.hide_menu = !self.hide_menu;
                if !self.hide_menu {
                    self.hide_all = false;
                }
            }
            Intent::ToggleAllInfo => {
                self.hide_all = !self.hide_all;
                if self.hide_all {
                    self.hide_menu = true;
                }
            }
            Intent::Step
            | Intent::ToggleCell { .. }
            | Intent::EditName(_)
            | Intent::CancelInput
            | Intent::Quit => return Outcome::Rejected,
        }
        Outcome::Applied
    }

    fn apply_input(&mut self, prompt: Prompt, intent: Intent) -> Outcome {
        match (prompt, intent) {
            (_, Intent::EditName(text)) => {
                self.mode = Mode::PausedForInput { prompt, draft: text };
                Outcome::Applied
            }
            (_, Intent::Resize { width, height }) => {
                self.pending_resize = Some((width, height));
                Outcome::Applied
            }
            (_, Intent::CancelInput) => {
                self.leave_input();
                Outcome::Applied
            }
            (Prompt::Save, Intent::SavePreset(name)) => {
                self.leave_input();
                let saved = self.save_board(&name).map(|_| ());
                self.report(saved)
            }
            (Prompt::Open, Intent::OpenPreset(name)) => {
                self.leave_input();
                let opened = self.open_preset(&name).map(|_| ());
                self.report(opened)
            }
            _ => Outcome::Rejected,
        }
    }

    fn leave_input(&mut self) {
        self.mode = Mode::Running;
        self.status = None;
        if let Some((width, height)) = self.pending_resize.take() {
            self.resize(width, height);
        }
    }

    fn resize(&mut self, width: usize, height: usize) -> Outcome {
        match self.engine.resize(width, height) {
            Ok(()) => Outcome::Applied,
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn report(&mut self, result: Result<(), PresetError>) -> Outcome {
        match result {
            Ok(()) => Outcome::Applied,
            Err(err) => {
                warn!(%err, "preset action failed");
                self.fail(err.to_string())
            }
        }
    }

    fn fail(&mut self, message: String) -> Outcome {
        self.status = Some(message);
        Outcome::Rejected
    }

    /// Save the alive cells of the board as a preset trimmed to their
    /// bounding box
    pub fn save_board(&mut self, name: &str) -> Result<&Preset, PresetError> {
        let captured = self.engine.capture(name);
        self.presets
            .create_preset(name, captured.cells, captured.width, captured.height)
    }

    /// Clear the board and place the named preset at its center.
    /// Returns the number of cells placed.
    pub fn open_preset(&mut self, name: &str) -> Result<usize, PresetError> {
        let preset = self.presets.get_preset(name)?;
        Ok(self.engine.place_centered(preset))
    }

    /// Open the next preset of the catalog, returning its name
    pub fn cycle_presets(&mut self) -> Result<String, PresetError> {
        let preset = self.presets.cycle_presets()?;
        self.engine.place_centered(preset);
        Ok(preset.name.clone())
    }
}
