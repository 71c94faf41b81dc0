mod config;
mod game_state;
mod intent;
pub(crate) mod preset_store;
pub mod session;

pub use config::{Config, DEFAULT_PRESET_DIR, DEFAULT_TICK_RATE};
pub use game_state::{GameState, Mode, Outcome};
pub use intent::{Intent, Prompt};
pub use preset_store::{PresetError, PresetStore};
pub use session::Canvas;
