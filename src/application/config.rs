use std::path::PathBuf;
use std::time::Duration;

use crate::domain::Rules;
use crate::ui::Theme;

/// Directory scanned for presets at startup
pub const DEFAULT_PRESET_DIR: &str = "./presets/";

/// Generations per second while playing
pub const DEFAULT_TICK_RATE: u32 = 15;

/// Simulation settings chosen at launch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub rules: Rules,
    pub wrap: bool,
    pub tick_rate: u32,
    pub preset_dir: PathBuf,
    pub theme: Theme,
}

impl Config {
    /// Time between two generations while playing
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: Rules::CONWAY,
            wrap: false,
            tick_rate: DEFAULT_TICK_RATE,
            preset_dir: PathBuf::from(DEFAULT_PRESET_DIR),
            theme: Theme::default(),
        }
    }
}
