// Domain layer - board, rules and presets, no I/O
pub mod domain;

// Application layer - session state, preset storage, the async loop
pub mod application;

// Infrastructure layer - terminal input, rendering, layout
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Cell, Engine, PackedBoard, Preset, Rules, library};
pub use application::{Config, GameState, Intent, PresetStore};
