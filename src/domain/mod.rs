mod board;
mod cell;
mod engine;
mod error;
mod rules;
pub mod preset;

pub use board::{PackedBoard, resolve_neighbor_offset};
pub use cell::{Cell, MAX_NEIGHBORS};
pub use engine::Engine;
pub use error::BoardError;
pub use preset::{Preset, library};
pub use rules::{Rules, Transition};
