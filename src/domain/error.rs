use thiserror::Error;

/// Errors raised by board and engine operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    InvalidSize { width: usize, height: usize },
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}
