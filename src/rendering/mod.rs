use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::error;

use crate::application::{Canvas, GameState, Mode, Prompt};
use crate::domain::PackedBoard;
use crate::ui::{CELL_WIDTH, MENU_LINES, OPEN_LABEL, SAVE_LABEL, Theme};

/// Split row `y` into runs of equal cell state, left to right
fn row_runs(board: &PackedBoard, y: usize) -> Vec<(bool, usize)> {
    let (width, _) = board.dimensions();
    let row = &board.cells()[y * width..(y + 1) * width];

    let mut runs: Vec<(bool, usize)> = Vec::new();
    for cell in row {
        match runs.last_mut() {
            Some((alive, len)) if *alive == cell.is_alive() => *len += 1,
            _ => runs.push((cell.is_alive(), 1)),
        }
    }
    runs
}

/// Draws the session onto any writer with crossterm commands
pub struct TerminalCanvas<W: Write> {
    out: W,
    theme: Theme,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self { out, theme }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_board(&mut self, state: &GameState) -> io::Result<()> {
        let board = state.engine.board();
        let alive = self.theme.alive(state.is_running);
        let (_, height) = board.dimensions();

        for y in 0..height {
            queue!(self.out, MoveTo(0, y as u16))?;
            for (is_alive, len) in row_runs(board, y) {
                let color = if is_alive { alive } else { self.theme.dead };
                let blank = " ".repeat(len * CELL_WIDTH as usize);
                queue!(self.out, SetBackgroundColor(color), Print(blank))?;
            }
        }
        queue!(self.out, ResetColor)
    }

    /// Text in the info colors, skipped when wider than the screen
    fn draw_text(&mut self, x: usize, y: usize, text: &str, cols: usize) -> io::Result<()> {
        if x + text.chars().count() > cols {
            return Ok(());
        }
        queue!(
            self.out,
            MoveTo(x as u16, y as u16),
            SetForegroundColor(self.theme.info_fg),
            SetBackgroundColor(self.theme.info_bg),
            Print(text),
            ResetColor
        )
    }

    fn draw_info(&mut self, state: &GameState, cols: usize, rows: usize) -> io::Result<()> {
        if !state.hide_menu {
            for (y, line) in MENU_LINES.iter().enumerate() {
                self.draw_text(0, y, line, cols)?;
            }
        }

        let bottom = rows.saturating_sub(1);
        if !state.hide_all {
            let engine = &state.engine;
            let edges = if engine.wrap() { "wrap" } else { "bounded" };
            let info = format!(
                " {} {} | Generation: {} ",
                engine.rules().notation(),
                edges,
                engine.generation()
            );
            let x = cols.saturating_sub(info.chars().count());
            self.draw_text(x, bottom, &info, cols)?;
        }

        if let Some(status) = &state.status {
            self.draw_text(0, bottom, &format!(" {status} "), cols)?;
        }
        Ok(())
    }

    /// Boxed single-line field centered on screen
    fn draw_form(&mut self, prompt: Prompt, draft: &str, cols: usize, rows: usize) -> io::Result<()> {
        let label = match prompt {
            Prompt::Save => SAVE_LABEL,
            Prompt::Open => OPEN_LABEL,
        };
        let left = cols / 4;
        let size = 3 * (cols / 4) - left;
        let middle = rows / 2;
        if size < 2 || middle == 0 {
            return Ok(());
        }

        let border = "-".repeat(size);
        let mut field = format!("|{label}{draft}");
        let inner = field.chars().count();
        if inner < size - 1 {
            field.push_str(&" ".repeat(size - 1 - inner));
        }
        field.push('|');

        self.draw_text(left, middle - 1, &border, cols)?;
        // Drafts longer than the box are not drawn, like any overflowing text
        if field.chars().count() <= size {
            self.draw_text(left, middle, &field, cols)?;
        }
        self.draw_text(left, middle + 1, &border, cols)
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn present(&mut self, state: &GameState) -> io::Result<()> {
        let (width, height) = state.engine.dimensions();
        let cols = width * CELL_WIDTH as usize;

        queue!(self.out, Clear(ClearType::All))?;
        self.draw_board(state)?;
        self.draw_info(state, cols, height)?;
        if let Mode::PausedForInput { prompt, draft } = &state.mode {
            self.draw_form(*prompt, draft, cols, height)?;
        }
        self.out.flush()
    }
}

/// Puts the terminal in raw mode on the alternate screen with mouse capture.
/// Everything is restored on drop.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let restored = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen)
            .and_then(|()| terminal::disable_raw_mode());
        if let Err(err) = restored {
            error!(?err, "failed to restore the terminal");
        }
    }
}
