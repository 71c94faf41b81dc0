use crossterm::style::Color;

/// Colors used by the terminal canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Alive cell background while the simulation plays
    pub alive_playing: Color,
    /// Alive cell background while paused, so editing mode is visible
    pub alive_paused: Color,
    pub dead: Color,
    pub info_fg: Color,
    pub info_bg: Color,
}

impl Theme {
    pub fn alive(&self, playing: bool) -> Color {
        if playing { self.alive_playing } else { self.alive_paused }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            alive_playing: Color::Yellow,
            alive_paused: Color::Blue,
            dead: Color::Reset,
            info_fg: Color::White,
            info_bg: Color::DarkGrey,
        }
    }
}
