mod name_form;
mod theme;

pub use name_form::{MAX_NAME_LEN, NameForm};
pub use theme::Theme;

/// Terminal columns used to draw one cell, so cells look square
pub const CELL_WIDTH: u16 = 2;

/// Key help, one line each, hidden with `h`
pub const MENU_LINES: [&str; 2] = [
    " ENTER: next generation, SPC: play/pause, q/ESC/Ctrl-C: quit, h/H: hide menu/all info ",
    " LeftClick: toggle cell, RightClick: clear, p: save preset, o: open preset, c: cycle presets, r: random, w: wrap ",
];

pub const SAVE_LABEL: &str = " Preset name: ";
pub const OPEN_LABEL: &str = " Open preset: ";

/// Board dimensions fitting a terminal of `cols` x `rows`
pub fn board_size(cols: u16, rows: u16) -> (usize, usize) {
    ((cols / CELL_WIDTH) as usize, rows as usize)
}

/// Cell under the terminal position (column, row)
pub fn screen_to_cell(column: u16, row: u16) -> (usize, usize) {
    ((column / CELL_WIDTH) as usize, row as usize)
}
