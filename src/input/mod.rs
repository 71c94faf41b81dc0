use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::application::{Intent, Prompt};
use crate::ui::{self, NameForm};

/// How long a poll waits before checking whether the session is gone
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Turns terminal events into intents.
///
/// Owns the preset-name form while it is open, so keystrokes go to the form
/// instead of the board.
#[derive(Debug, Default)]
pub struct InputDecoder {
    form: Option<NameForm>,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one event, returning the intent it maps to if any
    pub fn decode(&mut self, event: Event) -> Option<Intent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.decode_key(key),
            Event::Mouse(mouse) if self.form.is_none() => decode_mouse(mouse),
            Event::Resize(cols, rows) => {
                let (width, height) = ui::board_size(cols, rows);
                Some(Intent::Resize { width, height })
            }
            _ => None,
        }
    }

    fn decode_key(&mut self, key: KeyEvent) -> Option<Intent> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Intent::Quit);
        }

        if let Some(form) = self.form.as_mut() {
            return match key.code {
                KeyCode::Enter => self.form.take().map(NameForm::confirm),
                KeyCode::Esc => {
                    self.form = None;
                    Some(Intent::CancelInput)
                }
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) => form.push(c),
                _ => None,
            };
        }

        let intent = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Intent::Quit,
            KeyCode::Char(' ') => Intent::TogglePlay,
            KeyCode::Enter => Intent::Step,
            KeyCode::Char('h') => Intent::ToggleMenu,
            KeyCode::Char('H') => Intent::ToggleAllInfo,
            KeyCode::Char('c') => Intent::CyclePreset,
            KeyCode::Char('r') => Intent::Randomize,
            KeyCode::Char('w') => Intent::ToggleWrap,
            KeyCode::Char('p') => self.open_form(Prompt::Save),
            KeyCode::Char('o') => self.open_form(Prompt::Open),
            _ => return None,
        };
        Some(intent)
    }

    fn open_form(&mut self, prompt: Prompt) -> Intent {
        self.form = Some(NameForm::new(prompt));
        Intent::BeginInput(prompt)
    }
}

fn decode_mouse(mouse: MouseEvent) -> Option<Intent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let (x, y) = ui::screen_to_cell(mouse.column, mouse.row);
            Some(Intent::ToggleCell { x, y })
        }
        MouseEventKind::Down(MouseButton::Right) => Some(Intent::Clear),
        _ => None,
    }
}

/// Blocking loop that polls the terminal and forwards intents.
///
/// Ends after forwarding a quit, or once the session drops its receiver.
pub fn run_input_loop(mut decoder: InputDecoder, intents: UnboundedSender<Intent>) -> io::Result<()> {
    while !intents.is_closed() {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Some(intent) = decoder.decode(event::read()?) else {
            continue;
        };

        let quit = intent == Intent::Quit;
        if intents.send(intent).is_err() || quit {
            break;
        }
    }
    debug!("input loop finished");
    Ok(())
}
