use std::time::{SystemTime, UNIX_EPOCH};

use crate::application::{Intent, Prompt};

/// Longest preset name the form accepts
pub const MAX_NAME_LEN: usize = 64;

/// Modal text field collecting a preset name.
///
/// Every edit yields an [`Intent::EditName`] carrying the full draft so the
/// session can render it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameForm {
    prompt: Prompt,
    text: String,
}

impl NameForm {
    pub fn new(prompt: Prompt) -> Self {
        Self { prompt, text: String::new() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append a character. Control characters and overflow are dropped.
    pub fn push(&mut self, c: char) -> Option<Intent> {
        if c.is_control() || self.text.chars().count() >= MAX_NAME_LEN {
            return None;
        }
        self.text.push(c);
        Some(Intent::EditName(self.text.clone()))
    }

    pub fn backspace(&mut self) -> Option<Intent> {
        self.text.pop()?;
        Some(Intent::EditName(self.text.clone()))
    }

    /// Close the form with the entered name.
    ///
    /// A blank save name falls back to a timestamped one; a blank open
    /// cancels.
    pub fn confirm(self) -> Intent {
        let name = self.text.trim();
        match self.prompt {
            Prompt::Save if name.is_empty() => Intent::SavePreset(default_name()),
            Prompt::Save => Intent::SavePreset(name.to_string()),
            Prompt::Open if name.is_empty() => Intent::CancelInput,
            Prompt::Open => Intent::OpenPreset(name.to_string()),
        }
    }
}

fn default_name() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("preset-{secs}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_carry_full_draft() {
        let mut form = NameForm::new(Prompt::Save);
        assert_eq!(form.push('a'), Some(Intent::EditName("a".into())));
        assert_eq!(form.push('b'), Some(Intent::EditName("ab".into())));
        assert_eq!(form.backspace(), Some(Intent::EditName("a".into())));
        assert_eq!(form.push('\t'), None);
        assert_eq!(form.text(), "a");
    }

    #[test]
    fn test_backspace_on_empty() {
        let mut form = NameForm::new(Prompt::Open);
        assert_eq!(form.backspace(), None);
    }

    #[test]
    fn test_length_limit() {
        let mut form = NameForm::new(Prompt::Save);
        for _ in 0..MAX_NAME_LEN {
            assert!(form.push('x').is_some());
        }
        assert_eq!(form.push('x'), None);
    }

    #[test]
    fn test_confirm_trims() {
        let mut form = NameForm::new(Prompt::Open);
        for c in " glider ".chars() {
            form.push(c);
        }
        assert_eq!(form.confirm(), Intent::OpenPreset("glider".into()));
    }

    #[test]
    fn test_blank_names() {
        let Intent::SavePreset(name) = NameForm::new(Prompt::Save).confirm() else {
            panic!("expected a save intent");
        };
        assert!(name.starts_with("preset-"));
        assert_eq!(NameForm::new(Prompt::Open).confirm(), Intent::CancelInput);
    }
}
