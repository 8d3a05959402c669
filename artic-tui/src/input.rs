//! Key bindings and the bulk count field.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which control receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    BulkField,
}

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    CursorUp,
    CursorDown,
    ToggleRow,
    TogglePage,
    PrevPage,
    NextPage,
    Reload,
    FocusBulk,
    BulkInput(char),
    BulkBackspace,
    SubmitBulk,
    LeaveBulk,
    ClearAll,
    Quit,
}

/// Maps a key press to an intent for the focused control.
pub fn map_key(key: KeyEvent, focus: Focus) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }

    match focus {
        Focus::BulkField => match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Intent::BulkInput(c)),
            KeyCode::Backspace => Some(Intent::BulkBackspace),
            KeyCode::Enter => Some(Intent::SubmitBulk),
            KeyCode::Esc | KeyCode::Tab => Some(Intent::LeaveBulk),
            _ => None,
        },
        Focus::Table => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Intent::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Intent::CursorDown),
            KeyCode::Char(' ') => Some(Intent::ToggleRow),
            KeyCode::Char('a') => Some(Intent::TogglePage),
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => Some(Intent::PrevPage),
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => Some(Intent::NextPage),
            KeyCode::Char('g') => Some(Intent::Reload),
            KeyCode::Char('b') | KeyCode::Tab => Some(Intent::FocusBulk),
            KeyCode::Enter => Some(Intent::SubmitBulk),
            KeyCode::Char('c') => Some(Intent::ClearAll),
            KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
            _ => None,
        },
    }
}

/// Longest count the field accepts.
pub const MAX_BULK_DIGITS: usize = 6;

/// Reads the leading integer of `text`.
///
/// Surrounding whitespace is ignored and digits stop at the first other
/// character. No digits, a negative value, or an empty field all mean 0.
pub fn parse_bulk_count(text: &str) -> usize {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if negative || digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(usize::MAX)
}
