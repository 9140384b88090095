//! Single-line player name editor for the score submission prompt.

use arrayvec::ArrayString;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::MAX_NAME_LEN;

/// Byte capacity of the buffer; the character limit is [`MAX_NAME_LEN`].
const NAME_BUF_BYTES: usize = 128;

/// What a key did to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameEvent {
    Edited,
    Submit,
    Cancel,
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct NameInput {
    buf: ArrayString<NAME_BUF_BYTES>,
    chars: usize,
}

impl NameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill with a remembered name, truncated to the limit.
    pub fn with_value(value: &str) -> Self {
        let mut input = Self::new();
        for ch in value.chars() {
            if !input.push(ch) {
                break;
            }
        }
        input
    }

    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn len_chars(&self) -> usize {
        self.chars
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.chars = 0;
    }

    /// Append one character. Returns false when full or not printable.
    pub fn push(&mut self, ch: char) -> bool {
        if ch.is_control() || self.chars >= MAX_NAME_LEN {
            return false;
        }
        if self.buf.try_push(ch).is_err() {
            return false;
        }
        self.chars += 1;
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        let ch = self.buf.pop()?;
        self.chars -= 1;
        Some(ch)
    }

    /// Feed a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> NameEvent {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return NameEvent::Ignored;
        }
        match key.code {
            KeyCode::Enter => NameEvent::Submit,
            KeyCode::Esc => NameEvent::Cancel,
            KeyCode::Backspace => {
                if self.pop().is_some() {
                    NameEvent::Edited
                } else {
                    NameEvent::Ignored
                }
            }
            KeyCode::Char(ch) => {
                if self.push(ch) {
                    NameEvent::Edited
                } else {
                    NameEvent::Ignored
                }
            }
            _ => NameEvent::Ignored,
        }
    }
}
