//! OS clipboard backed by the `arboard` crate.
//!
//! Every call opens a short-lived [`arboard::Clipboard`] handle rather than
//! sharing one, because `arboard::Clipboard` is not `Send` on all platforms
//! and the handle is cheap to create.

use arboard::Clipboard;

use super::{ClipboardError, ClipboardPort};

/// The system clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardPort for SystemClipboard {
    fn get_text(&self) -> Result<String, ClipboardError> {
        let mut clipboard = open_clipboard()?;
        clipboard
            .get_text()
            .map_err(|e| ClipboardError::Read(e.to_string()))
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = open_clipboard()?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

fn open_clipboard() -> Result<Clipboard, ClipboardError> {
    Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))
}
