//! Clipboard access for the trigger path and translation jobs.
//!
//! [`ClipboardPort`] is the seam the orchestrator talks to.  Callers treat
//! every failure as non-fatal: a failed read becomes empty text and a failed
//! write is logged and ignored.
//!
//! * [`SystemClipboard`]: OS clipboard via `arboard`.
//! * [`MemoryClipboard`]: in-process clipboard for tests.

pub mod memory;
pub mod system;

pub use memory::MemoryClipboard;
pub use system::SystemClipboard;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ClipboardError
// ---------------------------------------------------------------------------

/// Errors raised by a [`ClipboardPort`] implementation.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Could not open the system clipboard.
    #[error("cannot access clipboard: {0}")]
    Access(String),

    /// The clipboard is empty or holds non-text data.
    #[error("clipboard holds no text: {0}")]
    Read(String),

    /// Could not write text to the clipboard.
    #[error("cannot set clipboard text: {0}")]
    Write(String),
}

// ---------------------------------------------------------------------------
// ClipboardPort
// ---------------------------------------------------------------------------

/// Read/write access to plain-text clipboard content.
///
/// Implementations must be `Send + Sync`: the trigger thread reads through
/// the same `Arc<dyn ClipboardPort>` that job tasks write through.  Calls may
/// interleave freely; the last writer wins.
pub trait ClipboardPort: Send + Sync {
    /// Current clipboard text.
    fn get_text(&self) -> Result<String, ClipboardError>;

    /// Replace the clipboard content with `text`.
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Read the clipboard, degrading any failure to an empty string.
pub fn read_or_empty(clipboard: &dyn ClipboardPort) -> String {
    match clipboard.get_text() {
        Ok(text) => text,
        Err(e) => {
            log::warn!("clipboard: read failed, treating as empty: {e}");
            String::new()
        }
    }
}

/// Write `text` to the clipboard, logging and discarding any failure.
pub fn write_or_log(clipboard: &dyn ClipboardPort, text: &str) {
    if let Err(e) = clipboard.set_text(text) {
        log::warn!("clipboard: write failed (len={}): {e}", text.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenClipboard;

    impl ClipboardPort for BrokenClipboard {
        fn get_text(&self) -> Result<String, ClipboardError> {
            Err(ClipboardError::Access("no display".into()))
        }

        fn set_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Write("locked".into()))
        }
    }

    #[test]
    fn read_failure_degrades_to_empty() {
        assert_eq!(read_or_empty(&BrokenClipboard), "");
    }

    #[test]
    fn write_failure_is_swallowed() {
        write_or_log(&BrokenClipboard, "hello");
    }

    #[test]
    fn port_is_object_safe() {
        let _: Box<dyn ClipboardPort> = Box::new(MemoryClipboard::new());
    }
}
