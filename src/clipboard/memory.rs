//! In-process clipboard.

use std::sync::{Mutex, PoisonError};

use super::{ClipboardError, ClipboardPort};

/// A clipboard that lives in process memory.
///
/// Stands in for the system clipboard in tests.  Counts writes so tests can
/// assert that a failed job never touched the clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    inner: Mutex<Contents>,
}

#[derive(Debug, Default)]
struct Contents {
    text: String,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard pre-filled with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        let clipboard = Self::new();
        clipboard.lock().text = text.into();
        clipboard
    }

    /// Number of successful `set_text` calls so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Contents> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClipboardPort for MemoryClipboard {
    fn get_text(&self) -> Result<String, ClipboardError> {
        Ok(self.lock().text.clone())
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut contents = self.lock();
        contents.text = text.to_string();
        contents.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.get_text().unwrap(), "");
        assert_eq!(clipboard.write_count(), 0);
    }

    #[test]
    fn set_then_get() {
        let clipboard = MemoryClipboard::with_text("before");
        clipboard.set_text("after").unwrap();
        assert_eq!(clipboard.get_text().unwrap(), "after");
        assert_eq!(clipboard.write_count(), 1);
    }
}
