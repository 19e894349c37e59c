//! Double-press detection.
//!
//! A fire needs exactly two triggers less than `window` apart.  The fire
//! consumes the window, so a third quick trigger opens a new one instead of
//! firing again.  The clipboard is read only on the decisive second trigger.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clipboard::{read_or_empty, ClipboardPort};

/// Default double-press window.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

/// Outcome of one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireDecision {
    pub fire: bool,
    /// Trimmed clipboard text; `Some` exactly when `fire` is true.
    pub clipboard_text: Option<String>,
}

impl FireDecision {
    fn hold() -> Self {
        Self {
            fire: false,
            clipboard_text: None,
        }
    }

    fn fire(text: String) -> Self {
        Self {
            fire: true,
            clipboard_text: Some(text),
        }
    }
}

pub struct TriggerDebouncer {
    window: Duration,
    last_trigger: Option<Instant>,
    clipboard: Arc<dyn ClipboardPort>,
}

impl TriggerDebouncer {
    pub fn new(clipboard: Arc<dyn ClipboardPort>, window: Duration) -> Self {
        Self {
            window,
            last_trigger: None,
            clipboard,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn on_trigger(&mut self, now: Instant) -> FireDecision {
        let second_press = self
            .last_trigger
            .is_some_and(|last| now.saturating_duration_since(last) < self.window);

        if !second_press {
            self.last_trigger = Some(now);
            return FireDecision::hold();
        }

        let text = read_or_empty(self.clipboard.as_ref()).trim().to_string();
        if text.is_empty() {
            log::debug!("debounce: double press with empty clipboard, not firing");
            self.last_trigger = Some(now);
            return FireDecision::hold();
        }

        self.last_trigger = None;
        FireDecision::fire(text)
    }
}
