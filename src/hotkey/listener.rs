//! Dedicated OS-thread hotkey listener using `rdev::listen`.
//!
//! `rdev::listen` is a blocking call that must live on its own OS thread.
//! [`HotkeyListener`] owns that thread and a stop flag; dropping it sets the
//! flag so the callback silently ignores further events.
//!
//! # Shutdown caveat
//!
//! `rdev::listen` has **no graceful shutdown API**.  Setting the stop flag
//! prevents events from being forwarded, but the OS thread itself stays
//! blocked in the rdev event loop until the process exits.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Instant;

use tokio::sync::mpsc;

use super::{HotkeyEvent, Modifier};

// ---------------------------------------------------------------------------
// Bindings / ChordTracker
// ---------------------------------------------------------------------------

/// Keys the listener reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    /// Key of the trigger chord.
    pub trigger: rdev::Key,
    /// Modifier held with `trigger`; `None` means the bare key.
    pub modifier: Option<Modifier>,
    /// Key that advances the target language.
    pub switch_language: Option<rdev::Key>,
}

/// Turns raw key events into [`HotkeyEvent`]s.
///
/// Tracks whether the modifier is held and ignores OS auto-repeat of a key
/// that is already down, so holding Ctrl+C is one trigger, not a stream.
#[derive(Debug)]
pub struct ChordTracker {
    bindings: Bindings,
    modifier_down: bool,
    trigger_down: bool,
    switch_down: bool,
}

impl ChordTracker {
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            modifier_down: false,
            trigger_down: false,
            switch_down: false,
        }
    }

    /// Feed one key event observed at `now`.
    pub fn on_event(&mut self, event: &rdev::EventType, now: Instant) -> Option<HotkeyEvent> {
        match *event {
            rdev::EventType::KeyPress(key) => self.on_press(key, now),
            rdev::EventType::KeyRelease(key) => {
                self.on_release(key);
                None
            }
            _ => None,
        }
    }

    fn on_press(&mut self, key: rdev::Key, now: Instant) -> Option<HotkeyEvent> {
        if self.bindings.modifier.is_some_and(|m| m.matches(key)) {
            self.modifier_down = true;
            return None;
        }

        if key == self.bindings.trigger {
            let repeat = self.trigger_down;
            self.trigger_down = true;
            let chord_held = self.bindings.modifier.is_none() || self.modifier_down;
            if chord_held && !repeat {
                return Some(HotkeyEvent::Trigger { at: now });
            }
            return None;
        }

        if Some(key) == self.bindings.switch_language {
            let repeat = self.switch_down;
            self.switch_down = true;
            if !repeat {
                return Some(HotkeyEvent::SwitchLanguage);
            }
        }
        None
    }

    fn on_release(&mut self, key: rdev::Key) {
        if self.bindings.modifier.is_some_and(|m| m.matches(key)) {
            self.modifier_down = false;
        } else if key == self.bindings.trigger {
            self.trigger_down = false;
        } else if Some(key) == self.bindings.switch_language {
            self.switch_down = false;
        }
    }
}

// ---------------------------------------------------------------------------
// HotkeyListener
// ---------------------------------------------------------------------------

/// Handle to a running hotkey listener thread.  Drop it to stop forwarding
/// events.
pub struct HotkeyListener {
    stop: Arc<AtomicBool>,
    /// Never joined: `rdev::listen` does not return.
    _thread: std::thread::JoinHandle<()>,
}

impl HotkeyListener {
    /// Spawn the `hotkey-listener` thread and forward chord events on `tx`.
    ///
    /// The channel is unbounded so the OS hook callback never blocks.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the OS refuses to create the thread.
    pub fn start(
        bindings: Bindings,
        tx: mpsc::UnboundedSender<HotkeyEvent>,
    ) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("hotkey-listener".into())
            .spawn(move || {
                let mut tracker = ChordTracker::new(bindings);
                let result = rdev::listen(move |event| {
                    if stop_clone.load(Ordering::Relaxed) {
                        return;
                    }
                    if let Some(hotkey) = tracker.on_event(&event.event_type, Instant::now()) {
                        log::debug!("hotkey-listener: {hotkey:?}");
                        let _ = tx.send(hotkey);
                    }
                });

                if let Err(e) = result {
                    log::error!("hotkey-listener: rdev::listen exited with error: {:?}", e);
                }
            })?;

        Ok(Self {
            stop,
            _thread: thread,
        })
    }
}

impl Drop for HotkeyListener {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
