//! Global hotkeys: the double-press translation trigger and the
//! language-switch key, backed by `rdev`.
//!
//! # Design
//!
//! `rdev::listen()` is a blocking OS-level call that never returns while the
//! process is alive, so it runs on a dedicated OS thread
//! ([`HotkeyListener`]).  Its callback only timestamps events and forwards
//! them over an unbounded channel; it never blocks.
//!
//! A second plain thread runs [`TriggerHandler`], which feeds trigger
//! timestamps through the [`TriggerDebouncer`] and, on a fire, seeds the
//! popup and submits a translation job.
//!
//! ```text
//! rdev callback ─HotkeyEvent─▶ TriggerHandler ─▶ TriggerDebouncer
//!                                   │ fire
//!                                   ├─▶ ResultQueue::push(Create)
//!                                   └─▶ TranslationDispatcher::submit
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use tokio::sync::mpsc;
//! use clip_translate::hotkey::{parse_key, parse_modifier, Bindings, HotkeyListener};
//!
//! let (tx, rx) = mpsc::unbounded_channel();
//! let bindings = Bindings {
//!     trigger: parse_key("C").expect("unknown key"),
//!     modifier: parse_modifier("Ctrl"),
//!     switch_language: parse_key("F8"),
//! };
//! let _listener = HotkeyListener::start(bindings, tx);
//! ```

pub mod debounce;
pub mod handler;
pub mod listener;

pub use debounce::{FireDecision, TriggerDebouncer};
pub use handler::TriggerHandler;
pub use listener::{Bindings, ChordTracker, HotkeyListener};

use std::time::Instant;

// ---------------------------------------------------------------------------
// HotkeyEvent
// ---------------------------------------------------------------------------

/// Events emitted by the hotkey listener thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyEvent {
    /// The trigger chord was pressed at `at`.
    Trigger { at: Instant },
    /// The language-switch key was pressed.
    SwitchLanguage,
}

// ---------------------------------------------------------------------------
// Modifier
// ---------------------------------------------------------------------------

/// Modifier that must be held for the trigger chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

impl Modifier {
    /// Whether `key` is one of the physical keys for this modifier.
    pub fn matches(self, key: rdev::Key) -> bool {
        use rdev::Key;
        match self {
            Modifier::Ctrl => matches!(key, Key::ControlLeft | Key::ControlRight),
            Modifier::Alt => matches!(key, Key::Alt | Key::AltGr),
            Modifier::Shift => matches!(key, Key::ShiftLeft | Key::ShiftRight),
            Modifier::Meta => matches!(key, Key::MetaLeft | Key::MetaRight),
        }
    }
}

/// Parse a modifier name from config (`"Ctrl"`, `"Alt"`, `"Shift"`,
/// `"Meta"`, case-insensitive).
///
/// ```
/// use clip_translate::hotkey::{parse_modifier, Modifier};
///
/// assert_eq!(parse_modifier("ctrl"), Some(Modifier::Ctrl));
/// assert_eq!(parse_modifier("Cmd"), Some(Modifier::Meta));
/// assert_eq!(parse_modifier("Hyper"), None);
/// ```
pub fn parse_modifier(name: &str) -> Option<Modifier> {
    match name.trim().to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifier::Ctrl),
        "alt" | "option" => Some(Modifier::Alt),
        "shift" => Some(Modifier::Shift),
        "meta" | "super" | "win" | "cmd" => Some(Modifier::Meta),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// parse_key
// ---------------------------------------------------------------------------

/// Parse a hotkey name from a config string into an [`rdev::Key`].
///
/// Supports F1–F12, a few named keys, and single ASCII letters in either
/// case.  Returns `None` for unrecognised names so callers can fall back to a
/// default.
///
/// ```
/// use clip_translate::hotkey::parse_key;
///
/// assert_eq!(parse_key("F8"), Some(rdev::Key::F8));
/// assert_eq!(parse_key("c"),  Some(rdev::Key::KeyC));
/// assert_eq!(parse_key("xyz"), None);
/// ```
pub fn parse_key(key_str: &str) -> Option<rdev::Key> {
    use rdev::Key;

    let key = match key_str {
        "F1" => Key::F1,
        "F2" => Key::F2,
        "F3" => Key::F3,
        "F4" => Key::F4,
        "F5" => Key::F5,
        "F6" => Key::F6,
        "F7" => Key::F7,
        "F8" => Key::F8,
        "F9" => Key::F9,
        "F10" => Key::F10,
        "F11" => Key::F11,
        "F12" => Key::F12,

        "Escape" | "Esc" => Key::Escape,
        "Space" => Key::Space,
        "Return" | "Enter" => Key::Return,
        "Insert" | "Ins" => Key::Insert,
        "Pause" => Key::Pause,
        "ScrollLock" => Key::ScrollLock,

        other => return parse_letter(other),
    };
    Some(key)
}

fn parse_letter(key_str: &str) -> Option<rdev::Key> {
    use rdev::Key;

    let mut chars = key_str.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }

    let key = match letter {
        'A' => Key::KeyA,
        'B' => Key::KeyB,
        'C' => Key::KeyC,
        'D' => Key::KeyD,
        'E' => Key::KeyE,
        'F' => Key::KeyF,
        'G' => Key::KeyG,
        'H' => Key::KeyH,
        'I' => Key::KeyI,
        'J' => Key::KeyJ,
        'K' => Key::KeyK,
        'L' => Key::KeyL,
        'M' => Key::KeyM,
        'N' => Key::KeyN,
        'O' => Key::KeyO,
        'P' => Key::KeyP,
        'Q' => Key::KeyQ,
        'R' => Key::KeyR,
        'S' => Key::KeyS,
        'T' => Key::KeyT,
        'U' => Key::KeyU,
        'V' => Key::KeyV,
        'W' => Key::KeyW,
        'X' => Key::KeyX,
        'Y' => Key::KeyY,
        'Z' => Key::KeyZ,
        _ => return None,
    };
    Some(key)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
