//! Double-press clipboard translation.
//!
//! Pressing the trigger chord (Ctrl+C by default) twice in quick succession
//! sends the clipboard text to a translation backend; the result is written
//! back to the clipboard and shown in a single transient popup.
//!
//! ```text
//! hotkey ─▶ TriggerDebouncer ─fire─▶ ResultQueue::push(Create)
//!                                 └▶ TranslationDispatcher::submit(job)
//!                                        │ (one tokio task per job)
//!                                        ├─ detect_language
//!                                        ├─ language::decide (under mutex)
//!                                        ├─ translate → clipboard
//!                                        └─ ResultQueue::push(Update)
//!
//! ResultQueue ─▶ PopupConsumer ─▶ PopupStateMachine ─▶ PopupRenderer
//! ```

pub mod clipboard;
pub mod config;
pub mod dispatch;
pub mod hotkey;
pub mod language;
pub mod popup;
pub mod provider;
