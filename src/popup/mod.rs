//! The translation popup: one window at a time, driven by the result queue.
//!
//! ```text
//! ResultReceiver ──poll──▶ PopupConsumer ──▶ PopupStateMachine
//!                              ▲                   │ RenderCommand
//!          UserAction ─────────┘                   ▼
//!                                           PopupRenderer
//! ```

pub mod consumer;
pub mod render;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use consumer::{PopupConsumer, UserAction};
pub use render::{ConsoleRenderer, PopupRenderer};
pub use state::{CopyPart, PopupHandle, PopupState, PopupStateMachine, RenderCommand};
