//! Asynchronous translation jobs and the result queue they report into.
//!
//! # Architecture
//!
//! ```text
//! trigger thread / popup consumer
//!        │ submit(job)            (returns immediately)
//!        ▼
//! TranslationDispatcher ── tokio::spawn ──▶ job task ─┐
//!                       ── tokio::spawn ──▶ job task ─┤  (unbounded fan-out)
//!                                                     ▼
//!                                  ResultQueue::push(Update)  (never blocks)
//!                                                     │
//!                                                     ▼
//!                                  ResultReceiver  (single consumer)
//! ```
//!
//! Every submitted job pushes exactly one [`ResultMessage::Update`], whether
//! translation succeeded or not.

pub mod dispatcher;
pub mod job;
pub mod queue;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use dispatcher::TranslationDispatcher;
pub use job::TranslationJob;
pub use queue::{result_queue, ResultMessage, ResultQueue, ResultReceiver};
