//! Ordered many-producer / single-consumer result channel.
//!
//! [`ResultQueue`] is the cloneable producer end held by job tasks, the
//! trigger thread and the language-switch action.  [`ResultReceiver`] is the
//! single consumer end owned by the popup consumer.  Backed by an unbounded
//! `tokio::sync::mpsc` channel: `push` never blocks and messages come out in
//! the order they went in.

use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// ResultMessage
// ---------------------------------------------------------------------------

/// Messages delivered to the popup consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultMessage {
    /// A fire happened; show (or re-seed) the popup with this text.
    Create { original_text: String },

    /// Outcome of one translation job.
    ///
    /// On failure `src_lang` and `tgt_lang` are empty and
    /// `translated_text` carries the error description.
    Update {
        src_lang: String,
        tgt_lang: String,
        translated_text: String,
        is_error: bool,
    },

    /// Transient notice (e.g. target language switched), shown as a toast.
    Info { message: String },
}

impl ResultMessage {
    pub fn success(
        src_lang: impl Into<String>,
        tgt_lang: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Self {
        ResultMessage::Update {
            src_lang: src_lang.into(),
            tgt_lang: tgt_lang.into(),
            translated_text: translated_text.into(),
            is_error: false,
        }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        ResultMessage::Update {
            src_lang: String::new(),
            tgt_lang: String::new(),
            translated_text: description.into(),
            is_error: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Queue ends
// ---------------------------------------------------------------------------

/// Create a connected producer / consumer pair.
pub fn result_queue() -> (ResultQueue, ResultReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ResultQueue { tx }, ResultReceiver { rx })
}

/// Producer end.  Cheap to clone; safe to use from any thread or task.
#[derive(Debug, Clone)]
pub struct ResultQueue {
    tx: mpsc::UnboundedSender<ResultMessage>,
}

impl ResultQueue {
    /// Enqueue `msg` without blocking.
    ///
    /// Returns `false` when the consumer is gone; the message is discarded.
    pub fn push(&self, msg: ResultMessage) -> bool {
        match self.tx.send(msg) {
            Ok(()) => true,
            Err(mpsc::error::SendError(msg)) => {
                log::debug!("queue: consumer closed, discarding {msg:?}");
                false
            }
        }
    }
}

/// Consumer end.  Exactly one exists per queue.
#[derive(Debug)]
pub struct ResultReceiver {
    rx: mpsc::UnboundedReceiver<ResultMessage>,
}

impl ResultReceiver {
    /// Wait for the next message.  `None` once every producer is dropped and
    /// the queue is empty.
    pub async fn pop(&mut self) -> Option<ResultMessage> {
        self.rx.recv().await
    }

    /// Next message if one is ready, for polling consumers.
    pub fn try_pop(&mut self) -> Option<ResultMessage> {
        self.rx.try_recv().ok()
    }

    /// Everything currently queued, in order.
    pub fn drain(&mut self) -> Vec<ResultMessage> {
        let mut out = Vec::new();
        while let Some(msg) = self.try_pop() {
            out.push(msg);
        }
        out
    }
}
