//! Per-job asynchronous translation.
//!
//! [`TranslationDispatcher::submit`] spawns one tokio task per job and
//! returns at once, so it is safe to call from the trigger thread (plain OS
//! thread) as well as from inside the runtime.
//!
//! # Job flow
//!
//! ```text
//! detect_language ──Err──▶ default code
//!        │
//!        ▼
//! lock LanguageState → decide → commit → unlock
//!        │
//!        ▼
//! translate ──Err──▶ push Update { is_error: true }        (no clipboard write)
//!        │
//!        ▼
//! spawn_blocking(clipboard.set_text) → push Update { is_error: false }
//! ```

use std::sync::{Arc, PoisonError};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::job::TranslationJob;
use super::queue::{ResultMessage, ResultQueue};
use crate::clipboard::{write_or_log, ClipboardPort};
use crate::language::{decide, SharedLanguageState};
use crate::provider::{ProviderError, TranslationProvider};

/// Runs translation jobs concurrently and reports each outcome on the
/// [`ResultQueue`].
///
/// Cheap to clone; every spawned job carries its own clone.
#[derive(Clone)]
pub struct TranslationDispatcher {
    runtime: Handle,
    provider: Arc<dyn TranslationProvider>,
    clipboard: Arc<dyn ClipboardPort>,
    languages: SharedLanguageState,
    queue: ResultQueue,
    default_source: String,
}

impl TranslationDispatcher {
    /// Create a dispatcher that spawns jobs on `runtime`.
    ///
    /// Detection failures fall back to `"en"`; see
    /// [`with_default_source`](Self::with_default_source).
    pub fn new(
        runtime: Handle,
        provider: Arc<dyn TranslationProvider>,
        clipboard: Arc<dyn ClipboardPort>,
        languages: SharedLanguageState,
        queue: ResultQueue,
    ) -> Self {
        Self {
            runtime,
            provider,
            clipboard,
            languages,
            queue,
            default_source: "en".into(),
        }
    }

    pub fn with_default_source(mut self, code: impl Into<String>) -> Self {
        self.default_source = code.into();
        self
    }

    /// Start translating `job` in the background.
    ///
    /// Never waits on the provider.  The returned handle may be dropped; the
    /// job keeps running and pushes exactly one `Update` when it finishes.
    pub fn submit(&self, job: TranslationJob) -> JoinHandle<()> {
        log::debug!("dispatch: submitting job (len={})", job.original_text().len());
        let this = self.clone();
        self.runtime.spawn(async move {
            let message = match this.execute(&job).await {
                Ok(message) => message,
                Err(e) => {
                    log::warn!("dispatch: translation failed: {e}");
                    ResultMessage::failure(e.to_string())
                }
            };
            log::debug!(
                "dispatch: job finished after {:?}",
                job.requested_at_instant().elapsed()
            );
            this.queue.push(message);
        })
    }

    async fn execute(&self, job: &TranslationJob) -> Result<ResultMessage, ProviderError> {
        let text = job.original_text();

        let detected = match self.provider.detect_language(text).await {
            Ok(code) if !code.is_empty() => code,
            Ok(_) => self.default_source.clone(),
            Err(e) => {
                log::warn!(
                    "dispatch: detection failed ({e}), assuming {}",
                    self.default_source
                );
                self.default_source.clone()
            }
        };

        let (src_lang, tgt_lang) = {
            let mut state = self.languages.lock().unwrap_or_else(PoisonError::into_inner);
            let decision = decide(&state, &detected);
            *state = decision.next_state;
            (decision.src_lang, decision.tgt_lang)
        };
        log::debug!("dispatch: translating {src_lang} → {tgt_lang}");

        let translated = self.provider.translate(text, &src_lang, &tgt_lang).await?;

        let clipboard = Arc::clone(&self.clipboard);
        let copy = translated.clone();
        if let Err(e) =
            tokio::task::spawn_blocking(move || write_or_log(clipboard.as_ref(), &copy)).await
        {
            log::warn!("dispatch: clipboard task panicked: {e}");
        }

        Ok(ResultMessage::success(src_lang, tgt_lang, translated))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
