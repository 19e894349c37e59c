//! Turns hotkey events into popup seeds and translation jobs.
//!
//! Runs on its own plain thread so a slow clipboard read never stalls the
//! rdev callback or the async runtime.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{HotkeyEvent, TriggerDebouncer};
use crate::dispatch::{ResultMessage, ResultQueue, TranslationDispatcher, TranslationJob};
use crate::language::{switch_target_language, SharedLanguageState};

pub struct TriggerHandler {
    debouncer: TriggerDebouncer,
    dispatcher: TranslationDispatcher,
    queue: ResultQueue,
    languages: SharedLanguageState,
}

impl TriggerHandler {
    pub fn new(
        debouncer: TriggerDebouncer,
        dispatcher: TranslationDispatcher,
        queue: ResultQueue,
        languages: SharedLanguageState,
    ) -> Self {
        Self {
            debouncer,
            dispatcher,
            queue,
            languages,
        }
    }

    /// Handle one event.  Returns the job handle when a translation was
    /// submitted.
    ///
    /// On a fire the `Create` message is pushed before the job is submitted,
    /// so the popup always exists by the time the job's `Update` arrives.
    pub fn handle(&mut self, event: HotkeyEvent) -> Option<JoinHandle<()>> {
        match event {
            HotkeyEvent::Trigger { at } => {
                let decision = self.debouncer.on_trigger(at);
                if !decision.fire {
                    return None;
                }
                let text = decision.clipboard_text?;
                let job = TranslationJob::requested_at(&text, at)?;

                log::info!("trigger: double press, translating {} chars", text.chars().count());
                self.queue.push(ResultMessage::Create {
                    original_text: job.original_text().to_string(),
                });
                Some(self.dispatcher.submit(job))
            }
            HotkeyEvent::SwitchLanguage => {
                switch_target_language(&self.languages, &self.queue);
                None
            }
        }
    }

    /// Block the current thread handling events until every sender is gone.
    ///
    /// Must not be called from inside the async runtime.
    pub fn run(mut self, mut events: mpsc::UnboundedReceiver<HotkeyEvent>) {
        log::info!("trigger: handler started");
        while let Some(event) = events.blocking_recv() {
            self.handle(event);
        }
        log::info!("trigger: event channel closed, handler exiting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardPort, MemoryClipboard};
    use crate::dispatch::{result_queue, ResultReceiver};
    use crate::hotkey::debounce::DEFAULT_WINDOW;
    use crate::language::{new_shared_language_state, LanguageState};
    use crate::provider::{ProviderError, TranslationProvider};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct Tagged;

    #[async_trait]
    impl TranslationProvider for Tagged {
        async fn detect_language(&self, _text: &str) -> Result<String, ProviderError> {
            Ok("en".into())
        }

        async fn translate(&self, text: &str, _src: &str, tgt: &str) -> Result<String, ProviderError> {
            Ok(format!("[{tgt}] {text}"))
        }
    }

    fn handler(clipboard_text: &str) -> (TriggerHandler, ResultReceiver, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::with_text(clipboard_text));
        let languages = new_shared_language_state(LanguageState::default());
        let (queue, rx) = result_queue();
        let dispatcher = TranslationDispatcher::new(
            tokio::runtime::Handle::current(),
            Arc::new(Tagged),
            clipboard.clone(),
            languages.clone(),
            queue.clone(),
        );
        let debouncer = TriggerDebouncer::new(clipboard.clone(), DEFAULT_WINDOW);
        (
            TriggerHandler::new(debouncer, dispatcher, queue, languages),
            rx,
            clipboard,
        )
    }

    #[tokio::test]
    async fn double_press_pushes_create_then_update() {
        let (mut h, mut rx, clipboard) = handler("hello");
        let t0 = Instant::now();

        assert!(h.handle(HotkeyEvent::Trigger { at: t0 }).is_none());
        let job = h
            .handle(HotkeyEvent::Trigger {
                at: t0 + Duration::from_millis(200),
            })
            .expect("second press fires");
        job.await.unwrap();

        assert_eq!(
            rx.drain(),
            vec![
                ResultMessage::Create {
                    original_text: "hello".into()
                },
                ResultMessage::success("en", "ja", "[ja] hello"),
            ]
        );
        assert_eq!(clipboard.get_text().unwrap(), "[ja] hello");
    }

    #[tokio::test]
    async fn slow_presses_push_nothing() {
        let (mut h, mut rx, _clipboard) = handler("hello");
        let t0 = Instant::now();

        assert!(h.handle(HotkeyEvent::Trigger { at: t0 }).is_none());
        assert!(h
            .handle(HotkeyEvent::Trigger {
                at: t0 + Duration::from_millis(800),
            })
            .is_none());
        assert!(rx.try_pop().is_none());
    }

    #[tokio::test]
    async fn empty_clipboard_pushes_nothing() {
        let (mut h, mut rx, _clipboard) = handler("");
        let t0 = Instant::now();

        h.handle(HotkeyEvent::Trigger { at: t0 });
        assert!(h
            .handle(HotkeyEvent::Trigger {
                at: t0 + Duration::from_millis(100),
            })
            .is_none());
        assert!(rx.try_pop().is_none());
    }

    #[tokio::test]
    async fn switch_language_pushes_info() {
        let (mut h, mut rx, _clipboard) = handler("hello");

        assert!(h.handle(HotkeyEvent::SwitchLanguage).is_none());
        assert_eq!(
            rx.try_pop(),
            Some(ResultMessage::Info {
                message: "Translation target switched to: English".into()
            })
        );
    }
}
