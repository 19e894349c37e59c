//! The single consumer of the result queue.
//!
//! [`PopupConsumer`] owns the [`PopupStateMachine`] and the renderer.  It
//! polls the [`ResultReceiver`] on a fixed cadence and reacts to
//! [`UserAction`]s as they arrive; user submits go straight back to the
//! [`TranslationDispatcher`].  Every action first applies the results
//! queued ahead of it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::{CopyPart, PopupRenderer, PopupStateMachine, RenderCommand};
use crate::clipboard::{write_or_log, ClipboardPort};
use crate::dispatch::{ResultReceiver, TranslationDispatcher};

/// Default queue polling cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What the user did in the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Retranslate the (possibly edited) original text.
    Submit(String),
    /// Put the original text back on the clipboard.
    CopyOriginal,
    /// Put the translated text on the clipboard.
    CopyTranslated,
    Close,
    /// Stop the consumer.
    Quit,
}

pub struct PopupConsumer<R: PopupRenderer> {
    machine: PopupStateMachine,
    renderer: R,
    dispatcher: TranslationDispatcher,
    clipboard: Arc<dyn ClipboardPort>,
    poll_interval: Duration,
}

impl<R: PopupRenderer> PopupConsumer<R> {
    pub fn new(
        machine: PopupStateMachine,
        renderer: R,
        dispatcher: TranslationDispatcher,
        clipboard: Arc<dyn ClipboardPort>,
    ) -> Self {
        Self {
            machine,
            renderer,
            dispatcher,
            clipboard,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn machine(&self) -> &PopupStateMachine {
        &self.machine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Apply everything currently queued.  Returns how many messages were
    /// handled.
    pub fn pump(&mut self, results: &mut ResultReceiver) -> usize {
        let mut handled = 0;
        while let Some(message) = results.try_pop() {
            let commands = self.machine.handle_message(message);
            self.render(&commands);
            handled += 1;
        }
        handled
    }

    /// Apply one user action.  `Quit` is handled by [`run`](Self::run) and
    /// is a no-op here.
    pub fn act(&mut self, action: UserAction) {
        let commands = match action {
            UserAction::Submit(edited) => {
                let (job, commands) = self.machine.submit(&edited);
                if let Some(job) = job {
                    log::info!("popup: retranslating edited text");
                    self.dispatcher.submit(job);
                }
                commands
            }
            UserAction::CopyOriginal => {
                self.copy(CopyPart::Original);
                Vec::new()
            }
            UserAction::CopyTranslated => {
                self.copy(CopyPart::Translated);
                Vec::new()
            }
            UserAction::Close => self.machine.close(),
            UserAction::Quit => Vec::new(),
        };
        self.render(&commands);
    }

    /// Run until `Quit` arrives or the user-action channel closes, then
    /// apply whatever is still queued and hand the renderer back.
    pub async fn run(
        mut self,
        mut results: ResultReceiver,
        mut actions: mpsc::UnboundedReceiver<UserAction>,
    ) -> R {
        log::info!(
            "popup: consumer started (poll every {:?})",
            self.poll_interval
        );
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    self.pump(&mut results);
                }
                action = actions.recv() => {
                    self.pump(&mut results);
                    match action {
                        Some(UserAction::Quit) | None => break,
                        Some(action) => self.act(action),
                    }
                }
            }
        }

        self.pump(&mut results);
        log::info!("popup: consumer exiting");
        self.renderer
    }

    fn copy(&self, part: CopyPart) {
        match self.machine.copy_text(part) {
            Some(text) => {
                log::info!("popup: copying {part:?} text to clipboard");
                write_or_log(self.clipboard.as_ref(), text);
            }
            None => log::debug!("popup: nothing to copy for {part:?}"),
        }
    }

    fn render(&mut self, commands: &[RenderCommand]) {
        for command in commands {
            self.renderer.render(command);
        }
    }
}
