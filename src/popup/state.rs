//! Popup lifecycle state machine.
//!
//! [`PopupStateMachine`] owns the single [`PopupHandle`] and turns queue
//! messages and user actions into [`RenderCommand`]s.  It never touches a
//! window itself, so every transition is testable without a display.
//!
//! ```text
//! Absent ──Create──▶ Loading ──Update(ok)──▶ Ready
//!                       │    ──Update(err)─▶ Error
//!                       ▲                      │
//!                       └──Create / submit─────┘
//! any ──close──▶ Absent
//! ```
//!
//! Overlapping jobs resolve last-write-wins: whichever `Update` arrives last
//! is what the popup shows.

use std::time::Duration;

use crate::dispatch::{ResultMessage, TranslationJob};

/// How long an info toast stays visible unless configured otherwise.
pub const DEFAULT_INFO_DURATION: Duration = Duration::from_millis(1500);

// ---------------------------------------------------------------------------
// PopupState / PopupHandle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    /// No popup on screen.
    Absent,
    /// Popup visible, translation pending.
    Loading,
    /// Popup shows a successful translation.
    Ready,
    /// Popup shows an error description.
    Error,
}

/// The one live popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupHandle {
    id: u64,
    original_text: String,
    translated_text: String,
    src_lang: String,
    tgt_lang: String,
    is_error: bool,
}

impl PopupHandle {
    fn new(id: u64, original_text: String) -> Self {
        Self {
            id,
            original_text,
            translated_text: String::new(),
            src_lang: String::new(),
            tgt_lang: String::new(),
            is_error: false,
        }
    }

    fn reset_translation(&mut self) {
        self.translated_text.clear();
        self.src_lang.clear();
        self.tgt_lang.clear();
        self.is_error = false;
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Empty while a translation is pending.
    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn src_lang(&self) -> &str {
        &self.src_lang
    }

    pub fn tgt_lang(&self) -> &str {
        &self.tgt_lang
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

// ---------------------------------------------------------------------------
// RenderCommand
// ---------------------------------------------------------------------------

/// Instructions for the renderer, in the order they must be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Open a new popup showing `original_text`.
    Create { id: u64, original_text: String },
    /// Replace the original-text pane.
    SetOriginal { text: String },
    /// Show the translated pane as pending and read-only.
    SetLoading,
    SetReady {
        src_lang: String,
        tgt_lang: String,
        text: String,
    },
    /// Show `text` with error styling.
    SetError { text: String },
    Focus,
    Close,
    /// Transient toast, independent of the popup.
    ShowInfo { message: String, duration: Duration },
}

/// Which pane a copy action takes its text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPart {
    Original,
    Translated,
}

// ---------------------------------------------------------------------------
// PopupStateMachine
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct PopupStateMachine {
    state: PopupState,
    popup: Option<PopupHandle>,
    next_id: u64,
    info_duration: Duration,
}

impl Default for PopupStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_INFO_DURATION)
    }
}

impl PopupStateMachine {
    pub fn new(info_duration: Duration) -> Self {
        Self {
            state: PopupState::Absent,
            popup: None,
            next_id: 1,
            info_duration,
        }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn popup(&self) -> Option<&PopupHandle> {
        self.popup.as_ref()
    }

    /// Apply one message from the result queue.
    pub fn handle_message(&mut self, message: ResultMessage) -> Vec<RenderCommand> {
        match message {
            ResultMessage::Create { original_text } => self.on_create(original_text),
            ResultMessage::Update {
                src_lang,
                tgt_lang,
                translated_text,
                is_error,
            } => self.on_update(src_lang, tgt_lang, translated_text, is_error),
            ResultMessage::Info { message } => vec![RenderCommand::ShowInfo {
                message,
                duration: self.info_duration,
            }],
        }
    }

    /// The user asked to retranslate the (possibly edited) original text.
    ///
    /// Returns the job to hand to the dispatcher, or `None` when there is no
    /// popup or the text is blank.
    pub fn submit(&mut self, edited: &str) -> (Option<TranslationJob>, Vec<RenderCommand>) {
        let Some(popup) = self.popup.as_mut() else {
            log::debug!("popup: submit with no popup, ignoring");
            return (None, Vec::new());
        };
        let Some(job) = TranslationJob::new(edited) else {
            log::debug!("popup: blank submit ignored");
            return (None, Vec::new());
        };

        popup.original_text = job.original_text().to_string();
        popup.reset_translation();
        self.state = PopupState::Loading;
        (Some(job), vec![RenderCommand::SetLoading])
    }

    /// Text a copy action should place on the clipboard.
    ///
    /// `None` with no popup, and for the translated pane while it is still
    /// pending.
    pub fn copy_text(&self, part: CopyPart) -> Option<&str> {
        let popup = self.popup.as_ref()?;
        let text = match part {
            CopyPart::Original => popup.original_text(),
            CopyPart::Translated => popup.translated_text(),
        };
        (!text.is_empty()).then_some(text)
    }

    /// The user closed the popup.
    pub fn close(&mut self) -> Vec<RenderCommand> {
        match self.popup.take() {
            Some(popup) => {
                log::debug!("popup: closing #{}", popup.id);
                self.state = PopupState::Absent;
                vec![RenderCommand::Close]
            }
            None => Vec::new(),
        }
    }

    fn on_create(&mut self, original_text: String) -> Vec<RenderCommand> {
        self.state = PopupState::Loading;

        if let Some(popup) = self.popup.as_mut() {
            popup.original_text = original_text.clone();
            popup.reset_translation();
            return vec![
                RenderCommand::SetOriginal {
                    text: original_text,
                },
                RenderCommand::SetLoading,
                RenderCommand::Focus,
            ];
        }

        let id = self.next_id;
        self.next_id += 1;
        self.popup = Some(PopupHandle::new(id, original_text.clone()));
        vec![
            RenderCommand::Create { id, original_text },
            RenderCommand::SetLoading,
        ]
    }

    fn on_update(
        &mut self,
        src_lang: String,
        tgt_lang: String,
        translated_text: String,
        is_error: bool,
    ) -> Vec<RenderCommand> {
        let Some(popup) = self.popup.as_mut() else {
            log::debug!("popup: update arrived with no popup, dropping");
            return Vec::new();
        };

        popup.translated_text = translated_text.clone();
        popup.src_lang = src_lang.clone();
        popup.tgt_lang = tgt_lang.clone();
        popup.is_error = is_error;

        let shown = if is_error {
            self.state = PopupState::Error;
            RenderCommand::SetError {
                text: translated_text,
            }
        } else {
            self.state = PopupState::Ready;
            RenderCommand::SetReady {
                src_lang,
                tgt_lang,
                text: translated_text,
            }
        };
        vec![shown, RenderCommand::Focus]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
