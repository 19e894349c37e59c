//! Target-language rotation and translation-direction history.
//!
//! [`LanguageState`] holds the fixed rotation of target languages, the index
//! of the current target and the source language of the previous
//! translation.  It is shared as [`SharedLanguageState`] between the
//! translation jobs (which commit [`decide`] results) and the
//! "switch language" action (which force-advances the target).  Both hold the
//! lock only for an in-memory read-modify-write, never across an `.await`.

pub mod names;
pub mod policy;

pub use names::display_name;
pub use policy::{decide, Decision};

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::dispatch::{ResultMessage, ResultQueue};

// ---------------------------------------------------------------------------
// LanguageError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    /// The configured target rotation contains no languages.
    #[error("target language list is empty")]
    EmptyTargets,

    /// A target code is blank; it would match every detected language.
    #[error("target language #{index} is blank")]
    BlankTarget { index: usize },
}

// ---------------------------------------------------------------------------
// LanguageState
// ---------------------------------------------------------------------------

/// Invariant: `targets` is non-empty and `current_index < targets.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageState {
    targets: Vec<String>,
    current_index: usize,
    last_source: Option<String>,
}

impl LanguageState {
    /// Start at the first target with no translation history.
    ///
    /// Codes are trimmed; blank codes are rejected.
    pub fn new(targets: Vec<String>) -> Result<Self, LanguageError> {
        if targets.is_empty() {
            return Err(LanguageError::EmptyTargets);
        }
        let targets = targets
            .into_iter()
            .enumerate()
            .map(|(index, code)| {
                let code = code.trim();
                if code.is_empty() {
                    Err(LanguageError::BlankTarget { index })
                } else {
                    Ok(code.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            targets,
            current_index: 0,
            last_source: None,
        })
    }

    /// Build a state at an arbitrary point of the rotation.
    ///
    /// `current_index` wraps modulo the number of targets.
    pub fn with_history(
        targets: Vec<String>,
        current_index: usize,
        last_source: Option<String>,
    ) -> Result<Self, LanguageError> {
        let mut state = Self::new(targets)?;
        state.current_index = current_index % state.targets.len();
        state.last_source = last_source.filter(|s| !s.is_empty());
        Ok(state)
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_target(&self) -> &str {
        &self.targets[self.current_index]
    }

    /// Source language of the most recent translation, if any.
    pub fn last_source(&self) -> Option<&str> {
        self.last_source.as_deref()
    }

    /// Index that follows `current_index`, wrapping at the end.
    pub(crate) fn next_index(&self) -> usize {
        (self.current_index + 1) % self.targets.len()
    }

    /// Move to the next target language and return it.
    pub fn advance(&mut self) -> &str {
        self.current_index = self.next_index();
        self.current_target()
    }

    pub(crate) fn set_position(&mut self, current_index: usize, last_source: String) {
        self.current_index = current_index;
        self.last_source = Some(last_source);
    }
}

impl Default for LanguageState {
    fn default() -> Self {
        Self {
            targets: vec!["ja".into(), "en".into(), "zh".into()],
            current_index: 0,
            last_source: None,
        }
    }
}

// ---------------------------------------------------------------------------
// SharedLanguageState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`LanguageState`].
pub type SharedLanguageState = Arc<Mutex<LanguageState>>;

pub fn new_shared_language_state(state: LanguageState) -> SharedLanguageState {
    Arc::new(Mutex::new(state))
}

/// Force the target rotation one step forward and announce the new target.
///
/// This is the tray / menu "switch language" action.  The notice travels
/// through the same [`ResultQueue`] as translation results so the popup
/// consumer shows it as a toast.  Returns the new target code.
pub fn switch_target_language(languages: &SharedLanguageState, queue: &ResultQueue) -> String {
    let target = {
        let mut state = languages.lock().unwrap_or_else(PoisonError::into_inner);
        state.advance().to_string()
    };

    log::info!("language: target switched to {target}");
    queue.push(ResultMessage::Info {
        message: format!(
            "Translation target switched to: {}",
            display_name(&target)
        ),
    });
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::result_queue;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_targets_rejected() {
        assert_eq!(
            LanguageState::new(Vec::new()).unwrap_err(),
            LanguageError::EmptyTargets
        );
    }

    #[test]
    fn blank_target_rejected() {
        assert_eq!(
            LanguageState::new(codes(&["ja", "", "zh"])).unwrap_err(),
            LanguageError::BlankTarget { index: 1 }
        );
        assert_eq!(
            LanguageState::new(codes(&["  "])).unwrap_err(),
            LanguageError::BlankTarget { index: 0 }
        );
    }

    #[test]
    fn target_codes_are_trimmed() {
        let state = LanguageState::new(codes(&[" ja ", "en"])).unwrap();
        assert_eq!(state.current_target(), "ja");
    }

    #[test]
    fn default_rotation_starts_at_japanese() {
        let state = LanguageState::default();
        assert_eq!(state.targets(), codes(&["ja", "en", "zh"]).as_slice());
        assert_eq!(state.current_target(), "ja");
        assert!(state.last_source().is_none());
    }

    #[test]
    fn advance_wraps_around() {
        let mut state = LanguageState::new(codes(&["ja", "en", "zh"])).unwrap();
        assert_eq!(state.advance(), "en");
        assert_eq!(state.advance(), "zh");
        assert_eq!(state.advance(), "ja");
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn with_history_keeps_index_in_range() {
        let state = LanguageState::with_history(codes(&["ja", "en"]), 5, Some("".into())).unwrap();
        assert_eq!(state.current_index(), 1);
        assert!(state.last_source().is_none());
    }

    #[tokio::test]
    async fn switch_advances_and_posts_info() {
        let languages = new_shared_language_state(LanguageState::default());
        let (queue, mut rx) = result_queue();

        let target = switch_target_language(&languages, &queue);

        assert_eq!(target, "en");
        assert_eq!(languages.lock().unwrap().current_target(), "en");
        assert_eq!(
            rx.try_pop(),
            Some(ResultMessage::Info {
                message: "Translation target switched to: English".into()
            })
        );
    }
}
