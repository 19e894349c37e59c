//! Source/target pairing from translation history.
//!
//! Detected language equal to the current target means the user copied text
//! that is already in the target language.  The first time that happens the
//! rotation moves on to the next target; after that the direction is
//! swapped so repeated double-presses toggle A→B, B→A.

use super::LanguageState;

/// Result of [`decide`]: the pair to translate with and the state to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub src_lang: String,
    pub tgt_lang: String,
    pub next_state: LanguageState,
}

/// Pick the `(src, tgt)` pair for text detected as `detected_src`.
///
/// Pure: the caller commits `next_state` under its own lock.
pub fn decide(state: &LanguageState, detected_src: &str) -> Decision {
    let mut index = state.current_index();
    let mut tgt_lang = state.current_target().to_string();

    if detected_src.starts_with(tgt_lang.as_str()) {
        match state.last_source() {
            None => {
                index = state.next_index();
                tgt_lang = state.targets()[index].clone();
            }
            Some(last) => tgt_lang = last.to_string(),
        }
    }

    let mut next_state = state.clone();
    next_state.set_position(index, detected_src.to_string());

    Decision {
        src_lang: detected_src.to_string(),
        tgt_lang,
        next_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(index: usize, last: Option<&str>) -> LanguageState {
        LanguageState::with_history(
            vec!["ja".into(), "en".into(), "zh".into()],
            index,
            last.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn first_translation_in_target_language_advances() {
        let decision = decide(&state(0, None), "ja");

        assert_eq!(decision.src_lang, "ja");
        assert_eq!(decision.tgt_lang, "en");
        assert_eq!(decision.next_state.current_index(), 1);
        assert_eq!(decision.next_state.last_source(), Some("ja"));
    }

    #[test]
    fn repeat_in_target_language_swaps_back() {
        let decision = decide(&state(1, Some("ja")), "en");

        assert_eq!(decision.tgt_lang, "ja");
        assert_eq!(decision.next_state.current_index(), 1);
        assert_eq!(decision.next_state.last_source(), Some("en"));
    }

    #[test]
    fn other_language_keeps_target() {
        let decision = decide(&state(0, Some("en")), "zh");

        assert_eq!(decision.src_lang, "zh");
        assert_eq!(decision.tgt_lang, "ja");
        assert_eq!(decision.next_state.current_index(), 0);
        assert_eq!(decision.next_state.last_source(), Some("zh"));
    }

    #[test]
    fn match_is_by_prefix() {
        let decision = decide(&state(2, None), "zh-cn");
        assert_eq!(decision.tgt_lang, "ja");
        assert_eq!(decision.next_state.current_index(), 0);
    }

    #[test]
    fn advance_wraps_from_last_target() {
        let decision = decide(&state(2, None), "zh");
        assert_eq!(decision.tgt_lang, "ja");
        assert_eq!(decision.next_state.current_index(), 0);
    }

    #[test]
    fn decide_is_deterministic() {
        let input = state(1, Some("ja"));
        let first = decide(&input, "en");
        let second = decide(&input, "en");
        assert_eq!(first, second);
    }

    #[test]
    fn decide_leaves_input_untouched() {
        let input = state(0, None);
        let before = input.clone();
        let _ = decide(&input, "ja");
        assert_eq!(input, before);
    }

    #[test]
    fn swap_returns_previous_source_for_any_history() {
        for last in ["ja", "zh", "fr"] {
            let decision = decide(&state(1, Some(last)), "en");
            assert_eq!(decision.tgt_lang, last);
        }
    }
}
