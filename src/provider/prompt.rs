//! Prompts for language detection and translation, and reply clean-up.

pub const DETECT_SYSTEM: &str = "You are a language detection tool.";

pub const TRANSLATE_SYSTEM: &str = "You are a helpful translation assistant.";

/// User message asking for the ISO 639-1 code of `text`.
pub fn detection_prompt(text: &str) -> String {
    format!(
        "You are a language detection tool. \
         Output only the two-letter ISO language code (e.g. 'en', 'ja', 'zh'), \
         no extra text:\n\nText: {text}"
    )
}

/// User message asking to translate `text` from `src` to `tgt`.
pub fn translation_prompt(text: &str, src: &str, tgt: &str) -> String {
    format!(
        "Translate the following text from {src} to {tgt}. \
         Output only the translated text:\n\n{text}"
    )
}

/// Reduce a detection reply to a lower-case two-letter code.
///
/// Returns `None` when nothing usable is left.
///
/// ```
/// use clip_translate::provider::prompt::normalize_lang_code;
///
/// assert_eq!(normalize_lang_code(" 'JA'\n").as_deref(), Some("ja"));
/// assert_eq!(normalize_lang_code("english").as_deref(), Some("en"));
/// assert_eq!(normalize_lang_code("  "), None);
/// ```
pub fn normalize_lang_code(reply: &str) -> Option<String> {
    let code: String = reply
        .trim()
        .trim_matches(|c: char| c == '\'' || c == '"' || c == '`' || c == '.')
        .to_lowercase()
        .chars()
        .take(2)
        .collect();

    if code.trim().is_empty() {
        None
    } else {
        Some(code)
    }
}

/// Drop a `<think>…</think>` reasoning preamble emitted by reasoning models.
pub fn strip_reasoning(reply: &str) -> &str {
    match reply.split_once("</think>") {
        Some((_, answer)) => answer.trim(),
        None => reply.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_prompt_embeds_text() {
        let prompt = detection_prompt("bonjour");
        assert!(prompt.contains("two-letter ISO language code"));
        assert!(prompt.ends_with("Text: bonjour"));
    }

    #[test]
    fn translation_prompt_names_both_languages() {
        let prompt = translation_prompt("hello", "en", "ja");
        assert!(prompt.starts_with("Translate the following text from en to ja."));
        assert!(prompt.ends_with("\n\nhello"));
    }

    #[test]
    fn normalize_truncates_and_lowercases() {
        assert_eq!(normalize_lang_code("EN").as_deref(), Some("en"));
        assert_eq!(normalize_lang_code("zh-CN").as_deref(), Some("zh"));
        assert_eq!(normalize_lang_code("\"ko\"").as_deref(), Some("ko"));
    }

    #[test]
    fn normalize_rejects_empty() {
        assert_eq!(normalize_lang_code(""), None);
        assert_eq!(normalize_lang_code("''"), None);
    }

    #[test]
    fn strip_reasoning_keeps_answer() {
        assert_eq!(strip_reasoning("<think>hmm, Japanese</think>\n ja"), "ja");
        assert_eq!(strip_reasoning("  plain answer "), "plain answer");
    }
}
