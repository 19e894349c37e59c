//! Human-readable language names for popup labels and notices.

/// Display name for a two-letter language code.
///
/// Unknown codes fall back to the upper-cased code.
///
/// ```
/// use clip_translate::language::display_name;
///
/// assert_eq!(display_name("ja"), "Japanese");
/// assert_eq!(display_name("fr"), "FR");
/// ```
pub fn display_name(code: &str) -> String {
    match code {
        "ja" => "Japanese".into(),
        "en" => "English".into(),
        "zh" => "Chinese".into(),
        "ko" => "Korean".into(),
        other => other.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(display_name("en"), "English");
        assert_eq!(display_name("zh"), "Chinese");
    }

    #[test]
    fn unknown_code_is_upper_cased() {
        assert_eq!(display_name("de"), "DE");
        assert_eq!(display_name(""), "");
    }
}
