//! One unit of translation work.

use std::time::Instant;

/// Text to translate, captured at the moment a fire or submit happened.
///
/// Owned by the task that executes it; dropped once its result is queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    original_text: String,
    requested_at: Instant,
}

impl TranslationJob {
    /// Create a job for `text` requested now.
    ///
    /// Returns `None` when `text` is blank after trimming.
    pub fn new(text: &str) -> Option<Self> {
        Self::requested_at(text, Instant::now())
    }

    /// Create a job with an explicit request time.
    pub fn requested_at(text: &str, requested_at: Instant) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            original_text: trimmed.to_string(),
            requested_at,
        })
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn requested_at_instant(&self) -> Instant {
        self.requested_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_trimmed() {
        let job = TranslationJob::new("  hello \n").unwrap();
        assert_eq!(job.original_text(), "hello");
    }

    #[test]
    fn blank_text_yields_no_job() {
        assert!(TranslationJob::new("").is_none());
        assert!(TranslationJob::new(" \t\n ").is_none());
    }

    #[test]
    fn keeps_request_time() {
        let at = Instant::now();
        let job = TranslationJob::requested_at("x", at).unwrap();
        assert_eq!(job.requested_at_instant(), at);
    }
}
