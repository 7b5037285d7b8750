//! Capabilities the pipeline needs from the on-device engine.
//!
//! Detection, model storage and translation are all provided by an external
//! engine; these traits are the narrow seams the core talks through.

use crate::download::DownloadCompletion;
use crate::error::EngineError;
use crate::i18n::{Language, LanguageError, UNDETERMINED_CODE};
use async_trait::async_trait;

/// Result of running language identification on a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Detected(Language),
    /// The detector could not classify the text.
    Undetermined,
}

impl Detection {
    /// Interpret a raw detector code, treating `und` as undetermined.
    pub fn from_code(code: &str) -> Result<Self, LanguageError> {
        if code.trim().eq_ignore_ascii_case(UNDETERMINED_CODE) {
            return Ok(Self::Undetermined);
        }
        Language::from_code(code).map(Self::Detected)
    }
}

#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect(&self, text: &str) -> anyhow::Result<Detection>;
}

/// On-device model storage.
pub trait ModelStore: Send + Sync {
    fn is_downloaded(&self, language: &Language) -> bool;

    /// Start downloading the model for `language` and return without waiting.
    ///
    /// The store must eventually report the outcome through `completion`.
    /// Dropping the handle without reporting counts as a failed download.
    fn begin_download(&self, language: Language, completion: DownloadCompletion);
}

#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Translate `text` from `source` to `target`.
    ///
    /// Fails with [`EngineError::ModelsMissing`] when the model for either
    /// language is not on the device.
    async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
    ) -> Result<String, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_from_code() {
        assert_eq!(
            Detection::from_code("ja").unwrap(),
            Detection::Detected(Language::JAPANESE)
        );
    }

    #[test]
    fn test_detection_undetermined_sentinel() {
        assert_eq!(Detection::from_code("und").unwrap(), Detection::Undetermined);
        assert_eq!(Detection::from_code(" UND ").unwrap(), Detection::Undetermined);
    }

    #[test]
    fn test_detection_rejects_malformed_code() {
        assert!(Detection::from_code("").is_err());
        assert!(Detection::from_code("e?").is_err());
    }
}
