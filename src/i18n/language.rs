//! Language type: an opaque, normalised language code.
//!
//! Any well-formed code is a valid `Language`; the registry only adds metadata.
//! Equality, hashing and ordering are by code.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Code a language detector returns when it cannot classify the text.
pub const UNDETERMINED_CODE: &str = "und";

const MAX_CODE_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("language code is empty")]
    Empty,

    #[error("invalid language code: '{0}'")]
    Invalid(String),

    #[error("'und' is not a concrete language")]
    Undetermined,
}

/// A natural language, identified by its code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Language {
    code: Cow<'static, str>,
}

impl Language {
    pub const ENGLISH: Language = Language::from_static("en");
    pub const SPANISH: Language = Language::from_static("es");
    pub const FRENCH: Language = Language::from_static("fr");
    pub const GERMAN: Language = Language::from_static("de");
    pub const JAPANESE: Language = Language::from_static("ja");
    pub const CHINESE: Language = Language::from_static("zh");

    const fn from_static(code: &'static str) -> Language {
        Language {
            code: Cow::Borrowed(code),
        }
    }

    /// Create a Language from a code string.
    ///
    /// The code is trimmed and lowercased. It must start with an ASCII letter and
    /// contain only ASCII letters, digits and `-` (e.g. "en", "zh-tw").
    ///
    /// # Example
    /// ```
    /// use local_translator::i18n::Language;
    ///
    /// let french = Language::from_code(" FR ").unwrap();
    /// assert_eq!(french, Language::FRENCH);
    /// ```
    pub fn from_code(code: &str) -> Result<Language, LanguageError> {
        let normalized = code.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(LanguageError::Empty);
        }
        if normalized == UNDETERMINED_CODE {
            return Err(LanguageError::Undetermined);
        }

        let well_formed = normalized.len() <= MAX_CODE_LEN
            && normalized.starts_with(|c: char| c.is_ascii_alphabetic())
            && !normalized.ends_with('-')
            && normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !well_formed {
            return Err(LanguageError::Invalid(code.to_string()));
        }

        // Reuse the registry's static str when we know the language
        let code = match LanguageRegistry::get().get_by_code(&normalized) {
            Some(config) => Cow::Borrowed(config.code),
            None => Cow::Owned(normalized),
        };
        Ok(Language { code })
    }

    /// The normalised language code (e.g. "en").
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Registry metadata, if this language is known.
    pub fn config(&self) -> Option<&'static LanguageConfig> {
        LanguageRegistry::get().get_by_code(&self.code)
    }

    /// English name of the language, falling back to the code.
    pub fn name(&self) -> &str {
        self.config().map(|c| c.name).unwrap_or(self.code())
    }

    pub fn native_name(&self) -> Option<&'static str> {
        self.config().map(|c| c.native_name)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl std::str::FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ==================== Constant Tests ====================

    #[test]
    fn test_english_constant() {
        assert_eq!(Language::ENGLISH.code(), "en");
        assert_eq!(Language::ENGLISH.name(), "English");
    }

    #[test]
    fn test_spanish_constant() {
        assert_eq!(Language::SPANISH.code(), "es");
        assert_eq!(Language::SPANISH.native_name(), Some("Español"));
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_known() {
        let language = Language::from_code("fr").expect("Should succeed");
        assert_eq!(language, Language::FRENCH);
        assert_eq!(language.name(), "French");
    }

    #[test]
    fn test_from_code_normalizes_case_and_whitespace() {
        assert_eq!(Language::from_code("  DE ").unwrap(), Language::GERMAN);
    }

    #[test]
    fn test_from_code_unknown_is_still_valid() {
        let klingon = Language::from_code("tlh").expect("Should succeed");
        assert_eq!(klingon.code(), "tlh");
        assert_eq!(klingon.name(), "tlh");
        assert!(klingon.config().is_none());
    }

    #[test]
    fn test_from_code_with_region_subtag() {
        let lang = Language::from_code("zh-TW").unwrap();
        assert_eq!(lang.code(), "zh-tw");
    }

    #[test]
    fn test_from_code_empty() {
        assert_eq!(Language::from_code(""), Err(LanguageError::Empty));
        assert_eq!(Language::from_code("   "), Err(LanguageError::Empty));
    }

    #[test]
    fn test_from_code_undetermined() {
        assert_eq!(Language::from_code("und"), Err(LanguageError::Undetermined));
    }

    #[test]
    fn test_from_code_invalid() {
        assert!(matches!(
            Language::from_code("e n"),
            Err(LanguageError::Invalid(_))
        ));
        assert!(matches!(
            Language::from_code("1en"),
            Err(LanguageError::Invalid(_))
        ));
        assert!(matches!(
            Language::from_code("en-"),
            Err(LanguageError::Invalid(_))
        ));
        assert!(matches!(
            Language::from_code("abcdefghijklmnopq"),
            Err(LanguageError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_via_from_str() {
        let lang: Language = "ja".parse().unwrap();
        assert_eq!(lang, Language::JAPANESE);
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_equality_is_by_code() {
        let constant = Language::ENGLISH;
        let parsed = Language::from_code("en").unwrap();
        let owned = Language {
            code: Cow::Owned("en".to_string()),
        };
        assert_eq!(constant, parsed);
        assert_eq!(constant, owned);
    }

    #[test]
    fn test_hash_is_by_code() {
        let mut set = HashSet::new();
        set.insert(Language::ENGLISH);
        set.insert(Language::from_code("EN").unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Language::GERMAN).expect("Should serialize");
        assert_eq!(json, "\"de\"");
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::CHINESE.to_string(), "zh");
    }
}
