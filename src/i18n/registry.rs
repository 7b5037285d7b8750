//! Language registry: metadata for the languages the on-device engine ships models for.
//!
//! The registry is only used to attach human-readable names to language codes.
//! Codes that are not listed here are still valid languages; they simply have no
//! metadata. It uses a singleton pattern with `OnceLock` because the table is
//! immutable for the life of the process.

use std::sync::OnceLock;

/// Metadata for a known language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Lowercase language code (e.g., "en", "zh")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Spanish", "French")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Español", "Français")
    pub native_name: &'static str,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Arguments
    /// * `code` - A lowercase language code (e.g., "en", "es")
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language is known
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Number of languages with metadata.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

fn lang(code: &'static str, name: &'static str, native_name: &'static str) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        native_name,
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        lang("en", "English", "English"),
        lang("es", "Spanish", "Español"),
        lang("fr", "French", "Français"),
        lang("de", "German", "Deutsch"),
        lang("it", "Italian", "Italiano"),
        lang("pt", "Portuguese", "Português"),
        lang("ja", "Japanese", "日本語"),
        lang("ko", "Korean", "한국어"),
        lang("zh", "Chinese", "中文"),
        lang("vi", "Vietnamese", "Tiếng Việt"),
        lang("th", "Thai", "ไทย"),
        lang("ru", "Russian", "Русский"),
    ]
}
