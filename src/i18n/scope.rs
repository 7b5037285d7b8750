//! Source language support policy.

use crate::i18n::{Language, LanguageError};
use std::collections::HashSet;

/// Which detected source languages the translator will act on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LanguageSupportScope {
    /// Every detected language is translated.
    #[default]
    All,
    /// Only the listed source languages are translated.
    RestrictedTo(HashSet<Language>),
}

impl LanguageSupportScope {
    pub fn restricted_to(languages: impl IntoIterator<Item = Language>) -> Self {
        Self::RestrictedTo(languages.into_iter().collect())
    }

    /// Whether `language` may be used as a translation source.
    pub fn allows(&self, language: &Language) -> bool {
        match self {
            Self::All => true,
            Self::RestrictedTo(languages) => languages.contains(language),
        }
    }

    /// Parse a scope from a setting such as `all` or `en, ja, vi`.
    ///
    /// An empty or `all` value yields [`LanguageSupportScope::All`].
    pub fn parse(value: &str) -> Result<Self, LanguageError> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let languages = value
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(Language::from_code)
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(Self::RestrictedTo(languages))
    }
}
