use crate::i18n::{Language, LanguageSupportScope};
use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Language every request is translated into
    pub target_language: Language,

    /// Which detected source languages are translated
    pub support_scope: LanguageSupportScope,

    /// How long a simulated model download takes
    pub download_delay: Duration,

    /// Models already on the device at startup
    pub preloaded_models: Vec<Language>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            target_language: match std::env::var("TRANSLATOR_TARGET_LANGUAGE") {
                Ok(code) => Language::from_code(&code)
                    .with_context(|| format!("Invalid TRANSLATOR_TARGET_LANGUAGE: '{}'", code))?,
                Err(_) => Language::ENGLISH,
            },

            support_scope: LanguageSupportScope::parse(
                &std::env::var("TRANSLATOR_SUPPORTED_LANGUAGES").unwrap_or_default(),
            )
            .context("Invalid TRANSLATOR_SUPPORTED_LANGUAGES")?,

            download_delay: Duration::from_millis(
                std::env::var("TRANSLATOR_DOWNLOAD_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(250),
            ),

            preloaded_models: match std::env::var("TRANSLATOR_PRELOADED_MODELS") {
                Ok(codes) => parse_language_list(&codes)
                    .context("Invalid TRANSLATOR_PRELOADED_MODELS")?,
                Err(_) => vec![Language::ENGLISH],
            },
        })
    }
}

/// Parse a comma-separated list of language codes, skipping empty entries.
fn parse_language_list(codes: &str) -> Result<Vec<Language>> {
    codes
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| Language::from_code(code).map_err(Into::into))
        .collect()
}
