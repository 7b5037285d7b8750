//! Error types shared by the download coordinator and the translation pipeline.

use crate::i18n::Language;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The cause of a failed model download.
///
/// One download episode can have many waiters, so the store's cause is shared
/// behind an `Arc` and every waiter receives the same value.
#[derive(Clone)]
pub struct DownloadFailure(Arc<anyhow::Error>);

impl DownloadFailure {
    pub fn new(cause: impl Into<anyhow::Error>) -> Self {
        Self(Arc::new(cause.into()))
    }

    pub fn msg(message: impl fmt::Display + fmt::Debug + Send + Sync + 'static) -> Self {
        Self(Arc::new(anyhow::Error::msg(message)))
    }

    /// The underlying cause as reported by the model store.
    pub fn cause(&self) -> &anyhow::Error {
        &self.0
    }

    /// Whether both failures carry the very same cause instance.
    pub fn same_cause(&self, other: &DownloadFailure) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for DownloadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.0)
    }
}

impl fmt::Debug for DownloadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DownloadFailure")
            .field(&format_args!("{:#}", self.0))
            .finish()
    }
}

// The display already carries the full cause chain
impl std::error::Error for DownloadFailure {}

/// Errors reported by a translation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine needs models that are not on the device yet.
    #[error("missing language models: {}", join_codes(.0))]
    ModelsMissing(Vec<Language>),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Everything that can go wrong while translating a request.
#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error("input text is empty")]
    InputEmpty,

    #[error("could not determine the language of the input")]
    UndetectedLanguage,

    #[error("{0} is not a supported source language")]
    UnsupportedLanguage(Language),

    #[error("missing language models: {}", join_codes(.0))]
    ModelsMissing(Vec<Language>),

    #[error("failed to download the model for {language}: {cause}")]
    DownloadFailed {
        language: Language,
        #[source]
        cause: DownloadFailure,
    },

    #[error("translation failed: {0:#}")]
    TranslationFailed(#[source] anyhow::Error),
}

impl From<EngineError> for TranslatorError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::ModelsMissing(languages) => Self::ModelsMissing(languages),
            EngineError::Failed(cause) => Self::TranslationFailed(cause),
        }
    }
}

impl TranslatorError {
    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputEmpty => "input_empty",
            Self::UndetectedLanguage => "undetected_language",
            Self::UnsupportedLanguage(_) => "unsupported_language",
            Self::ModelsMissing(_) => "models_missing",
            Self::DownloadFailed { .. } => "download_failed",
            Self::TranslationFailed(_) => "translation_failed",
        }
    }
}

pub(crate) fn join_codes(languages: &[Language]) -> String {
    languages
        .iter()
        .map(Language::code)
        .collect::<Vec<_>>()
        .join(", ")
}
