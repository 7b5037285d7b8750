//! In-memory stand-ins for the on-device engine.
//!
//! These back the demo binary and the integration tests: a keyword based
//! detector, a word-for-word dictionary engine, and a model store whose
//! downloads finish after a configurable delay on the tokio runtime.

use crate::download::DownloadCompletion;
use crate::engine::{Detection, LanguageDetector, ModelStore, TranslationEngine};
use crate::error::EngineError;
use crate::i18n::Language;
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Column order of [`LEXICON`].
fn lexicon_languages() -> [Language; 4] {
    [
        Language::ENGLISH,
        Language::SPANISH,
        Language::FRENCH,
        Language::GERMAN,
    ]
}

const LEXICON: &[[&str; 4]] = &[
    ["hello", "hola", "bonjour", "hallo"],
    ["world", "mundo", "monde", "welt"],
    ["good", "bueno", "bon", "gut"],
    ["thanks", "gracias", "merci", "danke"],
    ["friend", "amigo", "ami", "freund"],
    ["the", "el", "le", "der"],
    ["cat", "gato", "chat", "katze"],
    ["dog", "perro", "chien", "hund"],
    ["is", "es", "est", "ist"],
    ["and", "y", "et", "und"],
    ["book", "libro", "livre", "buch"],
    ["house", "casa", "maison", "haus"],
    ["water", "agua", "eau", "wasser"],
    ["yes", "sí", "oui", "ja"],
    ["i", "yo", "je", "ich"],
    ["my", "mi", "mon", "mein"],
];

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn column_of(language: &Language) -> Option<usize> {
    lexicon_languages().iter().position(|l| l == language)
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

// ==================== Detector ====================

/// Detects Japanese and Chinese by script and the lexicon languages by
/// counting known words. Anything else is undetermined.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordDetector;

#[async_trait]
impl LanguageDetector for KeywordDetector {
    async fn detect(&self, text: &str) -> anyhow::Result<Detection> {
        if text.chars().any(|c| ('\u{3040}'..='\u{30ff}').contains(&c)) {
            return Ok(Detection::Detected(Language::JAPANESE));
        }
        if text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c)) {
            return Ok(Detection::Detected(Language::CHINESE));
        }

        let mut scores = [0usize; 4];
        for word in words(text) {
            for row in LEXICON {
                for (column, entry) in row.iter().enumerate() {
                    if *entry == word {
                        scores[column] += 1;
                    }
                }
            }
        }

        let best = scores.iter().copied().max().unwrap_or(0);
        let leaders: Vec<usize> = (0..scores.len()).filter(|&i| scores[i] == best).collect();
        match leaders.as_slice() {
            [column] if best > 0 => Ok(Detection::Detected(lexicon_languages()[*column].clone())),
            _ => Ok(Detection::Undetermined),
        }
    }
}

// ==================== Engine ====================

/// Word-for-word translation between the lexicon languages.
///
/// Refuses to translate until the store has both models, the way an
/// on-device engine would.
pub struct DictionaryEngine {
    store: Arc<dyn ModelStore>,
}

impl DictionaryEngine {
    pub fn new(store: Arc<dyn ModelStore>) -> Self {
        Self { store }
    }

    fn translate_word(word: &str, from: usize, to: usize) -> String {
        let lower = word.to_lowercase();
        LEXICON
            .iter()
            .find(|row| row[from] == lower)
            .map(|row| row[to].to_string())
            .unwrap_or_else(|| word.to_string())
    }
}

#[async_trait]
impl TranslationEngine for DictionaryEngine {
    async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
    ) -> Result<String, EngineError> {
        let mut missing = Vec::new();
        for language in [source, target] {
            if !self.store.is_downloaded(language) && !missing.contains(language) {
                missing.push(language.clone());
            }
        }
        if !missing.is_empty() {
            return Err(EngineError::ModelsMissing(missing));
        }

        let (Some(from), Some(to)) = (column_of(source), column_of(target)) else {
            return Err(anyhow!("no dictionary for {} -> {}", source, target).into());
        };

        let translated = text
            .split_whitespace()
            .map(|token| {
                let word = token.trim_end_matches(|c: char| !c.is_alphabetic());
                let punctuation = &token[word.len()..];
                format!("{}{}", Self::translate_word(word, from, to), punctuation)
            })
            .collect::<Vec<_>>()
            .join(" ");
        Ok(translated)
    }
}

// ==================== Model Store ====================

#[derive(Default)]
struct StoreState {
    delay: Duration,
    downloaded: Mutex<HashSet<Language>>,
    failures: Mutex<HashMap<Language, String>>,
    download_calls: Mutex<HashMap<Language, usize>>,
}

/// Model store whose downloads complete after `delay`.
///
/// `begin_download` spawns onto the current tokio runtime, so it must be
/// called from within one.
#[derive(Clone, Default)]
pub struct InMemoryModelStore {
    state: Arc<StoreState>,
}

impl InMemoryModelStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: Arc::new(StoreState {
                delay,
                ..StoreState::default()
            }),
        }
    }

    /// Mark models as already present on the device.
    pub fn with_models(self, languages: impl IntoIterator<Item = Language>) -> Self {
        lock(&self.state.downloaded).extend(languages);
        self
    }

    /// Make every future download of `language` fail with `reason`.
    pub fn fail_downloads_of(&self, language: Language, reason: impl Into<String>) {
        lock(&self.state.failures).insert(language, reason.into());
    }

    /// Number of times a download of `language` was started.
    pub fn download_calls(&self, language: &Language) -> usize {
        lock(&self.state.download_calls)
            .get(language)
            .copied()
            .unwrap_or(0)
    }

    /// Models on the device, sorted by code.
    pub fn downloaded(&self) -> Vec<Language> {
        let mut languages: Vec<Language> =
            lock(&self.state.downloaded).iter().cloned().collect();
        languages.sort();
        languages
    }
}

impl ModelStore for InMemoryModelStore {
    fn is_downloaded(&self, language: &Language) -> bool {
        lock(&self.state.downloaded).contains(language)
    }

    fn begin_download(&self, language: Language, completion: DownloadCompletion) {
        *lock(&self.state.download_calls)
            .entry(language.clone())
            .or_insert(0) += 1;

        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(state.delay).await;

            let failure = lock(&state.failures).get(&language).cloned();
            match failure {
                Some(reason) => completion.fail(anyhow!(reason)),
                None => {
                    debug!("Model for {} stored", language.name());
                    lock(&state.downloaded).insert(language);
                    completion.succeed();
                }
            }
        });
    }
}
