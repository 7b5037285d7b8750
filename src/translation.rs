use crate::download::ModelDownloadCoordinator;
use crate::engine::{Detection, LanguageDetector, TranslationEngine};
use crate::error::{join_codes, EngineError, TranslatorError};
use crate::i18n::{Language, LanguageSupportScope};
use crate::metrics::TranslationMetrics;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Text to translate and the language to translate it into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target: Language,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target: Language) -> Self {
        Self {
            text: text.into(),
            target,
        }
    }
}

/// A successful translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationOutcome {
    pub original_text: String,
    pub detected_language: Language,
    pub translated_text: String,
}

/// Runs the detect → translate → download missing models → retry pipeline.
///
/// Missing models are fetched through the shared [`ModelDownloadCoordinator`],
/// so concurrent requests needing the same model trigger a single download.
/// After the downloads the engine is retried exactly once.
pub struct TranslationOrchestrator {
    detector: Arc<dyn LanguageDetector>,
    engine: Arc<dyn TranslationEngine>,
    downloads: Arc<ModelDownloadCoordinator>,
    scope: RwLock<LanguageSupportScope>,
    metrics: Arc<TranslationMetrics>,
}

impl TranslationOrchestrator {
    /// Create an orchestrator that records into the coordinator's metrics.
    pub fn new(
        detector: Arc<dyn LanguageDetector>,
        engine: Arc<dyn TranslationEngine>,
        downloads: Arc<ModelDownloadCoordinator>,
    ) -> Self {
        let metrics = Arc::clone(downloads.metrics());
        Self {
            detector,
            engine,
            downloads,
            scope: RwLock::new(LanguageSupportScope::All),
            metrics,
        }
    }

    /// Builder-style variant of [`set_support_scope`](Self::set_support_scope).
    pub fn with_support_scope(self, scope: LanguageSupportScope) -> Self {
        self.set_support_scope(scope);
        self
    }

    /// Restrict (or unrestrict) the detected source languages acted upon.
    ///
    /// Applies to requests that reach the scope check after this call.
    pub fn set_support_scope(&self, scope: LanguageSupportScope) {
        info!("Source language support scope set to {:?}", scope);
        *self.scope.write().unwrap_or_else(PoisonError::into_inner) = scope;
    }

    pub fn support_scope(&self) -> LanguageSupportScope {
        self.scope
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn downloads(&self) -> &Arc<ModelDownloadCoordinator> {
        &self.downloads
    }

    pub fn metrics(&self) -> &Arc<TranslationMetrics> {
        &self.metrics
    }

    /// Translate `request.text` into `request.target`.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutcome, TranslatorError> {
        self.metrics.record_request();

        let result = self.run(request).await;
        match &result {
            Ok(_) => self.metrics.record_success(),
            Err(e) => {
                self.metrics.record_failure();
                warn!(
                    kind = e.kind(),
                    "Translation to {} failed: {}",
                    request.target.name(),
                    e
                );
            }
        }
        result
    }

    async fn run(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutcome, TranslatorError> {
        if request.text.is_empty() {
            return Err(TranslatorError::InputEmpty);
        }

        let source = match self
            .detector
            .detect(&request.text)
            .await
            .map_err(TranslatorError::TranslationFailed)?
        {
            Detection::Detected(language) => language,
            Detection::Undetermined => return Err(TranslatorError::UndetectedLanguage),
        };
        let target = &request.target;

        // Nothing to translate; the scope only governs actual translation work
        if &source == target {
            debug!("Input already in {}, returning it unchanged", target.name());
            self.metrics.record_short_circuit();
            return Ok(TranslationOutcome {
                original_text: request.text.clone(),
                detected_language: source,
                translated_text: request.text.clone(),
            });
        }

        if !self.support_scope().allows(&source) {
            return Err(TranslatorError::UnsupportedLanguage(source));
        }

        let translated = match self.call_engine(&request.text, &source, target).await {
            Ok(translated) => translated,
            Err(EngineError::ModelsMissing(missing)) => {
                info!(
                    "Translation {} -> {} needs models for [{}], downloading",
                    source,
                    target,
                    join_codes(&missing)
                );
                self.download_missing(&missing).await?;

                self.metrics.record_retry();
                debug!("Retrying translation {} -> {}", source, target);
                // A second ModelsMissing surfaces as an error instead of looping
                self.call_engine(&request.text, &source, target).await?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(TranslationOutcome {
            original_text: request.text.clone(),
            detected_language: source,
            translated_text: translated,
        })
    }

    async fn call_engine(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
    ) -> Result<String, EngineError> {
        self.metrics.record_engine_call();
        self.engine.translate(text, source, target).await
    }

    /// Download each missing model in order, stopping at the first failure.
    async fn download_missing(&self, missing: &[Language]) -> Result<(), TranslatorError> {
        for language in missing {
            self.downloads
                .ensure_downloaded(language)
                .await
                .map_err(|cause| TranslatorError::DownloadFailed {
                    language: language.clone(),
                    cause,
                })?;
        }
        Ok(())
    }
}
