//! Model download coordination.
//!
//! [`ModelDownloadCoordinator`] makes sure at most one download per language is
//! in flight at any time. Every caller that asks for a language while its
//! download is running joins the same episode and receives the same outcome.

use crate::engine::ModelStore;
use crate::error::DownloadFailure;
use crate::i18n::Language;
use crate::metrics::TranslationMetrics;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Outcome of a single download episode, as seen by each waiter.
pub type DownloadResult = Result<(), DownloadFailure>;

type Waiter = oneshot::Sender<DownloadResult>;

/// State shared between the coordinator and outstanding completion handles.
#[derive(Default)]
struct InFlight {
    /// Languages with a download in flight, and the callers waiting on each.
    waiters: Mutex<HashMap<Language, Vec<Waiter>>>,
}

impl InFlight {
    // The map is consistent between operations, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, HashMap<Language, Vec<Waiter>>> {
        self.waiters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn complete(&self, language: &Language, outcome: DownloadResult) {
        let Some(waiters) = self.lock().remove(language) else {
            debug!("Ignoring completion for {}: no download in flight", language);
            return;
        };

        match &outcome {
            Ok(()) => info!(
                waiters = waiters.len(),
                "Model download for {} finished",
                language.name()
            ),
            Err(cause) => warn!(
                waiters = waiters.len(),
                "Model download for {} failed: {}",
                language.name(),
                cause
            ),
        }

        for waiter in waiters {
            // A waiter whose caller went away has nobody left to notify
            let _ = waiter.send(outcome.clone());
        }
    }
}

/// Per-language completion handle handed to [`ModelStore::begin_download`].
///
/// Consuming it with [`succeed`](Self::succeed) or [`fail`](Self::fail) ends
/// the download episode and resolves every waiter. Dropping it unreported ends
/// the episode as a failure.
pub struct DownloadCompletion {
    language: Language,
    in_flight: Weak<InFlight>,
    metrics: Arc<TranslationMetrics>,
    reported: bool,
}

impl DownloadCompletion {
    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn succeed(mut self) {
        self.finish(Ok(()));
    }

    pub fn fail(mut self, cause: impl Into<anyhow::Error>) {
        self.finish(Err(DownloadFailure::new(cause)));
    }

    /// Report an outcome produced by the store's own download routine.
    pub fn report(self, outcome: anyhow::Result<()>) {
        match outcome {
            Ok(()) => self.succeed(),
            Err(cause) => self.fail(cause),
        }
    }

    fn finish(&mut self, outcome: DownloadResult) {
        self.reported = true;
        if outcome.is_err() {
            self.metrics.record_download_failure();
        }
        if let Some(in_flight) = self.in_flight.upgrade() {
            in_flight.complete(&self.language, outcome);
        }
    }
}

impl Drop for DownloadCompletion {
    fn drop(&mut self) {
        if !self.reported {
            let cause = DownloadFailure::msg(format!(
                "download of {} ended without reporting a result",
                self.language
            ));
            self.finish(Err(cause));
        }
    }
}

/// Deduplicates model downloads per language.
pub struct ModelDownloadCoordinator {
    store: Arc<dyn ModelStore>,
    in_flight: Arc<InFlight>,
    metrics: Arc<TranslationMetrics>,
}

impl ModelDownloadCoordinator {
    pub fn new(store: Arc<dyn ModelStore>) -> Self {
        Self::with_metrics(store, Arc::new(TranslationMetrics::new()))
    }

    pub fn with_metrics(store: Arc<dyn ModelStore>, metrics: Arc<TranslationMetrics>) -> Self {
        Self {
            store,
            in_flight: Arc::new(InFlight::default()),
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<TranslationMetrics> {
        &self.metrics
    }

    /// Make sure the model for `language` is on the device.
    ///
    /// Returns immediately if the store already has the model. Otherwise the
    /// caller waits for the language's download episode, starting one if none
    /// is in flight. A failure is the store's cause, shared by every waiter of
    /// the episode.
    pub async fn ensure_downloaded(&self, language: &Language) -> DownloadResult {
        let (receiver, starts_episode) = {
            let mut waiters = self.in_flight.lock();

            if self.store.is_downloaded(language) {
                debug!("Model for {} already downloaded", language.name());
                return Ok(());
            }

            let (sender, receiver) = oneshot::channel();
            let starts_episode = match waiters.entry(language.clone()) {
                Entry::Occupied(mut entry) => {
                    entry.get_mut().push(sender);
                    false
                }
                Entry::Vacant(entry) => {
                    entry.insert(vec![sender]);
                    true
                }
            };
            (receiver, starts_episode)
        };

        // Callers arriving from here on find the entry and wait on this episode,
        // so the store is only asked once even though the lock is released.
        if starts_episode {
            info!("Starting model download for {}", language.name());
            self.metrics.record_download_started();
            let completion = DownloadCompletion {
                language: language.clone(),
                in_flight: Arc::downgrade(&self.in_flight),
                metrics: Arc::clone(&self.metrics),
                reported: false,
            };
            self.store.begin_download(language.clone(), completion);
        } else {
            debug!(
                "Download for {} already in flight, waiting for it",
                language.name()
            );
            self.metrics.record_deduplicated_wait();
        }

        receiver.await.unwrap_or_else(|_| {
            Err(DownloadFailure::msg(format!(
                "download of {} was dropped before completing",
                language
            )))
        })
    }

    /// Whether a download for `language` is currently in flight.
    pub fn is_downloading(&self, language: &Language) -> bool {
        self.in_flight.lock().contains_key(language)
    }

    /// Languages with a download in flight, sorted by code.
    pub fn in_flight(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.in_flight.lock().keys().cloned().collect();
        languages.sort();
        languages
    }
}
