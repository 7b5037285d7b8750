//! Translate text with on-device language models that are downloaded on demand.
//!
//! The crate is the orchestration layer around an external on-device engine:
//!
//! - [`download::ModelDownloadCoordinator`] runs at most one download per
//!   language and fans the outcome out to every caller waiting on it.
//! - [`translation::TranslationOrchestrator`] detects the source language,
//!   applies the support scope, translates, downloads missing models and
//!   retries the engine once.
//!
//! Detection, model storage and translation are supplied through the traits
//! in [`engine`]; [`simulated`] has in-memory implementations.

pub mod config;
pub mod download;
pub mod engine;
pub mod error;
pub mod i18n;
pub mod metrics;
pub mod simulated;
pub mod translation;

pub use download::{DownloadCompletion, ModelDownloadCoordinator};
pub use engine::{Detection, LanguageDetector, ModelStore, TranslationEngine};
pub use error::{DownloadFailure, EngineError, TranslatorError};
pub use i18n::{Language, LanguageSupportScope};
pub use translation::{TranslationOrchestrator, TranslationOutcome, TranslationRequest};
