//! Demo binary - translates each argument through the simulated on-device engine
//!
//! Usage:
//!   cargo run -- "hola mundo" "bonjour mon ami"   # Translate the given texts
//!   cargo run                                     # Translate a built-in sample
//!
//! Optional environment variables:
//! - TRANSLATOR_TARGET_LANGUAGE (defaults to en)
//! - TRANSLATOR_SUPPORTED_LANGUAGES (defaults to all)
//! - TRANSLATOR_DOWNLOAD_DELAY_MS (defaults to 250)
//! - TRANSLATOR_PRELOADED_MODELS (defaults to en)

use anyhow::Result;
use futures::future::join_all;
use local_translator::config::Config;
use local_translator::simulated::{DictionaryEngine, InMemoryModelStore, KeywordDetector};
use local_translator::{ModelDownloadCoordinator, TranslationOrchestrator, TranslationRequest};
use std::sync::Arc;
use tracing::info;

const SAMPLE_TEXTS: [&str; 6] = [
    "hola mundo",
    "hola amigo",
    "bonjour mon ami",
    "hello world",
    "こんにちは",
    "",
];

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("local_translator=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let mut texts: Vec<String> = std::env::args().skip(1).collect();
    if texts.is_empty() {
        texts = SAMPLE_TEXTS.iter().map(|t| t.to_string()).collect();
    }

    let store = Arc::new(
        InMemoryModelStore::new(config.download_delay)
            .with_models(config.preloaded_models.iter().cloned()),
    );
    let downloads = Arc::new(ModelDownloadCoordinator::new(store.clone()));
    let orchestrator = TranslationOrchestrator::new(
        Arc::new(KeywordDetector),
        Arc::new(DictionaryEngine::new(store.clone())),
        downloads,
    )
    .with_support_scope(config.support_scope.clone());

    info!(
        "Translating {} texts into {}",
        texts.len(),
        config.target_language.name()
    );

    let requests: Vec<TranslationRequest> = texts
        .into_iter()
        .map(|text| TranslationRequest::new(text, config.target_language.clone()))
        .collect();

    // All requests run concurrently; shared models are downloaded once
    let results = join_all(requests.iter().map(|r| orchestrator.translate(r))).await;

    for (request, result) in requests.iter().zip(results) {
        let line = match result {
            Ok(outcome) => serde_json::to_value(&outcome)?,
            Err(e) => serde_json::json!({
                "original_text": request.text,
                "error": e.kind(),
                "message": e.to_string(),
            }),
        };
        println!("{}", line);
    }

    info!(
        "Models on device: {:?}",
        store
            .downloaded()
            .iter()
            .map(|l| l.code().to_string())
            .collect::<Vec<_>>()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&orchestrator.metrics().report())?
    );

    Ok(())
}
