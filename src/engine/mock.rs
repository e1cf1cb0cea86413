/*!
 * Mock engine implementation for testing.
 *
 * This module provides a scriptable engine whose translators simulate
 * different behaviors:
 * - `MockEngine::working()` - Downloads and translates successfully
 * - `MockEngine::failing_download()` - Every model download fails
 * - `MockEngine::failing_translation()` - Downloads succeed, translations fail
 *
 * Downloads can additionally be held behind a gate so tests control exactly
 * when they resolve.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Semaphore;

use crate::engine::{TranslationEngine, Translator};
use crate::errors::EngineError;
use crate::languages::LanguagePair;

/// Behavior mode for the mock engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Downloads and translations succeed
    Working,
    /// Every download fails
    FailingDownload,
    /// Downloads succeed, translations fail
    FailingTranslation,
    /// Translations report a library timeout
    TimingOut { after_ms: u64 },
}

/// Call counters shared by an engine and all its translators
#[derive(Debug, Default)]
pub struct MockStats {
    created: AtomicUsize,
    closed: AtomicUsize,
    downloads: AtomicUsize,
    translations: AtomicUsize,
}

impl MockStats {
    /// Translators built so far
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Translators released so far
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Translators built and not yet released
    pub fn live(&self) -> usize {
        self.created() - self.closed()
    }

    /// Download attempts across all translators
    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    /// Translate calls that reached a translator
    pub fn translations(&self) -> usize {
        self.translations.load(Ordering::SeqCst)
    }
}

/// Mock engine for testing session behavior
#[derive(Debug, Clone)]
pub struct MockEngine {
    behavior: MockBehavior,
    /// Per-target phrase tables
    phrases: Arc<Mutex<HashMap<String, HashMap<String, String>>>>,
    /// Targets whose downloads fail regardless of behavior
    failing_targets: Arc<Mutex<Vec<String>>>,
    /// Optional gate every download must pass through
    download_gate: Option<Arc<Semaphore>>,
    stats: Arc<MockStats>,
}

impl MockEngine {
    /// Create a new mock engine with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            phrases: Arc::new(Mutex::new(HashMap::new())),
            failing_targets: Arc::new(Mutex::new(Vec::new())),
            download_gate: None,
            stats: Arc::new(MockStats::default()),
        }
    }

    /// Create an engine whose translators always succeed
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an engine whose downloads always fail
    pub fn failing_download() -> Self {
        Self::new(MockBehavior::FailingDownload)
    }

    /// Create an engine whose translations always fail
    pub fn failing_translation() -> Self {
        Self::new(MockBehavior::FailingTranslation)
    }

    /// Register a known translation for a target language
    pub fn with_phrase(self, target: &str, source_text: &str, translation: &str) -> Self {
        self.phrases
            .lock()
            .entry(target.to_string())
            .or_default()
            .insert(source_text.to_string(), translation.to_string());
        self
    }

    /// Make downloads for one target fail
    pub fn with_failing_target(self, target: &str) -> Self {
        self.failing_targets.lock().push(target.to_string());
        self
    }

    /// Hold every download until the returned gate receives a permit
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.download_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Shared call counters
    pub fn stats(&self) -> Arc<MockStats> {
        Arc::clone(&self.stats)
    }
}

impl TranslationEngine for MockEngine {
    fn create_translator(&self, pair: &LanguagePair) -> Arc<dyn Translator> {
        self.stats.created.fetch_add(1, Ordering::SeqCst);
        Arc::new(MockTranslator {
            pair: pair.clone(),
            engine: self.clone(),
            closed: AtomicBool::new(false),
        })
    }
}

/// Translator produced by `MockEngine`
#[derive(Debug)]
pub struct MockTranslator {
    pair: LanguagePair,
    engine: MockEngine,
    closed: AtomicBool,
}

impl MockTranslator {
    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn pair(&self) -> &LanguagePair {
        &self.pair
    }

    async fn download_model_if_needed(&self) -> Result<(), EngineError> {
        self.engine.stats.downloads.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.engine.download_gate {
            gate.acquire()
                .await
                .map_err(|_| EngineError::DownloadFailed("download gate closed".to_string()))?
                .forget();
        }

        let target_fails = self
            .engine
            .failing_targets
            .lock()
            .iter()
            .any(|t| t == &self.pair.target);

        if target_fails || self.engine.behavior == MockBehavior::FailingDownload {
            return Err(EngineError::DownloadFailed(format!(
                "Simulated download failure for {}",
                self.pair
            )));
        }

        Ok(())
    }

    async fn translate(&self, text: &str) -> Result<String, EngineError> {
        self.engine.stats.translations.fetch_add(1, Ordering::SeqCst);

        if self.is_closed() {
            return Err(EngineError::Closed(self.pair.to_string()));
        }

        match self.engine.behavior {
            MockBehavior::FailingTranslation => Err(EngineError::Translation(
                "Simulated translation failure".to_string(),
            )),
            MockBehavior::TimingOut { after_ms } => Err(EngineError::Timeout(after_ms)),
            _ => {
                let known = self
                    .engine
                    .phrases
                    .lock()
                    .get(&self.pair.target)
                    .and_then(|table| table.get(text).cloned());

                Ok(known.unwrap_or_else(|| format!("[{}] {}", self.pair.target, text)))
            }
        }
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.engine.stats.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}
