/*!
 * Phrase-table translation engine.
 *
 * Models are JSON objects mapping source phrases to target phrases, stored as
 * `<source>-<target>.json` in a model store directory. Downloading a model
 * copies it into the local model cache, after which translation runs entirely
 * from memory.
 */

use async_trait::async_trait;
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::NamedTempFile;

use crate::engine::{TranslationEngine, Translator};
use crate::errors::EngineError;
use crate::languages::LanguagePair;

/// Engine serving phrase-table models from a local store
#[derive(Debug, Clone)]
pub struct PhrasebookEngine {
    /// Directory models are fetched from
    store_dir: PathBuf,
    /// Directory downloaded models live in
    cache_dir: PathBuf,
}

impl PhrasebookEngine {
    /// Create an engine over the given store and cache directories
    pub fn new(store_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Directory models are fetched from
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Directory downloaded models live in
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

impl TranslationEngine for PhrasebookEngine {
    fn create_translator(&self, pair: &LanguagePair) -> Arc<dyn Translator> {
        Arc::new(PhrasebookTranslator::new(
            pair.clone(),
            &self.store_dir,
            &self.cache_dir,
        ))
    }
}

/// Translator for one pair, backed by a phrase table
#[derive(Debug)]
pub struct PhrasebookTranslator {
    pair: LanguagePair,
    store_path: PathBuf,
    cache_path: PathBuf,
    /// Loaded phrase table, keyed by lowercased phrase
    table: RwLock<Option<HashMap<String, String>>>,
    closed: AtomicBool,
}

impl PhrasebookTranslator {
    fn new(pair: LanguagePair, store_dir: &Path, cache_dir: &Path) -> Self {
        let file_name = format!("{}.json", pair.model_name());
        Self {
            store_path: store_dir.join(&file_name),
            cache_path: cache_dir.join(&file_name),
            pair,
            table: RwLock::new(None),
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<(), EngineError> {
        if self.closed.load(Ordering::SeqCst) {
            Err(EngineError::Closed(self.pair.to_string()))
        } else {
            Ok(())
        }
    }

    /// Directory holding the cached model
    fn cache_dir(&self) -> &Path {
        match self.cache_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Read the model already on the device, if there is a usable one.
    ///
    /// A cached file that no longer parses is removed so it can be fetched again.
    async fn load_cached(&self) -> Result<Option<HashMap<String, String>>, EngineError> {
        let cached = tokio::fs::try_exists(&self.cache_path)
            .await
            .map_err(|e| io_failure(&self.cache_path, e))?;
        if !cached {
            return Ok(None);
        }

        let raw = tokio::fs::read(&self.cache_path)
            .await
            .map_err(|e| io_failure(&self.cache_path, e))?;

        match parse_model(&self.pair, &raw) {
            Ok(table) => {
                debug!("Model {} already on device", self.pair);
                Ok(Some(table))
            }
            Err(e) => {
                warn!("Cached model {} is unusable, fetching it again: {}", self.pair, e);
                match tokio::fs::remove_file(&self.cache_path).await {
                    Ok(()) => Ok(None),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(io_failure(&self.cache_path, e)),
                }
            }
        }
    }

    /// Copy the model from the store into the cache and return its phrase table
    async fn fetch(&self) -> Result<HashMap<String, String>, EngineError> {
        self.ensure_open()?;

        let available = tokio::fs::try_exists(&self.store_path)
            .await
            .map_err(|e| io_failure(&self.store_path, e))?;
        if !available {
            return Err(EngineError::ModelUnavailable(self.pair.to_string()));
        }

        let raw = tokio::fs::read(&self.store_path)
            .await
            .map_err(|e| io_failure(&self.store_path, e))?;

        // A model that does not parse never reaches the cache
        let table = parse_model(&self.pair, &raw)?;

        let cache_dir = self.cache_dir();
        tokio::fs::create_dir_all(cache_dir)
            .await
            .map_err(|e| io_failure(cache_dir, e))?;

        // Each download writes its own temporary file; the rename into place is atomic
        let partial = NamedTempFile::new_in(cache_dir).map_err(|e| io_failure(cache_dir, e))?;
        tokio::fs::write(partial.path(), &raw)
            .await
            .map_err(|e| io_failure(partial.path(), e))?;

        self.ensure_open()?;
        partial
            .persist(&self.cache_path)
            .map_err(|e| io_failure(&self.cache_path, e.error))?;

        info!("Downloaded model {} into {}", self.pair, self.cache_path.display());
        Ok(table)
    }
}

#[async_trait]
impl Translator for PhrasebookTranslator {
    fn pair(&self) -> &LanguagePair {
        &self.pair
    }

    async fn download_model_if_needed(&self) -> Result<(), EngineError> {
        self.ensure_open()?;

        if self.table.read().is_some() {
            return Ok(());
        }

        let table = match self.load_cached().await? {
            Some(table) => table,
            None => self.fetch().await?,
        };

        debug!("Loaded {} phrases for {}", table.len(), self.pair);

        // close() may have run while the model was being read
        self.ensure_open()?;
        *self.table.write() = Some(table);
        Ok(())
    }

    async fn translate(&self, text: &str) -> Result<String, EngineError> {
        self.ensure_open()?;

        let guard = self.table.read();
        let table = guard
            .as_ref()
            .ok_or_else(|| EngineError::Translation(format!("model {} is not loaded", self.pair)))?;

        Ok(text
            .lines()
            .map(|line| translate_line(table, line))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.table.write().take();
            debug!("Released phrase table for {}", self.pair);
        }
    }
}

/// Parse a model file into a phrase table keyed by lowercased phrase
fn parse_model(pair: &LanguagePair, raw: &[u8]) -> Result<HashMap<String, String>, EngineError> {
    let entries: HashMap<String, String> = serde_json::from_slice(raw)
        .map_err(|e| EngineError::DownloadFailed(format!("corrupt model {}: {}", pair, e)))?;

    Ok(entries
        .into_iter()
        .map(|(phrase, translation)| (phrase.trim().to_lowercase(), translation))
        .collect())
}

fn io_failure(path: &Path, error: std::io::Error) -> EngineError {
    EngineError::DownloadFailed(format!("{}: {}", path.display(), error))
}

/// Translate one line: whole-line phrase first, then word by word
fn translate_line(table: &HashMap<String, String>, line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some(translation) = table.get(&trimmed.to_lowercase()) {
        return translation.clone();
    }

    trimmed
        .split_whitespace()
        .map(|token| translate_token(table, token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Translate a single token, keeping surrounding punctuation
fn translate_token(table: &HashMap<String, String>, token: &str) -> String {
    let start = token
        .find(|c: char| c.is_alphanumeric())
        .unwrap_or(token.len());
    let end = token
        .rfind(|c: char| c.is_alphanumeric())
        .map(|i| i + token[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(start);

    if start >= end {
        return token.to_string();
    }

    let (prefix, rest) = token.split_at(start);
    let (core, suffix) = rest.split_at(end - start);

    match table.get(&core.to_lowercase()) {
        Some(translation) => format!("{}{}{}", prefix, translation, suffix),
        None => token.to_string(),
    }
}
