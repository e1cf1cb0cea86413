/*!
 * Common test utilities for the snaptranslate test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use snaptranslate::SessionManager;
use snaptranslate::engine::MockEngine;

/// Install a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a capture (image placeholder plus transcript) in the directory
pub fn create_test_capture(dir: &Path, stem: &str, transcript: &str) -> Result<PathBuf> {
    let image = create_test_file(dir, &format!("{}.jpg", stem), "not really a jpeg")?;
    create_test_file(dir, &format!("{}.txt", stem), transcript)?;
    Ok(image)
}

/// Creates a phrase-table model in a model store directory
pub fn create_test_model(store_dir: &Path, pair: &str, json: &str) -> Result<PathBuf> {
    fs::create_dir_all(store_dir)?;
    create_test_file(store_dir, &format!("{}.json", pair), json)
}

/// Session manager for en->tr backed by the given mock engine
pub fn manager_for(engine: &MockEngine) -> SessionManager {
    init_logging();
    SessionManager::with_defaults(Arc::new(engine.clone()))
}
