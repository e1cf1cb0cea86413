/*!
 * Integration tests for the capture-to-translation workflow
 */

use anyhow::Result;
use std::sync::Arc;

use snaptranslate::app_config::Config;
use snaptranslate::app_controller::{
    Controller, IMAGE_LOAD_FAILED, NO_TEXT_DETECTED, RECOGNITION_FAILED,
};
use snaptranslate::engine::MockEngine;
use snaptranslate::recognition::TranscriptRecognizer;
use snaptranslate::session::TranslationRequest;
use snaptranslate::{SessionState, TranslationOutcome};

use crate::common;

fn config_with_dirs(store: &std::path::Path, cache: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.models.store_dir = store.to_path_buf();
    config.models.cache_dir = cache.to_path_buf();
    config
}

fn mock_controller(engine: &MockEngine) -> Controller {
    common::init_logging();
    Controller::new(
        Config::default(),
        Arc::new(TranscriptRecognizer),
        Arc::new(engine.clone()),
    )
}

/// Full run with the phrasebook engine and a transcript on disk
#[tokio::test]
async fn test_run_withPhrasebookModel_shouldTranslateCapture() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let store = temp_dir.path().join("store");
    let cache = temp_dir.path().join("cache");
    let model = r#"{"hello": "merhaba", "world": "dünya", "thank you": "teşekkürler"}"#;
    common::create_test_model(&store, "en-tr", model)?;
    let image = common::create_test_capture(temp_dir.path(), "sign", "Hello world\n\nThank you\n")?;

    let controller = Controller::with_config(config_with_dirs(&store, &cache))?;
    assert!(controller.warm_up().await);

    let report = controller.run(&image, Some("Turkish")).await?;

    assert_eq!(report.detected.text, "Hello world\nThank you");
    assert!(report.detected.translatable);
    assert_eq!(report.target_language, "tr");
    assert_eq!(
        report.outcome,
        Some(TranslationOutcome::Translated("merhaba dünya\nteşekkürler".to_string()))
    );
    assert!(cache.join("en-tr.json").exists());
    Ok(())
}

/// Switching to a language without a model reports the download failure
#[tokio::test]
async fn test_run_withMissingModel_shouldReportDownloadFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store = temp_dir.path().join("store");
    let cache = temp_dir.path().join("cache");
    common::create_test_model(&store, "en-tr", r#"{"hello": "merhaba"}"#)?;
    let image = common::create_test_capture(temp_dir.path(), "menu", "Hello")?;

    let controller = Controller::with_config(config_with_dirs(&store, &cache))?;
    let report = controller.run(&image, Some("de")).await?;

    let outcome = report.outcome.expect("text was detected");
    assert_eq!(outcome.message(), "Failed to download model.");
    assert_eq!(controller.sessions().target_language().as_deref(), Some("de"));
    assert_eq!(controller.sessions().state(), SessionState::Uninitialized);
    Ok(())
}

/// Unknown languages are rejected before anything runs
#[tokio::test]
async fn test_run_withUnsupportedLanguage_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let image = common::create_test_capture(temp_dir.path(), "note", "Hello")?;

    let engine = MockEngine::working();
    let controller = mock_controller(&engine);

    assert!(controller.run(&image, Some("Klingon")).await.is_err());
    assert!(controller.run(&image, Some("pt")).await.is_err());
    assert_eq!(engine.stats().downloads(), 0);
    Ok(())
}

/// An empty transcript yields the "no text" message and no translation
#[tokio::test]
async fn test_run_withEmptyTranscript_shouldSkipTranslation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let image = common::create_test_capture(temp_dir.path(), "blank", "\n  \n")?;

    let engine = MockEngine::working();
    let controller = mock_controller(&engine);

    let report = controller.run(&image, None).await?;

    assert_eq!(report.detected.text, NO_TEXT_DETECTED);
    assert!(!report.detected.translatable);
    assert!(report.outcome.is_none());
    assert_eq!(engine.stats().translations(), 0);
    Ok(())
}

/// Recognition failures map to their user messages
#[tokio::test]
async fn test_extractText_withBrokenCaptures_shouldReturnMessages() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let engine = MockEngine::working();
    let controller = mock_controller(&engine);

    let missing = controller.extract_text(&temp_dir.path().join("nothing.jpg")).await;
    assert_eq!(missing.text, IMAGE_LOAD_FAILED);

    // Image present but no transcript next to it
    let lonely = common::create_test_file(temp_dir.path(), "lonely.jpg", "jpeg")?;
    let unreadable = controller.extract_text(&lonely).await;
    assert_eq!(unreadable.text, RECOGNITION_FAILED);
    assert!(!unreadable.translatable);
    Ok(())
}

/// Each translate action swaps the session for the requested language
#[tokio::test]
async fn test_translate_shouldSwapSessionPerRequest() {
    let engine = MockEngine::working()
        .with_phrase("es", "Hello", "Hola")
        .with_phrase("de", "Hello", "Hallo");
    let stats = engine.stats();
    let controller = mock_controller(&engine);

    let spanish = controller.translate(&TranslationRequest::new("Hello", "es")).await;
    let german = controller.translate(&TranslationRequest::new("Hello", "de")).await;

    assert_eq!(spanish.message(), "Hola");
    assert_eq!(german.message(), "Hallo");
    assert_eq!(stats.live(), 1);
    assert_eq!(controller.sessions().target_language().as_deref(), Some("de"));
}

/// Warm-up failures are not fatal
#[tokio::test]
async fn test_warmUp_withFailingDownload_shouldReturnFalse() {
    let engine = MockEngine::failing_download();
    let controller = mock_controller(&engine);

    assert!(!controller.warm_up().await);
    assert!(!controller.sessions().model_ready());
}

/// Preloading can be switched off
#[tokio::test]
async fn test_warmUp_withPreloadDisabled_shouldNotDownload() {
    let engine = MockEngine::working();
    let mut config = Config::default();
    config.models.preload = false;
    let controller =
        Controller::new(config, Arc::new(TranscriptRecognizer), Arc::new(engine.clone()));

    assert!(!controller.warm_up().await);
    assert_eq!(engine.stats().downloads(), 0);
}
