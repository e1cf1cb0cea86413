/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::path::PathBuf;

use snaptranslate::app_config::{Config, LogLevel};
use snaptranslate::errors::AppError;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "tr");
    assert_eq!(config.models.store_dir, PathBuf::from("models"));
    assert!(config.models.cache_dir.ends_with("models"));
    assert!(config.models.preload);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    // Invalid source language
    config.source_language = "xyz1".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();

    // Unsupported target language
    config.target_language = "pt".to_string();
    assert!(config.validate().is_err());

    // Same language on both sides
    config.source_language = "es".to_string();
    config.target_language = "spa".to_string();
    let error = config.validate().unwrap_err();
    assert_eq!(error.to_string(), "Source and target language are both Spanish");
    config.source_language = "en".to_string();

    // Empty model store
    config.target_language = "es".to_string();
    config.models.store_dir = PathBuf::new();
    assert!(config.validate().is_err());
    config.models.store_dir = PathBuf::from("models");

    assert!(config.validate().is_ok());
}

/// Missing config files are created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.target_language, "tr");

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.source_language, config.source_language);
    assert_eq!(reloaded.models.cache_dir, config.models.cache_dir);
    Ok(())
}

/// Partial config files are completed with defaults
#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let json = r#"{
        "target_language": "ja",
        "log_level": "debug",
        "models": { "store_dir": "/srv/models" }
    }"#;
    let path = common::create_test_file(temp_dir.path(), "conf.json", json)?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "ja");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.models.store_dir, PathBuf::from("/srv/models"));
    assert!(config.models.preload);
    Ok(())
}

/// Broken JSON is reported, not replaced
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let result = Config::load_or_create(&path);
    assert!(matches!(result, Err(AppError::Config(_))));
    assert_eq!(std::fs::read_to_string(&path)?, "{ not json");
    Ok(())
}

/// Unwritable locations are reported as file errors
#[test]
fn test_load_or_create_withMissingDirectory_shouldReportFileError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("missing").join("conf.json");

    let result = Config::load_or_create(&path);

    assert!(matches!(result, Err(AppError::File(_))));
    assert!(!path.exists());
    Ok(())
}

/// Log levels map onto the log facade
#[test]
fn test_log_level_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
