use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::languages::{self, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language captures are written in (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Language selected for translation at start (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Model locations
    #[serde(default)]
    pub models: ModelConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where translation models come from and where they are kept
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ModelConfig {
    /// Directory models are downloaded from
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,

    /// Directory downloaded models are kept in
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Download the start language's model before the first capture
    #[serde(default = "default_true")]
    pub preload: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            cache_dir: default_cache_dir(),
            preload: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.to_string()
}

fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_cache_dir() -> PathBuf {
    // Fall back to a directory next to the config when the platform has no cache dir
    dirs::cache_dir()
        .map(|dir| dir.join("snaptranslate").join("models"))
        .unwrap_or_else(|| PathBuf::from(".snaptranslate").join("models"))
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        languages::validate_language_code(&self.source_language)
            .context("Invalid source language")?;

        if !languages::is_supported_target(&self.target_language) {
            return Err(anyhow!(
                "Target language '{}' is not supported. Supported: {}",
                self.target_language,
                languages::supported_names().join(", ")
            ));
        }

        if languages::language_codes_match(&self.source_language, &self.target_language) {
            let name = languages::get_language_name(&self.source_language)?;
            return Err(anyhow!("Source and target language are both {}", name));
        }

        if self.models.store_dir.as_os_str().is_empty() {
            return Err(anyhow!("Model store directory must not be empty"));
        }

        if self.models.cache_dir.as_os_str().is_empty() {
            return Err(anyhow!("Model cache directory must not be empty"));
        }

        Ok(())
    }

    /// Load the configuration file, or write a default one if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self, AppError> {
        if path.exists() {
            let file = File::open(path)?;
            let config: Config = serde_json::from_reader(BufReader::new(file))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let config_json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, config_json)?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            models: ModelConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
