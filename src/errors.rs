/*!
 * Error types for the snaptranslate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors reported by a translation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The language pair has no model in the model store
    #[error("No model available for {0}")]
    ModelUnavailable(String),

    /// Fetching the model failed (network, storage, corrupt data)
    #[error("Model download failed: {0}")]
    DownloadFailed(String),

    /// The engine could not translate the text
    #[error("Translation error: {0}")]
    Translation(String),

    /// The engine gave up waiting on its own backend
    #[error("Operation timed out after {0} ms")]
    Timeout(u64),

    /// The translator was released with `close()`
    #[error("Translator for {0} has been closed")]
    Closed(String),
}

/// Failures surfaced by the session manager.
///
/// Every variant carries a human-readable detail. The type is `Clone` so a single
/// download result can be handed to every caller waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The on-device model could not be fetched
    #[error("Model download failed: {0}")]
    ModelDownloadFailed(String),

    /// The library failed to translate, or the input was empty
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    /// An operation was attempted on a closed session
    #[error("Invalid session state: {0}")]
    InvalidState(String),
}

impl SessionError {
    /// Message shown to the user for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ModelDownloadFailed(_) => "Failed to download model.",
            Self::TranslationFailed(_) => "Translation failed.",
            Self::InvalidState(_) => "Translator is no longer available.",
        }
    }
}

/// Errors that can occur while recognizing text in a captured image
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// Nothing exists at the given path
    #[error("Image not found: {0}")]
    ImageNotFound(String),

    /// The capture exists but could not be read
    #[error("Failed to load image for recognition: {0}")]
    Unreadable(String),
}

/// Errors at the application edge: reading and writing the configuration file
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    /// Configuration that could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Map an engine failure during download to the session taxonomy
pub(crate) fn download_failure(error: EngineError) -> SessionError {
    match error {
        EngineError::Closed(pair) => closed_translator(&pair),
        other => SessionError::ModelDownloadFailed(other.to_string()),
    }
}

/// Map an engine failure during translation to the session taxonomy
pub(crate) fn translation_failure(error: EngineError) -> SessionError {
    match error {
        EngineError::Closed(pair) => closed_translator(&pair),
        other => SessionError::TranslationFailed(other.to_string()),
    }
}

fn closed_translator(pair: &str) -> SessionError {
    SessionError::InvalidState(format!("translator for {} closed", pair))
}
