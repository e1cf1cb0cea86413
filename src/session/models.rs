/*!
 * Session-specific models.
 *
 * Value types exchanged between the session manager and its callers.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::SessionError;

/// Result type used by session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Lifecycle state of a translation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Created, model not fetched yet (or the last fetch failed)
    Uninitialized,
    /// A model download is in flight
    Downloading,
    /// The model is on the device and translation can run
    Ready,
    /// Superseded or torn down; terminal
    Closed,
}

impl SessionState {
    /// Whether the session still holds resources
    pub fn is_live(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::Downloading => "downloading",
            Self::Ready => "ready",
            Self::Closed => "closed",
        };
        write!(f, "{}", label)
    }
}

/// Snapshot of a session for display and logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Session ID
    pub id: String,
    /// Source language
    pub source_language: String,
    /// Target language
    pub target_language: String,
    /// Current lifecycle state
    pub state: SessionState,
    /// Whether the model has been downloaded
    pub model_ready: bool,
}

/// One translate action requested by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    target_language: String,
}

impl TranslationRequest {
    /// Create a request for the given text and target
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
        }
    }

    /// Text to translate
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Target language code
    pub fn target_language(&self) -> &str {
        &self.target_language
    }
}

/// Result of a translate action as presented to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The translated text
    Translated(String),
    /// Why no translation is available
    Failed(SessionError),
}

impl TranslationOutcome {
    /// Text to show on the result screen
    pub fn message(&self) -> &str {
        match self {
            Self::Translated(text) => text,
            Self::Failed(error) => error.user_message(),
        }
    }

    /// Whether a translation was produced
    pub fn is_translated(&self) -> bool {
        matches!(self, Self::Translated(_))
    }
}

impl From<SessionResult<String>> for TranslationOutcome {
    fn from(result: SessionResult<String>) -> Self {
        match result {
            Ok(text) => Self::Translated(text),
            Err(error) => Self::Failed(error),
        }
    }
}
