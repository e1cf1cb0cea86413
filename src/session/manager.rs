/*!
 * Session manager for the translation session lifecycle.
 *
 * The manager owns exactly one live `TranslationSession`. Changing the target
 * language closes the current session before its replacement is built, so at
 * most one translator holds resources at any time.
 */

use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

use crate::engine::TranslationEngine;
use crate::errors::SessionError;
use crate::languages::{self, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE, LanguagePair};

use super::lifecycle::TranslationSession;
use super::models::{SessionInfo, SessionResult, SessionState};

/// Session manager mediating every translation request
#[derive(Debug)]
pub struct SessionManager {
    /// Engine translators are built from
    engine: Arc<dyn TranslationEngine>,
    /// Source language shared by every session
    source_language: String,
    /// Live session; `None` once the manager has shut down
    current: Mutex<Option<Arc<TranslationSession>>>,
}

impl SessionManager {
    /// Create a manager with an initial session for the given pair
    pub fn new(
        engine: Arc<dyn TranslationEngine>,
        source_language: impl Into<String>,
        target_language: &str,
    ) -> Self {
        let source_language = source_language.into();
        let session = build_session(engine.as_ref(), &source_language, target_language);

        Self {
            engine,
            source_language,
            current: Mutex::new(Some(session)),
        }
    }

    /// Create a manager translating English into the default target
    pub fn with_defaults(engine: Arc<dyn TranslationEngine>) -> Self {
        Self::new(engine, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE)
    }

    /// Source language of every session
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Replace the current session with one for a new target language.
    ///
    /// The previous session is closed before the new one is built. Never fails;
    /// after `shutdown` the call is ignored.
    pub fn set_target_language(&self, code: &str) {
        let mut current = self.current.lock();

        let Some(previous) = current.take() else {
            warn!("Ignoring target language change to '{}': session manager is shut down", code);
            return;
        };

        previous.close();

        let session = build_session(self.engine.as_ref(), &self.source_language, code);
        *current = Some(session);
    }

    /// Handle to the live session
    pub fn current_session(&self) -> SessionResult<Arc<TranslationSession>> {
        self.current
            .lock()
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(shut_down_error)
    }

    /// Download the current session's model unless it is already on the device
    pub async fn ensure_model_ready(&self) -> SessionResult<()> {
        let session = self.current_session()?;
        session.ensure_model_ready().await
    }

    /// Translate text with the current session
    pub async fn translate(&self, text: &str) -> SessionResult<String> {
        let session = self.current_session()?;
        session.translate(text).await
    }

    /// Whether the current session's model is ready
    pub fn model_ready(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|session| session.model_ready())
    }

    /// Target language of the current session
    pub fn target_language(&self) -> Option<String> {
        self.current
            .lock()
            .as_ref()
            .map(|session| session.pair().target.clone())
    }

    /// State of the current session, `Closed` after shutdown
    pub fn state(&self) -> SessionState {
        self.current
            .lock()
            .as_ref()
            .map_or(SessionState::Closed, |session| session.state())
    }

    /// Snapshot of the current session
    pub fn session_info(&self) -> Option<SessionInfo> {
        self.current.lock().as_ref().map(|session| session.info())
    }

    /// Close the live session; every later call resolves `InvalidState`
    pub fn shutdown(&self) {
        if let Some(session) = self.current.lock().take() {
            session.close();
            debug!("Session manager shut down");
        }
    }

    /// Whether `shutdown` has run
    pub fn is_shut_down(&self) -> bool {
        self.current.lock().is_none()
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn build_session(
    engine: &dyn TranslationEngine,
    source_language: &str,
    target_language: &str,
) -> Arc<TranslationSession> {
    let target = target_language.trim().to_lowercase();
    if !languages::is_supported_target(&target) {
        warn!("Target language '{}' is not in the supported list", target);
    }

    let pair = LanguagePair::new(source_language, target);
    let translator = engine.create_translator(&pair);
    let session = TranslationSession::new(Uuid::new_v4().to_string(), translator);

    info!("Created translation session {} ({})", &session.id()[..8], pair);
    session
}

fn shut_down_error() -> SessionError {
    SessionError::InvalidState("session manager is shut down".to_string())
}
