/*!
 * A single translation session and its state machine.
 *
 * `Uninitialized -> Downloading -> Ready` on success,
 * `Uninitialized -> Downloading -> Uninitialized` when the download fails,
 * and any state `-> Closed` once the session is superseded or torn down.
 * `Closed` is terminal.
 */

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::engine::Translator;
use crate::errors::{EngineError, SessionError, download_failure, translation_failure};
use crate::languages::LanguagePair;

use super::models::{SessionInfo, SessionResult, SessionState};

/// Download future shared by every caller waiting on the same attempt
type SharedDownload = Shared<BoxFuture<'static, SessionResult<()>>>;

enum Slot {
    Uninitialized,
    Downloading {
        attempt: u64,
        download: SharedDownload,
    },
    Ready,
    Closed,
}

impl Slot {
    fn state(&self) -> SessionState {
        match self {
            Self::Uninitialized => SessionState::Uninitialized,
            Self::Downloading { .. } => SessionState::Downloading,
            Self::Ready => SessionState::Ready,
            Self::Closed => SessionState::Closed,
        }
    }
}

/// One configured translator bound to a language pair
pub struct TranslationSession {
    id: String,
    pair: LanguagePair,
    translator: Arc<dyn Translator>,
    slot: Mutex<Slot>,
    attempts: AtomicU64,
}

impl TranslationSession {
    /// Wrap a freshly created translator in a new, uninitialized session
    pub fn new(id: impl Into<String>, translator: Arc<dyn Translator>) -> Arc<Self> {
        let pair = translator.pair().clone();
        Arc::new(Self {
            id: id.into(),
            pair,
            translator,
            slot: Mutex::new(Slot::Uninitialized),
            attempts: AtomicU64::new(0),
        })
    }

    /// Session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Shortened ID for log lines
    fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(8)]
    }

    /// Language pair served by this session
    pub fn pair(&self) -> &LanguagePair {
        &self.pair
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.slot.lock().state()
    }

    /// Whether the model has been downloaded and the session is still open
    pub fn model_ready(&self) -> bool {
        self.state() == SessionState::Ready
    }

    /// Snapshot for display
    pub fn info(&self) -> SessionInfo {
        let state = self.state();
        SessionInfo {
            id: self.id.clone(),
            source_language: self.pair.source.clone(),
            target_language: self.pair.target.clone(),
            state,
            model_ready: state == SessionState::Ready,
        }
    }

    /// Make sure the model for this session is on the device.
    ///
    /// Concurrent callers share one download: the first caller starts it and
    /// every caller arriving while it is in flight awaits the same result.
    pub async fn ensure_model_ready(self: &Arc<Self>) -> SessionResult<()> {
        let download = {
            let mut slot = self.slot.lock();
            match &*slot {
                Slot::Ready => return Ok(()),
                Slot::Closed => return Err(self.closed_error()),
                Slot::Downloading { download, .. } => {
                    debug!("Session {} joining in-flight download", self.short_id());
                    download.clone()
                }
                Slot::Uninitialized => {
                    let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    debug!(
                        "Session {} downloading model {} (attempt {})",
                        self.short_id(),
                        self.pair,
                        attempt
                    );
                    let download = self.start_download(attempt);
                    *slot = Slot::Downloading {
                        attempt,
                        download: download.clone(),
                    };
                    download
                }
            }
        };

        download.await
    }

    /// Translate text, downloading the model first when needed
    pub async fn translate(self: &Arc<Self>, text: &str) -> SessionResult<String> {
        if self.state() == SessionState::Closed {
            return Err(self.closed_error());
        }

        if text.trim().is_empty() {
            return Err(SessionError::TranslationFailed(
                "input text is empty".to_string(),
            ));
        }

        self.ensure_model_ready().await?;

        self.translator
            .translate(text)
            .await
            .map_err(translation_failure)
    }

    /// Close the session and release its translator. Idempotent.
    pub fn close(&self) {
        let previous = std::mem::replace(&mut *self.slot.lock(), Slot::Closed);
        if matches!(previous, Slot::Closed) {
            return;
        }

        if matches!(previous, Slot::Downloading { .. }) {
            debug!(
                "Session {} closed with a download in flight; its result will be discarded",
                self.short_id()
            );
        }

        self.translator.close();
        info!("Closed translation session {} ({})", self.short_id(), self.pair);
    }

    fn start_download(self: &Arc<Self>, attempt: u64) -> SharedDownload {
        let session = Arc::downgrade(self);
        let translator = Arc::clone(&self.translator);

        async move {
            let result = translator.download_model_if_needed().await;
            finish_download(session, attempt, result)
        }
        .boxed()
        .shared()
    }

    /// Apply a download result, unless the session moved on in the meantime
    fn complete_download(
        &self,
        attempt: u64,
        result: Result<(), EngineError>,
    ) -> SessionResult<()> {
        let mut slot = self.slot.lock();

        if matches!(*slot, Slot::Closed) {
            warn!(
                "Discarding model download result for closed session {} ({})",
                self.short_id(),
                self.pair
            );
            return Err(self.closed_error());
        }

        let owns_slot = matches!(
            &*slot,
            Slot::Downloading { attempt: current, .. } if *current == attempt
        );
        if !owns_slot {
            return result.map_err(download_failure);
        }

        match result {
            Ok(()) => {
                *slot = Slot::Ready;
                info!("Model {} ready for session {}", self.pair, self.short_id());
                Ok(())
            }
            Err(error) => {
                *slot = Slot::Uninitialized;
                warn!("Model download for {} failed: {}", self.pair, error);
                Err(download_failure(error))
            }
        }
    }

    fn closed_error(&self) -> SessionError {
        SessionError::InvalidState(format!(
            "session {} ({}) is closed",
            self.short_id(),
            self.pair
        ))
    }
}

fn finish_download(
    session: Weak<TranslationSession>,
    attempt: u64,
    result: Result<(), EngineError>,
) -> SessionResult<()> {
    match session.upgrade() {
        Some(session) => session.complete_download(attempt, result),
        None => Err(SessionError::InvalidState(
            "session dropped before its model download finished".to_string(),
        )),
    }
}

impl fmt::Debug for TranslationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationSession")
            .field("id", &self.id)
            .field("pair", &self.pair)
            .field("state", &self.state())
            .finish()
    }
}
