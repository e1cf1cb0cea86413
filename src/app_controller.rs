use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::engine::{PhrasebookEngine, TranslationEngine};
use crate::errors::RecognitionError;
use crate::languages;
use crate::recognition::{TextRecognizer, TranscriptRecognizer};
use crate::session::{SessionManager, TranslationOutcome, TranslationRequest};

// @module: Application controller for capture and translation

/// Shown when recognition finds no text
pub const NO_TEXT_DETECTED: &str = "No text detected.";

/// Shown when recognition itself fails
pub const RECOGNITION_FAILED: &str = "Error detecting text.";

/// Shown when the captured image cannot be opened
pub const IMAGE_LOAD_FAILED: &str = "Failed to load image for recognition.";

/// Text extracted from a capture, or the message replacing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedText {
    /// Recognized text, or a status message when there is none
    pub text: String,
    /// Whether `text` came from the image and may be translated
    pub translatable: bool,
}

impl DetectedText {
    fn message(message: &str) -> Self {
        Self {
            text: message.to_string(),
            translatable: false,
        }
    }
}

/// Everything produced for one capture
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Text extracted from the capture
    pub detected: DetectedText,
    /// Target language the translation was requested in
    pub target_language: String,
    /// Translation result; `None` when there was nothing to translate
    pub outcome: Option<TranslationOutcome>,
}

/// Main application controller for capture translation
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Source of recognized text
    recognizer: Arc<dyn TextRecognizer>,
    // @field: Owner of the live translation session
    sessions: SessionManager,
}

impl Controller {
    // @method: Create a controller using the configured model store
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let engine = PhrasebookEngine::new(&config.models.store_dir, &config.models.cache_dir);
        Ok(Self::new(config, Arc::new(TranscriptRecognizer), Arc::new(engine)))
    }

    /// Create a controller from explicit collaborators
    pub fn new(
        config: Config,
        recognizer: Arc<dyn TextRecognizer>,
        engine: Arc<dyn TranslationEngine>,
    ) -> Self {
        let sessions =
            SessionManager::new(engine, &config.source_language, &config.target_language);
        Self {
            config,
            recognizer,
            sessions,
        }
    }

    /// Configuration the controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Session manager owned by this controller
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Download the start language's model ahead of the first translation.
    ///
    /// Returns whether the model is ready. Failures are logged only; the model
    /// is fetched again when a translation asks for it.
    pub async fn warm_up(&self) -> bool {
        if !self.config.models.preload {
            debug!("Model preload disabled");
            return false;
        }

        match self.sessions.ensure_model_ready().await {
            Ok(()) => {
                info!("Model downloaded successfully");
                true
            }
            Err(e) => {
                warn!("Model download failed: {}", e);
                false
            }
        }
    }

    /// Recognize the text in a captured image
    pub async fn extract_text(&self, image: &Path) -> DetectedText {
        match self.recognizer.recognize(image).await {
            Ok(recognized) if recognized.is_empty() => DetectedText::message(NO_TEXT_DETECTED),
            Ok(recognized) => DetectedText {
                text: recognized.text(),
                translatable: true,
            },
            Err(RecognitionError::ImageNotFound(path)) => {
                error!("Image not found: {}", path);
                DetectedText::message(IMAGE_LOAD_FAILED)
            }
            Err(e) => {
                error!("{}", e);
                DetectedText::message(RECOGNITION_FAILED)
            }
        }
    }

    /// Switch to the requested language, make sure its model is present, then translate
    pub async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome {
        self.sessions.set_target_language(request.target_language());

        if let Err(e) = self.sessions.ensure_model_ready().await {
            warn!("Cannot translate into '{}': {}", request.target_language(), e);
            return TranslationOutcome::Failed(e);
        }

        let outcome: TranslationOutcome = self.sessions.translate(request.text()).await.into();
        if let TranslationOutcome::Failed(e) = &outcome {
            warn!("{}", e);
        }
        outcome
    }

    /// Extract text from a capture and translate it.
    ///
    /// `language` accepts a display name or a code; the configured target is
    /// used when it is `None`.
    pub async fn run(&self, image: &Path, language: Option<&str>) -> Result<ScanReport> {
        let target_language = match language {
            Some(language) => languages::resolve_target_language(language)?,
            None => self.config.target_language.clone(),
        };

        info!("Processing capture: {}", image.display());
        let detected = self.extract_text(image).await;

        let outcome = if detected.translatable {
            let request = TranslationRequest::new(detected.text.clone(), target_language.clone());
            Some(self.translate(&request).await)
        } else {
            None
        };

        Ok(ScanReport {
            detected,
            target_language,
            outcome,
        })
    }
}
