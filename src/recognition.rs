use async_trait::async_trait;
use log::debug;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::errors::RecognitionError;

// @module: Text recognition collaborators

/// Text found in one captured image, line by line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizedText {
    lines: Vec<String>,
}

impl RecognizedText {
    /// Build from recognized lines; blank lines are dropped
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(Into::into)
                .map(|line| line.trim_end().to_string())
                .filter(|line| !line.trim().is_empty())
                .collect(),
        }
    }

    /// Whether nothing was recognized
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Recognized lines in reading order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Consume the result as a sequence of lines
    pub fn into_lines(self) -> impl Iterator<Item = String> {
        self.lines.into_iter()
    }

    /// All lines joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Recognizes text in a captured image
#[async_trait]
pub trait TextRecognizer: Send + Sync + Debug {
    /// Run recognition on the image at `image`
    async fn recognize(&self, image: &Path) -> Result<RecognizedText, RecognitionError>;
}

/// Recognizer that reads a transcript produced by an external OCR step.
///
/// For `photo.jpg` it reads `photo.txt`; a path that already points at a
/// `.txt` file is read directly.
#[derive(Debug, Clone, Default)]
pub struct TranscriptRecognizer;

impl TranscriptRecognizer {
    // @returns: Path of the transcript belonging to an image
    pub fn transcript_path(image: &Path) -> PathBuf {
        let is_text = image
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

        if is_text {
            image.to_path_buf()
        } else {
            image.with_extension("txt")
        }
    }
}

#[async_trait]
impl TextRecognizer for TranscriptRecognizer {
    async fn recognize(&self, image: &Path) -> Result<RecognizedText, RecognitionError> {
        let exists = tokio::fs::try_exists(image)
            .await
            .map_err(|e| RecognitionError::Unreadable(format!("{}: {}", image.display(), e)))?;
        if !exists {
            return Err(RecognitionError::ImageNotFound(image.display().to_string()));
        }

        let transcript = Self::transcript_path(image);
        let content = tokio::fs::read_to_string(&transcript)
            .await
            .map_err(|e| RecognitionError::Unreadable(format!("{}: {}", transcript.display(), e)))?;

        let text = RecognizedText::from_lines(content.lines());
        debug!("Recognized {} line(s) in {}", text.lines.len(), image.display());
        Ok(text)
    }
}
