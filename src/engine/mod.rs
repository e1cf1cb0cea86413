/*!
 * Translation engine implementations.
 *
 * An engine builds translators, one per language pair. Each translator owns the
 * on-device model for its pair:
 * - `phrasebook`: phrase-table engine backed by a local model store
 * - `mock`: scriptable engine used by the test suite
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::EngineError;
use crate::languages::LanguagePair;

/// A translator configured for a single language pair
///
/// Implementations may be expensive to keep alive once their model is loaded,
/// which is why `close` exists: after it returns the translator must release
/// whatever it holds and refuse further work.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// The pair this translator was built for
    fn pair(&self) -> &LanguagePair;

    /// Fetch the model for this pair unless it is already on the device
    ///
    /// # Returns
    /// * `Result<(), EngineError>` - Ok once the model is usable
    async fn download_model_if_needed(&self) -> Result<(), EngineError>;

    /// Translate text from the source into the target language
    ///
    /// # Arguments
    /// * `text` - The text to translate
    ///
    /// # Returns
    /// * `Result<String, EngineError>` - The translated text or an error
    async fn translate(&self, text: &str) -> Result<String, EngineError>;

    /// Release the resources held by this translator
    fn close(&self);
}

/// Factory for translators
///
/// Creation must stay cheap and local; the costly part of bringing a pair
/// online belongs in `Translator::download_model_if_needed`.
pub trait TranslationEngine: Send + Sync + Debug {
    /// Build a translator for the given pair
    fn create_translator(&self, pair: &LanguagePair) -> Arc<dyn Translator>;
}

pub mod mock;
pub mod phrasebook;

pub use mock::MockEngine;
pub use phrasebook::PhrasebookEngine;
