/*!
 * # SnapTranslate - capture text, translate it on the device
 *
 * A Rust library that takes the text recognized in a captured photo and
 * translates it into a selected language with an on-device translation engine.
 *
 * ## Features
 *
 * - One live translator at a time; switching languages releases the old one
 * - On-demand model download, shared by every caller waiting on it
 * - Typed outcomes for download, translation and misuse failures
 * - ISO 639-1 and ISO 639-3 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `session`: Translation session manager and session state machine
 * - `engine`: Translation engines:
 *   - `engine::phrasebook`: Phrase-table engine backed by a local model store
 *   - `engine::mock`: Scriptable engine for tests
 * - `recognition`: Text recognition collaborators
 * - `app_config`: Configuration management
 * - `app_controller`: Capture-to-translation workflow
 * - `languages`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod engine;
pub mod errors;
pub mod languages;
pub mod recognition;
pub mod session;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use engine::{TranslationEngine, Translator};
pub use errors::{AppError, EngineError, RecognitionError, SessionError};
pub use languages::{LanguagePair, get_language_name, language_codes_match};
pub use session::{SessionManager, SessionState, TranslationOutcome};
