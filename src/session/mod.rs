/*!
 * Session management module for translation sessions.
 *
 * This module provides:
 * - The session manager owning the single live translator
 * - The per-session state machine with coalesced model downloads
 * - Outcome and snapshot types handed to callers
 */

pub mod lifecycle;
pub mod manager;
pub mod models;

// Re-export main types
pub use lifecycle::TranslationSession;
pub use manager::SessionManager;
pub use models::{SessionInfo, SessionResult, SessionState, TranslationOutcome, TranslationRequest};
