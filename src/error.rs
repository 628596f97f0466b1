//! User-facing error taxonomy
//!
//! These errors never end the session: the UI reports them as a
//! notification (or the AI status indicator) and carries on.

use thiserror::Error;

use crate::models::Severity;

/// Errors surfaced to the user while composing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// Publish attempted with no target platform
    #[error("Please select at least one platform")]
    NoPlatformSelected,

    /// Publish attempted with a blank body
    #[error("Please write some content first")]
    EmptyContent,

    /// The suggestion call failed
    #[error("AI content generation failed: {0}")]
    AiGenerationFailed(String),
}

impl ComposeError {
    /// Severity used when reporting the error
    pub const fn severity(&self) -> Severity {
        Severity::Error
    }
}
