use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use super::types::VideoLocation;

/// Shown when the service answered without a usable diagnostic.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Shown for every transport failure, whatever the underlying cause was.
pub const TRANSPORT_ERROR_MESSAGE: &str =
    "Cannot reach the server. Check that the backend is running.";

/// Why a generation request did not produce a video.
///
/// Both variants render the same way today (overlay + message), but the
/// distinction is kept so callers can treat them differently later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum GenerationError {
    /// The service responded but declined or could not produce a result.
    Application(String),
    /// The exchange never completed. Underlying details are only logged.
    Transport,
}

impl GenerationError {
    /// Builds an application error from the service's diagnostic, falling back
    /// to [`UNKNOWN_ERROR_MESSAGE`] when it is missing or blank.
    pub fn application(message: Option<String>) -> Self {
        match message {
            Some(msg) if !msg.trim().is_empty() => GenerationError::Application(msg),
            _ => GenerationError::Application(UNKNOWN_ERROR_MESSAGE.to_string()),
        }
    }

    /// The human-readable text for the error overlay.
    pub fn message(&self) -> &str {
        match self {
            GenerationError::Application(msg) => msg,
            GenerationError::Transport => TRANSPORT_ERROR_MESSAGE,
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for GenerationError {}

#[async_trait]
pub trait VideoService: Send + Sync {
    /// Where requests go, for display in the title bar.
    fn endpoint(&self) -> &str;

    /// Issues exactly one generation request for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<VideoLocation, GenerationError>;
}
