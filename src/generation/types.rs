//! Wire types for the `/generate-video` endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::service::GenerationError;

/// Retrievable address of a generated video (usually a signed URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoLocation(String);

impl VideoLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request body: the prompt is the sole payload.
#[derive(Serialize, Debug)]
pub struct GenerateVideoRequest<'a> {
    pub prompt: &'a str,
}

/// Response body. Every field is optional; the service omits what it doesn't know.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct GenerateVideoResponse {
    /// Body-level success flag. `Some(false)` marks failure even on HTTP 2xx.
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub signed_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Informational text sent alongside a successful result.
    #[serde(default)]
    pub message: Option<String>,
}

impl GenerateVideoResponse {
    /// Interprets a decoded body given whether the HTTP status was 2xx.
    ///
    /// Success needs a 2xx status, `ok` not set to `false`, and a non-empty
    /// `signed_url`. Anything else is an application error.
    pub fn into_outcome(self, status_ok: bool) -> Result<VideoLocation, GenerationError> {
        let indicates_success = status_ok && self.ok != Some(false);
        match self.signed_url {
            Some(url) if indicates_success && !url.trim().is_empty() => Ok(VideoLocation(url)),
            _ => Err(GenerationError::application(self.error)),
        }
    }
}
