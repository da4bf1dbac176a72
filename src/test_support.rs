//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::core::state::App;
use crate::generation::{GenerationError, VideoLocation, VideoService};

/// A service that always answers with the same outcome.
pub struct FixedVideoService {
    pub outcome: Result<VideoLocation, GenerationError>,
}

impl FixedVideoService {
    pub fn succeeding(location: &str) -> Self {
        Self {
            outcome: Ok(VideoLocation::new(location)),
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self { outcome: Err(error) }
    }
}

#[async_trait]
impl VideoService for FixedVideoService {
    fn endpoint(&self) -> &str {
        "fixed://test"
    }

    async fn generate(&self, _prompt: &str) -> Result<VideoLocation, GenerationError> {
        self.outcome.clone()
    }
}

/// Creates an idle test App.
pub fn test_app() -> App {
    App::new("http://localhost:8080/generate-video".to_string())
}

/// Collects every cell symbol of a rendered buffer into one string.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
