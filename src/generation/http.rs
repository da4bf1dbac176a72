//! HTTP implementation of [`VideoService`] using reqwest.
//!
//! One POST per call, JSON in and JSON out. No retries.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::service::{GenerationError, VideoService};
use super::types::{GenerateVideoRequest, GenerateVideoResponse, VideoLocation};

pub const DEFAULT_ENDPOINT: &str = "/generate-video";

/// Joins a base URL and an endpoint path with exactly one slash between them.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = endpoint.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

pub struct HttpVideoService {
    url: String,
    client: reqwest::Client,
}

impl HttpVideoService {
    /// `timeout` of `None` waits forever for the service to answer.
    pub fn new(base_url: &str, endpoint: &str, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            url: endpoint_url(base_url, endpoint),
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl VideoService for HttpVideoService {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn generate(&self, prompt: &str) -> Result<VideoLocation, GenerationError> {
        info!("POST {} (prompt_len={})", self.url, prompt.len());

        let response = self
            .client
            .post(&self.url)
            .json(&GenerateVideoRequest { prompt })
            .send()
            .await
            .map_err(|e| {
                warn!("Request to {} failed: {}", self.url, e);
                GenerationError::Transport
            })?;

        let status = response.status();
        debug!("Generation response status: {}", status);

        // An unreadable body is reported like a failed connection.
        let body: GenerateVideoResponse = response.json().await.map_err(|e| {
            warn!("Could not decode response body (HTTP {}): {}", status, e);
            GenerationError::Transport
        })?;

        if let Some(message) = &body.message {
            info!("Service message: {}", message);
        }

        let outcome = body.into_outcome(status.is_success());
        match &outcome {
            Ok(location) => info!("Video ready at {}", location),
            Err(e) => warn!("Generation declined (HTTP {}): {}", status, e),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_with_single_slash() {
        assert_eq!(
            endpoint_url("http://localhost:8080", "/generate-video"),
            "http://localhost:8080/generate-video"
        );
        assert_eq!(
            endpoint_url("http://localhost:8080/", "generate-video"),
            "http://localhost:8080/generate-video"
        );
        assert_eq!(
            endpoint_url("http://localhost:8080//", "//generate-video"),
            "http://localhost:8080/generate-video"
        );
    }

    #[test]
    fn endpoint_url_empty_path_keeps_base() {
        assert_eq!(endpoint_url("http://host/api/", ""), "http://host/api");
    }

    #[test]
    fn new_reports_joined_endpoint() {
        let service =
            HttpVideoService::new("http://127.0.0.1:9", DEFAULT_ENDPOINT, None).unwrap();
        assert_eq!(service.endpoint(), "http://127.0.0.1:9/generate-video");
    }
}
