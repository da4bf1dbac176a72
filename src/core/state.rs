//! # Application State
//!
//! Everything the Prompt Submission View knows, in one serializable struct.
//!
//! ```text
//! App
//! ├── prompt: String               // user-edited, never cleared
//! ├── lifecycle: RequestLifecycle  // Idle | Pending | Succeeded | Failed
//! ├── download: DownloadState      // companion download of the result
//! ├── status_message: String       // status line text
//! └── service_url: String          // where requests go
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::generation::{GenerationError, VideoLocation};

/// Token minted for each submission. Resolutions carrying any other token are stale.
pub type RequestId = Uuid;

/// Exactly one of these is active at any time. Entering a variant drops the
/// payload of the previous one, so a result and an error can never coexist.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestLifecycle {
    #[default]
    Idle,
    Pending {
        request_id: RequestId,
        started_at: DateTime<Utc>,
    },
    Succeeded {
        video_location: VideoLocation,
    },
    Failed {
        error: GenerationError,
    },
}

impl RequestLifecycle {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestLifecycle::Pending { .. })
    }

    pub fn video_location(&self) -> Option<&VideoLocation> {
        match self {
            RequestLifecycle::Succeeded { video_location } => Some(video_location),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match self {
            RequestLifecycle::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            RequestLifecycle::Idle => "idle",
            RequestLifecycle::Pending { .. } => "pending",
            RequestLifecycle::Succeeded { .. } => "succeeded",
            RequestLifecycle::Failed { .. } => "failed",
        }
    }
}

/// Progress of saving the current video to disk. Independent of the lifecycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum DownloadState {
    #[default]
    NotStarted,
    InProgress,
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Serialize)]
pub struct App {
    pub prompt: String,
    pub lifecycle: RequestLifecycle,
    pub download: DownloadState,
    pub status_message: String,
    pub service_url: String,
}

impl App {
    pub fn new(service_url: String) -> Self {
        Self {
            prompt: String::new(),
            lifecycle: RequestLifecycle::Idle,
            download: DownloadState::NotStarted,
            status_message: String::from("Describe a scene from your dream"),
            service_url,
        }
    }

    /// Whether a submission would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !self.prompt.trim().is_empty() && !self.lifecycle.is_pending()
    }

    /// JSON snapshot of the whole state, for debug logging.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("<unserializable state: {e}>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn new_app_is_idle_with_empty_prompt() {
        let app = test_app();
        assert_eq!(app.lifecycle, RequestLifecycle::Idle);
        assert!(app.prompt.is_empty());
        assert_eq!(app.download, DownloadState::NotStarted);
    }

    #[test]
    fn can_submit_requires_non_blank_prompt() {
        let mut app = test_app();
        for blank in ["", " ", "\n\t  "] {
            app.prompt = blank.to_string();
            assert!(!app.can_submit(), "blank prompt {blank:?} must not be submittable");
        }
        app.prompt = "a flying whale".to_string();
        assert!(app.can_submit());
    }

    #[test]
    fn can_submit_false_while_pending() {
        let mut app = test_app();
        app.prompt = "a flying whale".to_string();
        app.lifecycle = RequestLifecycle::Pending {
            request_id: Uuid::new_v4(),
            started_at: Utc::now(),
        };
        assert!(!app.can_submit());
    }

    #[test]
    fn accessors_match_variant() {
        let ok = RequestLifecycle::Succeeded {
            video_location: VideoLocation::new("https://x/v.mp4"),
        };
        assert_eq!(ok.video_location().map(|l| l.as_str()), Some("https://x/v.mp4"));
        assert!(ok.error().is_none());
        assert!(!ok.is_pending());

        let failed = RequestLifecycle::Failed {
            error: GenerationError::Transport,
        };
        assert!(failed.video_location().is_none());
        assert_eq!(failed.error(), Some(&GenerationError::Transport));
    }

    #[test]
    fn snapshot_is_tagged_json() {
        let mut app = test_app();
        app.prompt = "whale".to_string();
        app.lifecycle = RequestLifecycle::Failed {
            error: GenerationError::Application("nope".into()),
        };
        let value: serde_json::Value = serde_json::from_str(&app.snapshot()).unwrap();
        assert_eq!(value["prompt"], "whale");
        assert_eq!(value["lifecycle"]["state"], "failed");
        assert_eq!(value["lifecycle"]["error"]["message"], "nope");
    }
}
