//! # Presentation
//!
//! Pure projection of [`App`] into what the view shows. The TUI renders a
//! `Presentation`; it never inspects the lifecycle on its own.

use chrono::{DateTime, Utc};

use crate::core::state::{App, DownloadState, RequestLifecycle};
use crate::generation::VideoLocation;

pub const SUBMIT_LABEL: &str = "Record dream";
pub const SUBMIT_LABEL_PENDING: &str = "Recording dream...";

#[derive(Debug, Clone, PartialEq)]
pub struct Presentation<'a> {
    pub prompt: &'a str,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    /// Seconds since submission. `Some` iff a request is pending.
    pub loading_overlay: Option<i64>,
    /// `Some` iff the last request succeeded.
    pub video: Option<VideoView<'a>>,
    /// `Some` iff the last request failed.
    pub error_overlay: Option<&'a str>,
    pub status_message: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoView<'a> {
    pub location: &'a VideoLocation,
    pub download: &'a DownloadState,
}

impl<'a> Presentation<'a> {
    pub fn from_app(app: &'a App, now: DateTime<Utc>) -> Self {
        let pending = app.lifecycle.is_pending();

        let loading_overlay = match &app.lifecycle {
            RequestLifecycle::Pending { started_at, .. } => {
                Some((now - *started_at).num_seconds().max(0))
            }
            _ => None,
        };

        Self {
            prompt: &app.prompt,
            submit_enabled: app.can_submit(),
            submit_label: if pending { SUBMIT_LABEL_PENDING } else { SUBMIT_LABEL },
            loading_overlay,
            video: app.lifecycle.video_location().map(|location| VideoView {
                location,
                download: &app.download,
            }),
            error_overlay: app.lifecycle.error().map(|e| e.message()),
            status_message: &app.status_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationError;
    use crate::test_support::test_app;
    use chrono::Duration;
    use uuid::Uuid;

    #[test]
    fn idle_with_blank_prompt_disables_submit() {
        let mut app = test_app();
        for blank in ["", "  ", "\n"] {
            app.prompt = blank.to_string();
            let view = Presentation::from_app(&app, Utc::now());
            assert!(!view.submit_enabled);
            assert_eq!(view.submit_label, SUBMIT_LABEL);
            assert!(view.loading_overlay.is_none());
            assert!(view.video.is_none());
            assert!(view.error_overlay.is_none());
        }
    }

    #[test]
    fn pending_shows_overlay_and_disables_submit() {
        let mut app = test_app();
        app.prompt = "whale".to_string();
        let started_at = Utc::now();
        app.lifecycle = RequestLifecycle::Pending {
            request_id: Uuid::new_v4(),
            started_at,
        };

        let view = Presentation::from_app(&app, started_at + Duration::seconds(42));
        assert!(!view.submit_enabled);
        assert_eq!(view.submit_label, SUBMIT_LABEL_PENDING);
        assert_eq!(view.loading_overlay, Some(42));
        assert!(view.video.is_none());
        assert!(view.error_overlay.is_none());
    }

    #[test]
    fn elapsed_never_negative() {
        let mut app = test_app();
        let started_at = Utc::now();
        app.lifecycle = RequestLifecycle::Pending {
            request_id: Uuid::new_v4(),
            started_at,
        };
        let view = Presentation::from_app(&app, started_at - Duration::seconds(5));
        assert_eq!(view.loading_overlay, Some(0));
    }

    #[test]
    fn succeeded_exposes_location() {
        let mut app = test_app();
        app.prompt = "whale".to_string();
        app.lifecycle = RequestLifecycle::Succeeded {
            video_location: VideoLocation::new("https://x/v.mp4"),
        };
        let view = Presentation::from_app(&app, Utc::now());
        assert!(view.submit_enabled);
        assert_eq!(
            view.video.map(|v| v.location.as_str()),
            Some("https://x/v.mp4")
        );
        assert!(view.error_overlay.is_none());
        assert!(view.loading_overlay.is_none());
    }

    #[test]
    fn failed_exposes_message() {
        let mut app = test_app();
        app.lifecycle = RequestLifecycle::Failed {
            error: GenerationError::Application("content policy violation".into()),
        };
        let view = Presentation::from_app(&app, Utc::now());
        assert_eq!(view.error_overlay, Some("content policy violation"));
        assert!(view.video.is_none());
    }
}
