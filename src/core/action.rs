//! # Actions
//!
//! Everything that can happen in the view becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The service answers? That's `Action::GenerationFinished { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the adapter what I/O to start. The reducer itself never touches the network.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::path::PathBuf;

use chrono::Utc;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::core::state::{App, DownloadState, RequestId, RequestLifecycle};
use crate::generation::{GenerationError, VideoLocation};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the prompt text. Never touches the lifecycle.
    EditPrompt(String),
    /// Submit the current prompt.
    Submit,
    /// The request identified by `request_id` resolved.
    GenerationFinished {
        request_id: RequestId,
        outcome: Result<VideoLocation, GenerationError>,
    },
    /// Close the error overlay.
    DismissError,
    /// Play the current video in the external player.
    OpenVideo,
    /// Save the current video to disk.
    DownloadVideo,
    DownloadFinished {
        video_location: VideoLocation,
        result: Result<PathBuf, String>,
    },
    /// The player could not be launched.
    PlayerFailed(String),
    Quit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnRequest { request_id: RequestId, prompt: String },
    OpenInPlayer(VideoLocation),
    StartDownload(VideoLocation),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    let effect = match action {
        Action::EditPrompt(text) => {
            app.prompt = text;
            Effect::None
        }
        Action::Submit => submit(app),
        Action::GenerationFinished {
            request_id,
            outcome,
        } => {
            finish_generation(app, request_id, outcome);
            Effect::None
        }
        Action::DismissError => {
            if app.lifecycle.error().is_some() {
                app.lifecycle = RequestLifecycle::Idle;
                app.status_message = String::from("Describe a scene from your dream");
            }
            Effect::None
        }
        Action::OpenVideo => match app.lifecycle.video_location() {
            Some(location) => {
                app.status_message = String::from("Opening video in player...");
                Effect::OpenInPlayer(location.clone())
            }
            None => Effect::None,
        },
        Action::DownloadVideo => match app.lifecycle.video_location() {
            Some(location) if app.download != DownloadState::InProgress => {
                app.download = DownloadState::InProgress;
                app.status_message = String::from("Downloading video...");
                Effect::StartDownload(location.clone())
            }
            _ => Effect::None,
        },
        Action::DownloadFinished {
            video_location,
            result,
        } => {
            let current = app.lifecycle.video_location() == Some(&video_location);
            if current && app.download == DownloadState::InProgress {
                match result {
                    Ok(path) => {
                        app.status_message = format!("Saved to {}", path.display());
                        app.download = DownloadState::Saved(path);
                    }
                    Err(msg) => {
                        app.status_message = format!("Download failed: {msg}");
                        app.download = DownloadState::Failed(msg);
                    }
                }
            } else {
                debug!("Ignoring download result for a video no longer shown");
            }
            Effect::None
        }
        Action::PlayerFailed(msg) => {
            app.status_message = format!("Could not open player: {msg}");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    };

    debug!("State after update: {}", app.snapshot());
    effect
}

fn submit(app: &mut App) -> Effect {
    if !app.can_submit() {
        debug!(
            "Submit ignored (state={}, blank_prompt={})",
            app.lifecycle.name(),
            app.prompt.trim().is_empty()
        );
        return Effect::None;
    }

    let request_id = Uuid::new_v4();
    // Replacing the lifecycle drops any previous video or error.
    app.lifecycle = RequestLifecycle::Pending {
        request_id,
        started_at: Utc::now(),
    };
    app.download = DownloadState::NotStarted;
    app.status_message = String::from("Recording your dream...");
    info!("Submitting prompt (request_id={})", request_id);

    Effect::SpawnRequest {
        request_id,
        prompt: app.prompt.clone(),
    }
}

fn finish_generation(
    app: &mut App,
    request_id: RequestId,
    outcome: Result<VideoLocation, GenerationError>,
) {
    let current = match &app.lifecycle {
        RequestLifecycle::Pending { request_id: id, .. } => *id == request_id,
        _ => false,
    };
    if !current {
        warn!(
            "Discarding stale result for request {} (state={})",
            request_id,
            app.lifecycle.name()
        );
        return;
    }

    app.lifecycle = match outcome {
        Ok(video_location) => {
            info!("Request {} succeeded", request_id);
            app.status_message = String::from("Your dream is ready");
            RequestLifecycle::Succeeded { video_location }
        }
        Err(error) => {
            info!("Request {} failed: {}", request_id, error);
            app.status_message = String::from("Something went wrong");
            RequestLifecycle::Failed { error }
        }
    };
}
