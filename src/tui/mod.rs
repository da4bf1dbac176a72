//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the form,
//! translates keyboard and mouse events into core::Action values, and
//! performs the I/O that `update()` asks for through `Effect`.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Pending**: draws every ~80ms so the spinner and elapsed time move.
//! - **Otherwise**: sleeps up to 500ms, only redraws on events, background
//!   results or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.
//!
//! ## Input routing
//!
//! ```text
//! Ctrl+C          always quits
//! Pending         everything else is swallowed
//! Failed          Enter/Esc or a click outside the box or on OK dismisses
//! Idle/Succeeded  Esc quits, Ctrl+O plays, Ctrl+S downloads,
//!                 a click on the button submits, the rest goes to PromptBox
//! ```

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::process::Stdio;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, RequestId, RequestLifecycle};
use crate::generation::{Downloader, HttpVideoService, VideoLocation, VideoService};
use crate::tui::component::EventHandler;
use crate::tui::components::error_overlay::hit_test;
use crate::tui::components::{OverlayHit, PromptBox, PromptEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const FRAME_INTERVAL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub prompt_box: PromptBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            prompt_box: PromptBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter.
        // Terminals that don't support it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the HTTP video service from a resolved config.
pub fn build_service(config: &ResolvedConfig) -> std::io::Result<Arc<dyn VideoService>> {
    let service = HttpVideoService::new(&config.base_url, &config.endpoint, config.request_timeout)
        .map_err(std::io::Error::other)?;
    Ok(Arc::new(service))
}

/// Turns one input event into at most one action, given the current state.
///
/// `area` is the full frame, used for mouse hit-testing.
fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent, area: Rect) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    match &app.lifecycle {
        // Input is disabled until the request resolves.
        RequestLifecycle::Pending { .. } => None,
        RequestLifecycle::Failed { error } => match event {
            TuiEvent::Submit | TuiEvent::Escape => Some(Action::DismissError),
            TuiEvent::MouseClick(column, row) => {
                match hit_test(area, error.message(), *column, *row) {
                    OverlayHit::Outside | OverlayHit::Acknowledge => Some(Action::DismissError),
                    OverlayHit::Inside => None,
                }
            }
            _ => None,
        },
        RequestLifecycle::Idle | RequestLifecycle::Succeeded { .. } => match event {
            TuiEvent::Escape => Some(Action::Quit),
            TuiEvent::OpenVideo => Some(Action::OpenVideo),
            TuiEvent::SaveVideo => Some(Action::DownloadVideo),
            TuiEvent::MouseClick(column, row) => {
                ui::hit_submit(area, *column, *row).then_some(Action::Submit)
            }
            _ => match tui.prompt_box.handle_event(event)? {
                PromptEvent::Changed(text) => Some(Action::EditPrompt(text)),
                PromptEvent::Submit => Some(Action::Submit),
            },
        },
    }
}

/// Splits the configured player command and appends the video location.
fn player_invocation(command: &str, location: &VideoLocation) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    let mut args: Vec<String> = parts.collect();
    args.push(location.to_string());
    Some((program, args))
}

/// Performs the I/O an `Effect` asks for. Results come back over `tx`.
struct EffectRunner {
    service: Arc<dyn VideoService>,
    downloader: Arc<Downloader>,
    player_command: String,
    tx: mpsc::Sender<Action>,
}

impl EffectRunner {
    /// Returns true when the loop should stop.
    fn run(&self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::SpawnRequest { request_id, prompt } => {
                spawn_generation(self.service.clone(), request_id, prompt, self.tx.clone());
            }
            Effect::StartDownload(location) => {
                spawn_download(self.downloader.clone(), location, self.tx.clone());
            }
            Effect::OpenInPlayer(location) => {
                if let Err(msg) = open_in_player(&self.player_command, &location) {
                    warn!("Could not launch player: {}", msg);
                    let _ = self.tx.send(Action::PlayerFailed(msg));
                }
            }
        }
        false
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let service = build_service(&config)?;
    let mut app = App::new(service.endpoint().to_string());
    let mut tui = TuiState::new();

    let (tx, rx) = mpsc::channel();
    let effects = EffectRunner {
        service,
        downloader: Arc::new(Downloader::new(
            &config.download_dir,
            &config.download_file_name,
        )),
        player_command: config.player_command.clone(),
        tx,
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        let animating = app.lifecycle.is_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            let now = chrono::Utc::now();
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame, now))?;
            needs_redraw = false;
        }

        let timeout = if animating { FRAME_INTERVAL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain every pending event before the next draw.
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            let area = terminal.get_frame().area();
            if let Some(action) = route_event(&app, &mut tui, &event, area) {
                let effect = update(&mut app, action);
                if effects.run(effect) {
                    break 'main;
                }
            }
        }

        // Results from background tasks.
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if effects.run(effect) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    info!("Dream Recorder shut down");
    Ok(())
}

fn spawn_generation(
    service: Arc<dyn VideoService>,
    request_id: RequestId,
    prompt: String,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!(
        "Spawning generation request {} to {}",
        request_id,
        service.endpoint()
    );
    tokio::spawn(async move {
        let outcome = service.generate(&prompt).await;
        if tx
            .send(Action::GenerationFinished {
                request_id,
                outcome,
            })
            .is_err()
        {
            warn!(
                "Failed to send result for request {}: receiver dropped",
                request_id
            );
        }
    })
}

fn spawn_download(
    downloader: Arc<Downloader>,
    video_location: VideoLocation,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let result = match downloader.download(&video_location).await {
            Ok(bytes) => {
                info!(
                    "Saved {} bytes to {}",
                    bytes,
                    downloader.destination().display()
                );
                Ok(downloader.destination().to_path_buf())
            }
            Err(e) => {
                warn!("Download of {} failed: {}", video_location, e);
                Err(e.to_string())
            }
        };
        if tx
            .send(Action::DownloadFinished {
                video_location,
                result,
            })
            .is_err()
        {
            warn!("Failed to send download result: receiver dropped");
        }
    })
}

/// Launches the player detached from the terminal. tokio reaps the child.
fn open_in_player(command: &str, location: &VideoLocation) -> Result<(), String> {
    let (program, args) =
        player_invocation(command, location).ok_or_else(|| "no player configured".to_string())?;
    info!("Opening {} with {}", location, program);
    tokio::process::Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| format!("{program}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationError;
    use crate::test_support::{FixedVideoService, test_app};
    use chrono::Utc;
    use uuid::Uuid;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 30,
    };

    fn pending_app() -> App {
        let mut app = test_app();
        app.prompt = "a whale".to_string();
        app.lifecycle = RequestLifecycle::Pending {
            request_id: Uuid::new_v4(),
            started_at: Utc::now(),
        };
        app
    }

    fn failed_app() -> App {
        let mut app = test_app();
        app.lifecycle = RequestLifecycle::Failed {
            error: GenerationError::Transport,
        };
        app
    }

    #[test]
    fn typing_becomes_edit_prompt() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::InputChar('w'), AREA),
            Some(Action::EditPrompt("w".to_string()))
        );
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Submit, AREA),
            Some(Action::Submit)
        );
    }

    #[test]
    fn ctrl_c_quits_in_every_state() {
        let mut tui = TuiState::new();
        for app in [test_app(), pending_app(), failed_app()] {
            assert_eq!(
                route_event(&app, &mut tui, &TuiEvent::ForceQuit, AREA),
                Some(Action::Quit)
            );
        }
    }

    #[test]
    fn pending_swallows_input() {
        let app = pending_app();
        let mut tui = TuiState::new();
        for event in [
            TuiEvent::InputChar('x'),
            TuiEvent::Submit,
            TuiEvent::Escape,
            TuiEvent::OpenVideo,
            TuiEvent::MouseClick(0, 0),
        ] {
            assert_eq!(route_event(&app, &mut tui, &event, AREA), None);
        }
        assert_eq!(tui.prompt_box.text(), "");
    }

    #[test]
    fn failed_dismisses_on_enter_escape_and_outside_click() {
        let app = failed_app();
        let mut tui = TuiState::new();
        for event in [
            TuiEvent::Submit,
            TuiEvent::Escape,
            TuiEvent::MouseClick(0, 0),
        ] {
            assert_eq!(
                route_event(&app, &mut tui, &event, AREA),
                Some(Action::DismissError)
            );
        }
    }

    #[test]
    fn failed_ignores_typing_and_clicks_inside_box() {
        let app = failed_app();
        let mut tui = TuiState::new();
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::InputChar('x'), AREA),
            None
        );
        // Center of the screen is inside the message box, above the OK row.
        let click = TuiEvent::MouseClick(AREA.width / 2, AREA.height / 2 - 2);
        assert_eq!(route_event(&app, &mut tui, &click, AREA), None);
    }

    #[test]
    fn escape_quits_from_form() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Escape, AREA),
            Some(Action::Quit)
        );
    }

    #[test]
    fn video_keys_map_to_actions() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::OpenVideo, AREA),
            Some(Action::OpenVideo)
        );
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::SaveVideo, AREA),
            Some(Action::DownloadVideo)
        );
    }

    #[test]
    fn click_on_button_submits() {
        let app = test_app();
        let mut tui = TuiState::new();
        let button = ui::form_layout(AREA).button;
        let click = TuiEvent::MouseClick(button.x + 2, button.y + 1);
        assert_eq!(
            route_event(&app, &mut tui, &click, AREA),
            Some(Action::Submit)
        );
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::MouseClick(0, AREA.height - 1), AREA),
            None
        );
    }

    #[test]
    fn player_invocation_appends_location() {
        let location = VideoLocation::new("https://x/v.mp4");
        assert_eq!(
            player_invocation("mpv --fs", &location),
            Some((
                "mpv".to_string(),
                vec!["--fs".to_string(), "https://x/v.mp4".to_string()]
            ))
        );
        assert_eq!(player_invocation("   ", &location), None);
    }

    #[tokio::test]
    async fn spawn_generation_reports_outcome() {
        let (tx, rx) = mpsc::channel();
        let service: Arc<dyn VideoService> =
            Arc::new(FixedVideoService::succeeding("https://x/v.mp4"));
        let request_id = Uuid::new_v4();

        spawn_generation(service, request_id, "a whale".to_string(), tx)
            .await
            .unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            Action::GenerationFinished {
                request_id,
                outcome: Ok(VideoLocation::new("https://x/v.mp4")),
            }
        );
    }

    #[tokio::test]
    async fn spawned_result_drives_state_machine() {
        let (tx, rx) = mpsc::channel();
        let mut app = test_app();
        update(&mut app, Action::EditPrompt("a whale".to_string()));
        let Effect::SpawnRequest { request_id, prompt } = update(&mut app, Action::Submit) else {
            panic!("Expected SpawnRequest");
        };

        let service: Arc<dyn VideoService> = Arc::new(FixedVideoService::failing(
            GenerationError::Application("content policy violation".to_string()),
        ));
        spawn_generation(service, request_id, prompt, tx).await.unwrap();
        update(&mut app, rx.try_recv().unwrap());

        assert_eq!(
            app.lifecycle.error().map(|e| e.message()),
            Some("content policy violation")
        );
    }
}
