use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};

use crate::core::present::Presentation;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ErrorOverlay, LoadingOverlay, PROMPT_BOX_HEIGHT, SUBMIT_BUTTON_HEIGHT, SubmitButton,
    TitleBar, VideoPanel,
};

/// The form column never grows wider than this.
const FORM_WIDTH: u16 = 80;
const VIDEO_PANEL_HEIGHT: u16 = 8;

/// Screen regions of the form, shared by drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub title: Rect,
    pub prompt: Rect,
    pub button: Rect,
    pub result: Rect,
}

pub fn form_layout(area: Rect) -> FormLayout {
    use Constraint::{Length, Min};

    let [title, body] = Layout::vertical([Length(1), Min(0)]).areas(area);
    let [column] = Layout::horizontal([Length(FORM_WIDTH.min(body.width))])
        .flex(Flex::Center)
        .areas(body);
    let [_gap, prompt, button, _gap2, result] = Layout::vertical([
        Length(1),
        Length(PROMPT_BOX_HEIGHT),
        Length(SUBMIT_BUTTON_HEIGHT),
        Length(1),
        Min(0),
    ])
    .areas(column);

    FormLayout {
        title,
        prompt,
        button,
        result,
    }
}

/// Whether a click at (`column`, `row`) lands on the submit button.
pub fn hit_submit(area: Rect, column: u16, row: u16) -> bool {
    form_layout(area).button.contains(Position::new(column, row))
}

pub fn draw_ui(
    frame: &mut Frame,
    app: &App,
    tui: &mut TuiState,
    spinner_frame: usize,
    now: DateTime<Utc>,
) {
    let view = Presentation::from_app(app, now);
    let area = frame.area();
    let layout = form_layout(area);

    TitleBar::new(&app.service_url, view.status_message).render(frame, layout.title);

    tui.prompt_box.focused = view.loading_overlay.is_none() && view.error_overlay.is_none();
    tui.prompt_box.render(frame, layout.prompt);

    SubmitButton {
        label: view.submit_label,
        enabled: view.submit_enabled,
    }
    .render(frame, layout.button);

    if let Some(video) = view.video {
        let [panel] = Layout::vertical([Constraint::Length(
            VIDEO_PANEL_HEIGHT.min(layout.result.height),
        )])
        .areas(layout.result);
        VideoPanel { video }.render(frame, panel);
    }

    // Overlays cover the whole screen, on top of the form.
    if let Some(elapsed_secs) = view.loading_overlay {
        LoadingOverlay {
            spinner_frame,
            elapsed_secs,
        }
        .render(frame, area);
    }
    if let Some(message) = view.error_overlay {
        ErrorOverlay { message }.render(frame, area);
    }
}
