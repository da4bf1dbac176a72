//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, service URL, status line
//! - `SubmitButton`: enabled/disabled submit control
//! - `VideoPanel`: result location with play/download affordances
//! - `LoadingOverlay`: blocking spinner while a request is pending
//! - `ErrorOverlay`: dismissible failure message (with click hit-testing)
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `PromptBox`: multi-line prompt editor
//!
//! Components receive external data as props, never by reaching into `App`.
//! `ui.rs` builds them from a `Presentation` each frame.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── prompt_box.rs
//! ├── submit_button.rs
//! ├── video_panel.rs
//! ├── loading_overlay.rs
//! └── error_overlay.rs
//! ```

use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub mod error_overlay;
pub mod loading_overlay;
pub mod prompt_box;
pub mod submit_button;
mod title_bar;
pub mod video_panel;

pub use error_overlay::{ErrorOverlay, OverlayHit};
pub use loading_overlay::LoadingOverlay;
pub use prompt_box::{PROMPT_BOX_HEIGHT, PromptBox, PromptEvent};
pub use submit_button::{SUBMIT_BUTTON_HEIGHT, SubmitButton};
pub use title_bar::TitleBar;
pub use video_panel::VideoPanel;

/// A `width` x `height` rectangle centered in `area`, shrunk to fit if needed.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
