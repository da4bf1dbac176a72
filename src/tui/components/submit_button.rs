//! # SubmitButton Component
//!
//! The "Record dream" button under the prompt. Disabled while the prompt is
//! blank or a request is pending; the label switches while pending.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

pub const SUBMIT_BUTTON_HEIGHT: u16 = 3;

pub struct SubmitButton {
    pub label: &'static str,
    pub enabled: bool,
}

impl Component for SubmitButton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (style, hint) = if self.enabled {
            (
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Indexed(61))
                    .add_modifier(Modifier::BOLD),
                " Enter ",
            )
        } else {
            (
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                "",
            )
        };

        let button = Paragraph::new(self.label)
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title_bottom(hint),
            );
        frame.render_widget(button, area);
    }
}
