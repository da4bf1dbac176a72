//! # LoadingOverlay Component
//!
//! Full-screen blocking overlay shown while a request is pending.
//! Generation takes minutes, so it shows a spinner and the elapsed time.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use super::centered_rect;
use crate::tui::component::Component;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingOverlay {
    pub spinner_frame: usize,
    pub elapsed_secs: i64,
}

/// Formats seconds as `m:ss`.
pub fn format_elapsed(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

impl Component for LoadingOverlay {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Dim everything underneath.
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Black)),
            area,
        );

        let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
        let lines = vec![
            Line::styled(
                format!("{spinner}  Recording your dream..."),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::styled(
                format!("Please wait. {}", format_elapsed(self.elapsed_secs)),
                Style::default().fg(Color::Gray),
            ),
        ];

        let dialog = centered_rect(area, 44, 5);
        frame.render_widget(Clear, dialog);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Indexed(147))),
            ),
            dialog,
        );
    }
}
