//! # TitleBar Component
//!
//! Top status bar: app name, the service being called, and the status line.
//!
//! Stateless. Everything it shows comes in as props, so the parent decides
//! what the status says (submission progress, download results, player errors).

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar<'a> {
    /// Full endpoint URL (e.g. "http://localhost:8080/generate-video")
    pub service_url: &'a str,
    /// Transient status (e.g. "Recording your dream...", "Saved to ...")
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(service_url: &'a str, status_message: &'a str) -> Self {
        Self {
            service_url,
            status_message,
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "Dream Recorder",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({})", self.service_url),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(service_url: &str, status: &str) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut title_bar = TitleBar::new(service_url, status);
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let text = render("http://localhost:8080/generate-video", "Recording your dream...");
        assert!(text.contains("Dream Recorder"));
        assert!(text.contains("localhost:8080"));
        assert!(text.contains("| Recording your dream..."));
    }

    #[test]
    fn test_title_bar_without_status() {
        let text = render("http://svc", "");
        assert!(text.contains("Dream Recorder (http://svc)"));
        assert!(!text.contains('|'));
    }
}
