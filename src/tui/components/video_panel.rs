//! # VideoPanel Component
//!
//! Shown once a video is ready: the location, plus the play and download
//! affordances and the state of the last download.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::present::VideoView;
use crate::core::state::DownloadState;
use crate::tui::component::Component;

pub struct VideoPanel<'a> {
    pub video: VideoView<'a>,
}

fn download_line(state: &DownloadState) -> Line<'static> {
    match state {
        DownloadState::NotStarted => Line::from(""),
        DownloadState::InProgress => Line::styled(
            "Downloading...",
            Style::default().fg(Color::Yellow),
        ),
        DownloadState::Saved(path) => Line::styled(
            format!("Saved to {}", path.display()),
            Style::default().fg(Color::Green),
        ),
        DownloadState::Failed(msg) => Line::styled(
            format!("Download failed: {msg}"),
            Style::default().fg(Color::Red),
        ),
    }
}

impl Component for VideoPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled(
                self.video.location.to_string(),
                Style::default().fg(Color::Indexed(147)).add_modifier(Modifier::UNDERLINED),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Ctrl+O", key),
                Span::raw(" play   "),
                Span::styled("Ctrl+S", key),
                Span::raw(" download"),
            ]),
            download_line(self.video.download),
        ];

        let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green))
                .title("Your dream video"),
        );
        frame.render_widget(panel, area);
    }
}
