//! # ErrorOverlay Component
//!
//! Full-screen dismissible overlay showing why the last request failed.
//!
//! Clicks are contained: a click outside the box dismisses, a click on the
//! "OK" row acknowledges, and any other click inside the box does nothing.
//! `hit_test` uses the same geometry as `render` so the two cannot drift.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use super::centered_rect;
use crate::tui::component::Component;

const BOX_WIDTH: u16 = 50;
/// Smallest box, used for short messages.
const MIN_BOX_HEIGHT: u16 = 10;
/// Borders plus the blank line and the OK row under the body.
const BOX_CHROME: u16 = 4;

/// Where a click landed relative to the error box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayHit {
    Outside,
    Inside,
    Acknowledge,
}

pub struct ErrorOverlay<'a> {
    pub message: &'a str,
}

/// Heading, blank line and the full message, wrapped inside the box.
fn body(message: &str) -> Paragraph<'_> {
    let lines = vec![
        Line::styled(
            "Something went wrong",
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(message, Style::default().fg(Color::Gray)),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

/// The error box and the OK row inside it. The box grows with the message,
/// up to the height of `area`.
fn geometry(area: Rect, message: &str) -> (Rect, Rect) {
    let body_lines = body(message).line_count(BOX_WIDTH.saturating_sub(2));
    let height = u16::try_from(body_lines)
        .unwrap_or(u16::MAX)
        .saturating_add(BOX_CHROME)
        .max(MIN_BOX_HEIGHT);
    let dialog = centered_rect(area, BOX_WIDTH, height);
    let inner = Block::bordered().inner(dialog);
    let [_body, ok_row] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    (dialog, ok_row)
}

pub fn hit_test(area: Rect, message: &str, column: u16, row: u16) -> OverlayHit {
    let (dialog, ok_row) = geometry(area, message);
    let pos = Position::new(column, row);
    if ok_row.contains(pos) {
        OverlayHit::Acknowledge
    } else if dialog.contains(pos) {
        OverlayHit::Inside
    } else {
        OverlayHit::Outside
    }
}

impl Component for ErrorOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Black)),
            area,
        );

        let (dialog, ok_row) = geometry(area, self.message);
        frame.render_widget(Clear, dialog);
        frame.render_widget(
            body(self.message).block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::LightRed)),
            ),
            dialog,
        );

        frame.render_widget(
            Paragraph::new("[ OK ]").alignment(Alignment::Center).style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Indexed(61))
                    .add_modifier(Modifier::BOLD),
            ),
            ok_row,
        );
    }
}
