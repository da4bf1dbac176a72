//! # PromptBox Component
//!
//! Multi-line text area for the dream description.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Ctrl+J / Shift+Enter for newlines)
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Changed` with the full text after every edit, and `Submit` on Enter
//!
//! Unlike a chat input, submitting does not clear the buffer: the prompt
//! stays on screen so it can be tweaked and sent again.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Content lines shown before the box scrolls internally.
const MAX_VISIBLE_LINES: u16 = 5;
/// Total height including the top and bottom border.
pub const PROMPT_BOX_HEIGHT: u16 = MAX_VISIBLE_LINES + 2;

const PLACEHOLDER: &str = "Describe a scene from your dream as vividly as you can...";

#[derive(Debug, Clone, PartialEq)]
pub enum PromptEvent {
    /// The text changed; carries the whole new text.
    Changed(String),
    /// Enter was pressed.
    Submit,
}

pub struct PromptBox {
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
    /// First wrapped line shown.
    scroll_offset: u16,
    /// Prop: whether the box owns the terminal cursor this frame.
    pub focused: bool,
}

impl Default for PromptBox {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_offset: 0,
            focused: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    fn changed(&self) -> Option<PromptEvent> {
        Some(PromptEvent::Changed(self.buffer.clone()))
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Row and column of the cursor within the wrapped text.
    ///
    /// The cursor's logical line is wrapped whole, the same way `render` wraps
    /// it, and the cursor is placed by byte offset into the wrapped segments.
    /// Whitespace dropped at a wrap point never counts toward the column.
    fn cursor_row_col(&self, width: u16) -> (u16, u16) {
        if width == 0 {
            return (0, 0);
        }
        let line_start = self.buffer[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let line_end = self.buffer[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.buffer.len());
        let rows_above = if line_start == 0 {
            0
        } else {
            wrapped_lines(&self.buffer[..line_start - 1], width).len()
        };

        let line = &self.buffer[line_start..line_end];
        let offset = self.cursor - line_start;
        let mut row = 0usize;
        let mut seg_start = 0usize;
        let mut pos = 0usize;
        for (i, seg) in textwrap::wrap(line, wrap_options(width)).iter().enumerate() {
            let seg: &str = seg;
            // Segments are slices of `line` in order; find where this one begins.
            let start = pos + line[pos..].find(seg).unwrap_or(0);
            if i > 0 && start > offset {
                break;
            }
            row = i;
            seg_start = start;
            pos = start + seg.len();
        }
        let col = if seg_start <= offset {
            line[seg_start..offset].width()
        } else {
            0
        };

        (
            (rows_above + row) as u16,
            (col as u16).min(width.saturating_sub(1)),
        )
    }
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize).break_words(true)
}

/// Wraps `text` to `width` columns, keeping explicit newlines as line breaks.
fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    text.split('\n')
        .flat_map(|line| {
            let wrapped = textwrap::wrap(line, wrap_options(width));
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped.into_iter().map(|l| l.into_owned()).collect()
            }
        })
        .collect()
}

impl Component for PromptBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Your dream");
        let inner = block.inner(area);

        if self.buffer.is_empty() {
            let placeholder = Paragraph::new(PLACEHOLDER)
                .block(block)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(placeholder, area);
            self.scroll_offset = 0;
            if self.focused {
                frame.set_cursor_position((inner.x, inner.y));
            }
            return;
        }

        let visible = inner.height.min(MAX_VISIBLE_LINES).max(1);
        let (row, col) = self.cursor_row_col(inner.width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + visible {
            self.scroll_offset = row + 1 - visible;
        }

        let lines: Vec<Line> = wrapped_lines(&self.buffer, inner.width)
            .into_iter()
            .skip(self.scroll_offset as usize)
            .take(visible as usize)
            .map(Line::from)
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(paragraph, area);

        if self.focused {
            frame.set_cursor_position((inner.x + col, inner.y + (row - self.scroll_offset)));
        }
    }
}

impl EventHandler for PromptBox {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Terminals often paste CRLF; keep the prompt LF-only.
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                self.changed()
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            TuiEvent::Submit => Some(PromptEvent::Submit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(prompt: &mut PromptBox, text: &str) {
        for c in text.chars() {
            prompt.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn typing_emits_full_text() {
        let mut prompt = PromptBox::new();
        assert_eq!(
            prompt.handle_event(&TuiEvent::InputChar('a')),
            Some(PromptEvent::Changed("a".to_string()))
        );
        assert_eq!(
            prompt.handle_event(&TuiEvent::InputChar('b')),
            Some(PromptEvent::Changed("ab".to_string()))
        );
    }

    #[test]
    fn backspace_handles_multibyte() {
        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "꿈속");
        assert_eq!(
            prompt.handle_event(&TuiEvent::Backspace),
            Some(PromptEvent::Changed("꿈".to_string()))
        );
        prompt.handle_event(&TuiEvent::Backspace);
        assert_eq!(prompt.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(prompt.text(), "");
    }

    #[test]
    fn insert_in_middle_and_delete() {
        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "whale");
        prompt.handle_event(&TuiEvent::CursorHome);
        type_str(&mut prompt, "a ");
        assert_eq!(prompt.text(), "a whale");

        assert_eq!(
            prompt.handle_event(&TuiEvent::Delete),
            Some(PromptEvent::Changed("a hale".to_string()))
        );
        prompt.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(prompt.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn home_end_stay_on_logical_line() {
        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "first\nsecond");
        prompt.handle_event(&TuiEvent::CursorHome);
        type_str(&mut prompt, ">");
        assert_eq!(prompt.text(), "first\n>second");
        prompt.handle_event(&TuiEvent::CursorEnd);
        type_str(&mut prompt, "!");
        assert_eq!(prompt.text(), "first\n>second!");
    }

    #[test]
    fn paste_normalizes_line_endings() {
        let mut prompt = PromptBox::new();
        prompt.handle_event(&TuiEvent::Paste("a\r\nb\rc".to_string()));
        assert_eq!(prompt.text(), "a\nb\nc");
    }

    #[test]
    fn submit_keeps_text() {
        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "a flying whale");
        assert_eq!(prompt.handle_event(&TuiEvent::Submit), Some(PromptEvent::Submit));
        assert_eq!(prompt.text(), "a flying whale");
    }

    #[test]
    fn cursor_row_col_tracks_newlines_and_wrapping() {
        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "ab\ncd");
        assert_eq!(prompt.cursor_row_col(20), (1, 2));

        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "aaaaaaaaaa");
        // 10 chars into 4 columns -> "aaaa", "aaaa", "aa"
        assert_eq!(prompt.cursor_row_col(4), (2, 2));
    }

    #[test]
    fn cursor_after_soft_wrap_skips_dropped_space() {
        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "aa bb cc");
        // "aa bb" / "cc": the space at the wrap point is not drawn.
        assert_eq!(prompt.cursor_row_col(5), (1, 2));

        prompt.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(prompt.cursor_row_col(5), (1, 1));
    }

    #[test]
    fn cursor_on_wrapped_line_below_earlier_paragraph() {
        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "one two three\nfour five six");
        // Width 9: "one two" / "three" / "four five" / "six"
        assert_eq!(prompt.cursor_row_col(9), (3, 3));

        prompt.handle_event(&TuiEvent::CursorHome);
        assert_eq!(prompt.cursor_row_col(9), (2, 0));
    }

    #[test]
    fn cursor_after_trailing_newline_is_on_next_row() {
        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "ab\n");
        assert_eq!(prompt.cursor_row_col(20), (1, 0));
    }

    #[test]
    fn wide_chars_count_double() {
        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "꿈");
        assert_eq!(prompt.cursor_row_col(20), (0, 2));
    }

    #[test]
    fn wrapped_lines_keeps_blank_lines() {
        assert_eq!(wrapped_lines("a\n\nb", 10), vec!["a", "", "b"]);
        assert!(wrapped_lines("a", 0).is_empty());
    }

    #[test]
    fn render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(80, PROMPT_BOX_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut prompt = PromptBox::new();
        terminal.draw(|f| prompt.render(f, f.area())).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Your dream"));
        assert!(text.contains("Describe a scene"));
    }

    #[test]
    fn render_scrolls_to_cursor() {
        let backend = TestBackend::new(30, PROMPT_BOX_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut prompt = PromptBox::new();
        type_str(&mut prompt, "l1\nl2\nl3\nl4\nl5\nl6\nl7");
        terminal.draw(|f| prompt.render(f, f.area())).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("l7"));
        assert!(!text.contains("l1"));
        assert_eq!(prompt.scroll_offset, 2);
    }
}
