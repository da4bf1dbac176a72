use ratatui::Frame;
use ratatui::layout::Rect;

/// Something that can draw itself into a region of the frame.
///
/// Props are plain struct fields set by the parent before each render.
/// `render` takes `&mut self` so stateful components can refresh caches
/// (scroll offsets, last known width) while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level `TuiEvent`s into its own higher-level events.
pub trait EventHandler {
    type Event;

    /// Returns `None` when the event was ignored or changed nothing the parent cares about.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
