//! Shared screen title component with loading indicator.

use ratatui::prelude::Rect;
use ratatui::{text::Span, widgets::Paragraph, Frame};

use crate::state::LoadingState;
use crate::ui::layouts;
use crate::ui::theme::{self, Palette};

use super::loading_indicator;

/// Render a screen title with the loading spinner positioned in the
/// top-right corner.
pub fn render_screen_title(
    f: &mut Frame,
    area: Rect,
    title: &str,
    loading_state: &LoadingState,
    p: &Palette,
) {
    let (title_area, indicator_area) = layouts::title_with_loading(area);

    let title_widget = Paragraph::new(Span::styled(title, theme::title_style(p)));
    f.render_widget(title_widget, title_area);

    loading_indicator::render_loading_indicator(f, indicator_area, loading_state, p);
}
