//! Customer lookup input shown on the Accounts screen.

use ratatui::prelude::Rect;
use ratatui::{
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::{self, Palette};

/// Render the customer lookup field with the current query.
pub fn render_lookup_input(f: &mut Frame, area: Rect, query: &str, p: &Palette) {
    let input = Paragraph::new(query).style(theme::loading_style(p)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Customer ID (Enter: search, Esc: clear)"),
    );

    f.render_widget(input, area);
}
