//! Shared help bar component for consistent bottom navigation hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::{self, Palette};

/// Render a standard help bar with the given text.
///
/// The help bar is styled consistently with muted text in a bordered
/// block, centered alignment. All screens should use this.
pub fn render_help_bar(f: &mut Frame, area: Rect, text: &str, p: &Palette) {
    let help = Paragraph::new(text)
        .style(theme::help_text_style(p))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}

/// Standard help bar text shared by the top-level screens
pub const HELP_TEXT_DEFAULT: &str =
    "gd Dashboard | ga Accounts | gt Transactions | T theme | q quit";
