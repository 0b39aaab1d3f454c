use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::state::{Notification, NotificationKind};
use crate::ui::theme::Palette;
use crate::ui::utils;

/// Render the transient notification banner in the top-right corner.
pub fn render_notification(f: &mut Frame, notification: &Notification, p: &Palette) {
    let text = utils::sanitize_text(&notification.text);
    let width = (text.chars().count() as u16 + 4).min(f.area().width.saturating_sub(2));
    let area = top_right(f.area(), width, 3);

    let (title, color) = match notification.kind {
        NotificationKind::Success => ("", p.success),
        NotificationKind::Error => (" Error ", p.border_danger),
    };

    f.render_widget(Clear, area);
    let banner = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(banner, area);
}

fn top_right(parent: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height), Constraint::Min(0)])
        .split(parent);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(width)])
        .split(vertical[0])[1]
}
