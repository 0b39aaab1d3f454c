//! Generic labeled-field form renderer shared by the deposit, withdrawal,
//! transfer, and account creation forms.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::{self, Palette};

/// One row of a form as the renderer sees it.
pub struct FieldView<'a> {
    pub label: &'a str,
    pub value: String,
    pub focused: bool,
}

impl<'a> FieldView<'a> {
    pub fn new(label: &'a str, value: impl Into<String>, focused: bool) -> Self {
        Self {
            label,
            value: value.into(),
            focused,
        }
    }
}

/// Render a bordered form with one line per field. The focused field gets
/// a highlighted background and a trailing cursor marker.
pub fn render_form(
    f: &mut Frame,
    area: Rect,
    title: &str,
    fields: &[FieldView],
    submitting: bool,
    p: &Palette,
) {
    // An empty title means the caller already drew a frame (popup forms).
    let inner = if title.is_empty() {
        area
    } else {
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);
        inner
    };

    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(1)).collect();
    constraints.push(Constraint::Length(1)); // spacer
    constraints.push(Constraint::Length(1)); // status line
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(inner);

    for (i, field) in fields.iter().enumerate() {
        let value_style = if field.focused {
            theme::form_field_focused_style(p)
        } else {
            theme::form_field_style(p)
        };

        let mut spans = vec![
            Span::styled(
                format!("{:<14}", field.label),
                theme::help_text_style(p).add_modifier(Modifier::BOLD),
            ),
            Span::styled(field.value.clone(), value_style),
        ];
        if field.focused && !submitting {
            spans.push(Span::styled("▏", theme::loading_style(p)));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), chunks[i]);
    }

    let status = if submitting {
        Line::from(Span::styled("Submitting...", theme::loading_style(p)))
    } else {
        Line::from(Span::styled(
            "Tab next field | Enter submit | Esc cancel",
            theme::help_text_style(p),
        ))
    };
    f.render_widget(Paragraph::new(status), chunks[fields.len() + 1]);
}
