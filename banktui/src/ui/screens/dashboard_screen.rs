use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{DashboardState, DashboardSummary};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts,
    theme::{self, Palette, SUMMARY_CARD_HEIGHT},
    utils,
};
use bank_api::endpoints::accounts::Account;

/// How many account cards fit on the dashboard before the rest collapse
/// into a "+N more" line.
const MAX_ACCOUNT_CARDS: usize = 4;

pub fn render(f: &mut Frame, state: &DashboardState, accounts: &[Account], p: &Palette) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, "Dashboard", &state.summary_loading, p);
    render_content(f, content_area, accounts, p);
    help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DEFAULT, p);
}

fn render_content(f: &mut Frame, area: Rect, accounts: &[Account], p: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SUMMARY_CARD_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(4),
        ])
        .split(area);

    render_summary_cards(f, chunks[0], accounts, p);
    render_account_cards(f, chunks[1], accounts, p);

    // The backend exposes no cross-account activity feed, so this stays a
    // placeholder until one exists.
    let activity = Paragraph::new(Line::from(Span::styled(
        "No recent activity",
        theme::help_text_style(p),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Activity"));
    f.render_widget(activity, chunks[2]);
}

fn render_summary_cards(f: &mut Frame, area: Rect, accounts: &[Account], p: &Palette) {
    let summary = DashboardSummary::from_accounts(accounts);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "Accounts",
        &summary.total_accounts.to_string(),
        p.title,
        p,
    );
    render_card(
        f,
        cards[1],
        "Active",
        &summary.active_accounts.to_string(),
        p.positive,
        p,
    );
    render_card(
        f,
        cards[2],
        "Total Balance",
        &utils::fmt_currency(summary.total_balance, "USD"),
        theme::amount_color(p, summary.total_balance),
        p,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: &str, color: Color, p: &Palette) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];
    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(theme::help_text_style(p))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(card, area);
}

fn render_account_cards(f: &mut Frame, area: Rect, accounts: &[Account], p: &Palette) {
    if accounts.is_empty() {
        empty_state::render_empty_state(
            f,
            area,
            "Accounts",
            "No accounts found",
            Some("Press ga to open the Accounts screen"),
            p,
        );
        return;
    }

    let shown = accounts.len().min(MAX_ACCOUNT_CARDS);
    let mut constraints: Vec<Constraint> = (0..shown).map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, account) in accounts.iter().take(shown).enumerate() {
        let status = if account.active { "" } else { " (inactive)" };
        let line = Line::from(vec![
            Span::styled(
                utils::group_account_id(&account.account_id),
                theme::title_style(p),
            ),
            Span::styled(
                format!("  {}{}", account.account_type.display_name(), status),
                theme::help_text_style(p),
            ),
            Span::raw("  "),
            Span::styled(
                utils::fmt_currency(account.balance, &account.currency),
                Style::default().fg(theme::amount_color(p, account.balance)),
            ),
        ]);
        let card = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(card, rows[i]);
    }

    if accounts.len() > shown {
        let more = Paragraph::new(Span::styled(
            format!("+{} more (ga)", accounts.len() - shown),
            theme::help_text_style(p),
        ))
        .alignment(Alignment::Center);
        f.render_widget(more, rows[shown]);
    }
}
