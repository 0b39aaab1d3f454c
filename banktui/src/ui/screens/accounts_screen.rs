use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::state::{AccountsState, CreateField, CreateAccountFormState, InputMode, LoadingState};
use crate::ui::{
    components::{empty_state, form, help_bar, lookup_input, popup, screen_title},
    layouts,
    theme::{self, Palette},
    utils,
};
use bank_api::endpoints::accounts::Account;

const HELP_TEXT: &str = "j/k select | Enter history | / lookup | n new | r refresh | Esc back";

pub fn render(f: &mut Frame, state: &AccountsState, cache: &[Account], p: &Palette) {
    if state.input_mode == InputMode::Lookup || state.lookup_results.is_some() {
        let (title_area, lookup_area, content_area, help_area) =
            layouts::screen_layout_with_lookup(f.area());

        screen_title::render_screen_title(f, title_area, "Accounts", &state.accounts_loading, p);
        lookup_input::render_lookup_input(f, lookup_area, &state.lookup_query, p);
        render_content(f, content_area, state, cache, p);
        help_bar::render_help_bar(f, help_area, HELP_TEXT, p);
    } else {
        let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

        screen_title::render_screen_title(f, title_area, "Accounts", &state.accounts_loading, p);
        render_content(f, content_area, state, cache, p);
        help_bar::render_help_bar(f, help_area, HELP_TEXT, p);
    }

    if let Some(form_state) = &state.create_form {
        render_create_form(f, form_state, p);
    }
}

fn render_content(f: &mut Frame, area: Rect, state: &AccountsState, cache: &[Account], p: &Palette) {
    let visible = state.visible_accounts(cache);

    // Show loading message if currently loading and nothing cached yet
    if matches!(state.accounts_loading, LoadingState::Loading(..)) && visible.is_empty() {
        empty_state::render_loading_state(f, area, "Accounts", "Loading accounts...", p);
        return;
    }

    if visible.is_empty() {
        let (message, hint) = match &state.lookup_results {
            Some(results) => (
                format!("No accounts for customer {}", results.customer_id),
                Some("Esc clears the lookup"),
            ),
            None => ("No accounts found".to_string(), Some("Press n to create one")),
        };
        empty_state::render_empty_state(f, area, "Accounts", &message, hint, p);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Account"),
        Cell::from("Customer"),
        Cell::from("Type"),
        Cell::from(Text::from("Balance").right_aligned()),
        Cell::from("Status"),
    ])
    .style(theme::header_style(p))
    .underlined();

    let rows: Vec<Row> = visible
        .iter()
        .map(|account| {
            let balance_color = theme::amount_color(p, account.balance);
            let status = if account.active { "active" } else { "inactive" };

            Row::new(vec![
                Cell::from(utils::group_account_id(&account.account_id)),
                Cell::from(utils::sanitize_text(&account.customer_id)),
                Cell::from(account.account_type.display_name()),
                Cell::from(
                    Text::from(utils::fmt_currency(account.balance, &account.currency))
                        .right_aligned(),
                )
                .style(Style::default().fg(balance_color)),
                Cell::from(status),
            ])
        })
        .collect();

    let title = match &state.lookup_results {
        Some(results) => format!("Accounts for {}", results.customer_id),
        None => "Accounts".to_string(),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(theme::selection_style(p));

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn render_create_form(f: &mut Frame, form_state: &CreateAccountFormState, p: &Palette) {
    let inner = popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::MEDIUM,
        " New Account ",
        theme::info_border_style(p),
    );

    let fields = [
        form::FieldView::new(
            "Customer ID",
            form_state.customer_id.clone(),
            form_state.focus == CreateField::CustomerId,
        ),
        form::FieldView::new(
            "Type (space)",
            form_state.account_type.display_name(),
            form_state.focus == CreateField::AccountType,
        ),
        form::FieldView::new(
            "Opening",
            form_state.initial_balance.clone(),
            form_state.focus == CreateField::InitialBalance,
        ),
        form::FieldView::new(
            "Currency",
            form_state.currency.clone(),
            form_state.focus == CreateField::Currency,
        ),
    ];

    form::render_form(f, inner, "", &fields, form_state.is_submitting(), p);
}
