use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
};

use crate::state::{
    InputMode, LoadingState, MoneyField, MoneyFormState, TransactionTab, TransactionsState,
    TransferField,
};
use crate::ui::{
    components::{empty_state, form, help_bar, screen_title},
    layouts,
    theme::{self, Palette},
    utils,
};

const HELP_TEXT: &str = "Tab/1-4 switch tab | i edit form | Enter submit | Esc back";

pub fn render(f: &mut Frame, state: &TransactionsState, p: &Palette) {
    let (title_area, tabs_area, content_area, help_area) = layouts::screen_layout_with_tabs(f.area());

    let loading = match state.active_tab {
        TransactionTab::Deposit => &state.deposit_form.submit_state,
        TransactionTab::Withdraw => &state.withdraw_form.submit_state,
        TransactionTab::Transfer => &state.transfer_form.submit_state,
        TransactionTab::History => &state.history_loading,
    };
    screen_title::render_screen_title(f, title_area, "Transactions", loading, p);

    render_tabs(f, tabs_area, state, p);

    match state.active_tab {
        TransactionTab::Deposit => {
            render_money_form(f, content_area, "Deposit", &state.deposit_form, state, p)
        }
        TransactionTab::Withdraw => {
            render_money_form(f, content_area, "Withdraw", &state.withdraw_form, state, p)
        }
        TransactionTab::Transfer => render_transfer_form(f, content_area, state, p),
        TransactionTab::History => render_history(f, content_area, state, p),
    }

    help_bar::render_help_bar(f, help_area, HELP_TEXT, p);
}

fn render_tabs(f: &mut Frame, area: Rect, state: &TransactionsState, p: &Palette) {
    let titles: Vec<Line> = TransactionTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.display_name())))
        .collect();

    let selected = TransactionTab::ALL
        .iter()
        .position(|t| *t == state.active_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::help_text_style(p))
        .highlight_style(theme::title_style(p))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(tabs, area);
}

fn render_money_form(
    f: &mut Frame,
    area: Rect,
    title: &str,
    form_state: &MoneyFormState,
    state: &TransactionsState,
    p: &Palette,
) {
    let editing = state.input_mode == InputMode::Form;
    let focus = |field: MoneyField| editing && form_state.focus == field;

    let fields = [
        form::FieldView::new("Account ID", form_state.account_id.clone(), focus(MoneyField::AccountId)),
        form::FieldView::new("Amount", form_state.amount.clone(), focus(MoneyField::Amount)),
        form::FieldView::new("Currency", form_state.currency.clone(), focus(MoneyField::Currency)),
        form::FieldView::new(
            "Description",
            form_state.description.clone(),
            focus(MoneyField::Description),
        ),
    ];

    form::render_form(f, area, title, &fields, form_state.is_submitting(), p);
}

fn render_transfer_form(f: &mut Frame, area: Rect, state: &TransactionsState, p: &Palette) {
    let form_state = &state.transfer_form;
    let editing = state.input_mode == InputMode::Form;
    let focus = |field: TransferField| editing && form_state.focus == field;

    let fields = [
        form::FieldView::new(
            "From account",
            form_state.from_account_id.clone(),
            focus(TransferField::FromAccount),
        ),
        form::FieldView::new(
            "To account",
            form_state.to_account_id.clone(),
            focus(TransferField::ToAccount),
        ),
        form::FieldView::new("Amount", form_state.amount.clone(), focus(TransferField::Amount)),
        form::FieldView::new("Currency", form_state.currency.clone(), focus(TransferField::Currency)),
        form::FieldView::new(
            "Description",
            form_state.description.clone(),
            focus(TransferField::Description),
        ),
    ];

    form::render_form(f, area, "Transfer", &fields, form_state.is_submitting(), p);
}

fn render_history(f: &mut Frame, area: Rect, state: &TransactionsState, p: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let editing = state.input_mode == InputMode::Form;
    let input_style = if editing {
        theme::loading_style(p)
    } else {
        theme::form_field_style(p)
    };
    let input = Paragraph::new(state.history_account_input.clone())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Account ID (Enter: load history)"),
        );
    f.render_widget(input, chunks[0]);

    let Some(account_id) = &state.history_account_id else {
        empty_state::render_empty_state(
            f,
            chunks[1],
            "History",
            "Enter an account ID to load its history",
            None,
            p,
        );
        return;
    };

    if matches!(state.history_loading, LoadingState::Loading(..)) && state.transactions.is_empty() {
        empty_state::render_loading_state(f, chunks[1], "History", "Loading transactions...", p);
        return;
    }

    if state.transactions.is_empty() {
        empty_state::render_empty_state(
            f,
            chunks[1],
            "History",
            "No transactions for this account",
            None,
            p,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("When"),
        Cell::from("Type"),
        Cell::from(Text::from("Amount").right_aligned()),
        Cell::from("Counterparty"),
        Cell::from("Description"),
    ])
    .style(theme::header_style(p))
    .underlined();

    let rows: Vec<Row> = state
        .transactions
        .iter()
        .map(|tx| {
            let direction = utils::transaction_direction(tx, account_id);
            let amount_color = match direction {
                utils::Direction::Credit => p.positive,
                utils::Direction::Debit => p.negative,
            };
            let counterparty = match direction {
                // For an incoming transfer the sender is the counterparty
                utils::Direction::Credit if tx.account_id != *account_id => {
                    utils::group_account_id(&tx.account_id)
                }
                _ => tx
                    .related_account_id
                    .as_deref()
                    .map(utils::group_account_id)
                    .unwrap_or_default(),
            };

            Row::new(vec![
                Cell::from(utils::fmt_timestamp(&tx.timestamp)),
                Cell::from(tx.transaction_type.display_name()),
                Cell::from(
                    Text::from(utils::fmt_signed_amount(tx.amount, &tx.currency, direction))
                        .right_aligned(),
                )
                .style(Style::default().fg(amount_color)),
                Cell::from(counterparty),
                Cell::from(utils::sanitize_text(tx.description.as_deref().unwrap_or(""))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(13),
            Constraint::Percentage(17),
            Constraint::Percentage(22),
            Constraint::Percentage(28),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("History for {}", utils::group_account_id(account_id))),
    )
    .row_highlight_style(theme::selection_style(p));

    f.render_stateful_widget(table, chunks[1], &mut state.table_state.borrow_mut());
}
