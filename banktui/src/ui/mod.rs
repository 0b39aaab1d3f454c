pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;
pub mod utils;

use crate::state::AppState;
use ratatui::Frame;
use screens::*;

/// Pure render dispatcher - routes to appropriate screen renderer
/// This function is read-only and never mutates state
pub fn render_app(f: &mut Frame, state: &AppState) {
    let p = theme::palette(state.theme);

    match state.current_screen() {
        Screen::Dashboard(dashboard_state) => {
            dashboard_screen::render(f, dashboard_state, &state.accounts, p);
        }
        Screen::Accounts(accounts_state) => {
            accounts_screen::render(f, accounts_state, &state.accounts, p);
        }
        Screen::Transactions(transactions_state) => {
            transactions_screen::render(f, transactions_state, p);
        }
    }

    // Notification banner sits above screen content
    if let Some(notification) = &state.notification {
        components::notification::render_notification(f, notification, p);
    }

    // Confirmation modal on top of everything
    if let Some(pending) = &state.confirmation {
        components::confirmation::render_confirmation(f, pending, p);
    }
}
