use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 0: Confirmation modal swallows everything
    if state.confirmation.is_some() {
        return match key {
            Key::Char('y') | Key::Char('Y') | Key::Enter => Some(AppCommand::ConfirmPendingAction),
            Key::Char('n') | Key::Char('N') | Key::Esc => Some(AppCommand::CancelPendingAction),
            _ => None,
        };
    }

    // Priority 1: Form mode (account creation popup or transaction forms)
    if form_mode_active(state) {
        return handle_form_keys(key);
    }

    // Priority 2: Customer lookup mode on the Accounts screen
    if let Screen::Accounts(accounts_state) = state.current_screen() {
        if accounts_state.input_mode == InputMode::Lookup {
            return match key {
                Key::Enter => Some(AppCommand::SubmitLookup),
                Key::Backspace => Some(AppCommand::DeleteLookupChar),
                Key::Char(c) => Some(AppCommand::AppendLookupChar(c)),
                Key::Esc => Some(AppCommand::ClearLookup),
                _ => None,
            };
        }
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            ('g', Key::Char('d')) => Some(AppCommand::NavigateToDashboard),
            ('g', Key::Char('a')) => Some(AppCommand::NavigateToAccounts),
            ('g', Key::Char('t')) => Some(AppCommand::NavigateToTransactions),
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    // Priority 3: Esc clears an active lookup before it navigates back
    if let Screen::Accounts(accounts_state) = state.current_screen() {
        if matches!(key, Key::Esc) && accounts_state.lookup_results.is_some() {
            return Some(AppCommand::ClearLookup);
        }
    }

    match (state.current_screen(), key) {
        // Global quit command
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        // Multi-key sequence initiator: 'g' sets pending key
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),

        // Global theme toggle
        (_, Key::Char('T')) => Some(AppCommand::ToggleTheme),

        // Global back navigation
        (_, Key::Esc | Key::Left | Key::Char('h')) => Some(AppCommand::NavigateBack),

        // Dashboard screen
        (Screen::Dashboard(..), Key::Char('r')) => Some(AppCommand::RefreshAccounts),

        // Accounts screen
        (Screen::Accounts(..), Key::Char('/')) => Some(AppCommand::EnterLookupMode),
        (Screen::Accounts(..), Key::Char('n')) => Some(AppCommand::EnterCreateAccountMode),
        (Screen::Accounts(..), Key::Char('r')) => Some(AppCommand::RefreshAccounts),
        (Screen::Accounts(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Accounts(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Accounts(accounts_state), Key::Enter | Key::Right | Key::Char('l')) => {
            // Open history for the selected account
            let visible = accounts_state.visible_accounts(&state.accounts);
            let selected_idx = accounts_state.table_state.borrow().selected()?;
            let account = visible.get(selected_idx)?;
            Some(AppCommand::LoadAccountHistory {
                account_id: account.account_id.clone(),
            })
        }

        // Transactions screen
        (Screen::Transactions(..), Key::Tab) => Some(AppCommand::NextTab),
        (Screen::Transactions(..), Key::BackTab) => Some(AppCommand::PrevTab),
        (Screen::Transactions(..), Key::Char('1')) => {
            Some(AppCommand::SelectTab(TransactionTab::Deposit))
        }
        (Screen::Transactions(..), Key::Char('2')) => {
            Some(AppCommand::SelectTab(TransactionTab::Withdraw))
        }
        (Screen::Transactions(..), Key::Char('3')) => {
            Some(AppCommand::SelectTab(TransactionTab::Transfer))
        }
        (Screen::Transactions(..), Key::Char('4')) => {
            Some(AppCommand::SelectTab(TransactionTab::History))
        }
        (Screen::Transactions(..), Key::Char('i') | Key::Enter) => Some(AppCommand::EnterFormMode),
        (Screen::Transactions(transactions_state), Key::Char('r')) => {
            // Reload the current account's history
            if transactions_state.active_tab == TransactionTab::History {
                transactions_state
                    .history_account_id
                    .as_ref()
                    .map(|account_id| AppCommand::LoadAccountHistory {
                        account_id: account_id.clone(),
                    })
            } else {
                None
            }
        }
        (Screen::Transactions(transactions_state), Key::Up | Key::Char('k')) => {
            if transactions_state.active_tab == TransactionTab::History {
                Some(AppCommand::SelectPrevious)
            } else {
                None
            }
        }
        (Screen::Transactions(transactions_state), Key::Down | Key::Char('j')) => {
            if transactions_state.active_tab == TransactionTab::History {
                Some(AppCommand::SelectNext)
            } else {
                None
            }
        }

        // Ignore other keys
        _ => None,
    }
}

fn form_mode_active(state: &AppState) -> bool {
    match state.current_screen() {
        Screen::Accounts(accounts_state) => {
            accounts_state.input_mode == InputMode::Form && accounts_state.create_form.is_some()
        }
        Screen::Transactions(transactions_state) => {
            transactions_state.input_mode == InputMode::Form
        }
        _ => false,
    }
}

fn handle_form_keys(key: Key) -> Option<AppCommand> {
    match key {
        Key::Enter => Some(AppCommand::SubmitForm),
        Key::Esc => Some(AppCommand::ExitFormMode),
        Key::Tab | Key::Down => Some(AppCommand::NextFormField),
        Key::BackTab | Key::Up => Some(AppCommand::PrevFormField),
        Key::Backspace => Some(AppCommand::DeleteFormChar),
        Key::Char(c) => Some(AppCommand::AppendFormChar(c)),
        _ => None,
    }
}
