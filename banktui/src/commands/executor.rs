use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::events::AppCommand;
use crate::state::validators::TransferPlan;
use crate::state::*;
use crate::ui::screens::Screen;
use crate::ui::utils::{fmt_currency, group_account_id};
use ratatui::widgets::TableState;
use std::cell::RefCell;

/// Execute a command by spawning background tasks or applying state changes
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    // Save whether we're setting a pending key (we don't want to clear it in that case)
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    match command {
        AppCommand::RefreshAccounts => {
            begin_accounts_refresh(state);
            spawn_accounts_load(task_manager, data_loader);
        }

        AppCommand::NavigateToDashboard => {
            navigate_to_dashboard(state);
            spawn_accounts_load(task_manager, data_loader);
        }

        AppCommand::NavigateToAccounts => {
            navigate_to_accounts(state);
            spawn_accounts_load(task_manager, data_loader);
        }

        AppCommand::SubmitLookup => {
            if let Some(customer_id) = begin_lookup(state) {
                let data_loader = data_loader.clone();
                let future = async move {
                    data_loader.lookup_customer(customer_id).await;
                };
                task_manager.spawn_load_task("lookup_customer".to_string(), future);
            }
        }

        AppCommand::LoadAccountHistory { account_id } => {
            begin_history_load(state, &account_id);

            let data_loader = data_loader.clone();
            let account_id_clone = account_id.clone();
            let future = async move {
                data_loader.load_history(account_id_clone).await;
            };
            task_manager.spawn_load_task(format!("load_history_{}", account_id), future);
        }

        AppCommand::SubmitForm => {
            if let Some(next) = apply_submit(state) {
                // Validation produced a concrete write; run it through the
                // normal dispatch so the spawn paths stay in one place
                execute_command(next, state, task_manager, data_loader);
            }
        }

        AppCommand::ExecuteCreateAccount { plan } => {
            if begin_create_submit(state) {
                let data_loader = data_loader.clone();
                let future = async move {
                    data_loader.create_account(plan).await;
                };
                task_manager.spawn_load_task("create_account".to_string(), future);
            }
        }

        AppCommand::ExecuteDeposit { plan } => {
            if begin_money_submit(state, TransactionTab::Deposit) {
                let data_loader = data_loader.clone();
                let future = async move {
                    data_loader.deposit(plan).await;
                };
                task_manager.spawn_load_task("deposit".to_string(), future);
            }
        }

        AppCommand::ExecuteWithdrawal { plan } => {
            if begin_money_submit(state, TransactionTab::Withdraw) {
                let data_loader = data_loader.clone();
                let future = async move {
                    data_loader.withdraw(plan).await;
                };
                task_manager.spawn_load_task("withdraw".to_string(), future);
            }
        }

        AppCommand::ExecuteTransfer { plan } => {
            if begin_transfer_submit(state) {
                let data_loader = data_loader.clone();
                let future = async move {
                    data_loader.transfer(plan).await;
                };
                task_manager.spawn_load_task("transfer".to_string(), future);
            }
        }

        AppCommand::ConfirmPendingAction => {
            if let Some(action) = state.take_pending_action() {
                execute_command(action, state, task_manager, data_loader);
            }
        }

        AppCommand::ToggleTheme => {
            state.theme = state.theme.toggled();

            let data_loader = data_loader.clone();
            let theme = state.theme;
            let future = async move {
                data_loader.save_theme(theme).await;
            };
            task_manager.spawn_load_task("save_prefs".to_string(), future);
        }

        other => {
            execute_command_sync(other, state);
            return;
        }
    }

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }
}

/// Synchronous command execution for testing (no background tasks)
///
/// Handles every pure state transition, including the validation half of
/// form submission. Commands that would spawn API calls only flip their
/// loading states here; tests inject the matching DataEvents directly.
///
/// NOTE: This is public for use by the testing module but should not be used in production code.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    match command {
        // Simple state updates
        AppCommand::Quit => state.should_quit = true,
        AppCommand::SetPendingKey(c) => state.pending_key = Some(c),
        AppCommand::ClearPendingKey => state.pending_key = None,
        AppCommand::ToggleTheme => state.theme = state.theme.toggled(),

        // Navigation
        AppCommand::NavigateBack => {
            state.navigate_back();
        }
        AppCommand::NavigateToDashboard => navigate_to_dashboard(state),
        AppCommand::NavigateToAccounts => navigate_to_accounts(state),
        AppCommand::NavigateToTransactions => {
            if !matches!(state.current_screen(), Screen::Transactions(_)) {
                state.navigate_to(Screen::Transactions(Box::new(TransactionsState::new())));
            }
        }

        // Selection
        AppCommand::SelectNext => {
            let cache_len = state.accounts.len();
            match state.current_screen_mut() {
                Screen::Accounts(accounts_state) => {
                    let len = visible_len(accounts_state, cache_len);
                    scroll_next(&accounts_state.table_state, len);
                }
                Screen::Transactions(transactions_state) => {
                    let len = transactions_state.transactions.len();
                    scroll_next(&transactions_state.table_state, len);
                }
                _ => {}
            }
        }
        AppCommand::SelectPrevious => {
            let cache_len = state.accounts.len();
            match state.current_screen_mut() {
                Screen::Accounts(accounts_state) => {
                    let len = visible_len(accounts_state, cache_len);
                    scroll_prev(&accounts_state.table_state, len);
                }
                Screen::Transactions(transactions_state) => {
                    let len = transactions_state.transactions.len();
                    scroll_prev(&transactions_state.table_state, len);
                }
                _ => {}
            }
        }

        // Tab switching
        AppCommand::SelectTab(tab) => {
            if let Screen::Transactions(transactions_state) = state.current_screen_mut() {
                transactions_state.active_tab = tab;
            }
        }
        AppCommand::NextTab => {
            if let Screen::Transactions(transactions_state) = state.current_screen_mut() {
                transactions_state.active_tab = transactions_state.active_tab.next();
            }
        }
        AppCommand::PrevTab => {
            if let Screen::Transactions(transactions_state) = state.current_screen_mut() {
                transactions_state.active_tab = transactions_state.active_tab.prev();
            }
        }

        // Customer lookup
        AppCommand::EnterLookupMode => {
            if let Screen::Accounts(accounts_state) = state.current_screen_mut() {
                accounts_state.input_mode = InputMode::Lookup;
            }
        }
        AppCommand::AppendLookupChar(c) => {
            if let Screen::Accounts(accounts_state) = state.current_screen_mut() {
                accounts_state.lookup_query.push(c);
            }
        }
        AppCommand::DeleteLookupChar => {
            if let Screen::Accounts(accounts_state) = state.current_screen_mut() {
                accounts_state.lookup_query.pop();
            }
        }
        AppCommand::SubmitLookup => {
            // Validation and loading state only; tests inject the result
            begin_lookup(state);
        }
        AppCommand::ClearLookup => {
            if let Screen::Accounts(accounts_state) = state.current_screen_mut() {
                accounts_state.lookup_query.clear();
                accounts_state.lookup_results = None;
                accounts_state.input_mode = InputMode::Normal;
                accounts_state.table_state = RefCell::new(TableState::default().with_selected(0));
            }
        }

        // Form mode
        AppCommand::EnterCreateAccountMode => {
            if let Screen::Accounts(accounts_state) = state.current_screen_mut() {
                accounts_state.create_form = Some(CreateAccountFormState::new());
                accounts_state.input_mode = InputMode::Form;
            }
        }
        AppCommand::EnterFormMode => {
            if let Screen::Transactions(transactions_state) = state.current_screen_mut() {
                transactions_state.input_mode = InputMode::Form;
            }
        }
        AppCommand::ExitFormMode => match state.current_screen_mut() {
            Screen::Accounts(accounts_state) => {
                accounts_state.create_form = None;
                accounts_state.input_mode = InputMode::Normal;
            }
            Screen::Transactions(transactions_state) => {
                transactions_state.input_mode = InputMode::Normal;
            }
            _ => {}
        },
        AppCommand::NextFormField => move_form_focus(state, true),
        AppCommand::PrevFormField => move_form_focus(state, false),
        AppCommand::AppendFormChar(c) => append_form_char(state, c),
        AppCommand::DeleteFormChar => delete_form_char(state),
        AppCommand::SubmitForm => {
            if let Some(next) = apply_submit(state) {
                execute_command_sync(next, state);
            }
        }

        // Writes: loading state only in sync mode
        AppCommand::ExecuteCreateAccount { .. } => {
            begin_create_submit(state);
        }
        AppCommand::ExecuteDeposit { .. } => {
            begin_money_submit(state, TransactionTab::Deposit);
        }
        AppCommand::ExecuteWithdrawal { .. } => {
            begin_money_submit(state, TransactionTab::Withdraw);
        }
        AppCommand::ExecuteTransfer { .. } => {
            begin_transfer_submit(state);
        }

        // Confirmation modal
        AppCommand::ConfirmPendingAction => {
            if let Some(action) = state.take_pending_action() {
                execute_command_sync(action, state);
            }
        }
        AppCommand::CancelPendingAction => {
            state.cancel_confirmation();
        }

        // Data loads: loading state only in sync mode
        AppCommand::RefreshAccounts => begin_accounts_refresh(state),
        AppCommand::LoadAccountHistory { account_id } => begin_history_load(state, &account_id),
    }

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }
}

fn spawn_accounts_load(task_manager: &mut BackgroundTaskManager, data_loader: &DataLoader) {
    let data_loader = data_loader.clone();
    let future = async move {
        data_loader.load_accounts().await;
    };
    task_manager.spawn_load_task("load_accounts".to_string(), future);
}

fn navigate_to_dashboard(state: &mut AppState) {
    match state.current_screen_mut() {
        Screen::Dashboard(dashboard_state) => {
            dashboard_state.summary_loading = LoadingState::loading();
        }
        _ => {
            tracing::debug!("Navigating to dashboard screen");
            state.navigate_to(Screen::Dashboard(DashboardState {
                summary_loading: LoadingState::loading(),
            }));
        }
    }
}

fn navigate_to_accounts(state: &mut AppState) {
    match state.current_screen_mut() {
        Screen::Accounts(accounts_state) => {
            tracing::debug!("Refreshing accounts screen");
            accounts_state.accounts_loading = LoadingState::loading();
        }
        _ => {
            tracing::debug!("Navigating to accounts screen");
            state.navigate_to(Screen::Accounts(AccountsState {
                accounts_loading: LoadingState::loading(),
                ..Default::default()
            }));
        }
    }
}

fn begin_accounts_refresh(state: &mut AppState) {
    match state.current_screen_mut() {
        Screen::Dashboard(dashboard_state) => {
            dashboard_state.summary_loading = LoadingState::loading();
        }
        Screen::Accounts(accounts_state) => {
            accounts_state.accounts_loading = LoadingState::loading();
        }
        _ => {}
    }
}

/// Validate the lookup query. Returns the customer id to search for, or
/// None when the submit should not go out.
fn begin_lookup(state: &mut AppState) -> Option<String> {
    let query = if let Screen::Accounts(accounts_state) = state.current_screen() {
        accounts_state.lookup_query.trim().to_string()
    } else {
        return None;
    };

    if query.is_empty() {
        state.notify_error("Customer ID is required");
        return None;
    }

    if let Screen::Accounts(accounts_state) = state.current_screen_mut() {
        accounts_state.accounts_loading = LoadingState::loading();
    }
    Some(query)
}

fn begin_history_load(state: &mut AppState, account_id: &str) {
    if !matches!(state.current_screen(), Screen::Transactions(_)) {
        state.navigate_to(Screen::Transactions(Box::new(TransactionsState::new())));
    }

    if let Screen::Transactions(transactions_state) = state.current_screen_mut() {
        transactions_state.active_tab = TransactionTab::History;
        transactions_state.input_mode = InputMode::Normal;
        transactions_state.history_account_input = account_id.to_string();
        transactions_state.history_loading = LoadingState::loading();
    }
}

/// Mark the create form as submitting. Returns false when there is no
/// form or a submission is already in flight.
fn begin_create_submit(state: &mut AppState) -> bool {
    if let Screen::Accounts(accounts_state) = state.current_screen_mut() {
        if let Some(form) = &mut accounts_state.create_form {
            if form.is_submitting() {
                return false;
            }
            form.submit_state = LoadingState::loading();
            return true;
        }
    }
    false
}

fn begin_money_submit(state: &mut AppState, tab: TransactionTab) -> bool {
    if let Screen::Transactions(transactions_state) = state.current_screen_mut() {
        let form = match tab {
            TransactionTab::Deposit => &mut transactions_state.deposit_form,
            TransactionTab::Withdraw => &mut transactions_state.withdraw_form,
            _ => return false,
        };
        if form.is_submitting() {
            return false;
        }
        form.submit_state = LoadingState::loading();
        return true;
    }
    false
}

fn begin_transfer_submit(state: &mut AppState) -> bool {
    if let Screen::Transactions(transactions_state) = state.current_screen_mut() {
        if transactions_state.transfer_form.is_submitting() {
            return false;
        }
        transactions_state.transfer_form.submit_state = LoadingState::loading();
        return true;
    }
    false
}

enum SubmitOutcome {
    Command(AppCommand),
    ConfirmTransfer(TransferPlan),
    Invalid(String),
    Ignored,
}

/// Validation half of form submission, borrowing the state immutably.
fn plan_submit(state: &AppState) -> SubmitOutcome {
    match state.current_screen() {
        Screen::Accounts(accounts_state) => {
            let Some(form) = &accounts_state.create_form else {
                return SubmitOutcome::Ignored;
            };
            if form.is_submitting() {
                return SubmitOutcome::Ignored;
            }
            match validators::validate_create_account(form) {
                Ok(plan) => SubmitOutcome::Command(AppCommand::ExecuteCreateAccount { plan }),
                Err(error) => SubmitOutcome::Invalid(error),
            }
        }
        Screen::Transactions(transactions_state) => match transactions_state.active_tab {
            TransactionTab::Deposit => {
                if transactions_state.deposit_form.is_submitting() {
                    return SubmitOutcome::Ignored;
                }
                match validators::validate_money_form(&transactions_state.deposit_form) {
                    Ok(plan) => SubmitOutcome::Command(AppCommand::ExecuteDeposit { plan }),
                    Err(error) => SubmitOutcome::Invalid(error),
                }
            }
            TransactionTab::Withdraw => {
                if transactions_state.withdraw_form.is_submitting() {
                    return SubmitOutcome::Ignored;
                }
                match validators::validate_money_form(&transactions_state.withdraw_form) {
                    Ok(plan) => SubmitOutcome::Command(AppCommand::ExecuteWithdrawal { plan }),
                    Err(error) => SubmitOutcome::Invalid(error),
                }
            }
            TransactionTab::Transfer => {
                if transactions_state.transfer_form.is_submitting() {
                    return SubmitOutcome::Ignored;
                }
                match validators::validate_transfer(
                    &transactions_state.transfer_form,
                    &state.accounts,
                ) {
                    Ok(plan) => SubmitOutcome::ConfirmTransfer(plan),
                    Err(error) => SubmitOutcome::Invalid(error),
                }
            }
            TransactionTab::History => {
                let account_id = transactions_state.history_account_input.trim();
                if account_id.is_empty() {
                    SubmitOutcome::Invalid("Account ID is required".to_string())
                } else {
                    SubmitOutcome::Command(AppCommand::LoadAccountHistory {
                        account_id: account_id.to_string(),
                    })
                }
            }
        },
        _ => SubmitOutcome::Ignored,
    }
}

/// Resolve a SubmitForm command. Transfers park behind the confirmation
/// modal; everything else yields the follow-up command to dispatch.
fn apply_submit(state: &mut AppState) -> Option<AppCommand> {
    match plan_submit(state) {
        SubmitOutcome::Command(command) => Some(command),
        SubmitOutcome::ConfirmTransfer(plan) => {
            let message = format!(
                "Transfer {} from {} to {}?",
                fmt_currency(plan.amount, &plan.currency),
                group_account_id(&plan.from_account_id),
                group_account_id(&plan.to_account_id),
            );
            state.request_confirmation(
                "Confirm Transfer",
                message,
                AppCommand::ExecuteTransfer { plan },
            );
            None
        }
        SubmitOutcome::Invalid(error) => {
            state.notify_error(error);
            None
        }
        SubmitOutcome::Ignored => None,
    }
}

fn move_form_focus(state: &mut AppState, forward: bool) {
    match state.current_screen_mut() {
        Screen::Accounts(accounts_state) => {
            if let Some(form) = &mut accounts_state.create_form {
                form.focus = if forward {
                    form.focus.next()
                } else {
                    form.focus.prev()
                };
            }
        }
        Screen::Transactions(transactions_state) => match transactions_state.active_tab {
            TransactionTab::Deposit => {
                let form = &mut transactions_state.deposit_form;
                form.focus = if forward {
                    form.focus.next()
                } else {
                    form.focus.prev()
                };
            }
            TransactionTab::Withdraw => {
                let form = &mut transactions_state.withdraw_form;
                form.focus = if forward {
                    form.focus.next()
                } else {
                    form.focus.prev()
                };
            }
            TransactionTab::Transfer => {
                let form = &mut transactions_state.transfer_form;
                form.focus = if forward {
                    form.focus.next()
                } else {
                    form.focus.prev()
                };
            }
            TransactionTab::History => {
                // Single input field, nothing to cycle
            }
        },
        _ => {}
    }
}

fn append_form_char(state: &mut AppState, c: char) {
    if c.is_control() {
        return;
    }
    match state.current_screen_mut() {
        Screen::Accounts(accounts_state) => {
            if let Some(form) = &mut accounts_state.create_form {
                match form.focus {
                    CreateField::CustomerId => form.customer_id.push(c),
                    // Space cycles the type; free text makes no sense here
                    CreateField::AccountType => {
                        if c == ' ' {
                            form.toggle_account_type();
                        }
                    }
                    CreateField::InitialBalance => form.initial_balance.push(c),
                    CreateField::Currency => form.currency.push(c),
                }
            }
        }
        Screen::Transactions(transactions_state) => match transactions_state.active_tab {
            TransactionTab::Deposit => transactions_state.deposit_form.focused_value_mut().push(c),
            TransactionTab::Withdraw => {
                transactions_state.withdraw_form.focused_value_mut().push(c)
            }
            TransactionTab::Transfer => {
                transactions_state.transfer_form.focused_value_mut().push(c)
            }
            TransactionTab::History => transactions_state.history_account_input.push(c),
        },
        _ => {}
    }
}

fn delete_form_char(state: &mut AppState) {
    match state.current_screen_mut() {
        Screen::Accounts(accounts_state) => {
            if let Some(form) = &mut accounts_state.create_form {
                match form.focus {
                    CreateField::CustomerId => {
                        form.customer_id.pop();
                    }
                    CreateField::AccountType => {}
                    CreateField::InitialBalance => {
                        form.initial_balance.pop();
                    }
                    CreateField::Currency => {
                        form.currency.pop();
                    }
                }
            }
        }
        Screen::Transactions(transactions_state) => match transactions_state.active_tab {
            TransactionTab::Deposit => {
                transactions_state.deposit_form.focused_value_mut().pop();
            }
            TransactionTab::Withdraw => {
                transactions_state.withdraw_form.focused_value_mut().pop();
            }
            TransactionTab::Transfer => {
                transactions_state.transfer_form.focused_value_mut().pop();
            }
            TransactionTab::History => {
                transactions_state.history_account_input.pop();
            }
        },
        _ => {}
    }
}

fn visible_len(accounts_state: &AccountsState, cache_len: usize) -> usize {
    match &accounts_state.lookup_results {
        Some(results) => results.accounts.len(),
        None => cache_len,
    }
}
