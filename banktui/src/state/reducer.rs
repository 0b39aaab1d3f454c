use super::{AccountsState, AppState, InputMode, LoadingState, TransactionsState};
use crate::events::DataEvent;
use crate::ui::screens::Screen;
use crate::ui::utils::{fmt_currency, group_account_id};
use ratatui::widgets::TableState;
use std::cell::RefCell;

/// The screen that issued a request may have been covered by later
/// navigation by the time the response arrives. Responses are routed by
/// walking the navigation stack from the top, so an in-flight form is
/// settled wherever it sits.
fn transactions_state_mut(state: &mut AppState) -> Option<&mut TransactionsState> {
    state
        .history
        .iter_mut()
        .rev()
        .find_map(|screen| match screen {
            Screen::Transactions(transactions_state) => Some(&mut **transactions_state),
            _ => None,
        })
}

fn accounts_state_mut(state: &mut AppState) -> Option<&mut AccountsState> {
    state
        .history
        .iter_mut()
        .rev()
        .find_map(|screen| match screen {
            Screen::Accounts(accounts_state) => Some(accounts_state),
            _ => None,
        })
}

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        // Full account list loaded: the cache is replaced wholesale, never
        // merged, so a stale entry can't outlive a refresh. Every screen
        // reading the cache settles its loading state, not just the top one.
        DataEvent::AccountsLoaded { mut accounts } => {
            accounts.sort_by(|a, b| a.account_id.cmp(&b.account_id));
            state.accounts = accounts;

            for screen in state.history.iter_mut() {
                match screen {
                    Screen::Dashboard(dashboard_state) => {
                        dashboard_state.summary_loading = LoadingState::Loaded;
                    }
                    Screen::Accounts(accounts_state) => {
                        accounts_state.accounts_loading = LoadingState::Loaded;
                        if accounts_state.table_state.borrow().selected().is_none() {
                            accounts_state.table_state =
                                RefCell::new(TableState::default().with_selected(0));
                        }
                    }
                    _ => {}
                }
            }
        }

        DataEvent::AccountsLoadFailed { error } => {
            for screen in state.history.iter_mut() {
                match screen {
                    Screen::Dashboard(dashboard_state) => {
                        dashboard_state.summary_loading = LoadingState::Error(error.clone());
                    }
                    Screen::Accounts(accounts_state) => {
                        accounts_state.accounts_loading = LoadingState::Error(error.clone());
                    }
                    _ => {}
                }
            }
            // One notification per failure, regardless of how many screens
            // read the shared cache.
            state.notify_error(error);
        }

        DataEvent::CustomerAccountsLoaded {
            customer_id,
            accounts,
        } => {
            if let Some(accounts_state) = accounts_state_mut(state) {
                accounts_state.lookup_results = Some(super::CustomerAccounts {
                    customer_id,
                    accounts,
                });
                accounts_state.input_mode = InputMode::Normal;
                accounts_state.accounts_loading = LoadingState::Loaded;
                accounts_state.table_state = RefCell::new(TableState::default().with_selected(0));
            }
        }

        DataEvent::CustomerLookupFailed { error } => {
            if let Some(accounts_state) = accounts_state_mut(state) {
                accounts_state.accounts_loading = LoadingState::Error(error.clone());
            }
            state.notify_error(error);
        }

        DataEvent::HistoryLoaded {
            account_id,
            mut transactions,
        } => {
            if let Some(transactions_state) = transactions_state_mut(state) {
                // Most recent first
                transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                transactions_state.transactions = transactions;
                transactions_state.history_account_id = Some(account_id);
                transactions_state.history_loading = LoadingState::Loaded;
                transactions_state.table_state =
                    RefCell::new(TableState::default().with_selected(0));
            }
        }

        DataEvent::HistoryLoadFailed { error } => {
            if let Some(transactions_state) = transactions_state_mut(state) {
                transactions_state.history_loading = LoadingState::Error(error.clone());
            }
            state.notify_error(error);
        }

        DataEvent::AccountCreated { account } => {
            if let Some(accounts_state) = accounts_state_mut(state) {
                accounts_state.create_form = None;
                accounts_state.input_mode = InputMode::Normal;
            }
            state.notify_success(format!(
                "Created account {}",
                group_account_id(&account.account_id)
            ));
        }

        DataEvent::AccountCreateFailed { error } => {
            if let Some(accounts_state) = accounts_state_mut(state) {
                if let Some(form) = &mut accounts_state.create_form {
                    form.submit_state = LoadingState::Error(error.clone());
                }
            }
            state.notify_error(error);
        }

        DataEvent::DepositCompleted { transaction } => {
            if let Some(transactions_state) = transactions_state_mut(state) {
                transactions_state.deposit_form.submit_state = LoadingState::Loaded;
                transactions_state.deposit_form.clear_submission();
            }
            state.notify_success(format!(
                "Deposited {} to {}",
                fmt_currency(transaction.amount, &transaction.currency),
                group_account_id(&transaction.account_id)
            ));
        }

        DataEvent::DepositFailed { error } => {
            if let Some(transactions_state) = transactions_state_mut(state) {
                transactions_state.deposit_form.submit_state = LoadingState::Error(error.clone());
            }
            state.notify_error(error);
        }

        DataEvent::WithdrawalCompleted { transaction } => {
            if let Some(transactions_state) = transactions_state_mut(state) {
                transactions_state.withdraw_form.submit_state = LoadingState::Loaded;
                transactions_state.withdraw_form.clear_submission();
            }
            state.notify_success(format!(
                "Withdrew {} from {}",
                fmt_currency(transaction.amount, &transaction.currency),
                group_account_id(&transaction.account_id)
            ));
        }

        DataEvent::WithdrawalFailed { error } => {
            if let Some(transactions_state) = transactions_state_mut(state) {
                transactions_state.withdraw_form.submit_state = LoadingState::Error(error.clone());
            }
            state.notify_error(error);
        }

        DataEvent::TransferCompleted { transaction } => {
            if let Some(transactions_state) = transactions_state_mut(state) {
                transactions_state.transfer_form.submit_state = LoadingState::Loaded;
                transactions_state.transfer_form.clear_submission();
            }
            let receiver = transaction
                .related_account_id
                .as_deref()
                .map(group_account_id)
                .unwrap_or_default();
            state.notify_success(format!(
                "Transferred {} to {}",
                fmt_currency(transaction.amount, &transaction.currency),
                receiver
            ));
        }

        DataEvent::TransferFailed { error } => {
            if let Some(transactions_state) = transactions_state_mut(state) {
                transactions_state.transfer_form.submit_state = LoadingState::Error(error.clone());
            }
            state.notify_error(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{NotificationKind, TransactionsState};
    use bank_api::endpoints::accounts::{Account, AccountType};
    use bank_api::endpoints::transactions::{Transaction, TransactionType};
    use chrono::{TimeZone, Utc};

    fn account(id: &str, balance: f64) -> Account {
        Account {
            account_id: id.to_string(),
            customer_id: "CUST-1".to_string(),
            account_type: AccountType::Checking,
            balance,
            currency: "USD".to_string(),
            active: true,
        }
    }

    fn deposit_tx(account_id: &str, amount: f64) -> Transaction {
        Transaction {
            transaction_id: "TX-1".to_string(),
            account_id: account_id.to_string(),
            transaction_type: TransactionType::Deposit,
            amount,
            currency: "USD".to_string(),
            description: None,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
            related_account_id: None,
        }
    }

    #[test]
    fn accounts_load_replaces_cache_wholesale() {
        let mut state = AppState::new();
        state.accounts = vec![account("OLD", 1.0)];

        reduce_data_event(
            &mut state,
            DataEvent::AccountsLoaded {
                accounts: vec![account("B", 2.0), account("A", 1.0)],
            },
        );

        let ids: Vec<&str> = state.accounts.iter().map(|a| a.account_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn reloading_identical_accounts_is_idempotent() {
        let mut state = AppState::new();
        let accounts = vec![account("A", 1.0), account("B", 2.0)];

        reduce_data_event(
            &mut state,
            DataEvent::AccountsLoaded {
                accounts: accounts.clone(),
            },
        );
        let first = state.accounts.clone();

        reduce_data_event(&mut state, DataEvent::AccountsLoaded { accounts });
        assert_eq!(state.accounts, first);
    }

    #[test]
    fn load_failure_reports_exactly_one_notification() {
        let mut state = AppState::new();
        reduce_data_event(
            &mut state,
            DataEvent::AccountsLoadFailed {
                error: "connection refused".to_string(),
            },
        );

        let notification = state.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.text, "connection refused");

        if let Screen::Dashboard(dashboard_state) = state.current_screen() {
            assert!(matches!(
                dashboard_state.summary_loading,
                LoadingState::Error(_)
            ));
        } else {
            panic!("expected dashboard screen");
        }
    }

    #[test]
    fn history_is_sorted_most_recent_first() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Transactions(Box::new(TransactionsState::new())));

        let mut old_tx = deposit_tx("A1", 10.0);
        old_tx.transaction_id = "TX-OLD".to_string();
        old_tx.timestamp = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let new_tx = deposit_tx("A1", 20.0);

        reduce_data_event(
            &mut state,
            DataEvent::HistoryLoaded {
                account_id: "A1".to_string(),
                transactions: vec![old_tx, new_tx],
            },
        );

        if let Screen::Transactions(transactions_state) = state.current_screen() {
            assert_eq!(transactions_state.transactions[0].transaction_id, "TX-1");
            assert_eq!(transactions_state.history_account_id.as_deref(), Some("A1"));
            assert_eq!(transactions_state.history_loading, LoadingState::Loaded);
        } else {
            panic!("expected transactions screen");
        }
    }

    #[test]
    fn deposit_success_clears_submitting_and_notifies() {
        let mut state = AppState::new();
        let mut transactions_state = TransactionsState::new();
        transactions_state.deposit_form.account_id = "A1".to_string();
        transactions_state.deposit_form.amount = "25.5".to_string();
        transactions_state.deposit_form.submit_state = LoadingState::loading();
        state.navigate_to(Screen::Transactions(Box::new(transactions_state)));

        reduce_data_event(
            &mut state,
            DataEvent::DepositCompleted {
                transaction: deposit_tx("A1", 25.5),
            },
        );

        if let Screen::Transactions(transactions_state) = state.current_screen() {
            assert_eq!(
                transactions_state.deposit_form.submit_state,
                LoadingState::Loaded
            );
            assert!(transactions_state.deposit_form.amount.is_empty());
        } else {
            panic!("expected transactions screen");
        }
        let notification = state.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert!(notification.text.contains("$25.50"));
    }

    #[test]
    fn completion_settles_a_form_covered_by_later_navigation() {
        let mut state = AppState::new();
        let mut transactions_state = TransactionsState::new();
        transactions_state.deposit_form.account_id = "A1".to_string();
        transactions_state.deposit_form.amount = "25.5".to_string();
        transactions_state.deposit_form.submit_state = LoadingState::loading();
        state.navigate_to(Screen::Transactions(Box::new(transactions_state)));

        // The user hops to the dashboard while the request is in flight
        state.navigate_to(Screen::Dashboard(Default::default()));

        reduce_data_event(
            &mut state,
            DataEvent::DepositCompleted {
                transaction: deposit_tx("A1", 25.5),
            },
        );

        state.navigate_back();
        if let Screen::Transactions(transactions_state) = state.current_screen() {
            assert_eq!(
                transactions_state.deposit_form.submit_state,
                LoadingState::Loaded
            );
            assert!(transactions_state.deposit_form.amount.is_empty());
        } else {
            panic!("expected transactions screen");
        }
    }

    #[test]
    fn deposit_failure_keeps_form_values() {
        let mut state = AppState::new();
        let mut transactions_state = TransactionsState::new();
        transactions_state.deposit_form.account_id = "A1".to_string();
        transactions_state.deposit_form.amount = "25.5".to_string();
        transactions_state.deposit_form.submit_state = LoadingState::loading();
        state.navigate_to(Screen::Transactions(Box::new(transactions_state)));

        reduce_data_event(
            &mut state,
            DataEvent::DepositFailed {
                error: "Insufficient funds".to_string(),
            },
        );

        if let Screen::Transactions(transactions_state) = state.current_screen() {
            assert!(matches!(
                transactions_state.deposit_form.submit_state,
                LoadingState::Error(_)
            ));
            assert_eq!(transactions_state.deposit_form.amount, "25.5");
        } else {
            panic!("expected transactions screen");
        }
        assert_eq!(
            state.notification.as_ref().unwrap().kind,
            NotificationKind::Error
        );
    }

    #[test]
    fn lookup_results_land_on_accounts_screen() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Accounts(Default::default()));

        reduce_data_event(
            &mut state,
            DataEvent::CustomerAccountsLoaded {
                customer_id: "CUST-2".to_string(),
                accounts: vec![account("C", 3.0)],
            },
        );

        if let Screen::Accounts(accounts_state) = state.current_screen() {
            let results = accounts_state.lookup_results.as_ref().unwrap();
            assert_eq!(results.customer_id, "CUST-2");
            assert_eq!(results.accounts.len(), 1);
            assert_eq!(accounts_state.input_mode, InputMode::Normal);
        } else {
            panic!("expected accounts screen");
        }
    }
}
