use banktui::events::DataEvent;
use banktui::input::Key;
use banktui::prefs::Theme;
use banktui::state::{InputMode, LoadingState, NotificationKind, TransactionTab};
use banktui::testing::TestApp;
use banktui::ui::screens::Screen;

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

fn transaction(id: &str, account_id: &str, amount: f64) -> Transaction {
    Transaction {
        transaction_id: id.to_string(),
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
fn test_quit_flow() {
    let mut app = TestApp::new();

    // Initially should not quit
    app.assert_not_quit();

    // Press 'q' to quit
    app.send_key(Key::Char('q'));

    // Assert app should quit
    app.assert_should_quit();
}

#[test]
fn test_theme_toggle() {
    let mut app = TestApp::new();

    assert_eq!(app.state().theme, Theme::Dark);

    app.send_key(Key::Char('T'));
    assert_eq!(app.state().theme, Theme::Light);

    app.send_key(Key::Char('T'));
    assert_eq!(app.state().theme, Theme::Dark);
}

#[test]
fn test_multi_key_sequence_ga() {
    let mut app = TestApp::new();

    // Initially no pending key and on the dashboard
    assert_eq!(app.state().pending_key, None);
    assert!(matches!(app.state().current_screen(), Screen::Dashboard(_)));

    // First 'g' sets pending key
    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));

    // 'a' completes the sequence and navigates to accounts
    app.send_key(Key::Char('a'));
    assert_eq!(app.state().pending_key, None);
    assert!(matches!(app.state().current_screen(), Screen::Accounts(_)));
}

#[test]
fn test_pending_key_cleared_after_invalid_sequence() {
    let mut app = TestApp::new();

    // Press 'g' to set pending key
    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));

    // Press an invalid key (not 'd', 'a', or 't')
    app.send_key(Key::Char('x'));

    // Pending key should be cleared
    assert_eq!(app.state().pending_key, None);
}

#[test]
fn test_back_navigation() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('a')]);
    assert!(matches!(app.state().current_screen(), Screen::Accounts(_)));

    app.send_key(Key::Esc);
    assert!(matches!(app.state().current_screen(), Screen::Dashboard(_)));

    // Backing out of the root screen is a no-op
    app.send_key(Key::Esc);
    assert!(matches!(app.state().current_screen(), Screen::Dashboard(_)));
}

#[test]
fn test_navigation_with_j_k() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('a')]);
    app.send_data_event(DataEvent::AccountsLoaded {
        accounts: vec![account("A1", 100.0), account("B2", 200.0), account("C3", 50.0)],
    });

    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert_eq!(accounts_state.table_state.borrow().selected(), Some(0));
    } else {
        panic!("expected accounts screen");
    }

    // Press 'j' twice to move down
    app.send_keys(&[Key::Char('j'), Key::Char('j')]);
    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert_eq!(accounts_state.table_state.borrow().selected(), Some(2));
    }

    // 'j' at the bottom wraps to the top
    app.send_key(Key::Char('j'));
    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert_eq!(accounts_state.table_state.borrow().selected(), Some(0));
    }

    // 'k' at the top wraps to the bottom
    app.send_key(Key::Char('k'));
    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert_eq!(accounts_state.table_state.borrow().selected(), Some(2));
    }
}

#[test]
fn test_lookup_mode_entry_and_typing() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('a')]);

    // Enter lookup mode with '/'
    app.send_key(Key::Char('/'));
    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert_eq!(accounts_state.input_mode, InputMode::Lookup);
    } else {
        panic!("expected accounts screen");
    }

    app.type_text("CUST-7");
    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert_eq!(accounts_state.lookup_query, "CUST-7");
    }

    // Backspace deletes one character
    app.send_key(Key::Backspace);
    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert_eq!(accounts_state.lookup_query, "CUST-");
    }

    // Esc clears the query and leaves lookup mode
    app.send_key(Key::Esc);
    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert_eq!(accounts_state.lookup_query, "");
        assert_eq!(accounts_state.input_mode, InputMode::Normal);
    }
}

#[test]
fn test_empty_lookup_is_rejected() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('a'), Key::Char('/')]);
    app.send_key(Key::Enter);

    let notification = app.state().notification.as_ref().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.text, "Customer ID is required");
}

#[test]
fn test_lookup_results_cleared_by_escape() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('a')]);
    app.send_data_event(DataEvent::AccountsLoaded {
        accounts: vec![account("A1", 100.0)],
    });
    app.send_data_event(DataEvent::CustomerAccountsLoaded {
        customer_id: "CUST-7".to_string(),
        accounts: vec![account("B2", 200.0)],
    });

    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert!(accounts_state.lookup_results.is_some());
    } else {
        panic!("expected accounts screen");
    }

    // First Esc drops the lookup results instead of navigating back
    app.send_key(Key::Esc);
    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert!(accounts_state.lookup_results.is_none());
    } else {
        panic!("expected accounts screen");
    }
}

#[test]
fn test_create_account_form_flow() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('a'), Key::Char('n')]);

    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert_eq!(accounts_state.input_mode, InputMode::Form);
        assert!(accounts_state.create_form.is_some());
    } else {
        panic!("expected accounts screen");
    }

    // Type the customer id into the first field
    app.type_text("CUST-9");

    // Tab to account type, space toggles Checking -> Savings
    app.send_keys(&[Key::Tab, Key::Char(' ')]);

    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        let form = accounts_state.create_form.as_ref().unwrap();
        assert_eq!(form.customer_id, "CUST-9");
        assert_eq!(form.account_type, AccountType::Savings);
    }

    // Enter submits; in sync mode this only marks the form as submitting
    app.send_key(Key::Enter);
    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert!(accounts_state.create_form.as_ref().unwrap().is_submitting());
    }

    // Success closes the form and reports it
    app.send_data_event(DataEvent::AccountCreated {
        account: account("NEW1", 0.0),
    });
    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert!(accounts_state.create_form.is_none());
        assert_eq!(accounts_state.input_mode, InputMode::Normal);
    }
    assert_eq!(
        app.state().notification.as_ref().unwrap().kind,
        NotificationKind::Success
    );
}

#[test]
fn test_create_form_escape_discards() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('a'), Key::Char('n')]);
    app.type_text("CUST-9");
    app.send_key(Key::Esc);

    if let Screen::Accounts(accounts_state) = app.state().current_screen() {
        assert!(accounts_state.create_form.is_none());
        assert_eq!(accounts_state.input_mode, InputMode::Normal);
    } else {
        panic!("expected accounts screen");
    }
    // Still on the accounts screen, Esc only closed the form
    assert!(matches!(app.state().current_screen(), Screen::Accounts(_)));
}

#[test]
fn test_deposit_submit_and_completion() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('t'), Key::Char('i')]);
    app.type_text("A1");
    app.send_key(Key::Tab);
    app.type_text("25.5");
    app.send_key(Key::Enter);

    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert!(transactions_state.deposit_form.is_submitting());
    } else {
        panic!("expected transactions screen");
    }

    app.send_data_event(DataEvent::DepositCompleted {
        transaction: transaction("TX-1", "A1", 25.5),
    });

    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert!(!transactions_state.deposit_form.is_submitting());
        assert!(transactions_state.deposit_form.amount.is_empty());
    }
    assert_eq!(
        app.state().notification.as_ref().unwrap().kind,
        NotificationKind::Success
    );
}

#[test]
fn test_deposit_rejects_bad_amount() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('t'), Key::Char('i')]);
    app.type_text("A1");
    app.send_key(Key::Tab);
    app.type_text("-5");
    app.send_key(Key::Enter);

    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert!(!transactions_state.deposit_form.is_submitting());
    } else {
        panic!("expected transactions screen");
    }
    assert_eq!(
        app.state().notification.as_ref().unwrap().kind,
        NotificationKind::Error
    );
}

#[test]
fn test_transfer_requires_confirmation() {
    let mut app = TestApp::new();

    // '3' selects the transfer tab before entering form mode
    app.send_keys(&[Key::Char('g'), Key::Char('t'), Key::Char('3'), Key::Char('i')]);
    app.type_text("ACC1");
    app.send_key(Key::Tab);
    app.type_text("ACC2");
    app.send_key(Key::Tab);
    app.type_text("50");
    app.send_key(Key::Enter);

    // A valid transfer parks behind the confirmation modal
    let confirmation = app.state().confirmation.as_ref().unwrap();
    assert_eq!(confirmation.title, "Confirm Transfer");
    assert!(confirmation.message.contains("$50.00"));

    // 'n' cancels without submitting
    app.send_key(Key::Char('n'));
    assert!(app.state().confirmation.is_none());
    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert!(!transactions_state.transfer_form.is_submitting());
        // Form values survive a cancelled confirmation
        assert_eq!(transactions_state.transfer_form.from_account_id, "ACC1");
    }

    // Submit again and confirm this time
    app.send_key(Key::Enter);
    assert!(app.state().confirmation.is_some());
    app.send_key(Key::Char('y'));
    assert!(app.state().confirmation.is_none());
    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert!(transactions_state.transfer_form.is_submitting());
    }
}

#[test]
fn test_transfer_to_same_account_is_blocked() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('t'), Key::Char('3'), Key::Char('i')]);
    app.type_text("ACC1");
    app.send_key(Key::Tab);
    app.type_text("ACC1");
    app.send_key(Key::Tab);
    app.type_text("50");
    app.send_key(Key::Enter);

    assert!(app.state().confirmation.is_none());
    let notification = app.state().notification.as_ref().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.text, "Cannot transfer to the same account");
}

#[test]
fn test_transfer_blocked_by_known_insufficient_balance() {
    let mut app = TestApp::new();

    // Seed the cache so the sender's balance is known locally
    app.send_data_event(DataEvent::AccountsLoaded {
        accounts: vec![account("ACC1", 10.0)],
    });

    app.send_keys(&[Key::Char('g'), Key::Char('t'), Key::Char('3'), Key::Char('i')]);
    app.type_text("ACC1");
    app.send_key(Key::Tab);
    app.type_text("ACC2");
    app.send_key(Key::Tab);
    app.type_text("50");
    app.send_key(Key::Enter);

    assert!(app.state().confirmation.is_none());
    let notification = app.state().notification.as_ref().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert!(notification.text.contains("Insufficient funds"));
}

#[test]
fn test_account_enter_opens_history() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('a')]);
    app.send_data_event(DataEvent::AccountsLoaded {
        accounts: vec![account("A1", 100.0), account("B2", 200.0)],
    });

    // Select the second account and open its history
    app.send_keys(&[Key::Char('j'), Key::Enter]);

    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert_eq!(transactions_state.active_tab, TransactionTab::History);
        assert_eq!(transactions_state.history_account_input, "B2");
        assert!(matches!(
            transactions_state.history_loading,
            LoadingState::Loading(_)
        ));
    } else {
        panic!("expected transactions screen");
    }

    app.send_data_event(DataEvent::HistoryLoaded {
        account_id: "B2".to_string(),
        transactions: vec![transaction("TX-1", "B2", 30.0)],
    });

    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert_eq!(transactions_state.transactions.len(), 1);
        assert_eq!(transactions_state.history_account_id.as_deref(), Some("B2"));
        assert_eq!(transactions_state.history_loading, LoadingState::Loaded);
    }
}

#[test]
fn test_tab_cycle_on_transactions_screen() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('t')]);

    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert_eq!(transactions_state.active_tab, TransactionTab::Deposit);
    } else {
        panic!("expected transactions screen");
    }

    app.send_key(Key::Tab);
    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert_eq!(transactions_state.active_tab, TransactionTab::Withdraw);
    }

    app.send_key(Key::BackTab);
    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert_eq!(transactions_state.active_tab, TransactionTab::Deposit);
    }

    // BackTab from the first tab wraps to the last
    app.send_key(Key::BackTab);
    if let Screen::Transactions(transactions_state) = app.state().current_screen() {
        assert_eq!(transactions_state.active_tab, TransactionTab::History);
    }
}

#[test]
fn test_confirmation_swallows_unrelated_keys() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('t'), Key::Char('3'), Key::Char('i')]);
    app.type_text("ACC1");
    app.send_key(Key::Tab);
    app.type_text("ACC2");
    app.send_key(Key::Tab);
    app.type_text("50");
    app.send_key(Key::Enter);
    assert!(app.state().confirmation.is_some());

    // 'q' normally quits, but the modal swallows it
    app.send_key(Key::Char('q'));
    app.assert_not_quit();
    assert!(app.state().confirmation.is_some());

    app.send_key(Key::Esc);
    assert!(app.state().confirmation.is_none());
    app.assert_not_quit();
}
