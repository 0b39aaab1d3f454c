pub mod reducer;
pub mod validators;

use crate::events::AppCommand;
use crate::prefs::Theme;
use crate::ui::screens::Screen;
use bank_api::endpoints::accounts::{Account, AccountType};
use bank_api::endpoints::transactions::Transaction;
use ratatui::widgets::TableState;
use std::cell::RefCell;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;

/// How long a transient notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn loading() -> Self {
        LoadingState::Loading(ThrobberState::default())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(..))
    }
}

/// Represents input mode for screens that support text entry
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Lookup,
    Form,
}

/// Sub-tabs of the Transactions screen
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionTab {
    #[default]
    Deposit,
    Withdraw,
    Transfer,
    History,
}

impl TransactionTab {
    pub const ALL: [TransactionTab; 4] = [
        TransactionTab::Deposit,
        TransactionTab::Withdraw,
        TransactionTab::Transfer,
        TransactionTab::History,
    ];

    pub fn next(&self) -> Self {
        match self {
            Self::Deposit => Self::Withdraw,
            Self::Withdraw => Self::Transfer,
            Self::Transfer => Self::History,
            Self::History => Self::Deposit,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Deposit => Self::History,
            Self::Withdraw => Self::Deposit,
            Self::Transfer => Self::Withdraw,
            Self::History => Self::Transfer,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::Transfer => "Transfer",
            Self::History => "History",
        }
    }
}

/// Form field for deposit and withdrawal forms
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyField {
    #[default]
    AccountId,
    Amount,
    Currency,
    Description,
}

impl MoneyField {
    pub fn next(&self) -> Self {
        match self {
            Self::AccountId => Self::Amount,
            Self::Amount => Self::Currency,
            Self::Currency => Self::Description,
            Self::Description => Self::AccountId,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::AccountId => Self::Description,
            Self::Amount => Self::AccountId,
            Self::Currency => Self::Amount,
            Self::Description => Self::Currency,
        }
    }
}

/// State for the deposit and withdrawal forms
#[derive(Debug, Clone)]
pub struct MoneyFormState {
    pub account_id: String,
    pub amount: String,
    pub currency: String,
    pub description: String,
    pub focus: MoneyField,
    pub submit_state: LoadingState,
}

impl MoneyFormState {
    pub fn new() -> Self {
        Self {
            account_id: String::new(),
            amount: String::new(),
            currency: "USD".to_string(),
            description: String::new(),
            focus: MoneyField::default(),
            submit_state: LoadingState::default(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_state.is_loading()
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            MoneyField::AccountId => &mut self.account_id,
            MoneyField::Amount => &mut self.amount,
            MoneyField::Currency => &mut self.currency,
            MoneyField::Description => &mut self.description,
        }
    }

    /// Reset the per-submission fields, keeping account and currency for
    /// repeated operations against the same account.
    pub fn clear_submission(&mut self) {
        self.amount.clear();
        self.description.clear();
    }
}

impl Default for MoneyFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Form field for the transfer form
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferField {
    #[default]
    FromAccount,
    ToAccount,
    Amount,
    Currency,
    Description,
}

impl TransferField {
    pub fn next(&self) -> Self {
        match self {
            Self::FromAccount => Self::ToAccount,
            Self::ToAccount => Self::Amount,
            Self::Amount => Self::Currency,
            Self::Currency => Self::Description,
            Self::Description => Self::FromAccount,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::FromAccount => Self::Description,
            Self::ToAccount => Self::FromAccount,
            Self::Amount => Self::ToAccount,
            Self::Currency => Self::Amount,
            Self::Description => Self::Currency,
        }
    }
}

/// State for the transfer form
#[derive(Debug, Clone)]
pub struct TransferFormState {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: String,
    pub currency: String,
    pub description: String,
    pub focus: TransferField,
    pub submit_state: LoadingState,
}

impl TransferFormState {
    pub fn new() -> Self {
        Self {
            from_account_id: String::new(),
            to_account_id: String::new(),
            amount: String::new(),
            currency: "USD".to_string(),
            description: String::new(),
            focus: TransferField::default(),
            submit_state: LoadingState::default(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_state.is_loading()
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            TransferField::FromAccount => &mut self.from_account_id,
            TransferField::ToAccount => &mut self.to_account_id,
            TransferField::Amount => &mut self.amount,
            TransferField::Currency => &mut self.currency,
            TransferField::Description => &mut self.description,
        }
    }

    pub fn clear_submission(&mut self) {
        self.amount.clear();
        self.description.clear();
    }
}

impl Default for TransferFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Form field for account creation
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    #[default]
    CustomerId,
    AccountType,
    InitialBalance,
    Currency,
}

impl CreateField {
    pub fn next(&self) -> Self {
        match self {
            Self::CustomerId => Self::AccountType,
            Self::AccountType => Self::InitialBalance,
            Self::InitialBalance => Self::Currency,
            Self::Currency => Self::CustomerId,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::CustomerId => Self::Currency,
            Self::AccountType => Self::CustomerId,
            Self::InitialBalance => Self::AccountType,
            Self::Currency => Self::InitialBalance,
        }
    }
}

/// State for the account creation form
#[derive(Debug, Clone)]
pub struct CreateAccountFormState {
    pub customer_id: String,
    pub account_type: AccountType,
    pub initial_balance: String,
    pub currency: String,
    pub focus: CreateField,
    pub submit_state: LoadingState,
}

impl CreateAccountFormState {
    pub fn new() -> Self {
        Self {
            customer_id: String::new(),
            account_type: AccountType::Checking,
            initial_balance: "0".to_string(),
            currency: "USD".to_string(),
            focus: CreateField::default(),
            submit_state: LoadingState::default(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_state.is_loading()
    }

    pub fn toggle_account_type(&mut self) {
        self.account_type = match self.account_type {
            AccountType::Checking => AccountType::Savings,
            AccountType::Savings => AccountType::Checking,
        };
    }
}

impl Default for CreateAccountFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient notification kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A single transient notification; each new report replaces the last.
#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

/// A pending confirm-before-submit action. At most one exists; requesting
/// a new confirmation while one is pending silently replaces it.
#[derive(Debug, Clone)]
pub struct PendingConfirmation {
    pub title: String,
    pub message: String,
    pub action: Box<AppCommand>,
}

/// Derived dashboard totals, computed from the cached account list.
/// Balances are summed naively across currencies; no conversion data
/// is available from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_accounts: usize,
    pub active_accounts: usize,
    pub total_balance: f64,
}

impl DashboardSummary {
    pub fn from_accounts(accounts: &[Account]) -> Self {
        Self {
            total_accounts: accounts.len(),
            active_accounts: accounts.iter().filter(|a| a.active).count(),
            total_balance: accounts.iter().map(|a| a.balance).sum(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    /// Shared account cache: replaced wholesale on every load, read by all
    /// render paths, never consulted as the authority for writes.
    pub accounts: Vec<Account>,

    // Global UI state
    pub theme: Theme,
    pub confirmation: Option<PendingConfirmation>,
    pub notification: Option<Notification>,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_theme(Theme::default())
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            history: vec![Screen::Dashboard(DashboardState::default())],
            accounts: Vec::new(),
            theme,
            confirmation: None,
            notification: None,
            pending_key: None,
            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    pub fn notify_success(&mut self, text: impl Into<String>) {
        self.notification = Some(Notification {
            text: text.into(),
            kind: NotificationKind::Success,
            shown_at: Instant::now(),
        });
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.notification = Some(Notification {
            text: text.into(),
            kind: NotificationKind::Error,
            shown_at: Instant::now(),
        });
    }

    /// Drop the notification once its display window has passed.
    pub fn expire_notification(&mut self, now: Instant) {
        if let Some(notification) = &self.notification {
            if now.duration_since(notification.shown_at) >= NOTIFICATION_TTL {
                self.notification = None;
            }
        }
    }

    /// Store a pending confirmation, replacing any previous one.
    pub fn request_confirmation(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        action: AppCommand,
    ) {
        self.confirmation = Some(PendingConfirmation {
            title: title.into(),
            message: message.into(),
            action: Box::new(action),
        });
    }

    /// Take the pending action, transitioning the modal back to idle.
    /// Returns None when no confirmation is pending.
    pub fn take_pending_action(&mut self) -> Option<AppCommand> {
        self.confirmation.take().map(|pending| *pending.action)
    }

    /// Clear the pending confirmation without running its action.
    pub fn cancel_confirmation(&mut self) {
        self.confirmation = None;
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match self.current_screen_mut() {
            Screen::Dashboard(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.summary_loading {
                    return Some(throbber_state);
                }
            }
            Screen::Accounts(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.accounts_loading {
                    return Some(throbber_state);
                }
                if let Some(form) = &mut state.create_form {
                    if let LoadingState::Loading(ref mut throbber_state) = form.submit_state {
                        return Some(throbber_state);
                    }
                }
            }
            Screen::Transactions(state) => {
                let submit_state = match state.active_tab {
                    TransactionTab::Deposit => &mut state.deposit_form.submit_state,
                    TransactionTab::Withdraw => &mut state.withdraw_form.submit_state,
                    TransactionTab::Transfer => &mut state.transfer_form.submit_state,
                    TransactionTab::History => &mut state.history_loading,
                };
                if let LoadingState::Loading(ref mut throbber_state) = submit_state {
                    return Some(throbber_state);
                }
            }
        }
        None
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default, Debug, Clone)]
pub struct DashboardState {
    pub summary_loading: LoadingState,
}

/// Customer lookup results shown in place of the full account list.
#[derive(Debug, Clone)]
pub struct CustomerAccounts {
    pub customer_id: String,
    pub accounts: Vec<Account>,
}

#[derive(Default, Debug, Clone)]
pub struct AccountsState {
    pub accounts_loading: LoadingState,
    pub table_state: RefCell<TableState>,
    pub input_mode: InputMode,
    pub lookup_query: String,
    pub lookup_results: Option<CustomerAccounts>,
    pub create_form: Option<CreateAccountFormState>,
}

impl AccountsState {
    /// The account list currently on display: lookup results when a
    /// customer search is active, otherwise the shared cache.
    pub fn visible_accounts<'a>(&'a self, cache: &'a [Account]) -> &'a [Account] {
        match &self.lookup_results {
            Some(results) => &results.accounts,
            None => cache,
        }
    }

    pub fn selected_account<'a>(&'a self, cache: &'a [Account]) -> Option<&'a Account> {
        let visible = self.visible_accounts(cache);
        let selected = self.table_state.borrow().selected()?;
        visible.get(selected)
    }
}

#[derive(Debug, Clone)]
pub struct TransactionsState {
    pub active_tab: TransactionTab,
    pub input_mode: InputMode,

    pub deposit_form: MoneyFormState,
    pub withdraw_form: MoneyFormState,
    pub transfer_form: TransferFormState,

    // History tab
    pub history_account_input: String,
    /// The account whose history is on display; also decides which side
    /// of a transfer the viewer is on.
    pub history_account_id: Option<String>,
    pub transactions: Vec<Transaction>,
    pub history_loading: LoadingState,
    pub table_state: RefCell<TableState>,
}

impl TransactionsState {
    pub fn new() -> Self {
        Self {
            active_tab: TransactionTab::default(),
            input_mode: InputMode::default(),
            deposit_form: MoneyFormState::new(),
            withdraw_form: MoneyFormState::new(),
            transfer_form: TransferFormState::new(),
            history_account_input: String::new(),
            history_account_id: None,
            transactions: Vec::new(),
            history_loading: LoadingState::default(),
            table_state: RefCell::default(),
        }
    }
}

impl Default for TransactionsState {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance a table selection, wrapping at the end.
pub fn scroll_next(table_state: &RefCell<TableState>, num_items: usize) {
    let mut table_state = table_state.borrow_mut();
    if num_items > 0 {
        if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
            table_state.select_first();
        } else {
            table_state.scroll_down_by(1)
        }
    }
}

/// Move a table selection up, wrapping at the top.
pub fn scroll_prev(table_state: &RefCell<TableState>, num_items: usize) {
    let mut table_state = table_state.borrow_mut();
    if num_items > 0 {
        if table_state.selected().unwrap_or(0) == 0 {
            // select_last() stores a sentinel until the next render clamps
            // it; readers need the concrete index immediately.
            table_state.select(Some(num_items - 1));
        } else {
            table_state.scroll_up_by(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, balance: f64, active: bool) -> Account {
        Account {
            account_id: id.to_string(),
            customer_id: "CUST-1".to_string(),
            account_type: AccountType::Checking,
            balance,
            currency: "USD".to_string(),
            active,
        }
    }

    #[test]
    fn dashboard_summary_counts_and_sums() {
        let accounts = vec![
            account("A", 100.0, true),
            account("B", 250.5, true),
            account("C", 0.0, false),
        ];
        let summary = DashboardSummary::from_accounts(&accounts);
        assert_eq!(summary.total_accounts, 3);
        assert_eq!(summary.active_accounts, 2);
        assert!((summary.total_balance - 350.5).abs() < f64::EPSILON);
    }

    #[test]
    fn dashboard_summary_of_empty_cache_is_zero() {
        let summary = DashboardSummary::from_accounts(&[]);
        assert_eq!(summary.total_accounts, 0);
        assert_eq!(summary.active_accounts, 0);
        assert_eq!(summary.total_balance, 0.0);
    }

    #[test]
    fn second_confirmation_replaces_the_first() {
        let mut state = AppState::new();
        state.request_confirmation("Confirm", "first", AppCommand::NavigateToAccounts);
        state.request_confirmation("Confirm", "second", AppCommand::NavigateToTransactions);

        // Only the second action survives, and it is taken exactly once.
        assert_eq!(
            state.take_pending_action(),
            Some(AppCommand::NavigateToTransactions)
        );
        assert_eq!(state.take_pending_action(), None);
    }

    #[test]
    fn cancel_discards_the_pending_action() {
        let mut state = AppState::new();
        state.request_confirmation("Confirm", "message", AppCommand::Quit);
        state.cancel_confirmation();
        assert_eq!(state.take_pending_action(), None);
    }

    #[test]
    fn notification_expires_after_ttl() {
        let mut state = AppState::new();
        state.notify_success("Deposited $10.00");
        let shown_at = state.notification.as_ref().unwrap().shown_at;

        state.expire_notification(shown_at + Duration::from_secs(1));
        assert!(state.notification.is_some());

        state.expire_notification(shown_at + NOTIFICATION_TTL);
        assert!(state.notification.is_none());
    }

    #[test]
    fn new_notification_replaces_previous() {
        let mut state = AppState::new();
        state.notify_error("first");
        state.notify_success("second");
        let notification = state.notification.as_ref().unwrap();
        assert_eq!(notification.text, "second");
        assert_eq!(notification.kind, NotificationKind::Success);
    }

    #[test]
    fn selected_account_follows_the_table_selection() {
        let cache = vec![account("A", 1.0, true), account("B", 2.0, true)];
        let accounts_state = AccountsState {
            table_state: RefCell::new(TableState::default().with_selected(1)),
            ..Default::default()
        };
        assert_eq!(
            accounts_state
                .selected_account(&cache)
                .map(|a| a.account_id.as_str()),
            Some("B")
        );
    }

    #[test]
    fn scroll_prev_wraps_to_a_real_index() {
        let table_state = RefCell::new(TableState::default().with_selected(0));
        scroll_prev(&table_state, 3);
        // The wrapped index must be readable without a render in between.
        assert_eq!(table_state.borrow().selected(), Some(2));
    }

    #[test]
    fn lookup_results_shadow_the_cache() {
        let cache = vec![account("A", 1.0, true), account("B", 2.0, true)];
        let mut accounts_state = AccountsState::default();
        assert_eq!(accounts_state.visible_accounts(&cache).len(), 2);

        accounts_state.lookup_results = Some(CustomerAccounts {
            customer_id: "CUST-2".to_string(),
            accounts: vec![account("C", 3.0, true)],
        });
        let visible = accounts_state.visible_accounts(&cache);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].account_id, "C");
    }
}
