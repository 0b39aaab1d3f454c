use crate::state::TransactionTab;
use crate::state::validators::{CreateAccountPlan, MoneyPlan, TransferPlan};
use bank_api::endpoints::{accounts::Account, transactions::Transaction};

/// Commands to execute (user actions → state changes and background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Selection
    SelectNext,
    SelectPrevious,

    // Navigation
    NavigateBack,
    NavigateToDashboard,
    NavigateToAccounts,
    NavigateToTransactions,
    SelectTab(TransactionTab),
    NextTab,
    PrevTab,

    // Data loading
    RefreshAccounts,
    LoadAccountHistory {
        account_id: String,
    },

    // Customer lookup (Accounts screen)
    EnterLookupMode,
    AppendLookupChar(char),
    DeleteLookupChar,
    SubmitLookup,
    ClearLookup,

    // Form editing
    EnterCreateAccountMode,
    EnterFormMode,
    ExitFormMode,
    NextFormField,
    PrevFormField,
    AppendFormChar(char),
    DeleteFormChar,
    SubmitForm,

    // Writes issued after validation (transfer goes through confirmation first)
    ExecuteCreateAccount {
        plan: CreateAccountPlan,
    },
    ExecuteDeposit {
        plan: MoneyPlan,
    },
    ExecuteWithdrawal {
        plan: MoneyPlan,
    },
    ExecuteTransfer {
        plan: TransferPlan,
    },

    // Confirmation modal
    ConfirmPendingAction,
    CancelPendingAction,

    // Theme
    ToggleTheme,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Events from background tasks (responses to commands)
#[derive(Debug, Clone)]
pub enum DataEvent {
    // Account cache loads (the list is replaced wholesale, never merged)
    AccountsLoaded {
        accounts: Vec<Account>,
    },
    AccountsLoadFailed {
        error: String,
    },

    // Customer lookup
    CustomerAccountsLoaded {
        customer_id: String,
        accounts: Vec<Account>,
    },
    CustomerLookupFailed {
        error: String,
    },

    // Per-account history
    HistoryLoaded {
        account_id: String,
        transactions: Vec<Transaction>,
    },
    HistoryLoadFailed {
        error: String,
    },

    // Writes
    AccountCreated {
        account: Account,
    },
    AccountCreateFailed {
        error: String,
    },
    DepositCompleted {
        transaction: Transaction,
    },
    DepositFailed {
        error: String,
    },
    WithdrawalCompleted {
        transaction: Transaction,
    },
    WithdrawalFailed {
        error: String,
    },
    TransferCompleted {
        transaction: Transaction,
    },
    TransferFailed {
        error: String,
    },
}
