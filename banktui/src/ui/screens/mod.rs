pub mod accounts_screen;
pub mod dashboard_screen;
pub mod transactions_screen;

use crate::state::{AccountsState, DashboardState, TransactionsState};

#[derive(Debug, Clone)]
pub enum Screen {
    Dashboard(DashboardState),
    Accounts(AccountsState),
    Transactions(Box<TransactionsState>),
}
