use crate::events::DataEvent;
use crate::prefs::{Preferences, PrefsStore, Theme};
use crate::state::validators::{CreateAccountPlan, MoneyPlan, TransferPlan};
use bank_api::endpoints::accounts::{AccountsByCustomer, CreateAccount, ListAccounts};
use bank_api::endpoints::transactions::{Deposit, Transfer, TransactionsByAccount, Withdraw};
use bank_api::Client;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs API calls off the render loop and reports back as DataEvents
#[derive(Clone)]
pub struct DataLoader {
    pub api_client: Arc<Client>,
    pub prefs: Arc<PrefsStore>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(
        api_client: Arc<Client>,
        prefs: Arc<PrefsStore>,
        data_tx: mpsc::UnboundedSender<DataEvent>,
    ) -> Self {
        Self {
            api_client,
            prefs,
            data_tx,
        }
    }

    /// Load the full account list
    pub async fn load_accounts(&self) {
        tracing::info!("Loading accounts");

        match self.api_client.send(ListAccounts::new()).await {
            Ok(accounts) => {
                tracing::info!("Loaded {} accounts", accounts.len());
                let _ = self.data_tx.send(DataEvent::AccountsLoaded { accounts });
            }
            Err(e) => {
                tracing::error!("Failed to load accounts: {}", e);
                let _ = self.data_tx.send(DataEvent::AccountsLoadFailed {
                    error: e.message(),
                });
            }
        }
    }

    /// Load the accounts belonging to a single customer
    pub async fn lookup_customer(&self, customer_id: String) {
        tracing::info!("Looking up accounts for customer {}", customer_id);

        match self
            .api_client
            .send(AccountsByCustomer::new(customer_id.clone()))
            .await
        {
            Ok(accounts) => {
                tracing::info!(
                    "Found {} accounts for customer {}",
                    accounts.len(),
                    customer_id
                );
                let _ = self.data_tx.send(DataEvent::CustomerAccountsLoaded {
                    customer_id,
                    accounts,
                });
            }
            Err(e) => {
                tracing::error!("Customer lookup failed for {}: {}", customer_id, e);
                let _ = self.data_tx.send(DataEvent::CustomerLookupFailed {
                    error: e.message(),
                });
            }
        }
    }

    /// Load the transaction history of an account
    pub async fn load_history(&self, account_id: String) {
        tracing::info!("Loading history for account {}", account_id);

        match self
            .api_client
            .send(TransactionsByAccount::new(account_id.clone()))
            .await
        {
            Ok(transactions) => {
                tracing::info!(
                    "Loaded {} transactions for account {}",
                    transactions.len(),
                    account_id
                );
                let _ = self.data_tx.send(DataEvent::HistoryLoaded {
                    account_id,
                    transactions,
                });
            }
            Err(e) => {
                tracing::error!("Failed to load history for {}: {}", account_id, e);
                let _ = self.data_tx.send(DataEvent::HistoryLoadFailed {
                    error: e.message(),
                });
            }
        }
    }

    /// Create a new account, then refresh the account cache
    pub async fn create_account(&self, plan: CreateAccountPlan) {
        tracing::info!("Creating account for customer {}", plan.customer_id);

        let req = CreateAccount::new(plan.customer_id, plan.account_type)
            .initial_balance(plan.initial_balance)
            .currency(plan.currency);

        match self.api_client.send(req).await {
            Ok(account) => {
                tracing::info!("Created account {}", account.account_id);
                let _ = self.data_tx.send(DataEvent::AccountCreated { account });
                self.load_accounts().await;
            }
            Err(e) => {
                tracing::error!("Failed to create account: {}", e);
                let _ = self.data_tx.send(DataEvent::AccountCreateFailed {
                    error: e.message(),
                });
            }
        }
    }

    /// Deposit into an account, then refresh the account cache
    pub async fn deposit(&self, plan: MoneyPlan) {
        tracing::info!("Depositing {} into account {}", plan.amount, plan.account_id);

        let mut req = Deposit::new(plan.account_id, plan.amount, plan.currency);
        if let Some(description) = plan.description {
            req = req.description(description);
        }

        match self.api_client.send(req).await {
            Ok(transaction) => {
                tracing::info!("Deposit completed: {}", transaction.transaction_id);
                let _ = self.data_tx.send(DataEvent::DepositCompleted { transaction });
                self.load_accounts().await;
            }
            Err(e) => {
                tracing::error!("Deposit failed: {}", e);
                let _ = self.data_tx.send(DataEvent::DepositFailed {
                    error: e.message(),
                });
            }
        }
    }

    /// Withdraw from an account, then refresh the account cache
    pub async fn withdraw(&self, plan: MoneyPlan) {
        tracing::info!(
            "Withdrawing {} from account {}",
            plan.amount,
            plan.account_id
        );

        let mut req = Withdraw::new(plan.account_id, plan.amount, plan.currency);
        if let Some(description) = plan.description {
            req = req.description(description);
        }

        match self.api_client.send(req).await {
            Ok(transaction) => {
                tracing::info!("Withdrawal completed: {}", transaction.transaction_id);
                let _ = self
                    .data_tx
                    .send(DataEvent::WithdrawalCompleted { transaction });
                self.load_accounts().await;
            }
            Err(e) => {
                tracing::error!("Withdrawal failed: {}", e);
                let _ = self.data_tx.send(DataEvent::WithdrawalFailed {
                    error: e.message(),
                });
            }
        }
    }

    /// Transfer between accounts, then refresh the account cache
    pub async fn transfer(&self, plan: TransferPlan) {
        tracing::info!(
            "Transferring {} from {} to {}",
            plan.amount,
            plan.from_account_id,
            plan.to_account_id
        );

        let mut req = Transfer::new(
            plan.from_account_id,
            plan.to_account_id,
            plan.amount,
            plan.currency,
        );
        if let Some(description) = plan.description {
            req = req.description(description);
        }

        match self.api_client.send(req).await {
            Ok(transaction) => {
                tracing::info!("Transfer completed: {}", transaction.transaction_id);
                let _ = self
                    .data_tx
                    .send(DataEvent::TransferCompleted { transaction });
                self.load_accounts().await;
            }
            Err(e) => {
                tracing::error!("Transfer failed: {}", e);
                let _ = self.data_tx.send(DataEvent::TransferFailed {
                    error: e.message(),
                });
            }
        }
    }

    /// Persist the selected theme
    pub async fn save_theme(&self, theme: Theme) {
        if let Err(e) = self.prefs.save(&Preferences { theme }).await {
            // Not fatal, the theme still applies for this session
            tracing::error!("Failed to save preferences: {}", e);
        }
    }
}
