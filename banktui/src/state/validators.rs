//! Form validation. Every submit path runs through here before a request
//! is built; the backend re-checks everything, but nothing leaves the
//! client without passing the strictest local check first.

use crate::state::{CreateAccountFormState, MoneyFormState, TransferFormState};
use crate::ui::utils::fmt_currency;
use bank_api::endpoints::accounts::{Account, AccountType};

/// Validated input for a deposit or withdrawal request.
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyPlan {
    pub account_id: String,
    pub amount: f64,
    pub currency: String,
    pub description: Option<String>,
}

/// Validated input for a transfer request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: f64,
    pub currency: String,
    pub description: Option<String>,
}

/// Validated input for account creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAccountPlan {
    pub customer_id: String,
    pub account_type: AccountType,
    pub initial_balance: f64,
    pub currency: String,
}

fn require_field(value: &str, name: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{name} is required"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse an amount string: must be a finite number strictly greater
/// than zero.
fn parse_amount(value: &str, name: &str) -> Result<f64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} is required"));
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a number"))?;
    if !amount.is_finite() {
        return Err(format!("{name} must be a number"));
    }
    if amount <= 0.0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(amount)
}

/// Initial balance allows zero but never negative.
fn parse_initial_balance(value: &str) -> Result<f64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| "Initial balance must be a number".to_string())?;
    if !amount.is_finite() {
        return Err("Initial balance must be a number".to_string());
    }
    if amount < 0.0 {
        return Err("Initial balance cannot be negative".to_string());
    }
    Ok(amount)
}

fn normalize_currency(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Currency is required".to_string());
    }
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err("Currency must be a 3-letter code".to_string());
    }
    Ok(trimmed.to_ascii_uppercase())
}

fn optional_description(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn validate_money_form(form: &MoneyFormState) -> Result<MoneyPlan, String> {
    Ok(MoneyPlan {
        account_id: require_field(&form.account_id, "Account ID")?,
        amount: parse_amount(&form.amount, "Amount")?,
        currency: normalize_currency(&form.currency)?,
        description: optional_description(&form.description),
    })
}

/// Validate a transfer. Beyond the field checks, the sender and receiver
/// must differ, and when the sending account is in the cache the amount
/// may not exceed its balance. An account missing from the cache is let
/// through; the backend has the authoritative balance.
pub fn validate_transfer(
    form: &TransferFormState,
    accounts: &[Account],
) -> Result<TransferPlan, String> {
    let from_account_id = require_field(&form.from_account_id, "From account")?;
    let to_account_id = require_field(&form.to_account_id, "To account")?;
    if from_account_id == to_account_id {
        return Err("Cannot transfer to the same account".to_string());
    }
    let amount = parse_amount(&form.amount, "Amount")?;
    let currency = normalize_currency(&form.currency)?;

    if let Some(sender) = accounts.iter().find(|a| a.account_id == from_account_id) {
        if amount > sender.balance {
            return Err(format!(
                "Insufficient funds: balance is {}",
                fmt_currency(sender.balance, &sender.currency)
            ));
        }
    }

    Ok(TransferPlan {
        from_account_id,
        to_account_id,
        amount,
        currency,
        description: optional_description(&form.description),
    })
}

pub fn validate_create_account(form: &CreateAccountFormState) -> Result<CreateAccountPlan, String> {
    Ok(CreateAccountPlan {
        customer_id: require_field(&form.customer_id, "Customer ID")?,
        account_type: form.account_type,
        initial_balance: parse_initial_balance(&form.initial_balance)?,
        currency: normalize_currency(&form.currency)?,
    })
}
