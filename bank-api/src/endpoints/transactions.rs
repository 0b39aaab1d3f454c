use crate::macros::setter;
use crate::request::{Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    /// For transfers this is the sending account.
    pub account_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub currency: String,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// The receiving account of a transfer, absent otherwise.
    pub related_account_id: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TransactionType {
    pub fn display_name(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdrawal => "Withdrawal",
            TransactionType::Transfer => "Transfer",
        }
    }
}

// Requests

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    account_id: String,
    amount: f64,
    currency: String,
    description: Option<String>,
}

impl Deposit {
    pub fn new(account_id: impl Into<String>, amount: f64, currency: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
            currency: currency.into(),
            description: None,
        }
    }

    setter!(opt description: String);
}

impl Request for Deposit {
    type Body = Self;
    type Response = Transaction;

    fn endpoint(&self) -> Cow<'_, str> {
        "/transactions/deposit".into()
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn data(&self) -> RequestData<'_, Self::Body> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdraw {
    account_id: String,
    amount: f64,
    currency: String,
    description: Option<String>,
}

impl Withdraw {
    pub fn new(account_id: impl Into<String>, amount: f64, currency: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
            currency: currency.into(),
            description: None,
        }
    }

    setter!(opt description: String);
}

impl Request for Withdraw {
    type Body = Self;
    type Response = Transaction;

    fn endpoint(&self) -> Cow<'_, str> {
        "/transactions/withdraw".into()
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn data(&self) -> RequestData<'_, Self::Body> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    from_account_id: String,
    to_account_id: String,
    amount: f64,
    currency: String,
    description: Option<String>,
}

impl Transfer {
    pub fn new(
        from_account_id: impl Into<String>,
        to_account_id: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            from_account_id: from_account_id.into(),
            to_account_id: to_account_id.into(),
            amount,
            currency: currency.into(),
            description: None,
        }
    }

    setter!(opt description: String);
}

impl Request for Transfer {
    type Body = Self;
    type Response = Transaction;

    fn endpoint(&self) -> Cow<'_, str> {
        "/transactions/transfer".into()
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn data(&self) -> RequestData<'_, Self::Body> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionsByAccount {
    account_id: String,
}

impl TransactionsByAccount {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }
}

impl Request for TransactionsByAccount {
    type Body = ();
    type Response = Vec<Transaction>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/transactions/account/{}", self.account_id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetTransaction {
    transaction_id: String,
}

impl GetTransaction {
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
        }
    }
}

impl Request for GetTransaction {
    type Body = ();
    type Response = Transaction;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/transactions/{}", self.transaction_id).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_serializes_camel_case() {
        let req = Transfer::new("A1", "B2", 50.0, "USD").description("rent");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["fromAccountId"], "A1");
        assert_eq!(json["toAccountId"], "B2");
        assert_eq!(json["amount"], 50.0);
        assert_eq!(json["description"], "rent");
    }

    #[test]
    fn deposit_description_defaults_to_null() {
        let req = Deposit::new("A1", 10.0, "USD");
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["description"].is_null());
    }

    #[test]
    fn transaction_deserializes_with_related_account() {
        let json = r#"{
            "transactionId": "TX-1",
            "accountId": "A1",
            "type": "TRANSFER",
            "amount": 25.0,
            "currency": "USD",
            "description": "split dinner",
            "timestamp": "2026-01-15T12:30:00Z",
            "relatedAccountId": "B2"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Transfer);
        assert_eq!(tx.related_account_id.as_deref(), Some("B2"));
    }

    #[test]
    fn history_endpoint_embeds_account_id() {
        let req = TransactionsByAccount::new("A1");
        assert_eq!(req.endpoint(), "/transactions/account/A1");
    }
}
