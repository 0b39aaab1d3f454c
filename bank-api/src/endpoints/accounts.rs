use crate::macros::setter;
use crate::request::{Method, Request, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Opaque backend identifier, displayed grouped in 4-character blocks.
    pub account_id: String,
    pub customer_id: String,
    pub account_type: AccountType,
    pub balance: f64,
    /// ISO 4217 code, e.g. `USD`.
    pub currency: String,
    pub active: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Checking,
    Savings,
}

impl AccountType {
    pub fn display_name(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
        }
    }
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct ListAccounts;

impl ListAccounts {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ListAccounts {
    fn default() -> Self {
        Self::new()
    }
}

impl Request for ListAccounts {
    type Body = ();
    type Response = Vec<Account>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/accounts".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountsByCustomer {
    customer_id: String,
}

impl AccountsByCustomer {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
        }
    }
}

impl Request for AccountsByCustomer {
    type Body = ();
    type Response = Vec<Account>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/accounts/customer/{}", self.customer_id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAccount {
    account_id: String,
}

impl GetAccount {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }
}

impl Request for GetAccount {
    type Body = ();
    type Response = Account;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/accounts/{}", self.account_id).into()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccount {
    customer_id: String,
    account_type: AccountType,
    initial_balance: f64,
    currency: String,
}

impl CreateAccount {
    pub fn new(customer_id: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            customer_id: customer_id.into(),
            account_type,
            initial_balance: 0.0,
            currency: "USD".to_string(),
        }
    }

    setter!(initial_balance: f64);
    setter!(currency: String);
}

impl Request for CreateAccount {
    type Body = Self;
    type Response = Account;

    fn endpoint(&self) -> Cow<'_, str> {
        "/accounts".into()
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn data(&self) -> RequestData<'_, Self::Body> {
        RequestData::Json(self)
    }
}
