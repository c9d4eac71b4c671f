//! Users, their linked bank accounts, and the directory that resolves them.
//!
//! The directory is backed by the hosted auth/storage backend and the
//! bank-data aggregator. This crate only depends on the shape of the data
//! they return.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, format::format_amount, logging::Redacted};

/// The auth backend's ID for a user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a user ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed-up user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The auth backend's ID for the user.
    pub id: UserId,
    /// The email address the user logs in with.
    pub email: String,
    /// The user's given name.
    pub first_name: String,
    /// The user's family name.
    pub last_name: String,
    /// The payments network's ID for the user.
    pub customer_id: String,
    /// The payments network's resource URL for the user.
    pub customer_url: String,
}

impl User {
    /// The first and last name, e.g. "Jane Doe".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The broad kind of a bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Checking and savings accounts.
    Depository,
    /// Credit cards.
    Credit,
    /// Mortgages, student loans and the like.
    Loan,
    /// Brokerage and retirement accounts.
    Investment,
    /// Anything the aggregator could not classify.
    #[serde(other)]
    Other,
}

/// A bank account linked through the bank-data aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The aggregator's ID for the account.
    pub id: String,
    /// The name the bank gives the account, e.g. "Plaid Checking".
    pub name: String,
    /// The formal name of the account, if the bank provides one.
    #[serde(default)]
    pub official_name: Option<String>,
    /// The last four digits of the account number.
    pub mask: String,
    /// The aggregator's ID for the bank.
    pub institution_id: String,
    /// The amount that can be withdrawn right now.
    pub available_balance: f64,
    /// The balance including pending transactions.
    pub current_balance: f64,
    /// The broad kind of account.
    #[serde(rename = "type")]
    pub kind: AccountType,
    /// The specific kind of account, e.g. "checking".
    pub subtype: String,
    /// The ID of the stored bank link this account was read through.
    pub item_id: String,
    /// The ID the user can share to receive transfers into this account.
    pub shareable_id: String,
}

impl Account {
    /// The account number with everything but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        format!("●●●● ●●●● ●●●● {}", self.mask)
    }

    /// The current balance formatted as dollars.
    pub fn current_balance_display(&self) -> String {
        format_amount(self.current_balance)
    }
}

/// A stored bank link: the credentials and payments-network handle for one
/// linked account.
#[derive(Debug, Clone, PartialEq)]
pub struct Bank {
    /// The backend's ID for the stored record.
    pub id: String,
    /// The user who linked the bank.
    pub user_id: UserId,
    /// The aggregator's ID for the link (its "item").
    pub bank_id: String,
    /// The aggregator's ID for the linked account.
    pub account_id: String,
    /// The durable aggregator credentials for the link.
    pub access_token: Redacted<String>,
    /// The payments-network funding source for the account.
    pub funding_source_url: String,
    /// The ID the user can share to receive transfers into the account.
    pub shareable_id: String,
}

/// All of a user's accounts and their combined balance.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountsOverview {
    /// The linked accounts, in the order the directory returned them.
    pub accounts: Vec<Account>,
    /// The number of linked accounts.
    pub total_banks: usize,
    /// The sum of every account's current balance.
    pub total_current_balance: f64,
}

impl AccountsOverview {
    /// The combined balance formatted as dollars.
    pub fn total_current_balance_display(&self) -> String {
        format_amount(self.total_current_balance)
    }
}

/// Combine `accounts` into an [AccountsOverview].
pub fn summarize_accounts(accounts: Vec<Account>) -> AccountsOverview {
    let total_current_balance = accounts
        .iter()
        .map(|account| account.current_balance)
        .sum();

    AccountsOverview {
        total_banks: accounts.len(),
        accounts,
        total_current_balance,
    }
}

/// Resolves the logged-in user and their linked accounts.
pub trait AccountDirectory {
    /// The user of the current session.
    ///
    /// Implementers should return [Error::NotAuthenticated] when there is no
    /// valid session.
    fn logged_in_user(&self) -> Result<User, Error>;

    /// Every account linked by `user`, with up to date balances.
    fn accounts(&self, user: &UserId) -> Result<Vec<Account>, Error>;

    /// The account read through the bank link `item_id`.
    ///
    /// Implementers should return [Error::NotFound] if there is no such link.
    fn account(&self, item_id: &str) -> Result<Account, Error>;

    /// The stored bank link `item_id`.
    fn bank(&self, item_id: &str) -> Result<Bank, Error>;

    /// The stored bank link for the aggregator account `account_id`.
    fn bank_by_account_id(&self, account_id: &str) -> Result<Bank, Error>;
}
