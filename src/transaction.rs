//! Defines the transaction model as supplied by the bank-data aggregator.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    aggregation::Categorized,
    category::{CategoryLabel, RawCategory},
};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Whether money left (debit) or entered (credit) the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money left the account.
    Debit,
    /// Money entered the account.
    Credit,
}

/// How the transaction was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentChannel {
    /// An online or card-not-present purchase.
    #[serde(rename = "online")]
    Online,
    /// A purchase made in person.
    #[serde(rename = "in store")]
    InStore,
    /// Anything else, e.g. a direct debit.
    #[serde(rename = "other")]
    Other,
}

impl PaymentChannel {
    /// The channel with each word capitalised, e.g. "In Store".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::InStore => "In Store",
            Self::Other => "Other",
        }
    }
}

/// The settlement status shown in the transaction table's status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// The transaction is still pending.
    Processing,
    /// The transaction has settled.
    Success,
}

impl TransactionStatus {
    /// The status as a plain string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Success => "Success",
        }
    }

    /// The status formatted the same way as category badges.
    pub fn label(&self) -> CategoryLabel {
        CategoryLabel::from_raw(self.as_str())
    }
}

/// An event where money was either spent or received in a linked bank account.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The aggregator's ID for the transaction.
    pub id: String,
    /// The aggregator's ID for the account the transaction belongs to.
    pub account_id: String,
    /// The merchant or counterparty name.
    pub name: String,
    /// The amount of money that moved. Positive amounts are money leaving the account.
    pub amount: f64,
    /// Whether money left or entered the account.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Whether the transaction has yet to settle.
    #[serde(default)]
    pub pending: bool,
    /// The raw category code, if the aggregator assigned one.
    #[serde(default)]
    pub category: Option<RawCategory>,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// How the transaction was made.
    pub payment_channel: PaymentChannel,
    /// A URL to the merchant's logo.
    #[serde(default)]
    pub image: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(name: &str, amount: f64, date: Date) -> TransactionBuilder {
        TransactionBuilder {
            account_id: String::new(),
            name: name.to_owned(),
            amount,
            kind: None,
            pending: false,
            category: None,
            date,
            payment_channel: PaymentChannel::Other,
            image: None,
        }
    }

    /// The status shown in the status badge.
    pub fn status(&self) -> TransactionStatus {
        if self.pending {
            TransactionStatus::Processing
        } else {
            TransactionStatus::Success
        }
    }

    /// Whether money left the account.
    pub fn is_debit(&self) -> bool {
        self.kind == TransactionType::Debit
    }
}

impl Categorized for Transaction {
    fn category(&self) -> Option<&RawCategory> {
        self.category.as_ref()
    }
}

/// A builder for creating [Transaction] instances.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    account_id: String,
    name: String,
    amount: f64,
    kind: Option<TransactionType>,
    pending: bool,
    category: Option<RawCategory>,
    date: Date,
    payment_channel: PaymentChannel,
    image: Option<String>,
}

impl TransactionBuilder {
    /// Set the account the transaction belongs to.
    pub fn account_id(mut self, account_id: &str) -> Self {
        self.account_id = account_id.to_owned();
        self
    }

    /// Set whether money left or entered the account.
    ///
    /// Defaults to [TransactionType::Debit] for positive amounts and
    /// [TransactionType::Credit] otherwise.
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set whether the transaction is still pending.
    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    /// Set the raw category code.
    pub fn category(mut self, category: Option<&str>) -> Self {
        self.category = category.map(RawCategory::from);
        self
    }

    /// Set how the transaction was made.
    pub fn payment_channel(mut self, payment_channel: PaymentChannel) -> Self {
        self.payment_channel = payment_channel;
        self
    }

    /// Set the merchant logo URL.
    pub fn image(mut self, image: Option<&str>) -> Self {
        self.image = image.map(str::to_owned);
        self
    }

    /// Build the final [Transaction] with the given `id`.
    pub fn finalize(self, id: &str) -> Transaction {
        let kind = self.kind.unwrap_or(if self.amount > 0.0 {
            TransactionType::Debit
        } else {
            TransactionType::Credit
        });

        Transaction {
            id: id.to_owned(),
            account_id: self.account_id,
            name: self.name,
            amount: self.amount,
            kind,
            pending: self.pending,
            category: self.category,
            date: self.date,
            payment_channel: self.payment_channel,
            image: self.image,
        }
    }
}

/// Remove every character that is not an ASCII word character (`[A-Za-z0-9_]`)
/// or whitespace.
///
/// Merchant names from the aggregator often carry punctuation such as
/// `"Uber 063015 SF**POOL**"`, which reads as `"Uber 063015 SFPOOL"` after cleaning.
pub fn remove_special_characters(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}
