//! Bankview is the core of a personal-finance web app that shows a user's
//! linked bank accounts, their transaction history and where their money goes.
//!
//! This library provides the data the pages are rendered from: the
//! "Top Categories" summary of an account's transactions, display formatting
//! for transactions, paging, sign-up/sign-in validation, and the bank linking
//! and transfer flows, and signing up and in. The auth backend, bank-data
//! aggregator and payments network are reached through the [AccountDirectory],
//! [TransactionLedger], [LinkExchange], [TransferInitiator] and [Registrar]
//! traits.

#![warn(missing_docs)]

mod account;
mod aggregation;
mod category;
mod config;
mod dashboard;
mod error;
mod format;
mod id;
mod ledger;
mod link;
mod logging;
mod pagination;
mod registration;
mod row;
mod transaction;
mod transfer;
mod validation;

#[cfg(test)]
mod test_utils;

pub use account::{
    Account, AccountDirectory, AccountType, AccountsOverview, Bank, User, UserId,
    summarize_accounts,
};
pub use aggregation::{Categorized, CategorySummary, count_transaction_categories};
pub use category::{CategoryLabel, RawCategory, UNCATEGORIZED_LABEL, format_category};
pub use config::{
    APP_ENV_VAR, Config, ConfigError, Environment, PAYMENTS_ENV_VAR, PaymentsEnvironment,
    ROWS_PER_PAGE_VAR,
};
pub use dashboard::{GUEST_NAME, HomeView, MAX_BANK_CARDS, TransactionHistoryView};
pub use error::Error;
pub use format::{FormattedDateTime, MAX_DISPLAY_AMOUNT, format_amount, format_date_time};
pub use id::{decrypt_id, encrypt_id, extract_customer_id_from_url};
pub use ledger::TransactionLedger;
pub use link::{
    AccessGrant, LinkExchange, LinkTokenRequest, LinkedAccount, NewBank, link_bank_account,
    start_bank_link,
};
pub use logging::{REDACTED, Redacted, init as init_logging};
pub use pagination::{PageNavigation, PaginationConfig, page_count, page_slice};
pub use registration::{NewCustomer, Registrar, sign_in, sign_up};
pub use row::TransactionRow;
pub use transaction::{
    PaymentChannel, Transaction, TransactionBuilder, TransactionStatus, TransactionType,
    remove_special_characters,
};
pub use transfer::{
    TransferInitiator, TransferLocation, TransferRequest, initiate_transfer,
    transfer_to_shareable_id,
};
pub use validation::{AuthField, AuthForm, AuthFormKind, FieldError, ValidationErrors};
