//! Assembles the data shown on the home page and the transaction history page.

use crate::{
    Error,
    account::{Account, AccountDirectory, AccountsOverview, User, summarize_accounts},
    aggregation::{CategorySummary, count_transaction_categories},
    format::format_amount,
    ledger::TransactionLedger,
    pagination::{PageNavigation, PaginationConfig, page_count, page_slice},
    row::TransactionRow,
};

/// The name shown in the greeting when the user has no first name.
pub const GUEST_NAME: &str = "Guest";

/// How many bank cards are shown in the home page sidebar.
pub const MAX_BANK_CARDS: usize = 2;

/// The home page: a greeting, the balance across all accounts, recent
/// transactions for the selected account, and its top spending categories.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    /// The name to greet the user by.
    pub greeting_name: String,
    /// The logged-in user.
    pub user: User,
    /// Every linked account and their combined balance.
    pub overview: AccountsOverview,
    /// The bank link whose transactions are shown, `None` when there are no
    /// linked accounts.
    pub selected_item_id: Option<String>,
    /// The requested page of the selected account's transactions.
    pub recent_transactions: Vec<TransactionRow>,
    /// The controls for paging through the recent transactions.
    pub navigation: PageNavigation,
    /// How often each category occurs in the selected account's
    /// transactions, most frequent first.
    pub top_categories: Vec<CategorySummary>,
    /// The accounts shown as cards in the sidebar.
    pub bank_cards: Vec<Account>,
}

impl HomeView {
    /// Load the home page for the logged-in user.
    ///
    /// `selected_item_id` picks the account whose transactions are shown and
    /// defaults to the first linked account. `page` is the raw page query
    /// parameter.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotAuthenticated] if nobody is logged in, otherwise any
    /// error reported by `directory` or `ledger`.
    pub fn load(
        directory: &impl AccountDirectory,
        ledger: &impl TransactionLedger,
        pagination: &PaginationConfig,
        selected_item_id: Option<&str>,
        page: Option<&str>,
    ) -> Result<Self, Error> {
        let user = directory.logged_in_user()?;
        let current_page = pagination.parse_page(page);
        tracing::info!("Loading home page {current_page} for user {}", user.id);

        let greeting_name = if user.first_name.is_empty() {
            GUEST_NAME.to_owned()
        } else {
            user.first_name.clone()
        };

        let overview = summarize_accounts(directory.accounts(&user.id)?);
        let bank_cards = overview
            .accounts
            .iter()
            .take(MAX_BANK_CARDS)
            .cloned()
            .collect();

        let selected_item_id = selected_item_id
            .map(str::to_owned)
            .or_else(|| overview.accounts.first().map(|account| account.item_id.clone()));

        let transactions = match &selected_item_id {
            Some(item_id) => ledger.transactions(item_id)?,
            None => Vec::new(),
        };

        let total_pages = page_count(transactions.len(), pagination.rows_per_page);
        let recent_transactions = page_slice(&transactions, current_page, pagination.rows_per_page)
            .iter()
            .map(TransactionRow::new)
            .collect();
        let top_categories = count_transaction_categories(Some(transactions.as_slice()));

        Ok(Self {
            greeting_name,
            user,
            overview,
            selected_item_id,
            recent_transactions,
            navigation: PageNavigation::new(current_page, total_pages),
            top_categories,
            bank_cards,
        })
    }
}

/// The transaction history page for one account.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionHistoryView {
    /// The account being shown, `None` when there are no linked accounts.
    pub account: Option<Account>,
    /// The account's current balance, e.g. "$1,250.00".
    pub current_balance: String,
    /// The requested page of transactions.
    pub rows: Vec<TransactionRow>,
    /// The controls for paging through the transactions.
    pub navigation: PageNavigation,
}

impl TransactionHistoryView {
    /// Load the transaction history of the account `selected_item_id`, or of
    /// the logged-in user's first account.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotAuthenticated] if nobody is logged in, otherwise any
    /// error reported by `directory` or `ledger`.
    pub fn load(
        directory: &impl AccountDirectory,
        ledger: &impl TransactionLedger,
        pagination: &PaginationConfig,
        selected_item_id: Option<&str>,
        page: Option<&str>,
    ) -> Result<Self, Error> {
        let user = directory.logged_in_user()?;
        let current_page = pagination.parse_page(page);

        let item_id = match selected_item_id {
            Some(item_id) => Some(item_id.to_owned()),
            None => directory
                .accounts(&user.id)?
                .into_iter()
                .next()
                .map(|account| account.item_id),
        };

        let Some(item_id) = item_id else {
            tracing::debug!("User {} has no linked accounts", user.id);
            return Ok(Self::empty(current_page));
        };
        tracing::info!("Loading transaction history page {current_page} for item {item_id}");

        let account = directory.account(&item_id)?;
        let transactions = ledger.transactions(&item_id)?;

        let total_pages = page_count(transactions.len(), pagination.rows_per_page);
        let rows = page_slice(&transactions, current_page, pagination.rows_per_page)
            .iter()
            .map(TransactionRow::new)
            .collect();

        Ok(Self {
            current_balance: account.current_balance_display(),
            account: Some(account),
            rows,
            navigation: PageNavigation::new(current_page, total_pages),
        })
    }

    fn empty(current_page: u64) -> Self {
        Self {
            account: None,
            current_balance: format_amount(0.0),
            rows: Vec::new(),
            navigation: PageNavigation::new(current_page, 0),
        }
    }
}
