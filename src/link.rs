//! Linking a bank account: exchanging the aggregator's one-time token for
//! durable credentials and registering the account with the payments network.

use crate::{
    Error,
    account::{Bank, User, UserId},
    id::encrypt_id,
    logging::Redacted,
};

/// The settings the aggregator's link flow is opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTokenRequest {
    /// Our ID for the user, echoed back by the aggregator.
    pub client_user_id: UserId,
    /// The name shown in the link flow, e.g. "Jane Doe".
    pub client_name: String,
    /// The aggregator products the link needs access to.
    pub products: &'static [&'static str],
    /// The language the link flow is shown in.
    pub language: &'static str,
    /// The countries whose banks can be linked.
    pub country_codes: &'static [&'static str],
}

impl LinkTokenRequest {
    /// Account and routing numbers are all a transfer needs.
    pub const PRODUCTS: &'static [&'static str] = &["auth"];

    /// The request for linking a bank account of `user`.
    pub fn for_user(user: &User) -> Self {
        Self {
            client_user_id: user.id.clone(),
            client_name: user.full_name(),
            products: Self::PRODUCTS,
            language: "en",
            country_codes: &["US"],
        }
    }
}

/// The durable credentials returned when a public token is exchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessGrant {
    /// The credentials used for later aggregator requests.
    pub access_token: Redacted<String>,
    /// The aggregator's ID for the new link.
    pub item_id: String,
}

/// The account a new link gives access to.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedAccount {
    /// The aggregator's ID for the account.
    pub account_id: String,
    /// The name the bank gives the account.
    pub name: String,
}

/// A bank link that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBank {
    /// The user who linked the bank.
    pub user_id: UserId,
    /// The aggregator's ID for the link.
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

/// The bank-data aggregator, payments network and storage calls needed to
/// link a bank account.
pub trait LinkExchange {
    /// Create the short-lived token that opens the aggregator's link flow.
    fn create_link_token(&self, request: &LinkTokenRequest) -> Result<String, Error>;

    /// Exchange the one-time token from the aggregator's link flow for
    /// durable credentials.
    fn exchange_public_token(&self, public_token: &str) -> Result<AccessGrant, Error>;

    /// The first account the credentials give access to.
    fn primary_account(&self, access_token: &str) -> Result<LinkedAccount, Error>;

    /// Create a token that lets the payments network act on `account_id`.
    fn create_processor_token(&self, access_token: &str, account_id: &str)
    -> Result<String, Error>;

    /// Register the account as a funding source for the payments-network
    /// customer `customer_id`, returning the funding source URL.
    fn add_funding_source(
        &self,
        customer_id: &str,
        processor_token: &str,
        bank_name: &str,
    ) -> Result<String, Error>;

    /// Store the bank link.
    fn save_bank(&self, bank: NewBank) -> Result<Bank, Error>;
}

/// Create the token the client needs to open the aggregator's link flow for
/// `user`.
///
/// # Errors
///
/// Returns the error reported by `link`.
pub fn start_bank_link(link: &impl LinkExchange, user: &User) -> Result<String, Error> {
    let link_token = link.create_link_token(&LinkTokenRequest::for_user(user))?;
    tracing::debug!("Created link token for user {}", user.id);

    Ok(link_token)
}

/// Link the bank account behind `public_token` to `user`.
///
/// The steps run in order and the first failure aborts the link. Nothing is
/// stored unless every payments-network call succeeded.
///
/// # Errors
///
/// Returns the first error reported by `link`. An empty funding source URL
/// is reported as an [Error::Upstream].
pub fn link_bank_account(
    link: &impl LinkExchange,
    user: &User,
    public_token: &str,
) -> Result<Bank, Error> {
    let grant = link.exchange_public_token(public_token)?;
    tracing::debug!("Exchanged public token for item {}", grant.item_id);

    let account = link.primary_account(&grant.access_token.0)?;
    let processor_token =
        link.create_processor_token(&grant.access_token.0, &account.account_id)?;

    let funding_source_url =
        link.add_funding_source(&user.customer_id, &processor_token, &account.name)?;
    if funding_source_url.is_empty() {
        return Err(Error::upstream(
            "payments",
            "the payments network did not return a funding source URL",
        ));
    }

    let new_bank = NewBank {
        user_id: user.id.clone(),
        bank_id: grant.item_id,
        shareable_id: encrypt_id(&account.account_id),
        account_id: account.account_id,
        access_token: grant.access_token,
        funding_source_url,
    };
    tracing::info!(
        "Linked bank {} for user {}",
        new_bank.bank_id,
        new_bank.user_id
    );

    link.save_bank(new_bank)
}
