//! Moving money between two funding sources on the payments network.

use crate::{
    Error,
    account::AccountDirectory,
    id::{decrypt_id, extract_customer_id_from_url},
};

/// A validated request to move `amount` dollars from one funding source to
/// another.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    source_funding_source_url: String,
    destination_funding_source_url: String,
    amount: f64,
}

impl TransferRequest {
    /// Create a transfer request.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidTransfer] if either URL is empty, both URLs are
    /// the same, or `amount` is not a positive, finite number.
    pub fn new(
        source_funding_source_url: &str,
        destination_funding_source_url: &str,
        amount: f64,
    ) -> Result<Self, Error> {
        if source_funding_source_url.trim().is_empty() {
            return Err(Error::InvalidTransfer(
                "the source funding source is missing".to_owned(),
            ));
        }

        if destination_funding_source_url.trim().is_empty() {
            return Err(Error::InvalidTransfer(
                "the destination funding source is missing".to_owned(),
            ));
        }

        if source_funding_source_url == destination_funding_source_url {
            return Err(Error::InvalidTransfer(
                "cannot transfer to the source account".to_owned(),
            ));
        }

        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidTransfer(format!(
                "{amount} is not a positive amount"
            )));
        }

        Ok(Self {
            source_funding_source_url: source_funding_source_url.to_owned(),
            destination_funding_source_url: destination_funding_source_url.to_owned(),
            amount,
        })
    }

    /// The funding source the money is taken from.
    pub fn source_funding_source_url(&self) -> &str {
        &self.source_funding_source_url
    }

    /// The funding source the money is sent to.
    pub fn destination_funding_source_url(&self) -> &str {
        &self.destination_funding_source_url
    }

    /// The amount in dollars.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The amount as the payments network expects it, e.g. "12.50".
    pub fn amount_value(&self) -> String {
        format!("{:.2}", self.amount)
    }
}

/// The payments-network resource URL of a created transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferLocation(String);

impl TransferLocation {
    /// Wrap the URL returned by the payments network.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The resource URL.
    pub fn url(&self) -> &str {
        &self.0
    }

    /// The payments network's ID for the transfer.
    pub fn id(&self) -> &str {
        extract_customer_id_from_url(&self.0)
    }
}

/// Creates transfers on the payments network.
pub trait TransferInitiator {
    /// Submit `request`, returning the URL of the created transfer.
    fn create_transfer(&self, request: &TransferRequest) -> Result<TransferLocation, Error>;
}

/// Validate and submit a transfer between two funding sources.
///
/// # Errors
///
/// Returns [Error::InvalidTransfer] if the request is invalid, otherwise any
/// error reported by `initiator`.
pub fn initiate_transfer(
    initiator: &impl TransferInitiator,
    source_funding_source_url: &str,
    destination_funding_source_url: &str,
    amount: f64,
) -> Result<TransferLocation, Error> {
    let request = TransferRequest::new(
        source_funding_source_url,
        destination_funding_source_url,
        amount,
    )?;

    let location = initiator.create_transfer(&request)?;
    tracing::info!(
        "Created transfer {} for ${}",
        location.id(),
        request.amount_value()
    );

    Ok(location)
}

/// Send `amount` dollars from the account linked as `source_item_id` to the
/// account behind a recipient's `shareable_id`.
///
/// # Errors
///
/// Returns [Error::InvalidShareableId] if `shareable_id` cannot be decoded,
/// [Error::NotFound] if either bank link does not exist, otherwise the same
/// errors as [initiate_transfer].
pub fn transfer_to_shareable_id(
    directory: &impl AccountDirectory,
    initiator: &impl TransferInitiator,
    source_item_id: &str,
    shareable_id: &str,
    amount: f64,
) -> Result<TransferLocation, Error> {
    let source = directory.bank(source_item_id)?;
    let receiver_account_id = decrypt_id(shareable_id)?;
    let receiver = directory.bank_by_account_id(&receiver_account_id)?;

    initiate_transfer(
        initiator,
        &source.funding_source_url,
        &receiver.funding_source_url,
        amount,
    )
}
