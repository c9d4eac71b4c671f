//! Defines the transaction ledger trait.

use crate::{Error, transaction::Transaction};

/// Supplies the transaction history of linked accounts.
///
/// The history is returned fully materialised. Paging, summarising and
/// formatting happen after retrieval.
pub trait TransactionLedger {
    /// Every transaction of the account read through the bank link `item_id`,
    /// newest first.
    ///
    /// Implementers should return [Error::NotFound] if there is no such link.
    fn transactions(&self, item_id: &str) -> Result<Vec<Transaction>, Error>;
}
