//! The view-model for a row in the transaction table.

use unicode_segmentation::UnicodeSegmentation;

use crate::{
    category::CategoryLabel,
    format::{format_amount, format_date_time},
    transaction::{Transaction, remove_special_characters},
};

/// A transaction with every field already formatted for display.
///
/// Rows are rendered in the order they are given, the table never re-sorts them.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    /// The merchant name with punctuation removed.
    pub name: String,
    /// The formatted amount, prefixed with "-" for debits.
    pub amount: String,
    /// Whether money left the account, used to pick the row colour.
    pub is_outgoing: bool,
    /// The status badge label, "Processing" or "Success".
    pub status: CategoryLabel,
    /// When the transaction happened, e.g. "Mon, Jan 15, 12:00 AM".
    pub date: String,
    /// How the transaction was made, e.g. "In Store".
    pub channel: &'static str,
    /// The category badge label.
    pub category: CategoryLabel,
}

impl TransactionRow {
    /// Format `transaction` for display.
    pub fn new(transaction: &Transaction) -> Self {
        let formatted_amount = format_amount(transaction.amount);
        let is_debit = transaction.is_debit();
        let is_outgoing = is_debit || formatted_amount.starts_with('-');

        let amount = if is_debit {
            format!("-{formatted_amount}")
        } else {
            formatted_amount
        };

        Self {
            name: remove_special_characters(&transaction.name),
            amount,
            is_outgoing,
            status: transaction.status().label(),
            date: format_date_time(transaction.date.midnight()).date_time,
            channel: transaction.payment_channel.label(),
            category: transaction
                .category
                .as_ref()
                .map(|category| category.label())
                .unwrap_or_else(CategoryLabel::uncategorized),
        }
    }

    /// The name cut down to at most `max_graphemes` graphemes, with "..."
    /// appended when anything was cut.
    pub fn truncated_name(&self, max_graphemes: usize) -> String {
        let mut graphemes = self.name.graphemes(true);
        let truncated: String = graphemes.by_ref().take(max_graphemes).collect();

        if graphemes.next().is_some() {
            format!("{truncated}...")
        } else {
            truncated
        }
    }
}
