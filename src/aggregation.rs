//! Counts transactions per category for the "Top Categories" summary.
//!
//! Provides [count_transaction_categories], which groups transactions by their
//! raw category code and ranks the categories by how often they occur.

use std::collections::HashMap;

use serde::Serialize;

use crate::category::{CategoryLabel, RawCategory};

/// Anything that can be grouped by a raw category code.
pub trait Categorized {
    /// The raw category code, `None` if the item has no category.
    fn category(&self) -> Option<&RawCategory>;
}

impl<T: Categorized> Categorized for &T {
    fn category(&self) -> Option<&RawCategory> {
        (*self).category()
    }
}

/// How many transactions belong to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    /// The display label of the category.
    pub label: CategoryLabel,
    /// The number of transactions in this category. Always at least one.
    pub count: usize,
    /// The number of transactions across all categories.
    pub total_count: usize,
}

impl CategorySummary {
    /// The fraction of all transactions that belong to this category.
    pub fn share(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.count as f64 / self.total_count as f64
        }
    }

    /// [CategorySummary::share] as a whole percentage.
    pub fn percent(&self) -> i64 {
        (self.share() * 100.0).round() as i64
    }
}

/// Counts how many transactions belong to each category.
///
/// Returns one [CategorySummary] per distinct raw category, sorted by count
/// in descending order. Categories with equal counts stay in the order they
/// first appear in `transactions`. Transactions without a category are
/// counted together under [crate::category::UNCATEGORIZED_LABEL].
///
/// `None` and an empty slice both produce an empty summary.
pub fn count_transaction_categories<T: Categorized>(
    transactions: Option<&[T]>,
) -> Vec<CategorySummary> {
    let transactions = transactions.unwrap_or_default();
    tracing::debug!(
        "counting categories for {} transactions",
        transactions.len()
    );

    // Counts in first-seen order, plus an index into it keyed by category.
    let mut counts: Vec<(Option<&RawCategory>, usize)> = Vec::new();
    let mut positions: HashMap<Option<&RawCategory>, usize> = HashMap::new();
    let mut total_count = 0;

    for transaction in transactions {
        let category = transaction.category();

        match positions.get(&category) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(category, counts.len());
                counts.push((category, 1));
            }
        }

        total_count += 1;
    }

    let mut summaries: Vec<CategorySummary> = counts
        .into_iter()
        .map(|(category, count)| CategorySummary {
            label: category
                .map(RawCategory::label)
                .unwrap_or_else(CategoryLabel::uncategorized),
            count,
            total_count,
        })
        .collect();

    // `sort_by` is stable, so ties keep their first-seen order.
    summaries.sort_by(|a, b| b.count.cmp(&a.count));

    summaries
}
