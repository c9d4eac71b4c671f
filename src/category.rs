//! Raw category codes and their human readable display labels.
//!
//! The bank-data aggregator tags each transaction with a snake case category
//! code such as `food_and_drink`. These codes are opaque grouping keys, they
//! only become presentable once converted into a [CategoryLabel] with
//! [format_category].

use std::{collections::HashSet, fmt::Display, sync::LazyLock};

use serde::{Deserialize, Serialize};

/// The label shown for transactions that arrived without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Words kept lowercase in title case, unless they are the first word.
static MINOR_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "a", "an", "and", "as", "at", "but", "by", "for", "from", "in", "nor", "of", "on", "or",
        "per", "the", "to", "vs", "via",
    ])
});

/// A category code as received from the transaction source, e.g. `food_and_drink`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawCategory(String);

impl RawCategory {
    /// Wrap a raw category code.
    ///
    /// No validation is done, any string is a valid grouping key.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Format the code for display.
    pub fn label(&self) -> CategoryLabel {
        CategoryLabel(format_category(&self.0))
    }
}

impl From<&str> for RawCategory {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Display for RawCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The title cased, human readable rendering of a category, e.g. "Food and Drink".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryLabel(String);

impl CategoryLabel {
    /// The label for transactions without a category.
    pub fn uncategorized() -> Self {
        Self(UNCATEGORIZED_LABEL.to_owned())
    }

    /// Create a label from an arbitrary string by running it through [format_category].
    pub fn from_raw(raw: &str) -> Self {
        Self(format_category(raw))
    }

    /// The display text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CategoryLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert a snake case category code into a title cased display label.
///
/// The input is lowercased and split on underscores. Each word is capitalised
/// except for minor words (articles, conjunctions and short prepositions),
/// which stay lowercase unless they are the first word.
///
/// Strings without underscores, such as the status strings "Processing" and
/// "Success", become a single capitalised word. Formatting an already
/// formatted label is not guaranteed to return the same label.
///
/// ```
/// use bankview::format_category;
///
/// assert_eq!(format_category("food_and_drink"), "Food and Drink");
/// assert_eq!(format_category("travel"), "Travel");
/// assert_eq!(format_category(""), "");
/// ```
pub fn format_category(raw: &str) -> String {
    tracing::trace!("formatting category {raw:?}");

    raw.to_lowercase()
        .split('_')
        .enumerate()
        .map(|(i, word)| {
            if i > 0 && MINOR_WORDS.contains(word) {
                word.to_owned()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
