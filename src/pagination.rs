//! This modules defines the common functionality for paging transaction history.
//!
//! Transactions arrive from the ledger fully materialised, so paging is plain
//! slicing over the retrieved list.

/// The config for pagination
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page.
    pub rows_per_page: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            rows_per_page: 10,
        }
    }
}

impl PaginationConfig {
    /// Parse a page number from a query string value.
    ///
    /// Missing, zero or malformed values fall back to [PaginationConfig::default_page].
    pub fn parse_page(&self, page: Option<&str>) -> u64 {
        page.and_then(|page| page.trim().parse::<u64>().ok())
            .filter(|&page| page > 0)
            .unwrap_or(self.default_page)
    }
}

/// The number of pages needed to show `item_count` items.
pub fn page_count(item_count: usize, rows_per_page: u64) -> u64 {
    if rows_per_page == 0 {
        return 0;
    }

    (item_count as u64).div_ceil(rows_per_page)
}

/// Get the items on `page` (1-based).
///
/// Page zero is treated as the first page. Pages past the end yield an empty
/// slice.
pub fn page_slice<T>(items: &[T], page: u64, rows_per_page: u64) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(rows_per_page);

    if start >= items.len() as u64 {
        return &[];
    }

    let start = start as usize;
    let end = start
        .saturating_add(rows_per_page as usize)
        .min(items.len());

    &items[start..end]
}

/// The previous/next controls shown under a paged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNavigation {
    /// The page being displayed.
    pub current: u64,
    /// The total number of pages.
    pub total: u64,
    /// The page the "Prev" button links to, if any.
    pub previous: Option<u64>,
    /// The page the "Next" button links to, if any.
    pub next: Option<u64>,
}

impl PageNavigation {
    /// Create the navigation for `current` out of `total` pages.
    pub fn new(current: u64, total: u64) -> Self {
        let current = current.max(1);

        Self {
            current,
            total,
            previous: (current > 1).then(|| current - 1),
            next: (current < total).then(|| current + 1),
        }
    }

    /// Whether the navigation should be displayed at all.
    pub fn is_visible(&self) -> bool {
        self.total > 1
    }
}
