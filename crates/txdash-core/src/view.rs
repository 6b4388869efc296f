//! Derived view engine
//!
//! Pure functions from a transaction snapshot and a set of view parameters to
//! the statistics and the visible page. Nothing here performs I/O or keeps
//! state; the same inputs always produce the same view.

use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionData};
use crate::types::{StatusFilter, TypeTab};

/// Default number of transactions per page
pub const DEFAULT_PAGE_SIZE: usize = 6;

// ==================== View Parameters ====================

/// Filter, search and paging settings owned by the presentation layer.
///
/// Changing the tab, the status filter or the search query through the
/// setters always brings `current_page` back to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParams {
    type_tab: TypeTab,
    status_filter: StatusFilter,
    search_query: String,
    page_size: usize,
    current_page: usize,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewParams {
    /// Default parameters with the given page size (at least 1)
    pub fn new(page_size: usize) -> Self {
        Self {
            type_tab: TypeTab::All,
            status_filter: StatusFilter::All,
            search_query: String::new(),
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn type_tab(&self) -> TypeTab {
        self.type_tab
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Switch the type tab
    pub fn set_type_tab(&mut self, type_tab: TypeTab) {
        if self.type_tab != type_tab {
            self.type_tab = type_tab;
            self.current_page = 1;
        }
    }

    /// Switch the status filter
    pub fn set_status_filter(&mut self, status_filter: StatusFilter) {
        if self.status_filter != status_filter {
            self.status_filter = status_filter;
            self.current_page = 1;
        }
    }

    /// Replace the search query
    pub fn set_search_query(&mut self, query: &str) {
        if self.search_query != query {
            self.search_query = query.to_string();
            self.current_page = 1;
        }
    }

    /// Builder form of [`set_type_tab`](Self::set_type_tab)
    pub fn with_type_tab(mut self, type_tab: TypeTab) -> Self {
        self.set_type_tab(type_tab);
        self
    }

    /// Builder form of [`set_status_filter`](Self::set_status_filter)
    pub fn with_status_filter(mut self, status_filter: StatusFilter) -> Self {
        self.set_status_filter(status_filter);
        self
    }

    /// Builder form of [`set_search_query`](Self::set_search_query)
    pub fn with_search_query(mut self, query: &str) -> Self {
        self.set_search_query(query);
        self
    }

    /// Set the page without clamping; out-of-range pages yield an empty slice.
    /// Page 0 is treated as page 1.
    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page.max(1);
        self
    }

    /// Go to the previous page, never below 1
    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Go to the next page, never beyond `total_pages`
    pub fn next_page(&mut self, total_pages: usize) {
        self.current_page = (self.current_page + 1).min(total_pages.max(1));
    }

    /// Jump to `page`, clamped to `[1, total_pages]`
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    /// Whether a transaction passes every active predicate
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_with(tx, &self.search_query.to_lowercase())
    }

    fn matches_with(&self, tx: &Transaction, query_lower: &str) -> bool {
        self.type_tab.matches(tx.tx_type)
            && self.status_filter.matches(tx.status)
            && (query_lower.is_empty() || tx.matches_query(query_lower))
    }
}

// ==================== Statistics ====================

/// Aggregate statistics over the full, unfiltered snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionStats {
    /// Sum of cash_in amounts
    pub total_income: f64,
    /// Sum of every other amount
    pub total_expenses: f64,
    /// Server-supplied balance, never recomputed
    pub net_balance: f64,
    pub currency: String,
    pub transaction_count: usize,
}

impl TransactionStats {
    /// Whether the net balance is negative
    pub fn is_deficit(&self) -> bool {
        self.net_balance < 0.0
    }
}

/// Compute the summary statistics of a snapshot
pub fn compute_stats(data: &TransactionData) -> TransactionStats {
    let (income, expenses) = data
        .transactions
        .iter()
        .fold((0.0, 0.0), |(income, expenses), t| {
            if t.is_inflow() {
                (income + t.amount, expenses)
            } else {
                (income, expenses + t.amount)
            }
        });

    TransactionStats {
        total_income: income,
        total_expenses: expenses,
        net_balance: data.total_balance,
        currency: data.currency.clone(),
        transaction_count: data.transactions.len(),
    }
}

// ==================== Filtering & Pagination ====================

/// Apply the type tab, status and search predicates, keeping source order
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    params: &ViewParams,
) -> Vec<&'a Transaction> {
    let query_lower = params.search_query.to_lowercase();
    transactions
        .iter()
        .filter(|t| params.matches_with(t, &query_lower))
        .collect()
}

/// Number of pages needed for `count` items
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// The 1-based `page` of `items`; empty when out of range
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if page == 0 || start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Everything the presentation layer needs to draw the list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    pub stats: TransactionStats,
    pub visible_page: Vec<Transaction>,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl TransactionView {
    /// Pagination controls are shown only for more than one page of results
    pub fn show_pagination(&self) -> bool {
        self.filtered_count > 0 && self.total_pages > 1
    }

    /// Whether the active filters matched anything
    pub fn has_matches(&self) -> bool {
        self.filtered_count > 0
    }

    /// 1-based index of the first visible row, 0 when nothing is visible
    pub fn range_start(&self) -> usize {
        if self.visible_page.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last visible row, 0 when nothing is visible
    pub fn range_end(&self) -> usize {
        if self.visible_page.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.page_size + self.visible_page.len()
        }
    }
}

/// Compute the full view of a snapshot
pub fn compute_view(data: &TransactionData, params: &ViewParams) -> TransactionView {
    let filtered = filter_transactions(&data.transactions, params);
    let filtered_count = filtered.len();
    let visible_page = page_slice(&filtered, params.current_page, params.page_size)
        .iter()
        .map(|t| (*t).clone())
        .collect();

    TransactionView {
        stats: compute_stats(data),
        visible_page,
        total_pages: total_pages(filtered_count, params.page_size),
        filtered_count,
        current_page: params.current_page,
        page_size: params.page_size,
    }
}
