//! Transaction routes - Dashboard, filtering, pagination and lookups
//!
//! Features:
//! - Summary cards, type tabs, status filter and search
//! - HTMX partial updates of the transaction table
//! - JSON lookups by id, status and type
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

use std::collections::HashMap;

use txdash_core::{Dashboard, DashboardState, StatusFilter, TypeTab, ViewParams};

pub use api::{
    api_transaction_detail,
    api_transactions,
    api_transactions_by_status,
    api_transactions_by_type,
    htmx_transactions_list,
};

pub use page::page_transactions;

/// Read `tab`, `status`, `q` and `page` from the query string.
///
/// Unknown or malformed values fall back to their defaults.
pub fn view_params(query: &HashMap<String, String>, page_size: usize) -> ViewParams {
    let type_tab = query
        .get("tab")
        .and_then(|s| s.parse::<TypeTab>().ok())
        .unwrap_or_default();
    let status_filter = query
        .get("status")
        .and_then(|s| s.parse::<StatusFilter>().ok())
        .unwrap_or_default();
    let search = query.get("q").map(|s| s.trim()).unwrap_or("");
    let page = query
        .get("page")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);

    ViewParams::new(page_size)
        .with_type_tab(type_tab)
        .with_status_filter(status_filter)
        .with_search_query(search)
        .with_page(page)
}

/// Resolve the dashboard state, pulling a page beyond the last one back in range
pub async fn resolve_state(dashboard: &Dashboard, params: &mut ViewParams) -> DashboardState {
    let state = dashboard.state(params).await;
    let overflow = match &state {
        DashboardState::Content(view)
            if view.total_pages > 0 && params.current_page() > view.total_pages =>
        {
            Some(view.total_pages)
        }
        _ => None,
    };

    match overflow {
        Some(total_pages) => {
            params.go_to_page(params.current_page(), total_pages);
            dashboard.state(params).await
        }
        None => state,
    }
}

/// Query string for a list request with the given parameters and page
pub fn list_query(params: &ViewParams, page: usize) -> String {
    format!(
        "tab={}&status={}&q={}&page={}",
        params.type_tab(),
        params.status_filter(),
        urlencoding::encode(params.search_query()),
        page
    )
}
