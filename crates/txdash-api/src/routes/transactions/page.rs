//! Transactions page rendering - Full page endpoint and HTML fragments
//!
//! Endpoints:
//! - page_transactions: Dashboard with summary cards, tabs, filters and list
//!
//! Helper functions:
//! - render_state: Body for any dashboard state
//! - render_list: Transaction table with pagination

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use txdash_config::Config;
use txdash_core::{
    DashboardState, StatusFilter, Transaction, TransactionStats, TransactionStatus,
    TransactionView, TypeTab, ViewParams,
};
use txdash_utils::{escape_html, format_amount, humanize, relative_date};

use super::{list_query, resolve_state, view_params};
use crate::AppState;

const LIST_TARGET: &str = "#transactions-content";

/// Transactions page - Main dashboard
pub async fn page_transactions(
    state: State<AppState>,
    headers: HeaderMap,
    query: Query<HashMap<String, String>>,
) -> Html<String> {
    let mut params = view_params(&query, state.dashboard.page_size());
    let dashboard_state = resolve_state(&state.dashboard, &mut params).await;

    let inner_content = format!(
        r#"<div id='dashboard'>
            <div class='mb-6 flex items-start justify-between gap-4'>
                <div>
                    <h1 class='mb-1 text-2xl sm:text-3xl font-bold text-indigo-700'>Financial Records</h1>
                    <p class='text-sm text-gray-500'>Track and manage income and expenses</p>
                </div>
                <button onclick='reloadTransactions()' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200' title='Fetch transactions again'>Refresh</button>
            </div>
            {}
        </div>
        <script>
        function reloadTransactions() {{
            fetch('/api/reload', {{method: 'POST'}})
                .then(r => r.json())
                .then(data => {{
                    if (!data.success) {{
                        console.warn('Reload failed: ' + data.message);
                    }}
                    window.location.reload();
                }})
                .catch(() => window.location.reload());
        }}
        </script>"#,
        render_state(&dashboard_state, &params, &state.config, true)
    );

    Html(crate::page_response(&headers, "Financial Records", &inner_content))
}

/// Render the body for a dashboard state.
///
/// `with_controls` adds the summary cards, tabs and filters around the list.
/// Without them the tabs ride along as an out-of-band swap so their links
/// pick up the search and status of the fragment request.
pub fn render_state(state: &DashboardState, params: &ViewParams, config: &Config, with_controls: bool) -> String {
    match state {
        DashboardState::Loading => render_loading(params),
        DashboardState::Error { message } => render_error(message),
        DashboardState::Empty { .. } => render_empty(),
        DashboardState::Content(view) if with_controls => format!(
            "{}{}{}<div id='transactions-content'>{}</div>",
            render_stats_cards(&view.stats, config),
            render_tabs(params, false),
            render_filters(params),
            render_list(view, params, config)
        ),
        DashboardState::Content(view) => format!(
            "{}{}",
            render_list(view, params, config),
            render_tabs(params, true)
        ),
    }
}

fn render_loading(params: &ViewParams) -> String {
    let skeleton_row = "<div class='h-12 rounded bg-gray-200'></div>";
    format!(
        r#"<div hx-get='/transactions?{}' hx-trigger='load delay:1s' hx-target='#dashboard' hx-swap='outerHTML' class='animate-pulse space-y-4'>
            <div class='grid grid-cols-1 sm:grid-cols-3 gap-4'>
                <div class='h-28 rounded-xl bg-gray-200'></div>
                <div class='h-28 rounded-xl bg-gray-200'></div>
                <div class='h-28 rounded-xl bg-gray-200'></div>
            </div>
            <div class='space-y-2'>{}</div>
            <p class='text-gray-500 text-center'>Loading transactions...</p>
        </div>"#,
        list_query(params, params.current_page()),
        skeleton_row.repeat(params.page_size())
    )
}

fn render_error(message: &str) -> String {
    format!(
        r#"<div class='flex min-h-[400px] items-center justify-center p-8'>
            <div class='max-w-md text-center'>
                <div class='mb-6 flex justify-center'>
                    <div class='flex h-20 w-20 items-center justify-center rounded-full bg-red-100 text-3xl text-red-600'>!</div>
                </div>
                <h3 class='mb-2 text-xl font-bold text-gray-900'>Oops! Something went wrong</h3>
                <p class='mb-6 text-sm text-gray-600'>{}</p>
                <button onclick='reloadTransactions()' class='inline-flex items-center gap-2 rounded-xl bg-indigo-600 px-6 py-3 font-semibold text-white shadow-lg hover:bg-indigo-700'>Try Again</button>
            </div>
        </div>"#,
        escape_html(message)
    )
}

fn render_empty() -> String {
    r#"<div class='flex min-h-[400px] items-center justify-center p-8'>
            <div class='max-w-md text-center'>
                <div class='mb-6 flex justify-center'>
                    <div class='flex h-20 w-20 items-center justify-center rounded-full bg-gray-100 text-3xl text-gray-400'>&#128229;</div>
                </div>
                <h3 class='mb-2 text-xl font-bold text-gray-900'>No Transactions Yet</h3>
                <p class='text-sm text-gray-600'>You don't have any transactions at the moment. Your transaction history will appear here once you start making transactions.</p>
            </div>
        </div>"#
        .to_string()
}

fn render_stats_cards(stats: &TransactionStats, config: &Config) -> String {
    let currency = if stats.currency.is_empty() {
        config.display.default_currency.as_str()
    } else {
        stats.currency.as_str()
    };
    let sep = config.display.thousands_separator.as_str();
    let (balance_label, balance_color) = if stats.is_deficit() {
        ("Deficit", "text-red-600")
    } else {
        ("Surplus", "text-green-600")
    };

    format!(
        r#"<div class='mb-6 grid grid-cols-1 sm:grid-cols-3 gap-4'>
            <div class='bg-white p-5 rounded-xl border border-gray-200 shadow-sm'><p class='text-xs font-medium tracking-wider text-gray-500'>TOTAL INCOME</p><p class='text-2xl font-bold text-green-600'>{}</p><p class='text-xs text-gray-400'>From cash in</p></div>
            <div class='bg-white p-5 rounded-xl border border-gray-200 shadow-sm'><p class='text-xs font-medium tracking-wider text-gray-500'>TOTAL EXPENSES</p><p class='text-2xl font-bold text-red-600'>{}</p><p class='text-xs text-gray-400'>All expenses</p></div>
            <div class='bg-white p-5 rounded-xl border border-gray-200 shadow-sm'><p class='text-xs font-medium tracking-wider text-gray-500'>TOTAL BALANCE</p><p class='text-2xl font-bold {}'>{}</p><p class='text-xs text-gray-400'>{}</p></div>
        </div>"#,
        escape_html(&format_amount(stats.total_income, currency, sep)),
        escape_html(&format_amount(stats.total_expenses, currency, sep)),
        balance_color,
        escape_html(&format_amount(stats.net_balance, currency, sep)),
        balance_label
    )
}

fn render_tabs(params: &ViewParams, out_of_band: bool) -> String {
    let tabs: Vec<String> = TypeTab::ALL
        .iter()
        .map(|&tab| {
            let target = params.clone().with_type_tab(tab);
            let query = list_query(&target, target.current_page());
            let class = if tab == params.type_tab() {
                "border-b-2 border-indigo-600 text-indigo-600"
            } else {
                "text-gray-500 hover:text-gray-700"
            };
            format!(
                "<a href='/transactions?{q}' hx-get='/transactions?{q}' hx-target='#dashboard' hx-swap='outerHTML' hx-push-url='true' class='pb-3 text-sm font-medium whitespace-nowrap {}'>{}</a>",
                class,
                tab.label(),
                q = query
            )
        })
        .collect();

    format!(
        "<div id='tx-tabs'{} class='mb-4 border-b border-gray-200'><div class='flex gap-8'>{}</div></div>",
        if out_of_band { " hx-swap-oob='true'" } else { "" },
        tabs.join("")
    )
}

fn render_filters(params: &ViewParams) -> String {
    let options: Vec<String> = StatusFilter::ALL
        .iter()
        .map(|&status| {
            format!(
                "<option value='{}'{}>{}</option>",
                status,
                if status == params.status_filter() { " selected" } else { "" },
                status.label()
            )
        })
        .collect();

    format!(
        r#"<form id='tx-filters' action='/transactions' method='get' hx-get='/transactions/list' hx-target='{}' hx-trigger='input changed delay:300ms from:#tx-search, change from:#tx-status, submit' class='mb-4 flex flex-col gap-3 sm:flex-row sm:items-center sm:justify-between'>
            <input type='hidden' name='tab' value='{}'>
            <input id='tx-search' type='text' name='q' value='{}' placeholder='Search transactions...' class='w-full sm:max-w-md rounded-lg border border-gray-300 py-2 px-4 text-sm'>
            <select id='tx-status' name='status' class='rounded-lg border border-gray-300 bg-white px-4 py-2 text-sm'>{}</select>
        </form>"#,
        LIST_TARGET,
        params.type_tab(),
        escape_html(params.search_query()),
        options.join("")
    )
}

/// Transaction table with pagination, or the no-match message
pub fn render_list(view: &TransactionView, params: &ViewParams, config: &Config) -> String {
    if !view.has_matches() {
        return r#"<div class='text-center py-12 text-gray-500'><p>No transactions found matching your criteria.</p></div>"#.to_string();
    }

    let today = chrono::Local::now().date_naive();
    let rows: Vec<String> = view
        .visible_page
        .iter()
        .map(|tx| render_row(tx, &view.stats.currency, config, today))
        .collect();

    let mut html = format!(
        r#"<div class='overflow-hidden rounded-xl border border-gray-200 bg-white shadow-sm'>
            <div class='overflow-x-auto'>
                <table class='w-full'>
                    <thead class='bg-gray-50'>
                        <tr>
                            <th class='px-6 py-3 text-left text-xs font-medium uppercase tracking-wider text-gray-500'>Receipt #</th>
                            <th class='px-6 py-3 text-left text-xs font-medium uppercase tracking-wider text-gray-500'>Recipient</th>
                            <th class='px-6 py-3 text-left text-xs font-medium uppercase tracking-wider text-gray-500'>Type</th>
                            <th class='px-6 py-3 text-left text-xs font-medium uppercase tracking-wider text-gray-500'>Amount</th>
                            <th class='px-6 py-3 text-left text-xs font-medium uppercase tracking-wider text-gray-500'>Method</th>
                            <th class='px-6 py-3 text-left text-xs font-medium uppercase tracking-wider text-gray-500'>Date</th>
                            <th class='px-6 py-3 text-left text-xs font-medium uppercase tracking-wider text-gray-500'>Status</th>
                        </tr>
                    </thead>
                    <tbody class='divide-y divide-gray-200 bg-white'>{}</tbody>
                </table>
            </div>
        </div>"#,
        rows.join("")
    );

    if view.show_pagination() {
        html.push_str(&render_pagination(view, params));
    }
    html
}

fn render_row(tx: &Transaction, currency: &str, config: &Config, today: chrono::NaiveDate) -> String {
    let currency = if currency.is_empty() { tx.currency.as_str() } else { currency };
    let relative = tx
        .parsed_date()
        .map(|d| relative_date(d, today))
        .unwrap_or_default();
    let (status_icon, status_color) = match tx.status {
        TransactionStatus::Success => ("&#10003;", "text-green-600"),
        TransactionStatus::Pending => ("&#9201;", "text-yellow-600"),
        TransactionStatus::Failed => ("&#10007;", "text-red-600"),
    };

    format!(
        r#"<tr class='hover:bg-gray-50'>
            <td class='whitespace-nowrap px-6 py-4 text-sm font-medium text-indigo-700'>{}</td>
            <td class='px-6 py-4 text-sm font-medium text-gray-900'>{}</td>
            <td class='whitespace-nowrap px-6 py-4 text-sm text-gray-600'>{}</td>
            <td class='whitespace-nowrap px-6 py-4 text-sm font-semibold {}'>{}</td>
            <td class='whitespace-nowrap px-6 py-4 text-sm text-gray-600'>{}</td>
            <td class='whitespace-nowrap px-6 py-4 text-sm text-gray-600' title='{}'>{}</td>
            <td class='whitespace-nowrap px-6 py-4'><span class='{}' title='{}'>{}</span></td>
        </tr>"#,
        escape_html(&tx.id),
        escape_html(&tx.recipient),
        humanize(&tx.tx_type.to_string()),
        if tx.is_inflow() { "text-green-600" } else { "text-gray-900" },
        escape_html(&format_amount(tx.amount, currency, &config.display.thousands_separator)),
        tx.tx_type.payment_method(),
        escape_html(&relative),
        escape_html(&tx.display_date()),
        status_color,
        humanize(&tx.status.to_string()),
        status_icon
    )
}

fn render_pagination(view: &TransactionView, params: &ViewParams) -> String {
    let mut previous = params.clone();
    previous.previous_page();
    let mut next = params.clone();
    next.next_page(view.total_pages);

    let nav_button = |label: &str, page: usize, disabled: bool| {
        format!(
            "<button {} hx-get='/transactions/list?{}' hx-target='{}' class='px-3 py-1 border rounded-lg hover:bg-gray-100 disabled:opacity-50 disabled:cursor-not-allowed'>{}</button>",
            if disabled { "disabled" } else { "" },
            list_query(params, page),
            LIST_TARGET,
            label
        )
    };

    let pages: Vec<String> = (1..=view.total_pages)
        .map(|page| {
            let class = if page == view.current_page {
                "bg-indigo-600 text-white"
            } else {
                "border hover:bg-gray-100"
            };
            format!(
                "<button hx-get='/transactions/list?{}' hx-target='{}' class='px-3 py-1 rounded-lg {}'>{}</button>",
                list_query(params, page),
                LIST_TARGET,
                class,
                page
            )
        })
        .collect();

    format!(
        r#"<div class='mt-4 flex flex-col sm:flex-row items-center justify-between gap-3 rounded-xl border border-gray-200 bg-white px-6 py-4 shadow-sm'>
            <span class='text-sm text-gray-600'>Showing {} to {} of {} transactions</span>
            <div class='flex items-center gap-2'>{}{}{}</div>
        </div>"#,
        view.range_start(),
        view.range_end(),
        view.filtered_count,
        nav_button("Previous", previous.current_page(), view.current_page <= 1),
        pages.join(""),
        nav_button("Next", next.current_page(), view.current_page >= view.total_pages)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{get, loaded_state, sample, send, tx};
    use txdash_core::{ClientError, StaticSource, TransactionData, TransactionType};

    fn many(count: usize) -> TransactionData {
        TransactionData {
            total_balance: -500.0,
            currency: "RWF".to_string(),
            transactions: (1..=count)
                .map(|i| tx(&format!("T{i}"), "Shop", TransactionType::Payment, 1000.0, TransactionStatus::Success))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_page_renders_cards_tabs_and_table() {
        let state = loaded_state(StaticSource::new(sample())).await;
        let (_, body) = send(state, get("/transactions")).await;

        assert!(body.contains("TOTAL INCOME"));
        assert!(body.contains("RWF 100,000"));
        assert!(body.contains("RWF 15,000"));
        assert!(body.contains("Surplus"));
        assert!(body.contains("All Transactions"));
        assert!(body.contains("Income"));
        assert!(body.contains("Expenses"));
        assert!(body.contains("Simba Supermarket"));
        assert!(body.contains("Bank Transfer"));
        assert!(body.contains("placeholder='Search transactions...'"));
        // three rows fit on one page
        assert!(!body.contains("Showing 1 to"));
    }

    #[tokio::test]
    async fn test_page_applies_query_filters() {
        let state = loaded_state(StaticSource::new(sample())).await;
        let (_, body) = send(state, get("/transactions?tab=cash_out&status=failed")).await;

        assert!(body.contains("REG Electricity"));
        assert!(!body.contains("Simba Supermarket"));
        assert!(!body.contains("Salary Corp"));
        assert!(body.contains("<option value='failed' selected>"));
    }

    #[tokio::test]
    async fn test_deficit_balance() {
        let state = loaded_state(StaticSource::new(many(2))).await;
        let (_, body) = send(state, get("/")).await;
        assert!(body.contains("RWF -500"));
        assert!(body.contains("Deficit"));
    }

    #[tokio::test]
    async fn test_pagination_shown_for_multiple_pages() {
        let state = loaded_state(StaticSource::new(many(8))).await;
        let (_, body) = send(state, get("/transactions")).await;
        assert!(body.contains("Showing 1 to 6 of 8 transactions"));
        assert!(body.contains("page=2"));
    }

    #[tokio::test]
    async fn test_page_beyond_last_is_clamped() {
        let state = loaded_state(StaticSource::new(many(8))).await;
        let (_, body) = send(state, get("/transactions?page=9")).await;
        assert!(body.contains("Showing 7 to 8 of 8 transactions"));
    }

    #[tokio::test]
    async fn test_empty_snapshot_shows_empty_state() {
        let state = loaded_state(StaticSource::new(many(0))).await;
        let (_, body) = send(state, get("/transactions")).await;
        assert!(body.contains("No Transactions Yet"));
        assert!(!body.contains("TOTAL INCOME"));
        assert!(!body.contains("No transactions found matching your criteria."));
    }

    #[tokio::test]
    async fn test_error_state_offers_retry() {
        let state = loaded_state(StaticSource::failing(ClientError::Transport {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        }))
        .await;
        let (_, body) = send(state, get("/transactions")).await;
        assert!(body.contains("Oops! Something went wrong"));
        assert!(body.contains("Failed to fetch transactions: Internal Server Error"));
        assert!(body.contains("Try Again"));
        assert!(!body.contains("TOTAL INCOME"));
    }

    #[tokio::test]
    async fn test_recipient_is_escaped() {
        let mut data = sample();
        data.transactions[0].recipient = "<script>alert(1)</script>".to_string();
        let state = loaded_state(StaticSource::new(data)).await;
        let (_, body) = send(state, get("/transactions")).await;
        assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!body.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_tabs_reset_page_on_change() {
        let params = ViewParams::new(6).with_page(3);
        let html = render_tabs(&params, false);
        assert!(!html.contains("hx-swap-oob"));
        assert!(html.contains("tab=all&status=all&q=&page=3"));
        assert!(html.contains("tab=cash_in&status=all&q=&page=1"));
        assert!(html.contains("tab=cash_out&status=all&q=&page=1"));
    }

    #[tokio::test]
    async fn test_list_fragment_refreshes_tab_links() {
        let state = loaded_state(StaticSource::new(sample())).await;
        let (_, body) = send(state, get("/transactions/list?tab=all&q=simba&status=pending")).await;

        assert!(body.contains("<div id='tx-tabs' hx-swap-oob='true'"));
        assert!(body.contains("hx-get='/transactions?tab=cash_in&status=pending&q=simba&page=1'"));
        assert!(body.contains("hx-get='/transactions?tab=cash_out&status=pending&q=simba&page=1'"));
        assert!(!body.contains("tab=cash_in&status=all&q=&page=1"));
    }

    #[tokio::test]
    async fn test_list_fragment_without_matches_keeps_filters_in_tabs() {
        let state = loaded_state(StaticSource::new(sample())).await;
        let (_, body) = send(state, get("/transactions/list?q=zzz&status=failed")).await;

        assert!(body.contains("No transactions found matching your criteria."));
        assert!(body.contains("tab=cash_in&status=failed&q=zzz&page=1"));
    }
}
