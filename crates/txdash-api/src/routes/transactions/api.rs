//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Filtered, paginated view of the snapshot (JSON)
//! - api_transaction_detail: Single transaction by id, fresh fetch (JSON)
//! - api_transactions_by_status: Transactions with a status, fresh fetch (JSON)
//! - api_transactions_by_type: Transactions of a type, fresh fetch (JSON)
//! - htmx_transactions_list: Transaction table (HTML fragment)

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::Json;
use txdash_core::{DashboardState, Transaction, TransactionStatus, TransactionType};

use super::{resolve_state, view_params};
use crate::{ApiError, AppState};

/// Get the dashboard view for the query parameters (JSON API)
pub async fn api_transactions(
    state: State<AppState>,
    query: Query<HashMap<String, String>>,
) -> Json<DashboardState> {
    let mut params = view_params(&query, state.dashboard.page_size());
    Json(resolve_state(&state.dashboard, &mut params).await)
}

/// Get single transaction by id (JSON API)
pub async fn api_transaction_detail(
    state: State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state.queries.find_by_id(&id).await?;
    Ok(Json(transaction))
}

/// Get transactions with the given status (JSON API)
pub async fn api_transactions_by_status(
    state: State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let status = status
        .parse::<TransactionStatus>()
        .map_err(|message| ApiError::BadRequest { message })?;
    Ok(Json(state.queries.filter_by_status(status).await?))
}

/// Get transactions of the given type (JSON API)
pub async fn api_transactions_by_type(
    state: State<AppState>,
    Path(tx_type): Path<String>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let tx_type = tx_type
        .parse::<TransactionType>()
        .map_err(|message| ApiError::BadRequest { message })?;
    Ok(Json(state.queries.filter_by_type(tx_type).await?))
}

/// HTMX: Transactions list - Partial page update
pub async fn htmx_transactions_list(
    state: State<AppState>,
    query: Query<HashMap<String, String>>,
) -> Html<String> {
    let mut params = view_params(&query, state.dashboard.page_size());
    let dashboard_state = resolve_state(&state.dashboard, &mut params).await;
    Html(super::page::render_state(
        &dashboard_state,
        &params,
        &state.config,
        false,
    ))
}
