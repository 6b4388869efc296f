//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: Transaction dashboard, list fragment, JSON lookups

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use txdash_config::Config;
use txdash_core::{Dashboard, SourceRef, TransactionQueries, TransactionStats};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Snapshot shared by the dashboard routes
    pub dashboard: Arc<Dashboard>,
    /// Fresh-fetch lookups for the JSON API
    pub queries: TransactionQueries,
    pub config: Config,
}

impl AppState {
    /// Build the state around one transaction source
    pub fn new(config: Config, source: SourceRef) -> Self {
        let dashboard = Dashboard::new(source.clone(), config.pagination.page_size);
        Self {
            dashboard: Arc::new(dashboard),
            queries: TransactionQueries::new(source),
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::{
        api_transaction_detail, api_transactions, api_transactions_by_status,
        api_transactions_by_type, htmx_transactions_list, page_transactions,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/:id", get(api_transaction_detail))
        .route("/api/transactions/status/:status", get(api_transactions_by_status))
        .route("/api/transactions/type/:type", get(api_transactions_by_type))
        .route("/api/reload", post(api_reload))
        // HTMX page routes
        .route("/", get(page_transactions))
        .route("/transactions", get(page_transactions))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Statistics over the current snapshot (JSON API)
async fn api_summary(state: State<AppState>) -> Json<TransactionStats> {
    Json(state.dashboard.stats().await)
}

/// Refetch the snapshot
async fn api_reload(state: State<AppState>) -> Json<serde_json::Value> {
    match state.dashboard.refetch().await {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": "Transactions reloaded",
        })),
        Err(e) => Json(serde_json::json!({
            "success": false,
            "message": e.to_string(),
        })),
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - txdash</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    <main class="min-h-screen p-4 md:p-8">
        <div class="mx-auto max-w-7xl">{}</div>
    </main>
</body>
</html>"#,
        txdash_utils::escape_html(title),
        content
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for a full page, or return it bare for HTMX swaps
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(title, inner_content)
    }
}

/// Start the HTTP server
///
/// Binds to the configured host and port and serves until the listener fails.
pub async fn start_server(state: AppState) -> std::io::Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting txdash server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Transaction dashboard)");
    log::info!("  - /transactions/list (HTMX list fragment)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use txdash_core::{
        ClientError, StaticSource, Transaction, TransactionData, TransactionStatus, TransactionType,
    };

    pub(crate) fn tx(id: &str, recipient: &str, tx_type: TransactionType, amount: f64, status: TransactionStatus) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: "2024-05-01T08:00:00Z".to_string(),
            recipient: recipient.to_string(),
            amount,
            currency: "RWF".to_string(),
            tx_type,
            status,
        }
    }

    pub(crate) fn sample() -> TransactionData {
        TransactionData {
            total_balance: 85000.0,
            currency: "RWF".to_string(),
            transactions: vec![
                tx("T1", "Salary Corp", TransactionType::CashIn, 100000.0, TransactionStatus::Success),
                tx("T2", "Simba Supermarket", TransactionType::Payment, 12500.0, TransactionStatus::Pending),
                tx("T3", "REG Electricity", TransactionType::Utility, 2500.0, TransactionStatus::Failed),
            ],
        }
    }

    pub(crate) async fn loaded_state(source: StaticSource) -> AppState {
        let state = AppState::new(Config::default(), Arc::new(source));
        let _ = state.dashboard.load().await;
        state
    }

    pub(crate) async fn send(state: AppState, request: Request<Body>) -> (StatusCode, String) {
        let response = create_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub(crate) fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = loaded_state(StaticSource::new(sample())).await;
        let (status, body) = send(state, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_summary() {
        let state = loaded_state(StaticSource::new(sample())).await;
        let (status, body) = send(state, get("/api/summary")).await;
        assert_eq!(status, StatusCode::OK);

        let stats: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(stats["total_income"], 100000.0);
        assert_eq!(stats["total_expenses"], 15000.0);
        assert_eq!(stats["net_balance"], 85000.0);
        assert_eq!(stats["transaction_count"], 3);
    }

    #[tokio::test]
    async fn test_reload_reports_outcome() {
        let state = loaded_state(StaticSource::new(sample())).await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/reload")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(state.clone(), request).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(state.dashboard.generation(), 2);

        let failing = loaded_state(StaticSource::failing(ClientError::Network {
            message: "connection refused".to_string(),
        }))
        .await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/reload")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(failing, request).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Network error: connection refused");
    }

    #[tokio::test]
    async fn test_full_page_vs_htmx_partial() {
        let state = loaded_state(StaticSource::new(sample())).await;
        let (status, body) = send(state.clone(), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("Financial Records"));

        let request = Request::builder()
            .uri("/transactions")
            .header("HX-Request", "true")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(state, request).await;
        assert!(!body.contains("<!DOCTYPE html>"));
        assert!(body.contains("Financial Records"));
    }

    #[test]
    fn test_base_html_escapes_title() {
        let html = base_html("<Dashboard>", "<p>body</p>");
        assert!(html.contains("<title>&lt;Dashboard&gt; - txdash</title>"));
        assert!(html.contains("<p>body</p>"));
    }
}
