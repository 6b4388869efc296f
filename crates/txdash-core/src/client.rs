//! Reqwest-backed transaction client.
//!
//! The client owns transport details only: the request, HTTP status mapping
//! and envelope decoding. It performs no retries and keeps no state between
//! calls.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use anyhow::Context;
use reqwest::{header, Client, StatusCode, Url};
use txdash_config::ApiConfig;

use crate::error::{ClientError, ClientResult};
use crate::models::{TransactionData, TransactionResponse};

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Anything that can produce a full transaction snapshot.
///
/// Implementations return [`ClientError`] for classified failures; any other
/// error type is treated as foreign by the callers.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch the complete snapshot
    async fn fetch_all(&self) -> anyhow::Result<TransactionData>;
}

/// HTTP client for the `/transactions/` endpoint
#[derive(Debug, Clone)]
pub struct HttpTransactionClient {
    client: Client,
    endpoint: Url,
}

impl HttpTransactionClient {
    /// Build a client for the list `endpoint` with an optional request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(endpoint, builder.build()?))
    }

    /// Build a client from the `api` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error when `api.base_url` does not parse or the reqwest
    /// client cannot be constructed.
    pub fn from_config(api: &ApiConfig) -> anyhow::Result<Self> {
        let endpoint = api
            .transactions_url()
            .with_context(|| format!("Invalid api.base_url '{}'", api.base_url))?;
        Ok(Self::new(endpoint, api.timeout())?)
    }

    /// Create a client with a custom reqwest client
    pub fn with_client(endpoint: Url, client: Client) -> Self {
        Self { client, endpoint }
    }

    /// Full URL of the transaction list endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch and validate the transaction snapshot
    pub async fn fetch_transactions(&self) -> ClientResult<TransactionData> {
        log::debug!("GET {}", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("GET {} -> {}", self.endpoint, status);
            return Err(map_status_error(status));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let data = parse_envelope(body.as_ref())?;
        log::debug!(
            "GET {} -> {} transactions",
            self.endpoint,
            data.transactions.len()
        );
        Ok(data)
    }
}

#[async_trait]
impl TransactionSource for HttpTransactionClient {
    async fn fetch_all(&self) -> anyhow::Result<TransactionData> {
        Ok(self.fetch_transactions().await?)
    }
}

/// In-memory source returning a fixed outcome on every call
#[derive(Debug, Clone)]
pub struct StaticSource {
    outcome: ClientResult<TransactionData>,
}

impl StaticSource {
    /// Source that always succeeds with `data`
    pub fn new(data: TransactionData) -> Self {
        Self { outcome: Ok(data) }
    }

    /// Source that always fails with `error`
    pub fn failing(error: ClientError) -> Self {
        Self { outcome: Err(error) }
    }
}

#[async_trait]
impl TransactionSource for StaticSource {
    async fn fetch_all(&self) -> anyhow::Result<TransactionData> {
        Ok(self.outcome.clone()?)
    }
}

/// Decode a 2xx body: it must be JSON and its envelope status must be `success`
fn parse_envelope(body: &[u8]) -> ClientResult<TransactionData> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|error| ClientError::Network {
            message: format!("invalid JSON payload: {error}"),
        })?;

    if value.get("status").and_then(serde_json::Value::as_str) != Some("success") {
        return Err(ClientError::Application { response: value });
    }

    let envelope: TransactionResponse =
        serde_json::from_value(value).map_err(|error| ClientError::Network {
            message: format!("unexpected payload shape: {error}"),
        })?;
    Ok(envelope.data)
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    };
    ClientError::Network { message }
}

fn map_status_error(status: StatusCode) -> ClientError {
    let status_text = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string());
    ClientError::Transport {
        status: status.as_u16(),
        status_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TransactionStatus, TransactionType};
    use axum::{http::StatusCode as AxumStatus, routing::get, Router};

    const SUCCESS_BODY: &str = r#"{
        "status": "success",
        "data": {
            "total_balance": 85000,
            "currency": "RWF",
            "transactions": [
                {"id": "T1", "date": "2024-05-01T08:00:00Z", "recipient": "Salary", "amount": 100000, "currency": "RWF", "type": "cash_in", "status": "success"},
                {"id": "T2", "date": "2024-05-02T09:30:00Z", "recipient": "REG Electricity", "amount": 15000, "currency": "RWF", "type": "utility", "status": "pending"}
            ]
        }
    }"#;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: &str) -> HttpTransactionClient {
        let api = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        HttpTransactionClient::from_config(&api).unwrap()
    }

    #[test]
    fn test_parse_success_envelope() {
        let data = parse_envelope(SUCCESS_BODY.as_bytes()).unwrap();
        assert_eq!(data.total_balance, 85000.0);
        assert_eq!(data.transactions.len(), 2);
        assert_eq!(data.transactions[1].tx_type, TransactionType::Utility);
        assert_eq!(data.transactions[1].status, TransactionStatus::Pending);
    }

    #[test]
    fn test_parse_error_envelope_attaches_body() {
        let body = r#"{"status":"error","data":{"total_balance":0,"currency":"RWF","transactions":[]}}"#;
        match parse_envelope(body.as_bytes()) {
            Err(ClientError::Application { response }) => {
                assert_eq!(response["status"], "error");
                assert_eq!(response["data"]["currency"], "RWF");
            }
            other => panic!("expected application failure, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_status_is_application_failure() {
        let err = parse_envelope(br#"{"data": null}"#).unwrap_err();
        assert!(matches!(err, ClientError::Application { .. }));
        assert!(err.status_code().is_none());
    }

    #[test]
    fn test_parse_invalid_json_is_network_failure() {
        let err = parse_envelope(b"<html>gateway</html>").unwrap_err();
        assert!(matches!(err, ClientError::Network { .. }));
        assert!(err.to_string().starts_with("Network error: "));
    }

    #[test]
    fn test_parse_malformed_transactions_is_network_failure() {
        let body = r#"{"status":"success","data":{"total_balance":0,"currency":"RWF","transactions":[{"id":"T1"}]}}"#;
        let err = parse_envelope(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ClientError::Network { .. }));
    }

    #[test]
    fn test_map_status_error() {
        let err = map_status_error(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.to_string(), "Failed to fetch transactions: Internal Server Error");

        let err = map_status_error(StatusCode::from_u16(599).unwrap());
        assert_eq!(err.to_string(), "Failed to fetch transactions: 599");
    }

    #[test]
    fn test_endpoint_joined_from_base_url() {
        let client = client_for("http://localhost:9000/api/");
        assert_eq!(client.endpoint().as_str(), "http://localhost:9000/api/transactions/");

        let client = client_for("http://localhost:9000/api");
        assert_eq!(client.endpoint().as_str(), "http://localhost:9000/api/transactions/");
    }

    #[test]
    fn test_from_config_rejects_malformed_base_url() {
        let api = ApiConfig {
            base_url: "http://host:notaport/api".to_string(),
            timeout_secs: 0,
        };
        let err = HttpTransactionClient::from_config(&api).unwrap_err();
        assert!(err.to_string().contains("Invalid api.base_url"));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let router = Router::new().route(
            "/api/transactions/",
            get(|| async { ([("content-type", "application/json")], SUCCESS_BODY) }),
        );
        let base = serve(router).await;
        let client = client_for(&format!("{base}/api"));

        let data = client.fetch_transactions().await.unwrap();
        assert_eq!(data.currency, "RWF");
        assert_eq!(data.transactions[0].id, "T1");
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_transport_failure() {
        let router = Router::new().route(
            "/transactions/",
            get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = serve(router).await;
        let client = client_for(&base);

        let err = client.fetch_transactions().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { status: 500, .. }));
        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn test_fetch_error_envelope_is_application_failure() {
        let router = Router::new().route(
            "/transactions/",
            get(|| async { r#"{"status":"error","data":{"total_balance":0,"currency":"RWF","transactions":[]}}"# }),
        );
        let base = serve(router).await;
        let client = client_for(&base);

        let err = client.fetch_transactions().await.unwrap_err();
        assert!(matches!(err, ClientError::Application { .. }));
        assert_eq!(err.status_code(), None);
        assert_eq!(err.payload().unwrap()["status"], "error");
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}", addr));
        let err = client.fetch_transactions().await.unwrap_err();
        assert!(matches!(err, ClientError::Network { .. }));
        assert!(err.status_code().is_none());
    }

    #[tokio::test]
    async fn test_trait_error_downcasts_to_client_error() {
        let router = Router::new().route(
            "/transactions/",
            get(|| async { (AxumStatus::SERVICE_UNAVAILABLE, "") }),
        );
        let base = serve(router).await;
        let source: SourceRef = Arc::new(client_for(&base));

        let err = source.fetch_all().await.unwrap_err();
        let native = err.downcast::<ClientError>().unwrap();
        assert_eq!(native.status_code(), Some(503));
    }
}
