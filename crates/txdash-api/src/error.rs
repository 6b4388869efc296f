//! Error types for txdash-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use txdash_core::ClientError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Upstream(#[from] ClientError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl ApiError {
    /// HTTP status returned for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream(error) => match error {
                ClientError::NotFound { .. } => StatusCode::NOT_FOUND,
                ClientError::Transport { .. }
                | ClientError::Application { .. }
                | ClientError::Network { .. } => StatusCode::BAD_GATEWAY,
                ClientError::LookupFailed
                | ClientError::StatusFilterFailed
                | ClientError::TypeFilterFailed
                | ClientError::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn details(&self) -> serde_json::Value {
        match self {
            ApiError::Upstream(error) => serde_json::to_value(error.to_details())
                .unwrap_or_else(|_| serde_json::json!({ "message": error.to_string() })),
            ApiError::BadRequest { message } => serde_json::json!({
                "code": "BAD_REQUEST",
                "message": message,
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::warn!("Request failed with {}: {}", status, self);
        } else {
            log::debug!("Request failed with {}: {}", status, self);
        }
        (status, Json(self.details())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(ClientError::NotFound { id: "x".to_string() });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let transport = ApiError::from(ClientError::Transport {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        });
        assert_eq!(transport.status(), StatusCode::BAD_GATEWAY);

        let network = ApiError::from(ClientError::Network { message: "refused".to_string() });
        assert_eq!(network.status(), StatusCode::BAD_GATEWAY);

        assert_eq!(ApiError::from(ClientError::Unknown).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::BadRequest { message: "bad".to_string() }.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_details_body() {
        let error = ApiError::from(ClientError::NotFound { id: "T9".to_string() });
        let body = error.details();
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["status_code"], 404);
        assert_eq!(body["message"], "Transaction with id T9 not found");
    }
}
