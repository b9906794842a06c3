//! Error types for the caching proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the caching proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The origin could not be reached or its body could not be read
    #[error("{0}")]
    Origin(#[from] reqwest::Error),

    /// Startup configuration was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        // Plain body with no content type of its own.
        let body = Body::from(format!("Error: {}", self));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    #[tokio::test]
    async fn test_error_response_is_plain_500() {
        let response = ProxyError::InvalidConfig("boom".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(CONTENT_TYPE).is_none());

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Error: Invalid configuration: boom");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = ProxyError::InvalidConfig("port must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: port must be positive");
    }
}
