use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StoreError;

/// Message returned when the store rejects our credentials. Fixed so that
/// nothing about the configured keys reaches the client.
pub const CREDENTIALS_ERROR_MESSAGE: &str = "AWS credentials not configured properly";

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request body did not match the endpoint's schema
    #[error("{0}")]
    Validation(String),

    /// Request body exceeded the configured transport limit
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Store refused the request because of missing or invalid credentials
    #[error("{}", CREDENTIALS_ERROR_MESSAGE)]
    Credentials,

    /// Any other store-side failure
    #[error("{0}")]
    Store(String),
}

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Credentials => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Credentials(_) => GatewayError::Credentials,
            StoreError::Backend(msg) => GatewayError::Store(msg),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::Validation("missing field".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            GatewayError::Credentials.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::Store("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_credentials_error_hides_cause() {
        let err: GatewayError =
            StoreError::Credentials("InvalidAccessKeyId: AKIA123 does not exist".to_string()).into();

        assert_eq!(err.to_string(), CREDENTIALS_ERROR_MESSAGE);
        assert!(!err.to_string().contains("AKIA123"));
    }

    #[test]
    fn test_store_error_message_is_verbatim() {
        let err: GatewayError = StoreError::Backend("NoSuchBucket: bucket gone".to_string()).into();
        assert_eq!(err.to_string(), "NoSuchBucket: bucket gone");
    }
}
