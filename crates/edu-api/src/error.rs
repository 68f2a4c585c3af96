// ============================================================================
// EDU API - Error Responses
// File: crates/edu-api/src/error.rs
// ============================================================================

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use edu_core::error::{DomainError, ErrorKind};

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
                ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                ErrorKind::ProvisioningFailure
                | ErrorKind::DeprovisioningFailure
                | ErrorKind::OutcomeUnknown
                | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::Infrastructure => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Domain(err) => match err.kind() {
                ErrorKind::Validation => "VALIDATION_ERROR",
                ErrorKind::NotFound => "NOT_FOUND",
                ErrorKind::Conflict => "CONFLICT",
                ErrorKind::Unauthorized => "UNAUTHORIZED",
                ErrorKind::Forbidden => "FORBIDDEN",
                ErrorKind::ProvisioningFailure => "PROVISIONING_FAILED",
                ErrorKind::DeprovisioningFailure => "DEPROVISIONING_FAILED",
                ErrorKind::OutcomeUnknown => "OUTCOME_UNKNOWN",
                ErrorKind::Infrastructure => "SERVICE_UNAVAILABLE",
                ErrorKind::Internal => "INTERNAL_ERROR",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // 4xx carry the reason; 5xx details stay in the logs
        let message = if status.is_server_error() {
            tracing::error!(code, "Request failed: {}", self);
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "Service temporarily unavailable".to_string(),
                _ if code == "OUTCOME_UNKNOWN" => {
                    "The operation may or may not have completed; check its state before retrying"
                        .to_string()
                }
                _ => "Internal server error".to_string(),
            }
        } else {
            tracing::warn!(code, "Request rejected: {}", self);
            self.to_string()
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::TenantNotFound("sma1".into()), StatusCode::NOT_FOUND),
            (DomainError::NamespaceKeyAlreadyExists("sma1".into()), StatusCode::CONFLICT),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (DomainError::ProvisioningFailure("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::OutcomeUnknown("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::DatabaseError("x".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }
}
