use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::infra::storage::StorageError;

/// Portal service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("request not found")]
    RequestNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("page not found")]
    PageNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid company")]
    InvalidCompany,
    #[error("weak password")]
    WeakPassword,
    #[error("registration disabled")]
    RegistrationDisabled,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("storage unavailable")]
    StorageUnavailable(#[from] StorageError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PortalError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::RequestNotFound => "REQUEST_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PageNotFound => "PAGE_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidCompany => "INVALID_COMPANY",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::RegistrationDisabled => "REGISTRATION_DISABLED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::RequestNotFound | Self::UserNotFound | Self::PageNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidEmail | Self::InvalidCompany | Self::WeakPassword => {
                StatusCode::BAD_REQUEST
            }
            Self::RegistrationDisabled | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::StorageUnavailable(e) => {
                tracing::error!(error = %e, kind = "STORAGE_UNAVAILABLE", "storage write failed");
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
