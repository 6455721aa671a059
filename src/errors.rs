// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum CockpitError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Please enter username and password.")]
    MissingCredentials,

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Notifier disabled - missing TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID")]
    NotifierDisabled,

    #[error("Notification failed: {0}")]
    NotificationError(String),
}

pub type Result<T> = std::result::Result<T, CockpitError>;

impl CockpitError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CockpitError::MissingCredentials | CockpitError::InvalidRating(_) => {
                StatusCode::BAD_REQUEST
            }
            CockpitError::NotifierDisabled => StatusCode::SERVICE_UNAVAILABLE,
            CockpitError::ReqwestError(_) | CockpitError::NotificationError(_) => {
                StatusCode::BAD_GATEWAY
            }
            CockpitError::IoError(_) | CockpitError::CsvError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CockpitError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            CockpitError::IoError(e) => tracing::error!("File I/O error: {}", e),
            CockpitError::CsvError(e) => tracing::error!("Feedback store error: {}", e),
            CockpitError::ReqwestError(e) => tracing::error!("HTTP client error: {}", e),
            CockpitError::NotificationError(msg) => tracing::error!("Notification failed: {}", msg),
            other => tracing::warn!("Request rejected: {}", other),
        }

        (status, Json(json!({ "success": false, "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        assert_eq!(CockpitError::MissingCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(CockpitError::InvalidRating(9).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CockpitError::NotificationError("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
