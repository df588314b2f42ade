use axum::http::StatusCode;
use thiserror::Error;

use crate::services::providers::ProviderError;

/// Application error taxonomy.
///
/// Each variant carries the HTTP status it maps to, so handlers never have to
/// inspect message text to pick a status code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("AI API error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConfigError(_) | AppError::Upstream(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to clients. Internal failures are collapsed to
    /// a generic string so no implementation detail leaks into the envelope.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InternalError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => AppError::ConfigError(anyhow::anyhow!(msg)),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let err = AppError::BadRequest("fibonacci must be a number".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "fibonacci must be a number");
    }

    #[test]
    fn missing_credential_maps_to_500_and_mentions_configuration() {
        let err = AppError::from(ProviderError::NotConfigured(
            "Gemini API key not configured".to_string(),
        ));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.public_message().contains("Configuration"));
    }

    #[test]
    fn internal_error_hides_details() {
        let err = AppError::InternalError(anyhow::anyhow!("socket table exhausted"));
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn provider_failure_maps_to_upstream() {
        let err = AppError::from(ProviderError::NetworkError("timed out".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.public_message().starts_with("AI API error"));
    }
}
