//! Error handling for the station proxy
//!
//! Provides consistent error responses in English and Portuguese

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_pt: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    // Upstream telemetry API errors
    #[error("Telemetry service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Telemetry service returned {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Telemetry response could not be decoded: {0}")]
    UpstreamDecode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation error on a named field with a static reason
    pub fn invalid_field(field: &str, reason: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: reason.to_string(),
            message_pt: format!("Valor inválido para {}: {}", field, reason),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_pt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_pt,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_pt: message_pt.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_pt: format!("Dados inválidos: {}", msg),
                    field: None,
                },
            ),
            AppError::UnknownAction(action) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "UNKNOWN_ACTION".to_string(),
                    message_en: format!("Unknown action '{}'", action),
                    message_pt: format!("Ação desconhecida '{}'", action),
                    field: Some("action".to_string()),
                },
            ),
            AppError::UpstreamUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "UPSTREAM_UNAVAILABLE".to_string(),
                    message_en: "Telemetry service is temporarily unavailable".to_string(),
                    message_pt: "Serviço de telemetria temporariamente indisponível".to_string(),
                    field: None,
                },
            ),
            AppError::UpstreamStatus { status, .. } => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "UPSTREAM_ERROR".to_string(),
                    message_en: format!("Telemetry service returned status {}", status),
                    message_pt: format!("Serviço de telemetria retornou status {}", status),
                    field: None,
                },
            ),
            AppError::UpstreamDecode(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "UPSTREAM_DECODE_ERROR".to_string(),
                    message_en: "Telemetry response could not be decoded".to_string(),
                    message_pt: "Resposta do serviço de telemetria inválida".to_string(),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_pt: format!("Erro de configuração: {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_pt: "Erro interno do servidor".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
