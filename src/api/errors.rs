// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::embeddings::EmbeddingError;
use crate::prompts::PromptError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
    pub error_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Body could not be parsed as the expected JSON shape
    InvalidRequest(String),
    ValidationError {
        field: String,
        message: String,
    },
    TemplateNotFound(String),
    MissingVariable {
        template: String,
        variable: String,
    },
    DimensionMismatch {
        left: usize,
        right: usize,
    },
    ModelLoad {
        model: String,
        reason: String,
    },
    Encoding {
        model: String,
        reason: String,
    },
    /// Unexpected failure; the message is logged, never returned
    InternalError(String),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::ValidationError { .. } => "validation_error",
            ApiError::TemplateNotFound(_) => "template_not_found",
            ApiError::MissingVariable { .. } => "missing_variable",
            ApiError::DimensionMismatch { .. } => "dimension_mismatch",
            ApiError::ModelLoad { .. } => "model_load_error",
            ApiError::Encoding { .. } => "encoding_error",
            ApiError::InternalError(_) => "internal_error",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let detail = match self {
            ApiError::InternalError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            detail,
            error_type: self.error_type().to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_)
            | ApiError::ValidationError { .. }
            | ApiError::TemplateNotFound(_)
            | ApiError::MissingVariable { .. }
            | ApiError::DimensionMismatch { .. } => 400,
            ApiError::ModelLoad { .. } | ApiError::Encoding { .. } | ApiError::InternalError(_) => {
                500
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::TemplateNotFound(name) => write!(f, "Template '{}' not found", name),
            ApiError::MissingVariable { template, variable } => write!(
                f,
                "Missing context variable '{}' for template '{}'",
                variable, template
            ),
            ApiError::DimensionMismatch { left, right } => {
                write!(f, "Embedding dimensions do not match: {} vs {}", left, right)
            }
            ApiError::ModelLoad { model, reason } => {
                write!(f, "Failed to load embedding model '{}': {}", model, reason)
            }
            ApiError::Encoding { model, reason } => {
                write!(f, "Failed to generate embeddings with '{}': {}", model, reason)
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<EmbeddingError> for ApiError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::ModelLoad { model, reason } => ApiError::ModelLoad { model, reason },
            EmbeddingError::Encoding { model, reason } => ApiError::Encoding { model, reason },
            EmbeddingError::DimensionMismatch { left, right } => {
                ApiError::DimensionMismatch { left, right }
            }
        }
    }
}

impl From<PromptError> for ApiError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::TemplateNotFound(name) => ApiError::TemplateNotFound(name),
            PromptError::MissingVariable { template, variable } => {
                ApiError::MissingVariable { template, variable }
            }
            // Registry problems are fixed at construction, never by the caller
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, Json(self.to_response())).into_response()
    }
}
