// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedRequest type and the text limits shared by the embedding endpoints

use crate::api::ApiError;
use serde::{Deserialize, Serialize};

/// Maximum number of texts (or documents) per request
pub const MAX_TEXTS: usize = 96;

/// Maximum length of a single text, in characters
pub const MAX_TEXT_CHARS: usize = 8192;

/// Request body for POST /embeddings
///
/// # Example
/// ```json
/// {
///   "texts": ["Hello world", "Another text"],
///   "model": "all-MiniLM-L6-v2"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// Texts to embed; may be empty
    pub texts: Vec<String>,

    /// Embedding model; the configured default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl EmbedRequest {
    /// Validates the embed request
    ///
    /// # Validation Rules
    /// 1. **texts**: at most 96 items
    /// 2. **text length**: each text at most 8192 characters
    /// 3. **model**: must not be blank when supplied
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_texts("texts", &self.texts)?;
        validate_model(self.model.as_deref())
    }
}

pub(crate) fn validate_texts(field: &str, texts: &[String]) -> Result<(), ApiError> {
    if texts.len() > MAX_TEXTS {
        return Err(ApiError::validation(
            field,
            format!(
                "{} array cannot contain more than {} items (got {})",
                field,
                MAX_TEXTS,
                texts.len()
            ),
        ));
    }

    for (index, text) in texts.iter().enumerate() {
        let chars = text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(ApiError::validation(
                format!("{}[{}]", field, index),
                format!(
                    "text cannot exceed {} characters (got {} characters)",
                    MAX_TEXT_CHARS, chars
                ),
            ));
        }
    }

    Ok(())
}

pub(crate) fn validate_model(model: Option<&str>) -> Result<(), ApiError> {
    match model {
        Some(name) if name.trim().is_empty() => Err(ApiError::validation(
            "model",
            "model name cannot be empty",
        )),
        _ => Ok(()),
    }
}
