// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::api::embed::request::{validate_model, validate_texts};
use crate::api::ApiError;
use serde::{Deserialize, Serialize};

/// Rank `documents` against `query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub query: String,
    pub documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Compare two precomputed embeddings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorPairRequest {
    pub embedding1: Vec<f32>,
    pub embedding2: Vec<f32>,
}

/// Either request shape, told apart by its fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelevanceRequest {
    Rank(RankRequest),
    Vectors(VectorPairRequest),
}

impl RankRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_texts("query", std::slice::from_ref(&self.query))?;
        validate_texts("documents", &self.documents)?;
        validate_model(self.model.as_deref())
    }
}

impl VectorPairRequest {
    /// Rejects NaN and infinite components, including numbers outside `f32` range
    pub fn validate(&self) -> Result<(), ApiError> {
        let vectors = [("embedding1", &self.embedding1), ("embedding2", &self.embedding2)];
        for (field, vector) in vectors {
            if let Some(position) = vector.iter().position(|x| !x.is_finite()) {
                return Err(ApiError::validation(
                    field,
                    format!("value at index {} is not a finite number", position),
                ));
            }
        }
        Ok(())
    }
}
