// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::embeddings::{RankedResult, Ranking};
use serde::{Deserialize, Serialize};

/// ```json
/// {
///   "results": [{"index": 1, "content": "...", "similarity": 0.83}],
///   "model": "all-MiniLM-L6-v2"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankingResponse {
    pub results: Vec<RankedResult>,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityResponse {
    pub similarity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RelevanceResponse {
    Ranking(RankingResponse),
    Similarity(SimilarityResponse),
}

impl From<Ranking> for RelevanceResponse {
    fn from(ranking: Ranking) -> Self {
        RelevanceResponse::Ranking(RankingResponse {
            results: ranking.results,
            model: ranking.model,
        })
    }
}

impl From<f32> for RelevanceResponse {
    fn from(similarity: f32) -> Self {
        RelevanceResponse::Similarity(SimilarityResponse { similarity })
    }
}
