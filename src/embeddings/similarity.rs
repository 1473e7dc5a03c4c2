// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::embeddings::EmbeddingError;
use ndarray::ArrayView1;

/// Cosine similarity `dot(a, b) / (‖a‖·‖b‖)`.
///
/// Accumulates in `f64`. Returns 0.0 when either vector has zero magnitude.
/// The score is the raw cosine in [-1, 1]; opposite vectors score -1.0.
///
/// # Errors
/// `EmbeddingError::DimensionMismatch` when the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let a = ArrayView1::from(a).mapv(f64::from);
    let b = ArrayView1::from(b).mapv(f64::from);

    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let score = a.dot(&b) / (norm_a * norm_b);
    Ok(score.clamp(-1.0, 1.0) as f32)
}
