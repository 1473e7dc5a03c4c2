// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX model tests for all-MiniLM-L6-v2
//!
//! These need the exported model under `$MODELS_DIR/all-MiniLM-L6-v2-onnx/`
//! (default `./models`) and are ignored by default. Run with
//! `cargo test --test embeddings_tests -- --ignored`.

use ideahub_ai_service::embeddings::{
    cosine_similarity, EmbeddingBackend, ModelLoader, OnnxEmbeddingModel, OnnxModelLoader,
    OnnxModelOptions,
};
use std::path::PathBuf;

fn models_dir() -> PathBuf {
    std::env::var("MODELS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./models"))
}

async fn load_model() -> OnnxEmbeddingModel {
    let dir = models_dir().join("all-MiniLM-L6-v2-onnx");
    OnnxEmbeddingModel::new(
        "all-MiniLM-L6-v2",
        dir.join("model.onnx"),
        dir.join("tokenizer.json"),
        &OnnxModelOptions::default(),
        Some(384),
    )
    .await
    .expect("Failed to load model")
}

/// Test 1: Model loads and reports 384 dimensions
#[tokio::test]
#[ignore = "requires all-MiniLM-L6-v2 ONNX files"]
async fn test_model_loads_with_384_dimensions() {
    let model = load_model().await;
    assert_eq!(model.model_name(), "all-MiniLM-L6-v2");
    assert_eq!(model.dimension(), 384);
}

/// Test 2: Vectors are L2-normalized
#[tokio::test]
#[ignore = "requires all-MiniLM-L6-v2 ONNX files"]
async fn test_embeddings_are_normalized() {
    let model = load_model().await;
    let embedding = model.embed("Hello world").await.unwrap();

    assert_eq!(embedding.len(), 384);
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-3, "norm was {}", norm);
}

/// Test 3: Related sentences score above unrelated ones
#[tokio::test]
#[ignore = "requires all-MiniLM-L6-v2 ONNX files"]
async fn test_semantic_similarity_ordering() {
    let model = load_model().await;
    let texts = vec![
        "A cat sits on the mat".to_string(),
        "A kitten is resting on a rug".to_string(),
        "Quarterly tax filing deadlines".to_string(),
    ];
    let vectors = model.embed_batch(&texts).await.unwrap();

    let related = cosine_similarity(&vectors[0], &vectors[1]).unwrap();
    let unrelated = cosine_similarity(&vectors[0], &vectors[2]).unwrap();
    assert!(
        related > unrelated,
        "related {} should exceed unrelated {}",
        related,
        unrelated
    );
}

/// Test 4: Batched and single embeddings agree despite padding
#[tokio::test]
#[ignore = "requires all-MiniLM-L6-v2 ONNX files"]
async fn test_batch_matches_single() {
    let model = load_model().await;
    let texts = vec![
        "short".to_string(),
        "a considerably longer sentence that forces padding".to_string(),
    ];

    let batch = model.embed_batch(&texts).await.unwrap();
    let single = model.embed("short").await.unwrap();

    let agreement = cosine_similarity(&batch[0], &single).unwrap();
    assert!(agreement > 0.999, "agreement was {}", agreement);
}

#[tokio::test]
#[ignore = "requires all-MiniLM-L6-v2 ONNX files"]
async fn test_loader_resolves_prefixed_id() {
    let loader = OnnxModelLoader::new(models_dir(), false, OnnxModelOptions::default());
    let model = loader
        .load("sentence-transformers/all-MiniLM-L6-v2")
        .await
        .unwrap();
    assert_eq!(model.dimension(), 384);
}
