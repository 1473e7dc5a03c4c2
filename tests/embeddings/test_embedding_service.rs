// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbeddingService tests against the hash backend

use anyhow::Result;
use async_trait::async_trait;
use futures_util::future::join_all;
use ideahub_ai_service::embeddings::{
    EmbeddingError, EmbeddingService, HashEmbeddingBackend, HashModelLoader, ModelCache,
    ModelHandle, ModelLoader, DEFAULT_MODEL,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Slow loader that counts how often it runs
#[derive(Default)]
struct SlowCountingLoader {
    loads: AtomicUsize,
}

#[async_trait]
impl ModelLoader for SlowCountingLoader {
    async fn load(&self, model_id: &str) -> Result<ModelHandle> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(Arc::new(HashEmbeddingBackend::new(model_id, 384, true)?))
    }
}

fn service(loader: HashModelLoader) -> (EmbeddingService, Arc<ModelCache>) {
    let cache = Arc::new(ModelCache::new(Arc::new(loader)));
    (EmbeddingService::new(cache.clone(), DEFAULT_MODEL), cache)
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_embed_loads_model_on_first_use() {
    let (service, cache) = service(HashModelLoader::new(384));
    assert!(!cache.is_loaded(DEFAULT_MODEL).await);

    let batch = service.embed(&texts(&["a", "b", ""]), None).await.unwrap();

    assert_eq!(batch.model, DEFAULT_MODEL);
    assert_eq!(batch.vectors.len(), 3);
    assert!(batch.vectors.iter().all(|v| v.len() == 384));
    assert!(cache.is_loaded(DEFAULT_MODEL).await);
}

#[tokio::test]
async fn test_empty_input_has_no_load_side_effect() {
    let (service, cache) = service(HashModelLoader::new(384));

    let batch = service.embed(&[], Some("other-model")).await.unwrap();
    assert!(batch.vectors.is_empty());

    let ranking = service.rank_by_relevance("query", &[], None).await.unwrap();
    assert!(ranking.results.is_empty());

    assert!(cache.loaded_models().await.is_empty());
}

/// Requested model fails, default loads: batch reports the default
#[tokio::test]
async fn test_fallback_to_default_model() {
    let (service, cache) = service(HashModelLoader::new(384).with_unavailable("missing-model"));

    let batch = service
        .embed(&texts(&["hello"]), Some("missing-model"))
        .await
        .unwrap();

    assert_eq!(batch.model, DEFAULT_MODEL);
    assert_eq!(cache.loaded_models().await, vec![DEFAULT_MODEL]);
}

#[tokio::test]
async fn test_default_model_failure_surfaces() {
    let (service, _) = service(HashModelLoader::new(384).with_unavailable(DEFAULT_MODEL));

    let err = service.embed(&texts(&["hello"]), None).await.unwrap_err();
    match err {
        EmbeddingError::ModelLoad { model, .. } => assert_eq!(model, DEFAULT_MODEL),
        other => panic!("expected ModelLoad, got {:?}", other),
    }
}

#[tokio::test]
async fn test_similarity_of_embedded_texts() {
    let (service, _) = service(HashModelLoader::new(384));

    let batch = service
        .embed(&texts(&["same text", "same text", "something else"]), None)
        .await
        .unwrap();

    let same = service.similarity(&batch.vectors[0], &batch.vectors[1]).unwrap();
    let different = service.similarity(&batch.vectors[0], &batch.vectors[2]).unwrap();

    assert!((same - 1.0).abs() < 1e-5);
    assert!(different < same);
    assert!((-1.0..=1.0).contains(&different));
}

#[tokio::test]
async fn test_ranking_covers_every_document() {
    let (service, _) = service(HashModelLoader::new(64));
    let documents = texts(&["alpha", "beta", "gamma", "delta", "beta"]);

    let ranking = service
        .rank_by_relevance("beta", &documents, None)
        .await
        .unwrap();

    let mut indices: Vec<usize> = ranking.results.iter().map(|r| r.index).collect();
    assert_eq!(&indices[..2], &[1, 4], "exact matches first, in request order");

    indices.sort();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    for result in &ranking.results {
        assert_eq!(result.content, documents[result.index]);
    }
}

/// Concurrent first requests through the service share one model load
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_embed_calls_load_once() {
    let loader = Arc::new(SlowCountingLoader::default());
    let cache = Arc::new(ModelCache::new(loader.clone()));
    let service = Arc::new(EmbeddingService::new(cache.clone(), DEFAULT_MODEL));

    let tasks = (0..12).map(|_| {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .embed(&texts(&["first request", "second text"]), None)
                .await
        })
    });

    let batches: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.loaded_models().await, vec![DEFAULT_MODEL]);

    for batch in &batches {
        assert_eq!(batch.model, DEFAULT_MODEL);
        assert_eq!(batch.vectors.len(), 2);
        assert!(batch.vectors.iter().all(|v| v.len() == 384));
        assert_eq!(batch.vectors, batches[0].vectors);
    }
}
