// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Lazy embedding model cache
//!
//! Models are loaded on first use and kept for the lifetime of the process.
//! Each identifier owns a `OnceCell`, so concurrent first requests for the
//! same model wait on a single load instead of racing. A failed load drops
//! its entry, so only models that loaded successfully stay in the map and
//! the next request for a failed model tries again.

use crate::embeddings::{canonical_model_id, EmbeddingError, ModelHandle, ModelLoader};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{OnceCell, RwLock};
use tracing::{error, info};

pub struct ModelCache {
    loader: Arc<dyn ModelLoader>,
    models: RwLock<HashMap<String, Arc<OnceCell<ModelHandle>>>>,
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache").finish_non_exhaustive()
    }
}

impl ModelCache {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader,
            models: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached model for `model_id`, loading it on first use
    ///
    /// # Errors
    /// `EmbeddingError::ModelLoad` when the loader fails. Nothing is cached
    /// in that case.
    pub async fn get_or_load(&self, model_id: &str) -> Result<ModelHandle, EmbeddingError> {
        let key = canonical_model_id(model_id);
        let cell = self.cell_for(&key).await;

        let loaded = cell
            .get_or_try_init(|| async {
                info!("Loading embedding model: {}", key);
                let started = Instant::now();

                match self.loader.load(&key).await {
                    Ok(model) => {
                        info!(
                            "✓ Loaded embedding model {} ({} dimensions) in {:?}",
                            key,
                            model.dimension(),
                            started.elapsed()
                        );
                        Ok(model)
                    }
                    Err(e) => {
                        error!("✗ Failed to load model {}: {:#}", key, e);
                        Err(EmbeddingError::model_load(key.as_str(), e))
                    }
                }
            })
            .await
            .cloned();

        if loaded.is_err() {
            self.evict_failed(&key, &cell).await;
        }
        loaded
    }

    /// Removes `key` if it still maps to `cell` and nothing was loaded into it
    async fn evict_failed(&self, key: &str, cell: &Arc<OnceCell<ModelHandle>>) {
        let mut models = self.models.write().await;
        let stale = models
            .get(key)
            .map(|current| Arc::ptr_eq(current, cell) && !current.initialized())
            .unwrap_or(false);

        if stale {
            models.remove(key);
        }
    }

    async fn cell_for(&self, key: &str) -> Arc<OnceCell<ModelHandle>> {
        let existing = self.models.read().await.get(key).cloned();
        match existing {
            Some(cell) => cell,
            None => self
                .models
                .write()
                .await
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone(),
        }
    }

    pub async fn is_loaded(&self, model_id: &str) -> bool {
        let key = canonical_model_id(model_id);
        self.models
            .read()
            .await
            .get(&key)
            .map(|cell| cell.initialized())
            .unwrap_or(false)
    }

    /// Identifiers of successfully loaded models, sorted by name
    pub async fn loaded_models(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .models
            .read()
            .await
            .iter()
            .filter(|(_, cell)| cell.initialized())
            .map(|(name, _)| name.clone())
            .collect();

        names.sort();
        names
    }
}
