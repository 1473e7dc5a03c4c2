// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding API Module
//!
//! POST /embeddings (alias /embeddings/generate): one vector per input text.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::embed_handler;
pub use request::{EmbedRequest, MAX_TEXTS, MAX_TEXT_CHARS};
pub use response::EmbedResponse;
