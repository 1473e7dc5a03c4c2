// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Relevance API Module
//!
//! POST /relevance (aliases /similarity, /embeddings/similarity) accepts
//! either a query plus documents to rank, or two precomputed vectors to
//! compare.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::relevance_handler;
pub use request::{RankRequest, RelevanceRequest, VectorPairRequest};
pub use response::{RankingResponse, RelevanceResponse, SimilarityResponse};
