// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod embed;
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod prompts;
pub mod relevance;

pub use embed::{embed_handler, EmbedRequest, EmbedResponse};
pub use errors::{ApiError, ErrorResponse};
pub use handlers::{health_handler, root_handler, HealthResponse, RootResponse};
pub use http_server::{create_app, start_server, AppState};
pub use prompts::{
    BrainstormPromptRequest, GeneralPromptRequest, GenerateRequest, PromptResponse,
    TechnicalPromptRequest, TemplatesResponse,
};
pub use relevance::{
    relevance_handler, RankRequest, RankingResponse, RelevanceRequest, RelevanceResponse,
    SimilarityResponse, VectorPairRequest,
};
