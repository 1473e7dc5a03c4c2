// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::api::prompts::{
    BrainstormPromptRequest, GeneralPromptRequest, GenerateRequest, PromptResponse,
    TechnicalPromptRequest, TemplatesResponse,
};
use crate::api::{http_server::AppState, ApiError};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

/// POST /prompts/general
pub async fn general_prompt_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneralPromptRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, ApiError> {
    let Json(request) = payload?;

    let prompt = state.prompts.general_prompt(
        &request.project_context,
        request.development_context.as_deref(),
        request.question.as_deref(),
    );
    Ok(Json(PromptResponse { prompt }))
}

/// POST /prompts/technical
pub async fn technical_prompt_handler(
    State(state): State<AppState>,
    payload: Result<Json<TechnicalPromptRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, ApiError> {
    let Json(request) = payload?;

    let prompt = state.prompts.technical_prompt(
        &request.project_context,
        request.code_snippets.as_deref(),
        request.error_message.as_deref(),
        request.specific_task.as_deref(),
    );
    Ok(Json(PromptResponse { prompt }))
}

/// POST /prompts/brainstorm
pub async fn brainstorm_prompt_handler(
    State(state): State<AppState>,
    payload: Result<Json<BrainstormPromptRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, ApiError> {
    let Json(request) = payload?;

    let prompt = state.prompts.brainstorm_prompt(
        &request.project_context,
        request.current_ideas.as_deref(),
        request.focus_area.as_deref(),
    );
    Ok(Json(PromptResponse { prompt }))
}

/// POST /prompts/generate
///
/// Renders a registered template. Unknown templates and missing context
/// variables are caller errors (400).
pub async fn generate_prompt_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, ApiError> {
    let Json(request) = payload?;
    info!("Rendering template '{}'", request.template_name);

    let prompt = state
        .prompts
        .render(&request.template_name, &request.render_context())?;
    Ok(Json(PromptResponse { prompt }))
}

/// GET /prompts/templates
pub async fn list_templates_handler(State(state): State<AppState>) -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: state.prompts.list_templates(),
    })
}
