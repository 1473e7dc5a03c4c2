// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Prompt API Module
//!
//! - POST /prompts/general, /prompts/technical, /prompts/brainstorm
//! - POST /prompts/generate renders a named template
//! - GET /prompts/templates lists template names

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{
    brainstorm_prompt_handler, general_prompt_handler, generate_prompt_handler,
    list_templates_handler, technical_prompt_handler,
};
pub use request::{
    BrainstormPromptRequest, GeneralPromptRequest, GenerateRequest, TechnicalPromptRequest,
};
pub use response::{PromptResponse, TemplatesResponse};
