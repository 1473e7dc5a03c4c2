// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    #[error("Missing context variable '{variable}' for template '{template}'")]
    MissingVariable { template: String, variable: String },

    /// Template body failed to parse
    #[error("Invalid template '{template}' at byte {position}: {reason}")]
    InvalidTemplate {
        template: String,
        position: usize,
        reason: String,
    },

    #[error("Template '{0}' is already registered")]
    DuplicateTemplate(String),
}
