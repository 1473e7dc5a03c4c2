// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptResponse {
    pub prompt: String,
}

/// Registered template names, in registration order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplatesResponse {
    pub templates: Vec<String>,
}
