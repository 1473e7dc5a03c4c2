// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralPromptRequest {
    pub project_context: String,
    #[serde(default)]
    pub development_context: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalPromptRequest {
    pub project_context: String,
    #[serde(default)]
    pub code_snippets: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub specific_task: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainstormPromptRequest {
    pub project_context: String,
    #[serde(default)]
    pub current_ideas: Option<String>,
    #[serde(default)]
    pub focus_area: Option<String>,
}

/// Request body for POST /prompts/generate
///
/// ```json
/// {
///   "template_name": "project_summary",
///   "context": {"project_name": "Idea Hub", "project_tags": ["ai", "rust"]}
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub template_name: String,
    #[serde(default)]
    pub context: HashMap<String, Value>,
}

impl GenerateRequest {
    /// Context as placeholder text: strings unquoted, other values as JSON
    pub fn render_context(&self) -> HashMap<String, String> {
        self.context
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }
}
