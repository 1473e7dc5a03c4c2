// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::prompts::{builders, PromptError, TemplateRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Template façade: named-template rendering plus the free-form builders
#[derive(Debug, Clone)]
pub struct PromptService {
    registry: Arc<TemplateRegistry>,
}

impl PromptService {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Renders `template_name` with `context`
    ///
    /// # Errors
    /// - `TemplateNotFound` for an unregistered name
    /// - `MissingVariable` when `context` lacks a referenced placeholder
    pub fn render(
        &self,
        template_name: &str,
        context: &HashMap<String, String>,
    ) -> Result<String, PromptError> {
        let template = self.registry.get(template_name).ok_or_else(|| {
            error!("Template '{}' not found", template_name);
            PromptError::TemplateNotFound(template_name.to_string())
        })?;

        let prompt = template.render(context).inspect_err(|e| {
            error!("{}", e);
        })?;

        debug!(
            "Rendered template '{}' ({} chars)",
            template_name,
            prompt.len()
        );
        Ok(prompt)
    }

    /// Registered template names in registration order
    pub fn list_templates(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn general_prompt(
        &self,
        project_context: &str,
        development_context: Option<&str>,
        question: Option<&str>,
    ) -> String {
        builders::general_prompt(project_context, development_context, question)
    }

    pub fn technical_prompt(
        &self,
        project_context: &str,
        code_snippets: Option<&str>,
        error_message: Option<&str>,
        specific_task: Option<&str>,
    ) -> String {
        builders::technical_prompt(project_context, code_snippets, error_message, specific_task)
    }

    pub fn brainstorm_prompt(
        &self,
        project_context: &str,
        current_ideas: Option<&str>,
        focus_area: Option<&str>,
    ) -> String {
        builders::brainstorm_prompt(project_context, current_ideas, focus_area)
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new(TemplateRegistry::with_defaults())
    }
}
