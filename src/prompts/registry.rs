// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::prompts::{PromptError, Template};
use std::collections::HashMap;

const PROJECT_SUMMARY: &str = "# Project Summary for {project_name}\n\n\
## Description\n{project_description}\n\n\
## Status\nCurrent status: {project_status}\n\n\
## Tags\n{project_tags}\n\n\
## Documentation\n{project_documentation}\n\n\
## Related Developments\n{related_developments}";

const DEVELOPMENT_APPLICATION: &str = "# How to Apply Development to Project\n\n\
## Development\n{development_content}\n\n\
## Project\n{project_name}: {project_description}\n\n\
## Suggested Application\nBased on the development and project details, \
here are specific ways to apply this development to the project:\n\n\
1. Consider how {development_content} could enhance {project_name}\n\
2. Look for integration points between the development and project\n\
3. Identify potential challenges and solutions";

const PROJECT_IMPROVEMENT: &str = "# Project Improvement Suggestions\n\n\
## Project\n{project_name}: {project_description}\n\n\
## Current Status\n{project_status}\n\n\
## Improvement Areas\nBased on the project details, \
here are potential areas for improvement:\n\n\
1. Consider enhancing {project_name} by...\n\
2. Look for opportunities to improve...\n\
3. Address potential challenges such as...";

/// Built-in templates in registration order
pub const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("project_summary", PROJECT_SUMMARY),
    ("development_application", DEVELOPMENT_APPLICATION),
    ("project_improvement", PROJECT_IMPROVEMENT),
];

/// Immutable set of named templates
///
/// Lookup is by name; listing follows registration order.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
    index: HashMap<String, usize>,
}

impl TemplateRegistry {
    /// Parses and registers `(name, body)` pairs in order
    ///
    /// # Errors
    /// - `InvalidTemplate` if a body fails to parse
    /// - `DuplicateTemplate` if a name appears twice
    pub fn new<N, B, I>(entries: I) -> Result<Self, PromptError>
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: Into<String>,
    {
        let mut templates = Vec::new();
        let mut index = HashMap::new();

        for (name, body) in entries {
            let template = Template::parse(name, body)?;
            if index.contains_key(template.name()) {
                return Err(PromptError::DuplicateTemplate(template.name().to_string()));
            }
            index.insert(template.name().to_string(), templates.len());
            templates.push(template);
        }

        Ok(Self { templates, index })
    }

    /// Registry holding [`DEFAULT_TEMPLATES`]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_TEMPLATES.iter().copied())
            .unwrap_or_else(|e| unreachable!("built-in templates are valid: {}", e))
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.index.get(name).map(|&i| &self.templates[i])
    }

    pub fn names(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
