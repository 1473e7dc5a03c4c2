// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Named-placeholder templates
//!
//! Bodies use `{name}` placeholders; `{{` and `}}` produce literal braces.
//! Bodies are parsed once at registration, so rendering never re-scans
//! substituted values.

use crate::prompts::PromptError;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    body: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `body` into literal and placeholder segments
    ///
    /// # Errors
    /// `PromptError::InvalidTemplate` for an unmatched brace or a placeholder
    /// name that is empty or not an identifier.
    pub fn parse(name: impl Into<String>, body: impl Into<String>) -> Result<Self, PromptError> {
        let name = name.into();
        let body = body.into();
        let segments = parse_segments(&name, &body)?;

        Ok(Self {
            name,
            body,
            segments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Distinct placeholder names in order of first appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(p) = segment {
                if !names.contains(&p.as_str()) {
                    names.push(p);
                }
            }
        }
        names
    }

    /// Substitutes every placeholder from `context`
    ///
    /// Extra keys are ignored. Values are inserted verbatim.
    ///
    /// # Errors
    /// `PromptError::MissingVariable` naming the first placeholder (in
    /// template order) absent from `context`.
    pub fn render(&self, context: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut out = String::with_capacity(self.body.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(key) => {
                    let value = context.get(key).ok_or_else(|| PromptError::MissingVariable {
                        template: self.name.clone(),
                        variable: key.clone(),
                    })?;
                    out.push_str(value);
                }
            }
        }

        Ok(out)
    }
}

fn parse_segments(template: &str, body: &str) -> Result<Vec<Segment>, PromptError> {
    let invalid = |position: usize, reason: &str| PromptError::InvalidTemplate {
        template: template.to_string(),
        position,
        reason: reason.to_string(),
    };

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = body.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut key = String::new();
                let mut closed = false;
                for (_, k) in chars.by_ref() {
                    if k == '}' {
                        closed = true;
                        break;
                    }
                    key.push(k);
                }

                if !closed {
                    return Err(invalid(pos, "unclosed '{'"));
                }
                if !is_identifier(&key) {
                    return Err(invalid(pos, "placeholder must be a non-empty identifier"));
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(key));
            }
            '}' => return Err(invalid(pos, "unmatched '}'")),
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
