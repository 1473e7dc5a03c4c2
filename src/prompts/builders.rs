// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Free-form prompt builders
//!
//! Fixed prose with optional sections. A section is emitted whenever its
//! input is a non-empty string, whitespace included; a missing or empty
//! input leaves it out, never an error.

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn section(heading: &str, value: &str) -> String {
    format!("\n{}:\n{}\n", heading, value)
}

fn fenced_section(heading: &str, value: &str) -> String {
    format!("\n{}:\n```\n{}\n```\n", heading, value)
}

/// General assistance prompt with optional development context and question
pub fn general_prompt(
    project_context: &str,
    development_context: Option<&str>,
    question: Option<&str>,
) -> String {
    let mut prompt = format!(
        "\nYou are an AI assistant helping with a software development project. \
         Here's the context:\n\nPROJECT CONTEXT:\n{}\n",
        project_context
    );

    if let Some(development) = present(development_context) {
        prompt.push_str(&section("DEVELOPMENT CONTEXT", development));
    }
    if let Some(question) = present(question) {
        prompt.push_str(&section("QUESTION", question));
    }

    prompt.push_str(
        "\nBased on the above context, please provide a detailed and helpful response.\n",
    );

    prompt
}

/// Technical problem-solving prompt
pub fn technical_prompt(
    project_context: &str,
    code_snippets: Option<&str>,
    error_message: Option<&str>,
    specific_task: Option<&str>,
) -> String {
    let mut prompt = format!(
        "\nYou are an expert software developer helping with a technical problem. \
         Here's the context:\n\nPROJECT CONTEXT:\n{}\n",
        project_context
    );

    if let Some(code) = present(code_snippets) {
        prompt.push_str(&fenced_section("RELEVANT CODE", code));
    }
    if let Some(error) = present(error_message) {
        prompt.push_str(&fenced_section("ERROR MESSAGE", error));
    }
    if let Some(task) = present(specific_task) {
        prompt.push_str(&section("TASK", task));
    }

    prompt.push_str(
        "\nPlease provide a clear, technical solution to the problem. \
         Include code examples where appropriate.\n",
    );

    prompt
}

/// Creative brainstorming prompt
pub fn brainstorm_prompt(
    project_context: &str,
    current_ideas: Option<&str>,
    focus_area: Option<&str>,
) -> String {
    let mut prompt = format!(
        "\nYou are a creative consultant helping brainstorm ideas for a software project. \
         Here's the context:\n\nPROJECT CONTEXT:\n{}\n",
        project_context
    );

    if let Some(ideas) = present(current_ideas) {
        prompt.push_str(&section("IDEAS ALREADY CONSIDERED", ideas));
    }
    if let Some(focus) = present(focus_area) {
        prompt.push_str(&section("FOCUS AREA", focus));
    }

    prompt.push_str(
        "\nPlease generate innovative, practical ideas for this project. \
         For each idea, provide:\n\
         1. A concise name/title\n\
         2. A brief description of the concept\n\
         3. Key benefits or advantages\n\
         4. Potential implementation challenges\n",
    );

    prompt
}
