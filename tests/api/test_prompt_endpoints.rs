// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Prompt endpoint tests

use super::support::{get_json, post_json, test_app};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_list_templates() {
    let (status, body) = get_json(test_app(), "/prompts/templates").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["templates"],
        json!([
            "project_summary",
            "development_application",
            "project_improvement"
        ])
    );
}

/// Test 1: Named template renders with every placeholder filled
#[tokio::test]
async fn test_generate_project_improvement() {
    let (status, body) = post_json(
        test_app(),
        "/prompts/generate",
        json!({
            "template_name": "project_improvement",
            "context": {
                "project_name": "Idea Hub",
                "project_description": "A place for ideas",
                "project_status": "active",
                "unused": "ignored"
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.starts_with("# Project Improvement Suggestions"));
    assert!(prompt.contains("Idea Hub: A place for ideas"));
    assert!(prompt.contains("## Current Status\nactive"));
    assert!(!prompt.contains('{'), "no placeholders should remain");
}

/// Test 2: Non-string context values are inserted as JSON text
#[tokio::test]
async fn test_generate_stringifies_json_values() {
    let (status, body) = post_json(
        test_app(),
        "/prompts/generate",
        json!({
            "template_name": "project_summary",
            "context": {
                "project_name": "Idea Hub",
                "project_description": "desc",
                "project_status": "draft",
                "project_tags": ["ai", "rust"],
                "project_documentation": null,
                "related_developments": 3
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("## Tags\n[\"ai\",\"rust\"]"));
    assert!(prompt.contains("## Documentation\nnull"));
    assert!(prompt.ends_with("## Related Developments\n3"));
}

/// Test 3: Unknown template is a caller error
#[tokio::test]
async fn test_generate_unknown_template() {
    let (status, body) = post_json(
        test_app(),
        "/prompts/generate",
        json!({"template_name": "unknown_template", "context": {}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "template_not_found");
    assert!(body["detail"].as_str().unwrap().contains("unknown_template"));
}

/// Test 4: Missing variable names the first missing placeholder
#[tokio::test]
async fn test_generate_missing_variable() {
    let (status, body) = post_json(
        test_app(),
        "/prompts/generate",
        json!({
            "template_name": "project_summary",
            "context": {"project_name": "X"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "missing_variable");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("'project_description'"));
}

#[tokio::test]
async fn test_general_prompt_sections() {
    let (status, body) = post_json(
        test_app(),
        "/prompts/general",
        json!({"project_context": "Idea Hub", "question": "Where do I start?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("PROJECT CONTEXT:\nIdea Hub"));
    assert!(prompt.contains("QUESTION:\nWhere do I start?"));
    assert!(!prompt.contains("DEVELOPMENT CONTEXT"));
}

#[tokio::test]
async fn test_technical_prompt_sections() {
    let (status, body) = post_json(
        test_app(),
        "/prompts/technical",
        json!({
            "project_context": "Backend",
            "error_message": "connection refused",
            "code_snippets": ""
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("ERROR MESSAGE:\n```\nconnection refused\n```"));
    assert!(!prompt.contains("RELEVANT CODE"));
}

#[tokio::test]
async fn test_brainstorm_prompt_sections() {
    let (status, body) = post_json(
        test_app(),
        "/prompts/brainstorm",
        json!({"project_context": "Idea Hub", "focus_area": "onboarding"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("FOCUS AREA:\nonboarding"));
    assert!(!prompt.contains("IDEAS ALREADY CONSIDERED"));
}

#[tokio::test]
async fn test_empty_project_context_accepted() {
    let (status, body) = post_json(
        test_app(),
        "/prompts/general",
        json!({"project_context": ""}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["prompt"]
        .as_str()
        .unwrap()
        .contains("PROJECT CONTEXT:\n\n"));
}

#[tokio::test]
async fn test_whitespace_question_keeps_its_section() {
    let (status, body) = post_json(
        test_app(),
        "/prompts/general",
        json!({"project_context": "P", "question": "  "}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["prompt"]
        .as_str()
        .unwrap()
        .contains("\nQUESTION:\n  \n"));
}
