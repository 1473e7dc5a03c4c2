// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Error body shape and malformed input handling

use super::support::{send_raw, test_app};
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, body) = send_raw(test_app(), Method::POST, "/embeddings", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_request");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_wrong_field_type_is_bad_request() {
    let (status, body) =
        send_raw(test_app(), Method::POST, "/embeddings", r#"{"texts": "one"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_error_body_has_only_detail_and_type() {
    let (_, body) = send_raw(
        test_app(),
        Method::POST,
        "/prompts/generate",
        r#"{"template_name": "nope"}"#,
    )
    .await;

    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 2);
    assert!(body.get("detail").is_some());
    assert!(body.get("error_type").is_some());
}
