// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Template rendering edge cases through a custom registry

use ideahub_ai_service::prompts::{PromptError, PromptService, TemplateRegistry};
use std::collections::HashMap;

fn context(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn service(entries: &[(&str, &str)]) -> PromptService {
    PromptService::new(TemplateRegistry::new(entries.iter().copied()).unwrap())
}

#[test]
fn test_values_are_not_re_expanded() {
    let service = service(&[("greet", "Hello {name}, you said {message}")]);

    let prompt = service
        .render(
            "greet",
            &context(&[("name", "{message}"), ("message", "{name}")]),
        )
        .unwrap();

    assert_eq!(prompt, "Hello {message}, you said {name}");
}

#[test]
fn test_escaped_braces_render_literally() {
    let service = service(&[("json", "{{\"key\": \"{value}\"}}")]);

    let prompt = service
        .render("json", &context(&[("value", "v")]))
        .unwrap();
    assert_eq!(prompt, "{\"key\": \"v\"}");
}

#[test]
fn test_repeated_placeholder_filled_everywhere() {
    let service = service(&[("twice", "{x} and {x}")]);
    assert_eq!(
        service.render("twice", &context(&[("x", "1")])).unwrap(),
        "1 and 1"
    );
}

/// First missing placeholder in template order is reported
#[test]
fn test_first_missing_variable_reported() {
    let service = service(&[("t", "{a} {b} {c}")]);

    let err = service
        .render("t", &context(&[("a", "1"), ("c", "3")]))
        .unwrap_err();
    assert_eq!(
        err,
        PromptError::MissingVariable {
            template: "t".to_string(),
            variable: "b".to_string(),
        }
    );
}

#[test]
fn test_template_without_placeholders() {
    let service = service(&[("static", "No variables here.")]);
    assert_eq!(
        service.render("static", &HashMap::new()).unwrap(),
        "No variables here."
    );
}

#[test]
fn test_registry_rejects_bad_syntax() {
    for body in ["{unclosed", "stray }", "{}", "{not valid}"] {
        let result = TemplateRegistry::new([("bad", body)]);
        assert!(
            matches!(result, Err(PromptError::InvalidTemplate { .. })),
            "body {:?} should be rejected",
            body
        );
    }
}
