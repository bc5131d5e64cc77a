#![allow(non_snake_case)]

use super::*;
use serde_json::json;

#[test]
fn JsonRenderer___value___renders_unchanged() {
    let renderer = JsonRenderer::new();
    let example = Example::Value(json!({"id": 1, "tags": ["a"]}));

    let value = renderer.render(&example).unwrap();

    assert_eq!(value, json!({"id": 1, "tags": ["a"]}));
}

#[test]
fn JsonRenderer___json_text___parses() {
    let renderer = JsonRenderer::new();

    let value = renderer.render(&Example::json(r#"{"name": "Ada"}"#)).unwrap();

    assert_eq!(value, json!({"name": "Ada"}));
}

#[test]
fn JsonRenderer___json_scalar___parses() {
    let renderer = JsonRenderer::new();

    assert_eq!(renderer.render(&Example::json("42")).unwrap(), json!(42));
    assert_eq!(renderer.render(&Example::json("\"x\"")).unwrap(), json!("x"));
}

#[test]
fn JsonRenderer___malformed_json___returns_error() {
    let renderer = JsonRenderer::new();

    let err = renderer.render(&Example::json("{name:")).unwrap_err();

    assert!(!err.is_empty());
}

#[test]
fn JsonRenderer___key_order___preserved() {
    let renderer = JsonRenderer::new();

    let value = renderer.render(&Example::json(r#"{"z": 1, "a": 2}"#)).unwrap();

    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["z", "a"]);
}
