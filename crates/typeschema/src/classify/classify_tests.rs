#![allow(non_snake_case)]

use super::*;
use typeschema_core::{EnumConstant, PropertyDescriptor, TypeKind, TypeRef};

#[test]
fn classify___bean___is_object() {
    let ty = TypeDescriptor::bean(
        "app::User",
        vec![PropertyDescriptor::new("id", TypeRef::of::<i32>())],
    );

    let result = classify(&ty);

    assert_eq!(result.category, TypeCategory::Bean);
    assert_eq!(result.type_name, "object");
    assert_eq!(result.format, None);
}

#[test]
fn classify___enum___is_string_with_enum_category() {
    let ty = TypeDescriptor::enumeration("app::Color", vec![EnumConstant::new("Red")]);

    let result = classify(&ty);

    assert_eq!(result.category, TypeCategory::Enum);
    assert_eq!(result.type_name, "string");
}

#[test]
fn classify___uri___has_uri_format() {
    let result = classify(&TypeDescriptor::uri("url::Url"));

    assert_eq!(result.category, TypeCategory::String);
    assert_eq!(result.format, Some("uri"));
}

#[test]
fn classify___other___falls_back_to_string() {
    let result = classify(&TypeDescriptor::new("std::time::Instant", TypeKind::Other));

    assert_eq!(result.category, TypeCategory::String);
    assert_eq!(result.type_name, "string");
    assert_eq!(result.format, None);
}

#[test]
fn classify___set___is_collection() {
    let ty = TypeDescriptor::collection("HashSet<i32>", TypeRef::of::<i32>(), true);

    assert_eq!(classify(&ty).category, TypeCategory::Collection);
}
