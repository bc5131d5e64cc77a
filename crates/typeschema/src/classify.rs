//! Type classification: category plus logical `(type, format)` pair

use typeschema_core::{TypeCategory, TypeDescriptor};

/// Outcome of classifying one type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: TypeCategory,
    /// Value of the schema `type` key
    pub type_name: &'static str,
    /// Value of the schema `format` key, if the type has a recognized one
    pub format: Option<&'static str>,
}

impl Classification {
    const fn new(category: TypeCategory, type_name: &'static str) -> Self {
        Self {
            category,
            type_name,
            format: None,
        }
    }

    const fn with_format(mut self, format: &'static str) -> Self {
        self.format = Some(format);
        self
    }
}

/// Classify a type
///
/// The checks run in a fixed priority order; a type matching several
/// predicates takes the first category that applies.
pub fn classify(ty: &TypeDescriptor) -> Classification {
    if ty.is_number() {
        return classify_number(ty);
    }
    if ty.is_boolean() {
        return Classification::new(TypeCategory::Boolean, "boolean");
    }
    if ty.is_map() {
        return Classification::new(TypeCategory::Map, "object");
    }
    if ty.is_bean() {
        return Classification::new(TypeCategory::Bean, "object");
    }
    if ty.is_collection() {
        return Classification::new(TypeCategory::Collection, "array");
    }
    if ty.is_array() {
        return Classification::new(TypeCategory::Array, "array");
    }
    if ty.is_enum() {
        return Classification::new(TypeCategory::Enum, "string");
    }
    if ty.is_char_sequence() {
        return Classification::new(TypeCategory::String, "string");
    }
    if ty.is_uri() {
        return Classification::new(TypeCategory::String, "string").with_format("uri");
    }
    Classification::new(TypeCategory::String, "string")
}

fn classify_number(ty: &TypeDescriptor) -> Classification {
    let type_name = if ty.is_decimal() { "number" } else { "integer" };
    let base = Classification::new(TypeCategory::Number, type_name);

    if ty.is_short() {
        base.with_format("int16")
    } else if ty.is_integer() {
        base.with_format("int32")
    } else if ty.is_long() {
        base.with_format("int64")
    } else if ty.is_float() {
        base.with_format("float")
    } else if ty.is_double() {
        base.with_format("double")
    } else {
        base
    }
}

#[cfg(test)]
#[path = "classify/classify_tests.rs"]
mod classify_tests;
