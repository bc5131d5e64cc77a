//! Integration tests for `#[derive(Describe)]`.
//!
//! Each test derives a small model and checks the schema the generator
//! produces for it.

#![allow(non_snake_case)]
#![allow(dead_code)]

use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use typeschema::prelude::*;
use typeschema::{SchemaError, TypeCategory};

#[derive(Describe)]
struct Address {
    street: String,
    city: String,
    zip: Option<String>,
}

#[derive(Describe)]
#[schema(name = "shop::Customer", schema = r#"{"description": "A paying customer"}"#)]
struct Customer {
    id: i64,
    #[schema(rename = "displayName")]
    name: String,
    #[schema(filter = "city")]
    billing: Address,
    shipping: Address,
    #[schema(skip)]
    password_hash: String,
    #[schema(schema = r#"{"minimum": 0}"#)]
    credit: f64,
    tags: HashSet<String>,
    status: Status,
}

#[derive(Describe)]
#[schema(example = r#""active""#)]
enum Status {
    #[schema(rename = "active")]
    Active,
    #[schema(rename = "on-hold")]
    OnHold,
    Closed,
}

#[derive(Describe)]
#[schema(swap = "String", example = r#""2024-01-01T00:00:00Z""#)]
struct Timestamp {
    seconds: i64,
    nanos: u32,
}

#[derive(Describe)]
struct Event {
    at: Timestamp,
    r#type: String,
}

#[derive(Describe)]
struct Page<T> {
    items: Vec<T>,
    total: u64,
}

#[derive(Describe)]
struct Category {
    label: String,
    children: Vec<Category>,
}

#[derive(Describe)]
struct Shelf {
    numbered: Page<i32>,
    labelled: Page<String>,
}

#[derive(Describe)]
struct Section {
    heading: String,
    #[schema(filter = "heading")]
    parent: Box<Section>,
}

#[derive(Describe)]
struct Inventory {
    stock: BTreeMap<String, u32>,
    flags: [bool; 3],
}

fn generator() -> SchemaGenerator {
    SchemaGenerator::builder().build().unwrap()
}

fn generate<T: Describe>(generator: &SchemaGenerator) -> serde_json::Value {
    generator
        .session()
        .generate_for::<T>()
        .unwrap()
        .unwrap()
        .into_value()
}

#[test]
fn derive___default_name___uses_module_path() {
    let descriptor = Address::descriptor();

    assert_eq!(descriptor.name, "derive_tests::Address");
    assert_eq!(descriptor.simple_name, "Address");
    assert!(descriptor.is_bean());
}

#[test]
fn derive___explicit_name___overrides_module_path() {
    let descriptor = Customer::descriptor();

    assert_eq!(descriptor.name, "shop::Customer");
    assert_eq!(descriptor.simple_name, "Customer");
}

#[test]
fn derive___struct___renders_declared_properties_in_order() {
    let schema = generate::<Customer>(&generator());

    let names: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
    assert_eq!(
        names,
        vec!["id", "displayName", "billing", "shipping", "credit", "tags", "status"]
    );
}

#[test]
fn derive___skip___omits_property() {
    let schema = generate::<Customer>(&generator());

    assert!(schema["properties"].get("password_hash").is_none());
}

#[test]
fn derive___filter___limits_nested_properties() {
    let schema = generate::<Customer>(&generator());

    assert_eq!(
        schema["properties"]["billing"]["properties"],
        json!({"city": {"type": "string"}})
    );
    assert_eq!(
        schema["properties"]["shipping"]["properties"]
            .as_object()
            .unwrap()
            .len(),
        3
    );
}

#[test]
fn derive___schema_overrides___merged_into_output() {
    let schema = generate::<Customer>(&generator());

    assert_eq!(schema["description"], "A paying customer");
    assert_eq!(
        schema["properties"]["credit"],
        json!({"type": "number", "format": "double", "minimum": 0})
    );
}

#[test]
fn derive___hash_set___unique_items() {
    let schema = generate::<Customer>(&generator());

    assert_eq!(
        schema["properties"]["tags"],
        json!({"type": "array", "items": {"type": "string"}, "uniqueItems": true})
    );
}

#[test]
fn derive___enum___display_strings_in_order() {
    let schema = generate::<Status>(&generator());

    assert_eq!(schema, json!({"type": "string", "enum": ["active", "on-hold", "Closed"]}));
}

#[test]
fn derive___enum_names___uses_variant_identifiers() {
    let generator = SchemaGenerator::builder().use_enum_names(true).build().unwrap();

    let schema = generate::<Status>(&generator);

    assert_eq!(schema["enum"], json!(["Active", "OnHold", "Closed"]));
}

#[test]
fn derive___enum_example___rendered_when_enabled() {
    let generator = SchemaGenerator::builder()
        .add_examples_to([TypeCategory::Enum])
        .build()
        .unwrap();

    let schema = generate::<Status>(&generator);

    assert_eq!(schema["x-example"], "active");
}

#[test]
fn derive___swap___classifies_as_target() {
    let generator = SchemaGenerator::builder()
        .add_examples_to([TypeCategory::String])
        .build()
        .unwrap();

    let schema = generate::<Event>(&generator);

    assert_eq!(
        schema["properties"]["at"],
        json!({"type": "string", "x-example": "2024-01-01T00:00:00Z"})
    );
}

#[test]
fn derive___raw_identifier___property_name_unprefixed() {
    let schema = generate::<Event>(&generator());

    assert_eq!(schema["properties"]["type"], json!({"type": "string"}));
}

#[test]
fn derive___generic_struct___element_type_follows_parameter() {
    let schema = generate::<Page<Address>>(&generator());

    assert_eq!(schema["properties"]["items"]["type"], "array");
    assert_eq!(schema["properties"]["items"]["items"]["type"], "object");
    assert_eq!(
        schema["properties"]["total"],
        json!({"type": "integer", "format": "int64"})
    );
}

#[test]
fn derive___generic_struct___names_carry_type_arguments() {
    let descriptor = Page::<Address>::descriptor();

    assert_eq!(descriptor.name, "derive_tests::Page<derive_tests::Address>");
    assert_eq!(descriptor.simple_name, "Page<Address>");
}

#[test]
fn derive___generic_instantiations___separate_definitions() {
    let generator = SchemaGenerator::builder().use_bean_defs(true).build().unwrap();
    let mut session = generator.session();

    let root = session.generate_for::<Shelf>().unwrap().unwrap();
    let document = session.into_document(root).into_value();

    let definitions = &document["definitions"];
    assert_eq!(
        definitions["Shelf"]["properties"]["numbered"],
        json!({"$ref": "#/definitions/Page<i32>"})
    );
    assert_eq!(
        definitions["Shelf"]["properties"]["labelled"],
        json!({"$ref": "#/definitions/Page<String>"})
    );
    assert_eq!(
        definitions["Page<i32>"]["properties"]["items"]["items"],
        json!({"type": "integer", "format": "int32"})
    );
    assert_eq!(
        definitions["Page<String>"]["properties"]["items"]["items"],
        json!({"type": "string"})
    );
}

#[test]
fn derive___nested_generic_instantiation___not_a_recursion() {
    let schema = generate::<Page<Page<u8>>>(&generator());

    assert_eq!(
        schema["properties"]["items"]["items"]["properties"]["items"]["items"],
        json!({"type": "integer"})
    );
}

#[test]
fn derive___filtered_self_reference___expanded_once() {
    let schema = generate::<Section>(&generator());

    assert_eq!(
        schema["properties"]["parent"],
        json!({"type": "object", "properties": {"heading": {"type": "string"}}})
    );
}

#[test]
fn derive___map_and_fixed_array___rendered() {
    let schema = generate::<Inventory>(&generator());

    assert_eq!(
        schema["properties"]["stock"],
        json!({"type": "object", "additionalProperties": {"type": "integer", "format": "int32"}})
    );
    assert_eq!(
        schema["properties"]["flags"],
        json!({"type": "array", "items": {"type": "boolean"}})
    );
}

#[test]
fn derive___self_reference___recursion_error_without_bean_defs() {
    let result = generator().session().generate_for::<Category>();

    assert!(matches!(result, Err(SchemaError::Recursion { .. })));
}

#[test]
fn derive___self_reference___ref_with_bean_defs() {
    let generator = SchemaGenerator::builder().use_bean_defs(true).build().unwrap();
    let mut session = generator.session();

    let root = session.generate_for::<Category>().unwrap().unwrap();
    let document = session.into_document(root).into_value();

    assert_eq!(document["$ref"], "#/definitions/Category");
    assert_eq!(
        document["definitions"]["Category"]["properties"]["children"]["items"],
        json!({"$ref": "#/definitions/Category"})
    );
}
