//! # typeschema
//!
//! JSON-Schema generation from self-describing Rust types.
//!
//! A [`SchemaGenerator`] walks a [`TypeDescriptor`] graph and produces a
//! [`SchemaNode`] tree. It supports:
//! - shared bean definitions with `$ref` deduplication
//! - example and description injection gated by [`TypeCategory`]
//! - glob-based exclusion of types by name
//! - per-type and per-property schema overrides
//!
//! ## Quick Start
//!
//! ```
//! use typeschema::prelude::*;
//!
//! #[derive(Describe)]
//! struct User {
//!     id: i64,
//!     #[schema(rename = "displayName")]
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let generator = SchemaGenerator::builder().build()?;
//! let schema = generator.session().generate_for::<User>()?;
//!
//! let schema = serde_json::to_value(schema)?;
//! assert_eq!(schema["properties"]["displayName"]["type"], "string");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Structure
//!
//! The type model, configuration and errors live in [`typeschema_core`] and
//! are re-exported here, along with `#[derive(Describe)]` from
//! `typeschema_macros`.

extern crate self as typeschema;

mod classify;
mod generator;
mod ignore;
mod inject;
mod mapper;
mod registry;
mod render;
mod session;

pub use classify::{Classification, classify};
pub use generator::{GeneratorBuilder, SchemaGenerator};
pub use ignore::IgnorePatternSet;
pub use mapper::{BeanDefMapper, FullNameBeanDefMapper, SimpleBeanDefMapper};
pub use registry::DefinitionRegistry;
pub use render::{ExampleRenderer, JsonRenderer};
pub use session::GeneratorSession;

// Re-export the type model
pub use typeschema_core::{
    BeanDefMapperKind, Describe, EnumConstant, Example, GeneratorConfig, LogLevel, NumberKind,
    PropertyDescriptor, SchemaError, SchemaNode, SchemaOverride, SchemaResult, Swap, TypeCategory,
    TypeDescriptor, TypeKind, TypeRef, keys,
};

// Re-export the derive macro
pub use typeschema_macros::Describe;

// Re-export dependencies that generated code refers to
pub use serde_json;

/// Support functions for `#[derive(Describe)]` output. Not public API.
#[doc(hidden)]
pub mod __private {
    use crate::SchemaOverride;

    /// Literals are validated when the derive expands, so a parse failure
    /// here cannot happen for macro-generated calls.
    pub fn schema_override(json: &str) -> SchemaOverride {
        SchemaOverride::from_json(json).unwrap_or_default()
    }
}

/// Prelude module for convenient imports.
///
/// Use `use typeschema::prelude::*;` to import the generator, the type model
/// and the `Describe` trait and derive.
pub mod prelude {
    pub use crate::{
        Describe, Example, GeneratorConfig, PropertyDescriptor, SchemaError, SchemaGenerator,
        SchemaNode, SchemaOverride, SchemaResult, TypeCategory, TypeDescriptor, TypeRef,
    };
}
