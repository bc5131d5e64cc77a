//! typeschema-core - Type model, schema nodes, configuration and errors
//!
//! This crate provides the foundational types shared by the generator, the
//! derive macro and the CLI:
//! - [`TypeDescriptor`] and [`TypeRef`] describing the types to render
//! - [`Describe`] for types that can describe themselves
//! - [`SchemaNode`] and [`SchemaOverride`] for generated and explicit schemas
//! - [`GeneratorConfig`] for generator configuration
//! - [`SchemaError`] for error handling

mod category;
mod config;
mod describe;
mod descriptor;
mod error;
mod node;

pub use category::TypeCategory;
pub use config::{BeanDefMapperKind, DEFAULT_BEAN_DEF_URI, DEFAULT_MAX_DEPTH, GeneratorConfig};
pub use describe::Describe;
pub use descriptor::{
    EnumConstant, Example, NumberKind, PropertyDescriptor, Swap, TypeDescriptor, TypeKind, TypeRef,
};
pub use error::{SchemaError, SchemaResult};
pub use node::{SchemaNode, SchemaOverride, keys};

/// Log levels accepted by `--log-level` and logging configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Describe, EnumConstant, Example, GeneratorConfig, LogLevel, NumberKind, PropertyDescriptor,
        SchemaError, SchemaNode, SchemaOverride, SchemaResult, Swap, TypeCategory, TypeDescriptor,
        TypeKind, TypeRef,
    };
}
