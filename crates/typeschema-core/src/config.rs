//! Generator configuration types

use crate::category::TypeCategory;
use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Default URI template for bean definition references
pub const DEFAULT_BEAN_DEF_URI: &str = "#/definitions/{0}";

/// Default nesting cap
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// How bean definition ids are derived from a type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeanDefMapperKind {
    /// Id is the type's simple name
    #[default]
    Simple,
    /// Id is the type's fully-qualified name
    Full,
}

/// Schema generator configuration
///
/// Every field is optional in serialized form. Category sets accept either a
/// list (`["bean", "map"]`) or a single comma-separated string (`"bean,map"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Emit `$ref`s to shared bean definitions instead of inlining beans
    pub use_bean_defs: bool,

    /// Allow examples below a node that already carries one
    pub allow_nested_examples: bool,

    /// Allow descriptions below a node that already carries one
    pub allow_nested_descriptions: bool,

    /// Categories that receive `x-example`
    #[serde(deserialize_with = "category_set")]
    pub add_examples_to: BTreeSet<TypeCategory>,

    /// Categories that receive `description`
    #[serde(deserialize_with = "category_set")]
    pub add_descriptions_to: BTreeSet<TypeCategory>,

    /// Glob patterns of types to leave out (`*` matches any run of characters)
    ///
    /// An entry may itself hold several comma-separated patterns.
    pub ignore_types: Vec<String>,

    pub bean_def_mapper: BeanDefMapperKind,

    /// URI template for `$ref`s; `{0}` is replaced with the definition id
    pub bean_def_uri: String,

    /// Render enum constants by declared name instead of display string
    pub use_enum_names: bool,

    /// Omit recursive bean positions instead of failing
    pub ignore_recursions: bool,

    pub max_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            use_bean_defs: false,
            allow_nested_examples: false,
            allow_nested_descriptions: false,
            add_examples_to: BTreeSet::new(),
            add_descriptions_to: BTreeSet::new(),
            ignore_types: Vec::new(),
            bean_def_mapper: BeanDefMapperKind::default(),
            bean_def_uri: DEFAULT_BEAN_DEF_URI.to_string(),
            use_enum_names: false,
            ignore_recursions: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes; empty input yields the defaults
    pub fn from_json(bytes: &[u8]) -> SchemaResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes).map_err(|e| SchemaError::InvalidConfig(e.to_string()))
    }

    /// Create configuration from TOML text
    pub fn from_toml(text: &str) -> SchemaResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|e| {
            SchemaError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("toml") => {
                let text = String::from_utf8(content).map_err(|e| {
                    SchemaError::InvalidConfig(format!("{} is not UTF-8: {e}", path.display()))
                })?;
                Self::from_toml(&text)
            }
            _ => Err(SchemaError::InvalidConfig(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }

    /// Individual ignore patterns, with comma-separated entries split out
    pub fn ignore_patterns(&self) -> impl Iterator<Item = &str> {
        self.ignore_types
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

fn category_set<'de, D>(deserializer: D) -> Result<BTreeSet<TypeCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        List(BTreeSet<TypeCategory>),
        Joined(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::List(set) => Ok(set),
        Repr::Joined(text) => TypeCategory::parse_list(&text).map_err(serde::de::Error::custom),
    }
}
