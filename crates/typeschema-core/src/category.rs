//! Type categories used for classification and example/description gating

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Coarse category of a type, as decided by the classifier
///
/// `Any` never comes out of classification; it only appears in
/// configuration sets, where it matches every other category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TypeCategory {
    Number,
    Boolean,
    Map,
    Bean,
    Collection,
    Array,
    Enum,
    String,
    Any,
}

impl TypeCategory {
    /// All categories, in classification priority order
    pub const ALL: [TypeCategory; 9] = [
        TypeCategory::Number,
        TypeCategory::Boolean,
        TypeCategory::Map,
        TypeCategory::Bean,
        TypeCategory::Collection,
        TypeCategory::Array,
        TypeCategory::Enum,
        TypeCategory::String,
        TypeCategory::Any,
    ];

    /// Check whether a configured category set selects this category
    pub fn selected_by(&self, set: &BTreeSet<TypeCategory>) -> bool {
        set.contains(self) || set.contains(&TypeCategory::Any)
    }

    /// Parse a comma-separated list such as `"bean, map"`
    ///
    /// Empty segments are skipped.
    pub fn parse_list(value: &str) -> Result<BTreeSet<TypeCategory>, String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(TypeCategory::from_str)
            .collect()
    }

    fn as_str(&self) -> &'static str {
        match self {
            TypeCategory::Number => "number",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Map => "map",
            TypeCategory::Bean => "bean",
            TypeCategory::Collection => "collection",
            TypeCategory::Array => "array",
            TypeCategory::Enum => "enum",
            TypeCategory::String => "string",
            TypeCategory::Any => "any",
        }
    }
}

impl FromStr for TypeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown type category: {s}"))
    }
}

impl TryFrom<String> for TypeCategory {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}
