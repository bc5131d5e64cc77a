//! Name-based exclusion of types from schema generation

use regex::Regex;
use typeschema_core::{SchemaError, SchemaResult, TypeDescriptor};

/// Compiled ignore patterns
///
/// Patterns are glob-like: `*` matches any run of characters and `.` is
/// literal. Other characters pass through to the regex engine unchanged,
/// so a malformed pattern such as `Foo[` is rejected at build time.
#[derive(Debug, Clone, Default)]
pub struct IgnorePatternSet {
    patterns: Vec<(String, Regex)>,
}

impl IgnorePatternSet {
    /// Compile a list of patterns
    pub fn compile<I, S>(patterns: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let source = p.as_ref().trim().to_string();
                compile_pattern(&source).map(|re| (source, re))
            })
            .collect::<SchemaResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Whether the type's simple or fully-qualified name matches any pattern
    pub fn is_ignored(&self, ty: &TypeDescriptor) -> bool {
        self.matches(&ty.simple_name) || self.matches(&ty.name)
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|(_, re)| re.is_match(name))
    }

    /// Pattern sources, as configured
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(s, _)| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile_pattern(source: &str) -> SchemaResult<Regex> {
    let body = source.replace('.', "\\.").replace('*', ".*");
    Regex::new(&format!("^(?:{body})$")).map_err(|e| SchemaError::InvalidIgnorePattern {
        pattern: source.to_string(),
        reason: e.to_string(),
    })
}
