//! Bean definition id and URI strategies

use std::sync::Arc;
use typeschema_core::{BeanDefMapperKind, DEFAULT_BEAN_DEF_URI, TypeDescriptor};

/// Maps bean types to definition ids and ids to `$ref` URIs
pub trait BeanDefMapper: Send + Sync {
    /// Definition id for a bean type
    fn id(&self, ty: &TypeDescriptor) -> String;

    /// `$ref` URI for a definition id
    fn uri(&self, id: &str) -> String;
}

/// Id is the type's simple name
#[derive(Debug, Clone)]
pub struct SimpleBeanDefMapper {
    uri_template: String,
}

impl SimpleBeanDefMapper {
    pub fn new() -> Self {
        Self::with_uri_template(DEFAULT_BEAN_DEF_URI)
    }

    /// Use a custom URI template; `{0}` is replaced with the id
    pub fn with_uri_template(template: impl Into<String>) -> Self {
        Self {
            uri_template: template.into(),
        }
    }
}

impl Default for SimpleBeanDefMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanDefMapper for SimpleBeanDefMapper {
    fn id(&self, ty: &TypeDescriptor) -> String {
        ty.simple_name.clone()
    }

    fn uri(&self, id: &str) -> String {
        expand_template(&self.uri_template, id)
    }
}

/// Id is the type's fully-qualified name
#[derive(Debug, Clone)]
pub struct FullNameBeanDefMapper {
    uri_template: String,
}

impl FullNameBeanDefMapper {
    pub fn new() -> Self {
        Self::with_uri_template(DEFAULT_BEAN_DEF_URI)
    }

    pub fn with_uri_template(template: impl Into<String>) -> Self {
        Self {
            uri_template: template.into(),
        }
    }
}

impl Default for FullNameBeanDefMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanDefMapper for FullNameBeanDefMapper {
    fn id(&self, ty: &TypeDescriptor) -> String {
        ty.name.clone()
    }

    fn uri(&self, id: &str) -> String {
        expand_template(&self.uri_template, id)
    }
}

/// Build the mapper selected by configuration
pub(crate) fn from_kind(kind: BeanDefMapperKind, uri_template: &str) -> Arc<dyn BeanDefMapper> {
    match kind {
        BeanDefMapperKind::Simple => Arc::new(SimpleBeanDefMapper::with_uri_template(uri_template)),
        BeanDefMapperKind::Full => Arc::new(FullNameBeanDefMapper::with_uri_template(uri_template)),
    }
}

fn expand_template(template: &str, id: &str) -> String {
    template.replace("{0}", id)
}
