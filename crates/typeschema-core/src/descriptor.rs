//! Type descriptors: the read-only type model consumed by the schema generator
//!
//! A [`TypeDescriptor`] is a self-describing record for one type: its names,
//! its [`TypeKind`] (which carries element/key/value types, bean properties or
//! enum constants), optional schema overrides, an optional example value and an
//! optional [`Swap`] that replaces its serialized representation.
//!
//! Nested types are held through [`TypeRef`], which resolves lazily. This is
//! what lets a bean mention itself (directly or through a collection) without
//! building an infinite value.

use crate::error::SchemaResult;
use crate::node::SchemaOverride;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// Handle to a nested type descriptor
#[derive(Clone)]
pub enum TypeRef {
    /// Produced on demand by a function (used by `Describe` impls)
    Static(fn() -> TypeDescriptor),
    /// Already built and shared
    Shared(Arc<TypeDescriptor>),
    /// Produced on demand by a closure (used by dynamically loaded models)
    Lazy(Arc<dyn Fn() -> TypeDescriptor + Send + Sync>),
}

impl TypeRef {
    pub fn shared(descriptor: TypeDescriptor) -> Self {
        TypeRef::Shared(Arc::new(descriptor))
    }

    pub fn lazy(f: impl Fn() -> TypeDescriptor + Send + Sync + 'static) -> Self {
        TypeRef::Lazy(Arc::new(f))
    }

    /// Resolve to a descriptor
    pub fn resolve(&self) -> Cow<'_, TypeDescriptor> {
        match self {
            TypeRef::Static(f) => Cow::Owned(f()),
            TypeRef::Shared(d) => Cow::Borrowed(d.as_ref()),
            TypeRef::Lazy(f) => Cow::Owned(f()),
        }
    }
}

impl From<TypeDescriptor> for TypeRef {
    fn from(descriptor: TypeDescriptor) -> Self {
        TypeRef::shared(descriptor)
    }
}

impl std::fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Static(_) => write!(f, "TypeRef::Static"),
            TypeRef::Shared(d) => write!(f, "TypeRef::Shared({})", d.name),
            TypeRef::Lazy(_) => write!(f, "TypeRef::Lazy"),
        }
    }
}

/// Numeric widths the classifier knows how to format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// 8-bit integers
    Byte,
    /// 16-bit integers
    Short,
    /// 32-bit integers
    Integer,
    /// 64-bit and pointer-sized integers
    Long,
    /// Integers wider than 64 bits
    BigInteger,
    Float,
    Double,
    /// Arbitrary-precision decimals
    Decimal,
}

impl NumberKind {
    /// Whether values of this kind carry a fractional part
    pub fn is_fractional(&self) -> bool {
        matches!(self, NumberKind::Float | NumberKind::Double | NumberKind::Decimal)
    }
}

/// One constant of an enumerated type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    /// Declared name
    pub name: String,
    /// String form used by serialization
    pub display: String,
}

impl EnumConstant {
    /// A constant whose display string equals its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display: name.clone(),
            name,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }
}

/// A declared bean property
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: TypeRef,
    /// Restricts which nested properties of `ty` are rendered
    pub filter: Option<Vec<String>>,
    /// Property-level schema override
    pub schema: Option<SchemaOverride>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            filter: None,
            schema: None,
        }
    }

    pub fn with_filter<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_schema(mut self, schema: SchemaOverride) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// A registered substitution of a type's serialized representation
#[derive(Debug, Clone)]
pub struct Swap {
    /// The type values are serialized as
    pub target: TypeRef,
    /// Schema override attached to the swap itself; wins over the original type's
    pub schema: Option<SchemaOverride>,
}

impl Swap {
    pub fn new(target: impl Into<TypeRef>) -> Self {
        Self {
            target: target.into(),
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: SchemaOverride) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Example value attached to a type
#[derive(Debug, Clone, PartialEq)]
pub enum Example {
    /// A structured value
    Value(Value),
    /// JSON source text, parsed at render time
    Json(String),
}

impl Example {
    /// Capture any serializable value as an example
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> SchemaResult<Self> {
        Ok(Example::Value(serde_json::to_value(value)?))
    }

    pub fn json(source: impl Into<String>) -> Self {
        Example::Json(source.into())
    }
}

/// Structural shape of a type
#[derive(Debug, Clone)]
pub enum TypeKind {
    Number(NumberKind),
    Boolean,
    Map { key: TypeRef, value: TypeRef },
    Bean { properties: Vec<PropertyDescriptor> },
    Collection { element: TypeRef, unique: bool },
    Array { element: TypeRef },
    Enum { constants: Vec<EnumConstant> },
    Char,
    String,
    Uri,
    Other,
}

/// Self-describing record for one type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Fully-qualified display name (also used as the description)
    pub name: String,
    pub simple_name: String,
    pub kind: TypeKind,
    /// Class-level schema override
    pub schema: Option<SchemaOverride>,
    pub example: Option<Example>,
    pub swap: Option<Box<Swap>>,
}

impl TypeDescriptor {
    /// Create a descriptor; the simple name is derived from `name`
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        let name = name.into();
        Self {
            simple_name: simple_name_of(&name),
            name,
            kind,
            schema: None,
            example: None,
            swap: None,
        }
    }

    pub fn number(name: impl Into<String>, kind: NumberKind) -> Self {
        Self::new(name, TypeKind::Number(kind))
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Boolean)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::String)
    }

    pub fn uri(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Uri)
    }

    pub fn bean(name: impl Into<String>, properties: Vec<PropertyDescriptor>) -> Self {
        Self::new(name, TypeKind::Bean { properties })
    }

    pub fn map(name: impl Into<String>, key: impl Into<TypeRef>, value: impl Into<TypeRef>) -> Self {
        Self::new(
            name,
            TypeKind::Map {
                key: key.into(),
                value: value.into(),
            },
        )
    }

    pub fn collection(name: impl Into<String>, element: impl Into<TypeRef>, unique: bool) -> Self {
        Self::new(
            name,
            TypeKind::Collection {
                element: element.into(),
                unique,
            },
        )
    }

    pub fn array(name: impl Into<String>, element: impl Into<TypeRef>) -> Self {
        Self::new(
            name,
            TypeKind::Array {
                element: element.into(),
            },
        )
    }

    pub fn enumeration(name: impl Into<String>, constants: Vec<EnumConstant>) -> Self {
        Self::new(name, TypeKind::Enum { constants })
    }

    pub fn other(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Other)
    }

    pub fn with_simple_name(mut self, simple_name: impl Into<String>) -> Self {
        self.simple_name = simple_name.into();
        self
    }

    /// Suffix both names with the type arguments of a generic instantiation
    ///
    /// `Page` with `[i32, app::User]` becomes `Page<i32, app::User>`, simple
    /// name `Page<i32, User>`, so each instantiation is a distinct type.
    pub fn with_type_arguments(mut self, arguments: &[TypeDescriptor]) -> Self {
        if arguments.is_empty() {
            return self;
        }
        let names: Vec<&str> = arguments.iter().map(|a| a.name.as_str()).collect();
        let simple_names: Vec<&str> = arguments.iter().map(|a| a.simple_name.as_str()).collect();
        self.name = format!("{}<{}>", self.name, names.join(", "));
        self.simple_name = format!("{}<{}>", self.simple_name, simple_names.join(", "));
        self
    }

    pub fn with_schema(mut self, schema: SchemaOverride) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_example(mut self, example: Example) -> Self {
        self.example = Some(example);
        self
    }

    pub fn with_swap(mut self, swap: Swap) -> Self {
        self.swap = Some(Box::new(swap));
        self
    }

    pub fn is_number(&self) -> bool {
        matches!(self.kind, TypeKind::Number(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.kind, TypeKind::Boolean)
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, TypeKind::Map { .. })
    }

    pub fn is_bean(&self) -> bool {
        matches!(self.kind, TypeKind::Bean { .. })
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.kind, TypeKind::Collection { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum { .. })
    }

    pub fn is_char_sequence(&self) -> bool {
        matches!(self.kind, TypeKind::String | TypeKind::Char)
    }

    pub fn is_uri(&self) -> bool {
        matches!(self.kind, TypeKind::Uri)
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self.kind, TypeKind::Number(k) if k.is_fractional())
    }

    pub fn is_float(&self) -> bool {
        matches!(self.kind, TypeKind::Number(NumberKind::Float))
    }

    pub fn is_double(&self) -> bool {
        matches!(self.kind, TypeKind::Number(NumberKind::Double))
    }

    pub fn is_short(&self) -> bool {
        matches!(self.kind, TypeKind::Number(NumberKind::Short))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.kind, TypeKind::Number(NumberKind::Integer))
    }

    pub fn is_long(&self) -> bool {
        matches!(self.kind, TypeKind::Number(NumberKind::Long))
    }

    /// Set-like collections disallow duplicates
    pub fn is_set(&self) -> bool {
        matches!(self.kind, TypeKind::Collection { unique: true, .. })
    }

    /// Declared bean properties, empty for non-beans
    pub fn properties(&self) -> &[PropertyDescriptor] {
        match &self.kind {
            TypeKind::Bean { properties } => properties,
            _ => &[],
        }
    }

    /// Element type of a collection or array
    pub fn element_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            TypeKind::Collection { element, .. } | TypeKind::Array { element } => Some(element),
            _ => None,
        }
    }

    pub fn key_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            TypeKind::Map { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn value_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            TypeKind::Map { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn enum_constants(&self) -> &[EnumConstant] {
        match &self.kind {
            TypeKind::Enum { constants } => constants,
            _ => &[],
        }
    }
}

/// `app::model::Person` -> `Person`, `Vec<app::Person>` -> `Vec`, `a.b.C` -> `C`
fn simple_name_of(name: &str) -> String {
    let base = name.split('<').next().unwrap_or(name).trim_end_matches("[]");
    let base = base.rsplit("::").next().unwrap_or(base);
    base.rsplit('.').next().unwrap_or(base).to_string()
}
