//! Model files: type graphs declared in TOML or JSON.
//!
//! ```toml
//! [[types]]
//! name = "app.Address"
//! kind = "bean"
//! properties = [
//!     { name = "street", type = "string" },
//!     { name = "city", type = "string" },
//! ]
//!
//! [[types]]
//! name = "app.Person"
//! kind = "bean"
//! properties = [
//!     { name = "home", type = "Address", filter = ["city"] },
//!     { name = "tags", type = "set<string>" },
//! ]
//!
//! [[types]]
//! name = "app.Color"
//! kind = "enum"
//! constants = ["RED", { name = "GREEN", display = "green" }]
//! ```
//!
//! Every type expression is resolved when the file is loaded, so unknown
//! or ambiguous names fail early. Descriptors are then built on demand;
//! references between model types are lazy, which lets a model describe
//! recursive graphs.

use crate::expr::TypeExpr;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use typeschema::{
    EnumConstant, Example, PropertyDescriptor, SchemaOverride, Swap, TypeDescriptor, TypeRef,
};

// ============================================================================
// File format
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefKind {
    Bean,
    Enum,
    Alias,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDef {
    pub name: String,
    pub kind: DefKind,

    #[serde(default)]
    pub properties: Vec<PropertyDef>,

    #[serde(default)]
    pub constants: Vec<ConstantDef>,

    /// Aliased type expression (aliases only)
    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub schema: Option<Value>,

    #[serde(default)]
    pub example: Option<Value>,

    #[serde(default)]
    pub swap: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDef {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub filter: Option<Vec<String>>,

    #[serde(default)]
    pub schema: Option<Value>,
}

/// An enum constant: a bare name, or a name with a display string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConstantDef {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        display: Option<String>,
    },
}

impl ConstantDef {
    fn to_constant(&self) -> EnumConstant {
        match self {
            Self::Name(name) => EnumConstant::new(name),
            Self::Full { name, display } => {
                let constant = EnumConstant::new(name);
                match display {
                    Some(display) => constant.with_display(display),
                    None => constant,
                }
            }
        }
    }
}

// ============================================================================
// Resolved model
// ============================================================================

/// A loaded model with every type expression resolved
#[derive(Debug, Clone)]
pub struct Model {
    types: Arc<Vec<ResolvedType>>,
    index: Arc<NameIndex>,
}

#[derive(Debug)]
struct ResolvedType {
    name: String,
    shape: Shape,
    schema: Option<SchemaOverride>,
    example: Option<Example>,
    swap: Option<TypeExpr<usize>>,
}

#[derive(Debug)]
enum Shape {
    Bean(Vec<ResolvedProperty>),
    Enum(Vec<EnumConstant>),
    Alias(TypeExpr<usize>),
}

#[derive(Debug)]
struct ResolvedProperty {
    name: String,
    ty: TypeExpr<usize>,
    filter: Option<Vec<String>>,
    schema: Option<SchemaOverride>,
}

impl Model {
    /// Load a model from a `.toml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model: {:?}", path))?;

        let model = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => bail!("Unsupported model file extension: {:?} (expected .toml or .json)", path),
        };
        model.with_context(|| format!("Invalid model: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ModelFile = toml::from_str(content).context("Failed to parse model")?;
        Self::resolve(file)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: ModelFile = serde_json::from_str(content).context("Failed to parse model")?;
        Self::resolve(file)
    }

    /// Validate a parsed model file and resolve its names
    pub fn resolve(file: ModelFile) -> Result<Self> {
        let index = NameIndex::build(&file.types)?;

        let types = file
            .types
            .iter()
            .map(|def| {
                resolve_type(def, &index).with_context(|| format!("In type '{}'", def.name))
            })
            .collect::<Result<Vec<_>>>()?;
        check_alias_cycles(&types)?;

        Ok(Self {
            types: Arc::new(types),
            index: Arc::new(index),
        })
    }

    /// Declared type names, in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }

    /// Descriptor for a model type, by full or unambiguous simple name
    pub fn descriptor(&self, name: &str) -> Result<TypeDescriptor> {
        let index = self.index.lookup(name)?;
        Ok(build(&self.types, index))
    }
}

fn resolve_type(def: &TypeDef, index: &NameIndex) -> Result<ResolvedType> {
    let shape = match def.kind {
        DefKind::Bean => {
            if !def.constants.is_empty() || def.target.is_some() {
                bail!("A bean declares only properties");
            }
            let properties = def
                .properties
                .iter()
                .map(|p| -> Result<ResolvedProperty> {
                    Ok(ResolvedProperty {
                        name: p.name.clone(),
                        ty: index.resolve_expr(&p.ty)?,
                        filter: p.filter.clone(),
                        schema: p.schema.clone().map(to_override).transpose()?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Shape::Bean(properties)
        }
        DefKind::Enum => {
            if !def.properties.is_empty() || def.target.is_some() {
                bail!("An enum declares only constants");
            }
            Shape::Enum(def.constants.iter().map(ConstantDef::to_constant).collect())
        }
        DefKind::Alias => {
            if !def.properties.is_empty() || !def.constants.is_empty() {
                bail!("An alias declares only a target");
            }
            let Some(target) = &def.target else {
                bail!("An alias requires a target type expression");
            };
            Shape::Alias(index.resolve_expr(target)?)
        }
    };

    Ok(ResolvedType {
        name: def.name.clone(),
        shape,
        schema: def.schema.clone().map(to_override).transpose()?,
        example: def.example.clone().map(Example::Value),
        swap: def
            .swap
            .as_deref()
            .map(|swap| index.resolve_expr(swap))
            .transpose()?,
    })
}

/// Reject aliases whose targets lead back to themselves without an
/// intervening collection or map
fn check_alias_cycles(types: &[ResolvedType]) -> Result<()> {
    for (start, ty) in types.iter().enumerate() {
        let mut seen = vec![start];
        let mut current = ty;
        while let Shape::Alias(TypeExpr::Named(next)) = &current.shape {
            if seen.contains(next) {
                bail!("Alias cycle through type '{}'", ty.name);
            }
            seen.push(*next);
            current = &types[*next];
        }
    }
    Ok(())
}

fn to_override(value: Value) -> Result<SchemaOverride> {
    SchemaOverride::from_value(value).context("Invalid schema override")
}

// ============================================================================
// Descriptor construction
// ============================================================================

fn build(types: &Arc<Vec<ResolvedType>>, index: usize) -> TypeDescriptor {
    let ty = &types[index];

    let descriptor = match &ty.shape {
        Shape::Bean(properties) => {
            let properties = properties
                .iter()
                .map(|p| {
                    let mut property = PropertyDescriptor::new(&p.name, type_ref(types, &p.ty));
                    if let Some(filter) = &p.filter {
                        property = property.with_filter(filter.iter().cloned());
                    }
                    if let Some(schema) = &p.schema {
                        property = property.with_schema(schema.clone());
                    }
                    property
                })
                .collect();
            TypeDescriptor::bean(&ty.name, properties)
        }
        Shape::Enum(constants) => TypeDescriptor::enumeration(&ty.name, constants.clone()),
        Shape::Alias(target) => {
            let target = type_ref(types, target).resolve().into_owned();
            TypeDescriptor::new(&ty.name, target.kind)
        }
    };

    let descriptor = match &ty.schema {
        Some(schema) => descriptor.with_schema(schema.clone()),
        None => descriptor,
    };
    let descriptor = match &ty.example {
        Some(example) => descriptor.with_example(example.clone()),
        None => descriptor,
    };
    match &ty.swap {
        Some(swap) => descriptor.with_swap(Swap::new(type_ref(types, swap))),
        None => descriptor,
    }
}

fn type_ref(types: &Arc<Vec<ResolvedType>>, expr: &TypeExpr<usize>) -> TypeRef {
    let name = |index: &usize| types[*index].name.clone();

    match expr {
        TypeExpr::Scalar(scalar) => TypeRef::from(scalar.descriptor()),
        TypeExpr::List(element) => TypeRef::from(TypeDescriptor::collection(
            expr.render(&name),
            type_ref(types, element),
            false,
        )),
        TypeExpr::Set(element) => TypeRef::from(TypeDescriptor::collection(
            expr.render(&name),
            type_ref(types, element),
            true,
        )),
        TypeExpr::Map(key, value) => TypeRef::from(TypeDescriptor::map(
            expr.render(&name),
            type_ref(types, key),
            type_ref(types, value),
        )),
        TypeExpr::Array(element) => TypeRef::from(TypeDescriptor::array(
            expr.render(&name),
            type_ref(types, element),
        )),
        TypeExpr::Named(index) => {
            let types = Arc::clone(types);
            let index = *index;
            TypeRef::lazy(move || build(&types, index))
        }
    }
}

// ============================================================================
// Name resolution
// ============================================================================

#[derive(Debug)]
struct NameIndex {
    full: HashMap<String, usize>,
    simple: HashMap<String, Vec<usize>>,
}

impl NameIndex {
    fn build(types: &[TypeDef]) -> Result<Self> {
        let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
        Self::from_names(&names)
    }

    fn from_names(names: &[&str]) -> Result<Self> {
        let mut full = HashMap::new();
        let mut simple: HashMap<String, Vec<usize>> = HashMap::new();

        for (index, name) in names.iter().enumerate() {
            if name.is_empty() {
                bail!("Type name cannot be empty");
            }
            if full.insert(name.to_string(), index).is_some() {
                bail!("Duplicate type name: {}", name);
            }
            simple
                .entry(simple_name(name).to_string())
                .or_default()
                .push(index);
        }

        Ok(Self { full, simple })
    }

    fn lookup(&self, name: &str) -> Result<usize> {
        if let Some(index) = self.full.get(name) {
            return Ok(*index);
        }
        match self.simple.get(name).map(Vec::as_slice) {
            Some([index]) => Ok(*index),
            Some(_) => bail!("Ambiguous type name '{}': use the full name", name),
            None => bail!("Unknown type '{}'", name),
        }
    }

    fn resolve_expr(&self, source: &str) -> Result<TypeExpr<usize>> {
        TypeExpr::parse(source)?.try_map_names(&mut |name: &String| self.lookup(name))
    }
}

/// Last segment of a `.` or `::` separated name
fn simple_name(name: &str) -> &str {
    name.rsplit(['.', ':']).next().unwrap_or(name)
}
