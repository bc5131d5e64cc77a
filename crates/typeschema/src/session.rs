//! Per-run generation state and the recursive schema tree builder

use crate::classify::classify;
use crate::generator::SchemaGenerator;
use crate::registry::DefinitionRegistry;
use serde_json::{Map, Value};
use std::borrow::Cow;
use typeschema_core::{
    Describe, PropertyDescriptor, SchemaError, SchemaNode, SchemaOverride, SchemaResult,
    TypeDescriptor, TypeKind, TypeRef, keys,
};

/// Whether an example or description was already attached on the path to a
/// node, or by an earlier sibling
#[derive(Debug, Clone, Copy, Default)]
struct Claims {
    example: bool,
    description: bool,
}

/// Outcome of building one position in the tree
struct Built {
    /// `None` when the position is left out entirely
    node: Option<SchemaNode>,
    claims: Claims,
}

impl Built {
    fn omitted(claims: Claims) -> Self {
        Self { node: None, claims }
    }
}

/// A bean currently being expanded
struct StackEntry {
    name: String,
    /// Property filter of this expansion; a filtered view is a distinct type
    filter: Option<Vec<String>>,
    /// Expansion will be registered as a bean definition
    defining: bool,
}

impl StackEntry {
    fn is_view(&self, name: &str, filter: Option<&[String]>) -> bool {
        self.name == name && self.filter.as_deref() == filter
    }
}

/// One generation run
///
/// Owns the definition registry and the recursion stack. Sessions are cheap;
/// create one per document. A session must not be shared across threads.
pub struct GeneratorSession<'g> {
    generator: &'g SchemaGenerator,
    definitions: Option<DefinitionRegistry>,
    stack: Vec<StackEntry>,
}

impl<'g> GeneratorSession<'g> {
    pub(crate) fn new(generator: &'g SchemaGenerator) -> Self {
        let definitions = generator
            .config()
            .use_bean_defs
            .then(DefinitionRegistry::new);
        Self {
            generator,
            definitions,
            stack: Vec::new(),
        }
    }

    /// Generate the schema for a type
    ///
    /// Returns `None` only when the type itself is ignored.
    pub fn generate(&mut self, ty: &TypeDescriptor) -> SchemaResult<Option<SchemaNode>> {
        self.stack.clear();
        tracing::debug!("Generating schema for {}", ty.name);

        let built = self.build(ty, None, Claims::default(), None, 0)?;

        tracing::debug!("Finished schema for {}", ty.name);
        Ok(built.node)
    }

    /// Generate the schema for a type implementing [`Describe`]
    pub fn generate_for<T: Describe + ?Sized>(&mut self) -> SchemaResult<Option<SchemaNode>> {
        self.generate(&T::descriptor())
    }

    /// Generate the schema for the runtime type of a value
    pub fn generate_value<T: Describe + ?Sized>(
        &mut self,
        value: &T,
    ) -> SchemaResult<Option<SchemaNode>> {
        self.generate(&value.describe())
    }

    /// Definitions accumulated so far
    ///
    /// Present when bean definitions are enabled or a definition was added by hand.
    pub fn definitions(&self) -> Option<&DefinitionRegistry> {
        self.definitions.as_ref()
    }

    /// Add an externally authored definition
    ///
    /// A bean later mapping to `id` is emitted as a `$ref` and this body is kept.
    pub fn add_definition(&mut self, id: impl Into<String>, node: SchemaNode) -> &mut Self {
        self.definitions
            .get_or_insert_with(DefinitionRegistry::new)
            .put(id, node);
        self
    }

    /// Wrap a root schema and the accumulated definitions into one document
    ///
    /// Definitions go under `definitions`; the key is absent when there are none.
    pub fn into_document(self, root: SchemaNode) -> SchemaNode {
        let mut document = root;
        if let Some(definitions) = self.definitions.filter(|d| !d.is_empty()) {
            document.insert(keys::DEFINITIONS, Value::Object(definitions.to_map()));
        }
        document
    }

    fn build(
        &mut self,
        ty: &TypeDescriptor,
        filter: Option<&[String]>,
        claims: Claims,
        property_schema: Option<&SchemaOverride>,
        depth: usize,
    ) -> SchemaResult<Built> {
        let generator = self.generator;
        let config = generator.config();

        if generator.ignore_patterns().is_ignored(ty) {
            tracing::debug!("Skipping ignored type {}", ty.name);
            return Ok(Built::omitted(claims));
        }

        if depth > config.max_depth {
            return Err(SchemaError::DepthExceeded {
                max_depth: config.max_depth,
                type_name: ty.name.clone(),
            });
        }

        let swap_target: Cow<'_, TypeDescriptor>;
        let (effective, class_schema) = match &ty.swap {
            Some(swap) => {
                swap_target = swap.target.resolve();
                (&*swap_target, swap.schema.as_ref().or(ty.schema.as_ref()))
            }
            None => (ty, ty.schema.as_ref()),
        };
        let example = ty.example.as_ref().or(effective.example.as_ref());

        let use_def = config.use_bean_defs && effective.is_bean() && filter.is_none();
        let mut definition_id = None;
        if use_def {
            let id = generator.bean_def_mapper().id(effective);
            let registered = match &self.definitions {
                Some(definitions) => definitions.lookup(&id, &effective.name)?,
                None => false,
            };
            let in_progress = self
                .stack
                .iter()
                .any(|e| e.defining && e.name == effective.name);
            if registered || in_progress {
                let uri = generator.bean_def_mapper().uri(&id);
                return Ok(Built {
                    node: Some(SchemaNode::reference(uri)),
                    claims,
                });
            }
            definition_id = Some(id);
        } else if effective.is_bean() {
            if let Some(start) = self
                .stack
                .iter()
                .position(|e| e.is_view(&effective.name, filter))
            {
                if config.ignore_recursions {
                    tracing::warn!("Dropping recursive reference to {}", effective.name);
                    return Ok(Built::omitted(claims));
                }
                let mut path: Vec<String> =
                    self.stack[start..].iter().map(|e| e.name.clone()).collect();
                path.push(effective.name.clone());
                return Err(SchemaError::Recursion { path });
            }
        }

        let classification = classify(effective);
        tracing::trace!(
            "Classified {} as {}",
            effective.name,
            classification.category
        );

        let mut node = SchemaNode::new();
        if let Some(fragment) = property_schema {
            node.merge(fragment);
        }
        if let Some(fragment) = class_schema {
            node.merge(fragment);
        }
        node.insert(keys::TYPE, classification.type_name);
        if let Some(format) = classification.format {
            node.insert(keys::FORMAT, format);
        }

        let annotations = generator.injector().annotate(
            effective,
            example,
            classification.category,
            claims.example,
            claims.description,
        )?;
        let mut inner = Claims {
            example: claims.example || annotations.example.is_some(),
            description: claims.description || annotations.description.is_some(),
        };

        match &effective.kind {
            TypeKind::Bean { properties } => {
                self.stack.push(StackEntry {
                    name: effective.name.clone(),
                    filter: filter.map(<[String]>::to_vec),
                    defining: definition_id.is_some(),
                });
                let result = self.build_properties(properties, filter, &mut inner, depth);
                self.stack.pop();
                node.insert(keys::PROPERTIES, Value::Object(result?));
            }
            TypeKind::Collection { element, .. } => {
                if let Some(items) = self.build_nested(element, filter, &mut inner, depth)? {
                    node.insert(keys::ITEMS, items.into_value());
                }
                if effective.is_set() {
                    node.insert(keys::UNIQUE_ITEMS, true);
                }
            }
            TypeKind::Array { element } => {
                if let Some(items) = self.build_nested(element, filter, &mut inner, depth)? {
                    node.insert(keys::ITEMS, items.into_value());
                }
            }
            TypeKind::Enum { constants } => {
                let injector = generator.injector();
                let rendered: Vec<Value> = constants
                    .iter()
                    .map(|c| Value::String(injector.render_constant(c)))
                    .collect();
                node.insert(keys::ENUM, rendered);
            }
            TypeKind::Map { value, .. } => {
                let values = self.build_nested(value, filter, &mut inner, depth)?;
                if let Some(values) = values.filter(|v| !v.is_empty()) {
                    node.insert(keys::ADDITIONAL_PROPERTIES, values.into_value());
                }
            }
            TypeKind::Number(_)
            | TypeKind::Boolean
            | TypeKind::Char
            | TypeKind::String
            | TypeKind::Uri
            | TypeKind::Other => {}
        }

        if let Some(description) = annotations.description {
            node.insert(keys::DESCRIPTION, description);
        }
        if let Some(example) = annotations.example {
            node.insert(keys::EXAMPLE, example);
        }
        if let Some(fragment) = class_schema {
            node.merge(fragment);
        }
        if let Some(uri) = node.reference_uri().map(str::to_string) {
            tracing::debug!("Schema override of {} replaces it with {}", effective.name, uri);
            node = SchemaNode::reference(uri);
        }

        if let Some(id) = definition_id {
            let uri = generator.bean_def_mapper().uri(&id);
            tracing::debug!("Registering bean definition {} for {}", id, effective.name);
            self.definitions
                .get_or_insert_with(DefinitionRegistry::new)
                .register(id, effective.name.clone(), node)?;
            return Ok(Built {
                node: Some(SchemaNode::reference(uri)),
                claims: inner,
            });
        }

        Ok(Built {
            node: Some(node),
            claims: inner,
        })
    }

    fn build_properties(
        &mut self,
        properties: &[PropertyDescriptor],
        filter: Option<&[String]>,
        claims: &mut Claims,
        depth: usize,
    ) -> SchemaResult<Map<String, Value>> {
        let mut out = Map::new();
        for property in properties {
            if let Some(names) = filter
                && !names.iter().any(|n| *n == property.name)
            {
                continue;
            }
            let ty = property.ty.resolve();
            let built = self.build(
                &ty,
                property.filter.as_deref(),
                *claims,
                property.schema.as_ref(),
                depth + 1,
            )?;
            *claims = built.claims;
            if let Some(node) = built.node {
                out.insert(property.name.clone(), node.into_value());
            }
        }
        Ok(out)
    }

    /// Build an element or map value type; the property filter passes through
    fn build_nested(
        &mut self,
        ty: &TypeRef,
        filter: Option<&[String]>,
        claims: &mut Claims,
        depth: usize,
    ) -> SchemaResult<Option<SchemaNode>> {
        let ty = ty.resolve();
        let built = self.build(&ty, filter, *claims, None, depth + 1)?;
        *claims = built.claims;
        Ok(built.node)
    }
}
