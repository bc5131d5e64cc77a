//! Session-scoped bean definition table

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use typeschema_core::{SchemaError, SchemaNode, SchemaResult};

#[derive(Debug, Clone)]
struct Entry {
    node: SchemaNode,
    /// Fully-qualified name of the bean that produced the body; `None` for
    /// definitions added by hand
    owner: Option<String>,
}

/// Definitions accumulated by one generation session, keyed by id
///
/// Iteration is in id order.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    entries: BTreeMap<String, Entry>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&SchemaNode> {
        self.entries.get(id).map(|e| &e.node)
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Store an externally authored definition, replacing any previous body
    pub fn put(&mut self, id: impl Into<String>, node: SchemaNode) {
        self.entries.insert(id.into(), Entry { node, owner: None });
    }

    /// Whether `owner` may reference the definition stored under `id`
    ///
    /// Returns `Ok(false)` if nothing is registered yet. Fails if the id is
    /// held by a different bean type.
    pub fn lookup(&self, id: &str, owner: &str) -> SchemaResult<bool> {
        match self.entries.get(id) {
            None => Ok(false),
            Some(entry) => match &entry.owner {
                Some(existing) if existing != owner => Err(collision(id, existing, owner)),
                _ => Ok(true),
            },
        }
    }

    /// Register the body generated for bean type `owner`
    ///
    /// A manually added definition under the same id is kept as is.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        owner: impl Into<String>,
        node: SchemaNode,
    ) -> SchemaResult<()> {
        let id = id.into();
        let owner = owner.into();
        if let Some(entry) = self.entries.get(&id) {
            return match &entry.owner {
                Some(existing) if *existing != owner => Err(collision(&id, existing, &owner)),
                _ => Ok(()),
            };
        }
        self.entries.insert(
            id,
            Entry {
                node,
                owner: Some(owner),
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.entries.iter().map(|(id, e)| (id.as_str(), &e.node))
    }

    /// Convert into a JSON object of id to definition body
    pub fn to_map(&self) -> Map<String, Value> {
        self.iter()
            .map(|(id, node)| (id.to_string(), node.clone().into_value()))
            .collect()
    }
}

fn collision(id: &str, existing: &str, incoming: &str) -> SchemaError {
    SchemaError::DefinitionCollision {
        id: id.to_string(),
        existing: existing.to_string(),
        incoming: incoming.to_string(),
    }
}
