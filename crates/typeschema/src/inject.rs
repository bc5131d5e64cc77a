//! Example and description injection with nesting suppression

use crate::render::ExampleRenderer;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use typeschema_core::{
    EnumConstant, Example, GeneratorConfig, SchemaError, SchemaResult, TypeCategory,
    TypeDescriptor,
};

/// Values to attach to one node
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Annotations {
    pub example: Option<Value>,
    pub description: Option<String>,
}

/// Decides which nodes receive `x-example` and `description`
pub(crate) struct Injector {
    examples_to: BTreeSet<TypeCategory>,
    descriptions_to: BTreeSet<TypeCategory>,
    allow_nested_examples: bool,
    allow_nested_descriptions: bool,
    use_enum_names: bool,
    renderer: Arc<dyn ExampleRenderer>,
}

impl Injector {
    pub fn new(config: &GeneratorConfig, renderer: Arc<dyn ExampleRenderer>) -> Self {
        Self {
            examples_to: config.add_examples_to.clone(),
            descriptions_to: config.add_descriptions_to.clone(),
            allow_nested_examples: config.allow_nested_examples,
            allow_nested_descriptions: config.allow_nested_descriptions,
            use_enum_names: config.use_enum_names,
            renderer,
        }
    }

    pub fn example_allowed(&self, category: TypeCategory, example_added: bool) -> bool {
        category.selected_by(&self.examples_to) && (self.allow_nested_examples || !example_added)
    }

    pub fn description_allowed(&self, category: TypeCategory, description_added: bool) -> bool {
        category.selected_by(&self.descriptions_to)
            && (self.allow_nested_descriptions || !description_added)
    }

    /// Compute the example and description for a node of `ty`
    ///
    /// `example` is the example source found for the node, if any. A
    /// rendering failure aborts generation.
    pub fn annotate(
        &self,
        ty: &TypeDescriptor,
        example: Option<&Example>,
        category: TypeCategory,
        example_added: bool,
        description_added: bool,
    ) -> SchemaResult<Annotations> {
        let example = match example {
            Some(source) if self.example_allowed(category, example_added) => {
                let value = self
                    .renderer
                    .render(source)
                    .map_err(|reason| SchemaError::Render {
                        type_name: ty.name.clone(),
                        reason,
                    })?;
                Some(self.render_enum_example(ty, value))
            }
            _ => None,
        };

        let description = self
            .description_allowed(category, description_added)
            .then(|| ty.name.clone());

        Ok(Annotations {
            example,
            description,
        })
    }

    /// String form of an enum constant
    pub fn render_constant(&self, constant: &EnumConstant) -> String {
        if self.use_enum_names {
            constant.name.clone()
        } else {
            constant.display.clone()
        }
    }

    fn render_enum_example(&self, ty: &TypeDescriptor, value: Value) -> Value {
        let Value::String(text) = &value else {
            return value;
        };
        ty.enum_constants()
            .iter()
            .find(|c| c.name == *text || c.display == *text)
            .map(|c| Value::String(self.render_constant(c)))
            .unwrap_or(value)
    }
}
