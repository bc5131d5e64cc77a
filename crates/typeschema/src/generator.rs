//! Immutable, shareable schema generator and its builder

use crate::ignore::IgnorePatternSet;
use crate::inject::Injector;
use crate::mapper::{self, BeanDefMapper};
use crate::render::{ExampleRenderer, JsonRenderer};
use crate::session::GeneratorSession;
use std::sync::Arc;
use typeschema_core::{GeneratorConfig, SchemaError, SchemaResult, TypeCategory};

/// Schema generator
///
/// Holds validated configuration only; all per-run state lives in a
/// [`GeneratorSession`]. A generator can be shared across threads and used
/// by any number of concurrent sessions.
///
/// # Example
///
/// ```
/// use typeschema::SchemaGenerator;
///
/// let generator = SchemaGenerator::builder().build()?;
/// let schema = generator.session().generate_for::<Vec<String>>()?;
///
/// assert_eq!(
///     serde_json::to_string(&schema)?,
///     r#"{"type":"array","items":{"type":"string"}}"#
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct SchemaGenerator {
    config: GeneratorConfig,
    ignore: IgnorePatternSet,
    mapper: Arc<dyn BeanDefMapper>,
    injector: Arc<Injector>,
}

impl SchemaGenerator {
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Build a generator from loaded configuration
    pub fn from_config(config: GeneratorConfig) -> SchemaResult<Self> {
        GeneratorBuilder::from_config(config).build()
    }

    /// Start a generation session
    pub fn session(&self) -> GeneratorSession<'_> {
        GeneratorSession::new(self)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn ignore_patterns(&self) -> &IgnorePatternSet {
        &self.ignore
    }

    pub fn bean_def_mapper(&self) -> &dyn BeanDefMapper {
        self.mapper.as_ref()
    }

    pub(crate) fn injector(&self) -> &Injector {
        &self.injector
    }
}

impl std::fmt::Debug for SchemaGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaGenerator")
            .field("config", &self.config)
            .field("ignore", &self.ignore)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for [`SchemaGenerator`]
///
/// Validation happens once, in [`build`](GeneratorBuilder::build).
#[derive(Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
    mapper: Option<Arc<dyn BeanDefMapper>>,
    renderer: Option<Arc<dyn ExampleRenderer>>,
}

impl GeneratorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from loaded configuration
    #[must_use]
    pub fn from_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn use_bean_defs(mut self, enabled: bool) -> Self {
        self.config.use_bean_defs = enabled;
        self
    }

    pub fn allow_nested_examples(mut self, allowed: bool) -> Self {
        self.config.allow_nested_examples = allowed;
        self
    }

    pub fn allow_nested_descriptions(mut self, allowed: bool) -> Self {
        self.config.allow_nested_descriptions = allowed;
        self
    }

    /// Add categories that receive examples
    pub fn add_examples_to(mut self, categories: impl IntoIterator<Item = TypeCategory>) -> Self {
        self.config.add_examples_to.extend(categories);
        self
    }

    /// Add categories that receive descriptions
    pub fn add_descriptions_to(
        mut self,
        categories: impl IntoIterator<Item = TypeCategory>,
    ) -> Self {
        self.config.add_descriptions_to.extend(categories);
        self
    }

    /// Add ignore patterns; each entry may hold several comma-separated patterns
    pub fn ignore_types<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .ignore_types
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn bean_def_uri(mut self, template: impl Into<String>) -> Self {
        self.config.bean_def_uri = template.into();
        self
    }

    /// Use a custom id strategy; overrides `bean_def_mapper` and `bean_def_uri`
    pub fn bean_def_mapper(mut self, mapper: Arc<dyn BeanDefMapper>) -> Self {
        self.mapper = Some(mapper);
        self
    }

    pub fn example_renderer(mut self, renderer: Arc<dyn ExampleRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn use_enum_names(mut self, enabled: bool) -> Self {
        self.config.use_enum_names = enabled;
        self
    }

    pub fn ignore_recursions(mut self, enabled: bool) -> Self {
        self.config.ignore_recursions = enabled;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Validate the configuration and build the generator
    pub fn build(self) -> SchemaResult<SchemaGenerator> {
        let config = self.config;

        if config.max_depth == 0 {
            return Err(SchemaError::InvalidConfig(
                "max_depth must be greater than zero".to_string(),
            ));
        }

        let mapper = match self.mapper {
            Some(mapper) => mapper,
            None => {
                if !config.bean_def_uri.contains("{0}") {
                    return Err(SchemaError::InvalidConfig(format!(
                        "bean_def_uri '{}' has no {{0}} placeholder",
                        config.bean_def_uri
                    )));
                }
                mapper::from_kind(config.bean_def_mapper, &config.bean_def_uri)
            }
        };

        let ignore = IgnorePatternSet::compile(config.ignore_patterns())?;
        let renderer = self.renderer.unwrap_or_else(|| Arc::new(JsonRenderer));
        let injector = Arc::new(Injector::new(&config, renderer));

        Ok(SchemaGenerator {
            config,
            ignore,
            mapper,
            injector,
        })
    }
}
