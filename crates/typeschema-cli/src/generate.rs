//! Generate command implementation

use crate::model::Model;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::{Path, PathBuf};
use typeschema::{GeneratorConfig, SchemaGenerator};

/// Options for `typeschema generate`
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub model: PathBuf,
    pub type_name: String,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

/// Load a generator config, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {:?}", path)),
        None => Ok(GeneratorConfig::default()),
    }
}

/// Generate the schema document for one model type
///
/// Definitions collected during generation are attached under `definitions`.
pub fn schema_document(model: &Model, type_name: &str, config: GeneratorConfig) -> Result<Value> {
    let generator = SchemaGenerator::from_config(config).context("Invalid generator config")?;
    let descriptor = model.descriptor(type_name)?;

    let mut session = generator.session();
    let root = session
        .generate(&descriptor)
        .with_context(|| format!("Failed to generate schema for '{}'", descriptor.name))?;

    let Some(root) = root else {
        bail!("Type '{}' is excluded by the ignore patterns", descriptor.name);
    };

    Ok(session.into_document(root).into_value())
}

/// Render a document as compact or pretty JSON
pub fn to_json(document: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };
    text.context("Failed to serialize schema")
}

/// Generate command
pub fn run(args: &GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let model = Model::from_file(&args.model)?;

    tracing::info!("Generating schema for {} from {:?}", args.type_name, args.model);

    let document = schema_document(&model, &args.type_name, config)?;
    let json = to_json(&document, args.pretty)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write schema: {:?}", path))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
