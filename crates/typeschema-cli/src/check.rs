//! Check command: validate a generator config file

use crate::generate::load_config;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;
use typeschema::{GeneratorConfig, SchemaGenerator, TypeCategory};

/// Build a generator from the config, reporting every validation failure
/// the builder detects
pub fn validate(config: GeneratorConfig) -> Result<SchemaGenerator> {
    SchemaGenerator::from_config(config).context("Invalid generator config")
}

/// Summary lines describing a validated generator
pub fn summary(generator: &SchemaGenerator) -> Vec<String> {
    let config = generator.config();

    vec![
        format!("Bean definitions: {}", on_off(config.use_bean_defs)),
        format!("Definition URI: {}", config.bean_def_uri),
        format!("Ignore patterns: {}", generator.ignore_patterns().len()),
        format!("Examples: {}", categories(&config.add_examples_to)),
        format!("Descriptions: {}", categories(&config.add_descriptions_to)),
        format!("Max depth: {}", config.max_depth),
    ]
}

fn categories(set: &BTreeSet<TypeCategory>) -> String {
    if set.is_empty() {
        "none".to_string()
    } else {
        set.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Check command implementation
pub fn run(config_path: &Path) -> Result<()> {
    println!("Checking config: {}", config_path.display());

    let config = load_config(Some(config_path))?;
    let generator = validate(config)?;

    for line in summary(&generator) {
        println!("✓ {line}");
    }
    println!("\nConfig is valid!");

    Ok(())
}
