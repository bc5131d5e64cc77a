//! List command: print the type names a model declares

use crate::model::Model;
use anyhow::Result;
use std::path::Path;

/// List command implementation
pub fn run(model_path: &Path) -> Result<()> {
    let model = Model::from_file(model_path)?;

    for name in model.names() {
        println!("{name}");
    }

    Ok(())
}
