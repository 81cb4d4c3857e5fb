//! `beanforge check`

use crate::generate::load_config;
use crate::logging;
use anyhow::{Context, Result};
use beanforge_codegen::find_code_target;
use beanforge_core::{Schema, SchemaFile};

/// Resolve the schema and validate the config, printing a summary.
pub fn run(schema_path: &str, config_path: Option<&str>, log_level: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    logging::init(logging::directive(log_level, &config.log_level))?;

    if let Some(code_target) = &config.code_target {
        find_code_target(code_target).context("Invalid configuration")?;
    }

    let schema = SchemaFile::from_path(schema_path)
        .and_then(|file| file.resolve())
        .with_context(|| format!("Failed to load schema: {schema_path}"))?;

    println!("✓ {schema_path} is valid");
    println!("{}", summary(&schema));
    Ok(())
}

pub fn summary(schema: &Schema) -> String {
    format!(
        "  {} enums, {} beans, {} tables",
        schema.enums().len(),
        schema.beans().len(),
        schema.tables().len()
    )
}
