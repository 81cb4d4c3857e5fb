//! `beanforge generate`

use crate::logging;
use anyhow::{Context, Result};
use beanforge_codegen::{OutputManifest, generate_with_config};
use beanforge_core::{GenerationConfig, SchemaFile};
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Path to the schema document (.json or .toml)
    #[arg(short, long)]
    pub schema: String,

    /// Code target to emit (e.g. typescript-puerts); falls back to config
    #[arg(short = 'l', long)]
    pub code_target: Option<String>,

    /// Generation target matched against type mappers (e.g. client)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Output directory for generated code
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to beanforge.toml
    #[arg(short, long)]
    pub config: Option<String>,

    /// File name of the table registry
    #[arg(long)]
    pub output_file: Option<String>,

    /// Number of generation worker threads
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

pub fn run(args: GenerateArgs, log_level: Option<&str>) -> Result<()> {
    let config = apply_overrides(load_config(args.config.as_deref())?, &args);
    config.validate().context("Invalid configuration")?;
    logging::init(logging::directive(log_level, &config.log_level))?;

    let code_target = args
        .code_target
        .clone()
        .or_else(|| config.code_target.clone())
        .context("No code target given: pass --code-target or set code_target in the config")?;

    let schema = SchemaFile::from_path(&args.schema)
        .and_then(|file| file.resolve())
        .with_context(|| format!("Failed to load schema: {}", args.schema))?;

    let manifest = generate_with_config(&schema, &code_target, &config)
        .with_context(|| format!("Failed to generate {code_target}"))?;
    let written = write_manifest(&config.output_dir, &manifest)?;

    println!(
        "✓ Generated {} files for {} in {}",
        written.len(),
        code_target,
        config.output_dir.display()
    );
    Ok(())
}

/// Read the config file if one was given; defaults otherwise.
pub fn load_config(path: Option<&str>) -> Result<GenerationConfig> {
    match path {
        Some(path) => GenerationConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {path}")),
        None => Ok(GenerationConfig::default()),
    }
}

/// Command-line values replace the matching config entries.
pub fn apply_overrides(mut config: GenerationConfig, args: &GenerateArgs) -> GenerationConfig {
    if let Some(target) = &args.target {
        config.target = target.clone();
    }
    if let Some(output) = &args.output {
        config.output_dir = PathBuf::from(output);
    }
    if let Some(output_file) = &args.output_file {
        config.output_file = Some(output_file.clone());
    }
    if args.jobs.is_some() {
        config.worker_threads = args.jobs;
    }
    config
}

/// Write every manifest file under `out_dir`, creating directories as
/// needed. Later files overwrite earlier ones with the same path.
pub fn write_manifest(out_dir: &Path, manifest: &OutputManifest) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(manifest.len());
    for file in manifest.files() {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Wrote file");
        written.push(path);
    }
    Ok(written)
}
