//! Parallel emission of one code target.
//!
//! A run is split into independent units: the table registry first, then
//! one unit per namespace bucket in discovery order. Units render on a
//! rayon pool and the manifest lists their files in unit order, so output
//! is identical whatever the worker count.

use crate::context::GenContext;
use crate::error::CodegenResult;
use crate::manifest::{OutputFile, OutputManifest};
use crate::namespace::{NamespaceBucket, partition};
use crate::target::{CodeTarget, find_code_target};
use crate::writer::FILE_HEADER;
use beanforge_core::{GenerationConfig, Schema};
use rayon::prelude::*;
use std::collections::HashSet;

/// Run settings that do not affect individual fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Table registry file name, replacing the target's `CfgMgr.<suffix>`
    pub output_file: Option<String>,
    /// Dedicated pool size; the global rayon pool is used when unset
    pub worker_threads: Option<usize>,
}

impl EmitOptions {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            output_file: config.output_file.clone(),
            worker_threads: config.worker_threads,
        }
    }
}

enum Unit {
    Tables { path: String },
    Bucket { path: String, bucket: NamespaceBucket },
}

impl Unit {
    fn path(&self) -> &str {
        match self {
            Unit::Tables { path } | Unit::Bucket { path, .. } => path,
        }
    }
}

/// Render every file of `target` for the schema in `ctx`.
///
/// Fails with the first unit error (wrapped with the unit's file name);
/// no partial manifest is returned.
pub fn generate(
    ctx: &GenContext<'_>,
    target: &dyn CodeTarget,
    options: &EmitOptions,
) -> CodegenResult<OutputManifest> {
    let tables_path = options
        .output_file
        .clone()
        .unwrap_or_else(|| target.tables_file_name());
    let mut units = vec![Unit::Tables { path: tables_path }];
    units.extend(partition(ctx.schema).into_iter().map(|bucket| Unit::Bucket {
        path: target.bucket_file_name(ctx, &bucket.namespace),
        bucket,
    }));
    warn_duplicate_paths(&units);

    tracing::info!(
        code_target = target.name(),
        units = units.len(),
        workers = options.worker_threads,
        "Generating"
    );

    let files = match options.worker_threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(|| render_units(ctx, target, &units))?,
        None => render_units(ctx, target, &units)?,
    };

    let mut manifest = OutputManifest::new(target.name());
    for file in files {
        manifest.add_file(file);
    }
    tracing::info!(files = manifest.len(), "Generation complete");
    Ok(manifest)
}

/// Resolve `code_target` by name and generate with `config`'s target,
/// casing overrides and run settings.
pub fn generate_with_config(
    schema: &Schema,
    code_target: &str,
    config: &GenerationConfig,
) -> CodegenResult<OutputManifest> {
    let target = find_code_target(code_target)?;
    let ctx = GenContext::from_config(schema, target.default_code_style(), target.name(), config);
    generate(&ctx, target, &EmitOptions::from_config(config))
}

fn render_units(
    ctx: &GenContext<'_>,
    target: &dyn CodeTarget,
    units: &[Unit],
) -> CodegenResult<Vec<OutputFile>> {
    units
        .par_iter()
        .map(|unit| render_unit(ctx, target, unit))
        .collect()
}

fn render_unit(ctx: &GenContext<'_>, target: &dyn CodeTarget, unit: &Unit) -> CodegenResult<OutputFile> {
    let span = tracing::debug_span!("unit", path = unit.path());
    let _guard = span.enter();

    let body = match unit {
        Unit::Tables { .. } => target.render_tables(ctx, ctx.schema.tables()),
        Unit::Bucket { bucket, .. } => target.render_bucket(ctx, bucket),
    }
    .map_err(|err| err.in_unit(unit.path()))?;

    tracing::debug!(bytes = body.len(), "Rendered file");
    Ok(OutputFile::new(unit.path(), format!("{FILE_HEADER}{body}")))
}

/// Two namespaces may share a last segment and so a file name. Both files
/// are still emitted; writing them out lets the later one win.
fn warn_duplicate_paths(units: &[Unit]) {
    let mut seen = HashSet::new();
    for unit in units {
        if !seen.insert(unit.path()) {
            tracing::warn!(path = unit.path(), "Several units write the same file");
        }
    }
}
