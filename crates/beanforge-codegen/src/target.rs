//! Code target registry.

use crate::angelscript::AngelScriptJson;
use crate::context::GenContext;
use crate::error::{CodegenError, CodegenResult};
use crate::namespace::NamespaceBucket;
use crate::typescript::{TypescriptPuerts, TypescriptUeJson};
use beanforge_core::{CodeStyle, TableDef};

/// One output language flavor.
///
/// A target renders the body of every namespace bucket file and of the
/// table registry; the orchestrator adds the header and schedules units.
pub trait CodeTarget: Send + Sync {
    /// Registry name, e.g. `typescript-puerts`.
    fn name(&self) -> &'static str;

    fn file_suffix(&self) -> &'static str;

    /// Casing and reserved words used unless configuration overrides them.
    fn default_code_style(&self) -> CodeStyle;

    /// File name (without suffix) for a namespace bucket.
    fn file_stem(&self, ctx: &GenContext<'_>, namespace: &str) -> String;

    fn bucket_file_name(&self, ctx: &GenContext<'_>, namespace: &str) -> String {
        format!("{}.{}", self.file_stem(ctx, namespace), self.file_suffix())
    }

    /// Default table registry file name.
    fn tables_file_name(&self) -> String {
        format!("CfgMgr.{}", self.file_suffix())
    }

    fn render_bucket(&self, ctx: &GenContext<'_>, bucket: &NamespaceBucket) -> CodegenResult<String>;

    fn render_tables(&self, ctx: &GenContext<'_>, tables: &[TableDef]) -> CodegenResult<String>;
}

static CODE_TARGETS: &[&dyn CodeTarget] = &[&AngelScriptJson, &TypescriptPuerts, &TypescriptUeJson];

/// Every registered code target.
pub fn code_targets() -> &'static [&'static dyn CodeTarget] {
    CODE_TARGETS
}

pub fn find_code_target(name: &str) -> CodegenResult<&'static dyn CodeTarget> {
    CODE_TARGETS
        .iter()
        .copied()
        .find(|target| target.name() == name)
        .ok_or_else(|| CodegenError::UnknownCodeTarget {
            name: name.to_string(),
            available: CODE_TARGETS
                .iter()
                .map(|target| target.name())
                .collect::<Vec<_>>()
                .join(", "),
        })
}
