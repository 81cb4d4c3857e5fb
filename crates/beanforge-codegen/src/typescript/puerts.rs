//! `typescript-puerts` code target.

use super::{
    KEYWORDS, TsFragments, TsNaming, field_types, generated_beans, key_types, native_modules,
    render_declarations, render_registry, write_named_imports, write_native_imports,
};
use crate::context::GenContext;
use crate::error::CodegenResult;
use crate::namespace::{NamespaceBucket, collect_imports, collect_table_imports, last_segment};
use crate::target::CodeTarget;
use crate::writer::CodeWriter;
use beanforge_core::code_style::capitalize;
use beanforge_core::{Casing, CodeStyle, TableDef};

const STYLE: CodeStyle = CodeStyle::new(
    [
        Casing::Camel,
        Casing::Pascal,
        Casing::Pascal,
        Casing::Camel,
        Casing::Camel,
        Casing::None,
    ],
    KEYWORDS,
);

/// Flat classes for the Puerts runtime, one `<Last>Cfg.ts` per namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypescriptPuerts;

impl CodeTarget for TypescriptPuerts {
    fn name(&self) -> &'static str {
        "typescript-puerts"
    }

    fn file_suffix(&self) -> &'static str {
        "ts"
    }

    fn default_code_style(&self) -> CodeStyle {
        STYLE
    }

    fn file_stem(&self, _ctx: &GenContext<'_>, namespace: &str) -> String {
        if namespace.is_empty() {
            "CommonCfg".to_string()
        } else {
            format!("{}Cfg", capitalize(last_segment(namespace)))
        }
    }

    fn render_bucket(&self, ctx: &GenContext<'_>, bucket: &NamespaceBucket) -> CodegenResult<String> {
        let fragments = TsFragments::new(ctx, TsNaming::Plain);
        let beans = generated_beans(ctx, bucket);
        let natives = native_modules(ctx, &field_types(ctx, &beans));
        let imports = collect_imports(ctx, bucket, |ns| self.file_stem(ctx, ns), false);

        let mut writer = CodeWriter::new();
        write_native_imports(&natives, &mut writer);
        write_named_imports(&imports, &mut writer);
        if !natives.is_empty() || !imports.is_empty() {
            writer.blank();
        }
        render_declarations(&fragments, ctx, &bucket.enums, &beans, false, &mut writer);
        Ok(writer.into_result(""))
    }

    fn render_tables(&self, ctx: &GenContext<'_>, tables: &[TableDef]) -> CodegenResult<String> {
        let fragments = TsFragments::new(ctx, TsNaming::Plain);
        let natives = native_modules(ctx, &key_types(tables));
        let imports = collect_table_imports(ctx, tables, |ns| self.file_stem(ctx, ns));

        let mut writer = CodeWriter::new();
        write_native_imports(&natives, &mut writer);
        write_named_imports(&imports, &mut writer);
        if !natives.is_empty() || !imports.is_empty() {
            writer.blank();
        }
        render_registry(&fragments, ctx, tables, &mut writer)?;
        Ok(writer.into_result(""))
    }
}

#[cfg(test)]
#[path = "puerts/puerts_tests.rs"]
mod puerts_tests;
