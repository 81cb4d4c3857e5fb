//! `typescript-ue-json` code target.

use super::{
    KEYWORDS, TsFragments, TsNaming, field_types, generated_beans, key_types, native_modules,
    render_declarations, render_registry, ue_file_stem, write_native_imports,
};
use crate::context::GenContext;
use crate::error::CodegenResult;
use crate::namespace::{Imports, NamespaceBucket, collect_imports, collect_table_imports};
use crate::target::CodeTarget;
use crate::writer::CodeWriter;
use beanforge_core::{Casing, CodeStyle, TableDef};
use std::collections::BTreeSet;

const STYLE: CodeStyle = CodeStyle::new(
    [
        Casing::Pascal,
        Casing::Pascal,
        Casing::Pascal,
        Casing::Pascal,
        Casing::Pascal,
        Casing::None,
    ],
    KEYWORDS,
);

/// Classes grouped in TypeScript namespaces, one file per namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypescriptUeJson;

impl CodeTarget for TypescriptUeJson {
    fn name(&self) -> &'static str {
        "typescript-ue-json"
    }

    fn file_suffix(&self) -> &'static str {
        "ts"
    }

    fn default_code_style(&self) -> CodeStyle {
        STYLE
    }

    fn file_stem(&self, ctx: &GenContext<'_>, namespace: &str) -> String {
        ue_file_stem(ctx, namespace)
    }

    fn render_bucket(&self, ctx: &GenContext<'_>, bucket: &NamespaceBucket) -> CodegenResult<String> {
        let current = Some(bucket.namespace.as_str()).filter(|ns| !ns.is_empty());
        let fragments = TsFragments::new(ctx, TsNaming::Qualified { current });
        let beans = generated_beans(ctx, bucket);
        let natives = native_modules(ctx, &field_types(ctx, &beans));
        let imports = collect_imports(ctx, bucket, |ns| ue_file_stem(ctx, ns), true);

        let mut writer = CodeWriter::new();
        write_imports(&natives, &imports, &mut writer);
        if bucket.is_common() {
            render_declarations(&fragments, ctx, &bucket.enums, &beans, true, &mut writer);
        } else {
            writer.line(format!("export namespace {} {{", ue_file_stem(ctx, &bucket.namespace)));
            writer.indent();
            render_declarations(&fragments, ctx, &bucket.enums, &beans, true, &mut writer);
            writer.dedent();
            writer.line("}");
        }
        Ok(writer.into_result(""))
    }

    fn render_tables(&self, ctx: &GenContext<'_>, tables: &[TableDef]) -> CodegenResult<String> {
        let fragments = TsFragments::new(ctx, TsNaming::Qualified { current: None });
        let natives = native_modules(ctx, &key_types(tables));
        let imports = collect_table_imports(ctx, tables, |ns| ue_file_stem(ctx, ns));

        let mut writer = CodeWriter::new();
        write_imports(&natives, &imports, &mut writer);
        render_registry(&fragments, ctx, tables, &mut writer)?;
        Ok(writer.into_result(""))
    }
}

/// Native modules first. Common types are imported by name; a namespaced
/// file is imported as its exported namespace.
fn write_imports(natives: &BTreeSet<String>, imports: &Imports, writer: &mut CodeWriter) {
    if natives.is_empty() && imports.is_empty() {
        return;
    }
    write_native_imports(natives, writer);
    for (stem, group) in imports {
        if group.common {
            let names: Vec<&str> = group.types.iter().map(String::as_str).collect();
            writer.line(format!("import {{ {} }} from \"./{stem}\"", names.join(", ")));
        } else {
            writer.line(format!("import {{ {stem} }} from \"./{stem}\""));
        }
    }
    writer.blank();
}
