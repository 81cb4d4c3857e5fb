//! TypeScript code targets.
//!
//! Both flavors share [`TsFragments`] and the declaration renderers here;
//! they differ in file naming, type qualification and inheritance:
//!
//! - `typescript-puerts` flattens class hierarchies and imports bare type
//!   names from `<Last>Cfg.ts` files.
//! - `typescript-ue-json` keeps `extends`, wraps each namespaced file in
//!   `export namespace <Stem>` and references foreign types as `Stem.Name`.

mod fragments;
mod puerts;
mod ue_json;

pub use fragments::{TsFragments, TsNaming};
pub use puerts::TypescriptPuerts;
pub use ue_json::TypescriptUeJson;

use crate::context::GenContext;
use crate::error::CodegenResult;
use crate::fragments::FragmentVisitor;
use crate::keys;
use crate::namespace::{Imports, NamespaceBucket, last_segment};
use crate::writer::CodeWriter;
use beanforge_core::{BeanId, EnumDef, EnumId, FieldDef, NameRole, TableDef, TypeKind, TypeNode};
use std::collections::BTreeSet;

/// TypeScript reserved words.
pub const KEYWORDS: &[&str] = &[
    "abstract", "as", "any", "boolean", "break", "case", "catch", "class", "const", "continue",
    "debugger", "declare", "default", "delete", "do", "else", "enum", "export", "extends", "false",
    "finally", "for", "from", "function", "get", "if", "implements", "import", "in", "instanceof",
    "interface", "let", "module", "namespace", "new", "null", "number", "object", "package",
    "private", "protected", "public", "require", "return", "set", "static", "string", "super",
    "switch", "symbol", "this", "throw", "true", "try", "typeof", "undefined", "var", "void",
    "while", "with", "yield",
];

/// File stem of a namespace under `typescript-ue-json`, which is also the
/// name of the TypeScript namespace the file exports.
pub fn ue_file_stem(ctx: &GenContext<'_>, namespace: &str) -> String {
    if namespace.is_empty() {
        "Common".to_string()
    } else {
        ctx.format(last_segment(namespace), NameRole::Namespace)
    }
}

/// Beans of `bucket` that get a generated class. Mapped beans are native.
fn generated_beans(ctx: &GenContext<'_>, bucket: &NamespaceBucket) -> Vec<BeanId> {
    bucket
        .beans
        .iter()
        .copied()
        .filter(|id| ctx.native_bean_name(ctx.schema.bean(*id)).is_none())
        .collect()
}

/// Field types declared or read by `beans`.
fn field_types<'s>(ctx: &GenContext<'s>, beans: &[BeanId]) -> Vec<&'s TypeNode> {
    let schema = ctx.schema;
    beans
        .iter()
        .flat_map(|id| schema.hierarchy_fields(*id))
        .map(|field| &field.ty)
        .collect()
}

/// Key and index types of `tables`.
fn key_types(tables: &[TableDef]) -> Vec<&TypeNode> {
    tables
        .iter()
        .flat_map(|table| std::iter::once(&table.key_type).chain(table.indices.iter().map(|index| &index.ty)))
        .collect()
}

/// Modules owning the dotted mapped names (`UE` of `UE.Vector`) reachable
/// from `nodes`.
fn native_modules(ctx: &GenContext<'_>, nodes: &[&TypeNode]) -> BTreeSet<String> {
    let mut modules = BTreeSet::new();
    for node in nodes {
        node.walk(&mut |node| {
            let native = match node.kind {
                TypeKind::Enum(id) => ctx.native_enum_name(ctx.schema.enum_def(id)),
                TypeKind::Bean(id) => ctx.native_bean_name(ctx.schema.bean(id)),
                _ => None,
            };
            if let Some((module, _)) = native.and_then(|name| name.split_once('.')) {
                modules.insert(module.to_string());
            }
        });
    }
    modules
}

/// `import * as UE from "ue"` for every native module.
fn write_native_imports(modules: &BTreeSet<String>, writer: &mut CodeWriter) {
    for module in modules {
        writer.line(format!("import * as {module} from \"{}\"", module.to_lowercase()));
    }
}

/// `import { A, B } from "./Stem"` for every group.
fn write_named_imports(imports: &Imports, writer: &mut CodeWriter) {
    for (stem, group) in imports {
        let names: Vec<&str> = group.types.iter().map(String::as_str).collect();
        writer.line(format!("import {{ {} }} from \"./{stem}\"", names.join(", ")));
    }
}

fn render_enum(ctx: &GenContext<'_>, def: &EnumDef, writer: &mut CodeWriter) {
    writer.doc_block(def.comment.as_deref());
    writer.line(format!("export enum {} {{", ctx.format(&def.name, NameRole::Type)));
    writer.indent();
    for item in &def.items {
        writer.doc_block(item.comment.as_deref());
        writer.line(format!("{} = {},", ctx.format(&item.name, NameRole::EnumItem), item.value));
    }
    writer.dedent();
    writer.line("}");
}

/// A class with its fields and a static `deserialize`.
///
/// With `extends_parent` the class derives from its parent and declares
/// only its own fields; otherwise the whole hierarchy is flattened into it.
/// Either way `deserialize` reads every field of the hierarchy.
fn render_bean(
    fragments: &TsFragments<'_>,
    ctx: &GenContext<'_>,
    id: BeanId,
    extends_parent: bool,
    writer: &mut CodeWriter,
) {
    let bean = ctx.schema.bean(id);
    let name = ctx.format(&bean.name, NameRole::Type);
    let all_fields = ctx.schema.hierarchy_fields(id);
    let parent = bean.parent.filter(|_| extends_parent).map(|parent| ctx.schema.bean(parent));
    let declared: Vec<&FieldDef> = match parent {
        Some(_) => bean.fields.iter().collect(),
        None => all_fields.clone(),
    };

    writer.doc_block(bean.comment.as_deref());
    match parent {
        Some(parent) => writer.line(format!("export class {name} extends {} {{", fragments.bean_ref(parent))),
        None => writer.line(format!("export class {name} {{")),
    }
    writer.indent();
    for field in declared {
        writer.doc_block(field.comment.as_deref());
        writer.line(format!(
            "{}: {} = {}",
            ctx.format(&field.name, NameRole::Field),
            fragments.declare_type(&field.ty),
            fragments.field_initializer(field)
        ));
    }

    writer.blank();
    writer.line(format!("static deserialize(json: any): {name} {{"));
    writer.indent();
    writer.line(format!("const obj = new {name}()"));
    for field in all_fields {
        let target = format!("obj.{}", ctx.format(&field.name, NameRole::Field));
        writer.line(fragments.deserialize_field(&target, "json", &field.name, &field.ty));
    }
    writer.line("return obj");
    writer.dedent();
    writer.line("}");

    writer.dedent();
    writer.line("}");
}

/// Enums, then classes, one blank line apart.
fn render_declarations(
    fragments: &TsFragments<'_>,
    ctx: &GenContext<'_>,
    enums: &[EnumId],
    beans: &[BeanId],
    extends_parent: bool,
    writer: &mut CodeWriter,
) {
    let mut first = true;
    for id in enums {
        if !first {
            writer.blank();
        }
        first = false;
        render_enum(ctx, ctx.schema.enum_def(*id), writer);
    }
    for id in beans {
        if !first {
            writer.blank();
        }
        first = false;
        render_bean(fragments, ctx, *id, extends_parent, writer);
    }
}

/// The `CfgMgr` class body: one map per table plus its loader and getter.
fn render_registry(
    fragments: &TsFragments<'_>,
    ctx: &GenContext<'_>,
    tables: &[TableDef],
    writer: &mut CodeWriter,
) -> CodegenResult<()> {
    writer.line("export class CfgMgr {");
    writer.indent();
    for table in tables {
        let value = fragments.bean_ref(ctx.schema.bean(table.value));
        let key_type = keys::map_key_type(ctx, fragments, table)?;
        writer.doc_block(table.comment.as_deref());
        writer.line(format!(
            "{}: Map<{key_type}, {value}> = new Map()",
            ctx.format(&table.name, NameRole::Property)
        ));
    }

    for table in tables {
        let value = fragments.bean_ref(ctx.schema.bean(table.value));
        let map = format!("this.{}", ctx.format(&table.name, NameRole::Property));
        let load = ctx.format(&format!("Load{}", table.name), NameRole::Method);
        let get = ctx.format(&format!("Get{}", table.name), NameRole::Method);
        let row_key = keys::key_expr(ctx, fragments, table, "row")?;
        let params = keys::lookup_params(ctx, fragments, table)?;
        let lookup_key = keys::lookup_key_expr(ctx, fragments, table)?;

        writer.blank();
        writer.line(format!("{load}(rows: any[]): void {{"));
        writer.indent();
        writer.line(format!("{map}.clear()"));
        writer.line("for (const json of rows) {");
        writer.indent();
        writer.line(format!("const row = {value}.deserialize(json)"));
        writer.line(format!("{map}.set({row_key}, row)"));
        writer.dedent();
        writer.line("}");
        writer.dedent();
        writer.line("}");

        writer.blank();
        writer.line(format!("{get}({params}): {value} | undefined {{"));
        writer.indent();
        writer.line(format!("return {map}.get({lookup_key})"));
        writer.dedent();
        writer.line("}");
    }
    writer.dedent();
    writer.line("}");
    Ok(())
}

#[cfg(test)]
#[path = "typescript_tests.rs"]
mod typescript_tests;
