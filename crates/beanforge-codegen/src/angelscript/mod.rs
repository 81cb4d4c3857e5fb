//! `angelscript-json` code target.
//!
//! Emits Unreal AngelScript declarations and readers over the engine's
//! `FJsonObject` API. One `.as` file per namespace bucket (`CommonCfg.as`
//! for the empty namespace, `<last segment>Cfg.as` otherwise) plus the
//! `CfgMgr.as` table registry.

mod fragments;

pub use fragments::AngelScriptFragments;

use crate::context::GenContext;
use crate::error::CodegenResult;
use crate::fragments::FragmentVisitor;
use crate::keys;
use crate::literal::field_initializer;
use crate::namespace::{NamespaceBucket, last_segment};
use crate::target::CodeTarget;
use crate::writer::CodeWriter;
use beanforge_core::{BeanId, Casing, CodeStyle, EnumDef, FieldDef, NameRole, TableDef};

/// AngelScript reserved words.
pub const KEYWORDS: &[&str] = &[
    "and", "auto", "bool", "break", "case", "cast", "class", "const", "continue", "default", "do",
    "double", "else", "enum", "false", "final", "float", "for", "from", "funcdef", "function", "get",
    "if", "import", "in", "inout", "int", "int8", "int16", "int32", "int64", "interface", "is",
    "mixin", "namespace", "not", "null", "or", "out", "override", "private", "protected", "return",
    "set", "shared", "super", "switch", "this", "true", "typedef", "uint", "uint8", "uint16",
    "uint32", "uint64", "void", "while", "xor",
];

const STYLE: CodeStyle = CodeStyle::new([Casing::None; 6], KEYWORDS);

#[derive(Debug, Clone, Copy, Default)]
pub struct AngelScriptJson;

impl CodeTarget for AngelScriptJson {
    fn name(&self) -> &'static str {
        "angelscript-json"
    }

    fn file_suffix(&self) -> &'static str {
        "as"
    }

    fn default_code_style(&self) -> CodeStyle {
        STYLE
    }

    fn file_stem(&self, _ctx: &GenContext<'_>, namespace: &str) -> String {
        if namespace.is_empty() {
            "CommonCfg".to_string()
        } else {
            format!("{}Cfg", last_segment(namespace))
        }
    }

    fn render_bucket(&self, ctx: &GenContext<'_>, bucket: &NamespaceBucket) -> CodegenResult<String> {
        let fragments = AngelScriptFragments::new(ctx);
        let enums: Vec<&EnumDef> = bucket.enums.iter().map(|id| ctx.schema.enum_def(*id)).collect();
        // Mapped beans are native engine types.
        let beans: Vec<BeanId> = bucket
            .beans
            .iter()
            .copied()
            .filter(|id| ctx.bean_mapper(ctx.schema.bean(*id)).is_none())
            .collect();

        let mut writer = CodeWriter::new();
        let mut first = true;
        for def in enums {
            separate(&mut writer, &mut first);
            render_enum(&fragments, def, &mut writer);
        }
        for id in beans {
            separate(&mut writer, &mut first);
            render_bean(ctx, &fragments, id, &mut writer);
        }
        Ok(writer.into_result(""))
    }

    fn render_tables(&self, ctx: &GenContext<'_>, tables: &[TableDef]) -> CodegenResult<String> {
        let fragments = AngelScriptFragments::new(ctx);
        let mut writer = CodeWriter::new();
        writer.line("class CfgMgr");
        writer.line("{");
        writer.indent();

        for table in tables {
            let bean = ctx.schema.bean(table.value);
            let map_name = ctx.format(&table.name, NameRole::Property);
            let key_type = keys::map_key_type(ctx, &fragments, table)?;
            writer.doc_block(table.comment.as_deref());
            writer.line(format!("TMap<{key_type}, {}> {map_name};", fragments.bean_type_name(bean)));
        }

        for table in tables {
            writer.blank();
            render_table_accessors(ctx, &fragments, table, &mut writer)?;
        }

        writer.dedent();
        writer.line("}");
        Ok(writer.into_result(""))
    }
}

/// Two blank lines between consecutive declarations.
fn separate(writer: &mut CodeWriter, first: &mut bool) {
    if !*first {
        writer.blank();
        writer.blank();
    }
    *first = false;
}

fn render_enum(fragments: &AngelScriptFragments<'_>, def: &EnumDef, writer: &mut CodeWriter) {
    writer.doc_block(def.comment.as_deref());
    writer.line(format!("enum {}", fragments.enum_type_name(def)));
    writer.line("{");
    writer.indent();
    for item in &def.items {
        writer.doc_block(item.comment.as_deref());
        writer.line(format!("{} = {},", fragments.enum_item_name(&item.name), item.value));
    }
    writer.dedent();
    writer.line("}");
}

fn render_bean(
    ctx: &GenContext<'_>,
    fragments: &AngelScriptFragments<'_>,
    id: BeanId,
    writer: &mut CodeWriter,
) {
    let bean = ctx.schema.bean(id);
    let type_name = fragments.bean_type_name(bean);
    // Structs cannot inherit: value types carry the whole hierarchy.
    let parent = bean.parent.filter(|_| !bean.is_value_type).map(|id| ctx.schema.bean(id));
    let all_fields = ctx.schema.hierarchy_fields(id);
    let declared: Vec<&FieldDef> = match parent {
        Some(_) => bean.fields.iter().collect(),
        None => all_fields.clone(),
    };

    writer.doc_block(bean.comment.as_deref());
    match parent {
        _ if bean.is_value_type => writer.line(format!("struct {type_name}")),
        Some(parent) => writer.line(format!("class {type_name} : {}", fragments.bean_type_name(parent))),
        None => writer.line(format!("class {type_name}")),
    }
    writer.line("{");
    writer.indent();
    for field in declared {
        let name = ctx.format(&field.name, NameRole::Property);
        let ty = fragments.declare_type(&field.ty);
        let init = field_initializer(ctx, fragments, field);
        writer.doc_block(field.comment.as_deref());
        if init.is_empty() {
            writer.line(format!("{ty} {name};"));
        } else {
            writer.line(format!("{ty} {name} = {init};"));
        }
    }
    writer.dedent();
    writer.line("}");

    writer.blank();
    writer.line(format!(
        "{type_name} {}(TSharedPtr<FJsonObject> json)",
        fragments.deserializer_name(bean)
    ));
    writer.line("{");
    writer.indent();
    if bean.is_value_type {
        writer.line(format!("{type_name} obj;"));
    } else {
        writer.line(format!("{type_name} obj = {type_name}();"));
    }
    for field in all_fields {
        let target = format!("obj.{}", ctx.format(&field.name, NameRole::Property));
        writer.line(fragments.deserialize_field(&target, "json", &field.name, &field.ty));
    }
    writer.line("return obj;");
    writer.dedent();
    writer.line("}");
}

fn render_table_accessors(
    ctx: &GenContext<'_>,
    fragments: &AngelScriptFragments<'_>,
    table: &TableDef,
    writer: &mut CodeWriter,
) -> CodegenResult<()> {
    let bean = ctx.schema.bean(table.value);
    let value_type = fragments.bean_type_name(bean);
    let map_name = ctx.format(&table.name, NameRole::Property);
    let load = ctx.format(&format!("Load{}", table.name), NameRole::Method);
    let get = ctx.format(&format!("Get{}", table.name), NameRole::Method);
    let row_key = keys::key_expr(ctx, fragments, table, "row")?;
    let params = keys::lookup_params(ctx, fragments, table)?;
    let lookup_key = keys::lookup_key_expr(ctx, fragments, table)?;

    writer.line(format!("void {load}(TArray<TSharedPtr<FJsonValue>> rows)"));
    writer.line("{");
    writer.indent();
    writer.line(format!("{map_name}.Empty();"));
    writer.line("for (int __index = 0; __index < rows.Num(); __index++)");
    writer.line("{");
    writer.indent();
    writer.line(format!(
        "{value_type} row = {}(rows[__index]->AsObject());",
        fragments.deserializer_name(bean)
    ));
    writer.line(format!("{map_name}.Add({row_key}, row);"));
    writer.dedent();
    writer.line("}");
    writer.dedent();
    writer.line("}");

    writer.blank();
    writer.line(format!("bool {get}({params}, {value_type}&out OutRow)"));
    writer.line("{");
    writer.indent();
    writer.line(format!("return {map_name}.Find({lookup_key}, OutRow);"));
    writer.dedent();
    writer.line("}");
    Ok(())
}
