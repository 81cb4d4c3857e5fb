//! Table key expressions.
//!
//! A table is keyed by a single field, or (when flagged union and listing
//! more than one index) by the concatenation of all index fields joined
//! with `_`. The helpers here build the accessor expressions, parameter
//! lists and backing map key type for both cases; each target supplies
//! only its spelling through [`KeySyntax`].

use crate::context::GenContext;
use crate::error::{CodegenError, CodegenResult};
use crate::fragments::FragmentVisitor;
use beanforge_core::{IndexDef, NameRole, TableDef, TypeKind};

/// Separator between the parts of a union key.
pub const UNION_KEY_SEPARATOR: &str = "_";

/// Target spelling of key expressions.
pub trait KeySyntax {
    /// Role the target formats bean field names with.
    fn key_role(&self) -> NameRole;

    /// The target's string type.
    fn string_type(&self) -> &'static str;

    /// Convert a non-string expression into a string.
    fn interpolate(&self, expr: &str) -> String;

    /// One part of a union key. String parts may be used bare.
    fn union_part(&self, expr: &str, is_string: bool) -> String;

    /// Concatenate union key parts with [`UNION_KEY_SEPARATOR`].
    fn join_union(&self, parts: Vec<String>) -> String;

    /// One typed parameter declaration.
    fn parameter(&self, ty: &str, name: &str) -> String;
}

pub fn is_union_key(table: &TableDef) -> bool {
    table.is_union_key()
}

/// The table's indices, checked against its value bean's fields.
pub fn checked_indices<'t>(ctx: &GenContext<'_>, table: &'t TableDef) -> CodegenResult<&'t [IndexDef]> {
    if table.indices.is_empty() {
        return Err(CodegenError::NoKeyField(table.full_name()));
    }
    let fields = ctx.schema.hierarchy_fields(table.value);
    for index in &table.indices {
        if !fields.iter().any(|f| f.name == index.field) {
            return Err(CodegenError::MissingKeyField {
                table: table.full_name(),
                field: index.field.clone(),
            });
        }
    }
    Ok(&table.indices)
}

fn key_field_name(ctx: &GenContext<'_>, syntax: &impl KeySyntax, index: &IndexDef) -> String {
    ctx.format(&index.field, syntax.key_role())
}

/// Formatted name of the single key field.
pub fn single_key_field_name(
    ctx: &GenContext<'_>,
    syntax: &impl KeySyntax,
    table: &TableDef,
) -> CodegenResult<String> {
    let indices = checked_indices(ctx, table)?;
    Ok(key_field_name(ctx, syntax, &indices[0]))
}

/// `var.Field`, string-converted unless the key is an int, long, string or enum.
pub fn single_key_expr(
    ctx: &GenContext<'_>,
    syntax: &impl KeySyntax,
    table: &TableDef,
    var: &str,
) -> CodegenResult<String> {
    let accessor = format!("{var}.{}", single_key_field_name(ctx, syntax, table)?);
    Ok(match table.key_type.kind {
        TypeKind::Int | TypeKind::Long { .. } | TypeKind::String | TypeKind::Enum(_) => accessor,
        _ => syntax.interpolate(&accessor),
    })
}

/// Typed lookup parameter for a single key.
pub fn single_key_param<S>(ctx: &GenContext<'_>, syntax: &S, table: &TableDef) -> CodegenResult<String>
where
    S: KeySyntax + FragmentVisitor,
{
    let name = single_key_field_name(ctx, syntax, table)?;
    Ok(syntax.parameter(&syntax.declare_type(&table.key_type), &name))
}

/// Single key built from the parameter declared by [`single_key_param`].
pub fn single_key_expr_from_param(
    ctx: &GenContext<'_>,
    syntax: &impl KeySyntax,
    table: &TableDef,
) -> CodegenResult<String> {
    let name = single_key_field_name(ctx, syntax, table)?;
    Ok(match table.key_type.kind {
        TypeKind::Int | TypeKind::Long { .. } | TypeKind::String | TypeKind::Enum(_) => name,
        _ => syntax.interpolate(&name),
    })
}

/// Union key built from the fields of an existing row `var`.
pub fn union_key_expr(
    ctx: &GenContext<'_>,
    syntax: &impl KeySyntax,
    table: &TableDef,
    var: &str,
) -> CodegenResult<String> {
    let parts = checked_indices(ctx, table)?
        .iter()
        .map(|index| {
            let accessor = format!("{var}.{}", key_field_name(ctx, syntax, index));
            syntax.union_part(&accessor, index.ty.kind == TypeKind::String)
        })
        .collect();
    Ok(syntax.join_union(parts))
}

/// Union key built from the parameters declared by [`union_key_params`].
pub fn union_key_expr_from_params(
    ctx: &GenContext<'_>,
    syntax: &impl KeySyntax,
    table: &TableDef,
) -> CodegenResult<String> {
    let parts = checked_indices(ctx, table)?
        .iter()
        .map(|index| {
            let name = key_field_name(ctx, syntax, index);
            syntax.union_part(&name, index.ty.kind == TypeKind::String)
        })
        .collect();
    Ok(syntax.join_union(parts))
}

/// Typed parameter list, one parameter per index field in declaration order.
pub fn union_key_params<S>(ctx: &GenContext<'_>, syntax: &S, table: &TableDef) -> CodegenResult<String>
where
    S: KeySyntax + FragmentVisitor,
{
    let params: Vec<String> = checked_indices(ctx, table)?
        .iter()
        .map(|index| {
            let ty = syntax.declare_type(&index.ty);
            syntax.parameter(&ty, &key_field_name(ctx, syntax, index))
        })
        .collect();
    Ok(params.join(", "))
}

pub fn union_key_param_names(
    ctx: &GenContext<'_>,
    syntax: &impl KeySyntax,
    table: &TableDef,
) -> CodegenResult<String> {
    let names: Vec<String> = checked_indices(ctx, table)?
        .iter()
        .map(|index| key_field_name(ctx, syntax, index))
        .collect();
    Ok(names.join(", "))
}

/// Key expression for row `var`, union or single as the table requires.
pub fn key_expr(
    ctx: &GenContext<'_>,
    syntax: &impl KeySyntax,
    table: &TableDef,
    var: &str,
) -> CodegenResult<String> {
    if is_union_key(table) {
        union_key_expr(ctx, syntax, table, var)
    } else {
        single_key_expr(ctx, syntax, table, var)
    }
}

/// Parameters of a lookup accessor.
pub fn lookup_params<S>(ctx: &GenContext<'_>, syntax: &S, table: &TableDef) -> CodegenResult<String>
where
    S: KeySyntax + FragmentVisitor,
{
    if is_union_key(table) {
        union_key_params(ctx, syntax, table)
    } else {
        single_key_param(ctx, syntax, table)
    }
}

/// Key expression over the parameters of [`lookup_params`].
pub fn lookup_key_expr(
    ctx: &GenContext<'_>,
    syntax: &impl KeySyntax,
    table: &TableDef,
) -> CodegenResult<String> {
    if is_union_key(table) {
        union_key_expr_from_params(ctx, syntax, table)
    } else {
        single_key_expr_from_param(ctx, syntax, table)
    }
}

/// Key type of the map backing `table`: the string type for union keys,
/// the native type for int, long, string and enum keys, else the string type.
pub fn map_key_type<S>(ctx: &GenContext<'_>, syntax: &S, table: &TableDef) -> CodegenResult<String>
where
    S: KeySyntax + FragmentVisitor,
{
    checked_indices(ctx, table)?;
    if is_union_key(table) {
        return Ok(syntax.string_type().to_string());
    }
    Ok(match table.key_type.kind {
        TypeKind::Int | TypeKind::Long { .. } | TypeKind::String | TypeKind::Enum(_) => {
            syntax.underlying_declare_type(&table.key_type)
        }
        _ => syntax.string_type().to_string(),
    })
}
