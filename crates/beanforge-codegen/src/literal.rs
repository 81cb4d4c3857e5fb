//! Author-supplied default literals.
//!
//! A field may carry a default literal in the schema (`"true"`, `"3"`,
//! `"1,2,3"`, ...). [`parse_default_literal`] turns it into target syntax,
//! and [`field_initializer`] falls back to the
//! [`DefaultValue`](crate::FragmentVisitor::default_value) fragment when the
//! literal is absent or cannot be expressed.
//!
//! | Kind | Literal | Result |
//! |------|---------|--------|
//! | bool | `true` (any case) or `1` | true, otherwise false |
//! | integral | anything | unchanged |
//! | float | `1`, `1.5f`, `1e3` | `1.0`, `1.5`, `1e3` + float marker |
//! | double | `1` | `1.0` |
//! | string | `abc` | `"abc"` (no escaping) |
//! | enum | `2` or `Red` | item with value 2, or item `Red` |
//! | vector-shaped value bean | `1,2,3` | positional constructor |
//!
//! Anything else, including a vector literal with the wrong component
//! count, yields an empty string.

use crate::context::GenContext;
use crate::fragments::FragmentVisitor;
use beanforge_core::{BeanDef, EnumDef, FieldDef, TypeKind, TypeNode};

/// Known arithmetic value types and their component counts.
const VECTOR_SHAPES: &[(&str, usize)] = &[
    ("Vector", 3),
    ("Rotator", 3),
    ("Vector4", 4),
    ("LinearColor", 4),
    ("Quat", 4),
];

/// Target spelling of literal values.
pub trait LiteralSyntax {
    /// Suffix distinguishing a float literal from a double (may be empty).
    fn float_marker(&self) -> &'static str;

    /// Spelling of an integer literal for a 64-bit field.
    fn long_literal(&self, literal: &str, _is_big: bool) -> String {
        literal.to_string()
    }

    fn string_literal(&self, text: &str) -> String {
        format!("\"{text}\"")
    }

    /// Qualified reference to `item` of `def`.
    fn enum_reference(&self, def: &EnumDef, item: &str) -> String;

    /// Positional constructor call building `bean`, a known vector shape,
    /// or an empty string when the target cannot construct it positionally.
    fn vector_constructor(&self, bean: &BeanDef, shape: &str, components: &[&str]) -> String;
}

/// Target-syntax literal for `literal` on a field of type `node`, or an
/// empty string when the literal cannot be expressed.
pub fn parse_default_literal(
    ctx: &GenContext<'_>,
    syntax: &impl LiteralSyntax,
    literal: &str,
    node: &TypeNode,
) -> String {
    match &node.kind {
        TypeKind::Bool => {
            let truthy = literal.eq_ignore_ascii_case("true") || literal == "1";
            let value = if truthy { "true" } else { "false" };
            value.to_string()
        }
        TypeKind::Byte | TypeKind::Short | TypeKind::Int => literal.to_string(),
        TypeKind::Long { is_big } => syntax.long_literal(literal, *is_big),
        TypeKind::Float => format!("{}{}", with_fraction(literal.trim()), syntax.float_marker()),
        TypeKind::Double => with_fraction(literal.trim()),
        TypeKind::String => syntax.string_literal(literal),
        TypeKind::Enum(id) => {
            let def = ctx.schema.enum_def(*id);
            let literal = literal.trim();
            let item = literal
                .parse::<i64>()
                .ok()
                .and_then(|value| def.item_by_value(value))
                .map_or(literal, |item| item.name.as_str());
            syntax.enum_reference(def, item)
        }
        TypeKind::Bean(id) => {
            let bean = ctx.schema.bean(*id);
            if !bean.is_value_type {
                return String::new();
            }
            let effective = ctx.native_bean_name(bean).unwrap_or(bean.name.as_str());
            vector_literal(syntax, bean, effective, literal)
        }
        TypeKind::DateTime
        | TypeKind::Array(_)
        | TypeKind::List(_)
        | TypeKind::Set(_)
        | TypeKind::Map(_, _) => String::new(),
    }
}

/// Initializer for `field`: its parsed default literal when that is
/// non-empty, else the target's default value for the field type.
pub fn field_initializer<V>(ctx: &GenContext<'_>, visitor: &V, field: &FieldDef) -> String
where
    V: FragmentVisitor + LiteralSyntax,
{
    field
        .default_literal
        .as_deref()
        .map(|literal| parse_default_literal(ctx, visitor, literal, &field.ty))
        .filter(|parsed| !parsed.is_empty())
        .unwrap_or_else(|| visitor.default_value(&field.ty))
}

/// Drop any `f`/`F` suffix and make sure the number reads as floating
/// point. Exponent forms already do.
fn with_fraction(literal: &str) -> String {
    let number = literal.trim_end_matches(['f', 'F']);
    if number.contains(['.', 'e', 'E']) {
        number.to_string()
    } else {
        format!("{number}.0")
    }
}

/// Strip any dotted prefix and a leading `F` from a native type name.
fn shape_name(effective: &str) -> &str {
    let last = effective.rsplit('.').next().unwrap_or(effective);
    last.strip_prefix('F').unwrap_or(last)
}

fn vector_literal(syntax: &impl LiteralSyntax, bean: &BeanDef, effective: &str, literal: &str) -> String {
    let shape = shape_name(effective);
    let Some(&(name, arity)) = VECTOR_SHAPES.iter().find(|(name, _)| *name == shape) else {
        tracing::warn!(type_name = effective, literal, "default literal on unsupported value type ignored");
        return String::new();
    };
    let components: Vec<&str> = literal.split(',').map(str::trim).collect();
    if components.len() != arity {
        tracing::warn!(
            type_name = effective,
            literal,
            expected = arity,
            found = components.len(),
            "default literal component count mismatch, using type default"
        );
        return String::new();
    }
    syntax.vector_constructor(bean, name, &components)
}
