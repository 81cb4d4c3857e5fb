//! TypeScript fragments over plain JSON values (`any`).

use super::ue_file_stem;
use crate::context::GenContext;
use crate::fragments::{FragmentVisitor, default_enum_item};
use crate::keys::KeySyntax;
use crate::literal::{LiteralSyntax, parse_default_literal};
use beanforge_core::{BeanDef, EnumDef, FieldDef, NameRole, TypeKind, TypeNode};

/// How enum and bean names are spelled in references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsNaming<'n> {
    /// Bare type names; every file imports the names it uses.
    Plain,
    /// Namespaced types live in `export namespace <Stem>` blocks and are
    /// referenced as `Stem.Name` from anywhere but their own namespace.
    Qualified { current: Option<&'n str> },
}

pub struct TsFragments<'a> {
    ctx: &'a GenContext<'a>,
    naming: TsNaming<'a>,
}

impl<'a> TsFragments<'a> {
    pub fn new(ctx: &'a GenContext<'a>, naming: TsNaming<'a>) -> Self {
        Self { ctx, naming }
    }

    fn type_ref(&self, namespace: &str, name: &str) -> String {
        let name = self.ctx.format(name, NameRole::Type);
        match self.naming {
            TsNaming::Qualified { current } if !namespace.is_empty() && current != Some(namespace) => {
                format!("{}.{name}", ue_file_stem(self.ctx, namespace))
            }
            _ => name,
        }
    }

    /// Mapped name, else the (possibly qualified) enum name.
    pub fn enum_ref(&self, def: &EnumDef) -> String {
        match self.ctx.native_enum_name(def) {
            Some(native) => native.to_string(),
            None => self.type_ref(&def.namespace, &def.name),
        }
    }

    /// Mapped name, else the (possibly qualified) bean name.
    pub fn bean_ref(&self, bean: &BeanDef) -> String {
        match self.ctx.native_bean_name(bean) {
            Some(native) => native.to_string(),
            None => self.type_ref(&bean.namespace, &bean.name),
        }
    }

    /// Self-initializing value for a container field.
    pub fn container_initializer(&self, node: &TypeNode) -> Option<&'static str> {
        match node.kind {
            TypeKind::Array(_) | TypeKind::List(_) => Some("[]"),
            TypeKind::Set(_) => Some("new Set()"),
            TypeKind::Map(_, _) => Some("new Map()"),
            _ => None,
        }
    }

    /// Class field initializer. TypeScript fields always need one, so
    /// nullable fields start `undefined` and containers start empty.
    pub fn field_initializer(&self, field: &FieldDef) -> String {
        let parsed = field
            .default_literal
            .as_deref()
            .map(|literal| parse_default_literal(self.ctx, self, literal, &field.ty))
            .filter(|parsed| !parsed.is_empty());
        if let Some(parsed) = parsed {
            return parsed;
        }
        if field.ty.nullable {
            return "undefined".to_string();
        }
        match self.container_initializer(&field.ty) {
            Some(init) => init.to_string(),
            None => self.default_value(&field.ty),
        }
    }

    /// Statements reading `json_var[json_field]` into `field`. Nullable
    /// fields are skipped when absent from the document.
    pub fn deserialize_field(&self, field: &str, json_var: &str, json_field: &str, node: &TypeNode) -> String {
        let source = format!("{json_var}[\"{json_field}\"]");
        let read = self.deserialize(field, &source, node, 0);
        if node.nullable {
            format!("if ({source} != undefined) {{ {read} }}")
        } else {
            read
        }
    }

    fn read_sequence(
        &self,
        field: &str,
        source: &str,
        elem: &TypeNode,
        depth: usize,
        init: &str,
        add: &str,
    ) -> String {
        let arr = format!("__arr{depth}");
        let json = format!("__json{depth}");
        let v = format!("__v{depth}");
        format!(
            "{{ const {arr} = {source}[\"value\"] as any[]; {field} = {init}; \
             for (const {json} of {arr}) {{ let {v}: {elem_ty}; {read} {field}.{add}({v}); }} }}",
            elem_ty = self.underlying_declare_type(elem),
            read = self.deserialize(&v, &json, elem, depth + 1),
        )
    }

    fn read_map(&self, field: &str, source: &str, key: &TypeNode, value: &TypeNode, depth: usize) -> String {
        let arr = format!("__arr{depth}");
        let pair = format!("__pair{depth}");
        let k = format!("_k{depth}");
        let v = format!("_v{depth}");
        format!(
            "{{ const {arr} = {source}[\"value\"] as any[]; {field} = new Map(); \
             for (const {pair} of {arr}) {{ let {k}: {key_ty}; {read_key} \
             let {v}: {value_ty}; {read_value} {field}.set({k}, {v}); }} }}",
            key_ty = self.underlying_declare_type(key),
            read_key = self.deserialize(&k, &format!("{pair}[\"key\"]"), key, depth + 1),
            value_ty = self.underlying_declare_type(value),
            read_value = self.deserialize(&v, &format!("{pair}[\"value\"]"), value, depth + 1),
        )
    }
}

impl FragmentVisitor for TsFragments<'_> {
    fn underlying_declare_type(&self, node: &TypeNode) -> String {
        match &node.kind {
            TypeKind::Bool => "boolean".to_string(),
            TypeKind::Long { is_big: true } => "bigint".to_string(),
            TypeKind::Byte
            | TypeKind::Short
            | TypeKind::Int
            | TypeKind::Long { .. }
            | TypeKind::Float
            | TypeKind::Double
            | TypeKind::DateTime => "number".to_string(),
            TypeKind::String => "string".to_string(),
            TypeKind::Enum(id) => self.enum_ref(self.ctx.schema.enum_def(*id)),
            TypeKind::Bean(id) => self.bean_ref(self.ctx.schema.bean(*id)),
            TypeKind::Array(elem) | TypeKind::List(elem) => {
                format!("{}[]", self.underlying_declare_type(elem))
            }
            TypeKind::Set(elem) => format!("Set<{}>", self.underlying_declare_type(elem)),
            TypeKind::Map(key, value) => format!(
                "Map<{}, {}>",
                self.underlying_declare_type(key),
                self.underlying_declare_type(value)
            ),
        }
    }

    fn nullable_type(&self, underlying: String) -> String {
        format!("{underlying} | undefined")
    }

    fn default_value(&self, node: &TypeNode) -> String {
        match &node.kind {
            TypeKind::Bool => "false".to_string(),
            TypeKind::Long { is_big: true } => "0n".to_string(),
            TypeKind::Byte
            | TypeKind::Short
            | TypeKind::Int
            | TypeKind::Long { .. }
            | TypeKind::Float
            | TypeKind::Double
            | TypeKind::DateTime => "0".to_string(),
            TypeKind::String => "\"\"".to_string(),
            TypeKind::Enum(id) => {
                let def = self.ctx.schema.enum_def(*id);
                self.enum_reference(def, default_enum_item(def))
            }
            TypeKind::Bean(id) => {
                let bean = self.ctx.schema.bean(*id);
                if bean.is_value_type {
                    format!("new {}()", self.bean_ref(bean))
                } else {
                    "null!".to_string()
                }
            }
            TypeKind::Array(_) | TypeKind::List(_) | TypeKind::Set(_) | TypeKind::Map(_, _) => {
                String::new()
            }
        }
    }

    fn deserialize(&self, field: &str, source: &str, node: &TypeNode, depth: usize) -> String {
        match &node.kind {
            TypeKind::Long { is_big: true } => format!("{field} = BigInt({source}[\"value\"]);"),
            TypeKind::Bool
            | TypeKind::Byte
            | TypeKind::Short
            | TypeKind::Int
            | TypeKind::Long { .. }
            | TypeKind::Float
            | TypeKind::Double
            | TypeKind::String
            | TypeKind::DateTime
            | TypeKind::Enum(_) => format!(
                "{field} = {source}[\"value\"] as {};",
                self.underlying_declare_type(node)
            ),
            TypeKind::Bean(id) => {
                let bean = self.ctx.schema.bean(*id);
                let constructor = self.ctx.bean_mapper(bean).and_then(|m| m.constructor());
                // Native types have no generated reader; the constructor gets the raw node.
                let read = match (self.ctx.native_bean_name(bean), constructor) {
                    (Some(native), None) => format!("{source} as {native}"),
                    (Some(_), Some(_)) => source.to_string(),
                    (None, _) => format!("{}.deserialize({source})", self.bean_ref(bean)),
                };
                match constructor {
                    Some(constructor) => format!("{field} = {constructor}({read});"),
                    None => format!("{field} = {read};"),
                }
            }
            TypeKind::Array(elem) | TypeKind::List(elem) => {
                self.read_sequence(field, source, elem, depth, "[]", "push")
            }
            TypeKind::Set(elem) => self.read_sequence(field, source, elem, depth, "new Set()", "add"),
            TypeKind::Map(key, value) => self.read_map(field, source, key, value, depth),
        }
    }
}

impl LiteralSyntax for TsFragments<'_> {
    fn float_marker(&self) -> &'static str {
        ""
    }

    fn long_literal(&self, literal: &str, is_big: bool) -> String {
        if is_big && !literal.ends_with('n') {
            format!("{literal}n")
        } else {
            literal.to_string()
        }
    }

    fn enum_reference(&self, def: &EnumDef, item: &str) -> String {
        format!("{}.{}", self.enum_ref(def), self.ctx.format(item, NameRole::EnumItem))
    }

    /// Only native types take positional arguments; generated classes don't.
    fn vector_constructor(&self, bean: &BeanDef, _shape: &str, components: &[&str]) -> String {
        match self.ctx.native_bean_name(bean) {
            Some(native) => format!("new {native}({})", components.join(", ")),
            None => String::new(),
        }
    }
}

impl KeySyntax for TsFragments<'_> {
    fn key_role(&self) -> NameRole {
        NameRole::Field
    }

    fn string_type(&self) -> &'static str {
        "string"
    }

    fn interpolate(&self, expr: &str) -> String {
        format!("`${{{expr}}}`")
    }

    fn union_part(&self, expr: &str, _is_string: bool) -> String {
        format!("${{{expr}}}")
    }

    fn join_union(&self, parts: Vec<String>) -> String {
        format!("`{}`", parts.join("_"))
    }

    fn parameter(&self, ty: &str, name: &str) -> String {
        format!("{name}: {ty}")
    }
}
