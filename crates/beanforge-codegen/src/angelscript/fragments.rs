//! AngelScript (Unreal) fragments over `TSharedPtr<FJsonObject>` documents.

use crate::context::GenContext;
use crate::fragments::{FragmentVisitor, default_enum_item};
use crate::keys::KeySyntax;
use crate::literal::LiteralSyntax;
use beanforge_core::{BeanDef, EnumDef, NameRole, TypeKind, TypeNode};

pub struct AngelScriptFragments<'a> {
    ctx: &'a GenContext<'a>,
}

impl<'a> AngelScriptFragments<'a> {
    pub fn new(ctx: &'a GenContext<'a>) -> Self {
        Self { ctx }
    }

    /// Mapped name, else the formatted enum name.
    pub fn enum_type_name(&self, def: &EnumDef) -> String {
        match self.ctx.enum_mapper(def).and_then(|m| m.type_name()) {
            Some(name) => name.to_string(),
            None => self.ctx.format(&def.name, NameRole::Type),
        }
    }

    /// Mapped name, else the formatted bean name. Value types carry an `F` prefix.
    pub fn bean_type_name(&self, bean: &BeanDef) -> String {
        let name = match self.ctx.bean_mapper(bean).and_then(|m| m.type_name()) {
            Some(name) => name.to_string(),
            None => self.ctx.format(&bean.name, NameRole::Type),
        };
        if bean.is_value_type && !name.starts_with('F') {
            format!("F{name}")
        } else {
            name
        }
    }

    /// Name of the generated function reading one `bean` from a JSON object.
    pub fn deserializer_name(&self, bean: &BeanDef) -> String {
        self.ctx.format(&format!("Deserialize{}", bean.name), NameRole::Method)
    }

    pub fn enum_item_name(&self, item: &str) -> String {
        self.ctx.format(item, NameRole::EnumItem)
    }

    /// Statements reading a bean field `json_field` of `json_var` into `field`.
    pub fn deserialize_field(&self, field: &str, json_var: &str, json_field: &str, node: &TypeNode) -> String {
        let source = format!("{json_var}->GetObjectField(\"{json_field}\")");
        self.deserialize(field, &source, node, 0)
    }

    fn read_sequence(&self, field: &str, source: &str, elem: &TypeNode, depth: usize) -> String {
        let arr = format!("__arr{depth}");
        let index = format!("__index{depth}");
        let json = format!("__json{depth}");
        let v = format!("__v{depth}");
        format!(
            "{{ TArray<TSharedPtr<FJsonValue>> {arr} = {source}->GetArrayField(\"value\"); \
             {field}.Empty(); {field}.Reserve({arr}.Num()); \
             for (int {index} = 0; {index} < {arr}.Num(); {index}++) {{ \
             TSharedPtr<FJsonObject> {json} = {arr}[{index}]->AsObject(); \
             {elem_ty} {v}; {read} {field}.Add({v}); }} }}",
            elem_ty = self.declare_type(elem),
            read = self.deserialize(&v, &json, elem, depth + 1),
        )
    }

    fn read_map(&self, field: &str, source: &str, key: &TypeNode, value: &TypeNode, depth: usize) -> String {
        let arr = format!("__arr{depth}");
        let index = format!("__index{depth}");
        let pair = format!("__pair{depth}");
        let k = format!("_k{depth}");
        let v = format!("_v{depth}");
        format!(
            "{{ TArray<TSharedPtr<FJsonValue>> {arr} = {source}->GetArrayField(\"value\"); \
             {field}.Empty(); {field}.Reserve({arr}.Num()); \
             for (int {index} = 0; {index} < {arr}.Num(); {index}++) {{ \
             TSharedPtr<FJsonObject> {pair} = {arr}[{index}]->AsObject(); \
             {key_ty} {k}; {read_key} {value_ty} {v}; {read_value} {field}.Add({k}, {v}); }} }}",
            key_ty = self.declare_type(key),
            read_key = self.deserialize(&k, &format!("{pair}->GetObjectField(\"key\")"), key, depth + 1),
            value_ty = self.declare_type(value),
            read_value = self.deserialize(&v, &format!("{pair}->GetObjectField(\"value\")"), value, depth + 1),
        )
    }
}

impl FragmentVisitor for AngelScriptFragments<'_> {
    fn underlying_declare_type(&self, node: &TypeNode) -> String {
        match &node.kind {
            TypeKind::Bool => "bool".to_string(),
            TypeKind::Byte => "int8".to_string(),
            TypeKind::Short => "int16".to_string(),
            TypeKind::Int => "int32".to_string(),
            TypeKind::Long { .. } | TypeKind::DateTime => "int64".to_string(),
            TypeKind::Float => "float".to_string(),
            TypeKind::Double => "double".to_string(),
            TypeKind::String => "FString".to_string(),
            TypeKind::Enum(id) => self.enum_type_name(self.ctx.schema.enum_def(*id)),
            TypeKind::Bean(id) => self.bean_type_name(self.ctx.schema.bean(*id)),
            TypeKind::Array(elem) | TypeKind::List(elem) => {
                format!("TArray<{}>", self.underlying_declare_type(elem))
            }
            TypeKind::Set(elem) => format!("TSet<{}>", self.underlying_declare_type(elem)),
            TypeKind::Map(key, value) => format!(
                "TMap<{}, {}>",
                self.underlying_declare_type(key),
                self.underlying_declare_type(value)
            ),
        }
    }

    fn default_value(&self, node: &TypeNode) -> String {
        match &node.kind {
            TypeKind::Bool => "false".to_string(),
            TypeKind::Byte
            | TypeKind::Short
            | TypeKind::Int
            | TypeKind::Long { .. }
            | TypeKind::DateTime => "0".to_string(),
            TypeKind::Float => "0.0f".to_string(),
            TypeKind::Double => "0.0".to_string(),
            TypeKind::String => "\"\"".to_string(),
            TypeKind::Enum(id) => {
                let def = self.ctx.schema.enum_def(*id);
                self.enum_reference(def, default_enum_item(def))
            }
            TypeKind::Bean(id) => {
                let bean = self.ctx.schema.bean(*id);
                if bean.is_value_type {
                    format!("{}()", self.bean_type_name(bean))
                } else {
                    "null".to_string()
                }
            }
            TypeKind::Array(_) | TypeKind::List(_) | TypeKind::Set(_) | TypeKind::Map(_, _) => {
                String::new()
            }
        }
    }

    fn deserialize(&self, field: &str, source: &str, node: &TypeNode, depth: usize) -> String {
        match &node.kind {
            TypeKind::Bool => format!("{field} = {source}->GetBoolField(\"value\");"),
            TypeKind::Byte | TypeKind::Short | TypeKind::Int => {
                format!("{field} = {source}->GetIntegerField(\"value\");")
            }
            TypeKind::Long { .. } | TypeKind::Float | TypeKind::Double | TypeKind::DateTime => {
                format!("{field} = {source}->GetNumberField(\"value\");")
            }
            TypeKind::String => format!("{field} = {source}->GetStringField(\"value\");"),
            TypeKind::Enum(id) => format!(
                "{field} = ({}){source}->GetIntegerField(\"value\");",
                self.enum_type_name(self.ctx.schema.enum_def(*id))
            ),
            TypeKind::Bean(id) => {
                let bean = self.ctx.schema.bean(*id);
                let read = format!("{}({source})", self.deserializer_name(bean));
                match self.ctx.bean_mapper(bean).and_then(|m| m.constructor()) {
                    Some(constructor) => format!("{field} = {constructor}({read});"),
                    None => format!("{field} = {read};"),
                }
            }
            TypeKind::Array(elem) | TypeKind::List(elem) | TypeKind::Set(elem) => {
                self.read_sequence(field, source, elem, depth)
            }
            TypeKind::Map(key, value) => self.read_map(field, source, key, value, depth),
        }
    }
}

impl LiteralSyntax for AngelScriptFragments<'_> {
    fn float_marker(&self) -> &'static str {
        "f"
    }

    fn enum_reference(&self, def: &EnumDef, item: &str) -> String {
        format!("{}::{}", self.enum_type_name(def), self.enum_item_name(item))
    }

    fn vector_constructor(&self, bean: &BeanDef, _shape: &str, components: &[&str]) -> String {
        format!("{}({})", self.bean_type_name(bean), components.join(", "))
    }
}

impl KeySyntax for AngelScriptFragments<'_> {
    fn key_role(&self) -> NameRole {
        NameRole::Property
    }

    fn string_type(&self) -> &'static str {
        "FString"
    }

    fn interpolate(&self, expr: &str) -> String {
        format!("f\"{{{expr}}}\"")
    }

    fn union_part(&self, expr: &str, is_string: bool) -> String {
        if is_string {
            expr.to_string()
        } else {
            self.interpolate(expr)
        }
    }

    fn join_union(&self, parts: Vec<String>) -> String {
        parts.join(" + \"_\" + ")
    }

    fn parameter(&self, ty: &str, name: &str) -> String {
        format!("{ty} {name}")
    }
}
