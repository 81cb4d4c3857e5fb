//! Schema documents and their resolution into a [`Schema`].
//!
//! A [`SchemaFile`] is the serde view of a JSON or TOML document listing
//! enums, beans and tables. [`SchemaFile::resolve`] turns names into arena
//! handles in two passes: every enum and bean first receives an id, then
//! field types, parents and table indices are resolved against those ids.
//!
//! # Type expressions
//!
//! | Expression | Meaning |
//! |------------|---------|
//! | `int`, `long`, `string`, ... | scalar |
//! | `bigint` | `long` rendered with the target's big integer type |
//! | `list,T` / `array,T` / `set,T` | container of `T` |
//! | `map,K,V` | map from `K` to `V` (`V` may itself contain commas) |
//! | `Item` / `game.Item` | enum or bean, relative or fully qualified |
//! | `T?` | nullable `T` |

use crate::error::{SchemaError, SchemaResult};
use crate::types::{
    BeanDef, BeanId, EnumDef, EnumId, EnumItem, FieldDef, IndexDef, Schema, SchemaBuilder,
    TableDef, TypeKind, TypeMapper, TypeNode,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// A schema document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    pub enums: Vec<EnumDecl>,
    #[serde(default)]
    pub beans: Vec<BeanDecl>,
    #[serde(default)]
    pub tables: Vec<TableDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub items: Vec<EnumItemDecl>,
    #[serde(default)]
    pub type_mappers: Vec<TypeMapperDecl>,
}

/// An enum item. A missing value continues from the previous item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumItemDecl {
    pub name: String,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeanDecl {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub value_type: bool,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub type_mappers: Vec<TypeMapperDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A table. `index` is `a` (single), `a+b` (union key) or `a,b`
/// (independent indices, keyed by the first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDecl {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    pub value: String,
    pub index: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeMapperDecl {
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub code_targets: Vec<String>,
    #[serde(default)]
    pub options: IndexMap<String, String>,
}

impl From<&TypeMapperDecl> for TypeMapper {
    fn from(decl: &TypeMapperDecl) -> Self {
        TypeMapper {
            targets: decl.targets.clone(),
            code_targets: decl.code_targets.clone(),
            options: decl.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum NamedType {
    Enum(EnumId),
    Bean(BeanId),
}

impl SchemaFile {
    pub fn from_json_str(text: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml_str(text: &str) -> SchemaResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a schema document, choosing the format by extension (`.toml`
    /// or JSON otherwise).
    pub fn from_path(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SchemaError::Parse(format!("{}: {e}", path.display())))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    /// Resolve names and build the immutable [`Schema`].
    pub fn resolve(&self) -> SchemaResult<Schema> {
        let mut builder = Schema::builder();
        let mut names: HashMap<String, NamedType> = HashMap::new();

        for decl in &self.enums {
            let id = builder.add_enum(enum_def(decl));
            register(&mut names, &decl.namespace, &decl.name, NamedType::Enum(id))?;
        }

        let mut bean_ids = Vec::with_capacity(self.beans.len());
        for decl in &self.beans {
            let mut def = BeanDef::new(&decl.name, &decl.namespace);
            def.is_value_type = decl.value_type;
            def.comment = decl.comment.clone();
            def.type_mappers = decl.type_mappers.iter().map(TypeMapper::from).collect();
            let id = builder.add_bean(def);
            register(&mut names, &decl.namespace, &decl.name, NamedType::Bean(id))?;
            bean_ids.push(id);
        }

        for (decl, &id) in self.beans.iter().zip(&bean_ids) {
            let parent = match &decl.parent {
                Some(parent) => match lookup(&names, &decl.namespace, parent) {
                    Some(NamedType::Bean(parent_id)) => Some(parent_id),
                    _ => {
                        return Err(SchemaError::UnknownParent {
                            bean: qualified(&decl.namespace, &decl.name),
                            parent: parent.clone(),
                        });
                    }
                },
                None => None,
            };
            let mut fields = Vec::with_capacity(decl.fields.len());
            for field in &decl.fields {
                let context = format!("{}.{}", qualified(&decl.namespace, &decl.name), field.name);
                let ty = parse_type_expr(&field.ty, &decl.namespace, &names, &context)?;
                let mut def = FieldDef::new(&field.name, ty);
                def.default_literal = field.default.clone();
                def.comment = field.comment.clone();
                fields.push(def);
            }
            if let Some(bean) = builder.bean_mut(id) {
                bean.parent = parent;
                bean.fields = fields;
            }
        }

        for decl in &self.tables {
            let table = table_def(decl, &names, &builder)?;
            builder.add_table(table);
        }

        builder.build()
    }
}

fn enum_def(decl: &EnumDecl) -> EnumDef {
    let mut def = EnumDef::new(&decl.name, &decl.namespace);
    def.comment = decl.comment.clone();
    def.type_mappers = decl.type_mappers.iter().map(TypeMapper::from).collect();
    let mut next = 0i64;
    for item in &decl.items {
        let value = item.value.unwrap_or(next);
        next = value.wrapping_add(1);
        def.items.push(EnumItem {
            name: item.name.clone(),
            value,
            comment: item.comment.clone(),
        });
    }
    def
}

fn qualified(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

fn register(
    names: &mut HashMap<String, NamedType>,
    namespace: &str,
    name: &str,
    named: NamedType,
) -> SchemaResult<()> {
    let full = qualified(namespace, name);
    if names.insert(full.clone(), named).is_some() {
        return Err(SchemaError::DuplicateType(full));
    }
    Ok(())
}

fn lookup(names: &HashMap<String, NamedType>, namespace: &str, name: &str) -> Option<NamedType> {
    names
        .get(name)
        .or_else(|| names.get(&qualified(namespace, name)))
        .copied()
}

/// Parse a type expression such as `map,int,list,game.Item?`.
fn parse_type_expr(
    expr: &str,
    namespace: &str,
    names: &HashMap<String, NamedType>,
    context: &str,
) -> SchemaResult<TypeNode> {
    let invalid = |reason: &str| SchemaError::InvalidTypeExpr {
        expr: expr.to_string(),
        reason: reason.to_string(),
    };

    let (head, rest) = match expr.split_once(',') {
        Some((head, rest)) => (head.trim(), Some(rest.trim())),
        None => (expr.trim(), None),
    };
    let (head, nullable) = match head.strip_suffix('?') {
        Some(head) => (head.trim_end(), true),
        None => (head, false),
    };
    if head.is_empty() {
        return Err(invalid("empty type name"));
    }

    let scalar = |kind: TypeKind| match rest {
        Some(_) => Err(invalid("scalar types take no arguments")),
        None => Ok(kind),
    };

    let kind = match head {
        "bool" => scalar(TypeKind::Bool)?,
        "byte" => scalar(TypeKind::Byte)?,
        "short" => scalar(TypeKind::Short)?,
        "int" => scalar(TypeKind::Int)?,
        "long" => scalar(TypeKind::Long { is_big: false })?,
        "bigint" => scalar(TypeKind::Long { is_big: true })?,
        "float" => scalar(TypeKind::Float)?,
        "double" => scalar(TypeKind::Double)?,
        "string" => scalar(TypeKind::String)?,
        "datetime" => scalar(TypeKind::DateTime)?,
        "array" | "list" | "set" => {
            let elem = rest.ok_or_else(|| invalid("missing element type"))?;
            let elem = Box::new(parse_type_expr(elem, namespace, names, context)?);
            match head {
                "array" => TypeKind::Array(elem),
                "list" => TypeKind::List(elem),
                _ => TypeKind::Set(elem),
            }
        }
        "map" => {
            let (key, value) = rest
                .and_then(|r| r.split_once(','))
                .ok_or_else(|| invalid("map needs key and value types"))?;
            TypeKind::Map(
                Box::new(parse_type_expr(key, namespace, names, context)?),
                Box::new(parse_type_expr(value, namespace, names, context)?),
            )
        }
        name => {
            if rest.is_some() {
                return Err(invalid("named types take no arguments"));
            }
            match lookup(names, namespace, name) {
                Some(NamedType::Enum(id)) => TypeKind::Enum(id),
                Some(NamedType::Bean(id)) => TypeKind::Bean(id),
                None => {
                    return Err(SchemaError::UnknownType {
                        name: name.to_string(),
                        context: context.to_string(),
                    });
                }
            }
        }
    };

    let node = TypeNode::new(kind);
    Ok(if nullable { node.into_nullable() } else { node })
}

fn table_def(
    decl: &TableDecl,
    names: &HashMap<String, NamedType>,
    builder: &SchemaBuilder,
) -> SchemaResult<TableDef> {
    let full_name = qualified(&decl.namespace, &decl.name);
    let value = match lookup(names, &decl.namespace, &decl.value) {
        Some(NamedType::Bean(id)) => id,
        _ => {
            return Err(SchemaError::TableValueNotBean {
                table: full_name,
                value: decl.value.clone(),
            });
        }
    };

    let is_union = decl.index.contains('+');
    let separator = if is_union { '+' } else { ',' };
    let index_names: Vec<&str> = decl
        .index
        .split(separator)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    if index_names.is_empty() {
        return Err(SchemaError::MissingIndex(full_name));
    }

    let mut indices = Vec::with_capacity(index_names.len());
    for name in index_names {
        let ty = find_field_type(builder, value, name)?.ok_or_else(|| {
            SchemaError::MissingIndexField {
                table: full_name.clone(),
                field: name.to_string(),
                bean: decl.value.clone(),
            }
        })?;
        indices.push(IndexDef::new(name, ty));
    }

    let table = if is_union {
        TableDef::union(&decl.name, value, indices)
    } else {
        let mut rest = indices.into_iter();
        let mut table = match rest.next() {
            Some(first) => TableDef::new(&decl.name, value, first),
            None => return Err(SchemaError::MissingIndex(full_name)),
        };
        table.indices.extend(rest);
        table
    };
    let mut table = table.in_namespace(&decl.namespace);
    table.comment = decl.comment.clone();
    Ok(table)
}

/// Type of `field` in `bean` or any of its ancestors.
fn find_field_type(
    builder: &SchemaBuilder,
    bean: BeanId,
    field: &str,
) -> SchemaResult<Option<TypeNode>> {
    let mut visited = HashSet::new();
    let mut current = Some(bean);
    while let Some(id) = current {
        let Some(def) = builder.bean(id) else {
            return Ok(None);
        };
        if !visited.insert(id) {
            return Err(SchemaError::InheritanceCycle(def.full_name()));
        }
        if let Some(found) = def.fields.iter().find(|f| f.name == field) {
            return Ok(Some(found.ty.clone()));
        }
        current = def.parent;
    }
    Ok(None)
}
