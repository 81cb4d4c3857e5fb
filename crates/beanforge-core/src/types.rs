//! The read-only type model every emitter walks.
//!
//! A [`Schema`] is an arena of enums, beans and tables. Types refer to
//! enums and beans through [`EnumId`] and [`BeanId`] handles, so a bean can
//! contain itself (through a container) without any shared ownership.
//!
//! # Structure
//!
//! - [`TypeNode`]: one node of the type algebra plus its nullability
//! - [`TypeKind`]: the closed set of type cases
//! - [`EnumDef`], [`BeanDef`], [`TableDef`]: named definitions
//! - [`TypeMapper`]: per-target override for a definition's representation
//!
//! The model is built once (see [`SchemaBuilder`] and [`crate::SchemaFile`])
//! and never mutated afterwards.

use crate::error::{SchemaError, SchemaResult};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Handle to an enum stored in a [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumId(usize);

/// Handle to a bean stored in a [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BeanId(usize);

/// The closed set of schema type cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Bool,
    Byte,
    Short,
    Int,
    /// 64-bit integer. `is_big` asks targets with a distinct arbitrary
    /// precision type (TypeScript `bigint`) to use it.
    Long {
        is_big: bool,
    },
    Float,
    Double,
    String,
    DateTime,
    Enum(EnumId),
    Bean(BeanId),
    Array(Box<TypeNode>),
    List(Box<TypeNode>),
    Set(Box<TypeNode>),
    Map(Box<TypeNode>, Box<TypeNode>),
}

/// A type node: a [`TypeKind`] plus whether the value may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub nullable: bool,
}

impl TypeNode {
    /// A non-nullable node.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// The same node marked nullable.
    pub fn into_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn bool() -> Self {
        Self::new(TypeKind::Bool)
    }

    pub fn int() -> Self {
        Self::new(TypeKind::Int)
    }

    pub fn long() -> Self {
        Self::new(TypeKind::Long { is_big: false })
    }

    pub fn string() -> Self {
        Self::new(TypeKind::String)
    }

    pub fn enum_ref(id: EnumId) -> Self {
        Self::new(TypeKind::Enum(id))
    }

    pub fn bean(id: BeanId) -> Self {
        Self::new(TypeKind::Bean(id))
    }

    pub fn array(elem: TypeNode) -> Self {
        Self::new(TypeKind::Array(Box::new(elem)))
    }

    pub fn list(elem: TypeNode) -> Self {
        Self::new(TypeKind::List(Box::new(elem)))
    }

    pub fn set(elem: TypeNode) -> Self {
        Self::new(TypeKind::Set(Box::new(elem)))
    }

    pub fn map(key: TypeNode, value: TypeNode) -> Self {
        Self::new(TypeKind::Map(Box::new(key), Box::new(value)))
    }

    /// Whether this node is one of the self-initializing containers.
    pub fn is_container(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Array(_) | TypeKind::List(_) | TypeKind::Set(_) | TypeKind::Map(_, _)
        )
    }

    /// Visit this node and every nested element/key/value node, outermost first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TypeNode)) {
        visit(self);
        match &self.kind {
            TypeKind::Array(elem) | TypeKind::List(elem) | TypeKind::Set(elem) => elem.walk(visit),
            TypeKind::Map(key, value) => {
                key.walk(visit);
                value.walk(visit);
            }
            _ => {}
        }
    }
}

/// Per-target override for an enum's or bean's generated representation.
///
/// A mapper applies when both the generation target (e.g. `client`) and the
/// code target (e.g. `angelscript-json`) are listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMapper {
    pub targets: Vec<String>,
    pub code_targets: Vec<String>,
    pub options: IndexMap<String, String>,
}

impl TypeMapper {
    pub fn new(
        targets: impl IntoIterator<Item = impl Into<String>>,
        code_targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            code_targets: code_targets.into_iter().map(Into::into).collect(),
            options: IndexMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn applies_to(&self, target: &str, code_target: &str) -> bool {
        self.targets.iter().any(|t| t == target) && self.code_targets.iter().any(|c| c == code_target)
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// The overriding type name: the `type` option, else the `name` option.
    pub fn type_name(&self) -> Option<&str> {
        self.option("type").or_else(|| self.option("name"))
    }

    /// Constructor wrapping a deserialized value, if the mapper supplies one.
    pub fn constructor(&self) -> Option<&str> {
        self.option("constructor").filter(|c| !c.is_empty())
    }
}

fn first_mapper<'a>(
    mappers: &'a [TypeMapper],
    target: &str,
    code_target: &str,
) -> Option<&'a TypeMapper> {
    mappers.iter().find(|m| m.applies_to(target, code_target))
}

fn full_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

/// A single enum item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumItem {
    pub name: String,
    pub value: i64,
    pub comment: Option<String>,
}

impl EnumItem {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            comment: None,
        }
    }
}

/// An enum definition. Items keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    pub namespace: String,
    pub items: Vec<EnumItem>,
    pub comment: Option<String>,
    pub type_mappers: Vec<TypeMapper>,
}

impl EnumDef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            items: Vec::new(),
            comment: None,
            type_mappers: Vec::new(),
        }
    }

    pub fn with_item(mut self, name: impl Into<String>, value: i64) -> Self {
        self.items.push(EnumItem::new(name, value));
        self
    }

    pub fn full_name(&self) -> String {
        full_name(&self.namespace, &self.name)
    }

    /// The item whose declared value equals `value`, first match wins.
    pub fn item_by_value(&self, value: i64) -> Option<&EnumItem> {
        self.items.iter().find(|item| item.value == value)
    }

    /// The item used when no default is given: an item named `None`
    /// (case-insensitive) if present, else the first declared item.
    pub fn default_item(&self) -> Option<&EnumItem> {
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case("none"))
            .or_else(|| self.items.first())
    }

    pub fn type_mapper(&self, target: &str, code_target: &str) -> Option<&TypeMapper> {
        first_mapper(&self.type_mappers, target, code_target)
    }
}

/// A bean field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeNode,
    /// Author supplied default literal, kept verbatim.
    pub default_literal: Option<String>,
    pub comment: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
            default_literal: None,
            comment: None,
        }
    }

    pub fn with_default(mut self, literal: impl Into<String>) -> Self {
        self.default_literal = Some(literal.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A structured record definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanDef {
    pub name: String,
    pub namespace: String,
    /// Struct-like (copied) rather than class-like (referenced) semantics.
    pub is_value_type: bool,
    pub fields: Vec<FieldDef>,
    pub parent: Option<BeanId>,
    pub comment: Option<String>,
    pub type_mappers: Vec<TypeMapper>,
}

impl BeanDef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            is_value_type: false,
            fields: Vec::new(),
            parent: None,
            comment: None,
            type_mappers: Vec::new(),
        }
    }

    pub fn value_type(mut self) -> Self {
        self.is_value_type = true;
        self
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_parent(mut self, parent: BeanId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_type_mapper(mut self, mapper: TypeMapper) -> Self {
        self.type_mappers.push(mapper);
        self
    }

    pub fn full_name(&self) -> String {
        full_name(&self.namespace, &self.name)
    }

    pub fn type_mapper(&self, target: &str, code_target: &str) -> Option<&TypeMapper> {
        first_mapper(&self.type_mappers, target, code_target)
    }
}

/// One indexed field of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    pub field: String,
    pub ty: TypeNode,
}

impl IndexDef {
    pub fn new(field: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            field: field.into(),
            ty,
        }
    }
}

/// A keyed collection of bean rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub name: String,
    pub namespace: String,
    pub value: BeanId,
    pub key_type: TypeNode,
    pub is_union_index: bool,
    pub indices: Vec<IndexDef>,
    pub comment: Option<String>,
}

impl TableDef {
    /// A single-key table keyed by `index`.
    pub fn new(name: impl Into<String>, value: BeanId, index: IndexDef) -> Self {
        Self {
            name: name.into(),
            namespace: String::new(),
            value,
            key_type: index.ty.clone(),
            is_union_index: false,
            indices: vec![index],
            comment: None,
        }
    }

    /// A table keyed by all of `indices` together.
    pub fn union(name: impl Into<String>, value: BeanId, indices: Vec<IndexDef>) -> Self {
        let key_type = indices
            .first()
            .map(|index| index.ty.clone())
            .unwrap_or_else(TypeNode::string);
        Self {
            name: name.into(),
            namespace: String::new(),
            value,
            key_type,
            is_union_index: true,
            indices,
            comment: None,
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn full_name(&self) -> String {
        full_name(&self.namespace, &self.name)
    }

    /// A union key needs the union flag and more than one index.
    pub fn is_union_key(&self) -> bool {
        self.is_union_index && self.indices.len() > 1
    }

    /// The index used for single keys: the first declared one.
    pub fn index_field(&self) -> Option<&IndexDef> {
        self.indices.first()
    }
}

/// The immutable type model for one generation run.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    enums: Vec<EnumDef>,
    beans: Vec<BeanDef>,
    tables: Vec<TableDef>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Look up an enum. Ids are only minted by this schema's builder.
    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.0]
    }

    /// Look up a bean. Ids are only minted by this schema's builder.
    pub fn bean(&self, id: BeanId) -> &BeanDef {
        &self.beans[id.0]
    }

    pub fn enums(&self) -> impl ExactSizeIterator<Item = (EnumId, &EnumDef)> {
        self.enums.iter().enumerate().map(|(i, e)| (EnumId(i), e))
    }

    pub fn beans(&self) -> impl ExactSizeIterator<Item = (BeanId, &BeanDef)> {
        self.beans.iter().enumerate().map(|(i, b)| (BeanId(i), b))
    }

    pub fn tables(&self) -> &[TableDef] {
        &self.tables
    }

    pub fn find_enum(&self, full_name: &str) -> Option<EnumId> {
        self.enums().find(|(_, e)| e.full_name() == full_name).map(|(id, _)| id)
    }

    pub fn find_bean(&self, full_name: &str) -> Option<BeanId> {
        self.beans().find(|(_, b)| b.full_name() == full_name).map(|(id, _)| id)
    }

    /// Fields of `id` including inherited ones, root ancestor first.
    pub fn hierarchy_fields(&self, id: BeanId) -> Vec<&FieldDef> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(bean_id) = current {
            chain.push(bean_id);
            current = self.bean(bean_id).parent;
        }
        chain
            .into_iter()
            .rev()
            .flat_map(|bean_id| self.bean(bean_id).fields.iter())
            .collect()
    }
}

/// Assembles a [`Schema`], validating cross references on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    enums: Vec<EnumDef>,
    beans: Vec<BeanDef>,
    tables: Vec<TableDef>,
}

impl SchemaBuilder {
    pub fn add_enum(&mut self, def: EnumDef) -> EnumId {
        self.enums.push(def);
        EnumId(self.enums.len() - 1)
    }

    pub fn add_bean(&mut self, def: BeanDef) -> BeanId {
        self.beans.push(def);
        BeanId(self.beans.len() - 1)
    }

    pub fn bean(&self, id: BeanId) -> Option<&BeanDef> {
        self.beans.get(id.0)
    }

    /// Mutable access used to fill in fields after every bean has an id.
    pub fn bean_mut(&mut self, id: BeanId) -> Option<&mut BeanDef> {
        self.beans.get_mut(id.0)
    }

    pub fn add_table(&mut self, def: TableDef) {
        self.tables.push(def);
    }

    pub fn build(self) -> SchemaResult<Schema> {
        let schema = Schema {
            enums: self.enums,
            beans: self.beans,
            tables: self.tables,
        };
        validate(&schema)?;
        Ok(schema)
    }
}

fn validate(schema: &Schema) -> SchemaResult<()> {
    let mut seen = HashSet::new();
    let names = schema
        .enums
        .iter()
        .map(EnumDef::full_name)
        .chain(schema.beans.iter().map(BeanDef::full_name));
    for name in names {
        if !seen.insert(name.clone()) {
            return Err(SchemaError::DuplicateType(name));
        }
    }

    let bean_count = schema.beans.len();
    let enum_count = schema.enums.len();
    let check_node = |node: &TypeNode, context: &str| -> SchemaResult<()> {
        let mut dangling = None;
        node.walk(&mut |n| match n.kind {
            TypeKind::Bean(BeanId(i)) if i >= bean_count => dangling = Some(format!("bean #{i}")),
            TypeKind::Enum(EnumId(i)) if i >= enum_count => dangling = Some(format!("enum #{i}")),
            _ => {}
        });
        match dangling {
            Some(name) => Err(SchemaError::UnknownType {
                name,
                context: context.to_string(),
            }),
            None => Ok(()),
        }
    };

    for bean in &schema.beans {
        if let Some(BeanId(parent)) = bean.parent {
            if parent >= bean_count {
                return Err(SchemaError::UnknownParent {
                    bean: bean.full_name(),
                    parent: format!("bean #{parent}"),
                });
            }
        }
        for field in &bean.fields {
            check_node(&field.ty, &format!("{}.{}", bean.full_name(), field.name))?;
        }
    }

    for (id, bean) in schema.beans() {
        let mut visited = HashSet::new();
        let mut current = Some(id);
        while let Some(bean_id) = current {
            if !visited.insert(bean_id) {
                return Err(SchemaError::InheritanceCycle(bean.full_name()));
            }
            current = schema.bean(bean_id).parent;
        }
    }

    for table in &schema.tables {
        if table.value.0 >= bean_count {
            return Err(SchemaError::TableValueNotBean {
                table: table.full_name(),
                value: format!("bean #{}", table.value.0),
            });
        }
        if table.indices.is_empty() {
            return Err(SchemaError::MissingIndex(table.full_name()));
        }
        let fields = schema.hierarchy_fields(table.value);
        for index in &table.indices {
            if !fields.iter().any(|f| f.name == index.field) {
                return Err(SchemaError::MissingIndexField {
                    table: table.full_name(),
                    field: index.field.clone(),
                    bean: schema.bean(table.value).full_name(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "types/types_tests.rs"]
mod types_tests;
