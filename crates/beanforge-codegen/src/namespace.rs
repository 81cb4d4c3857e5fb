//! Namespace buckets and cross-file imports.
//!
//! Enums and beans are grouped by declared namespace, one output file per
//! bucket. The empty namespace is the common bucket. Imports are computed
//! per bucket by walking every field type (and optionally the parent) of
//! its beans, grouped by the resolved file of the referenced namespace.

use crate::context::GenContext;
use beanforge_core::{BeanId, EnumId, NameRole, Schema, TableDef, TypeKind, TypeNode};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};

/// Enums and beans sharing one namespace, each sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceBucket {
    pub namespace: String,
    pub enums: Vec<EnumId>,
    pub beans: Vec<BeanId>,
}

impl NamespaceBucket {
    fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            enums: Vec::new(),
            beans: Vec::new(),
        }
    }

    pub fn is_common(&self) -> bool {
        self.namespace.is_empty()
    }
}

/// Last dotted segment of a namespace (`game.item` -> `item`).
pub fn last_segment(namespace: &str) -> &str {
    namespace.rsplit('.').next().unwrap_or(namespace)
}

/// Group the schema's enums and beans by namespace.
///
/// Buckets come out in discovery order (enums scanned before beans);
/// inside a bucket enums and beans are sorted by declared name.
pub fn partition(schema: &Schema) -> Vec<NamespaceBucket> {
    let mut buckets: IndexMap<&str, NamespaceBucket> = IndexMap::new();
    for (id, def) in schema.enums() {
        buckets
            .entry(def.namespace.as_str())
            .or_insert_with(|| NamespaceBucket::new(&def.namespace))
            .enums
            .push(id);
    }
    for (id, def) in schema.beans() {
        buckets
            .entry(def.namespace.as_str())
            .or_insert_with(|| NamespaceBucket::new(&def.namespace))
            .beans
            .push(id);
    }

    buckets
        .into_values()
        .map(|mut bucket| {
            bucket.enums.sort_by(|a, b| schema.enum_def(*a).name.cmp(&schema.enum_def(*b).name));
            bucket.beans.sort_by(|a, b| schema.bean(*a).name.cmp(&schema.bean(*b).name));
            bucket
        })
        .collect()
}

/// Type names imported from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportGroup {
    /// The file holds the common (empty) namespace.
    pub common: bool,
    pub types: BTreeSet<String>,
}

/// Imports of one file, keyed by the file stem they come from.
pub type Imports = BTreeMap<String, ImportGroup>;

/// Collect the types `bucket` needs from other files.
///
/// `file_stem` must be the same namespace-to-file mapping used to name the
/// output files. Types from the bucket's own namespace, or from any
/// namespace that resolves to the bucket's own file, are never imported.
/// Mapped (native) types live in no generated file: they are neither
/// imported nor walked.
pub fn collect_imports(
    ctx: &GenContext<'_>,
    bucket: &NamespaceBucket,
    file_stem: impl Fn(&str) -> String,
    include_parent: bool,
) -> Imports {
    let schema = ctx.schema;
    let current_stem = file_stem(&bucket.namespace);
    let mut imports = Imports::new();

    let mut add = |namespace: &str, name: &str| {
        if namespace == bucket.namespace {
            return;
        }
        let stem = file_stem(namespace);
        if stem == current_stem {
            return;
        }
        add_import(&mut imports, stem, namespace.is_empty(), ctx.format(name, NameRole::Type));
    };

    for &bean_id in &bucket.beans {
        if ctx.native_bean_name(schema.bean(bean_id)).is_some() {
            continue;
        }
        if include_parent {
            if let Some(parent) = schema.bean(bean_id).parent {
                let parent = schema.bean(parent);
                if ctx.native_bean_name(parent).is_none() {
                    add(&parent.namespace, &parent.name);
                }
            }
        }
        for field in schema.hierarchy_fields(bean_id) {
            visit_generated(ctx, &field.ty, &mut add);
        }
    }
    imports
}

/// Collect the types a table registry file needs: row beans plus every
/// enum or bean appearing in a key or index type.
pub fn collect_table_imports(
    ctx: &GenContext<'_>,
    tables: &[TableDef],
    file_stem: impl Fn(&str) -> String,
) -> Imports {
    let mut imports = Imports::new();
    let mut add = |namespace: &str, name: &str| {
        add_import(
            &mut imports,
            file_stem(namespace),
            namespace.is_empty(),
            ctx.format(name, NameRole::Type),
        );
    };
    for table in tables {
        let bean = ctx.schema.bean(table.value);
        add(&bean.namespace, &bean.name);
        visit_generated(ctx, &table.key_type, &mut add);
        for index in &table.indices {
            visit_generated(ctx, &index.ty, &mut add);
        }
    }
    imports
}

fn add_import(imports: &mut Imports, stem: String, common: bool, name: String) {
    let group = imports.entry(stem).or_default();
    group.common |= common;
    group.types.insert(name);
}

/// Calls `visit(namespace, name)` for every generated enum or bean
/// reachable from `node`.
fn visit_generated(ctx: &GenContext<'_>, node: &TypeNode, visit: &mut impl FnMut(&str, &str)) {
    node.walk(&mut |node| match node.kind {
        TypeKind::Enum(id) => {
            let def = ctx.schema.enum_def(id);
            if ctx.native_enum_name(def).is_none() {
                visit(&def.namespace, &def.name);
            }
        }
        TypeKind::Bean(id) => {
            let def = ctx.schema.bean(id);
            if ctx.native_bean_name(def).is_none() {
                visit(&def.namespace, &def.name);
            }
        }
        _ => {}
    });
}

#[cfg(test)]
#[path = "namespace/namespace_tests.rs"]
mod namespace_tests;
