#![allow(non_snake_case)]

use super::*;

fn item_schema() -> (Schema, BeanId) {
    let mut builder = Schema::builder();
    let base = builder.add_bean(BeanDef::new("Base", "game").with_field(FieldDef::new("Id", TypeNode::int())));
    let item = builder.add_bean(
        BeanDef::new("Item", "game")
            .with_parent(base)
            .with_field(FieldDef::new("Name", TypeNode::string())),
    );
    (builder.build().unwrap(), item)
}

// EnumDef tests

#[test]
fn EnumDef___default_item___prefers_none_case_insensitive() {
    let def = EnumDef::new("Color", "")
        .with_item("Red", 1)
        .with_item("NONE", 0)
        .with_item("Blue", 2);

    assert_eq!(def.default_item().unwrap().name, "NONE");
}

#[test]
fn EnumDef___default_item___falls_back_to_first_declared() {
    let def = EnumDef::new("Rank", "").with_item("Bronze", 0).with_item("Silver", 1);

    assert_eq!(def.default_item().unwrap().name, "Bronze");
}

#[test]
fn EnumDef___default_item___empty_enum_returns_none() {
    let def = EnumDef::new("Empty", "");

    assert!(def.default_item().is_none());
}

#[test]
fn EnumDef___item_by_value___first_match_wins() {
    let def = EnumDef::new("Alias", "").with_item("A", 1).with_item("B", 1);

    assert_eq!(def.item_by_value(1).unwrap().name, "A");
    assert!(def.item_by_value(7).is_none());
}

#[test]
fn EnumDef___full_name___joins_namespace() {
    assert_eq!(EnumDef::new("Color", "game.ui").full_name(), "game.ui.Color");
    assert_eq!(EnumDef::new("Color", "").full_name(), "Color");
}

// TypeMapper tests

#[test]
fn TypeMapper___applies_to___requires_target_and_code_target() {
    let mapper = TypeMapper::new(["client"], ["angelscript-json"]);

    assert!(mapper.applies_to("client", "angelscript-json"));
    assert!(!mapper.applies_to("server", "angelscript-json"));
    assert!(!mapper.applies_to("client", "typescript-puerts"));
}

#[test]
fn TypeMapper___type_name___prefers_type_over_name() {
    let both = TypeMapper::new(["client"], ["as"])
        .with_option("name", "Vec3")
        .with_option("type", "FVector");
    let name_only = TypeMapper::new(["client"], ["as"]).with_option("name", "Vec3");

    assert_eq!(both.type_name(), Some("FVector"));
    assert_eq!(name_only.type_name(), Some("Vec3"));
    assert_eq!(TypeMapper::default().type_name(), None);
}

#[test]
fn BeanDef___type_mapper___first_match_wins() {
    let bean = BeanDef::new("Vector3", "")
        .with_type_mapper(TypeMapper::new(["client"], ["as"]).with_option("type", "First"))
        .with_type_mapper(TypeMapper::new(["client"], ["as"]).with_option("type", "Second"));

    let mapper = bean.type_mapper("client", "as").unwrap();

    assert_eq!(mapper.type_name(), Some("First"));
}

// TableDef tests

#[test]
fn TableDef___is_union_key___single_index_is_single_key() {
    let table = TableDef::union("TbItem", BeanId(0), vec![IndexDef::new("Id", TypeNode::int())]);

    assert!(table.is_union_index);
    assert!(!table.is_union_key());
}

#[test]
fn TableDef___is_union_key___two_indices_is_union_key() {
    let table = TableDef::union(
        "TbItem",
        BeanId(0),
        vec![IndexDef::new("Id", TypeNode::int()), IndexDef::new("SubId", TypeNode::int())],
    );

    assert!(table.is_union_key());
}

#[test]
fn TableDef___is_union_key___multiple_indices_without_flag_is_single_key() {
    let mut table = TableDef::new("TbItem", BeanId(0), IndexDef::new("Id", TypeNode::int()));
    table.indices.push(IndexDef::new("Name", TypeNode::string()));

    assert!(!table.is_union_key());
    assert_eq!(table.index_field().unwrap().field, "Id");
}

// TypeNode tests

#[test]
fn TypeNode___is_container___only_for_collections() {
    assert!(TypeNode::list(TypeNode::int()).is_container());
    assert!(TypeNode::map(TypeNode::int(), TypeNode::string()).is_container());
    assert!(!TypeNode::int().is_container());
    assert!(!TypeNode::string().into_nullable().is_container());
}

#[test]
fn TypeNode___walk___visits_nested_nodes_outermost_first() {
    let node = TypeNode::map(TypeNode::int(), TypeNode::list(TypeNode::string()));
    let mut kinds = Vec::new();

    node.walk(&mut |n| kinds.push(n.kind.clone()));

    assert_eq!(kinds.len(), 4);
    assert!(matches!(kinds[0], TypeKind::Map(_, _)));
    assert_eq!(kinds[1], TypeKind::Int);
    assert!(matches!(kinds[2], TypeKind::List(_)));
    assert_eq!(kinds[3], TypeKind::String);
}

// Schema tests

#[test]
fn Schema___hierarchy_fields___parent_fields_first() {
    let (schema, item) = item_schema();

    let names: Vec<_> = schema.hierarchy_fields(item).iter().map(|f| f.name.as_str()).collect();

    assert_eq!(names, vec!["Id", "Name"]);
}

#[test]
fn Schema___find_bean___matches_full_name() {
    let (schema, item) = item_schema();

    assert_eq!(schema.find_bean("game.Item"), Some(item));
    assert_eq!(schema.find_bean("Item"), None);
}

#[test]
fn SchemaBuilder___build___rejects_duplicate_names() {
    let mut builder = Schema::builder();
    builder.add_enum(EnumDef::new("Color", "game"));
    builder.add_bean(BeanDef::new("Color", "game"));

    let err = builder.build().unwrap_err();

    assert!(matches!(err, SchemaError::DuplicateType(name) if name == "game.Color"));
}

#[test]
fn SchemaBuilder___build___rejects_inheritance_cycle() {
    let mut builder = Schema::builder();
    let a = builder.add_bean(BeanDef::new("A", ""));
    let b = builder.add_bean(BeanDef::new("B", "").with_parent(a));
    builder.bean_mut(a).unwrap().parent = Some(b);

    let err = builder.build().unwrap_err();

    assert!(matches!(err, SchemaError::InheritanceCycle(_)));
}

#[test]
fn SchemaBuilder___build___rejects_missing_index_field() {
    let mut builder = Schema::builder();
    let item = builder.add_bean(BeanDef::new("Item", "").with_field(FieldDef::new("Id", TypeNode::int())));
    builder.add_table(TableDef::new("TbItem", item, IndexDef::new("Key", TypeNode::int())));

    let err = builder.build().unwrap_err();

    assert!(matches!(err, SchemaError::MissingIndexField { field, .. } if field == "Key"));
}

#[test]
fn SchemaBuilder___build___accepts_inherited_index_field() {
    let mut builder = Schema::builder();
    let base = builder.add_bean(BeanDef::new("Base", "").with_field(FieldDef::new("Id", TypeNode::int())));
    let item = builder.add_bean(BeanDef::new("Item", "").with_parent(base));
    builder.add_table(TableDef::new("TbItem", item, IndexDef::new("Id", TypeNode::int())));

    assert!(builder.build().is_ok());
}

#[test]
fn SchemaBuilder___build___rejects_table_without_index() {
    let mut builder = Schema::builder();
    let item = builder.add_bean(BeanDef::new("Item", ""));
    builder.add_table(TableDef::union("TbItem", item, Vec::new()));

    let err = builder.build().unwrap_err();

    assert!(matches!(err, SchemaError::MissingIndex(name) if name == "TbItem"));
}

#[test]
fn SchemaBuilder___build___allows_self_referencing_bean() {
    let mut builder = Schema::builder();
    let node = builder.add_bean(BeanDef::new("Node", ""));
    builder
        .bean_mut(node)
        .unwrap()
        .fields
        .push(FieldDef::new("Children", TypeNode::list(TypeNode::bean(node))));

    let schema = builder.build().unwrap();

    assert_eq!(schema.bean(node).fields.len(), 1);
}
