#![allow(non_snake_case)]

use super::*;
use beanforge_core::{BeanDef, CodeStyle, EnumDef, FieldDef, IndexDef, TypeMapper, TypeNode};

fn stem(namespace: &str) -> String {
    if namespace.is_empty() {
        "CommonCfg".to_string()
    } else {
        format!("{}Cfg", last_segment(namespace))
    }
}

#[test]
fn last_segment___returns_text_after_last_dot() {
    assert_eq!(last_segment("game.item"), "item");
    assert_eq!(last_segment("game"), "game");
    assert_eq!(last_segment(""), "");
}

#[test]
fn partition___groups_by_namespace_in_discovery_order() {
    let mut builder = Schema::builder();
    builder.add_enum(EnumDef::new("Zeta", "ui"));
    builder.add_bean(BeanDef::new("Item", "game"));
    builder.add_enum(EnumDef::new("Alpha", "ui"));
    builder.add_bean(BeanDef::new("Global", ""));
    let schema = builder.build().unwrap();

    let buckets = partition(&schema);

    let namespaces: Vec<_> = buckets.iter().map(|b| b.namespace.as_str()).collect();
    assert_eq!(namespaces, vec!["ui", "game", ""]);
    assert!(buckets[2].is_common());
}

#[test]
fn partition___sorts_by_name_independent_of_declaration_order() {
    let mut builder = Schema::builder();
    let zeta = builder.add_enum(EnumDef::new("Zeta", "ui"));
    let alpha = builder.add_enum(EnumDef::new("Alpha", "ui"));
    let window = builder.add_bean(BeanDef::new("Window", "ui"));
    let button = builder.add_bean(BeanDef::new("Button", "ui"));
    let schema = builder.build().unwrap();

    let buckets = partition(&schema);

    assert_eq!(buckets[0].enums, vec![alpha, zeta]);
    assert_eq!(buckets[0].beans, vec![button, window]);
}

#[test]
fn collect_imports___same_namespace_references_import_nothing() {
    let mut builder = Schema::builder();
    let color = builder.add_enum(EnumDef::new("Color", "game"));
    builder.add_bean(BeanDef::new("Item", "game").with_field(FieldDef::new("Tint", TypeNode::enum_ref(color))));
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "test");
    let bucket = &partition(&schema)[0];

    let imports = collect_imports(&ctx, bucket, stem, true);

    assert!(imports.is_empty());
}

#[test]
fn collect_imports___namespace_with_same_file_imports_nothing() {
    let mut builder = Schema::builder();
    let other = builder.add_bean(BeanDef::new("Other", "client.game"));
    builder.add_bean(
        BeanDef::new("Item", "server.game").with_field(FieldDef::new("O", TypeNode::bean(other))),
    );
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "test");
    let buckets = partition(&schema);

    let imports = collect_imports(&ctx, &buckets[1], stem, false);

    assert!(imports.is_empty());
}

#[test]
fn collect_imports___groups_by_file_and_sorts_type_names() {
    let mut builder = Schema::builder();
    let rarity = builder.add_enum(EnumDef::new("Rarity", "game.item"));
    let weapon = builder.add_bean(BeanDef::new("Weapon", "game.item"));
    let vector = builder.add_bean(BeanDef::new("Vector3", "").value_type());
    builder.add_bean(
        BeanDef::new("Hero", "game.hero")
            .with_field(FieldDef::new("Weapons", TypeNode::map(TypeNode::enum_ref(rarity), TypeNode::list(TypeNode::bean(weapon)))))
            .with_field(FieldDef::new("Pos", TypeNode::bean(vector))),
    );
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "test");
    let hero_bucket = partition(&schema).into_iter().find(|b| b.namespace == "game.hero").unwrap();

    let imports = collect_imports(&ctx, &hero_bucket, stem, false);

    let files: Vec<_> = imports.keys().map(String::as_str).collect();
    assert_eq!(files, vec!["CommonCfg", "itemCfg"]);
    let item_types: Vec<_> = imports["itemCfg"].types.iter().map(String::as_str).collect();
    assert_eq!(item_types, vec!["Rarity", "Weapon"]);
    assert!(imports["CommonCfg"].common);
    assert!(!imports["itemCfg"].common);
}

#[test]
fn collect_imports___parent_only_when_requested() {
    let mut builder = Schema::builder();
    let base = builder.add_bean(BeanDef::new("Base", "core"));
    builder.add_bean(BeanDef::new("Item", "game").with_parent(base));
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "test");
    let game = partition(&schema).into_iter().find(|b| b.namespace == "game").unwrap();

    let without_parent = collect_imports(&ctx, &game, stem, false);
    let with_parent = collect_imports(&ctx, &game, stem, true);

    assert!(without_parent.is_empty());
    assert!(with_parent["coreCfg"].types.contains("Base"));
}

#[test]
fn collect_imports___inherited_fields_are_walked() {
    let mut builder = Schema::builder();
    let color = builder.add_enum(EnumDef::new("Color", "ui"));
    let base = builder.add_bean(BeanDef::new("Base", "game").with_field(FieldDef::new("Tint", TypeNode::enum_ref(color))));
    builder.add_bean(BeanDef::new("Item", "shop").with_parent(base));
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "test");
    let shop = partition(&schema).into_iter().find(|b| b.namespace == "shop").unwrap();

    let imports = collect_imports(&ctx, &shop, stem, false);

    assert!(imports["uiCfg"].types.contains("Color"));
}

#[test]
fn collect_imports___common_file_shared_with_namespace___stays_common() {
    let mut builder = Schema::builder();
    let global = builder.add_bean(BeanDef::new("Global", ""));
    let local = builder.add_bean(BeanDef::new("Local", "ui.Common"));
    builder.add_bean(
        BeanDef::new("Item", "game")
            .with_field(FieldDef::new("G", TypeNode::bean(global)))
            .with_field(FieldDef::new("L", TypeNode::bean(local))),
    );
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "test");
    let game = partition(&schema).into_iter().find(|b| b.namespace == "game").unwrap();

    let imports = collect_imports(&ctx, &game, stem, false);

    assert_eq!(imports.len(), 1);
    assert!(imports["CommonCfg"].common);
    assert_eq!(imports["CommonCfg"].types.len(), 2);
}

#[test]
fn collect_imports___mapped_types___not_imported() {
    let mut builder = Schema::builder();
    let vector = builder.add_bean(
        BeanDef::new("Vector3", "math")
            .value_type()
            .with_type_mapper(TypeMapper::new(["client"], ["test"]).with_option("type", "UE.Vector")),
    );
    builder.add_bean(BeanDef::new("Item", "game").with_field(FieldDef::new("Pos", TypeNode::bean(vector))));
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "test");
    let game = partition(&schema).into_iter().find(|b| b.namespace == "game").unwrap();

    let imports = collect_imports(&ctx, &game, stem, false);

    assert!(imports.is_empty());
}

#[test]
fn collect_table_imports___enum_key___imports_key_enum() {
    let mut builder = Schema::builder();
    let quality = builder.add_enum(EnumDef::new("Quality", "game.item"));
    let reward = builder.add_bean(
        BeanDef::new("Reward", "game.bag").with_field(FieldDef::new("Grade", TypeNode::enum_ref(quality))),
    );
    builder.add_table(TableDef::new("TbReward", reward, IndexDef::new("Grade", TypeNode::enum_ref(quality))));
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "test");

    let imports = collect_table_imports(&ctx, schema.tables(), stem);

    let files: Vec<_> = imports.keys().map(String::as_str).collect();
    assert_eq!(files, vec!["bagCfg", "itemCfg"]);
    assert!(imports["itemCfg"].types.contains("Quality"));
}

#[test]
fn collect_table_imports___union_key___imports_every_index_enum() {
    let mut builder = Schema::builder();
    let quality = builder.add_enum(EnumDef::new("Quality", "game.item"));
    let slot = builder.add_enum(EnumDef::new("Slot", ""));
    let reward = builder.add_bean(
        BeanDef::new("Reward", "game.bag")
            .with_field(FieldDef::new("Id", TypeNode::int()))
            .with_field(FieldDef::new("Grade", TypeNode::enum_ref(quality)))
            .with_field(FieldDef::new("Where", TypeNode::enum_ref(slot))),
    );
    builder.add_table(TableDef::union(
        "TbReward",
        reward,
        vec![
            IndexDef::new("Id", TypeNode::int()),
            IndexDef::new("Grade", TypeNode::enum_ref(quality)),
            IndexDef::new("Where", TypeNode::enum_ref(slot)),
        ],
    ));
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "test");

    let imports = collect_table_imports(&ctx, schema.tables(), stem);

    assert!(imports["itemCfg"].types.contains("Quality"));
    assert!(imports["CommonCfg"].types.contains("Slot"));
    assert!(imports["CommonCfg"].common);
    assert!(imports["bagCfg"].types.contains("Reward"));
}
