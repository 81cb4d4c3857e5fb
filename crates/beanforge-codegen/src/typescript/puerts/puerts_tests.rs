#![allow(non_snake_case)]

use super::*;
use crate::namespace::partition;
use beanforge_core::{BeanDef, EnumDef, FieldDef, IndexDef, NameRole, Schema, TypeMapper, TypeNode};

fn context(schema: &Schema) -> GenContext<'_> {
    GenContext::new(schema, TypescriptPuerts.default_code_style(), "client", "typescript-puerts")
}

fn bag_schema() -> Schema {
    let mut builder = Schema::builder();
    let quality = builder.add_enum(EnumDef::new("Quality", "game.bag").with_item("Common", 0).with_item("Rare", 1));
    let reward = builder.add_bean(BeanDef::new("Reward", "game.shop").with_field(FieldDef::new("Gold", TypeNode::int())));
    let base = builder.add_bean(BeanDef::new("Base", "game.bag").with_field(FieldDef::new("Id", TypeNode::int())));
    let item = builder.add_bean(
        BeanDef::new("Item", "game.bag")
            .with_parent(base)
            .with_field(FieldDef::new("Quality", TypeNode::enum_ref(quality)).with_default("Rare"))
            .with_field(FieldDef::new("Rewards", TypeNode::list(TypeNode::bean(reward)))),
    );
    builder.add_table(TableDef::new("TbItem", item, IndexDef::new("Id", TypeNode::int())));
    builder.add_table(TableDef::new("TbReward", reward, IndexDef::new("Gold", TypeNode::int())));
    builder.build().unwrap()
}

#[test]
fn file_stem___capitalizes_last_segment() {
    let schema = Schema::default();
    let ctx = context(&schema);

    assert_eq!(TypescriptPuerts.file_stem(&ctx, ""), "CommonCfg");
    assert_eq!(TypescriptPuerts.file_stem(&ctx, "game.bag"), "BagCfg");
    assert_eq!(TypescriptPuerts.bucket_file_name(&ctx, "game.bag"), "BagCfg.ts");
}

#[test]
fn default_code_style___camel_members_pascal_types() {
    let style = TypescriptPuerts.default_code_style();

    assert_eq!(style.format_identifier("sub_id", NameRole::Field), "subId");
    assert_eq!(style.format_identifier("item_def", NameRole::Type), "ItemDef");
    assert_eq!(style.format_identifier("Load", NameRole::Method), "Load");
    assert_eq!(style.format_identifier("RED", NameRole::EnumItem), "RED");
    assert_eq!(style.format_identifier("Class", NameRole::Field), "class_");
}

#[test]
fn render_bucket___imports_foreign_types_by_name() {
    let schema = bag_schema();
    let ctx = context(&schema);
    let bucket = partition(&schema).into_iter().find(|b| b.namespace == "game.bag").unwrap();

    let body = TypescriptPuerts.render_bucket(&ctx, &bucket).unwrap();

    assert!(body.starts_with("import { Reward } from \"./ShopCfg\"\n\nexport enum Quality {\n"));
}

#[test]
fn render_bucket___flattens_hierarchy_without_extends() {
    let schema = bag_schema();
    let ctx = context(&schema);
    let bucket = partition(&schema).into_iter().find(|b| b.namespace == "game.bag").unwrap();

    let body = TypescriptPuerts.render_bucket(&ctx, &bucket).unwrap();
    let item = &body[body.find("export class Item").unwrap()..];

    assert!(!body.contains("extends"));
    assert!(item.starts_with(
        "export class Item {\n    id: number = 0\n    quality: Quality = Quality.Rare\n    rewards: Reward[] = []\n"
    ));
    assert!(item.contains("    static deserialize(json: any): Item {\n        const obj = new Item()\n"));
    assert!(item.contains("        obj.id = json[\"Id\"][\"value\"] as number;\n"));
    assert!(item.contains("{ const __arr0 = json[\"Rewards\"][\"value\"] as any[]; obj.rewards = [];"));
    assert!(item.ends_with("        return obj\n    }\n}\n"));
}

#[test]
fn render_bucket___declarations_separated_by_one_blank_line() {
    let schema = bag_schema();
    let ctx = context(&schema);
    let bucket = partition(&schema).into_iter().find(|b| b.namespace == "game.bag").unwrap();

    let body = TypescriptPuerts.render_bucket(&ctx, &bucket).unwrap();

    assert!(body.contains("    Rare = 1,\n}\n\nexport class Base {\n"));
    assert!(body.contains("        return obj\n    }\n}\n\nexport class Item {\n"));
}

#[test]
fn render_tables___imports_value_types_and_builds_registry() {
    let schema = bag_schema();
    let ctx = context(&schema);

    let body = TypescriptPuerts.render_tables(&ctx, schema.tables()).unwrap();

    assert!(body.starts_with(
        "import { Item } from \"./BagCfg\"\nimport { Reward } from \"./ShopCfg\"\n\nexport class CfgMgr {\n"
    ));
    assert!(body.contains("    tbItem: Map<number, Item> = new Map()\n"));
    assert!(body.contains("    LoadTbItem(rows: any[]): void {\n        this.tbItem.clear()\n"));
    assert!(body.contains("            const row = Item.deserialize(json)\n            this.tbItem.set(row.id, row)\n"));
    assert!(body.contains("    GetTbItem(id: number): Item | undefined {\n        return this.tbItem.get(id)\n    }\n"));
    assert!(body.contains("    GetTbReward(gold: number): Reward | undefined {\n"));
}

#[test]
fn render_tables___enum_key_from_other_namespace___imports_enum() {
    let mut builder = Schema::builder();
    let quality = builder.add_enum(EnumDef::new("Quality", "game.item").with_item("Common", 0));
    let drop = builder.add_bean(
        BeanDef::new("Drop", "game.bag").with_field(FieldDef::new("Grade", TypeNode::enum_ref(quality))),
    );
    builder.add_table(TableDef::new("TbDrop", drop, IndexDef::new("Grade", TypeNode::enum_ref(quality))));
    let schema = builder.build().unwrap();
    let ctx = context(&schema);

    let body = TypescriptPuerts.render_tables(&ctx, schema.tables()).unwrap();

    assert!(body.starts_with(
        "import { Drop } from \"./BagCfg\"\nimport { Quality } from \"./ItemCfg\"\n\nexport class CfgMgr {\n"
    ));
    assert!(body.contains("    tbDrop: Map<Quality, Drop> = new Map()\n"));
    assert!(body.contains("    GetTbDrop(grade: Quality): Drop | undefined {\n"));
}

#[test]
fn render_bucket___mapped_value_bean___native_type_and_module_import() {
    let mut builder = Schema::builder();
    let vector = builder.add_bean(
        BeanDef::new("Vector3", "")
            .value_type()
            .with_type_mapper(TypeMapper::new(["client"], ["typescript-puerts"]).with_option("type", "UE.Vector")),
    );
    builder.add_bean(
        BeanDef::new("Spawn", "game.bag")
            .with_field(FieldDef::new("Pos", TypeNode::bean(vector)))
            .with_field(FieldDef::new("Offset", TypeNode::bean(vector)).with_default("0,0,1")),
    );
    let schema = builder.build().unwrap();
    let ctx = context(&schema);
    let buckets = partition(&schema);
    let common = buckets.iter().find(|b| b.is_common()).unwrap();
    let bag = buckets.iter().find(|b| b.namespace == "game.bag").unwrap();

    let common_body = TypescriptPuerts.render_bucket(&ctx, common).unwrap();
    let bag_body = TypescriptPuerts.render_bucket(&ctx, bag).unwrap();

    assert!(!common_body.contains("class Vector3"));
    assert!(bag_body.starts_with("import * as UE from \"ue\"\n\nexport class Spawn {\n"));
    assert!(bag_body.contains("    pos: UE.Vector = new UE.Vector()\n"));
    assert!(bag_body.contains("    offset: UE.Vector = new UE.Vector(0, 0, 1)\n"));
    assert!(bag_body.contains("        obj.pos = json[\"Pos\"] as UE.Vector;\n"));
}
