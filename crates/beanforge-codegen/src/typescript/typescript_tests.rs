#![allow(non_snake_case)]

use super::*;
use crate::namespace::ImportGroup;
use crate::target::CodeTarget;
use beanforge_core::{BeanDef, CodeStyle, Schema, TypeMapper, TypeNode};

#[test]
fn ue_file_stem___formats_last_segment_with_namespace_casing() {
    let schema = Schema::default();
    let ctx = GenContext::new(&schema, TypescriptUeJson.default_code_style(), "client", "typescript-ue-json");

    assert_eq!(ue_file_stem(&ctx, ""), "Common");
    assert_eq!(ue_file_stem(&ctx, "game.loot_table"), "LootTable");
}

#[test]
fn write_named_imports___one_line_per_file_sorted() {
    let mut imports = Imports::new();
    imports.insert(
        "ShopCfg".to_string(),
        ImportGroup {
            common: false,
            types: ["Reward".to_string(), "Price".to_string()].into(),
        },
    );
    imports.insert(
        "CommonCfg".to_string(),
        ImportGroup {
            common: true,
            types: ["Color".to_string()].into(),
        },
    );
    let mut writer = CodeWriter::new();

    write_named_imports(&imports, &mut writer);

    assert_eq!(
        writer.into_result(""),
        "import { Color } from \"./CommonCfg\"\nimport { Price, Reward } from \"./ShopCfg\"\n"
    );
}

#[test]
fn native_modules___dotted_mapped_names___one_import_per_module() {
    let mut builder = Schema::builder();
    let vector = builder.add_bean(
        BeanDef::new("Vector3", "")
            .value_type()
            .with_type_mapper(TypeMapper::new(["client"], ["typescript-puerts"]).with_option("type", "UE.Vector")),
    );
    let rotator = builder.add_bean(
        BeanDef::new("Rotator3", "")
            .value_type()
            .with_type_mapper(TypeMapper::new(["client"], ["typescript-puerts"]).with_option("type", "UE.Rotator")),
    );
    let handle = builder.add_bean(
        BeanDef::new("Handle", "")
            .with_type_mapper(TypeMapper::new(["client"], ["typescript-puerts"]).with_option("type", "Handle")),
    );
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "typescript-puerts");
    let nodes = [
        TypeNode::list(TypeNode::bean(vector)),
        TypeNode::map(TypeNode::int(), TypeNode::bean(rotator)),
        TypeNode::bean(handle),
    ];
    let refs: Vec<&TypeNode> = nodes.iter().collect();
    let mut writer = CodeWriter::new();

    write_native_imports(&native_modules(&ctx, &refs), &mut writer);

    assert_eq!(writer.into_result(""), "import * as UE from \"ue\"\n");
}

#[test]
fn render_enum___documents_enum_and_items() {
    let mut builder = Schema::builder();
    let mut def = EnumDef::new("Color", "").with_item("Red", 1);
    def.comment = Some("Tint of an item.".to_string());
    def.items[0].comment = Some("Warm.".to_string());
    builder.add_enum(def);
    let schema = builder.build().unwrap();
    let ctx = GenContext::new(&schema, CodeStyle::none(), "client", "typescript-puerts");
    let mut writer = CodeWriter::new();

    render_enum(&ctx, schema.enum_def(schema.find_enum("Color").unwrap()), &mut writer);

    assert_eq!(
        writer.into_result(""),
        "/**\n * Tint of an item.\n */\nexport enum Color {\n    /**\n     * Warm.\n     */\n    Red = 1,\n}\n"
    );
}
