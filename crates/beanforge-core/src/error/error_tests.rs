#![allow(non_snake_case)]

use super::*;

#[test]
fn SchemaError___unknown_type___displays_context() {
    let err = SchemaError::UnknownType {
        name: "Weapon".into(),
        context: "game.Item.Slot".into(),
    };

    assert_eq!(
        err.to_string(),
        "unknown type 'Weapon' referenced from game.Item.Slot"
    );
}

#[test]
fn SchemaError___missing_index_field___displays_all_parts() {
    let err = SchemaError::MissingIndexField {
        table: "TbItem".into(),
        field: "Key".into(),
        bean: "Item".into(),
    };

    assert_eq!(
        err.to_string(),
        "table 'TbItem' index field 'Key' not found in bean 'Item'"
    );
}

#[test]
fn SchemaError___from_serde_json___becomes_parse_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

    let err: SchemaError = json_err.into();

    assert!(matches!(err, SchemaError::Parse(_)));
}

#[test]
fn ConfigError___unknown_casing___lists_choices() {
    let err = ConfigError::UnknownCasing("kebab".into());

    assert!(err.to_string().contains("kebab"));
    assert!(err.to_string().contains("pascal"));
}
