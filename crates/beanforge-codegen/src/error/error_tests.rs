#![allow(non_snake_case)]

use super::*;
use std::error::Error as _;

#[test]
fn CodegenError___missing_key_field___displays_table_and_field() {
    let err = CodegenError::MissingKeyField {
        table: "TbItem".into(),
        field: "SubId".into(),
    };

    assert_eq!(
        err.to_string(),
        "table 'TbItem' key field 'SubId' is missing from its value type"
    );
}

#[test]
fn CodegenError___unknown_code_target___lists_available() {
    let err = CodegenError::UnknownCodeTarget {
        name: "lua".into(),
        available: "angelscript-json, typescript-puerts".into(),
    };

    assert!(err.to_string().contains("lua"));
    assert!(err.to_string().contains("typescript-puerts"));
}

#[test]
fn CodegenError___in_unit___keeps_source() {
    let err = CodegenError::NoKeyField("TbItem".into()).in_unit("CfgMgr.as");

    assert_eq!(
        err.to_string(),
        "generation unit 'CfgMgr.as' failed: table 'TbItem' has no key field"
    );
    assert!(err.source().is_some());
}
