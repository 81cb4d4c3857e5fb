#![allow(non_snake_case)]

use super::*;

#[test]
fn OutputManifest___keeps_insertion_order() {
    let mut manifest = OutputManifest::new("typescript-puerts");
    manifest.add_file(OutputFile::new("CfgMgr.ts", "a"));
    manifest.add_file(OutputFile::new("CommonCfg.ts", "b"));

    let paths: Vec<_> = manifest.files().iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["CfgMgr.ts", "CommonCfg.ts"]);
    assert_eq!(manifest.len(), 2);
    assert!(!manifest.is_empty());
}

#[test]
fn OutputManifest___get___returns_first_match() {
    let mut manifest = OutputManifest::new("angelscript-json");
    manifest.add_file(OutputFile::new("itemCfg.as", "first"));
    manifest.add_file(OutputFile::new("itemCfg.as", "second"));

    assert_eq!(manifest.get("itemCfg.as").unwrap().content, "first");
    assert!(manifest.get("missing.as").is_none());
}

#[test]
fn OutputManifest___serializes_to_json() {
    let mut manifest = OutputManifest::new("angelscript-json");
    manifest.add_file(OutputFile::new("CfgMgr.as", "class CfgMgr {}"));

    let json = serde_json::to_value(&manifest).unwrap();

    assert_eq!(json["code_target"], "angelscript-json");
    assert_eq!(json["files"][0]["path"], "CfgMgr.as");
}
