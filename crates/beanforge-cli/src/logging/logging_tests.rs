#![allow(non_snake_case)]

use super::*;

#[test]
fn directive___cli_level_given___overrides_config() {
    assert_eq!(directive(Some("debug"), "info"), "debug");
}

#[test]
fn directive___no_cli_level___uses_config() {
    assert_eq!(directive(None, "warn"), "warn");
}

#[test]
fn env_filter___module_directive___accepted() {
    let result = env_filter("beanforge_codegen=debug,info");

    assert!(result.is_ok());
}
