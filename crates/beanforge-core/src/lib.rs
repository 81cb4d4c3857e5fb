//! beanforge-core - Type model, schema loading and generation settings
//!
//! This crate provides the foundational types every code target consumes:
//! - [`Schema`] and its [`TypeNode`] algebra, built once and read-only afterwards
//! - [`SchemaFile`] for loading a schema document into a [`Schema`]
//! - [`CodeStyle`] for per-role identifier casing and keyword escaping
//! - [`GenerationConfig`] for run settings
//! - [`SchemaError`] and [`ConfigError`] for error handling

pub mod code_style;
mod config;
mod error;
mod schema;
mod types;

pub use code_style::{Casing, CodeStyle, NameRole};
pub use config::{CodeStyleOverrides, GenerationConfig};
pub use error::{ConfigError, SchemaError, SchemaResult};
pub use schema::{
    BeanDecl, EnumDecl, EnumItemDecl, FieldDecl, SchemaFile, TableDecl, TypeMapperDecl,
};
pub use types::{
    BeanDef, BeanId, EnumDef, EnumId, EnumItem, FieldDef, IndexDef, Schema, SchemaBuilder,
    TableDef, TypeKind, TypeMapper, TypeNode,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BeanDef, BeanId, CodeStyle, EnumDef, EnumId, FieldDef, GenerationConfig, IndexDef,
        NameRole, Schema, SchemaError, SchemaFile, TableDef, TypeKind, TypeMapper, TypeNode,
    };
}
