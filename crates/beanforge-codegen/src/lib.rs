//! beanforge-codegen - Source emission for enums, beans and tables
//!
//! This crate turns a read-only [`Schema`](beanforge_core::Schema) into the
//! files of one code target:
//! - [`FragmentVisitor`] for declared types, default values and deserializers
//! - [`parse_default_literal`] for author-supplied field defaults
//! - the [`keys`] module for table key expressions
//! - [`partition`] and [`collect_imports`] for namespace files
//! - [`generate`] for parallel, order-preserving emission
//!
//! # Code Targets
//!
//! | Name | Language | Files |
//! |------|----------|-------|
//! | `angelscript-json` | Unreal AngelScript | `CommonCfg.as`, `<ns>Cfg.as`, `CfgMgr.as` |
//! | `typescript-puerts` | TypeScript | `CommonCfg.ts`, `<Ns>Cfg.ts`, `CfgMgr.ts` |
//! | `typescript-ue-json` | TypeScript | `Common.ts`, `<Ns>.ts`, `CfgMgr.ts` |

pub mod angelscript;
mod context;
mod error;
mod fragments;
pub mod keys;
mod literal;
mod manifest;
mod namespace;
mod orchestrator;
mod target;
pub mod typescript;
mod writer;

pub use context::GenContext;
pub use error::{CodegenError, CodegenResult};
pub use fragments::{FragmentVisitor, default_enum_item};
pub use literal::{LiteralSyntax, field_initializer, parse_default_literal};
pub use manifest::{OutputFile, OutputManifest};
pub use namespace::{
    ImportGroup, Imports, NamespaceBucket, collect_imports, collect_table_imports, last_segment,
    partition,
};
pub use orchestrator::{EmitOptions, generate, generate_with_config};
pub use target::{CodeTarget, code_targets, find_code_target};
pub use writer::{CodeWriter, FILE_HEADER};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CodeTarget, CodegenError, CodegenResult, EmitOptions, FragmentVisitor, GenContext,
        OutputFile, OutputManifest, find_code_target, generate, generate_with_config,
    };
}
