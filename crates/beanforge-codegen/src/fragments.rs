//! The four per-target fragment visitors.
//!
//! Every code target implements [`FragmentVisitor`] as exhaustive matches
//! over [`TypeKind`](beanforge_core::TypeKind), so a new type kind fails to
//! compile until each target handles it.
//!
//! The visitors must agree with each other: the variable
//! [`deserialize`](FragmentVisitor::deserialize) writes into is declared
//! with [`declare_type`](FragmentVisitor::declare_type) of the same node.

use beanforge_core::{EnumDef, TypeNode};

pub trait FragmentVisitor {
    /// Type spelling without any nullable marker.
    fn underlying_declare_type(&self, node: &TypeNode) -> String;

    /// Wrap an underlying spelling as nullable. Targets without nullable
    /// types return it unchanged.
    fn nullable_type(&self, underlying: String) -> String {
        underlying
    }

    /// Type spelling of `node`, nullable marker included.
    fn declare_type(&self, node: &TypeNode) -> String {
        let ty = self.underlying_declare_type(node);
        if node.nullable {
            self.nullable_type(ty)
        } else {
            ty
        }
    }

    /// Initializer expression for a field of type `node`. Containers
    /// initialize themselves and always yield an empty string.
    fn default_value(&self, node: &TypeNode) -> String;

    /// Statements reading `node` from the document node `source` into
    /// `field`. Temporaries are named from `depth` alone.
    fn deserialize(&self, field: &str, source: &str, node: &TypeNode, depth: usize) -> String;
}

/// Item name used as an enum's default: `None` (any case), else the first
/// item. An empty enum falls back to a `None` item it does not declare,
/// which does not compile in any target; a warning names the enum.
pub fn default_enum_item(def: &EnumDef) -> &str {
    match def.default_item() {
        Some(item) => item.name.as_str(),
        None => {
            tracing::warn!(
                enum_name = %def.full_name(),
                "Enum has no items; default refers to an undeclared None item"
            );
            "None"
        }
    }
}
