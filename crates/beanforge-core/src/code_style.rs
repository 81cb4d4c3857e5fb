//! Identifier casing for generated code.
//!
//! Every emitted identifier goes through [`CodeStyle::format_identifier`]
//! exactly once, with the [`NameRole`] it plays. The style is an explicit
//! value handed to emitters, never process-wide state.
//!
//! # Supported Casings
//!
//! | Input | Casing | Output |
//! |-------|--------|--------|
//! | `sub_id` | [`Casing::Camel`] | `subId` |
//! | `sub_id` | [`Casing::Pascal`] | `SubId` |
//! | `SubId` | [`Casing::Snake`] | `sub_id` |
//! | `SubId` | [`Casing::Upper`] | `SUB_ID` |
//! | `SubId` | [`Casing::None`] | `SubId` |

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What an identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameRole {
    Namespace,
    Type,
    Method,
    Property,
    Field,
    EnumItem,
}

/// An identifier casing convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casing {
    /// Keep the identifier as authored.
    #[default]
    None,
    Camel,
    Pascal,
    Snake,
    Upper,
}

impl Casing {
    pub fn apply(self, raw: &str) -> String {
        match self {
            Casing::None => raw.to_string(),
            Casing::Camel => to_camel_case(raw),
            Casing::Pascal => to_pascal_case(raw),
            Casing::Snake => to_snake_case(raw),
            Casing::Upper => to_snake_case(raw).to_uppercase(),
        }
    }
}

impl FromStr for Casing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Casing::None),
            "camel" => Ok(Casing::Camel),
            "pascal" => Ok(Casing::Pascal),
            "snake" => Ok(Casing::Snake),
            "upper" => Ok(Casing::Upper),
            _ => Err(ConfigError::UnknownCasing(s.to_string())),
        }
    }
}

/// Per-role casings plus the target's reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeStyle {
    pub namespace: Casing,
    pub type_name: Casing,
    pub method: Casing,
    pub property: Casing,
    pub field: Casing,
    pub enum_item: Casing,
    keywords: &'static [&'static str],
}

impl CodeStyle {
    /// Style that keeps every identifier as authored and reserves nothing.
    pub const fn none() -> Self {
        Self::new([Casing::None; 6], &[])
    }

    /// Build a style from casings in role order (namespace, type, method,
    /// property, field, enum item).
    pub const fn new(casings: [Casing; 6], keywords: &'static [&'static str]) -> Self {
        Self {
            namespace: casings[0],
            type_name: casings[1],
            method: casings[2],
            property: casings[3],
            field: casings[4],
            enum_item: casings[5],
            keywords,
        }
    }

    pub fn casing(&self, role: NameRole) -> Casing {
        match role {
            NameRole::Namespace => self.namespace,
            NameRole::Type => self.type_name,
            NameRole::Method => self.method,
            NameRole::Property => self.property,
            NameRole::Field => self.field,
            NameRole::EnumItem => self.enum_item,
        }
    }

    pub fn is_keyword(&self, ident: &str) -> bool {
        self.keywords.contains(&ident)
    }

    /// Case `raw` for `role`; reserved words get a trailing underscore.
    pub fn format_identifier(&self, raw: &str, role: NameRole) -> String {
        let formatted = self.casing(role).apply(raw);
        if self.is_keyword(&formatted) {
            format!("{formatted}_")
        } else {
            formatted
        }
    }

    pub fn format_field(&self, raw: &str) -> String {
        self.format_identifier(raw, NameRole::Field)
    }

    pub fn format_property(&self, raw: &str) -> String {
        self.format_identifier(raw, NameRole::Property)
    }
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self::none()
    }
}

fn split_words(s: &str) -> impl Iterator<Item = &str> {
    s.split(['-', '_', ' ']).filter(|w| !w.is_empty())
}

/// Convert to camelCase.
///
/// # Examples
///
/// ```
/// use beanforge_core::code_style::to_camel_case;
///
/// assert_eq!(to_camel_case("display_name"), "displayName");
/// assert_eq!(to_camel_case("SubId"), "subId");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Convert to PascalCase.
///
/// Handles snake_case, kebab-case, and already-capitalized input.
///
/// # Examples
///
/// ```
/// use beanforge_core::code_style::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("hello-world"), "HelloWorld");
/// assert_eq!(to_pascal_case("subId"), "SubId");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).map(capitalize).collect()
}

/// Convert to snake_case, splitting on lower-to-upper transitions.
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for word in split_words(s) {
        if !out.is_empty() {
            out.push('_');
        }
        let mut prev_lower = false;
        for c in word.chars() {
            if c.is_uppercase() && prev_lower {
                out.push('_');
            }
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use beanforge_core::code_style::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
