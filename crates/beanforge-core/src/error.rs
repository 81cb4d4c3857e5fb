//! Error types for model construction and configuration

use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while building the type model
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Two enums/beans share a fully qualified name
    #[error("duplicate type name: {0}")]
    DuplicateType(String),

    /// A type expression names something that does not exist
    #[error("unknown type '{name}' referenced from {context}")]
    UnknownType { name: String, context: String },

    /// A type expression could not be parsed
    #[error("invalid type expression '{expr}': {reason}")]
    InvalidTypeExpr { expr: String, reason: String },

    /// A bean names a parent that does not exist
    #[error("bean '{bean}' has unknown parent '{parent}'")]
    UnknownParent { bean: String, parent: String },

    /// A bean is its own ancestor
    #[error("inheritance cycle involving bean '{0}'")]
    InheritanceCycle(String),

    /// A table's value type is not a bean
    #[error("table '{table}' value type '{value}' is not a bean")]
    TableValueNotBean { table: String, value: String },

    /// A table declares no index
    #[error("table '{0}' declares no index")]
    MissingIndex(String),

    /// A table index names a field its value bean does not have
    #[error("table '{table}' index field '{field}' not found in bean '{bean}'")]
    MissingIndexField {
        table: String,
        field: String,
        bean: String,
    },

    /// The schema document itself could not be read
    #[error("schema parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for SchemaError {
    fn from(err: toml::de::Error) -> Self {
        SchemaError::Parse(err.to_string())
    }
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration document could not be parsed
    #[error("configuration parse error: {0}")]
    Parse(String),

    /// A value is out of its allowed range
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// Unknown identifier casing name
    #[error("unknown casing '{0}' (expected none, camel, pascal, snake or upper)")]
    UnknownCasing(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
