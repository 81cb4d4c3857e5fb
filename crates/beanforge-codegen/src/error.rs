//! Error types for code generation

use thiserror::Error;

/// Result type alias for generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Structural failures that abort a generation run.
///
/// Malformed optional input (such as an unparseable default literal) never
/// produces one of these; it degrades to the target's default instead.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A table declares no index to key its rows by
    #[error("table '{0}' has no key field")]
    NoKeyField(String),

    /// A table index names a field the value bean hierarchy does not have
    #[error("table '{table}' key field '{field}' is missing from its value type")]
    MissingKeyField { table: String, field: String },

    /// No registered code target has this name
    #[error("unknown code target '{name}' (available: {available})")]
    UnknownCodeTarget { name: String, available: String },

    /// The worker pool could not be created
    #[error("failed to start generation workers: {0}")]
    WorkerPool(String),

    /// A generation unit failed
    #[error("generation unit '{unit}' failed: {source}")]
    Unit {
        unit: String,
        #[source]
        source: Box<CodegenError>,
    },
}

impl CodegenError {
    /// Attach the name of the unit that failed.
    pub fn in_unit(self, unit: impl Into<String>) -> Self {
        CodegenError::Unit {
            unit: unit.into(),
            source: Box::new(self),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for CodegenError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        CodegenError::WorkerPool(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
