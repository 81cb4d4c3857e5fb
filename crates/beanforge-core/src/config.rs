//! Generation configuration

use crate::code_style::{Casing, CodeStyle};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Settings for one generation run, usually read from `beanforge.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Generation target name matched against type mappers (e.g. `client`)
    #[serde(default = "default_target")]
    pub target: String,

    /// Code target to emit (e.g. `typescript-puerts`)
    #[serde(default)]
    pub code_target: Option<String>,

    /// Directory generated files are written under
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name of the table registry, replacing the code target's default
    #[serde(default)]
    pub output_file: Option<String>,

    /// Number of generation worker threads (default: rayon's global pool)
    #[serde(default)]
    pub worker_threads: Option<usize>,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Per-role casing overrides applied on top of the code target's style
    #[serde(default)]
    pub code_style: CodeStyleOverrides,
}

fn default_target() -> String {
    "all".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("gen")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            code_target: None,
            output_dir: default_output_dir(),
            output_file: None,
            worker_threads: None,
            log_level: default_log_level(),
            code_style: CodeStyleOverrides::default(),
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate configuration from TOML text. Empty text yields defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_threads == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "worker_threads".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "log_level".into(),
                reason: format!("'{}' is not one of {}", self.log_level, LOG_LEVELS.join(", ")),
            });
        }
        if self.target.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "target".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

/// Optional casing per identifier role. Unset roles keep the code target's choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeStyleOverrides {
    #[serde(default)]
    pub namespace: Option<Casing>,
    #[serde(default)]
    pub type_name: Option<Casing>,
    #[serde(default)]
    pub method: Option<Casing>,
    #[serde(default)]
    pub property: Option<Casing>,
    #[serde(default)]
    pub field: Option<Casing>,
    #[serde(default)]
    pub enum_item: Option<Casing>,
}

impl CodeStyleOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `base` with every set override applied. Reserved words are kept.
    pub fn apply(&self, base: CodeStyle) -> CodeStyle {
        let mut style = base;
        if let Some(casing) = self.namespace {
            style.namespace = casing;
        }
        if let Some(casing) = self.type_name {
            style.type_name = casing;
        }
        if let Some(casing) = self.method {
            style.method = casing;
        }
        if let Some(casing) = self.property {
            style.property = casing;
        }
        if let Some(casing) = self.field {
            style.field = casing;
        }
        if let Some(casing) = self.enum_item {
            style.enum_item = casing;
        }
        style
    }
}
