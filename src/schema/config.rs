//! Layered configuration for schema loading
//!
//! `defaults/schema.default.toml` is embedded into the crate so that docs and
//! runtime behavior stay in sync. Applications layer their own files on top of
//! those defaults via [`Loader`] before deserializing into [`SchemaConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../../defaults/schema.default.toml");

/// Top-level configuration consumed by [`SchemaLoader`](crate::schema::loader::SchemaLoader).
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    pub schema: SourcesConfig,
    pub aliases: AliasConfig,
}

/// Which schema files to load, in order.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AliasConfig {
    pub builtin: Vec<Vec<String>>,
}

/// File name picked up from the working directory when present
pub const LOCAL_CONFIG_FILE: &str = "ldap-schema.toml";

/// Layers schema settings over the embedded defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded defaults
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file that must exist
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a TOML file, skipping it when absent
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Replace a single key, e.g. `schema.files`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SchemaConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
