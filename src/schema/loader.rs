//! Loading schema files from disk
//!
//! Files are read and parsed in the order they were added. Definitions of all
//! files are concatenated before the alias table is built, so an attribute
//! type in a later file still canonicalizes names used by an earlier one.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::schema::ast::Definition;
use crate::schema::config::SchemaConfig;
use crate::schema::error::SchemaError;
use crate::schema::parsing::parse;
use crate::schema::resolution::{default_builtin_aliases, Schema};

#[derive(Debug, Clone)]
pub struct SchemaLoader {
    paths: Vec<PathBuf>,
    builtin_aliases: Vec<Vec<String>>,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            builtin_aliases: default_builtin_aliases(),
        }
    }

    /// Take the file list and builtin alias groups from a loaded configuration
    pub fn from_config(config: &SchemaConfig) -> Self {
        Self {
            paths: config.schema.files.clone(),
            builtin_aliases: config.aliases.builtin.clone(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn with_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_builtin_aliases(mut self, builtin: Vec<Vec<String>>) -> Self {
        self.builtin_aliases = builtin;
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Read and parse every file, then build the schema
    pub fn load(&self) -> Result<Schema, SchemaError> {
        let mut definitions = Vec::new();
        for path in &self.paths {
            let parsed = load_file(path)?;
            debug!(path = %path.display(), definitions = parsed.len(), "loaded schema file");
            definitions.extend(parsed);
        }

        Ok(Schema::with_builtin_aliases(
            definitions,
            self.builtin_aliases.clone(),
        ))
    }
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_file(path: &Path) -> Result<Vec<Definition>, SchemaError> {
    let source = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&source).map_err(|error| SchemaError::File {
        path: path.to_path_buf(),
        source: Box::new(error),
    })
}
