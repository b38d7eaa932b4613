//! Object class attribute resolution
//!
//! A [`Schema`] owns the parsed definitions of every configured file plus the
//! derived [`AliasTable`]. It is built once at load time and only read
//! afterwards, so it can be shared freely between threads.
//!
//! Resolution answers two questions for a set of object class names: which
//! attributes the classes allow (`MUST` and `MAY`), and which they require
//! (`MUST` only). Attribute names are rewritten to the canonical (first) alias
//! of the attribute type that defines them.

use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::schema::ast::{Definition, Element};
use crate::schema::error::{MissingObjectClassDefinition, SchemaError};
use crate::schema::parsing::parse;

/// Alias groups that exist regardless of the loaded schema files
pub fn default_builtin_aliases() -> Vec<Vec<String>> {
    vec![vec!["uid".to_string(), "userid".to_string()]]
}

/// Attribute name alias groups
///
/// One group per attribute type definition, in definition order, followed by
/// the builtin groups. A name resolves through the first group containing it.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    groups: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl AliasTable {
    pub fn new(definitions: &[Definition], builtin: Vec<Vec<String>>) -> Self {
        let parsed = definitions
            .iter()
            .filter_map(Definition::as_attribute_type)
            .map(|attribute| {
                attribute
                    .names()
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            });

        let mut table = Self::default();
        for group in parsed.chain(builtin) {
            table.push_group(group);
        }
        table
    }

    fn push_group(&mut self, group: Vec<String>) {
        if group.is_empty() {
            return;
        }
        let position = self.groups.len();
        for alias in &group {
            self.index.entry(alias.clone()).or_insert(position);
        }
        self.groups.push(group);
    }

    /// The canonical spelling of `name`, or `name` itself if no group has it
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.group(name)
            .and_then(|group| group.first())
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// The alias group containing `name`
    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.index
            .get(name)
            .map(|&position| self.groups[position].as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Parsed schema definitions with their alias table
#[derive(Debug, Clone)]
pub struct Schema {
    definitions: Vec<Definition>,
    aliases: AliasTable,
}

impl Schema {
    /// Build a schema with the default builtin alias groups
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self::with_builtin_aliases(definitions, default_builtin_aliases())
    }

    pub fn with_builtin_aliases(definitions: Vec<Definition>, builtin: Vec<Vec<String>>) -> Self {
        let aliases = AliasTable::new(&definitions, builtin);
        Self {
            definitions,
            aliases,
        }
    }

    /// Parse a single schema text
    pub fn parse(source: &str) -> Result<Self, SchemaError> {
        Ok(Self::new(parse(source)?))
    }

    /// Parse several schema texts, appending definitions in order
    pub fn from_sources<I, S>(sources: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut definitions = Vec::new();
        for source in sources {
            definitions.extend(parse(source.as_ref())?);
        }
        Ok(Self::new(definitions))
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.canonical(name)
    }

    pub fn object_classes(&self) -> impl Iterator<Item = &Element> {
        self.definitions
            .iter()
            .filter_map(Definition::as_object_class)
    }

    /// First object class definition carrying `name` among its aliases
    pub fn object_class(&self, name: &str) -> Option<&Element> {
        self.object_classes().find(|class| class.has_name(name))
    }

    /// Canonical names of every `MUST` and `MAY` attribute of the classes
    pub fn attributes<S: AsRef<str>>(
        &self,
        object_classes: &[S],
    ) -> Result<Vec<String>, MissingObjectClassDefinition> {
        self.resolve(object_classes, |class| {
            let mut attributes = class.must();
            attributes.extend(class.may());
            attributes
        })
    }

    /// Canonical names of every `MUST` attribute of the classes
    pub fn required_attributes<S: AsRef<str>>(
        &self,
        object_classes: &[S],
    ) -> Result<Vec<String>, MissingObjectClassDefinition> {
        self.resolve(object_classes, Element::must)
    }

    fn resolve<'s, S, F>(
        &'s self,
        object_classes: &[S],
        select: F,
    ) -> Result<Vec<String>, MissingObjectClassDefinition>
    where
        S: AsRef<str>,
        F: Fn(&'s Element) -> Vec<&'s str>,
    {
        let mut missing = Vec::new();
        let mut classes = Vec::with_capacity(object_classes.len());

        for name in object_classes {
            let name = name.as_ref();
            match self.lookup(name) {
                Some(class) => classes.push(class),
                None => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(MissingObjectClassDefinition { names: missing });
        }

        let mut seen = HashSet::new();
        let mut attributes = Vec::new();
        for class in classes {
            for attribute in select(class) {
                let canonical = self.aliases.canonical(attribute);
                if seen.insert(canonical) {
                    attributes.push(canonical.to_string());
                }
            }
        }

        Ok(attributes)
    }

    /// Find the class for `name`, warning when later definitions share it
    fn lookup(&self, name: &str) -> Option<&Element> {
        let mut matches = self.object_classes().filter(|class| class.has_name(name));
        let first = matches.next()?;
        for duplicate in matches {
            warn!(
                object_class = name,
                used_line = first.line,
                ignored_line = duplicate.line,
                "duplicate object class definition, keeping the first"
            );
        }
        Some(first)
    }
}
