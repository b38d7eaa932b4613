//! Parsed schema definitions
//!
//! A schema file parses into an ordered list of [`Definition`]s. Attribute
//! types, object classes and LDAP syntaxes share the same shape: a leading OID
//! followed by an ordered bag of [`Property`] entries. The bag is a list, not a
//! map: clauses may repeat and every occurrence is kept in source order.

pub mod position;

pub use position::SourceLocation;

use serde::Serialize;
use std::fmt;

/// A top-level definition from a schema file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Definition {
    AttributeType(Element),
    ObjectClass(Element),
    LdapSyntax(Element),
    /// `objectIdentifier <name> <oid>` macro
    ObjectIdentifier {
        name: String,
        oid: String,
        line: usize,
    },
}

impl Definition {
    /// Short label for the definition kind, as written in schema files
    pub fn keyword(&self) -> &'static str {
        match self {
            Definition::AttributeType(_) => "attributetype",
            Definition::ObjectClass(_) => "objectclass",
            Definition::LdapSyntax(_) => "ldapsyntax",
            Definition::ObjectIdentifier { .. } => "objectidentifier",
        }
    }

    pub fn as_object_class(&self) -> Option<&Element> {
        match self {
            Definition::ObjectClass(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_attribute_type(&self) -> Option<&Element> {
        match self {
            Definition::AttributeType(element) => Some(element),
            _ => None,
        }
    }

    /// Source line the definition body starts on
    pub fn line(&self) -> usize {
        match self {
            Definition::AttributeType(element)
            | Definition::ObjectClass(element)
            | Definition::LdapSyntax(element) => element.line,
            Definition::ObjectIdentifier { line, .. } => *line,
        }
    }
}

/// The parenthesized body of a definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub oid: String,
    pub line: usize,
    pub properties: Vec<Property>,
}

impl Element {
    pub fn new(oid: impl Into<String>, line: usize, properties: Vec<Property>) -> Self {
        Self {
            oid: oid.into(),
            line,
            properties,
        }
    }

    /// All aliases from the NAME clause(s), in order
    pub fn names(&self) -> Vec<&str> {
        self.collect_lists(|property| match property {
            Property::Name(names) => Some(names),
            _ => None,
        })
    }

    /// The first alias, used as the canonical name
    pub fn canonical_name(&self) -> Option<&str> {
        self.properties.iter().find_map(|property| match property {
            Property::Name(names) => names.first().map(String::as_str),
            _ => None,
        })
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.properties.iter().any(|property| match property {
            Property::Name(names) => names.iter().any(|alias| alias == name),
            _ => false,
        })
    }

    pub fn desc(&self) -> Option<&str> {
        self.properties.iter().find_map(|property| match property {
            Property::Desc(desc) => Some(desc.as_str()),
            _ => None,
        })
    }

    pub fn is_obsolete(&self) -> bool {
        self.properties.contains(&Property::Obsolete)
    }

    pub fn kind(&self) -> Option<ClassKind> {
        self.properties.iter().find_map(|property| match property {
            Property::Kind(kind) => Some(*kind),
            _ => None,
        })
    }

    pub fn superiors(&self) -> Vec<&str> {
        self.collect_lists(|property| match property {
            Property::Sup(oids) => Some(oids),
            _ => None,
        })
    }

    /// Required attributes across every MUST clause
    pub fn must(&self) -> Vec<&str> {
        self.collect_lists(|property| match property {
            Property::Must(oids) => Some(oids),
            _ => None,
        })
    }

    /// Optional attributes across every MAY clause
    pub fn may(&self) -> Vec<&str> {
        self.collect_lists(|property| match property {
            Property::May(oids) => Some(oids),
            _ => None,
        })
    }

    fn collect_lists<'a, F>(&'a self, select: F) -> Vec<&'a str>
    where
        F: Fn(&'a Property) -> Option<&'a Vec<String>>,
    {
        self.properties
            .iter()
            .filter_map(select)
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

/// One clause inside a definition body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum Property {
    Name(Vec<String>),
    Desc(String),
    Obsolete,
    Sup(Vec<String>),
    Kind(ClassKind),
    Must(Vec<String>),
    May(Vec<String>),
    Equality(String),
    Ordering(String),
    Substr(String),
    Syntax(SyntaxRef),
    SingleValue,
    Collective,
    NoUserModification,
    Usage(AttributeUsage),
    Extension { name: String, values: Vec<String> },
}

impl Property {
    /// The clause key, e.g. `must` or `single_value`
    pub fn key(&self) -> &'static str {
        match self {
            Property::Name(_) => "name",
            Property::Desc(_) => "desc",
            Property::Obsolete => "obsolete",
            Property::Sup(_) => "sup",
            Property::Kind(_) => "kind",
            Property::Must(_) => "must",
            Property::May(_) => "may",
            Property::Equality(_) => "equality",
            Property::Ordering(_) => "ordering",
            Property::Substr(_) => "substr",
            Property::Syntax(_) => "syntax",
            Property::SingleValue => "single_value",
            Property::Collective => "collective",
            Property::NoUserModification => "no_user_modification",
            Property::Usage(_) => "usage",
            Property::Extension { .. } => "extensions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Abstract,
    Structural,
    Auxiliary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeUsage {
    #[serde(rename = "userApplications")]
    UserApplications,
    #[serde(rename = "directoryOperation")]
    DirectoryOperation,
    #[serde(rename = "distributedOperation")]
    DistributedOperation,
    #[serde(rename = "dSAOperation")]
    DsaOperation,
}

impl fmt::Display for AttributeUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttributeUsage::UserApplications => "userApplications",
            AttributeUsage::DirectoryOperation => "directoryOperation",
            AttributeUsage::DistributedOperation => "distributedOperation",
            AttributeUsage::DsaOperation => "dSAOperation",
        })
    }
}

/// Reference from a SYNTAX clause: an OID, optionally with a length bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxRef {
    pub oid: String,
    pub length: Option<u32>,
}
