//! # ldap-schema
//!
//! Reads LDAP schema description files (RFC 4512 `attributetype`,
//! `objectclass`, `objectidentifier` and `ldapsyntax` definitions, in the
//! OpenLDAP `.schema` layout) and answers which attributes an object class
//! allows or requires.
//!
//! ```text
//! let schema = Schema::parse(&std::fs::read_to_string("nis.schema")?)?;
//! let fields = schema.attributes(&["posixAccount"])?;
//! ```
//!
//! Attribute names come back in their canonical spelling: the first `NAME`
//! of the attribute type that defines them, with `uid`/`userid` always
//! treated as one attribute.

pub mod schema;

pub use schema::{
    parse, DerivedClass, LexError, MissingObjectClassDefinition, ObjectClassMapping, ParseError,
    Schema, SchemaError, SchemaLoader,
};
