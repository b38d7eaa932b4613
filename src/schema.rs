//! Main module for schema description handling
//!
//! Pipeline: [`lexing`] turns text into tokens, [`parsing`] turns tokens into
//! [`ast::Definition`]s, [`resolution`] answers attribute queries over the
//! parsed object classes. [`loader`] and [`config`] drive the pipeline from
//! files on disk, and [`mapping`] derives application classes from the result.

pub mod ast;
pub mod config;
pub mod error;
pub mod lexing;
pub mod loader;
pub mod mapping;
pub mod parsing;
pub mod resolution;

pub use ast::{AttributeUsage, ClassKind, Definition, Element, Property, SyntaxRef};
pub use error::{LexError, MissingObjectClassDefinition, ParseError, SchemaError};
pub use lexing::{lex, Token};
pub use loader::SchemaLoader;
pub use mapping::{DerivedClass, ObjectClassMapping};
pub use parsing::parse;
pub use resolution::{AliasTable, Schema};
