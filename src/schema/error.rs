//! Error types for schema loading, parsing and resolution

use chumsky::error::{Simple, SimpleReason};
use std::path::PathBuf;
use thiserror::Error;

use crate::schema::ast::SourceLocation;
use crate::schema::lexing::Token;

/// Longest excerpt of unmatched text quoted in a [`LexError`]
const EXCERPT_LIMIT: usize = 40;

/// No token rule matched at some position of the input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: unexpected input '{excerpt}'")]
pub struct LexError {
    pub line: usize,
    pub excerpt: String,
}

impl LexError {
    /// Build an error for the unmatched text starting at `offset`
    pub(crate) fn at(source: &str, location: &SourceLocation, offset: usize) -> Self {
        let rest = source.get(offset..).unwrap_or_default();
        let excerpt = rest
            .lines()
            .next()
            .unwrap_or_default()
            .trim_end()
            .chars()
            .take(EXCERPT_LIMIT)
            .collect();

        Self {
            line: location.line_number(offset),
            excerpt,
        }
    }
}

/// The token sequence did not match the schema grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: expected {expected}, found {found}")]
pub struct ParseError {
    pub line: usize,
    pub expected: String,
    pub found: String,
}

impl ParseError {
    pub(crate) fn from_simple(error: &Simple<Token>, location: &SourceLocation) -> Self {
        let found = error
            .found()
            .map(|token| format!("'{}'", token))
            .unwrap_or_else(|| "end of input".to_string());

        let expected = match error.reason() {
            SimpleReason::Custom(message) => message.clone(),
            SimpleReason::Unclosed { delimiter, .. } => format!("closing for '{}'", delimiter),
            SimpleReason::Unexpected => match error.label() {
                Some(label) => label.to_string(),
                None => describe_expected(error),
            },
        };

        Self {
            line: location.line_number(error.span().start),
            expected,
            found,
        }
    }
}

fn describe_expected(error: &Simple<Token>) -> String {
    let mut expected: Vec<String> = error
        .expected()
        .map(|token| match token {
            Some(token) => format!("'{}'", token),
            None => "end of input".to_string(),
        })
        .collect();
    expected.sort();
    expected.dedup();

    if expected.is_empty() {
        "a schema definition".to_string()
    } else {
        expected.join(" or ")
    }
}

/// One or more requested object classes have no definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing object class definitions: {}", .names.join(", "))]
pub struct MissingObjectClassDefinition {
    pub names: Vec<String>,
}

/// Umbrella error for schema loading and class derivation
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    MissingObjectClass(#[from] MissingObjectClassDefinition),

    /// A configured schema file could not be read
    #[error("failed to read schema file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A lex or parse failure inside a specific schema file
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<SchemaError>,
    },

    /// The identifying attribute of a mapped class is not among its fields
    #[error("unique identifier {attribute} is not an attribute of {}", .object_classes.join(", "))]
    UnknownIdentifier {
        attribute: String,
        object_classes: Vec<String>,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl SchemaError {
    /// Line number of the underlying lex or parse failure, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            SchemaError::Lex(error) => Some(error.line),
            SchemaError::Parse(error) => Some(error.line),
            SchemaError::File { source, .. } => source.line(),
            _ => None,
        }
    }
}
