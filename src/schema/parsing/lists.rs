//! List-valued productions
//!
//! Several clauses accept either a single value or a parenthesized list:
//!
//! - `NAME 'a'` and `NAME ( 'a' 'b' )` (`real_qdescrs`)
//! - `MUST a` and `MUST ( a $ b )` (`real_oids`)
//!
//! The lexer delivers the list forms as compound tokens with their raw inner
//! text. The productions here dispatch on the token kind: scalars are wrapped
//! into a one-element list, compound tokens are split on their delimiters.

use chumsky::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::ast::SyntaxRef;
use crate::schema::lexing::Token;

type ParserError = Simple<Token>;

static QUOTED_STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r"'[^']*'").unwrap());
static DESCRIPTOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9;-]*$").unwrap());
static OIDS_DELIMITERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s()$]+").unwrap());

/// Strip one pair of surrounding single quotes
pub(crate) fn unquote(raw: &str) -> String {
    raw.strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(raw)
        .to_string()
}

/// Split the raw text of a `QDescrs` token into its unquoted strings
pub(crate) fn split_qdescrs(raw: &str) -> Vec<String> {
    QUOTED_STRING
        .find_iter(raw)
        .map(|quoted| unquote(quoted.as_str()))
        .collect()
}

/// Check that a NAME alias has the shape of a descriptor
pub(crate) fn is_descriptor(alias: &str) -> bool {
    DESCRIPTOR.is_match(alias)
}

/// Split the raw text of an `Oids` token into OID references
pub(crate) fn split_oids(raw: &str) -> Vec<String> {
    OIDS_DELIMITERS
        .split(raw)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split `1.2.3{32}` into its OID and length bound
pub(crate) fn split_noidlen(raw: &str) -> Option<SyntaxRef> {
    let (oid, rest) = raw.split_once('{')?;
    let length = rest.strip_suffix('}')?.parse().ok()?;
    Some(SyntaxRef {
        oid: oid.to_string(),
        length: Some(length),
    })
}

/// A single quoted string, unquoted
pub(crate) fn qdstring() -> impl Parser<Token, String, Error = ParserError> + Clone {
    select! { Token::QdString(raw) => unquote(&raw) }.labelled("quoted string")
}

/// A descriptor or numeric OID
pub(crate) fn oid() -> impl Parser<Token, String, Error = ParserError> + Clone {
    select! {
        Token::Woid(oid) => oid,
        Token::NumericOid(oid) => oid,
    }
    .labelled("oid")
}

/// One or more quoted descriptors, bare or parenthesized
pub(crate) fn real_qdescrs() -> impl Parser<Token, Vec<String>, Error = ParserError> + Clone {
    select! {
        Token::QDescrs(raw) => split_qdescrs(&raw),
        Token::QdString(raw) => vec![unquote(&raw)],
    }
    .labelled("quoted descriptors")
}

/// One or more OID references, bare or parenthesized
pub(crate) fn real_oids() -> impl Parser<Token, Vec<String>, Error = ParserError> + Clone {
    select! {
        Token::Oids(raw) => split_oids(&raw),
        Token::Woid(oid) => vec![oid],
        Token::NumericOid(oid) => vec![oid],
    }
    .labelled("oids")
}

/// A SYNTAX reference: OID with length, bare numeric OID, or a named syntax
pub(crate) fn real_noidlen() -> impl Parser<Token, SyntaxRef, Error = ParserError> + Clone {
    filter_map(|span, token| match token {
        Token::NoIdLen(raw) => split_noidlen(&raw)
            .ok_or_else(|| Simple::custom(span, format!("a syntax length that fits, not {}", raw))),
        Token::NumericOid(oid) | Token::Woid(oid) => Ok(SyntaxRef { oid, length: None }),
        other => Err(Simple::expected_input_found(span, None, Some(other))),
    })
    .labelled("syntax oid")
}
