//! Parser for schema description files using chumsky
//!
//! Grammar:
//!
//! ```text
//! schema          := definition* EOI
//! definition      := attributetype element
//!                  | objectclass element
//!                  | ldapsyntax element
//!                  | objectidentifier woid numericoid
//! element         := '(' oid property* ')'
//! ```
//!
//! The properties allowed inside an element depend on the definition kind.
//! `NAME`, `DESC`, `OBSOLETE`, `SUP` and `X-` extensions are shared by
//! attribute types and object classes. Object classes add the kind keywords,
//! `MUST` and `MAY`. Attribute types add matching rules, `SYNTAX`, the
//! presence flags and `USAGE`. Syntax definitions only take `DESC` and
//! extensions. Properties may appear in any order and any number of times.
//!
//! Attribute types and object classes must carry exactly one non-empty `NAME`
//! clause; this is checked once the token stream has matched the grammar.
//!
//! Parsing is all-or-nothing: the first mismatch becomes a [`ParseError`].

pub mod lists;

use chumsky::prelude::*;
use chumsky::Stream;
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

use crate::schema::ast::{ClassKind, Definition, Element, Property, SourceLocation};
use crate::schema::error::{ParseError, SchemaError};
use crate::schema::lexing::{lex, Token, TokenSpan};

use lists::{is_descriptor, oid, qdstring, real_noidlen, real_oids, real_qdescrs};

/// Type alias for parser error
type ParserError = Simple<Token>;

/// Lex and parse schema text into its definitions
pub fn parse(source: &str) -> Result<Vec<Definition>, SchemaError> {
    let tokens = lex(source)?;
    let definitions = parse_tokens(source, tokens)?;
    debug!(definitions = definitions.len(), "parsed schema source");
    Ok(definitions)
}

/// Parse an already lexed token stream
///
/// `source` is only used to turn byte spans into line numbers.
pub fn parse_tokens(source: &str, tokens: Vec<TokenSpan>) -> Result<Vec<Definition>, ParseError> {
    let location = Arc::new(SourceLocation::new(source));
    let eoi = source.len()..source.len();
    let stream = Stream::from_iter(eoi, tokens.into_iter());

    let definitions = schema(location.clone())
        .parse(stream)
        .map_err(|errors| match errors.first() {
            Some(error) => ParseError::from_simple(error, &location),
            None => ParseError {
                line: location.line_count(),
                expected: "a schema definition".to_string(),
                found: "nothing".to_string(),
            },
        })?;

    definitions.iter().try_for_each(check_names)?;
    Ok(definitions)
}

/// Top-level parser: all definitions up to end of input
pub fn schema(
    location: Arc<SourceLocation>,
) -> impl Parser<Token, Vec<Definition>, Error = ParserError> {
    definition(location).repeated().then_ignore(end())
}

/// A single top-level definition
pub fn definition(
    location: Arc<SourceLocation>,
) -> impl Parser<Token, Definition, Error = ParserError> + Clone {
    let attribute_type = just(Token::AttributeTypeKeyword)
        .ignore_then(element(location.clone(), attribute_type_property()))
        .map(Definition::AttributeType);

    let object_class = just(Token::ObjectClassKeyword)
        .ignore_then(element(location.clone(), object_class_property()))
        .map(Definition::ObjectClass);

    let ldap_syntax = just(Token::LdapSyntaxKeyword)
        .ignore_then(element(location.clone(), syntax_property()))
        .map(Definition::LdapSyntax);

    let object_identifier = just(Token::ObjectIdentifierKeyword)
        .ignore_then(select! { Token::Woid(name) => name }.labelled("macro name"))
        .then(select! { Token::NumericOid(oid) => oid }.labelled("numeric oid"))
        .map_with_span(move |(name, oid), span: Range<usize>| Definition::ObjectIdentifier {
            name,
            oid,
            line: location.span_line(&span),
        });

    choice((attribute_type, object_class, ldap_syntax, object_identifier))
}

/// `'(' oid property* ')'`
fn element<P>(
    location: Arc<SourceLocation>,
    property: P,
) -> impl Parser<Token, Element, Error = ParserError> + Clone
where
    P: Parser<Token, Property, Error = ParserError> + Clone,
{
    just(Token::OpenParen)
        .ignore_then(oid())
        .then(property.repeated())
        .then_ignore(just(Token::CloseParen))
        .map_with_span(move |(oid, properties), span: Range<usize>| {
            Element::new(oid, location.span_line(&span), properties)
        })
}

/// Named definitions must carry exactly one non-empty NAME clause of descriptors
fn check_names(definition: &Definition) -> Result<(), ParseError> {
    let element = match definition {
        Definition::AttributeType(element) | Definition::ObjectClass(element) => element,
        _ => return Ok(()),
    };

    let clauses: Vec<&Vec<String>> = element
        .properties
        .iter()
        .filter_map(|property| match property {
            Property::Name(names) => Some(names),
            _ => None,
        })
        .collect();

    let found = match clauses.as_slice() {
        [names] if !names.is_empty() => match names.iter().find(|alias| !is_descriptor(alias)) {
            None => return Ok(()),
            Some(alias) => format!("the alias '{}'", alias),
        },
        [] => "no NAME clause".to_string(),
        [_] => "an empty NAME list".to_string(),
        many => format!("{} NAME clauses", many.len()),
    };

    Err(ParseError {
        line: element.line,
        expected: format!("a non-empty NAME clause in definition {}", element.oid),
        found,
    })
}

/// Properties shared by attribute types and object classes
fn shared_property() -> impl Parser<Token, Property, Error = ParserError> + Clone {
    let name = just(Token::Name)
        .ignore_then(real_qdescrs())
        .map(Property::Name);
    let desc = just(Token::Desc).ignore_then(qdstring()).map(Property::Desc);
    let obsolete = just(Token::Obsolete).to(Property::Obsolete);
    let sup = just(Token::Sup).ignore_then(real_oids()).map(Property::Sup);

    choice((name, desc, obsolete, sup, extension()))
}

/// `X-NAME qdstrings`
fn extension() -> impl Parser<Token, Property, Error = ParserError> + Clone {
    select! { Token::Extension(name) => name }
        .then(real_qdescrs())
        .map(|(name, values)| Property::Extension { name, values })
}

fn object_class_property() -> impl Parser<Token, Property, Error = ParserError> + Clone {
    let kind = choice((
        just(Token::Abstract).to(ClassKind::Abstract),
        just(Token::Structural).to(ClassKind::Structural),
        just(Token::Auxiliary).to(ClassKind::Auxiliary),
    ))
    .map(Property::Kind);
    let must = just(Token::Must).ignore_then(real_oids()).map(Property::Must);
    let may = just(Token::May).ignore_then(real_oids()).map(Property::May);

    choice((shared_property(), kind, must, may))
}

fn attribute_type_property() -> impl Parser<Token, Property, Error = ParserError> + Clone {
    let equality = just(Token::Equality)
        .ignore_then(oid())
        .map(Property::Equality);
    let ordering = just(Token::Ordering)
        .ignore_then(oid())
        .map(Property::Ordering);
    let substr = just(Token::Substr).ignore_then(oid()).map(Property::Substr);
    let syntax = just(Token::Syntax)
        .ignore_then(real_noidlen())
        .map(Property::Syntax);
    let flags = choice((
        just(Token::SingleValue).to(Property::SingleValue),
        just(Token::Collective).to(Property::Collective),
        just(Token::NoUserModification).to(Property::NoUserModification),
    ));
    let usage = just(Token::Usage)
        .ignore_then(select! { Token::UsageValue(usage) => usage }.labelled("attribute usage"))
        .map(Property::Usage);

    choice((
        shared_property(),
        equality,
        ordering,
        substr,
        syntax,
        flags,
        usage,
    ))
}

fn syntax_property() -> impl Parser<Token, Property, Error = ParserError> + Clone {
    let desc = just(Token::Desc).ignore_then(qdstring()).map(Property::Desc);

    choice((desc, extension()))
}
