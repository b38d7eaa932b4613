//! List grouping transformation
//!
//! Folds parenthesized list shapes from the raw logos stream into compound
//! tokens:
//!
//! - `(` QdString* `)` becomes [`Token::QDescrs`]
//! - `(` oid (`$` oid)* `)` becomes [`Token::Oids`], where an oid is a
//!   [`Token::Woid`] or a [`Token::NumericOid`]
//!
//! The compound token spans from the opening to the closing parenthesis and
//! carries the raw source text between them. Any other `(` is left alone: it
//! opens a definition body.
//!
//! Attribute names such as `objectClass` or `userApplications` share their
//! spelling with a definition keyword or a usage value. Inside an OID list,
//! and right after a keyword that takes an OID value, such a keyword is read
//! as the descriptor it spells.

use crate::schema::lexing::{Token, TokenSpan};

/// Group list shapes in a raw token stream
pub fn group_lists(source: &str, tokens: Vec<TokenSpan>) -> Vec<TokenSpan> {
    let mut grouped = Vec::with_capacity(tokens.len());
    let mut index = 0;

    while index < tokens.len() {
        let (token, span) = &tokens[index];
        if *token != Token::OpenParen {
            let in_value_position = grouped
                .last()
                .is_some_and(|(previous, _): &TokenSpan| previous.takes_oid_value());
            let token = if in_value_position && spells_descriptor(token) {
                Token::Woid(source[span.clone()].to_string())
            } else {
                token.clone()
            };
            grouped.push((token, span.clone()));
            index += 1;
            continue;
        }

        let rest = &tokens[index + 1..];
        let folded = match_qdescrs(rest)
            .map(|close| (close, Token::QDescrs as fn(String) -> Token))
            .or_else(|| match_oids(rest).map(|close| (close, Token::Oids as fn(String) -> Token)));

        match folded {
            Some((close, make)) => {
                let close_span = &rest[close].1;
                let raw = source[span.end..close_span.start].to_string();
                grouped.push((make(raw), span.start..close_span.end));
                index += close + 2;
            }
            None => {
                grouped.push((token.clone(), span.clone()));
                index += 1;
            }
        }
    }

    grouped
}

/// Index of the closing paren if `rest` starts with quoted strings and `)`
fn match_qdescrs(rest: &[TokenSpan]) -> Option<usize> {
    rest.iter()
        .position(|(token, _)| !matches!(token, Token::QdString(_)))
        .filter(|&close| rest[close].0 == Token::CloseParen)
}

/// Index of the closing paren if `rest` starts with `$`-separated OIDs and `)`
fn match_oids(rest: &[TokenSpan]) -> Option<usize> {
    let mut expect_oid = true;

    for (position, (token, _)) in rest.iter().enumerate() {
        match token {
            token if expect_oid && is_list_word(token) => expect_oid = false,
            Token::Dollar if !expect_oid => expect_oid = true,
            Token::CloseParen if !expect_oid => return Some(position),
            _ => return None,
        }
    }

    None
}

/// Keyword tokens whose source text is also a valid descriptor
fn spells_descriptor(token: &Token) -> bool {
    token.is_definition_keyword() || matches!(token, Token::UsageValue(_))
}

/// Tokens whose source text is a valid OID list element
fn is_list_word(token: &Token) -> bool {
    token.is_oid_reference() || spells_descriptor(token)
}
