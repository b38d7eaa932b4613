//! Lexing for schema description files
//!
//! Lexing happens in two steps:
//!
//! 1. Core tokenization using the logos lexer ([`tokens::Token`]). This yields
//!    atomic tokens: parentheses, keywords, OIDs, quoted strings.
//! 2. List grouping ([`grouping::group_lists`]). A parenthesized run of quoted
//!    strings or of `$`-separated OID references is folded into a single
//!    compound token carrying the raw text between the parentheses.
//!
//! The grammar cannot tell a bare identifier from a parenthesized list of
//! identifiers without looking across whitespace-delimited structure. Emitting
//! the list shapes as opaque tokens leaves the choice of production to the
//! parser, which also owns the splitting of the raw text.
//!
//! Whitespace and `#` comment lines never produce tokens. The first byte that
//! matches no rule aborts lexing with a [`LexError`].

pub mod grouping;
pub mod tokens;

pub use grouping::group_lists;
pub use tokens::Token;

use logos::Logos;
use std::ops::Range;
use tracing::debug;

use crate::schema::ast::SourceLocation;
use crate::schema::error::LexError;

/// Type alias for token with its byte span
pub type TokenSpan = (Token, Range<usize>);

/// Raw logos tokenization, without list grouping
pub fn tokenize(source: &str) -> Result<Vec<TokenSpan>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let location = SourceLocation::new(source);
                return Err(LexError::at(source, &location, lexer.span().start));
            }
        }
    }

    Ok(tokens)
}

/// Main lexer function: tokenize and fold list shapes into compound tokens
pub fn lex(source: &str) -> Result<Vec<TokenSpan>, LexError> {
    let raw_tokens = tokenize(source)?;
    let tokens = group_lists(source, raw_tokens);
    debug!(tokens = tokens.len(), "lexed schema source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        lex(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_definition_head() {
        assert_eq!(
            kinds("objectclass ( 2.5.6.0 NAME 'top' )"),
            vec![
                Token::ObjectClassKeyword,
                Token::OpenParen,
                Token::NumericOid("2.5.6.0".to_string()),
                Token::Name,
                Token::QdString("'top'".to_string()),
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn test_compound_lists_inside_definition() {
        assert_eq!(
            kinds("objectclass ( 1.1 NAME ( 'a' 'b' ) MUST ( cn $ uid ) )"),
            vec![
                Token::ObjectClassKeyword,
                Token::OpenParen,
                Token::NumericOid("1.1".to_string()),
                Token::Name,
                Token::QDescrs(" 'a' 'b' ".to_string()),
                Token::Must,
                Token::Oids(" cn $ uid ".to_string()),
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn test_spans_point_into_source() {
        let source = "attributetype ( 2.5.4.3 NAME 'cn' )";
        let tokens = lex(source).unwrap();
        let (token, span) = &tokens[4];
        assert_eq!(token, &Token::QdString("'cn'".to_string()));
        assert_eq!(&source[span.clone()], "'cn'");
    }

    #[test]
    fn test_unterminated_string_fails() {
        let error = lex("objectclass ( 1.1\n  NAME 'top )\n").unwrap_err();
        assert_eq!(error.line, 2);
        assert_eq!(error.excerpt, "'top )");
    }

    #[test]
    fn test_unknown_character_fails() {
        let error = lex("attributetype ( 1.1 NAME 'x' % )").unwrap_err();
        assert_eq!(error.line, 1);
        assert_eq!(error.excerpt, "% )");
    }

    #[test]
    fn test_empty_and_comment_only_input() {
        assert!(kinds("").is_empty());
        assert!(kinds("# nothing here\n\n   \n# at all").is_empty());
    }
}
