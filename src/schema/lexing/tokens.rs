//! Token definitions for schema description files
//!
//! This module defines all the tokens that can be produced by the schema lexer.
//! The atomic tokens are defined using the logos derive macro. The two compound
//! list tokens (`QDescrs` and `Oids`) are never produced by logos directly; they
//! are folded together from atomic tokens by the grouping pass.
use logos::Logos;
use serde::Serialize;
use std::fmt;

use crate::schema::ast::AttributeUsage;

/// All possible tokens in a schema description file
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Serialize)]
#[logos(skip r"[ \t\r\n\f]+|#[^\r\n]*")]
pub enum Token {
    // Structural delimiters
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("$")]
    Dollar,

    // Property keywords
    #[token("NAME")]
    Name,
    #[token("DESC")]
    Desc,
    #[token("OBSOLETE")]
    Obsolete,
    #[token("SUP")]
    Sup,
    #[token("EQUALITY")]
    Equality,
    #[token("ORDERING")]
    Ordering,
    #[token("SUBSTR")]
    Substr,
    #[token("SYNTAX")]
    Syntax,
    #[token("SINGLE-VALUE")]
    SingleValue,
    #[token("COLLECTIVE")]
    Collective,
    #[token("NO-USER-MODIFICATION")]
    NoUserModification,
    #[token("USAGE")]
    Usage,
    #[token("ABSTRACT")]
    Abstract,
    #[token("STRUCTURAL")]
    Structural,
    #[token("AUXILIARY")]
    Auxiliary,
    #[token("MUST")]
    Must,
    #[token("MAY")]
    May,

    // Definition keywords; only the head letter of the second word may vary in case
    #[regex("attribute[tT]ype")]
    AttributeTypeKeyword,
    #[regex("object[cC]lass")]
    ObjectClassKeyword,
    #[regex("object[iI]dentifier")]
    ObjectIdentifierKeyword,
    #[regex("ldap[sS]yntax")]
    LdapSyntaxKeyword,

    #[token("userApplications", |_| AttributeUsage::UserApplications)]
    #[token("directoryOperation", |_| AttributeUsage::DirectoryOperation)]
    #[token("distributedOperation", |_| AttributeUsage::DistributedOperation)]
    #[token("dSAOperation", |_| AttributeUsage::DsaOperation)]
    UsageValue(AttributeUsage),

    #[regex(r"X-[A-Za-z_-]+", |lex| lex.slice().to_owned(), priority = 6)]
    Extension(String),

    /// Dotted decimal OID, or the `descr:oid` form used with OID macros
    #[regex(r"[0-9]+(\.[0-9]+)*", |lex| lex.slice().to_owned())]
    #[regex(r"[A-Za-z][A-Za-z0-9;-]*:[0-9]+(\.[0-9]+)*", |lex| lex.slice().to_owned())]
    NumericOid(String),

    /// Numeric OID with a trailing `{len}` bound
    #[regex(r"[0-9]+(\.[0-9]+)*\{[0-9]+\}", |lex| lex.slice().to_owned())]
    NoIdLen(String),

    /// Single quoted string, quotes included
    #[regex(r"'[^']*'", |lex| lex.slice().to_owned())]
    QdString(String),

    #[regex(r"[A-Za-z][A-Za-z0-9;-]*", |lex| lex.slice().to_owned())]
    Woid(String),

    /// `( 'a' 'b' )`, carrying the raw text between the parentheses
    QDescrs(String),

    /// `( a $ b )`, carrying the raw text between the parentheses
    Oids(String),
}

impl Token {
    /// Check if this token starts a top-level definition
    pub fn is_definition_keyword(&self) -> bool {
        matches!(
            self,
            Token::AttributeTypeKeyword
                | Token::ObjectClassKeyword
                | Token::ObjectIdentifierKeyword
                | Token::LdapSyntaxKeyword
        )
    }

    /// Check if this token can stand for a single OID reference
    pub fn is_oid_reference(&self) -> bool {
        matches!(self, Token::Woid(_) | Token::NumericOid(_))
    }

    /// Check if this keyword is followed by an OID reference or OID list
    pub fn takes_oid_value(&self) -> bool {
        matches!(
            self,
            Token::Sup
                | Token::Must
                | Token::May
                | Token::Equality
                | Token::Ordering
                | Token::Substr
                | Token::Syntax
        )
    }

    /// Check if this token is one of the compound list tokens
    pub fn is_compound(&self) -> bool {
        matches!(self, Token::QDescrs(_) | Token::Oids(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Dollar => "$",
            Token::Name => "NAME",
            Token::Desc => "DESC",
            Token::Obsolete => "OBSOLETE",
            Token::Sup => "SUP",
            Token::Equality => "EQUALITY",
            Token::Ordering => "ORDERING",
            Token::Substr => "SUBSTR",
            Token::Syntax => "SYNTAX",
            Token::SingleValue => "SINGLE-VALUE",
            Token::Collective => "COLLECTIVE",
            Token::NoUserModification => "NO-USER-MODIFICATION",
            Token::Usage => "USAGE",
            Token::Abstract => "ABSTRACT",
            Token::Structural => "STRUCTURAL",
            Token::Auxiliary => "AUXILIARY",
            Token::Must => "MUST",
            Token::May => "MAY",
            Token::AttributeTypeKeyword => "attributetype",
            Token::ObjectClassKeyword => "objectclass",
            Token::ObjectIdentifierKeyword => "objectidentifier",
            Token::LdapSyntaxKeyword => "ldapsyntax",
            Token::UsageValue(usage) => return write!(f, "{}", usage),
            Token::Extension(text)
            | Token::NumericOid(text)
            | Token::NoIdLen(text)
            | Token::QdString(text)
            | Token::Woid(text) => text,
            Token::QDescrs(raw) | Token::Oids(raw) => return write!(f, "({})", raw),
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(source: &str) -> Vec<Token> {
        Token::lexer(source)
            .filter_map(|result| result.ok())
            .collect()
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(raw("NAME"), vec![Token::Name]);
        assert_eq!(raw("name"), vec![Token::Woid("name".to_string())]);
        assert_eq!(raw("SINGLE-VALUE"), vec![Token::SingleValue]);
        assert_eq!(
            raw("NO-USER-MODIFICATION"),
            vec![Token::NoUserModification]
        );
    }

    #[test]
    fn test_keyword_prefix_is_a_descriptor() {
        assert_eq!(raw("NAMES"), vec![Token::Woid("NAMES".to_string())]);
        assert_eq!(raw("MAYBE"), vec![Token::Woid("MAYBE".to_string())]);
    }

    #[test]
    fn test_definition_keyword_variants() {
        for source in ["attributetype", "attributeType"] {
            assert_eq!(raw(source), vec![Token::AttributeTypeKeyword]);
        }
        for source in ["objectclass", "objectClass"] {
            assert_eq!(raw(source), vec![Token::ObjectClassKeyword]);
        }
        for source in ["objectidentifier", "objectIdentifier"] {
            assert_eq!(raw(source), vec![Token::ObjectIdentifierKeyword]);
        }
        for source in ["ldapsyntax", "ldapSyntax"] {
            assert_eq!(raw(source), vec![Token::LdapSyntaxKeyword]);
        }
    }

    #[test]
    fn test_usage_values() {
        assert_eq!(
            raw("dSAOperation"),
            vec![Token::UsageValue(AttributeUsage::DsaOperation)]
        );
        assert_eq!(
            raw("userApplications"),
            vec![Token::UsageValue(AttributeUsage::UserApplications)]
        );
    }

    #[test]
    fn test_extension_beats_descriptor() {
        assert_eq!(
            raw("X-ORIGIN"),
            vec![Token::Extension("X-ORIGIN".to_string())]
        );
    }

    #[test]
    fn test_numeric_oids() {
        assert_eq!(
            raw("1.3.6.1.4.1"),
            vec![Token::NumericOid("1.3.6.1.4.1".to_string())]
        );
        assert_eq!(
            raw("OLcfgAt:3"),
            vec![Token::NumericOid("OLcfgAt:3".to_string())]
        );
        assert_eq!(
            raw("1.3.6.1.4.1.1466.115.121.1.15{256}"),
            vec![Token::NoIdLen("1.3.6.1.4.1.1466.115.121.1.15{256}".to_string())]
        );
    }

    #[test]
    fn test_quoted_string_keeps_quotes() {
        assert_eq!(
            raw("'RFC 4519: common name'"),
            vec![Token::QdString("'RFC 4519: common name'".to_string())]
        );
    }

    #[test]
    fn test_descriptor_with_options() {
        assert_eq!(
            raw("cn;lang-en"),
            vec![Token::Woid("cn;lang-en".to_string())]
        );
    }

    #[test]
    fn test_comments_and_whitespace_are_skipped() {
        let tokens = raw("# a comment\n\n  ( \t)\n# trailing");
        assert_eq!(tokens, vec![Token::OpenParen, Token::CloseParen]);
    }

    #[test]
    fn test_display_round_trips_values() {
        assert_eq!(Token::Woid("cn".to_string()).to_string(), "cn");
        assert_eq!(Token::Oids(" a $ b ".to_string()).to_string(), "( a $ b )");
        assert_eq!(Token::SingleValue.to_string(), "SINGLE-VALUE");
    }

    #[test]
    fn test_token_predicates() {
        assert!(Token::ObjectClassKeyword.is_definition_keyword());
        assert!(!Token::Name.is_definition_keyword());
        assert!(Token::Woid("top".to_string()).is_oid_reference());
        assert!(Token::NumericOid("2.5.6.0".to_string()).is_oid_reference());
        assert!(!Token::QdString("'x'".to_string()).is_oid_reference());
        assert!(Token::QDescrs(String::new()).is_compound());
    }
}
