//! Integration tests over OpenLDAP-style schema files
//!
//! The fixtures under `tests/fixtures/` are excerpts of the core, cosine and
//! nis schemas as shipped with OpenLDAP.

use ldap_schema::schema::ast::{AttributeUsage, ClassKind, Definition, Property, SyntaxRef};
use ldap_schema::schema::error::SchemaError;
use ldap_schema::{parse, Schema, SchemaLoader};
use rstest::rstest;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("Failed to read fixture")
}

fn load_all() -> Schema {
    SchemaLoader::new()
        .with_files(["core.schema", "cosine.schema", "nis.schema"].map(fixture_path))
        .load()
        .expect("fixtures to load")
}

/// Count lines that open a definition
fn definition_heads(source: &str) -> usize {
    source
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|word| {
            matches!(
                word.to_ascii_lowercase().as_str(),
                "attributetype" | "objectclass" | "objectidentifier" | "ldapsyntax"
            )
        })
        .count()
}

#[rstest]
#[case("core.schema")]
#[case("cosine.schema")]
#[case("nis.schema")]
fn test_one_definition_per_keyword(#[case] name: &str) {
    let source = read_fixture(name);
    let definitions = parse(&source).unwrap();
    assert_eq!(definitions.len(), definition_heads(&source));
}

#[rstest]
#[case("core.schema")]
#[case("nis.schema")]
fn test_parsing_is_idempotent(#[case] name: &str) {
    let source = read_fixture(name);
    assert_eq!(parse(&source).unwrap(), parse(&source).unwrap());
}

#[test]
fn test_nis_definitions_in_source_order() {
    let definitions = parse(&read_fixture("nis.schema")).unwrap();

    match &definitions[1] {
        Definition::ObjectIdentifier { name, oid, line } => {
            assert_eq!(name, "NISSchemaAttribute");
            assert_eq!(oid, "NISSchema:1");
            assert_eq!(*line, 4);
        }
        other => panic!("expected an object identifier, got {:?}", other),
    }

    let syntax = match &definitions[3] {
        Definition::LdapSyntax(element) => element,
        other => panic!("expected an ldap syntax, got {:?}", other),
    };
    assert_eq!(syntax.oid, "1.3.6.1.1.1.0.0");
    assert_eq!(syntax.desc(), Some("RFC2307 NIS Netgroup Triple"));

    let classes: Vec<&str> = definitions
        .iter()
        .filter_map(Definition::as_object_class)
        .filter_map(|class| class.canonical_name())
        .collect();
    assert_eq!(classes, vec!["posixAccount", "posixGroup"]);
}

#[test]
fn test_core_attribute_type_details() {
    let definitions = parse(&read_fixture("core.schema")).unwrap();
    let attribute = |name: &str| {
        definitions
            .iter()
            .filter_map(Definition::as_attribute_type)
            .find(|element| element.has_name(name))
            .unwrap_or_else(|| panic!("no attribute type {}", name))
    };

    let cn = attribute("commonName");
    assert_eq!(cn.names(), vec!["cn", "commonName"]);
    assert_eq!(cn.superiors(), vec!["name"]);

    let name = attribute("name");
    assert!(name.properties.contains(&Property::Syntax(SyntaxRef {
        oid: "1.3.6.1.4.1.1466.115.121.1.15".to_string(),
        length: Some(32768),
    })));

    let created = attribute("createTimestamp");
    assert!(created.properties.contains(&Property::SingleValue));
    assert!(created.properties.contains(&Property::NoUserModification));
    assert!(created
        .properties
        .contains(&Property::Usage(AttributeUsage::DirectoryOperation)));
}

#[test]
fn test_core_object_class_details() {
    let definitions = parse(&read_fixture("core.schema")).unwrap();
    let top = definitions[definitions.len() - 4]
        .as_object_class()
        .expect("top is an object class");

    assert_eq!(top.canonical_name(), Some("top"));
    assert_eq!(top.kind(), Some(ClassKind::Abstract));
    assert_eq!(top.must(), vec!["objectClass"]);
    assert!(top.may().is_empty());
}

#[test]
fn test_account_resolves_aliases_across_files() {
    let schema = load_all();
    assert_eq!(
        schema.attributes(&["account"]).unwrap(),
        vec!["uid", "description", "seeAlso", "l", "o", "ou", "host"]
    );
}

#[test]
fn test_union_of_posix_account_and_account() {
    let schema = load_all();
    assert_eq!(
        schema.attributes(&["posixAccount", "account"]).unwrap(),
        vec![
            "cn",
            "uid",
            "uidNumber",
            "gidNumber",
            "homeDirectory",
            "userPassword",
            "loginShell",
            "gecos",
            "description",
            "seeAlso",
            "l",
            "o",
            "ou",
            "host",
        ]
    );
    assert_eq!(
        schema.required_attributes(&["posixAccount", "account"]).unwrap(),
        vec!["cn", "uid", "uidNumber", "gidNumber", "homeDirectory"]
    );
}

#[rstest]
#[case(&["top"])]
#[case(&["person"])]
#[case(&["organizationalPerson"])]
#[case(&["posixGroup", "simpleSecurityObject"])]
#[case(&["account", "posixAccount", "organization"])]
fn test_required_is_subset_of_attributes(#[case] classes: &[&str]) {
    let schema = load_all();
    let all = schema.attributes(classes).unwrap();
    let required = schema.required_attributes(classes).unwrap();
    assert!(required.len() <= all.len());
    for attribute in &required {
        assert!(all.contains(attribute), "{} missing from {:?}", attribute, all);
    }
}

#[test]
fn test_class_without_must_has_no_required_attributes() {
    let schema = load_all();
    assert!(schema
        .required_attributes(&["organizationalPerson"])
        .unwrap()
        .is_empty());
    assert_eq!(
        schema.attributes(&["organizationalPerson"]).unwrap(),
        vec!["title", "telephoneNumber", "ou", "l"]
    );
}

#[test]
fn test_unknown_classes_are_all_reported() {
    let schema = load_all();
    let error = schema
        .attributes(&["doesNotExist", "person", "inetOrgPerson"])
        .unwrap_err();
    assert_eq!(error.names, vec!["doesNotExist", "inetOrgPerson"]);
}

#[test]
fn test_small_schema_end_to_end() {
    let schema = Schema::parse(
        "objectclass ( 2.5.6.0 NAME 'top' MUST ( objectClass ) )\n\
         attributetype ( 0.9.2342.19200300.100.1.1 NAME ( 'uid' 'userid' ) )\n\
         objectclass ( 1.3.6.1.1.1.2.0 NAME ( 'posixAccount' ) SUP top MUST ( cn $ uid $ uidNumber ) MAY ( userPassword ) )\n",
    )
    .unwrap();

    assert_eq!(
        schema.attributes(&["posixAccount"]).unwrap(),
        vec!["cn", "uid", "uidNumber", "userPassword"]
    );
    assert_eq!(
        schema.required_attributes(&["posixAccount"]).unwrap(),
        vec!["cn", "uid", "uidNumber"]
    );
}

#[rstest]
#[case("objectclass ( 1.1 NAME 'a' DESC 'never closed )")]
#[case("attributetype ( 1.1 NAME 'a' DESC 'x' ")]
#[case("objectclass ( 1.1 NAME 'a' MUST ( cn $ uid )")]
#[case("objectclass 1.1 NAME 'a' )")]
fn test_malformed_input_fails_whole_file(#[case] broken: &str) {
    let source = format!("{}\n{}", read_fixture("core.schema"), broken);
    match Schema::parse(&source) {
        Err(SchemaError::Lex(_)) | Err(SchemaError::Parse(_)) => {}
        other => panic!("expected a lex or parse error, got {:?}", other),
    }
}

#[test]
fn test_file_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.schema");
    fs::write(&broken, "objectclass ( 1.1 NAME 'a'\n\n\tMUST )\n").unwrap();

    let error = SchemaLoader::new()
        .with_file(fixture_path("core.schema"))
        .with_file(&broken)
        .load()
        .unwrap_err();

    assert_eq!(error.line(), Some(3));
    assert!(error.to_string().starts_with(&broken.display().to_string()));
}
