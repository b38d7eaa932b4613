//! Command-line interface for ldap-schema
//! This binary inspects LDAP schema description files and resolves object class attributes.
//!
//! Usage:
//!   ldap-schema tokens `<path>` [--format simple|json]                      - Dump the token stream
//!   ldap-schema parse `<path>...` [--format json|yaml]                      - Dump parsed definitions
//!   ldap-schema attributes `<class>...` [--schema `<path>`]... [--config `<toml>`] [--required]
//!                                                                         - Print resolved attribute names

use clap::{Arg, ArgAction, Command};
use serde::Serialize;
use std::error::Error;
use std::ops::Range;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ldap_schema::schema::ast::SourceLocation;
use ldap_schema::schema::config::{Loader, LOCAL_CONFIG_FILE};
use ldap_schema::schema::lexing::{lex, Token};
use ldap_schema::{parse, SchemaLoader};

type CliResult = Result<(), Box<dyn Error>>;

fn main() {
    init_tracing();

    let matches = Command::new("ldap-schema")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting LDAP schema files and resolving object class attributes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a schema file")
                .arg(
                    Arg::new("path")
                        .help("Path to the schema file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["simple", "json"])
                        .default_value("simple"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the parsed definitions of one or more schema files")
                .arg(
                    Arg::new("paths")
                        .help("Paths to the schema files")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["json", "yaml"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("attributes")
                .about("Print the attributes of one or more object classes")
                .arg(
                    Arg::new("classes")
                        .help("Object class names")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                )
                .arg(
                    Arg::new("schema")
                        .long("schema")
                        .short('s')
                        .help("Schema file to load, after any configured ones")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults and ./ldap-schema.toml"),
                )
                .arg(
                    Arg::new("required")
                        .long("required")
                        .short('r')
                        .help("Only print attributes the classes require")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            let format = tokens_matches.get_one::<String>("format").unwrap();
            handle_tokens_command(path, format)
        }
        Some(("parse", parse_matches)) => {
            let paths: Vec<&String> = parse_matches.get_many::<String>("paths").unwrap().collect();
            let format = parse_matches.get_one::<String>("format").unwrap();
            handle_parse_command(&paths, format)
        }
        Some(("attributes", attributes_matches)) => {
            let classes: Vec<&String> = attributes_matches
                .get_many::<String>("classes")
                .unwrap()
                .collect();
            let schemas: Vec<PathBuf> = attributes_matches
                .get_many::<String>("schema")
                .map(|values| values.map(PathBuf::from).collect())
                .unwrap_or_default();
            let config = attributes_matches.get_one::<String>("config");
            let required = attributes_matches.get_flag("required");
            handle_attributes_command(&classes, schemas, config, required)
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> Result<String, Box<dyn Error>> {
    std::fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path, e).into())
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    line: usize,
    span: Range<usize>,
    token: &'a Token,
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, format: &str) -> CliResult {
    let source = read_source(path)?;
    let tokens = lex(&source)?;
    let location = SourceLocation::new(&source);

    let records: Vec<TokenRecord> = tokens
        .iter()
        .map(|(token, span)| TokenRecord {
            line: location.line_number(span.start),
            span: span.clone(),
            token,
        })
        .collect();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&records)?),
        _ => {
            for record in records {
                println!("{}\t{}", record.line, record.token);
            }
        }
    }
    Ok(())
}

/// Handle the parse command
fn handle_parse_command(paths: &[&String], format: &str) -> CliResult {
    let mut definitions = Vec::new();
    for path in paths {
        let source = read_source(path)?;
        let parsed = parse(&source).map_err(|e| format!("{}: {}", path, e))?;
        definitions.extend(parsed);
    }

    let output = match format {
        "yaml" => serde_yaml::to_string(&definitions)?,
        _ => serde_json::to_string_pretty(&definitions)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}

/// Handle the attributes command
fn handle_attributes_command(
    classes: &[&String],
    schemas: Vec<PathBuf>,
    config: Option<&String>,
    required: bool,
) -> CliResult {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(config) = config {
        loader = loader.with_file(config);
    }
    let config = loader.build()?;

    let loader = SchemaLoader::from_config(&config).with_files(schemas);
    if loader.paths().is_empty() {
        return Err("no schema files given; use --schema or a config file".into());
    }
    let schema = loader.load()?;

    let attributes = if required {
        schema.required_attributes(classes)?
    } else {
        schema.attributes(classes)?
    };

    for attribute in attributes {
        println!("{}", attribute);
    }
    Ok(())
}
