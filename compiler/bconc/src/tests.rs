#![allow(clippy::unwrap_used)]

use std::path::Path;

use pretty_assertions::assert_eq;

use super::*;

fn project() -> MemoryFileSystem {
    MemoryFileSystem::new()
        .with_file("/srv/app.bcon", r#"import "db.bcon".utf8 as db; export [@db => db;];"#)
        .with_file("/srv/db.bcon", r"export [@port => 5432;];")
        .with_file("/srv/latin.bcon", b"export [@name => \"caf\xe9\";];".to_vec())
}

#[test]
fn parse_with_memory_fs() {
    let config = Config::new("/srv");
    let fs = project();
    let source = read_source(Path::new("app.bcon"), &config, &fs).unwrap();
    let value = parse_with(&source, &config, &fs).unwrap();
    assert_eq!(
        value.get_key("db").and_then(|db| db.get_key("port")),
        Some(&Value::Number(5432.0))
    );
}

#[test]
fn read_source_honours_default_encoding() {
    let fs = project();
    let utf8 = Config::new("/srv");
    let err = read_source(Path::new("latin.bcon"), &utf8, &fs).unwrap_err();
    assert!(matches!(
        err,
        Error::Eval(ref e) if matches!(e.kind, EvalErrorKind::Decode { .. })
    ));

    let latin1 = Config::new("/srv").with_default_encoding("latin-1").unwrap();
    let source = read_source(Path::new("latin.bcon"), &latin1, &fs).unwrap();
    let value = parse_with(&source, &latin1, &fs).unwrap();
    assert_eq!(value.get_key("name"), Some(&Value::from("café")));
}

#[test]
fn read_source_reports_missing_files() {
    let err = read_source(Path::new("nope.bcon"), &Config::new("/srv"), &project()).unwrap_err();
    assert!(err.to_string().starts_with("cannot read \"/srv/nope.bcon\""));
    assert_eq!(err.to_diagnostic().code, ErrorCode::E4001);
}

#[test]
fn stringify_is_reexported() {
    let value = parse(r#"export [@a => "x";];"#, &Config::new("/")).unwrap();
    assert_eq!(stringify(&value, None, 0).unwrap(), r#"export [@a=>"x";];"#);
}

#[test]
fn init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
