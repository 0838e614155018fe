//! End-to-end runs of the CLI command handlers against files on disk.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use bconc::commands::{check_file, eval_file, lex_file, CommandError, Options};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "db.bcon",
        r#"export [@host => "db.local"; @port => 5432;];"#,
    );
    dir
}

#[test]
fn eval_resolves_imports_next_to_the_file() {
    let dir = project();
    let app = write(
        dir.path(),
        "app.bcon",
        r#"
        import "db.bcon".utf8 as db;
        class Server [ @host: String; @port: Number => 80; ];
        export [@server => Server [@host => db.host;]; @db_port => db.port;];
        "#,
    );
    assert_eq!(
        eval_file(&app, &Options::default()).unwrap(),
        r#"export [@server=>[@host=>"db.local";@port=>80;];@db_port=>5432;];"#
    );
}

#[test]
fn eval_indents_on_request() {
    let dir = project();
    let app = write(dir.path(), "app.bcon", "export [@a => [@* => 1;];];");
    let options = Options {
        indent: 2,
        ..Options::default()
    };
    assert_eq!(
        eval_file(&app, &options).unwrap(),
        "export [\n  @a => [\n    @* => 1;\n  ];\n];"
    );
}

#[test]
fn eval_prints_scalars_plainly() {
    let dir = project();
    let app = write(dir.path(), "port.bcon", r#"import "db.bcon".utf8 as db; export db.port;"#);
    assert_eq!(eval_file(&app, &Options::default()).unwrap(), "5432");
}

#[test]
fn path_option_overrides_the_file_directory() {
    let dir = project();
    let other = tempfile::tempdir().unwrap();
    let app = write(other.path(), "app.bcon", r#"import "db.bcon".utf8 as db; export db.host;"#);

    // Without --path the import is looked up next to app.bcon and missing.
    assert!(eval_file(&app, &Options::default()).is_err());

    let options = Options {
        path: Some(dir.path().to_path_buf()),
        ..Options::default()
    };
    assert_eq!(eval_file(&app, &options).unwrap(), "db.local");
}

#[test]
fn check_reports_counts() {
    let dir = project();
    let app = write(
        dir.path(),
        "app.bcon",
        r#"
        import "db.bcon".utf8 as db;
        use 1 as one;
        class A [ @x: Number; ];
        export A [@x => one;];
        "#,
    );
    assert_eq!(
        check_file(&app, &Options::default()).unwrap(),
        format!("OK: {app} (1 imports, 1 uses, 1 classes)")
    );
}

#[test]
fn errors_render_with_source_excerpt() {
    let dir = project();
    let app = write(
        dir.path(),
        "bad.bcon",
        "class A [ @x: Number; ];\nexport A [@x => \"text\";];\n",
    );
    let Err(CommandError::Rendered(report)) = check_file(&app, &Options::default()) else {
        panic!("expected a rendered diagnostic");
    };
    assert!(report.contains("Type mismatch at A.x: expected Number, got string"));
    assert!(report.contains(&format!("--> {app}:2:")));
    assert!(report.contains("export A [@x => \"text\";];"));
}

#[test]
fn lex_lists_tokens() {
    let dir = project();
    let app = write(dir.path(), "tiny.bcon", "export 1;");
    let out = lex_file(&app, &Options::default()).unwrap();
    let lines: Vec<&str> = out.lines().map(str::trim_end).collect();
    assert_eq!(
        lines,
        [
            format!("{:<12} {:<24} 1:1", "Export", "export"),
            format!("{:<12} {:<24} 1:8", "Number", "1"),
            format!("{:<12} {:<24} 1:9", "Semicolon", ";"),
            format!("{:<12} {:<24} 1:10", "Eof", ""),
        ]
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
    );
}

#[test]
fn encoding_option_decodes_the_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin.bcon");
    fs::write(&path, b"export [@name => \"caf\xe9\";];").unwrap();
    let path = path.to_string_lossy().into_owned();

    assert!(matches!(
        eval_file(&path, &Options::default()),
        Err(CommandError::Decode { .. })
    ));
    let options = Options {
        encoding: Some("latin1".to_owned()),
        ..Options::default()
    };
    assert_eq!(
        eval_file(&path, &options).unwrap(),
        r#"export [@name=>"café";];"#
    );
}

#[test]
fn unknown_encoding_is_a_config_error() {
    let dir = project();
    let app = write(dir.path(), "app.bcon", "export 1;");
    let options = Options {
        encoding: Some("ebcdic".to_owned()),
        ..Options::default()
    };
    assert!(matches!(
        eval_file(&app, &options),
        Err(CommandError::Config(_))
    ));
}
