use super::*;
use pretty_assertions::assert_eq;

#[test]
fn display_includes_code_and_location() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("expected \";\"")
        .at(3, 14);
    assert_eq!(diag.to_string(), "error[E1001]: expected \";\" at 3:14");
    assert!(diag.is_error());
}

#[test]
fn render_points_at_column() {
    let source = "use 1 as a;\nexport b;";
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("undefined variable: b")
        .at(2, 8)
        .with_note("while evaluating the export");
    let rendered = diag.render(Some(source), Some("app.bcon"));
    let expected = "\
error[E2001]: undefined variable: b
  --> app.bcon:2:8
  |
2 | export b;
  |        ^
  = note: while evaluating the export
";
    assert_eq!(rendered, expected);
}

#[test]
fn stage_classification() {
    assert!(ErrorCode::E0001.is_syntax_error());
    assert!(ErrorCode::E1013.is_syntax_error());
    assert!(!ErrorCode::E2001.is_syntax_error());
    assert!(ErrorCode::E3004.is_type_error());
}
