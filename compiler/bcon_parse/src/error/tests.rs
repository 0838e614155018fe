use super::*;
use bcon_ir::TokenKind;
use pretty_assertions::assert_eq;

fn token() -> Token {
    Token::new(TokenKind::Semicolon, Span::new(4, 5), 2, 7)
}

#[test]
fn display_includes_position() {
    let err = ParseError::at(ParseErrorKind::MissingExport, &token());
    assert_eq!(
        err.to_string(),
        "module has no export statement at line 2, column 7"
    );
}

#[test]
fn innermost_context_wins() {
    let err = ParseError::at(ParseErrorKind::MixedContainerKeys, &token())
        .with_context(ErrorContext::Container)
        .with_context(ErrorContext::Use);
    assert_eq!(err.context, Some(ErrorContext::Container));
}

#[test]
fn diagnostic_carries_code_and_note() {
    let err = ParseError::at(
        ParseErrorKind::UnexpectedToken {
            expected: "\";\"".into(),
            found: "\"]\"".into(),
        },
        &token(),
    )
    .with_context(ErrorContext::ClassField);
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.message, "expected \";\", found \"]\"");
    assert_eq!(diag.notes, vec!["while parsing a class field".to_owned()]);
}

#[test]
fn literal_errors_map_to_their_codes() {
    let date = ParseErrorKind::InvalidDate {
        text: "tomorrow".into(),
    };
    assert_eq!(date.code(), ErrorCode::E1005);
    assert_eq!(date.to_string(), "invalid date \"tomorrow\"");
    assert_eq!(
        ParseErrorKind::UnknownEncoding { name: "ebcdic".into() }.code(),
        ErrorCode::E1007
    );
}
