use super::*;
use pretty_assertions::assert_eq;

#[test]
fn message_includes_position() {
    let err = LexError::unexpected_character('%', Span::new(4, 5), 1, 5);
    assert_eq!(err.to_string(), "unexpected character \"%\" at line 1, column 5");
}

#[test]
fn diagnostic_carries_location() {
    let err = LexError::unterminated_block_comment(Span::new(10, 11), 2, 3);
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E0001);
    assert_eq!(diag.message, "unterminated block comment");
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.to_string(), "error[E0001]: unterminated block comment at 2:3");
}

#[test]
fn equality() {
    let a = LexError::unterminated_string(Span::new(0, 1), 1, 1);
    let b = LexError::unterminated_string(Span::new(0, 1), 1, 1);
    let c = LexError::unexpected_character('"', Span::new(0, 1), 1, 1);
    assert_eq!(a, b);
    assert_ne!(a, c);
}
