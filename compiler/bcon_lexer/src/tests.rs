#![allow(clippy::unwrap_used)]

use super::*;
use bcon_ir::TokenKind::{self, *};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).unwrap().kinds()
}

fn texts(src: &str) -> Vec<std::string::String> {
    let list = lex(src).unwrap();
    list.iter().map(|t| list.text(t).to_owned()).collect()
}

#[test]
fn use_and_export() {
    assert_eq!(
        kinds("use [@a => 1;] as d;\nexport d;"),
        vec![
            Use, LBracket, AssocKey, Arrow, Number, Semicolon, RBracket, As, Ident, Semicolon,
            Export, Ident, Semicolon, Eof
        ]
    );
}

#[test]
fn class_declaration() {
    assert_eq!(
        kinds("class Point(x, ...rest) extends Base includes A B [ @z?: Number => z ? 0; ];"),
        vec![
            Class, Ident, LParen, Ident, Comma, Spread, Ident, RParen, Extends, Ident, Includes,
            Ident, Ident, LBracket, AssocKey, Question, Colon, Ident, Arrow, Ident, Question,
            Number, Semicolon, RBracket, Semicolon, Eof
        ]
    );
}

#[test]
fn literal_kinds() {
    assert_eq!(
        kinds(r#"True False Null Undefined "s" 1.5 7n "2024-01-01".date "x.txt".utf8 /a+/g"#),
        vec![
            Boolean, Boolean, Null, Undefined, String, Number, BigInt, Date, File, RegExp, Eof
        ]
    );
}

#[test]
fn comments_are_skipped() {
    let src = "# header\n' block\n comment '\nexport \"# kept\"; # trailing";
    assert_eq!(kinds(src), vec![Export, String, Semicolon, Eof]);
    assert_eq!(texts(src)[1], "\"# kept\"");
}

#[test]
fn positions_are_one_based() {
    let list = lex("use 1 as a;\n  export a;").unwrap();
    let export = list.iter().find(|t| t.kind == Export).unwrap();
    assert_eq!((export.line, export.column), (2, 3));
    let eof = list.iter().last().unwrap();
    assert_eq!(eof.kind, Eof);
}

#[test]
fn multiline_string_advances_lines() {
    let list = lex("export \"a\nb\";\n x").unwrap();
    let x = list.iter().find(|t| t.kind == Ident).unwrap();
    assert_eq!((x.line, x.column), (3, 2));
}

#[test]
fn negative_numbers_are_single_tokens() {
    assert_eq!(texts("@* => -5;")[2], "-5");
    assert_eq!(texts("-Infinity")[0], "-Infinity");
}

#[test]
fn unexpected_character() {
    let err = lex("export [\n  @a => 1 % 2;\n];").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter { ch: '%' });
    assert_eq!((err.line, err.column), (2, 11));
    assert_eq!(err.to_string(), "unexpected character \"%\" at line 2, column 11");
}

#[test]
fn unterminated_string() {
    let err = lex("export \"open;").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.column, 8);
}

#[test]
fn crlf_positions() {
    let list = lex("use 1 as a;\r\nexport a;").unwrap();
    let export = list.iter().find(|t| t.kind == Export).unwrap();
    assert_eq!((export.line, export.column), (2, 1));
}

proptest! {
    #[test]
    fn decimal_literals_are_one_token(n in any::<i64>()) {
        let src = n.to_string();
        let list = lex(&src).unwrap();
        prop_assert_eq!(list.kinds(), vec![Number, Eof]);
        prop_assert_eq!(list.text(&list[0]), src.as_str());
    }

    #[test]
    fn bigint_literals_are_one_token(n in any::<u64>()) {
        let src = format!("{n}n");
        prop_assert_eq!(kinds(&src), vec![BigInt, Eof]);
    }

    #[test]
    fn identifiers_never_split(name in "[a-z_][a-z0-9_]{0,12}") {
        let list = lex(&name).unwrap();
        prop_assert_eq!(list.len(), 2);
    }
}
