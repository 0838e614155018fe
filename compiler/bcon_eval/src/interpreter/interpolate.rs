//! String escapes and `[path]` placeholders.
//!
//! A string body is scanned once, left to right. Escapes are decoded as they
//! are met, so an escaped `\[` never opens a placeholder and text produced by
//! a placeholder is never unescaped again.
//!
//! Placeholder grammar:
//!
//! ```text
//! "[" ident ( "." ident | "." digits )* ( ws* "?" ws* default )? "]"
//! default = "\"" ( [^"\\] | "\\" any )* "\""   -- followed by "]"
//!         | [^\]]+
//! ```

use bcon_ir::Value;

/// Decode escapes in `raw` and replace every placeholder.
///
/// `lookup` receives the dotted path and returns its value, or `None` when
/// it cannot be resolved. A null, undefined or unresolvable placeholder uses
/// its default when it has one and is otherwise left as written.
pub fn interpolate_with(raw: &str, mut lookup: impl FnMut(&str) -> Option<Value>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(c) = rest.chars().next() {
        match c {
            '\\' => match rest[1..].chars().next().and_then(escape) {
                Some(decoded) => {
                    out.push(decoded);
                    rest = &rest[2..];
                }
                None => {
                    out.push('\\');
                    rest = &rest[1..];
                }
            },
            '[' => match Placeholder::scan(rest) {
                Some(placeholder) => {
                    let resolved = lookup(placeholder.path).filter(|v| !v.is_nullish());
                    match (resolved, placeholder.default) {
                        (Some(value), _) => out.push_str(&value.to_display_string()),
                        (None, Some(default)) => out.push_str(&default_text(default.trim())),
                        (None, None) => out.push_str(&rest[..placeholder.len]),
                    }
                    rest = &rest[placeholder.len..];
                }
                None => {
                    out.push('[');
                    rest = &rest[1..];
                }
            },
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}

/// Characters a backslash escapes inside a string body.
fn escape(c: char) -> Option<char> {
    Some(match c {
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{b}',
        '[' | ']' | '\\' | '"' => c,
        _ => return None,
    })
}

#[derive(Debug, PartialEq, Eq)]
struct Placeholder<'s> {
    /// Byte length including both brackets.
    len: usize,
    path: &'s str,
    default: Option<&'s str>,
}

impl<'s> Placeholder<'s> {
    /// Match a placeholder at the start of `s`, which begins with `[`.
    fn scan(s: &'s str) -> Option<Self> {
        let bytes = s.as_bytes();
        let mut end = scan_ident(bytes, 1)?;
        while bytes.get(end) == Some(&b'.') {
            match scan_ident(bytes, end + 1).or_else(|| scan_digits(bytes, end + 1)) {
                Some(next) => end = next,
                None => break,
            }
        }
        let path = &s[1..end];

        if bytes.get(end) == Some(&b']') {
            return Some(Placeholder {
                len: end + 1,
                path,
                default: None,
            });
        }

        let question = skip_ws(bytes, end);
        if bytes.get(question) != Some(&b'?') {
            return None;
        }
        let after = question + 1;
        let start = skip_ws(bytes, after);

        let quoted = (bytes.get(start) == Some(&b'"'))
            .then(|| quoted_end(bytes, start))
            .flatten()
            .filter(|&close| bytes.get(close) == Some(&b']'));
        let (from, to) = match quoted {
            Some(close) => (start, close),
            None => {
                // Whitespace alone still counts as a (blank) default.
                let from = if bytes.get(start) == Some(&b']') { after } else { start };
                let to = from + bytes.get(from..)?.iter().position(|&b| b == b']')?;
                if to == from {
                    return None;
                }
                (from, to)
            }
        };

        Some(Placeholder {
            len: to + 1,
            path,
            default: Some(&s[from..to]),
        })
    }
}

fn scan_ident(bytes: &[u8], start: usize) -> Option<usize> {
    let first = *bytes.get(start)?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let len = bytes[start..]
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_'))
        .unwrap_or(bytes.len() - start);
    Some(start + len)
}

fn scan_digits(bytes: &[u8], start: usize) -> Option<usize> {
    let len = bytes
        .get(start..)?
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len() - start);
    (len > 0).then_some(start + len)
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

/// Index just past the closing quote of the quoted run starting at `start`.
fn quoted_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    loop {
        match *bytes.get(i)? {
            b'"' => return Some(i + 1),
            b'\\' => {
                bytes.get(i + 1)?;
                i += 2;
            }
            _ => i += 1,
        }
    }
}

/// Text substituted for a placeholder's default.
///
/// Quoted defaults (with plain or escaped quotes) are unescaped; the
/// keywords `True`, `False`, `Null` and `Undefined` print in lower case;
/// anything else is used as written.
fn default_text(default: &str) -> String {
    if default.len() >= 4 && default.starts_with("\\\"") && default.ends_with("\\\"") {
        return unescape(&default[2..default.len() - 2]);
    }
    if default.len() >= 2 && default.starts_with('"') && default.ends_with('"') {
        return unescape(&default[1..default.len() - 1]);
    }
    match default {
        "True" => "true",
        "False" => "false",
        "Null" => "null",
        "Undefined" => "undefined",
        other => other,
    }
    .to_owned()
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => match next {
                'b' => out.push('\u{8}'),
                'f' => out.push('\u{c}'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'v' => out.push('\u{b}'),
                '"' | '\\' => out.push(next),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            },
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_port(raw: &str) -> String {
        interpolate_with(raw, |path| match path {
            "Main.port" => Some(Value::Number(8080.0)),
            "Main.host" => Some(Value::from("example.com")),
            "Main.none" => Some(Value::Null),
            "list.0" => Some(Value::from("first")),
            _ => None,
        })
    }

    #[test]
    fn substitutes_resolved_paths() {
        assert_eq!(with_port("http://[Main.host]:[Main.port]/"), "http://example.com:8080/");
        assert_eq!(with_port("[list.0]!"), "first!");
    }

    #[test]
    fn unresolved_without_default_is_kept() {
        assert_eq!(with_port("a [Main.missing] b"), "a [Main.missing] b");
        assert_eq!(with_port("[Main.none]"), "[Main.none]");
    }

    #[test]
    fn defaults() {
        assert_eq!(with_port("[Main.missing ? 3000]"), "3000");
        assert_eq!(with_port("[Main.none?True]"), "true");
        assert_eq!(with_port("[Main.missing ? Null]"), "null");
        assert_eq!(with_port(r#"[Main.missing ? \"a\tb\"]"#), "a\tb");
        assert_eq!(with_port("[Main.missing ? some text ]"), "some text");
        assert_eq!(with_port("[Main.port ? 1]"), "8080");
    }

    #[test]
    fn escapes_decode_once() {
        assert_eq!(with_port(r"line\nbreak"), "line\nbreak");
        assert_eq!(with_port(r"\[Main.port]"), "[Main.port]");
        assert_eq!(with_port(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(with_port(r"C:\path\q"), r"C:\path\q");
        assert_eq!(with_port(r"\\[Main.port]"), r"\8080");
    }

    #[test]
    fn not_a_placeholder() {
        assert_eq!(with_port("[1abc]"), "[1abc]");
        assert_eq!(with_port("[Main.port"), "[Main.port");
        assert_eq!(with_port("[Main.port ?]"), "[Main.port ?]");
        assert_eq!(with_port("[]"), "[]");
        assert_eq!(with_port("héllo [Main.host] ü"), "héllo example.com ü");
    }

    #[test]
    fn placeholder_scan() {
        assert_eq!(
            Placeholder::scan("[a.b.0 ? \"x]\"] tail"),
            Some(Placeholder {
                len: 14,
                path: "a.b.0",
                default: Some("\"x]\""),
            })
        );
        assert_eq!(
            Placeholder::scan("[a ? ]"),
            Some(Placeholder {
                len: 6,
                path: "a",
                default: Some(" "),
            })
        );
    }

    proptest::proptest! {
        #[test]
        fn plain_text_is_unchanged(text in "[^\\\\\\[]*") {
            proptest::prop_assert_eq!(with_port(&text), text);
        }
    }
}
