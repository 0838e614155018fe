//! Ordered longest-match scanner.
//!
//! At each token start every pattern in [`PATTERNS`] is tried. The longest
//! match wins; on equal length the pattern listed first wins. Patterns are
//! byte-level matchers: every delimiter is ASCII, so UTF-8 continuation
//! bytes never terminate a literal early.

use bcon_ir::{Span, Token, TokenKind};

use crate::LexError;

/// Matcher: length in bytes of the match starting at `pos`, if any.
type Matcher = fn(&[u8], usize) -> Option<usize>;

/// Token patterns in priority order.
const PATTERNS: &[(TokenKind, Matcher)] = &[
    (TokenKind::Date, date),
    (TokenKind::File, file),
    (TokenKind::String, string),
    (TokenKind::RegExp, regexp),
    (TokenKind::Number, number),
    (TokenKind::BigInt, bigint),
    (TokenKind::Boolean, |b, i| word(b, i, "True")),
    (TokenKind::Boolean, |b, i| word(b, i, "False")),
    (TokenKind::Null, |b, i| word(b, i, "Null")),
    (TokenKind::Undefined, |b, i| word(b, i, "Undefined")),
    (TokenKind::Import, |b, i| word(b, i, "import")),
    (TokenKind::Use, |b, i| word(b, i, "use")),
    (TokenKind::Export, |b, i| word(b, i, "export")),
    (TokenKind::From, |b, i| word(b, i, "from")),
    (TokenKind::As, |b, i| word(b, i, "as")),
    (TokenKind::Skip, |b, i| word(b, i, "skip")),
    (TokenKind::Class, |b, i| word(b, i, "class")),
    (TokenKind::Extends, |b, i| word(b, i, "extends")),
    (TokenKind::Includes, |b, i| word(b, i, "includes")),
    (TokenKind::Arrow, |b, i| literal(b, i, "=>")),
    (TokenKind::Spread, |b, i| literal(b, i, "...")),
    (TokenKind::AssocKey, assoc_key),
    (TokenKind::NumericKey, |b, i| literal(b, i, "@*")),
    (TokenKind::Path, path),
    (TokenKind::Ident, ident),
    (TokenKind::LParen, |b, i| literal(b, i, "(")),
    (TokenKind::RParen, |b, i| literal(b, i, ")")),
    (TokenKind::LBracket, |b, i| literal(b, i, "[")),
    (TokenKind::RBracket, |b, i| literal(b, i, "]")),
    (TokenKind::Comma, |b, i| literal(b, i, ",")),
    (TokenKind::Semicolon, |b, i| literal(b, i, ";")),
    (TokenKind::Colon, |b, i| literal(b, i, ":")),
    (TokenKind::Question, |b, i| literal(b, i, "?")),
    (TokenKind::Equals, |b, i| literal(b, i, "=")),
];

/// File literal encoding suffixes, each with its accepted spellings.
const ENCODING_SUFFIXES: &[&[&str]] = &[
    &["utf8", "utf-8"],
    &["utf16le", "utf-16le"],
    &["base64", "base-64"],
    &["ascii"],
    &["latin1", "latin-1"],
    &["binary"],
    &["hex"],
];

/// Longest match at `pos`, earliest pattern on ties.
pub fn longest_match(bytes: &[u8], pos: usize) -> Option<(TokenKind, usize)> {
    let mut best: Option<(TokenKind, usize)> = None;
    for &(kind, matcher) in PATTERNS {
        if let Some(len) = matcher(bytes, pos) {
            if len > 0 && best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((kind, len));
            }
        }
    }
    best
}

/// Walks the cleaned text, tracking 1-based line and character column.
pub struct Scanner<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Scanner {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the whole input, appending a trailing `Eof`.
    pub fn scan(mut self) -> Result<Vec<Token>, LexError> {
        let bytes = self.source.as_bytes();
        let mut tokens = Vec::with_capacity(bytes.len() / 4 + 1);

        loop {
            self.skip_whitespace();
            if self.pos >= bytes.len() {
                break;
            }
            let start = self.pos;
            let (line, column) = (self.line, self.column);
            match longest_match(bytes, start) {
                Some((kind, len)) => {
                    let end = start + len;
                    tokens.push(Token::new(kind, Span::from_range(start..end), line, column));
                    self.advance_to(end);
                }
                None => return Err(self.uncovered(start)),
            }
        }

        tokens.push(Token::new(
            TokenKind::Eof,
            Span::from_range(self.pos..self.pos),
            self.line,
            self.column,
        ));
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.source[self.pos..].chars().next() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump(ch);
        }
    }

    fn advance_to(&mut self, end: usize) {
        while self.pos < end {
            match self.source[self.pos..].chars().next() {
                Some(ch) => self.bump(ch),
                None => break,
            }
        }
    }

    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    #[cold]
    fn uncovered(&self, start: usize) -> LexError {
        let ch = self.source[start..].chars().next().unwrap_or('\0');
        let span = Span::from_range(start..start + ch.len_utf8());
        if ch == '"' {
            LexError::unterminated_string(span, self.line, self.column)
        } else {
            LexError::unexpected_character(ch, span, self.line, self.column)
        }
    }
}

// Matchers

#[inline]
fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn count_while(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|&&b| pred(b)).count())
}

fn starts_with_ci(bytes: &[u8], pos: usize, lit: &str) -> bool {
    bytes
        .get(pos..pos + lit.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(lit.as_bytes()))
}

fn literal(bytes: &[u8], pos: usize, lit: &str) -> Option<usize> {
    bytes[pos..].starts_with(lit.as_bytes()).then_some(lit.len())
}

/// Keyword or word literal, bounded by non-word characters on both sides.
fn word(bytes: &[u8], pos: usize, lit: &str) -> Option<usize> {
    let len = literal(bytes, pos, lit)?;
    let before_ok = pos == 0 || !is_word(bytes[pos - 1]);
    let after_ok = bytes.get(pos + len).map_or(true, |&b| !is_word(b));
    (before_ok && after_ok).then_some(len)
}

/// `"…"` without embedded quotes or line breaks; returns the end offset.
fn plain_quoted_end(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b'"') {
        return None;
    }
    let body = count_while(bytes, pos + 1, |b| !matches!(b, b'"' | b'\n' | b'\r'));
    let close = pos + 1 + body;
    (bytes.get(close) == Some(&b'"')).then_some(close + 1)
}

/// `"…".date`
fn date(bytes: &[u8], pos: usize) -> Option<usize> {
    let end = plain_quoted_end(bytes, pos)?;
    starts_with_ci(bytes, end, ".date").then(|| end + 5 - pos)
}

/// `"…".<encoding>`
fn file(bytes: &[u8], pos: usize) -> Option<usize> {
    let end = plain_quoted_end(bytes, pos)?;
    if bytes.get(end) != Some(&b'.') {
        return None;
    }
    ENCODING_SUFFIXES.iter().find_map(|spellings| {
        spellings
            .iter()
            .find(|s| starts_with_ci(bytes, end + 1, s))
            .map(|s| end + 1 + s.len() - pos)
    })
}

/// `"…"` with backslash escapes; may span lines.
fn string(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b'"') {
        return None;
    }
    let mut i = pos + 1;
    loop {
        match *bytes.get(i)? {
            b'"' => return Some(i + 1 - pos),
            b'\\' => {
                if matches!(bytes.get(i + 1), None | Some(b'\n' | b'\r')) {
                    return None;
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
}

/// `/pattern/flags` on a single line, non-empty pattern.
fn regexp(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b'/') {
        return None;
    }
    let mut i = pos + 1;
    loop {
        match *bytes.get(i)? {
            b'/' if i > pos + 1 => break,
            b'/' | b'\n' | b'\r' => return None,
            b'\\' => {
                if matches!(bytes.get(i + 1), None | Some(b'\n' | b'\r')) {
                    return None;
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    let flags = count_while(bytes, i + 1, |b| b"igsmuy".contains(&b));
    Some(i + 1 + flags - pos)
}

fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

/// `0x…`, `0o…`, `0b…` with at least one digit or separator.
fn radix_digits(bytes: &[u8], pos: usize) -> Option<usize> {
    let pred: fn(u8) -> bool = match bytes.get(pos..pos + 2)? {
        b"0x" => is_hex_digit,
        b"0o" => is_octal_digit,
        b"0b" => is_binary_digit,
        _ => return None,
    };
    let n = count_while(bytes, pos + 2, |b| pred(b) || b == b'_');
    (n > 0).then_some(2 + n)
}

/// Numbers: optional `-`, then radix-prefixed, `Infinity`, `NaN`, or
/// decimal with optional fraction and `e` exponent. `_` separates digits.
fn number(bytes: &[u8], pos: usize) -> Option<usize> {
    let sign = usize::from(bytes.get(pos) == Some(&b'-'));
    let start = pos + sign;

    if let Some(len) = radix_digits(bytes, start) {
        return Some(sign + len);
    }
    if bytes[start..].starts_with(b"Infinity") {
        return Some(sign + 8);
    }
    if bytes[start..].starts_with(b"NaN") {
        return Some(sign + 3);
    }

    let digit_or_sep = |b: u8| b.is_ascii_digit() || b == b'_';
    let mut end = start + count_while(bytes, start, digit_or_sep);
    if bytes.get(end) == Some(&b'.') {
        let frac = count_while(bytes, end + 1, digit_or_sep);
        if frac > 0 {
            end += 1 + frac;
        }
    }
    if !bytes[start..end].iter().any(u8::is_ascii_digit) {
        return None;
    }
    if bytes.get(end) == Some(&b'e') {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let digits = count_while(bytes, exp, digit_or_sep);
        if digits > 0 {
            end = exp + digits;
        }
    }
    Some(end - pos)
}

/// Integers suffixed with `n`, in any radix.
fn bigint(bytes: &[u8], pos: usize) -> Option<usize> {
    let sign = usize::from(bytes.get(pos) == Some(&b'-'));
    let start = pos + sign;
    let len = match radix_digits(bytes, start) {
        Some(len) => len,
        None => {
            let n = count_while(bytes, start, |b| b.is_ascii_digit() || b == b'_');
            if !bytes[start..start + n].iter().any(u8::is_ascii_digit) {
                return None;
            }
            n
        }
    };
    (bytes.get(start + len) == Some(&b'n')).then_some(sign + len + 1)
}

fn ident(bytes: &[u8], pos: usize) -> Option<usize> {
    if !is_ident_start(*bytes.get(pos)?) {
        return None;
    }
    Some(1 + count_while(bytes, pos + 1, is_word))
}

/// `@name`
fn assoc_key(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b'@') {
        return None;
    }
    ident(bytes, pos + 1).map(|n| n + 1)
}

/// `name(.segment)+` where a segment is an identifier or a decimal index.
fn path(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut end = pos + ident(bytes, pos)?;
    let mut segments = 0;
    while bytes.get(end) == Some(&b'.') {
        let next = end + 1;
        let len = match bytes.get(next) {
            Some(&b) if is_ident_start(b) => ident(bytes, next)?,
            Some(b) if b.is_ascii_digit() => count_while(bytes, next, |b| b.is_ascii_digit()),
            _ => break,
        };
        end = next + len;
        segments += 1;
    }
    (segments > 0).then_some(end - pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn first(src: &str) -> Option<(TokenKind, &str)> {
        longest_match(src.as_bytes(), 0).map(|(kind, len)| (kind, &src[..len]))
    }

    #[test]
    fn file_beats_string() {
        assert_eq!(
            first(r#""conf/db.bcon".utf-8;"#),
            Some((TokenKind::File, r#""conf/db.bcon".utf-8"#))
        );
        assert_eq!(
            first(r#""2024-01-15".DATE x"#),
            Some((TokenKind::Date, r#""2024-01-15".DATE"#))
        );
    }

    #[test]
    fn path_beats_identifier() {
        assert_eq!(first("Main.items.0;"), Some((TokenKind::Path, "Main.items.0")));
        assert_eq!(first("items;"), Some((TokenKind::Ident, "items")));
        assert_eq!(first("a.0b"), Some((TokenKind::Path, "a.0")));
    }

    #[test]
    fn keyword_ties_go_to_keyword() {
        assert_eq!(first("True;"), Some((TokenKind::Boolean, "True")));
        assert_eq!(first("Trueish"), Some((TokenKind::Ident, "Trueish")));
        assert_eq!(first("Infinity"), Some((TokenKind::Number, "Infinity")));
        assert_eq!(first("as"), Some((TokenKind::As, "as")));
    }

    #[test]
    fn bigint_beats_number() {
        assert_eq!(first("10n"), Some((TokenKind::BigInt, "10n")));
        assert_eq!(first("-0x1Fn"), Some((TokenKind::BigInt, "-0x1Fn")));
        assert_eq!(first("0x1F"), Some((TokenKind::Number, "0x1F")));
    }

    #[test]
    fn number_shapes() {
        assert_eq!(first("1e+3;"), Some((TokenKind::Number, "1e+3")));
        assert_eq!(first(".5"), Some((TokenKind::Number, ".5")));
        assert_eq!(first("5."), Some((TokenKind::Number, "5")));
        assert_eq!(first("1_000_000"), Some((TokenKind::Number, "1_000_000")));
        assert_eq!(first("0x"), Some((TokenKind::Number, "0")));
        assert_eq!(first("_"), Some((TokenKind::Ident, "_")));
    }

    #[test]
    fn string_escapes_and_lines() {
        assert_eq!(first(r#""a\"b" c"#), Some((TokenKind::String, r#""a\"b""#)));
        assert_eq!(first("\"two\nlines\""), Some((TokenKind::String, "\"two\nlines\"")));
        assert_eq!(first("\"open"), None);
    }

    #[test]
    fn regexp_shapes() {
        assert_eq!(first(r"/^\d+\/x$/gi;"), Some((TokenKind::RegExp, r"/^\d+\/x$/gi")));
        assert_eq!(first("//"), None);
    }

    #[test]
    fn keys() {
        assert_eq!(first("@host =>"), Some((TokenKind::AssocKey, "@host")));
        assert_eq!(first("@* =>"), Some((TokenKind::NumericKey, "@*")));
        assert_eq!(first("=>"), Some((TokenKind::Arrow, "=>")));
        assert_eq!(first("= 1"), Some((TokenKind::Equals, "=")));
    }
}
