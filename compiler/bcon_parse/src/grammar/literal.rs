//! Literal decoding.
//!
//! The lexer only classifies literal tokens; this module turns their text
//! into values. File literals are checked against the file system here, so
//! a missing file is reported at the literal rather than at evaluation.

use bcon_ir::ast::{FileRef, Literal};
use bcon_ir::fs::resolve_path;
use bcon_ir::{Encoding, RegExpValue, Token, TokenKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use num_bigint::BigInt;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Decode a literal token that has already been consumed.
    pub(crate) fn decode_literal(&self, token: &Token) -> Result<Literal, ParseError> {
        let text = self.cursor.text(token);
        let literal = match token.kind {
            TokenKind::String => Literal::String(string_body(text).to_owned()),
            TokenKind::Number => Literal::Number(parse_number(text).ok_or_else(|| {
                ParseError::at(
                    ParseErrorKind::InvalidNumber {
                        text: text.to_owned(),
                    },
                    token,
                )
            })?),
            TokenKind::BigInt => Literal::BigInt(parse_bigint(text).ok_or_else(|| {
                ParseError::at(
                    ParseErrorKind::InvalidBigInt {
                        text: text.to_owned(),
                    },
                    token,
                )
            })?),
            TokenKind::Boolean => Literal::Boolean(text == "True"),
            TokenKind::Null => Literal::Null,
            TokenKind::Undefined => Literal::Undefined,
            TokenKind::Date => {
                let body = date_body(text);
                Literal::Date(parse_date(body).ok_or_else(|| {
                    ParseError::at(
                        ParseErrorKind::InvalidDate {
                            text: body.to_owned(),
                        },
                        token,
                    )
                })?)
            }
            TokenKind::File => Literal::File(self.decode_file(token)?),
            TokenKind::RegExp => Literal::RegExp(
                parse_regexp(text).map_err(|(pattern, reason)| {
                    ParseError::at(ParseErrorKind::InvalidRegExp { pattern, reason }, token)
                })?,
            ),
            _ => {
                return Err(ParseError::at(
                    ParseErrorKind::UnexpectedToken {
                        expected: "a literal".to_owned(),
                        found: format!("\"{text}\""),
                    },
                    token,
                ))
            }
        };
        Ok(literal)
    }

    /// Resolve `"path".encoding` against the configured base directory and
    /// check that it names an existing file.
    pub(crate) fn decode_file(&self, token: &Token) -> Result<FileRef, ParseError> {
        let text = self.cursor.text(token);
        let (quoted, name) = text.rsplit_once("\".").unwrap_or((text, ""));
        let encoding = Encoding::parse(name).ok_or_else(|| {
            ParseError::at(
                ParseErrorKind::UnknownEncoding {
                    name: name.to_owned(),
                },
                token,
            )
        })?;
        let raw = quoted.strip_prefix('"').unwrap_or(quoted);
        let path = resolve_path(&self.config.default_path, raw);

        if !self.fs.exists(&path) {
            return Err(ParseError::at(ParseErrorKind::FileNotFound { path }, token));
        }
        if !self.fs.is_file(&path) {
            return Err(ParseError::at(ParseErrorKind::NotAFile { path }, token));
        }
        Ok(FileRef { path, encoding })
    }
}

/// Text between the quotes of a string token, escapes untouched.
pub(crate) fn string_body(text: &str) -> &str {
    let inner = text.strip_prefix('"').unwrap_or(text);
    inner.strip_suffix('"').unwrap_or(inner)
}

/// `"…".date` minus the quotes and suffix.
fn date_body(text: &str) -> &str {
    let without_suffix = text.get(..text.len().saturating_sub(5)).unwrap_or(text);
    string_body(without_suffix)
}

/// Split an optional `-` and radix prefix off an integer literal.
fn split_sign_radix(text: &str) -> (bool, u32, &str) {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (radix, digits) = match body.get(..2) {
        Some("0x" | "0X") => (16, &body[2..]),
        Some("0o" | "0O") => (8, &body[2..]),
        Some("0b" | "0B") => (2, &body[2..]),
        _ => (10, body),
    };
    (negative, radix, digits)
}

/// Parse a number token: decimal with fraction and exponent, `0x`/`0o`/`0b`
/// integers, `Infinity`, `NaN`, with `_` separators and a leading `-`.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let (negative, radix, digits) = split_sign_radix(&cleaned);
    if digits.is_empty() {
        return None;
    }

    let magnitude = if radix != 10 {
        digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })?
    } else {
        match digits {
            "Infinity" => f64::INFINITY,
            "NaN" => f64::NAN,
            _ if digits.bytes().any(|b| b.is_ascii_digit()) => digits.parse::<f64>().ok()?,
            _ => return None,
        }
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse an `n`-suffixed integer in any radix.
pub fn parse_bigint(text: &str) -> Option<BigInt> {
    let cleaned: String = text
        .strip_suffix('n')?
        .chars()
        .filter(|&c| c != '_')
        .collect();
    let (negative, radix, digits) = split_sign_radix(&cleaned);
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)?;
    Some(if negative { -magnitude } else { magnitude })
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y, %I:%M:%S %p",
];

/// Parse a date literal body. Values without an offset are UTC.
///
/// Accepted: RFC 3339, ISO date-times without offset, `YYYY-MM-DD`,
/// `YYYY-MM`, `YYYY`, RFC 2822, `M/D/YYYY` and `M/D/YYYY, h:mm:ss AM`.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    let date = match text.len() {
        4 if text.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveDate::parse_from_str(&format!("{text}-01-01"), "%Y-%m-%d").ok()
        }
        7 => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(text, "%m/%d/%Y"))
            .ok(),
    }?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Split `/pattern/flags` and check that the pattern compiles.
///
/// `i`, `m` and `s` map onto the matcher options; `g`, `u` and `y` are kept
/// on the value but do not affect validation. On failure returns the pattern
/// and the reason.
pub fn parse_regexp(text: &str) -> Result<RegExpValue, (String, String)> {
    let inner = text.strip_prefix('/').unwrap_or(text);
    let (pattern, flags) = inner.rsplit_once('/').unwrap_or((inner, ""));
    regex::RegexBuilder::new(pattern)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .build()
        .map_err(|err| (pattern.to_owned(), err.to_string()))?;
    Ok(RegExpValue::new(pattern, flags))
}
