//! Serialized values evaluate back to themselves.

#![allow(clippy::unwrap_used)]

use bcon_eval::parse_source;
use bcon_fmt::stringify;
use bcon_ir::{Config, MemoryFileSystem, Record, Value};
use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn reparse(value: &Value, indent: usize) -> Value {
    let text = stringify(value, None, indent).unwrap();
    match parse_source(&text, &Config::new("/"), &MemoryFileSystem::new()) {
        Ok(parsed) => parsed,
        Err(err) => panic!("{text}\nfailed to evaluate: {err}"),
    }
}

#[test]
fn tricky_strings_survive() {
    let value = Value::Array(
        [
            "[Main.port]",
            "[x ? y]",
            r"trailing \",
            "quote \" inside",
            "comment # markers ' inside",
            "control \u{8}\u{b}\u{c}\t\n",
            "unicode ✓ ü",
            "",
        ]
        .into_iter()
        .map(Value::from)
        .collect(),
    );
    assert_eq!(reparse(&value, 0), value);
    assert_eq!(reparse(&value, 4), value);
}

#[test]
fn nested_containers_survive() {
    let inner: Record = [
        ("big", Value::BigInt(BigInt::from(12_345_678_901_234_567_890_u64))),
        ("tiny", Value::Number(1.5e-7)),
        ("huge", Value::Number(2e300)),
        ("none", Value::Null),
    ]
    .into_iter()
    .collect();
    let value = Value::Object(
        [
            ("inner", Value::Object(inner)),
            (
                "list",
                Value::Array(vec![
                    Value::Array(vec![Value::from("x")]),
                    Value::Number(-3.0),
                    Value::Boolean(true),
                ]),
            ),
        ]
        .into_iter()
        .collect(),
    );
    assert_eq!(reparse(&value, 0), value);
    assert_eq!(reparse(&value, 2), value);
}

#[test]
fn empty_sequences_stay_sequences() {
    let value = Value::Object(
        [
            ("list", Value::Array(Vec::new())),
            ("map", Value::Object(Record::new())),
            ("nested", Value::Array(vec![Value::Array(Vec::new())])),
        ]
        .into_iter()
        .collect(),
    );
    assert_eq!(reparse(&value, 0), value);
    assert_eq!(reparse(&value, 2), value);
    assert_eq!(reparse(&Value::Array(Vec::new()), 0), Value::Array(Vec::new()));
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Boolean),
        (-1e12..1e12_f64).prop_map(Value::Number),
        any::<i64>().prop_map(|n| Value::BigInt(BigInt::from(n))),
        any::<String>().prop_map(Value::String),
    ]
}

fn container(inner: impl Strategy<Value = Value> + Clone) -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
        prop::collection::vec(("[a-z_][a-z0-9_]{0,6}", inner), 0..6)
            .prop_map(|entries| Value::Object(entries.into_iter().collect::<Record>())),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    container(leaf().prop_recursive(3, 24, 5, |inner| container(inner)).boxed())
}

proptest! {
    #[test]
    fn stringify_then_parse(value in tree(), indent in 0..4_usize) {
        prop_assert_eq!(reparse(&value, indent), value);
    }
}
