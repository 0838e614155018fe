#![allow(clippy::unwrap_used)]

use bcon_ir::{Buffer, Encoding, Record, RegExpValue, Value};
use chrono::{TimeZone, Utc};
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

use super::*;

fn record<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Object(entries.into_iter().collect())
}

fn compact(value: &Value) -> String {
    match stringify(value, None, 0) {
        Ok(text) => text,
        Err(err) => panic!("stringify failed: {err}"),
    }
}

#[test]
fn compact_record() {
    let value = record([
        ("name", Value::from("web")),
        ("port", Value::Number(8080.0)),
        ("debug", Value::Boolean(false)),
    ]);
    assert_eq!(
        compact(&value),
        r#"export [@name=>"web";@port=>8080;@debug=>False;];"#
    );
}

#[test]
fn compact_sequence() {
    let value = Value::Array(vec![Value::Null, Value::Undefined, Value::Boolean(true)]);
    assert_eq!(compact(&value), "export [@*=>Null;@*=>Undefined;@*=>True;];");
}

#[test]
fn empty_containers() {
    assert_eq!(compact(&Value::Object(Record::new())), "export [];");
    assert_eq!(
        compact(&record([("map", Value::Object(Record::new()))])),
        "export [@map=>[];];"
    );
}

#[test]
fn empty_sequences_use_the_prelude() {
    assert_eq!(
        compact(&Value::Array(Vec::new())),
        "class EmptyList(...items) [@items => items;];use EmptyList() as empty;export empty.items;"
    );
    assert_eq!(
        stringify(&record([("list", Value::Array(Vec::new()))]), None, 2).as_deref(),
        Ok("class EmptyList(...items) [@items => items;];\n\
            use EmptyList() as empty;\n\
            export [\n  @list => empty.items;\n];")
    );
}

#[test]
fn empty_sequence_from_replacer_gets_the_prelude() {
    let value = record([("tags", Value::from(""))]);
    let split = |v: &Value| match v {
        Value::String(s) if s.is_empty() => Value::Array(Vec::new()),
        other => other.clone(),
    };
    assert_eq!(
        stringify(&value, Some(&split), 0).as_deref(),
        Ok("class EmptyList(...items) [@items => items;];use EmptyList() as empty;export [@tags=>empty.items;];")
    );
}

#[test]
fn indented_nesting() {
    let value = record([
        ("name", Value::from("web")),
        (
            "ports",
            Value::Array(vec![Value::Number(80.0), Value::Number(443.0)]),
        ),
    ]);
    let expected = "\
export [
  @name => \"web\";
  @ports => [
    @* => 80;
    @* => 443;
  ];
];";
    assert_eq!(stringify(&value, None, 2).as_deref(), Ok(expected));
}

#[test]
fn leaf_forms() {
    let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).single();
    let Some(date) = date else {
        panic!("valid date");
    };
    let value = Value::Array(vec![
        Value::Number(1.5),
        Value::Number(-0.25),
        Value::Number(1e21),
        Value::BigInt(BigInt::from(-12)),
        Value::Date(date),
        Value::RegExp(RegExpValue::new("a+b", "gi")),
        Value::Buffer(Buffer::new(b"file body".to_vec(), Encoding::Utf8)),
    ]);
    assert_eq!(
        compact(&value),
        "export [@*=>1.5;@*=>-0.25;@*=>1e+21;@*=>-12n;\
         @*=>\"2024-03-01T12:30:00.000Z\".date;@*=>/a+b/gi;@*=>\"file body\";];"
    );
}

#[test]
fn strings_are_escaped() {
    let value = Value::Array(vec![
        Value::from("say \"hi\""),
        Value::from(r"C:\temp"),
        Value::from("[not.a.placeholder]"),
        Value::from("tab\tline\nfeed\u{b}\u{c}\u{8}\r"),
        Value::from("# and ' stay"),
    ]);
    assert_eq!(
        compact(&value),
        r##"export [@*=>"say \"hi\"";@*=>"C:\\temp";@*=>"\[not.a.placeholder\]";@*=>"tab\tline\nfeed\v\f\b\r";@*=>"# and ' stay";];"##
    );
}

#[test]
fn replacer_applies_to_leaves() {
    let value = record([
        ("a", Value::Number(1.0)),
        ("nested", Value::Array(vec![Value::Number(2.0)])),
    ]);
    let double = |v: &Value| match v {
        Value::Number(n) => Value::Number(n * 2.0),
        other => other.clone(),
    };
    assert_eq!(
        stringify(&value, Some(&double), 0).as_deref(),
        Ok("export [@a=>2;@nested=>[@*=>4;];];")
    );
}

#[test]
fn replacer_can_expand_into_containers() {
    let value = record([("tags", Value::from("a,b"))]);
    let split = |v: &Value| match v {
        Value::String(s) => Value::Array(s.split(',').map(Value::from).collect()),
        other => other.clone(),
    };
    assert_eq!(
        stringify(&value, Some(&split), 0).as_deref(),
        Ok(r#"export [@tags=>[@*=>"a";@*=>"b";];];"#)
    );
}

#[test]
fn replacer_output_is_not_replaced_again() {
    let value = record([("tags", Value::from("a,b")), ("n", Value::Number(1.0))]);
    let calls = std::cell::Cell::new(0);
    let split = |v: &Value| {
        calls.set(calls.get() + 1);
        match v {
            Value::String(s) => Value::Array(s.split(',').map(Value::from).collect()),
            other => other.clone(),
        }
    };
    assert_eq!(
        stringify(&value, Some(&split), 0).as_deref(),
        Ok(r#"export [@tags=>[@*=>"a";@*=>"b";];@n=>1;];"#)
    );
    assert_eq!(calls.get(), 2);
}

#[test]
fn rejects_non_containers() {
    assert_eq!(
        stringify(&Value::Number(1.0), None, 0),
        Err(StringifyError::NotAContainer { found: "number" })
    );
    assert_eq!(
        stringify(&Value::from("x"), None, 0)
            .map_err(|e| e.to_string())
            .unwrap_err(),
        "cannot stringify string: expected an object or an array"
    );
}

#[test]
fn rejects_keys_that_are_not_identifiers() {
    for key in ["", "with space", "1st", "dash-ed"] {
        assert_eq!(
            stringify(&record([(key, Value::Null)]), None, 0),
            Err(StringifyError::InvalidKey { key: key.to_owned() })
        );
    }
    assert!(stringify(&record([("_ok_1", Value::Null)]), None, 0).is_ok());
}

#[test]
fn streams_into_fmt_write() {
    let mut emitter = WriteEmitter::new(String::new());
    let value = Value::Array(vec![Value::Number(1.0)]);
    assert_eq!(stringify_to(&mut emitter, &value, None, 0), Ok(()));
    assert_eq!(emitter.finish().as_deref(), Ok("export [@*=>1;];"));
}
