use super::*;
use pretty_assertions::assert_eq;

#[test]
fn record_keeps_first_insertion_order() {
    let mut record = Record::new();
    record.insert("b", Value::from(1.0));
    record.insert("a", Value::from(2.0));
    let previous = record.insert("b", Value::from(3.0));

    assert_eq!(previous, Some(Value::Number(1.0)));
    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(record.get("b"), Some(&Value::Number(3.0)));
}

#[test]
fn record_equality_ignores_order() {
    let left: Record = [("x", Value::from(1.0)), ("y", Value::from("two"))]
        .into_iter()
        .collect();
    let right: Record = [("y", Value::from("two")), ("x", Value::from(1.0))]
        .into_iter()
        .collect();
    assert_eq!(left, right);

    let shorter: Record = [("x", Value::from(1.0))].into_iter().collect();
    assert_ne!(left, shorter);
}

#[test]
fn get_key_walks_records_and_sequences() {
    let inner: Record = [("port", Value::from(8080.0))].into_iter().collect();
    let items = Value::Array(vec![Value::from("a"), Value::Object(inner)]);

    assert_eq!(items.get_key("0"), Some(&Value::from("a")));
    assert_eq!(
        items.get_key("1").and_then(|v| v.get_key("port")),
        Some(&Value::Number(8080.0))
    );
    assert_eq!(items.get_key("length"), None);
    assert_eq!(Value::from("text").get_key("0"), None);
}

#[test]
fn number_formatting() {
    assert_eq!(format_number(42.0), "42");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(0.5), "0.5");
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(1.5e-7), "1.5e-7");
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn display_strings() {
    assert_eq!(Value::Boolean(true).to_display_string(), "true");
    assert_eq!(
        Value::Array(vec![Value::from(1.0), Value::Null, Value::from("x")]).to_display_string(),
        "1,,x"
    );
    assert_eq!(Value::Object(Record::new()).to_display_string(), "[object Object]");
    assert_eq!(
        Value::RegExp(RegExpValue::new("^a+$", "i")).to_display_string(),
        "/^a+$/i"
    );
    assert_eq!(
        Value::Buffer(Buffer::new(b"hi".to_vec(), Encoding::Hex)).to_display_string(),
        "6869"
    );
}

#[test]
fn type_names() {
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::Array(Vec::new()).type_name(), "Array");
    assert_eq!(Value::Number(f64::NAN).type_name(), "number");
}
