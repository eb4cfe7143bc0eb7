use chrono::{DateTime, FixedOffset};
use marshal::{Decimal, Kind, Options, Record};
use serde_json::{Value, json};

fn t0() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-05-01T12:34:56.123+02:00").unwrap()
}

fn payload(id: i64, value: f64, message: &str) -> Record {
    Record::new()
        .with("id", id)
        .with("timestamp", t0())
        .with_optional("value", Decimal::from_f64(value))
        .with("message", message)
}

#[test]
fn default_encoding_of_example_record() -> Result<(), Box<dyn std::error::Error>> {
    let out = marshal::encode_to_string(&payload(1, 12345.6789, "default encoding"), &Options::default())?;
    assert_eq!(
        out,
        r#"{"id":1,"timestamp":"2024-05-01T12:34:56.123+02:00","value":12345.6789,"message":"default encoding"}"#
    );
    Ok(())
}

#[test]
fn fields_keep_declaration_order() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new().with("z", 1).with("a", 2).with("m", 3);
    let out = marshal::encode_to_string(&record, &Options::default())?;
    assert_eq!(out, r#"{"z":1,"a":2,"m":3}"#);
    Ok(())
}

#[test]
fn every_field_appears_exactly_once_without_rules() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new()
        .with("flag", false)
        .with("count", 0u32)
        .with("ratio", 0.0)
        .with("name", "")
        .with_null("price", Kind::Decimal)
        .with("nested", Record::new());
    let out = marshal::encode_to_string(&record, &Options::default())?;
    let parsed: Value = serde_json::from_str(&out)?;
    let obj = parsed.as_object().unwrap();
    assert_eq!(obj.len(), record.len());
    for field in record.fields() {
        assert_eq!(out.matches(&format!("\"{}\":", field.name())).count(), 1);
    }
    assert_eq!(parsed["price"], Value::Null);
    assert_eq!(parsed["nested"], json!({}));
    Ok(())
}

#[test]
fn built_in_scalar_renderings() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new()
        .with("t", true)
        .with("neg", -42i64)
        .with("big", u64::MAX)
        .with("f", 1.5f64)
        .with("tiny", 1e-7)
        .with("huge", 1e21)
        .with("negzero", -0.0)
        .with("dec", "-0.000120".parse::<Decimal>()?)
        .with("utc", DateTime::parse_from_rfc3339("2024-05-01T12:34:56Z")?);
    let out = marshal::encode_to_string(&record, &Options::default())?;
    assert_eq!(
        out,
        concat!(
            r#"{"t":true,"neg":-42,"big":18446744073709551615,"f":1.5,"tiny":0.0000001,"#,
            r#""huge":1000000000000000000000,"negzero":0,"dec":-0.00012,"utc":"2024-05-01T12:34:56Z"}"#
        )
    );
    Ok(())
}

#[test]
fn default_timestamps_keep_only_significant_fraction_digits() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new()
        .with("half", DateTime::parse_from_rfc3339("2024-05-01T12:34:56.5Z")?)
        .with("whole", DateTime::parse_from_rfc3339("2024-05-01T12:34:56.000Z")?)
        .with("micro", DateTime::parse_from_rfc3339("2024-05-01T12:34:56.000120-07:00")?)
        .with("nano", DateTime::parse_from_rfc3339("2024-05-01T12:34:56.000000001+05:30")?);
    let out = marshal::encode_to_string(&record, &Options::default())?;
    assert_eq!(
        out,
        concat!(
            r#"{"half":"2024-05-01T12:34:56.5Z","whole":"2024-05-01T12:34:56Z","#,
            r#""micro":"2024-05-01T12:34:56.00012-07:00","nano":"2024-05-01T12:34:56.000000001+05:30"}"#
        )
    );
    Ok(())
}

#[test]
fn f32_values_keep_their_shortest_digits() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new()
        .with("tenth", 0.1f32)
        .with("third", 1.0f32 / 3.0)
        .with("big", 3.4e38f32);
    let out = marshal::encode_to_string(&record, &Options::default())?;
    assert_eq!(
        out,
        r#"{"tenth":0.1,"third":0.33333334,"big":340000000000000000000000000000000000000}"#
    );

    let err = marshal::encode(&Record::new().with("nan", f32::NAN), &Options::default()).unwrap_err();
    assert_eq!(err.field(), Some("nan"));
    Ok(())
}

#[test]
fn strings_and_keys_are_escaped() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new()
        .with("quote\"key", "a\"b\\c")
        .with("ctl", "line\nbreak\ttab\u{1}")
        .with("html", "<b>&</b>");
    let out = marshal::encode_to_string(&record, &Options::default())?;
    assert!(out.contains(r#""quote\"key":"a\"b\\c""#));
    assert!(out.contains(r#""ctl":"line\nbreak\ttab\u0001""#));
    assert!(out.contains(r#""html":"<b>&</b>""#));

    let parsed: Value = serde_json::from_str(&out)?;
    assert_eq!(parsed["ctl"], json!("line\nbreak\ttab\u{1}"));
    Ok(())
}

#[test]
fn escape_html_option() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new().with("html", "<b>&</b>");
    let mut opts = Options::default();
    opts.escape_html = true;
    let out = marshal::encode_to_string(&record, &opts)?;
    assert_eq!(out, r#"{"html":"\u003cb\u003e\u0026\u003c/b\u003e"}"#);
    Ok(())
}

#[test]
fn stringify_numbers_quotes_numeric_kinds_only() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new()
        .with("i", 7)
        .with("u", 8u8)
        .with("f", 2.25)
        .with("d", "10.50".parse::<Decimal>()?)
        .with("b", true)
        .with_null("n", Kind::Int);
    let mut opts = Options::default();
    opts.stringify_numbers = true;
    let out = marshal::encode_to_string(&record, &opts)?;
    assert_eq!(out, r#"{"i":"7","u":"8","f":"2.25","d":"10.5","b":true,"n":null}"#);
    Ok(())
}

#[test]
fn nested_records_encode_as_objects() -> Result<(), Box<dyn std::error::Error>> {
    let inner = Record::new().with("x", 1).with("y", "two");
    let record = Record::new().with("id", 9).with("inner", inner).with("after", false);
    let out = marshal::encode_to_string(&record, &Options::default())?;
    assert_eq!(out, r#"{"id":9,"inner":{"x":1,"y":"two"},"after":false}"#);
    Ok(())
}

#[test]
fn multiline_layout() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new()
        .with("id", 1)
        .with("inner", Record::new().with("x", 1))
        .with("empty", Record::new());
    let mut opts = Options::default();
    opts.multiline = true;
    let out = marshal::encode_to_string(&record, &opts)?;
    assert_eq!(out, "{\n  \"id\": 1,\n  \"inner\": {\n    \"x\": 1\n  },\n  \"empty\": {}\n}");

    opts.indent = 4;
    let out = marshal::encode_to_string(&record, &opts)?;
    assert!(out.contains("\n        \"x\": 1\n    }"));
    Ok(())
}

#[test]
fn empty_record_is_empty_object() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(marshal::encode(&Record::new(), &Options::default())?, b"{}");
    Ok(())
}

#[test]
fn encoding_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let record = payload(1, 12345.6789, "default encoding");
    let opts = Options::default().with_formatter(marshal::formatters::decimal_as_string());
    let first = marshal::encode(&record, &opts)?;
    let second = marshal::encode(&record, &opts)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn non_finite_float_fails_with_field_name() {
    let record = Record::new().with("ok", 1.0).with("ratio", f64::NAN);
    let err = marshal::encode(&record, &Options::default()).unwrap_err();
    assert_eq!(err.field(), Some("ratio"));
    assert!(matches!(err.cause(), Some(marshal::FieldError::NonFiniteFloat(_))));
    assert!(err.to_string().contains("`ratio`"));
}

#[test]
fn encode_to_writer_writes_whole_document() -> Result<(), Box<dyn std::error::Error>> {
    let mut buf = Vec::new();
    marshal::encode_to_writer(&mut buf, &Record::new().with("a", 1), &Options::default())?;
    assert_eq!(buf, br#"{"a":1}"#);
    Ok(())
}

#[test]
fn encode_to_writer_writes_nothing_on_failure() {
    let mut buf = Vec::new();
    let record = Record::new().with("a", 1).with("b", f64::INFINITY);
    assert!(marshal::encode_to_writer(&mut buf, &record, &Options::default()).is_err());
    assert!(buf.is_empty());
}
