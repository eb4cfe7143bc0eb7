use chrono::{DateTime, FixedOffset};
use marshal::{Decimal, FieldError, Options, Record, formatters};

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

#[test]
fn rfc3339_drops_fraction_and_keeps_offset() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new()
        .with("local", at("2024-05-01T12:34:56.987654321-05:30"))
        .with("utc", at("2024-05-01T12:34:56.5Z"));
    let opts = Options::default().with_formatter(formatters::rfc3339());
    let out = marshal::encode_to_string(&record, &opts)?;
    assert_eq!(out, r#"{"local":"2024-05-01T12:34:56-05:30","utc":"2024-05-01T12:34:56Z"}"#);

    let parsed: serde_json::Value = serde_json::from_str(&out)?;
    DateTime::parse_from_rfc3339(parsed["local"].as_str().unwrap())?;
    Ok(())
}

#[test]
fn timestamp_layout_formats_with_strftime() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::default().with_formatter(formatters::timestamp_layout("%Y/%m/%d %H:%M"));
    let out = marshal::encode_to_string(&Record::new().with("at", at("2024-05-01T08:09:10Z")), &opts)?;
    assert_eq!(out, r#"{"at":"2024/05/01 08:09"}"#);
    Ok(())
}

#[test]
fn invalid_timestamp_layout_fails_the_field() {
    let opts = Options::default().with_formatter(formatters::timestamp_layout("%Q"));
    let err = marshal::encode(&Record::new().with("at", at("2024-05-01T08:09:10Z")), &opts).unwrap_err();
    assert_eq!(err.field(), Some("at"));
    assert!(matches!(err.cause(), Some(FieldError::Formatter(_))));
}

#[test]
fn unix_seconds_is_a_bare_integer() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::default().with_formatter(formatters::unix_seconds());
    let out = marshal::encode_to_string(&Record::new().with("at", at("1970-01-01T01:00:00+01:00")), &opts)?;
    assert_eq!(out, r#"{"at":0}"#);
    Ok(())
}

#[test]
fn decimal_as_string_keeps_exact_digits() -> Result<(), Box<dyn std::error::Error>> {
    let exact: Decimal = "123456789012345678901234567890.123456789".parse()?;
    let opts = Options::default().with_formatter(formatters::decimal_as_string());
    let out = marshal::encode_to_string(&Record::new().with("v", exact), &opts)?;
    assert_eq!(out, r#"{"v":"123456789012345678901234567890.123456789"}"#);
    Ok(())
}

#[test]
fn decimal_rule_wins_over_stringify_numbers() -> Result<(), Box<dyn std::error::Error>> {
    let mut opts = Options::default().with_formatter(formatters::decimal_as_string());
    opts.stringify_numbers = true;
    let record = Record::new().with("v", "1.5".parse::<Decimal>()?).with("n", 2);
    assert_eq!(marshal::encode_to_string(&record, &opts)?, r#"{"v":"1.5","n":"2"}"#);
    Ok(())
}
