#![no_main]
use chrono::{DateTime, FixedOffset, Offset, Utc};
use libfuzzer_sys::{arbitrary, fuzz_target};
use marshal::{Decimal, Kind, Options, Record, formatters};

const MAX_DEPTH: usize = 4;
const MAX_FIELDS: usize = 12;

fn timestamp(u: &mut arbitrary::Unstructured) -> arbitrary::Result<DateTime<FixedOffset>> {
    let secs = u.int_in_range(-62_135_596_800i64..=253_402_300_799)?;
    let nanos = u.int_in_range(0..=999_999_999u32)?;
    let utc = DateTime::<Utc>::from_timestamp(secs, nanos).unwrap_or_default();
    let offset = FixedOffset::east_opt(u.int_in_range(-86_399i32..=86_399)?).unwrap_or(Utc.fix());
    Ok(utc.with_timezone(&offset))
}

fn record(u: &mut arbitrary::Unstructured, depth: usize) -> arbitrary::Result<Record> {
    let size = u.int_in_range(0..=MAX_FIELDS)?;
    let mut r = Record::new();
    for _ in 0..size {
        let name: String = u.arbitrary()?;
        r = match u.int_in_range(0..=9u8)? {
            0 => r.with_null(name, Kind::Decimal),
            1 => r.with(name, u.arbitrary::<bool>()?),
            2 => r.with(name, u.arbitrary::<i64>()?),
            3 => r.with(name, u.arbitrary::<u64>()?),
            4 => r.with(name, u.arbitrary::<f64>()?),
            5 => r.with_optional(name, Decimal::from_f64(u.arbitrary()?)),
            6 => r.with(name, timestamp(u)?),
            7 if depth < MAX_DEPTH => r.with(name, record(u, depth + 1)?),
            _ => r.with(name, u.arbitrary::<String>()?),
        };
    }
    Ok(r)
}

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);
    let Ok(record) = record(&mut u, 0) else { return };

    let mut custom = Options::default()
        .with_formatter(formatters::rfc3339())
        .with_formatter(formatters::decimal_as_string());
    custom.omit_zero_fields = true;
    custom.escape_html = true;
    let mut pretty = Options::default();
    pretty.multiline = true;
    pretty.stringify_numbers = true;

    for opts in [Options::default(), custom, pretty] {
        match marshal::encode(&record, &opts) {
            Ok(out) => {
                let parsed: serde_json::Value = serde_json::from_slice(&out).expect("encoder produced invalid JSON");
                assert!(parsed.is_object());
            }
            Err(err) => assert!(err.field().is_some(), "error without a field: {err}"),
        }
    }
});
