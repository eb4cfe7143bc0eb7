//! Record to JSON encoding.
//!
//! Fields are visited in declaration order. For each field the zero check runs
//! first (when `omit_zero_fields` is set), then the field-path rule, the type
//! rule and finally the built-in rendering, stopping at the first that does
//! not defer. Output is built in a private buffer and only handed back once
//! every field has rendered, so a failure never leaks partial output.

pub mod primitives;
pub mod writer;

use std::borrow::Cow;

use serde::de::IgnoredAny;

use crate::error::{Error, FieldError, Result};
use crate::options::{Formatter, Options, Rendered};
use crate::value::{Field, Record, Value};

use writer::JsonWriter;

pub fn encode_record_to_string(record: &Record, opts: &Options) -> Result<String> {
    let mut w = JsonWriter::new(opts);
    write_record(record, &mut w, opts, "")?;
    Ok(w.into_string())
}

fn write_record(record: &Record, w: &mut JsonWriter, opts: &Options, prefix: &str) -> Result<()> {
    w.begin_object();
    for field in record.fields() {
        if opts.omit_zero_fields && field.value().is_zero() {
            continue;
        }
        let path = field_path(prefix, field.name());
        w.key(field.name());
        write_field(field, w, opts, &path)?;
    }
    w.end_object();
    Ok(())
}

fn field_path<'a>(prefix: &str, name: &'a str) -> Cow<'a, str> {
    if prefix.is_empty() {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{prefix}.{name}"))
    }
}

fn write_field(field: &Field, w: &mut JsonWriter, opts: &Options, path: &str) -> Result<()> {
    let rules = [opts.field_rule(path), opts.type_rule(field.kind())];
    for rule in rules.into_iter().flatten() {
        if apply_rule(rule, field.value(), w, path)? {
            return Ok(());
        }
    }
    write_builtin(field.value(), w, opts, path)
}

/// Returns `false` when the rule deferred.
fn apply_rule(rule: &dyn Formatter, value: &Value, w: &mut JsonWriter, path: &str) -> Result<bool> {
    let rendered = rule
        .format(value)
        .map_err(|e| Error::encode(path, FieldError::Formatter(e)))?;
    match rendered {
        Rendered::Text(s) => w.string(&s),
        Rendered::Raw(bytes) => {
            let token = validate_raw(&bytes).map_err(|cause| Error::encode(path, cause))?;
            w.raw(token);
        }
        Rendered::Defer => return Ok(false),
    }
    Ok(true)
}

/// Checks that `bytes` hold exactly one JSON value and returns it without
/// surrounding whitespace.
fn validate_raw(bytes: &[u8]) -> core::result::Result<&str, FieldError> {
    let text = core::str::from_utf8(bytes.trim_ascii()).map_err(FieldError::InvalidUtf8)?;
    serde_json::from_str::<IgnoredAny>(text).map_err(FieldError::InvalidOutput)?;
    Ok(text)
}

fn write_builtin(value: &Value, w: &mut JsonWriter, opts: &Options, path: &str) -> Result<()> {
    let quote = opts.stringify_numbers;
    match value {
        Value::Null => w.raw(primitives::format_null()),
        Value::Bool(b) => w.raw(primitives::format_bool(*b)),
        Value::Int(i) => w.number(&i.to_string(), quote),
        Value::Uint(u) => w.number(&u.to_string(), quote),
        Value::Float(f) => {
            let literal = primitives::format_f64(*f)
                .ok_or_else(|| Error::encode(path, FieldError::NonFiniteFloat(*f)))?;
            w.number(&literal, quote);
        }
        Value::Decimal(d) => w.number(&d.to_string(), quote),
        Value::Timestamp(t) => w.string(&primitives::format_timestamp(t)),
        Value::String(s) => w.string(s),
        Value::Record(r) => write_record(r, w, opts, path)?,
        Value::Text(t) => {
            let s = t
                .marshal_text()
                .map_err(|e| Error::encode(path, FieldError::Text(e)))?;
            w.string(&s);
        }
    }
    Ok(())
}
