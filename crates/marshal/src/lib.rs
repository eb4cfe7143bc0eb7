#![doc = include_str!("../README.md")]

pub mod decimal;
pub mod encode;
pub mod error;
pub mod formatters;
pub mod options;
pub mod value;

pub use crate::decimal::Decimal;
pub use crate::error::{EncodeError, Error, FieldError, Result};
pub use crate::options::{Formatter, Options, Rendered};
pub use crate::value::{BoxError, Field, FieldType, Kind, MarshalText, Record, ToRecord, Value};

use std::io::Write;

/// Encode `record` as a single JSON object.
pub fn encode(record: &Record, options: &Options) -> Result<Vec<u8>> {
    encode_to_string(record, options).map(String::into_bytes)
}

pub fn encode_to_string(record: &Record, options: &Options) -> Result<String> {
    crate::encode::encode_record_to_string(record, options)
}

pub fn encode_to_vec<T: ToRecord + ?Sized>(value: &T, options: &Options) -> Result<Vec<u8>> {
    encode(&value.to_record(), options)
}

/// Encodes fully before writing, so the writer never sees partial output.
pub fn encode_to_writer<W: Write>(mut writer: W, record: &Record, options: &Options) -> Result<()> {
    let s = encode_to_string(record, options)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}
