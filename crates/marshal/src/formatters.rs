//! Ready-made rules for [`Options::with_formatter`](crate::Options::with_formatter).
//!
//! ```
//! use marshal::{formatters, Options};
//!
//! let mut options = Options::default()
//!     .with_formatter(formatters::rfc3339())
//!     .with_formatter(formatters::decimal_as_string());
//! options.omit_zero_fields = true;
//! ```

use core::fmt::Write as _;

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::decimal::Decimal;
use crate::options::Rendered;
use crate::value::BoxError;

/// Timestamps as RFC 3339 text with whole seconds, `Z` for UTC.
pub fn rfc3339() -> impl Fn(&DateTime<FixedOffset>) -> Result<Rendered, BoxError> + Send + Sync + 'static {
    |t: &DateTime<FixedOffset>| -> Result<Rendered, BoxError> {
        Ok(Rendered::text(t.to_rfc3339_opts(SecondsFormat::Secs, true)))
    }
}

/// Timestamps through a chrono strftime layout. An invalid layout fails the
/// field rather than panicking.
pub fn timestamp_layout(
    layout: &str,
) -> impl Fn(&DateTime<FixedOffset>) -> Result<Rendered, BoxError> + Send + Sync + use<> {
    let layout = layout.to_owned();
    move |t: &DateTime<FixedOffset>| -> Result<Rendered, BoxError> {
        let mut out = String::new();
        write!(out, "{}", t.format(&layout))
            .map_err(|_| format!("invalid timestamp layout `{layout}`"))?;
        Ok(Rendered::Text(out))
    }
}

/// Timestamps as a bare integer count of Unix seconds.
pub fn unix_seconds() -> impl Fn(&DateTime<FixedOffset>) -> Result<Rendered, BoxError> + Send + Sync + 'static {
    |t: &DateTime<FixedOffset>| -> Result<Rendered, BoxError> {
        Ok(Rendered::raw(t.timestamp().to_string()))
    }
}

/// Decimals as their exact text inside a JSON string.
pub fn decimal_as_string() -> impl Fn(&Decimal) -> Result<Rendered, BoxError> + Send + Sync + 'static {
    |d: &Decimal| -> Result<Rendered, BoxError> { Ok(Rendered::text(d.to_string())) }
}
