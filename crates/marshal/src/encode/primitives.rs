use core::fmt::Write as _;

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::decimal::Decimal;

pub fn format_bool(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

pub fn format_null() -> &'static str {
    "null"
}

/// Plain decimal text for a finite float: shortest round-trip digits, no
/// exponent, `-0` as `0`. `None` for NaN and infinities.
pub fn format_f64(f: f64) -> Option<String> {
    Decimal::from_f64(f).map(|d| d.to_string())
}

/// RFC 3339 with `Z` for UTC and only the significant fractional digits:
/// `.5` rather than `.500`, no fraction at all on whole seconds.
pub fn format_timestamp(t: &DateTime<FixedOffset>) -> String {
    let full = t.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let Some(dot) = full.find('.') else {
        return full;
    };
    let end = full[dot + 1..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(full.len(), |i| dot + 1 + i);
    let fraction = full[dot + 1..end].trim_end_matches('0');

    let mut out = String::with_capacity(full.len());
    out.push_str(&full[..dot]);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out.push_str(&full[end..]);
    out
}

fn is_control(c: char) -> bool {
    (c as u32) < 0x20
}

/// Append `s` to `out` as a quoted JSON string.
pub fn escape_and_quote_into(out: &mut String, s: &str, escape_html: bool) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '<' | '>' | '&' if escape_html => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            // U+2028 and U+2029 break JavaScript string literals.
            '\u{2028}' | '\u{2029}' if escape_html => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            c if is_control(c) => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
