//! Exact decimal numbers.
//!
//! A [`Decimal`] is kept as a sign, a string of ASCII digits and a scale (the
//! number of digits after the decimal point). Values are normalized on
//! construction so that equal numbers compare equal:
//! - no leading zeros in the digit string (zero is `"0"`)
//! - no trailing fractional zeros
//! - zero is never negative

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Largest accepted exponent magnitude in a parsed literal.
pub const MAX_EXPONENT: i64 = 1 << 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    digits: String,
    scale: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    #[error("empty decimal literal")]
    Empty,
    #[error("invalid character {0:?} in decimal literal")]
    InvalidChar(char),
    #[error("invalid exponent in decimal literal")]
    InvalidExponent,
}

impl Decimal {
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: String::from("0"),
            scale: 0,
        }
    }

    /// Shortest decimal that round-trips to `value`; `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value == 0.0 {
            return Some(Self::zero());
        }
        let mut buf = ryu::Buffer::new();
        buf.format_finite(value).parse().ok()
    }

    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Number of digits after the decimal point.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn normalized(negative: bool, mut digits: String, mut scale: u32) -> Self {
        while scale > 0 && digits.ends_with('0') {
            digits.pop();
            scale -= 1;
        }
        let leading = digits.bytes().take_while(|&b| b == b'0').count();
        digits.drain(..leading);
        if digits.is_empty() {
            return Self::zero();
        }
        Self {
            negative,
            digits,
            scale,
        }
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(idx) => {
                let exp: i64 = body[idx + 1..]
                    .parse()
                    .map_err(|_| ParseDecimalError::InvalidExponent)?;
                if exp.unsigned_abs() > MAX_EXPONENT.unsigned_abs() {
                    return Err(ParseDecimalError::InvalidExponent);
                }
                (&body[..idx], exp)
            }
            None => (body, 0),
        };

        let mut digits = String::with_capacity(mantissa.len());
        let mut frac_len: i64 = 0;
        let mut seen_point = false;
        for ch in mantissa.chars() {
            match ch {
                '0'..='9' => {
                    digits.push(ch);
                    if seen_point {
                        frac_len += 1;
                    }
                }
                '.' if !seen_point => seen_point = true,
                other => return Err(ParseDecimalError::InvalidChar(other)),
            }
        }
        if digits.is_empty() {
            return Err(ParseDecimalError::Empty);
        }

        let scale = frac_len - exponent;
        let scale = if scale < 0 {
            let zeros = usize::try_from(-scale).map_err(|_| ParseDecimalError::InvalidExponent)?;
            digits.extend(core::iter::repeat_n('0', zeros));
            0
        } else {
            u32::try_from(scale).map_err(|_| ParseDecimalError::InvalidExponent)?
        };
        Ok(Self::normalized(negative, digits, scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&self.digits);
        }
        if scale >= self.digits.len() {
            f.write_str("0.")?;
            for _ in 0..scale - self.digits.len() {
                f.write_str("0")?;
            }
            return f.write_str(&self.digits);
        }
        let split = self.digits.len() - scale;
        f.write_str(&self.digits[..split])?;
        f.write_str(".")?;
        f.write_str(&self.digits[split..])
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Self::normalized(v < 0, v.unsigned_abs().to_string(), 0)
    }
}

impl From<u64> for Decimal {
    fn from(v: u64) -> Self {
        Self::normalized(false, v.to_string(), 0)
    }
}
