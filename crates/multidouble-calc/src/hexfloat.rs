// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Hexadecimal floating-point text (`0x1.921fb54442d18p+1`).
//!
//! Values are exchanged in hexadecimal so that every term of a multi-double
//! survives the round trip through a text file bit for bit.

use multidouble_core::eft::mul_pow2;
use std::fmt::Display;

/// Significant bits kept while reading a mantissa; further nonzero digits
/// only set a sticky bit.
const MANTISSA_LIMIT: u64 = 1 << 60;

/// Exponents beyond this magnitude saturate to zero or infinity anyway.
const EXPONENT_CLAMP: i64 = 4096;

/// The error returned when a token is not a floating-point literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFloatError {
    /// The rejected token.
    pub token: String,
}

impl Display for ParseFloatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not parse token '{}' as a floating-point value", self.token)
    }
}

impl std::error::Error for ParseFloatError {}

/// Formats `value` like C's `%.13a`, e.g. `3.0` as `0x1.8000000000000p+1`.
pub fn format_hex(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let bits = value.to_bits();
    let sign = if bits >> 63 == 1 { "-" } else { "" };
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & 0x000f_ffff_ffff_ffff;
    match (biased, fraction) {
        (0, 0) => format!("{sign}0x0.0000000000000p+0"),
        (0, _) => format!("{sign}0x0.{fraction:013x}p-1022"),
        _ => format!("{sign}0x1.{fraction:013x}p{:+}", biased - 1023),
    }
}

/// Parses a hexadecimal (`0x1.8p+1`) or decimal (`3.0`) floating-point literal.
///
/// Hexadecimal mantissas longer than fifteen digits are rounded to nearest.
pub fn parse_f64(token: &str) -> Result<f64, ParseFloatError> {
    let trimmed = token.trim();
    let error = || ParseFloatError {
        token: trimmed.to_string(),
    };
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let hex = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"));
    let magnitude = match hex {
        Some(body) => parse_hex_magnitude(body).ok_or_else(error)?,
        None => unsigned.parse::<f64>().map_err(|_| error())?,
    };
    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_hex_magnitude(body: &str) -> Option<f64> {
    let (digits, exponent) = match body.find(['p', 'P']) {
        Some(pos) => (&body[..pos], body[pos + 1..].parse::<i64>().ok()?),
        None => (body, 0),
    };
    let (integral, fractional) = digits.split_once('.').unwrap_or((digits, ""));
    if integral.is_empty() && fractional.is_empty() {
        return None;
    }

    let mut mantissa = 0_u64;
    let mut scale = exponent.clamp(-EXPONENT_CLAMP, EXPONENT_CLAMP);
    let mut sticky = false;
    for (c, is_fraction) in integral
        .chars()
        .map(|c| (c, false))
        .chain(fractional.chars().map(|c| (c, true)))
    {
        let d = c.to_digit(16)? as u64;
        if mantissa < MANTISSA_LIMIT {
            mantissa = mantissa * 16 + d;
            if is_fraction {
                scale -= 4;
            }
        } else {
            sticky |= d != 0;
            if !is_fraction {
                scale += 4;
            }
        }
    }
    if sticky {
        mantissa |= 1;
    }
    Some(mul_pow2(mantissa as f64, scale as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex(3.0), "0x1.8000000000000p+1");
        assert_eq!(format_hex(-0.1), "-0x1.999999999999ap-4");
        assert_eq!(format_hex(std::f64::consts::PI), "0x1.921fb54442d18p+1");
        assert_eq!(format_hex(0.0), "0x0.0000000000000p+0");
        assert_eq!(format_hex(-0.0), "-0x0.0000000000000p+0");
        assert_eq!(format_hex(f64::from_bits(1)), "0x0.0000000000001p-1022");
        assert_eq!(format_hex(f64::MAX), "0x1.fffffffffffffp+1023");
        assert_eq!(format_hex(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_hex(f64::NAN), "nan");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_f64("0x1.8p+1"), Ok(3.0));
        assert_eq!(parse_f64("0x1.921fb54442d18p+1"), Ok(std::f64::consts::PI));
        assert_eq!(parse_f64("-0x1.999999999999ap-4"), Ok(-0.1));
        assert_eq!(parse_f64("0X10"), Ok(16.0));
        assert_eq!(parse_f64("0x.8"), Ok(0.5));
        assert_eq!(parse_f64(" 0x1p-1074 "), Ok(f64::from_bits(1)));
        assert_eq!(parse_f64("0x1p+1024"), Ok(f64::INFINITY));
        assert!(parse_f64("-0x0p+0").is_ok_and(|v| v == 0.0 && v.is_sign_negative()));
    }

    #[test]
    fn test_parse_long_mantissa_rounds_to_nearest() {
        // 2^64 + 2^11 + 1 lies just above the midpoint between two doubles.
        assert_eq!(parse_f64("0x10000000000000801"), Ok(18446744073709555712.0));
        assert_eq!(parse_f64("0x10000000000000800"), Ok(18446744073709551616.0));
    }

    #[test]
    fn test_parse_decimal_fallback() {
        assert_eq!(parse_f64("2.5"), Ok(2.5));
        assert_eq!(parse_f64("-1e-3"), Ok(-1e-3));
        assert_eq!(parse_f64("inf"), Ok(f64::INFINITY));
        assert!(parse_f64("nan").is_ok_and(f64::is_nan));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for token in ["", "0x", "0x1.g", "0x1p", "0x1p+x", "abc", "1.0.0"] {
            assert_eq!(
                parse_f64(token),
                Err(ParseFloatError {
                    token: token.to_string()
                }),
                "{token}"
            );
        }
    }

    #[test]
    fn test_round_trip_is_bit_exact() {
        for value in [1.0 / 3.0, -6.02214076e23, 1e-310, f64::MIN_POSITIVE, 0.0] {
            let parsed = parse_f64(&format_hex(value)).map(f64::to_bits);
            assert_eq!(parsed, Ok(value.to_bits()), "{value:e}");
        }
    }
}
