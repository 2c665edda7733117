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

//! Decimal scientific rendering shared by `Quad` and `Oct`.
//!
//! `Display` and `LowerExp` print `d.ddd…e±XX` with the formatter precision
//! as the number of digits after the decimal point. Up to 14 digits the
//! leading term is printed by the native formatter. Longer renderings scale
//! the value into `[1, 10)` and peel off one digit at a time; the digits are
//! truncated, not rounded, so the last digit may be off by one.

use crate::{MultiDouble, Oct, Quad};
use std::fmt;

/// Precisions up to this are served by the native `f64` formatter.
const NATIVE_PRECISION: usize = 14;

/// Largest power of ten applied in one scaling step; `10^300` stays finite.
const SCALE_CHUNK: u32 = 300;

/// Returns `10^n` by binary exponentiation in the precision of `T`.
fn pow10<T: MultiDouble>(n: u32) -> T {
    let mut exponent = n;
    let mut base = T::from(10.0);
    let mut acc = T::from(1.0);
    while exponent > 0 {
        if exponent & 1 == 1 {
            acc *= base;
        }
        exponent >>= 1;
        if exponent > 0 {
            base *= base;
        }
    }
    acc
}

/// Multiplies `value` by `10^n` without overflowing the intermediate powers.
fn scale_by_power_of_ten<T: MultiDouble>(value: T, n: i32) -> T {
    let mut value = value;
    let mut remaining = n.unsigned_abs();
    while remaining > 0 {
        let step = remaining.min(SCALE_CHUNK);
        if n > 0 {
            value *= pow10::<T>(step);
        } else {
            value /= pow10::<T>(step);
        }
        remaining -= step;
    }
    value
}

/// Formats a double like `{:.precision$e}` with a signed two digit exponent.
fn native_scientific(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let text = format!("{value:.precision$e}");
    match text.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exponent))) => format!("{mantissa}e{exponent:+03}"),
        _ => text,
    }
}

/// Renders `value` in decimal scientific notation with `precision` digits
/// after the decimal point, capped at `T::MAX_PRECISION`.
pub fn to_scientific<T: MultiDouble>(value: T, precision: usize) -> String {
    let leading = value.leading();
    if precision <= NATIVE_PRECISION || !leading.is_finite() {
        return native_scientific(leading, precision);
    }
    let precision = precision.min(T::MAX_PRECISION);
    if leading == 0.0 {
        return format!("0.{:0<precision$}e+00", "");
    }

    let mut out = String::with_capacity(precision + 8);
    let value = if leading < 0.0 {
        out.push('-');
        -value
    } else {
        value
    };
    let mut exponent = leading.abs().log10().floor() as i32;
    let mut remaining = scale_by_power_of_ten(value, -exponent);

    // Two leading slots absorb carries; one trailing slot covers a leading
    // digit of zero when the exponent estimate is one too large.
    let mut digits = vec![0_i32; precision + 4];
    for digit in digits.iter_mut().skip(2) {
        let d = remaining.leading().floor();
        *digit = d as i32;
        remaining = (remaining - d) * 10.0;
    }
    for i in (1..digits.len()).rev() {
        let carry = digits[i].div_euclid(10);
        digits[i] = digits[i].rem_euclid(10);
        digits[i - 1] += carry;
    }
    let first = digits.iter().position(|&d| d != 0).unwrap_or(2);
    exponent -= first as i32 - 2;

    let digit = |i: usize| {
        let d = digits.get(i).copied().unwrap_or(0);
        char::from_digit(d.unsigned_abs(), 10).unwrap_or('0')
    };
    out.push(digit(first));
    out.push('.');
    out.extend((first + 1..=first + precision).map(digit));
    out.push_str(&format!("e{exponent:+03}"));
    out
}

fn write_scientific<T: MultiDouble>(f: &mut fmt::Formatter<'_>, value: T) -> fmt::Result {
    let precision = f.precision().unwrap_or(T::DEFAULT_PRECISION);
    let text = to_scientific(value, precision);
    match f.width() {
        Some(width) => write!(f, "{text:>width$}"),
        None => f.write_str(&text),
    }
}

macro_rules! impl_scientific_fmt {
    ($($t:ty),*) => {
        $(
            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write_scientific(f, *self)
                }
            }

            impl fmt::LowerExp for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write_scientific(f, *self)
                }
            }
        )*
    };
}

impl_scientific_fmt!(Quad, Oct);
