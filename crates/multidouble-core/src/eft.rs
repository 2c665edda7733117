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

//! # Error-Free Transforms
//!
//! Primitive operations on two native `f64` values that return the rounded
//! result of a sum or product together with its exact rounding error.
//!
//! Every operation in this module satisfies `a op b == result + error`
//! exactly (in real arithmetic) as long as no overflow occurs. All higher
//! level multi-double arithmetic is expressed in terms of these primitives.
//!
//! ## Functions
//!
//! - `quick_two_sum`: Fast sum requiring `|a| >= |b|`.
//! - `two_sum`: Branch-free sum without precondition.
//! - `split`: Dekker split of a double into two 26-bit halves.
//! - `two_prod`: Exact product, using a fused multiply-add when the target
//!   supports it and the splitting fallback otherwise.
//! - `mul_pow2`: Exact scaling by a power of two (`ldexp`).

/// Splitting factor `2^27 + 1` used by Dekker's algorithm.
const SPLITTER: f64 = 134_217_729.0;

/// Inputs above this magnitude are pre-scaled in `split` to avoid overflow.
const SPLIT_THRESHOLD: f64 = 6.696_928_794_914_171e299; // 2^996

/// Computes the sum of two values with its exact rounding error, assuming
/// `|a| >= |b|` (or `a == 0`).
///
/// Returns `(s, e)` with `s = fl(a + b)` and `a + b = s + e`.
/// The result is unspecified when the precondition is violated.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::eft::quick_two_sum;
/// let (s, e) = quick_two_sum(1.0, 1e-20);
/// assert_eq!(s, 1.0);
/// assert_eq!(e, 1e-20);
/// ```
#[inline(always)]
pub fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let e = b - (s - a);
    (s, e)
}

/// Computes the sum of two values with its exact rounding error.
///
/// Returns `(s, e)` with `s = fl(a + b)` and `a + b = s + e` for any finite
/// inputs whose sum does not overflow.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::eft::two_sum;
/// let (s, e) = two_sum(1e-20, 1.0);
/// assert_eq!(s, 1.0);
/// assert_eq!(e, 1e-20);
/// ```
#[inline(always)]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let v = s - a;
    let e = (a - (s - v)) + (b - v);
    (s, e)
}

/// Splits `a` into `(hi, lo)` with `a = hi + lo` where both halves carry at
/// most 26 significant bits.
#[inline]
pub fn split(a: f64) -> (f64, f64) {
    if a.abs() > SPLIT_THRESHOLD {
        let scaled = a * 3.725_290_298_461_914e-9; // 2^-28
        let t = SPLITTER * scaled;
        let hi = t - (t - scaled);
        let lo = scaled - hi;
        (hi * 268_435_456.0, lo * 268_435_456.0)
    } else {
        let t = SPLITTER * a;
        let hi = t - (t - a);
        let lo = a - hi;
        (hi, lo)
    }
}

/// Computes the product of two values with its exact rounding error using
/// Dekker's splitting algorithm.
///
/// This never uses a fused multiply-add and therefore gives identical
/// results on every target.
#[inline]
pub fn two_prod_no_fma(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let (ah, al) = split(a);
    let (bh, bl) = split(b);
    let e = ((ah * bh - p) + ah * bl + al * bh) + al * bl;
    (p, e)
}

/// Computes the product of two values with its exact rounding error using
/// a fused multiply-add.
///
/// Only fast when the target has hardware FMA; otherwise `mul_add` falls
/// back to a slow software routine.
#[inline(always)]
pub fn two_prod_fma(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let e = a.mul_add(b, -p);
    (p, e)
}

/// Computes the product of two values with its exact rounding error.
///
/// Returns `(p, e)` with `p = fl(a * b)` and `a * b = p + e` unless the
/// product overflows or the error underflows.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::eft::two_prod;
/// let a = 1.0 + f64::EPSILON;
/// let (p, e) = two_prod(a, a);
/// assert_eq!(p, 1.0 + 2.0 * f64::EPSILON);
/// assert_eq!(e, f64::EPSILON * f64::EPSILON);
/// ```
#[inline(always)]
pub fn two_prod(a: f64, b: f64) -> (f64, f64) {
    #[cfg(target_feature = "fma")]
    {
        two_prod_fma(a, b)
    }
    #[cfg(not(target_feature = "fma"))]
    {
        two_prod_no_fma(a, b)
    }
}

/// Multiplies `x` by `2^exp` exactly, unless the result overflows or
/// becomes subnormal.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::eft::mul_pow2;
/// assert_eq!(mul_pow2(3.0, 4), 48.0);
/// assert_eq!(mul_pow2(3.0, -1), 1.5);
/// assert_eq!(mul_pow2(1.0, 1024), f64::INFINITY);
/// ```
pub fn mul_pow2(x: f64, exp: i32) -> f64 {
    const MAX_STEP: i32 = 1023;
    const MIN_STEP: i32 = -1022;

    let mut value = x;
    let mut remaining = exp;
    while remaining > MAX_STEP {
        value *= pow2_unchecked(MAX_STEP);
        remaining -= MAX_STEP;
        if !value.is_finite() {
            return value;
        }
    }
    while remaining < MIN_STEP {
        value *= pow2_unchecked(MIN_STEP);
        remaining -= MIN_STEP;
        if value == 0.0 {
            return value;
        }
    }
    value * pow2_unchecked(remaining)
}

/// Returns `2^exp` for a normal exponent `-1022 <= exp <= 1023`.
#[inline(always)]
fn pow2_unchecked(exp: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exp));
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// Returns the binary exponent `e` of a finite nonzero `x`, such that
/// `2^e <= |x| < 2^(e+1)`.
///
/// Returns `None` for zero, infinities and NaN.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::eft::binary_exponent;
/// assert_eq!(binary_exponent(1.0), Some(0));
/// assert_eq!(binary_exponent(-12.0), Some(3));
/// assert_eq!(binary_exponent(0.0), None);
/// ```
pub fn binary_exponent(x: f64) -> Option<i32> {
    if x == 0.0 || !x.is_finite() {
        return None;
    }
    let biased = ((x.to_bits() >> 52) & 0x7ff) as i32;
    if biased == 0 {
        // Subnormal: the leading bit sits inside the mantissa.
        let mantissa = x.to_bits() & 0x000f_ffff_ffff_ffff;
        Some(-1022 - (mantissa.leading_zeros() as i32 - 12) - 1)
    } else {
        Some(biased - 1023)
    }
}
