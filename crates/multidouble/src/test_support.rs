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

//! Shared helpers for unit tests.

use crate::{Oct, Quad};
use rand::Rng;
use std::ops::Range;

/// Asserts `|actual - expected| <= 2^log2_tolerance * |expected|`.
#[track_caller]
pub(crate) fn assert_quad_close(actual: Quad, expected: Quad, log2_tolerance: i32) {
    assert!(!actual.is_nan(), "actual is NaN, expected {expected:?}");
    let error = (actual - expected).abs();
    let bound = expected.abs().mul_pow2(log2_tolerance);
    assert!(
        error <= bound,
        "actual {actual:?} differs from expected {expected:?} by {:e} (bound {:e})",
        error.high(),
        bound.high()
    );
}

/// Asserts `|actual - expected| <= 2^log2_tolerance * |expected|`.
#[track_caller]
pub(crate) fn assert_oct_close(actual: Oct, expected: Oct, log2_tolerance: i32) {
    assert!(!actual.is_nan(), "actual is NaN, expected {expected:?}");
    let error = (actual - expected).abs();
    let bound = expected.abs().mul_pow2(log2_tolerance);
    assert!(
        error <= bound,
        "actual {actual:?} differs from expected {expected:?} by {:e} (bound {:e})",
        error.to_f64(),
        bound.to_f64()
    );
}

/// Draws a normalized quad with a random sign, a full-precision trailing
/// term and a binary exponent in `exponents`.
pub(crate) fn random_quad<R: Rng>(rng: &mut R, exponents: Range<i32>) -> Quad {
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let high = sign * rng.random_range(1.0..2.0) * 2.0_f64.powi(rng.random_range(exponents));
    let low = high * rng.random_range(-1.0..1.0) * f64::EPSILON;
    Quad::from_sum(high, low)
}

/// Draws a normalized oct with a random sign and full-precision trailing
/// terms.
pub(crate) fn random_oct<R: Rng>(rng: &mut R, exponents: Range<i32>) -> Oct {
    let high = random_quad(rng, exponents);
    let scale = high.high() * f64::EPSILON * f64::EPSILON;
    let tail = Quad::from_sum(
        scale * rng.random_range(-1.0..1.0),
        scale * f64::EPSILON * rng.random_range(-1.0..1.0),
    );
    Oct::from_terms(&[high.high(), high.low(), tail.high(), tail.low()])
}
