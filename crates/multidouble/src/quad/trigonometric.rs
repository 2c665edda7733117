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

//! Circular functions and their inverses for `Quad`.
//!
//! Arguments of `sin` and `cos` are reduced modulo `pi / 2`. Below `2^60`
//! the reduction subtracts multiples of the oct value of `pi / 2`; larger
//! arguments are multiplied by the bits of `2 / pi` that still matter modulo
//! four (Payne-Hanek), so every finite argument ends up in `[-pi/4, pi/4]`.
//! The inverse functions refine the native `atan2` with one Newton step on
//! `sin` and `cos`.

use super::Quad;
use crate::{
    Oct,
    constants::{FRAC_3_PI_4, INV_FACTORIALS},
};
use multidouble_core::{
    eft::{binary_exponent, mul_pow2, two_prod},
    error::DomainError,
    expansion::Expansion,
    num::constants::MathConstants,
};

/// Number of Taylor terms in the sine and cosine series for `|r| <= pi / 4`.
const TRIG_SERIES_TERMS: usize = 15;

/// Upper bound on the reduction rounds. Every round shrinks the argument by
/// about `2^52`.
const REDUCTION_ROUNDS: usize = 3;

/// From this magnitude on arguments are reduced with the bits of `2 / pi`.
const LARGE_ARGUMENT: f64 = 1_152_921_504_606_846_976.0; // 2^60

/// Chunks of `2 / pi` multiplied into each term, starting with the first
/// chunk whose product is not a multiple of four. Twelve chunks leave an
/// absolute error below `2^-200` in the reduced argument.
const REDUCTION_CHUNKS: usize = 12;

/// Components of at least this magnitude are multiples of four.
const MULTIPLE_OF_FOUR: f64 = 18_014_398_509_481_984.0; // 2^54

/// Bits of `2 / pi` after the binary point in 24-bit chunks; chunk `i` has
/// the weight `2^(-24 (i + 1))`. Covers the exponent range of `f64`.
const TWO_OVER_PI: [u32; 66] = [
    0xA2F983, 0x6E4E44, 0x1529FC, 0x2757D1, 0xF534DD, 0xC0DB62, 0x95993C, 0x439041, 0xFE5163,
    0xABDEBB, 0xC561B7, 0x246E3A, 0x424DD2, 0xE00649, 0x2EEA09, 0xD1921C, 0xFE1DEB, 0x1CB129,
    0xA73EE8, 0x8235F5, 0x2EBB44, 0x84E99C, 0x7026B4, 0x5F7E41, 0x3991D6, 0x398353, 0x39F49C,
    0x845F8B, 0xBDF928, 0x3B1FF8, 0x97FFDE, 0x05980F, 0xEF2F11, 0x8B5A0A, 0x6D1F6D, 0x367ECF,
    0x27CB09, 0xB74F46, 0x3F669E, 0x5FEA2D, 0x7527BA, 0xC7EBE5, 0xF17B3D, 0x0739F7, 0x8A5292,
    0xEA6BFB, 0x5FB11F, 0x8D5D08, 0x560330, 0x46FC7B, 0x6BABF0, 0xCFBC20, 0x9AF436, 0x1DA9E3,
    0x91615E, 0xE61B08, 0x659985, 0x5F14A0, 0x68408D, 0xFFD880, 0x4D7327, 0x310606, 0x1556CA,
    0x73A8C9, 0x60E27B, 0xC08C6B,
];

/// Reduces `x` to `r` with `|r| <= pi / 4` and `x = r + quadrant pi / 2 (mod 2 pi)`.
fn reduce_half_pi(x: Quad) -> (Quad, u8) {
    if x.high.abs() >= LARGE_ARGUMENT {
        return reduce_half_pi_large(x);
    }
    let mut r = Oct::from(x);
    let mut quadrant = 0.0;
    for _ in 0..REDUCTION_ROUNDS {
        let k = (r.to_f64() / std::f64::consts::FRAC_PI_2).round();
        if k == 0.0 {
            break;
        }
        r = r - Oct::FRAC_PI_2 * k;
        quadrant += k.rem_euclid(4.0);
    }
    (r.to_quad(), quadrant.rem_euclid(4.0) as u8)
}

/// Payne-Hanek reduction: forms `x * 2 / pi` modulo four from the table of
/// `2 / pi` and splits it into the nearest integer and a remainder in about
/// `[-1/2, 1/2]`.
fn reduce_half_pi_large(x: Quad) -> (Quad, u8) {
    let mut product = Expansion::new();
    add_times_two_over_pi(&mut product, x.high);
    add_times_two_over_pi(&mut product, x.low);

    let small: Vec<f64> = product
        .components()
        .iter()
        .copied()
        .filter(|c| c.abs() < MULTIPLE_OF_FOUR)
        .collect();
    let mut fraction = Expansion::from_terms(&small);
    let nearest = fraction.estimate().round();
    fraction.grow(-nearest);

    let r = Oct::from_terms(fraction.components()) * Oct::FRAC_PI_2;
    (r.to_quad(), nearest.rem_euclid(4.0) as u8)
}

/// Adds `x * 2 / pi`, up to multiples of four, to `product`.
///
/// With `x = m 2^lsb` for an integer `|m| < 2^53`, chunk `i` contributes
/// `m c_i 2^(lsb - 24 (i + 1))`, which is a multiple of four as long as the
/// exponent is at least two. Every product `m c_i` is split exactly by
/// `two_prod`.
fn add_times_two_over_pi(product: &mut Expansion, x: f64) {
    let Some(exponent) = binary_exponent(x) else {
        return;
    };
    let lsb = exponent - 52;
    let mantissa = mul_pow2(x, -lsb);
    let first = if lsb <= 25 { 0 } else { ((lsb + 22) / 24 - 1) as usize };
    let last = (first + REDUCTION_CHUNKS).min(TWO_OVER_PI.len());
    for (i, &chunk) in TWO_OVER_PI.iter().enumerate().take(last).skip(first) {
        let weight = lsb - 24 * (i as i32 + 1);
        let (p, e) = two_prod(mantissa, f64::from(chunk));
        product.grow(mul_pow2(p, weight));
        product.grow(mul_pow2(e, weight));
    }
}

/// Evaluates the sine series for `|r| <= pi / 4`.
fn sin_series(r: Quad) -> Quad {
    let r2 = r.square();
    let mut sum = Quad::ZERO;
    for j in (0..TRIG_SERIES_TERMS).rev() {
        let c = INV_FACTORIALS[2 * j + 1];
        sum = sum * r2 + if j % 2 == 0 { c } else { -c };
    }
    sum * r
}

/// Evaluates the cosine series for `|r| <= pi / 4`.
fn cos_series(r: Quad) -> Quad {
    let r2 = r.square();
    let mut sum = Quad::ZERO;
    for j in (0..TRIG_SERIES_TERMS).rev() {
        let c = INV_FACTORIALS[2 * j];
        sum = sum * r2 + if j % 2 == 0 { c } else { -c };
    }
    sum
}

impl Quad {
    /// Returns `(sin(self), cos(self))`, sharing the argument reduction.
    ///
    /// Non-finite arguments give `NaN` for both.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::{MathConstants, Quad};
    /// let (s, c) = Quad::FRAC_PI_4.sin_cos();
    /// assert!((s - Quad::FRAC_1_SQRT_2).abs() < Quad::from(1e-31));
    /// assert!((c - Quad::FRAC_1_SQRT_2).abs() < Quad::from(1e-31));
    /// ```
    pub fn sin_cos(self) -> (Quad, Quad) {
        if !self.is_finite() {
            return (Quad::NAN, Quad::NAN);
        }
        if self.high == 0.0 {
            return (self, Quad::ONE);
        }
        let (r, quadrant) = reduce_half_pi(self);
        let (s, c) = (sin_series(r), cos_series(r));
        match quadrant {
            0 => (s, c),
            1 => (c, -s),
            2 => (-s, -c),
            _ => (-c, s),
        }
    }

    /// Returns the sine.
    pub fn sin(self) -> Quad {
        self.sin_cos().0
    }

    /// Returns the cosine.
    pub fn cos(self) -> Quad {
        self.sin_cos().1
    }

    /// Returns the tangent.
    pub fn tan(self) -> Quad {
        let (s, c) = self.sin_cos();
        Quad::quotient(s, c)
    }

    /// Returns the arcsine in `[-pi/2, pi/2]`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `|self| > 1`.
    pub fn asin(self) -> Result<Quad, DomainError> {
        if self.is_nan() {
            return Ok(Quad::NAN);
        }
        if self.abs() > Quad::ONE {
            return Err(DomainError::out_of_domain("asin", self.high));
        }
        let cos = ((Quad::ONE - self) * (Quad::ONE + self)).sqrt_non_negative();
        Ok(self.atan2(cos))
    }

    /// Returns the arccosine in `[0, pi]`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `|self| > 1`.
    pub fn acos(self) -> Result<Quad, DomainError> {
        if self.is_nan() {
            return Ok(Quad::NAN);
        }
        if self.abs() > Quad::ONE {
            return Err(DomainError::out_of_domain("acos", self.high));
        }
        let sin = ((Quad::ONE - self) * (Quad::ONE + self)).sqrt_non_negative();
        Ok(sin.atan2(self))
    }

    /// Returns the arctangent in `[-pi/2, pi/2]`.
    pub fn atan(self) -> Quad {
        if self.is_infinite() {
            return if self.high > 0.0 {
                Quad::FRAC_PI_2
            } else {
                -Quad::FRAC_PI_2
            };
        }
        self.atan2(Quad::ONE)
    }

    /// Returns the four quadrant arctangent of `self / x` in `[-pi, pi]`.
    ///
    /// Signed zeros and infinities follow the conventions of [`f64::atan2`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::{MathConstants, Quad};
    /// assert_eq!(Quad::ONE.atan2(Quad::ONE), Quad::FRAC_PI_4);
    /// assert_eq!(Quad::ZERO.atan2(-Quad::ONE), Quad::PI);
    /// ```
    pub fn atan2(self, x: Quad) -> Quad {
        let y = self;
        if y.is_nan() || x.is_nan() {
            return Quad::NAN;
        }
        let sign = |value: Quad| if y.is_sign_negative() { -value } else { value };
        if y.is_infinite() {
            return sign(if x.is_infinite() {
                if x.high > 0.0 { Quad::FRAC_PI_4 } else { FRAC_3_PI_4 }
            } else {
                Quad::FRAC_PI_2
            });
        }
        if x.is_infinite() {
            return if x.high > 0.0 { sign(Quad::ZERO) } else { sign(Quad::PI) };
        }
        if y.high == 0.0 {
            return if x.is_sign_positive() { y } else { sign(Quad::PI) };
        }
        if x.high == 0.0 {
            return sign(Quad::FRAC_PI_2);
        }
        if x == y {
            return if x.high > 0.0 { Quad::FRAC_PI_4 } else { -FRAC_3_PI_4 };
        }
        if x == -y {
            return if x.high > 0.0 { -Quad::FRAC_PI_4 } else { FRAC_3_PI_4 };
        }

        let largest = x.high.abs().max(y.high.abs());
        let scale = binary_exponent(largest).unwrap_or(0);
        let (x, y) = (x.mul_pow2(-scale), y.mul_pow2(-scale));
        let radius = (x.square() + y.square()).sqrt_non_negative();
        let (cos, sin) = (Quad::quotient(x, radius), Quad::quotient(y, radius));

        let z = Quad::from(y.high.atan2(x.high));
        let (sin_z, cos_z) = z.sin_cos();
        if cos.high.abs() > sin.high.abs() {
            z + Quad::quotient(sin - sin_z, cos_z)
        } else {
            z - Quad::quotient(cos - cos_z, sin_z)
        }
    }
}
