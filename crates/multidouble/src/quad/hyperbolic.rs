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

//! Hyperbolic functions and their inverses for `Quad`.

use super::{
    Quad,
    exp_log::{ln_1p_above_minus_one, ln_positive},
};
use multidouble_core::{error::DomainError, num::constants::MathConstants};

/// Beyond this magnitude `e^-|x|` is negligible against `e^|x|`.
const HYPERBOLIC_LARGE_THRESHOLD: f64 = 40.0;

/// Beyond this magnitude `x^2 + 1` rounds to `x^2` in quad precision and
/// the inverse functions use `ln(2|x|)`.
const INVERSE_LARGE_THRESHOLD: f64 = 1e150;

fn with_sign_of(value: Quad, sign: Quad) -> Quad {
    if sign.is_sign_negative() { -value } else { value }
}

impl Quad {
    /// Returns the hyperbolic sine.
    ///
    /// Uses `exp_m1` below one to avoid cancellation.
    pub fn sinh(self) -> Quad {
        if self.high == 0.0 || !self.is_finite() {
            return self;
        }
        let a = self.abs();
        let r = if a.high < 1.0 {
            let s = a.exp_m1();
            Quad::quotient(s * (s + 2.0), (s + 1.0).mul_pow2(1))
        } else if a.high <= HYPERBOLIC_LARGE_THRESHOLD {
            let e = a.exp();
            (e - Quad::quotient(Quad::ONE, e)).mul_pow2(-1)
        } else {
            (a - Quad::LN_2).exp()
        };
        with_sign_of(r, self)
    }

    /// Returns the hyperbolic cosine.
    pub fn cosh(self) -> Quad {
        if self.is_nan() {
            return Quad::NAN;
        }
        let a = self.abs();
        if a.high > HYPERBOLIC_LARGE_THRESHOLD {
            return (a - Quad::LN_2).exp();
        }
        let e = a.exp();
        (e + Quad::quotient(Quad::ONE, e)).mul_pow2(-1)
    }

    /// Returns the hyperbolic tangent.
    pub fn tanh(self) -> Quad {
        if self.high == 0.0 || self.is_nan() {
            return self;
        }
        let a = self.abs();
        if a.high > HYPERBOLIC_LARGE_THRESHOLD {
            return with_sign_of(Quad::ONE, self);
        }
        let s = a.mul_pow2(1).exp_m1();
        with_sign_of(Quad::quotient(s, s + 2.0), self)
    }

    /// Returns the inverse hyperbolic sine.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// let x = Quad::from(0.75);
    /// assert!((x.asinh().sinh() - x).abs() < Quad::from(1e-31));
    /// ```
    pub fn asinh(self) -> Quad {
        if self.high == 0.0 || !self.is_finite() {
            return self;
        }
        let a = self.abs();
        let r = if a.high > INVERSE_LARGE_THRESHOLD {
            ln_positive(a) + Quad::LN_2
        } else {
            let a2 = a.square();
            let hypot_minus_one = Quad::quotient(a2, (a2 + 1.0).sqrt_non_negative() + 1.0);
            ln_1p_above_minus_one(a + hypot_minus_one)
        };
        with_sign_of(r, self)
    }

    /// Returns the non-negative inverse hyperbolic cosine.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `self < 1`.
    pub fn acosh(self) -> Result<Quad, DomainError> {
        if self.is_nan() {
            return Ok(Quad::NAN);
        }
        if self < Quad::ONE {
            return Err(DomainError::out_of_domain("acosh", self.high));
        }
        if self.is_infinite() {
            return Ok(Quad::INFINITY);
        }
        if self.high > INVERSE_LARGE_THRESHOLD {
            return Ok(ln_positive(self) + Quad::LN_2);
        }
        let t = self - 1.0;
        let root = (t.mul_pow2(1) + t.square()).sqrt_non_negative();
        Ok(ln_1p_above_minus_one(t + root))
    }

    /// Returns the inverse hyperbolic tangent.
    ///
    /// `atanh(1)` and `atanh(-1)` are the infinities of matching sign.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `|self| > 1`.
    pub fn atanh(self) -> Result<Quad, DomainError> {
        if self.high == 0.0 || self.is_nan() {
            return Ok(self);
        }
        if self.abs() > Quad::ONE {
            return Err(DomainError::out_of_domain("atanh", self.high));
        }
        if self.abs() == Quad::ONE {
            return Ok(with_sign_of(Quad::INFINITY, self));
        }
        let ratio = Quad::quotient(self.mul_pow2(1), Quad::ONE - self);
        Ok(ln_1p_above_minus_one(ratio).mul_pow2(-1))
    }
}
