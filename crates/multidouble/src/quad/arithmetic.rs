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

//! Arithmetic operators for `Quad`.
//!
//! Mixed operations with `f64` take the cheaper three-term paths. Division by
//! an exact zero panics like integer division; `checked_div` reports it as a
//! `DomainError` instead.

use super::Quad;
use multidouble_core::{
    eft::{mul_pow2, quick_two_sum, two_prod, two_sum},
    error::DomainError,
};
use std::{
    iter::{Product, Sum},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

impl Quad {
    /// Adds two quads.
    ///
    /// Both pairs of terms are summed error-free and the errors are merged
    /// back with two renormalizing steps, giving a relative error of about
    /// `2^-106` even under cancellation.
    #[inline]
    pub(crate) fn add_quad(a: Self, b: Self) -> Self {
        let (s1, s2) = two_sum(a.high, b.high);
        if !s1.is_finite() {
            return Self::from_raw(s1, 0.0);
        }
        let (t1, t2) = two_sum(a.low, b.low);
        let (s1, s2) = quick_two_sum(s1, s2 + t1);
        let (high, low) = quick_two_sum(s1, s2 + t2);
        Self::from_raw(high, low)
    }

    #[inline]
    pub(crate) fn add_f64(a: Self, b: f64) -> Self {
        let (s1, s2) = two_sum(a.high, b);
        if !s1.is_finite() {
            return Self::from_raw(s1, 0.0);
        }
        let (high, low) = quick_two_sum(s1, s2 + a.low);
        Self::from_raw(high, low)
    }

    /// Multiplies two quads.
    ///
    /// The cross terms are ordinary products; their rounding errors are
    /// below the precision of the result and dropped.
    #[inline]
    pub(crate) fn mul_quad(a: Self, b: Self) -> Self {
        let (p, e) = two_prod(a.high, b.high);
        if !p.is_finite() {
            return Self::from_raw(p, 0.0);
        }
        let e = e + (a.high * b.low + a.low * b.high);
        let (high, low) = quick_two_sum(p, e);
        Self::from_raw(high, low)
    }

    #[inline]
    pub(crate) fn mul_f64(a: Self, b: f64) -> Self {
        let (p, e) = two_prod(a.high, b);
        if !p.is_finite() {
            return Self::from_raw(p, 0.0);
        }
        let (high, low) = quick_two_sum(p, e + a.low * b);
        Self::from_raw(high, low)
    }

    /// Divides two quads without checking for a zero divisor.
    ///
    /// Long division with three quotient terms: each step divides the
    /// current residual by the leading term of the divisor.
    pub(crate) fn quotient(a: Self, b: Self) -> Self {
        if !b.high.is_finite() {
            return Self::from(a.high / b.high);
        }
        let q1 = a.high / b.high;
        if !q1.is_finite() {
            return Self::from_raw(q1, 0.0);
        }
        let r = a - b * q1;
        let q2 = r.high / b.high;
        let r = r - b * q2;
        let q3 = r.high / b.high;
        let (q1, q2) = quick_two_sum(q1, q2);
        Self::from_raw(q1, q2) + q3
    }

    /// Divides by `rhs`, reporting division by an exact zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::{DomainError, Quad};
    /// let q = Quad::ONE.checked_div(Quad::from(4.0)).unwrap();
    /// assert_eq!(q, Quad::from(0.25));
    /// assert_eq!(Quad::ONE.checked_div(Quad::ZERO), Err(DomainError::DivisionByZero));
    /// ```
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Result<Self, DomainError> {
        if rhs.high == 0.0 {
            Err(DomainError::DivisionByZero)
        } else {
            Ok(Self::quotient(self, rhs))
        }
    }

    /// Returns `1 / self`, reporting division by an exact zero.
    #[inline]
    pub fn recip(self) -> Result<Self, DomainError> {
        Self::ONE.checked_div(self)
    }

    /// Returns `self * self`.
    #[inline]
    pub fn square(self) -> Self {
        Self::mul_quad(self, self)
    }

    /// Multiplies by `2^exp` exactly, unless the result overflows or the
    /// trailing term becomes subnormal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// let q = Quad::new(3.0, 1e-20).mul_pow2(-1);
    /// assert_eq!((q.high(), q.low()), (1.5, 5e-21));
    /// ```
    #[inline]
    pub fn mul_pow2(self, exp: i32) -> Self {
        Self::from_raw(mul_pow2(self.high, exp), mul_pow2(self.low, exp))
    }
}

impl Neg for Quad {
    type Output = Quad;

    #[inline]
    fn neg(self) -> Quad {
        Quad::from_raw(-self.high, -self.low)
    }
}

impl Add for Quad {
    type Output = Quad;

    #[inline]
    fn add(self, rhs: Quad) -> Quad {
        Quad::add_quad(self, rhs)
    }
}

impl Add<f64> for Quad {
    type Output = Quad;

    #[inline]
    fn add(self, rhs: f64) -> Quad {
        Quad::add_f64(self, rhs)
    }
}

impl Add<Quad> for f64 {
    type Output = Quad;

    #[inline]
    fn add(self, rhs: Quad) -> Quad {
        Quad::add_f64(rhs, self)
    }
}

impl Sub for Quad {
    type Output = Quad;

    #[inline]
    fn sub(self, rhs: Quad) -> Quad {
        Quad::add_quad(self, -rhs)
    }
}

impl Sub<f64> for Quad {
    type Output = Quad;

    #[inline]
    fn sub(self, rhs: f64) -> Quad {
        Quad::add_f64(self, -rhs)
    }
}

impl Sub<Quad> for f64 {
    type Output = Quad;

    #[inline]
    fn sub(self, rhs: Quad) -> Quad {
        Quad::add_f64(-rhs, self)
    }
}

impl Mul for Quad {
    type Output = Quad;

    #[inline]
    fn mul(self, rhs: Quad) -> Quad {
        Quad::mul_quad(self, rhs)
    }
}

impl Mul<f64> for Quad {
    type Output = Quad;

    #[inline]
    fn mul(self, rhs: f64) -> Quad {
        Quad::mul_f64(self, rhs)
    }
}

impl Mul<Quad> for f64 {
    type Output = Quad;

    #[inline]
    fn mul(self, rhs: Quad) -> Quad {
        Quad::mul_f64(rhs, self)
    }
}

impl Div for Quad {
    type Output = Quad;

    /// # Panics
    ///
    /// Panics if `rhs` is exactly zero. Use [`Quad::checked_div`] to handle
    /// this case without panicking.
    #[inline]
    fn div(self, rhs: Quad) -> Quad {
        assert!(rhs.high != 0.0, "attempt to divide a quad by zero");
        Quad::quotient(self, rhs)
    }
}

impl Div<f64> for Quad {
    type Output = Quad;

    /// # Panics
    ///
    /// Panics if `rhs` is exactly zero.
    #[inline]
    fn div(self, rhs: f64) -> Quad {
        self / Quad::from(rhs)
    }
}

impl Div<Quad> for f64 {
    type Output = Quad;

    /// # Panics
    ///
    /// Panics if `rhs` is exactly zero.
    #[inline]
    fn div(self, rhs: Quad) -> Quad {
        Quad::from(self) / rhs
    }
}

macro_rules! impl_assign_op {
    ($trait_name:ident, $method:ident, $op:tt, $rhs:ty) => {
        impl $trait_name<$rhs> for Quad {
            #[inline]
            fn $method(&mut self, rhs: $rhs) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, +, Quad);
impl_assign_op!(AddAssign, add_assign, +, f64);
impl_assign_op!(SubAssign, sub_assign, -, Quad);
impl_assign_op!(SubAssign, sub_assign, -, f64);
impl_assign_op!(MulAssign, mul_assign, *, Quad);
impl_assign_op!(MulAssign, mul_assign, *, f64);
impl_assign_op!(DivAssign, div_assign, /, Quad);
impl_assign_op!(DivAssign, div_assign, /, f64);

impl Sum for Quad {
    fn sum<I: Iterator<Item = Quad>>(iter: I) -> Quad {
        iter.fold(Quad::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Quad> for Quad {
    fn sum<I: Iterator<Item = &'a Quad>>(iter: I) -> Quad {
        iter.fold(Quad::ZERO, |acc, x| acc + *x)
    }
}

impl Product for Quad {
    fn product<I: Iterator<Item = Quad>>(iter: I) -> Quad {
        iter.fold(Quad::ONE, |acc, x| acc * x)
    }
}

impl<'a> Product<&'a Quad> for Quad {
    fn product<I: Iterator<Item = &'a Quad>>(iter: I) -> Quad {
        iter.fold(Quad::ONE, |acc, x| acc * *x)
    }
}
