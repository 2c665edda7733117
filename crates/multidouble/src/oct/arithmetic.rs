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

//! Arithmetic operators for `Oct`.
//!
//! Every operation collects its partial results as an unevaluated sum of
//! doubles and renormalizes them once. Addition is therefore correctly
//! rounded to the canonical split of the exact sum.

use super::Oct;
use multidouble_core::{
    eft::{mul_pow2, two_prod},
    error::DomainError,
    expansion::renormalize,
};
use std::{
    iter::{Product, Sum},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Number of long division steps in [`Oct::quotient`].
const DIVISION_STEPS: usize = 4;

impl Oct {
    #[inline]
    pub(crate) fn add_oct(a: Self, b: Self) -> Self {
        let [a0, a1, a2, a3] = a.terms;
        let [b0, b1, b2, b3] = b.terms;
        Self::from_raw(renormalize(&[a0, a1, a2, a3, b0, b1, b2, b3]))
    }

    #[inline]
    pub(crate) fn add_f64(a: Self, b: f64) -> Self {
        let [a0, a1, a2, a3] = a.terms;
        Self::from_raw(renormalize(&[a0, a1, a2, a3, b]))
    }

    /// Multiplies two octs.
    ///
    /// Products of order up to two are formed exactly with `two_prod`; the
    /// third order products and the errors of the second order products are
    /// accumulated in plain arithmetic since they only affect the last term.
    pub(crate) fn mul_oct(a: Self, b: Self) -> Self {
        let [a0, a1, a2, a3] = a.terms;
        let [b0, b1, b2, b3] = b.terms;
        let (p00, e00) = two_prod(a0, b0);
        if !p00.is_finite() {
            return Self::from(p00);
        }
        let (p01, e01) = two_prod(a0, b1);
        let (p10, e10) = two_prod(a1, b0);
        let (p02, e02) = two_prod(a0, b2);
        let (p11, e11) = two_prod(a1, b1);
        let (p20, e20) = two_prod(a2, b0);
        let third_order = ((e02 + e20) + e11) + ((a0 * b3 + a3 * b0) + (a1 * b2 + a2 * b1));
        Self::from_raw(renormalize(&[
            p00,
            e00,
            p01,
            e01,
            p10,
            e10,
            p02,
            p11,
            p20,
            third_order,
        ]))
    }

    #[inline]
    pub(crate) fn mul_f64(a: Self, b: f64) -> Self {
        let [a0, a1, a2, a3] = a.terms;
        let (p0, e0) = two_prod(a0, b);
        if !p0.is_finite() {
            return Self::from(p0);
        }
        let (p1, e1) = two_prod(a1, b);
        let (p2, e2) = two_prod(a2, b);
        let (p3, e3) = two_prod(a3, b);
        Self::from_raw(renormalize(&[p0, e0, p1, e1, p2, e2, p3, e3]))
    }

    /// Divides two octs without checking for a zero divisor.
    ///
    /// Long division: every step divides the leading term of the residual by
    /// the leading term of the divisor and subtracts the exact multiple.
    pub(crate) fn quotient(a: Self, b: Self) -> Self {
        let divisor = b.terms[0];
        if !divisor.is_finite() {
            return Self::from(a.terms[0] / divisor);
        }
        let mut quotients = [0.0; DIVISION_STEPS + 1];
        let mut residual = a;
        for q in quotients.iter_mut().take(DIVISION_STEPS) {
            *q = residual.terms[0] / divisor;
            if !q.is_finite() {
                return Self::from(*q);
            }
            residual = residual - Self::mul_f64(b, *q);
        }
        quotients[DIVISION_STEPS] = residual.terms[0] / divisor;
        Self::from_raw(renormalize(&quotients))
    }

    /// Divides by `rhs`, reporting division by an exact zero.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Result<Self, DomainError> {
        if rhs.terms[0] == 0.0 {
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
        Self::mul_oct(self, self)
    }

    /// Multiplies by `2^exp` exactly, unless the result overflows or a
    /// trailing term becomes subnormal.
    #[inline]
    pub fn mul_pow2(self, exp: i32) -> Self {
        Self::from_raw(self.terms.map(|t| mul_pow2(t, exp)))
    }
}

impl Neg for Oct {
    type Output = Oct;

    #[inline]
    fn neg(self) -> Oct {
        Oct::from_raw(self.terms.map(|t| -t))
    }
}

macro_rules! impl_binary_op {
    ($trait_name:ident, $method:ident, $oct_fn:expr, $f64_fn:expr) => {
        impl $trait_name for Oct {
            type Output = Oct;

            #[inline]
            fn $method(self, rhs: Oct) -> Oct {
                $oct_fn(self, rhs)
            }
        }

        impl $trait_name<f64> for Oct {
            type Output = Oct;

            #[inline]
            fn $method(self, rhs: f64) -> Oct {
                $f64_fn(self, rhs)
            }
        }

        impl $trait_name<Oct> for f64 {
            type Output = Oct;

            #[inline]
            fn $method(self, rhs: Oct) -> Oct {
                $oct_fn(Oct::from(self), rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, Oct::add_oct, Oct::add_f64);
impl_binary_op!(
    Sub,
    sub,
    |a: Oct, b: Oct| Oct::add_oct(a, -b),
    |a: Oct, b: f64| Oct::add_f64(a, -b)
);
impl_binary_op!(Mul, mul, Oct::mul_oct, Oct::mul_f64);
impl_binary_op!(
    Div,
    div,
    |a: Oct, b: Oct| {
        assert!(b.terms[0] != 0.0, "attempt to divide an oct by zero");
        Oct::quotient(a, b)
    },
    |a: Oct, b: f64| {
        assert!(b != 0.0, "attempt to divide an oct by zero");
        Oct::quotient(a, Oct::from(b))
    }
);

macro_rules! impl_assign_op {
    ($trait_name:ident, $method:ident, $op:tt, $rhs:ty) => {
        impl $trait_name<$rhs> for Oct {
            #[inline]
            fn $method(&mut self, rhs: $rhs) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, +, Oct);
impl_assign_op!(AddAssign, add_assign, +, f64);
impl_assign_op!(SubAssign, sub_assign, -, Oct);
impl_assign_op!(SubAssign, sub_assign, -, f64);
impl_assign_op!(MulAssign, mul_assign, *, Oct);
impl_assign_op!(MulAssign, mul_assign, *, f64);
impl_assign_op!(DivAssign, div_assign, /, Oct);
impl_assign_op!(DivAssign, div_assign, /, f64);

impl Sum for Oct {
    fn sum<I: Iterator<Item = Oct>>(iter: I) -> Oct {
        iter.fold(Oct::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Oct> for Oct {
    fn sum<I: Iterator<Item = &'a Oct>>(iter: I) -> Oct {
        iter.fold(Oct::ZERO, |acc, x| acc + *x)
    }
}

impl Product for Oct {
    fn product<I: Iterator<Item = Oct>>(iter: I) -> Oct {
        iter.fold(Oct::ONE, |acc, x| acc * x)
    }
}

impl<'a> Product<&'a Oct> for Oct {
    fn product<I: Iterator<Item = &'a Oct>>(iter: I) -> Oct {
        iter.fold(Oct::ONE, |acc, x| acc * *x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_oct_close, random_oct};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const OCT_ADD_CASES: &[(Oct, Oct, Oct)] = &[
        (Oct::from_raw([3.141592653589793, 1.2246467991473532e-16, -2.9947698097183397e-33, 1.1124542208633653e-49]), Oct::from_raw([2.718281828459045, 1.4456468917292502e-16, -2.1277171080381768e-33, 1.5156301598412191e-49]), Oct::from_raw([5.859874482048839, -1.7705984076240228e-16, -5.1224869177565164e-33, 2.6280843807045844e-49])),
        (Oct::from_raw([1.4142135623730951, -9.667293313452913e-17, 4.1386753086994136e-33, 4.935546991468351e-50]), Oct::from_raw([-0.3333333333333333, -1.850371707708594e-17, -1.0271626370065257e-33, -5.701898048196684e-50]), Oct::from_raw([1.0808802290397617, 5.135680348215841e-17, 3.002476067331046e-35, -2.317981147098937e-51])),
        (Oct::from_raw([1.4285714285714286e99, 1.1972100061516707e82, 7.754326023972324e65, 1.2666371720429791e49]), Oct::from_raw([-3.333333333333333e-51, -1.7243691568405466e-67, -9.105415798639084e-84, 5.906403715526519e-100]), Oct::from_raw([1.4285714285714286e99, 1.1972100061516707e82, 7.754326023972324e65, 1.2666371720429791e49])),
    ];
    const OCT_MUL_CASES: &[(Oct, Oct, Oct)] = &[
        (Oct::from_raw([3.141592653589793, 1.2246467991473532e-16, -2.9947698097183397e-33, 1.1124542208633653e-49]), Oct::from_raw([2.718281828459045, 1.4456468917292502e-16, -2.1277171080381768e-33, 1.5156301598412191e-49]), Oct::from_raw([8.539734222673568, -6.773815290502424e-16, 1.6082340642907152e-32, -1.1166810263562522e-48])),
        (Oct::from_raw([1.4142135623730951, -9.667293313452913e-17, 4.1386753086994136e-33, 4.935546991468351e-50]), Oct::from_raw([-0.3333333333333333, -1.850371707708594e-17, -1.0271626370065257e-33, -5.701898048196684e-50]), Oct::from_raw([-0.4714045207910317, -4.783123109328841e-18, 1.611855192766508e-34, 4.9302943758430665e-51])),
        (Oct::from_raw([1.4285714285714286e99, 1.1972100061516707e82, 7.754326023972324e65, 1.2666371720429791e49]), Oct::from_raw([-3.333333333333333e-51, -1.7243691568405466e-67, -9.105415798639084e-84, 5.906403715526519e-100]), Oct::from_raw([-4.761904761904762e48, -2.2390167609182517e32, -1340357031955504.8, -0.011904761904761878])),
    ];
    const OCT_DIV_CASES: &[(Oct, Oct, Oct)] = &[
        (Oct::from_raw([3.141592653589793, 1.2246467991473532e-16, -2.9947698097183397e-33, 1.1124542208633653e-49]), Oct::from_raw([2.718281828459045, 1.4456468917292502e-16, -2.1277171080381768e-33, 1.5156301598412191e-49]), Oct::from_raw([1.1557273497909217, -1.3998972600526045e-17, 2.1870490326442286e-34, 2.127225335962418e-50])),
        (Oct::from_raw([1.4142135623730951, -9.667293313452913e-17, 4.1386753086994136e-33, 4.935546991468351e-50]), Oct::from_raw([-0.3333333333333333, -1.850371707708594e-17, -1.0271626370065257e-33, -5.701898048196684e-50]), Oct::from_raw([-4.242640687119285, -3.7611501537150655e-16, 1.2235877362058378e-32, 5.361613560395515e-49])),
        (Oct::from_raw([1.4285714285714286e99, 1.1972100061516707e82, 7.754326023972324e65, 1.2666371720429791e49]), Oct::from_raw([-3.333333333333333e-51, -1.7243691568405466e-67, -9.105415798639084e-84, 5.906403715526519e-100]), Oct::from_raw([-4.285714285714286e149, 3.07244728754521e133, 9.771432498239183e116, -9.496873338494698e99])),
    ];

    #[test]
    fn test_add_is_correctly_rounded() {
        for &(x, y, expected) in OCT_ADD_CASES {
            assert_eq!(x + y, expected);
            assert_eq!(y + x, expected);
        }
    }

    #[test]
    fn test_mul_reference_values() {
        for &(x, y, expected) in OCT_MUL_CASES {
            assert_oct_close(x * y, expected, -208);
        }
    }

    #[test]
    fn test_div_reference_values() {
        for &(x, y, expected) in OCT_DIV_CASES {
            assert_oct_close(x / y, expected, -208);
        }
    }

    #[test]
    fn test_commutativity_is_bit_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        for _ in 0..1000 {
            let a = random_oct(&mut rng, -40..40);
            let b = random_oct(&mut rng, -40..40);
            assert_eq!(a + b, b + a);
            assert_eq!(a * b, b * a);
        }
    }

    #[test]
    fn test_results_are_canonical() {
        let mut rng = ChaCha8Rng::seed_from_u64(37);
        for _ in 0..1000 {
            let a = random_oct(&mut rng, -40..40);
            let b = random_oct(&mut rng, -40..40);
            for value in [a + b, a - b, a * b, a / b, a * 3.5, a + 0.1] {
                assert!(Oct::try_new(value.terms()).is_some(), "{value:?}");
            }
        }
    }

    #[test]
    fn test_div_inverts_mul() {
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        for _ in 0..500 {
            let a = random_oct(&mut rng, -40..40);
            let b = random_oct(&mut rng, -40..40);
            assert_oct_close((a * b) / b, a, -206);
        }
    }

    #[test]
    fn test_cancellation_keeps_trailing_terms() {
        let a = Oct::new([1.0, 1e-20, 1e-40, 1e-60]);
        let b = Oct::new([1.0, 1e-20, 0.0, 0.0]);
        assert_eq!(a - b, Oct::new([1e-40, 1e-60, 0.0, 0.0]));
        assert_eq!(a - a, Oct::ZERO);
    }

    #[test]
    fn test_mixed_operands() {
        let third = Oct::ONE / 3.0;
        assert_eq!(1.0 / Oct::from(3.0), third);
        assert_eq!(third + 1.0, 1.0 + third);
        assert_oct_close(3.0 * third, third * 3.0, -210);
        assert_eq!(2.0 - third, Oct::from(2.0) - third);
        let mut x = third;
        x *= 6.0;
        x -= 1.0;
        assert_oct_close(x, Oct::ONE, -210);
    }

    #[test]
    fn test_checked_div_and_non_finite_values() {
        assert_eq!(Oct::ONE.checked_div(Oct::ZERO), Err(DomainError::DivisionByZero));
        assert_eq!(Oct::ZERO.recip(), Err(DomainError::DivisionByZero));
        assert_eq!(Oct::from(4.0).recip(), Ok(Oct::from(0.25)));
        assert_eq!(Oct::ONE / Oct::INFINITY, Oct::ZERO);
        assert_eq!(Oct::INFINITY * 2.0, Oct::INFINITY);
        assert_eq!(Oct::from(f64::MAX) * Oct::from(2.0), Oct::INFINITY);
        assert!((Oct::INFINITY - Oct::INFINITY).is_nan());
        assert_eq!(Oct::from(3.0).mul_pow2(-1), Oct::from(1.5));
    }

    #[test]
    #[should_panic(expected = "attempt to divide an oct by zero")]
    fn test_div_by_zero_panics() {
        let _ = Oct::ONE / 0.0;
    }

    #[test]
    fn test_sum_and_product() {
        let values = [Oct::from(0.1), Oct::from(0.2), Oct::from(0.3)];
        let sum: Oct = values.iter().sum();
        assert_eq!(sum, Oct::from_terms(&[0.1, 0.2, 0.3]));
        let product: Oct = values.into_iter().product();
        assert_oct_close(product, Oct::from(0.1) * Oct::from(0.2) * Oct::from(0.3), -210);
    }
}
