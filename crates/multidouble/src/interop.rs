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

//! Implementations of the `num-traits` and `multidouble-core` numeric traits
//! for `Quad` and `Oct`.

use crate::{Oct, Quad};
use multidouble_core::{
    error::DomainError,
    num::ops::checked_arithmetic::{CheckedDivVal, CheckedLnVal, CheckedPowiVal, CheckedSqrtVal},
};
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};

/// Sums integer-valued terms exactly; saturates far outside the `i128` range.
fn integral_terms_to_i128(terms: &[f64]) -> i128 {
    terms.iter().fold(0_i128, |acc, &t| acc.saturating_add(t as i128))
}

macro_rules! impl_num_traits {
    ($t:ident, $leading:expr, $terms:expr) => {
        impl Zero for $t {
            #[inline]
            fn zero() -> Self {
                $t::ZERO
            }

            #[inline]
            fn is_zero(&self) -> bool {
                $leading(*self) == 0.0
            }
        }

        impl One for $t {
            #[inline]
            fn one() -> Self {
                $t::ONE
            }
        }

        impl FromPrimitive for $t {
            #[inline]
            fn from_i64(n: i64) -> Option<Self> {
                Some($t::from(n))
            }

            #[inline]
            fn from_u64(n: u64) -> Option<Self> {
                Some($t::from(n))
            }

            #[inline]
            fn from_f64(n: f64) -> Option<Self> {
                Some($t::from(n))
            }
        }

        impl ToPrimitive for $t {
            /// Truncates toward zero; `None` for non-finite or out of range values.
            fn to_i64(&self) -> Option<i64> {
                if !self.is_finite() {
                    return None;
                }
                i64::try_from(integral_terms_to_i128(&$terms(self.trunc()))).ok()
            }

            /// Truncates toward zero; `None` for non-finite or out of range values.
            fn to_u64(&self) -> Option<u64> {
                if !self.is_finite() {
                    return None;
                }
                u64::try_from(integral_terms_to_i128(&$terms(self.trunc()))).ok()
            }

            #[inline]
            fn to_f64(&self) -> Option<f64> {
                Some($leading(*self))
            }
        }

        impl CheckedDivVal for $t {
            #[inline]
            fn checked_div_val(self, v: Self) -> Result<Self, DomainError> {
                self.checked_div(v)
            }
        }

        impl CheckedSqrtVal for $t {
            #[inline]
            fn checked_sqrt_val(self) -> Result<Self, DomainError> {
                self.sqrt()
            }
        }

        impl CheckedPowiVal for $t {
            #[inline]
            fn checked_powi_val(self, n: i32) -> Result<Self, DomainError> {
                self.powi(n)
            }
        }
    };
}

impl_num_traits!(Quad, Quad::high, |q: Quad| [q.high(), q.low()]);
impl_num_traits!(Oct, Oct::to_f64, Oct::terms);

impl CheckedLnVal for Quad {
    #[inline]
    fn checked_ln_val(self) -> Result<Self, DomainError> {
        self.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_integer<T: ToPrimitive>(value: T) -> Option<i64> {
        value.to_i64()
    }

    #[test]
    fn test_to_i64_is_exact() {
        let below = Quad::new(2f64.powi(60), -1.0);
        assert_eq!(to_integer(below), Some((1_i64 << 60) - 1));
        assert_eq!(to_integer(Quad::new(2f64.powi(60), -0.5)), Some((1_i64 << 60) - 1));
        assert_eq!(to_integer(Quad::from(-2.75)), Some(-2));
        assert_eq!(to_integer(Quad::from(i64::MIN)), Some(i64::MIN));
        assert_eq!(to_integer(Quad::from(i64::MAX)), Some(i64::MAX));
        assert_eq!(to_integer(Quad::from(2f64.powi(63))), None);
        assert_eq!(to_integer(Quad::NAN), None);
        assert_eq!(to_integer(Quad::INFINITY), None);
        assert_eq!(to_integer(Oct::from(i64::MAX)), Some(i64::MAX));
        assert_eq!(
            to_integer(Oct::new([2f64.powi(62), 1.0, -2f64.powi(-60), 0.0])),
            Some(1_i64 << 62)
        );
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(Quad::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(Quad::from(-1.0).to_u64(), None);
        assert_eq!(Oct::from(42.9).to_u64(), Some(42));
        assert_eq!(ToPrimitive::to_f64(&Oct::from(2.5)), Some(2.5));
    }

    #[test]
    fn test_from_primitive() {
        assert_eq!(Quad::from_i64(-5), Some(Quad::from(-5.0)));
        assert_eq!(Oct::from_u64(u64::MAX), Some(Oct::from(u64::MAX)));
        assert_eq!(Quad::from_f64(0.5), Some(Quad::from(0.5)));
        assert_eq!(Oct::from_i32(7), Some(Oct::from(7.0)));
    }

    #[test]
    fn test_zero_and_one() {
        assert!(Quad::zero().is_zero());
        assert!(Quad::from(-0.0).is_zero());
        assert!(!Oct::EPSILON.is_zero());
        assert_eq!(Oct::one(), Oct::ONE);
        assert_eq!(Quad::one() + Quad::one(), Quad::from(2.0));
    }

    #[test]
    fn test_checked_ln() {
        assert_eq!(Quad::ONE.checked_ln_val(), Ok(Quad::ZERO));
        assert_eq!(
            Quad::from(-1.0).checked_ln_val(),
            Err(DomainError::out_of_domain("ln", -1.0))
        );
    }
}
