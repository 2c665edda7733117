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

//! # Multi-Double Numeric Trait
//!
//! `MultiDouble` collects the capabilities shared by `Quad` and `Oct` into a
//! single bound, so that generic code (the decimal formatter, the command line
//! evaluator, benchmarks) can be written once for both precisions.
//!
//! ## Highlights
//!
//! - Operators with `Self` and `f64` operands, including the assign forms.
//! - `MathConstants`, `num_traits::Zero` and `num_traits::One`.
//! - By-value checked division, square root and integer power from
//!   `multidouble_core`, reporting `DomainError`s.
//! - Access to the canonical terms and renormalizing construction.
//! - `Send + Sync`: values are plain immutable data.

use crate::{Oct, Quad};
use multidouble_core::num::{
    constants::MathConstants,
    ops::checked_arithmetic::{CheckedDivVal, CheckedPowiVal, CheckedSqrtVal},
};
use num_traits::{One, Zero};
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::{Product, Sum},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A multi-term extended-precision floating-point type.
pub trait MultiDouble:
    Copy
    + Debug
    + Display
    + LowerExp
    + Default
    + PartialOrd
    + From<f64>
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
    + Product
    + MathConstants
    + Zero
    + One
    + CheckedDivVal
    + CheckedSqrtVal
    + CheckedPowiVal
    + Send
    + Sync
{
    /// Number of stored terms.
    const TERMS: usize;
    /// Digits after the decimal point printed by `Display` without a precision.
    const DEFAULT_PRECISION: usize;
    /// Largest meaningful number of digits after the decimal point.
    const MAX_PRECISION: usize;

    /// Returns the leading term, the nearest double to the value.
    fn leading(self) -> f64;

    /// Returns the term at `index`, zero beyond `TERMS`.
    fn term(self, index: usize) -> f64;

    /// Creates the value nearest to the exact sum of arbitrary doubles.
    fn from_terms(terms: &[f64]) -> Self;

    /// Returns the absolute value.
    fn abs(self) -> Self;
}

impl MultiDouble for Quad {
    const TERMS: usize = 2;
    const DEFAULT_PRECISION: usize = 30;
    const MAX_PRECISION: usize = 35;

    #[inline]
    fn leading(self) -> f64 {
        self.high()
    }

    #[inline]
    fn term(self, index: usize) -> f64 {
        Quad::term(self, index)
    }

    #[inline]
    fn from_terms(terms: &[f64]) -> Self {
        Quad::from_terms(terms)
    }

    #[inline]
    fn abs(self) -> Self {
        Quad::abs(self)
    }
}

impl MultiDouble for Oct {
    const TERMS: usize = 4;
    const DEFAULT_PRECISION: usize = 60;
    const MAX_PRECISION: usize = 64;

    #[inline]
    fn leading(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn term(self, index: usize) -> f64 {
        Oct::term(self, index)
    }

    #[inline]
    fn from_terms(terms: &[f64]) -> Self {
        Oct::from_terms(terms)
    }

    #[inline]
    fn abs(self) -> Self {
        Oct::abs(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multidouble_core::error::DomainError;

    fn harmonic<T: MultiDouble>(n: u32) -> T {
        (1..=n).map(|k| T::one() / T::from(f64::from(k))).sum()
    }

    fn terms<T: MultiDouble>(value: T) -> Vec<f64> {
        (0..T::TERMS).map(|i| value.term(i)).collect()
    }

    #[test]
    fn test_generic_code_runs_at_both_precisions() {
        let quad: Quad = harmonic(10);
        let oct: Oct = harmonic(10);
        // H_10 = 7381 / 2520
        assert!((quad - Quad::from(7381.0) / 2520.0).abs() < Quad::EPSILON * 32.0);
        assert!((oct - Oct::from(7381.0) / 2520.0).abs() < Oct::EPSILON * 32.0);
    }

    #[test]
    fn test_terms_round_trip() {
        let oct = Oct::PI;
        assert_eq!(terms(oct), oct.terms().to_vec());
        assert_eq!(<Oct as MultiDouble>::from_terms(&terms(oct)), oct);
        assert_eq!(<Quad as MultiDouble>::from_terms(&terms(oct)), Quad::PI);
        assert_eq!(MultiDouble::term(Quad::PI, 5), 0.0);
    }

    #[test]
    fn test_checked_operations_through_the_trait() {
        fn checked<T: MultiDouble>(x: T) -> Result<T, DomainError> {
            x.checked_sqrt_val()?.checked_div_val(T::from(2.0))?.checked_powi_val(2)
        }
        assert_eq!(checked(Quad::from(16.0)), Ok(Quad::from(4.0)));
        assert_eq!(checked(Oct::from(16.0)), Ok(Oct::from(4.0)));
        assert!(checked(Quad::from(-1.0)).is_err());
        assert_eq!(
            Oct::ONE.checked_div_val(Oct::ZERO),
            Err(DomainError::DivisionByZero)
        );
    }

    #[test]
    fn test_leading_and_abs() {
        assert_eq!((-Quad::E).leading(), -std::f64::consts::E);
        assert_eq!(MultiDouble::abs(-Oct::E), Oct::E);
        assert!(Quad::zero().is_zero());
        assert!(Oct::one().is_one());
    }
}
