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

//! # Quad-Double Values
//!
//! `Oct` represents a real number as the unevaluated sum of four doubles,
//! giving roughly 212 significant bits (about 63 decimal digits). Every value
//! is kept in canonical form: each term is the double nearest to the value
//! that remains after subtracting the preceding terms.
//!
//! `Oct` offers the field operations, square root and integer powers. It
//! mainly serves as a bridge for the argument reductions in `Quad` and as a
//! reference type when validating `Quad` results.
//!
//! ## Submodules
//!
//! - `arithmetic`: Operators with `Oct` and `f64` operands, checked division,
//!   scaling by powers of two.
//! - `math`: `sqrt`, `powi`, `floor`, `ceil`, `trunc`.

mod arithmetic;
mod math;

use crate::Quad;
use multidouble_core::expansion::renormalize;
use std::cmp::Ordering;

/// A quad-double number: the unevaluated sum of four doubles.
///
/// # Invariants
///
/// For finite values every term is the nearest double to the sum of the
/// terms that follow it plus itself, so `t[i] + t[i + 1] == t[i]` holds in
/// native arithmetic and a zero term is followed only by zeros. Non-finite
/// values carry zero trailing terms.
///
/// # Examples
///
/// ```rust
/// # use multidouble::Oct;
/// let third = Oct::ONE / Oct::from(3.0);
/// assert_eq!(third.to_f64(), 1.0 / 3.0);
/// assert!(third.term(3) != 0.0);
/// assert!((third * 3.0 - Oct::ONE).abs() < Oct::EPSILON);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Oct {
    terms: [f64; 4],
}

impl Oct {
    /// Zero.
    pub const ZERO: Self = Self::from_raw([0.0; 4]);
    /// One.
    pub const ONE: Self = Self::from_raw([1.0, 0.0, 0.0, 0.0]);
    /// Not a number.
    pub const NAN: Self = Self::from_raw([f64::NAN, 0.0, 0.0, 0.0]);
    /// Positive infinity.
    pub const INFINITY: Self = Self::from_raw([f64::INFINITY, 0.0, 0.0, 0.0]);
    /// Negative infinity.
    pub const NEG_INFINITY: Self = Self::from_raw([f64::NEG_INFINITY, 0.0, 0.0, 0.0]);
    /// Relative precision of an oct, `2^-212`.
    pub const EPSILON: Self = Self::from_raw([1.519_290_839_321_567_8e-64, 0.0, 0.0, 0.0]);

    /// Creates an oct from already canonical terms.
    ///
    /// # Panics
    ///
    /// Panics if the terms overlap, see the type level invariants.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Oct;
    /// let x = Oct::new([1.0, 1e-20, 1e-40, 1e-60]);
    /// assert_eq!(x.term(2), 1e-40);
    /// ```
    #[inline]
    pub fn new(terms: [f64; 4]) -> Self {
        assert!(
            Self::is_normalized(&terms),
            "Invalid oct: terms {terms:?} are not non-overlapping"
        );
        Self { terms }
    }

    /// Creates an oct from already canonical terms if they are valid.
    #[inline]
    pub fn try_new(terms: [f64; 4]) -> Option<Self> {
        Self::is_normalized(&terms).then_some(Self { terms })
    }

    /// Creates an oct without checking the terms in release builds.
    ///
    /// The caller must uphold the type level invariants. This function
    /// contains a `debug_assert!` to catch errors during development.
    #[inline]
    pub fn new_unchecked(terms: [f64; 4]) -> Self {
        debug_assert!(
            Self::is_normalized(&terms),
            "Invalid oct: terms {terms:?} are not non-overlapping"
        );
        Self { terms }
    }

    /// Creates the oct nearest to the exact sum of arbitrary doubles.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Oct;
    /// let x = Oct::from_terms(&[1e-40, 1.0, 1e-20, -1.0]);
    /// assert_eq!(x, Oct::new([1e-20, 1e-40, 0.0, 0.0]));
    /// ```
    #[inline]
    pub fn from_terms(terms: &[f64]) -> Self {
        Self::from_raw(renormalize::<4>(terms))
    }

    #[inline]
    pub(crate) const fn from_raw(terms: [f64; 4]) -> Self {
        Self { terms }
    }

    fn is_normalized(terms: &[f64; 4]) -> bool {
        if !terms[0].is_finite() {
            return terms[1..].iter().all(|&t| t == 0.0);
        }
        terms.iter().all(|t| t.is_finite())
            && terms
                .windows(2)
                .all(|pair| pair[0] + pair[1] == pair[0] && (pair[0] != 0.0 || pair[1] == 0.0))
    }

    /// Returns the terms in decreasing magnitude.
    #[inline]
    pub fn terms(self) -> [f64; 4] {
        self.terms
    }

    /// Returns the term at `index`, or zero beyond the fourth term.
    #[inline]
    pub fn term(self, index: usize) -> f64 {
        self.terms.get(index).copied().unwrap_or(0.0)
    }

    /// Converts to the nearest native double (the leading term).
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.terms[0]
    }

    /// Converts to the nearest quad (the two leading terms).
    #[inline]
    pub fn to_quad(self) -> Quad {
        Quad::from_raw(self.terms[0], self.terms[1])
    }

    /// Returns `true` if this value is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.terms[0].is_nan()
    }

    /// Returns `true` if this value is neither infinite nor NaN.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.terms[0].is_finite()
    }

    /// Returns `true` if this value is positive or negative infinity.
    #[inline]
    pub fn is_infinite(self) -> bool {
        self.terms[0].is_infinite()
    }

    /// Returns `true` if the leading term has a negative sign, including `-0.0`.
    #[inline]
    pub fn is_sign_negative(self) -> bool {
        self.terms[0].is_sign_negative()
    }

    /// Returns `true` if the leading term has a positive sign, including `+0.0`.
    #[inline]
    pub fn is_sign_positive(self) -> bool {
        self.terms[0].is_sign_positive()
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        if self.is_sign_negative() { -self } else { self }
    }

    /// Returns the smaller of two values, ignoring NaN like `f64::min`.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self.is_nan() || other < self { other } else { self }
    }

    /// Returns the larger of two values, ignoring NaN like `f64::max`.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self.is_nan() || other > self { other } else { self }
    }
}

impl PartialOrd for Oct {
    /// Lexicographic order on the terms, which agrees with the order of the
    /// represented values for canonical octs.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        for (a, b) in self.terms.iter().zip(other.terms.iter()) {
            match a.partial_cmp(b) {
                Some(Ordering::Equal) => continue,
                ordering => return ordering,
            }
        }
        Some(Ordering::Equal)
    }
}

impl From<f64> for Oct {
    #[inline]
    fn from(value: f64) -> Self {
        Self::from_raw([value, 0.0, 0.0, 0.0])
    }
}

impl From<Quad> for Oct {
    #[inline]
    fn from(value: Quad) -> Self {
        Self::from_raw([value.high(), value.low(), 0.0, 0.0])
    }
}

macro_rules! impl_from_via_quad {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Oct {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::from(Quad::from(value))
                }
            }
        )*
    };
}

impl_from_via_quad!(f32, i8, u8, i16, u16, i32, u32, i64, u64);

impl From<Oct> for f64 {
    #[inline]
    fn from(value: Oct) -> Self {
        value.to_f64()
    }
}

impl From<Oct> for Quad {
    #[inline]
    fn from(value: Oct) -> Self {
        value.to_quad()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_terms() {
        assert!(Oct::try_new([1.0, 1e-20, 1e-40, 1e-60]).is_some());
        assert!(Oct::try_new([1.0, 1e-20, 0.0, 0.0]).is_some());
        assert!(Oct::try_new([1.0, 0.5, 0.0, 0.0]).is_none());
        assert!(Oct::try_new([1.0, 0.0, 1e-40, 0.0]).is_none());
        assert!(Oct::try_new([f64::INFINITY, 0.0, 0.0, 0.0]).is_some());
        assert!(Oct::try_new([f64::INFINITY, 1.0, 0.0, 0.0]).is_none());
        assert!(Oct::try_new([1.0, f64::NAN, 0.0, 0.0]).is_none());
    }

    #[test]
    #[should_panic(expected = "Invalid oct")]
    fn test_new_rejects_overlapping_terms() {
        let _ = Oct::new([1.0, 1e-20, 1e-20, 0.0]);
    }

    #[test]
    fn test_from_terms_renormalizes() {
        let x = Oct::from_terms(&[0.1, 0.2, 0.3]);
        assert_eq!(x.terms(), [0.6, 2.7755575615628914e-17, 0.0, 0.0]);
        assert_eq!(Oct::from_terms(&[]), Oct::ZERO);
        assert_eq!(Oct::from_terms(&[2.0]), Oct::from(2.0));
    }

    #[test]
    fn test_conversions() {
        let q = Quad::new(1.0, 1e-20);
        let x = Oct::from(q);
        assert_eq!(x.terms(), [1.0, 1e-20, 0.0, 0.0]);
        assert_eq!(x.to_quad(), q);
        assert_eq!(Quad::from(x), q);
        assert_eq!(f64::from(x), 1.0);
        assert_eq!(Oct::from(i64::MAX).terms(), [9.223372036854776e18, -1.0, 0.0, 0.0]);
        assert_eq!(x.term(7), 0.0);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = Oct::new([1.0, 1e-20, 1e-40, 1e-60]);
        let b = Oct::new([1.0, 1e-20, 1e-40, -1e-60]);
        assert!(b < a);
        assert!(a > Oct::ONE);
        assert_eq!(a.partial_cmp(&a), Some(Ordering::Equal));
        assert!(Oct::NAN.partial_cmp(&a).is_none());
        assert_eq!(a.min(b), b);
        assert_eq!(Oct::NAN.max(a), a);
    }

    #[test]
    fn test_abs_and_predicates() {
        let x = Oct::new([-2.0, 1e-20, 0.0, 0.0]);
        assert_eq!(x.abs(), Oct::new([2.0, -1e-20, 0.0, 0.0]));
        assert!(x.is_sign_negative());
        assert!(Oct::NAN.is_nan());
        assert!(Oct::NEG_INFINITY.is_infinite());
        assert!(Oct::EPSILON.is_finite());
    }
}
