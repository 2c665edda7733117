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

//! # Double-Double Values
//!
//! `Quad` represents a real number as the unevaluated sum of two doubles
//! `high + low`, giving roughly 106 significant bits (about 32 decimal
//! digits). The pair is always kept in canonical form: `low` is the double
//! nearest to `value - high`, hence `|low| <= ulp(high) / 2` and
//! `high + low == high` in native arithmetic.
//!
//! ## Submodules
//!
//! - `arithmetic`: Operators with `Quad` and `f64` operands, checked
//!   division, scaling by powers of two.
//! - `exp_log`: `exp`, `exp_m1`, `ln`, `ln_1p`, `log10`, `log2`.
//! - `power`: `sqrt`, `powi`, `powf`.
//! - `trigonometric`: `sin`, `cos`, `tan`, `sin_cos` and their inverses.
//! - `hyperbolic`: `sinh`, `cosh`, `tanh` and their inverses.
//! - `rounding`: `floor`, `ceil`, `trunc`, `round`.
//!
//! Functions follow the naming of the corresponding `f64` methods. Functions
//! with a restricted real domain return `Result<Quad, DomainError>`.

mod arithmetic;
mod exp_log;
mod hyperbolic;
mod power;
mod rounding;
mod trigonometric;

use multidouble_core::{eft::two_sum, expansion::renormalize};
use std::cmp::Ordering;

/// A double-double number: the unevaluated sum `high + low` of two doubles.
///
/// # Invariants
///
/// For finite values `high + low == high` holds in native arithmetic, i.e.
/// `low` is the nearest double to the remainder `value - high`. Non-finite
/// values carry `low == 0`.
///
/// # Examples
///
/// ```rust
/// # use multidouble::Quad;
/// let third = Quad::ONE / Quad::from(3.0);
/// assert_eq!(third.high(), 1.0 / 3.0);
/// assert!(third.low() != 0.0);
/// assert_eq!((third * 3.0).high(), 1.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quad {
    high: f64,
    low: f64,
}

impl Quad {
    /// Zero.
    pub const ZERO: Self = Self::from_raw(0.0, 0.0);
    /// One.
    pub const ONE: Self = Self::from_raw(1.0, 0.0);
    /// Not a number.
    pub const NAN: Self = Self::from_raw(f64::NAN, 0.0);
    /// Positive infinity.
    pub const INFINITY: Self = Self::from_raw(f64::INFINITY, 0.0);
    /// Negative infinity.
    pub const NEG_INFINITY: Self = Self::from_raw(f64::NEG_INFINITY, 0.0);
    /// Relative precision of a quad, `2^-106`.
    pub const EPSILON: Self = Self::from_raw(1.232_595_164_407_831e-32, 0.0);
    /// Largest finite value.
    pub const MAX: Self = Self::from_raw(f64::MAX, 9.979_201_547_673_598e291);
    /// Smallest finite value.
    pub const MIN: Self = Self::from_raw(f64::MIN, -9.979_201_547_673_598e291);

    /// Creates a quad from an already normalized pair.
    ///
    /// # Panics
    ///
    /// Panics if `low` is not the rounding remainder of `high`, i.e. if
    /// `high + low != high` for finite values, or if `low != 0` for
    /// non-finite `high`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// let q = Quad::new(1.0, 1e-20);
    /// assert_eq!(q.low(), 1e-20);
    /// ```
    #[inline]
    pub fn new(high: f64, low: f64) -> Self {
        assert!(
            Self::is_normalized(high, low),
            "Invalid quad: low term {low:e} overlaps high term {high:e}"
        );
        Self { high, low }
    }

    /// Creates a quad from an already normalized pair if it is valid.
    ///
    /// Returns `None` if the pair is not normalized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// assert!(Quad::try_new(1.0, 1e-20).is_some());
    /// assert!(Quad::try_new(1.0, 0.5).is_none());
    /// ```
    #[inline]
    pub fn try_new(high: f64, low: f64) -> Option<Self> {
        if Self::is_normalized(high, low) {
            Some(Self { high, low })
        } else {
            None
        }
    }

    /// Creates a quad without checking the normalization in release builds.
    ///
    /// The caller must ensure `high + low == high`. This function contains a
    /// `debug_assert!` to catch errors during development.
    #[inline]
    pub fn new_unchecked(high: f64, low: f64) -> Self {
        debug_assert!(
            Self::is_normalized(high, low),
            "Invalid quad: low term {low:e} overlaps high term {high:e}"
        );
        Self { high, low }
    }

    /// Creates the quad equal to the exact sum `a + b` of two arbitrary doubles.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// let q = Quad::from_sum(1e-20, 1.0);
    /// assert_eq!((q.high(), q.low()), (1.0, 1e-20));
    /// ```
    #[inline]
    pub fn from_sum(a: f64, b: f64) -> Self {
        let (high, low) = two_sum(a, b);
        if high.is_finite() {
            Self { high, low }
        } else {
            Self { high, low: 0.0 }
        }
    }

    /// Creates the quad nearest to the exact sum of arbitrary doubles.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// let q = Quad::from_terms(&[1.0, 1e-40, 1e-20, -1.0]);
    /// assert_eq!((q.high(), q.low()), (1e-20, 1e-40));
    /// ```
    #[inline]
    pub fn from_terms(terms: &[f64]) -> Self {
        let [high, low] = renormalize::<2>(terms);
        Self { high, low }
    }

    #[inline]
    pub(crate) const fn from_raw(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    #[inline]
    fn is_normalized(high: f64, low: f64) -> bool {
        if high.is_finite() {
            low.is_finite() && high + low == high
        } else {
            low == 0.0
        }
    }

    /// Returns the leading term.
    #[inline]
    pub fn high(self) -> f64 {
        self.high
    }

    /// Returns the trailing term.
    #[inline]
    pub fn low(self) -> f64 {
        self.low
    }

    /// Returns the term at `index`: `high`, `low`, then zeros.
    #[inline]
    pub fn term(self, index: usize) -> f64 {
        match index {
            0 => self.high,
            1 => self.low,
            _ => 0.0,
        }
    }

    /// Converts to the nearest native double (the leading term).
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.high
    }

    /// Returns `true` if this value is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.high.is_nan()
    }

    /// Returns `true` if this value is neither infinite nor NaN.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.high.is_finite()
    }

    /// Returns `true` if this value is positive or negative infinity.
    #[inline]
    pub fn is_infinite(self) -> bool {
        self.high.is_infinite()
    }

    /// Returns `true` if the leading term has a negative sign, including `-0.0`.
    #[inline]
    pub fn is_sign_negative(self) -> bool {
        self.high.is_sign_negative()
    }

    /// Returns `true` if the leading term has a positive sign, including `+0.0`.
    #[inline]
    pub fn is_sign_positive(self) -> bool {
        self.high.is_sign_positive()
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        if self.high.is_sign_negative() {
            -self
        } else {
            self
        }
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

impl PartialOrd for Quad {
    /// Lexicographic order on `(high, low)`, which agrees with the order of
    /// the represented values for normalized quads.
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.high.partial_cmp(&other.high) {
            Some(Ordering::Equal) => self.low.partial_cmp(&other.low),
            ordering => ordering,
        }
    }
}

impl From<f64> for Quad {
    #[inline]
    fn from(value: f64) -> Self {
        Self::from_raw(value, 0.0)
    }
}

impl From<f32> for Quad {
    #[inline]
    fn from(value: f32) -> Self {
        Self::from_raw(f64::from(value), 0.0)
    }
}

macro_rules! impl_from_small_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Quad {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::from_raw(f64::from(value), 0.0)
                }
            }
        )*
    };
}

impl_from_small_int!(i8, u8, i16, u16, i32, u32);

impl From<i64> for Quad {
    /// Exact conversion; every `i64` fits in 106 bits.
    #[inline]
    fn from(value: i64) -> Self {
        let high = value as f64;
        let low = (i128::from(value) - high as i128) as f64;
        Self::from_sum(high, low)
    }
}

impl From<u64> for Quad {
    /// Exact conversion; every `u64` fits in 106 bits.
    #[inline]
    fn from(value: u64) -> Self {
        let high = value as f64;
        let low = (i128::from(value) - high as i128) as f64;
        Self::from_sum(high, low)
    }
}

impl From<Quad> for f64 {
    #[inline]
    fn from(value: Quad) -> Self {
        value.high
    }
}
