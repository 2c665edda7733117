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

//! Square root, integer powers and integer rounding for `Oct`.

use super::Oct;
use multidouble_core::error::DomainError;

impl Oct {
    /// Returns the square root.
    ///
    /// The quad square root seeds a single Newton step `(y + x / y) / 2` in
    /// oct precision, which doubles the number of correct bits.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `self < 0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::{MathConstants, Oct};
    /// let root = Oct::from(2.0).sqrt().unwrap();
    /// assert!((root - Oct::SQRT_2).abs() < Oct::EPSILON * 2.0);
    /// ```
    pub fn sqrt(self) -> Result<Oct, DomainError> {
        let leading = self.terms[0];
        if leading < 0.0 {
            return Err(DomainError::out_of_domain("sqrt", leading));
        }
        if leading == 0.0 || !leading.is_finite() {
            return Ok(self);
        }
        let y = Oct::from(self.to_quad().sqrt_non_negative());
        Ok((y + Oct::quotient(self, y)).mul_pow2(-1))
    }

    /// Raises to an integer power by binary exponentiation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DivisionByZero`] for a zero base with a negative
    /// exponent.
    pub fn powi(self, n: i32) -> Result<Oct, DomainError> {
        if n == 0 {
            return Ok(Oct::ONE);
        }
        if n < 0 && self.terms[0] == 0.0 {
            return Err(DomainError::DivisionByZero);
        }
        let mut exponent = n.unsigned_abs();
        let mut base = self;
        let mut acc = Oct::ONE;
        loop {
            if exponent & 1 == 1 {
                acc = acc * base;
            }
            exponent >>= 1;
            if exponent == 0 {
                break;
            }
            base = base.square();
        }
        if n < 0 {
            Ok(Oct::quotient(Oct::ONE, acc))
        } else {
            Ok(acc)
        }
    }

    /// Rounds the leading non-integral term with `round` and drops the terms
    /// after it; those are too small to move the value across an integer.
    fn round_with(self, round: fn(f64) -> f64) -> Oct {
        if !self.is_finite() {
            return self;
        }
        let mut terms = self.terms;
        for i in 0..terms.len() {
            let rounded = round(terms[i]);
            if rounded != terms[i] {
                terms[i] = rounded;
                terms[i + 1..].fill(0.0);
                break;
            }
        }
        Oct::from_terms(&terms)
    }

    /// Returns the largest integer less than or equal to `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Oct;
    /// let x = Oct::new([4.0, -1e-60, 0.0, 0.0]);
    /// assert_eq!(x.floor(), Oct::from(3.0));
    /// ```
    pub fn floor(self) -> Oct {
        self.round_with(f64::floor)
    }

    /// Returns the smallest integer greater than or equal to `self`.
    pub fn ceil(self) -> Oct {
        self.round_with(f64::ceil)
    }

    /// Returns the integer part of `self`.
    pub fn trunc(self) -> Oct {
        if self.terms[0] >= 0.0 {
            self.floor()
        } else {
            self.ceil()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_oct_close, random_oct};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const OCT_SQRT_CASES: &[(Oct, Oct)] = &[
        (Oct::from_raw([3.141592653589793, 1.2246467991473532e-16, -2.9947698097183397e-33, 1.1124542208633653e-49]), Oct::from_raw([1.772453850905516, -7.666586499825799e-17, -1.3058334907945429e-33, -2.611014208782716e-50])),
        (Oct::from_raw([2.0, 0.0, 0.0, 0.0]), Oct::from_raw([1.4142135623730951, -9.667293313452913e-17, 4.1386753086994136e-33, 4.935546991468351e-50])),
        (Oct::from_raw([3.3333333333333335e-201, -1.8207050131857237e-217, 1.890532318578528e-233, -2.4994794547810472e-250]), Oct::from_raw([5.773502691896258e-101, -1.2306547865403385e-118, -3.9991265024257526e-135, -8.985531490283844e-152])),
    ];

    #[test]
    fn test_sqrt_reference_values() {
        for &(x, expected) in OCT_SQRT_CASES {
            assert_oct_close(x.sqrt().unwrap(), expected, -206);
        }
    }

    #[test]
    fn test_sqrt_squares_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(43);
        for _ in 0..500 {
            let x = random_oct(&mut rng, -200..200).abs();
            assert_oct_close(x.sqrt().unwrap().square(), x, -205);
        }
    }

    #[test]
    fn test_sqrt_special_values() {
        assert_eq!(Oct::ZERO.sqrt(), Ok(Oct::ZERO));
        assert_eq!(Oct::INFINITY.sqrt(), Ok(Oct::INFINITY));
        assert_eq!(Oct::from(9.0).sqrt(), Ok(Oct::from(3.0)));
        assert_eq!(
            Oct::from(-9.0).sqrt(),
            Err(DomainError::out_of_domain("sqrt", -9.0))
        );
    }

    #[test]
    fn test_powi_laws() {
        let mut rng = ChaCha8Rng::seed_from_u64(47);
        for _ in 0..100 {
            let x = random_oct(&mut rng, -4..4);
            let n = rng.random_range(1..30);
            assert_eq!(x.powi(0), Ok(Oct::ONE));
            assert_eq!(x.powi(1), Ok(x));
            assert_eq!(x.powi(-n).unwrap(), x.powi(n).unwrap().recip().unwrap());
        }
        assert_eq!(Oct::from(3.0).powi(5), Ok(Oct::from(243.0)));
        assert_eq!(Oct::ZERO.powi(-2), Err(DomainError::DivisionByZero));
    }

    #[test]
    fn test_floor_ceil_trunc() {
        let x = Oct::new([4.0, -1e-60, 0.0, 0.0]);
        assert_eq!(x.floor(), Oct::from(3.0));
        assert_eq!(x.ceil(), Oct::from(4.0));
        assert_eq!(x.trunc(), Oct::from(3.0));
        assert_eq!((-x).trunc(), Oct::from(-3.0));
        let big = Oct::new([2f64.powi(80), 2f64.powi(20), 2f64.powi(-40), 1e-60]);
        assert_eq!(big.floor(), Oct::new([2f64.powi(80), 2f64.powi(20), 0.0, 0.0]));
        assert_eq!(big.ceil(), Oct::new([2f64.powi(80), 2f64.powi(20) + 1.0, 0.0, 0.0]));
        assert_eq!(Oct::from(2.5).floor(), Oct::from(2.0));
        assert!(Oct::NAN.floor().is_nan());
    }
}
