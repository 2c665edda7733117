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

//! Square root and powers for `Quad`.

use super::Quad;
use multidouble_core::{
    eft::{binary_exponent, quick_two_sum, two_prod},
    error::DomainError,
};

/// Beyond this binary exponent `sqrt` rescales its argument towards one.
const SQRT_SCALING_EXPONENT: i32 = 900;

impl Quad {
    /// Square root of a non-negative value.
    ///
    /// One Newton correction of the native root: with `a = sqrt(high)` the
    /// residual `self - a^2` is formed exactly through `two_prod` and
    /// `a + residual / 2a` is the result. Values with extreme exponents are
    /// first scaled by an even power of two, since the rounding error of `a^2`
    /// is subnormal below about `2^-969` and `a^2` may overflow near
    /// `f64::MAX`.
    pub(crate) fn sqrt_non_negative(self) -> Quad {
        if self.high == 0.0 || !self.high.is_finite() {
            return self;
        }
        if let Some(exponent) = binary_exponent(self.high) {
            if exponent.abs() > SQRT_SCALING_EXPONENT {
                let even = exponent & !1;
                return self.mul_pow2(-even).sqrt_non_negative().mul_pow2(even / 2);
            }
        }
        let a = self.high.sqrt();
        let (p, e) = two_prod(a, a);
        let residual = ((self.high - p) - e) + self.low;
        let correction = 0.5 * residual / a;
        let (high, low) = quick_two_sum(a, correction);
        Quad::from_raw(high, low)
    }

    /// Returns the square root.
    ///
    /// Signed zeros are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `self < 0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::{MathConstants, Quad};
    /// let root = Quad::from(2.0).sqrt().unwrap();
    /// assert!((root - Quad::SQRT_2).abs() < Quad::from(1e-31));
    /// assert!(Quad::from(-1.0).sqrt().is_err());
    /// ```
    pub fn sqrt(self) -> Result<Quad, DomainError> {
        if self.high < 0.0 {
            return Err(DomainError::out_of_domain("sqrt", self.high));
        }
        Ok(self.sqrt_non_negative())
    }

    /// Raises to an integer power by binary exponentiation.
    ///
    /// Negative exponents take the reciprocal of the positive power.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DivisionByZero`] for a zero base with a negative
    /// exponent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// assert_eq!(Quad::from(3.0).powi(4), Ok(Quad::from(81.0)));
    /// assert_eq!(Quad::from(2.0).powi(-2), Ok(Quad::from(0.25)));
    /// assert!(Quad::ZERO.powi(-1).is_err());
    /// ```
    pub fn powi(self, n: i32) -> Result<Quad, DomainError> {
        if n == 0 {
            return Ok(Quad::ONE);
        }
        if n < 0 && self.high == 0.0 {
            return Err(DomainError::DivisionByZero);
        }
        let mut exponent = n.unsigned_abs();
        let mut base = self;
        let mut acc = Quad::ONE;
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
            Ok(Quad::quotient(Quad::ONE, acc))
        } else {
            Ok(acc)
        }
    }

    /// Raises to a real power.
    ///
    /// Integral exponents within the range of `i32` are evaluated by
    /// [`Quad::powi`], which also admits negative bases. Other exponents are
    /// evaluated as `exp(y ln(self))`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] for a negative base with a non-integral
    /// exponent and for a zero base with a negative exponent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// let x = Quad::from(4.0).powf(Quad::from(0.5)).unwrap();
    /// assert!((x - Quad::from(2.0)).abs() < Quad::from(1e-30));
    /// assert!(Quad::from(-4.0).powf(Quad::from(0.5)).is_err());
    /// ```
    pub fn powf(self, y: Quad) -> Result<Quad, DomainError> {
        if y.high == 0.0 {
            return Ok(Quad::ONE);
        }
        if self.is_nan() || y.is_nan() {
            return Ok(Quad::NAN);
        }
        if let Some(n) = integral_exponent(y) {
            return self.powi(n);
        }
        if self.high == 0.0 {
            return if y.high > 0.0 {
                Ok(Quad::ZERO)
            } else {
                Err(DomainError::DivisionByZero)
            };
        }
        if self.high < 0.0 {
            return Err(DomainError::out_of_domain("powf", self.high));
        }
        if self.is_infinite() {
            return Ok(if y.high > 0.0 { Quad::INFINITY } else { Quad::ZERO });
        }
        Ok((y * self.ln()?).exp())
    }
}

/// Returns `y` as an `i32` if it is an integer in range.
fn integral_exponent(y: Quad) -> Option<i32> {
    let in_range = y.high.abs() <= f64::from(i32::MAX);
    (in_range && y.low == 0.0 && y.high.fract() == 0.0).then(|| y.high as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_quad_close, random_quad};
    use multidouble_core::num::constants::MathConstants;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const SQRT_CASES: &[(Quad, Quad)] = &[
        (Quad::from_raw(2.0, 0.0), Quad::from_raw(1.4142135623730951, -9.667293313452913e-17)),
        (Quad::from_raw(1e-10, -3.643219731549774e-27), Quad::from_raw(1e-05, -8.1803053914031315e-22)),
        (Quad::from_raw(12345.678, 1.1641532182693482e-13), Quad::from_raw(111.11110655555547, -3.8355979627290144e-15)),
        (Quad::from_raw(0.3, 1.1102230246251566e-17), Quad::from_raw(0.5477225575051661, 3.9036170478011407e-17)),
        (Quad::from_raw(7e250, -8.35892421888733e233), Quad::from_raw(2.6457513110645906e125, -9.796731615993612e107)),
        (Quad::from_raw(3.3e-300, -1.98741646e-316), Quad::from_raw(1.816590212458495e-150, 1.2675977241771416e-166)),
        (Quad::from_raw(1e-305, 4e-323), Quad::from_raw(3.162277660168379e-153, 2.592608090565997e-169)),
        (Quad::from_raw(1e-310, 0.0), Quad::from_raw(9.999999999999986e-156, -9.277065027753207e-172)),
        (Quad::from_raw(1.7e308, 6.116920421134001e291), Quad::from_raw(1.3038404810405298e154, -7.003849801647836e137)),
    ];
    const POWF_CASES: &[(Quad, Quad, Quad)] = &[
        (Quad::from_raw(2.5, 0.0), Quad::from_raw(1.5, 0.0), Quad::from_raw(3.952847075210474, 9.458169525358944e-17)),
        (Quad::from_raw(10.0, 0.0), Quad::from_raw(-3.25, 0.0), Quad::from_raw(0.0005623413251903491, -1.671791192407776e-20)),
        (Quad::from_raw(0.3, 1.1102230246251566e-17), Quad::from_raw(7.7, -1.7763568394002506e-16), Quad::from_raw(9.415289134866061e-05, 4.823484148160164e-22)),
        (Quad::from_raw(1.1, -8.881784197001253e-17), Quad::from_raw(100.5, 0.0), Quad::from_raw(14453.228155208371, 8.341880080269484e-13)),
    ];

    #[test]
    fn test_sqrt_reference_values() {
        for &(x, expected) in SQRT_CASES {
            assert_quad_close(x.sqrt().unwrap(), expected, -102);
        }
    }

    #[test]
    fn test_sqrt_squares_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..1000 {
            let x = random_quad(&mut rng, -300..300).abs();
            let root = x.sqrt().unwrap();
            assert_quad_close(root.square(), x, -101);
        }
    }

    #[test]
    fn test_sqrt_special_values() {
        assert_eq!(Quad::ZERO.sqrt(), Ok(Quad::ZERO));
        assert!(Quad::from(-0.0).sqrt().unwrap().is_sign_negative());
        assert_eq!(Quad::INFINITY.sqrt(), Ok(Quad::INFINITY));
        assert!(Quad::NAN.sqrt().unwrap().is_nan());
        assert_eq!(Quad::from(16.0).sqrt(), Ok(Quad::from(4.0)));
        assert_eq!(
            Quad::from(-2.0).sqrt(),
            Err(DomainError::out_of_domain("sqrt", -2.0))
        );
    }

    #[test]
    fn test_powi_laws() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        for _ in 0..200 {
            let x = random_quad(&mut rng, -8..8);
            let n = rng.random_range(1..40);
            assert_eq!(x.powi(0), Ok(Quad::ONE));
            assert_eq!(x.powi(1), Ok(x));
            let positive = x.powi(n).unwrap();
            assert_eq!(x.powi(-n).unwrap(), positive.recip().unwrap());
        }
    }

    #[test]
    fn test_powi_matches_repeated_multiplication() {
        let x = Quad::PI;
        let mut product = Quad::ONE;
        for n in 1..=20 {
            product *= x;
            assert_quad_close(x.powi(n).unwrap(), product, -97);
        }
    }

    #[test]
    fn test_powi_exact_and_extreme() {
        assert_eq!(Quad::from(-2.0).powi(63), Ok(Quad::from(i64::MIN)));
        assert_eq!(Quad::from(0.5).powi(1074), Ok(Quad::from(f64::from_bits(1))));
        assert_eq!(Quad::from(10.0).powi(400), Ok(Quad::INFINITY));
        assert_eq!(Quad::ZERO.powi(3), Ok(Quad::ZERO));
        assert_eq!(Quad::ZERO.powi(-3), Err(DomainError::DivisionByZero));
        assert_eq!(Quad::ONE.powi(i32::MIN), Ok(Quad::ONE));
    }

    #[test]
    fn test_powf_reference_values() {
        for &(x, y, expected) in POWF_CASES {
            assert_quad_close(x.powf(y).unwrap(), expected, -90);
        }
    }

    #[test]
    fn test_powf_special_values() {
        assert_eq!(Quad::NAN.powf(Quad::ZERO), Ok(Quad::ONE));
        assert!(Quad::NAN.powf(Quad::ONE).unwrap().is_nan());
        assert!(Quad::ONE.powf(Quad::NAN).unwrap().is_nan());
        assert_eq!(Quad::ZERO.powf(Quad::from(0.5)), Ok(Quad::ZERO));
        assert_eq!(
            Quad::ZERO.powf(Quad::from(-0.5)),
            Err(DomainError::DivisionByZero)
        );
        assert_eq!(Quad::from(-3.0).powf(Quad::from(3.0)), Ok(Quad::from(-27.0)));
        assert_eq!(
            Quad::from(-3.0).powf(Quad::from(0.5)),
            Err(DomainError::out_of_domain("powf", -3.0))
        );
        assert_eq!(Quad::INFINITY.powf(Quad::from(0.5)), Ok(Quad::INFINITY));
        assert_eq!(Quad::INFINITY.powf(Quad::from(-0.5)), Ok(Quad::ZERO));
    }

    #[test]
    fn test_powf_agrees_with_powi() {
        let x = Quad::E;
        for n in [-7, -1, 2, 9] {
            let via_exp = (Quad::from(n) * x.ln().unwrap()).exp();
            assert_quad_close(x.powf(Quad::from(n)).unwrap(), via_exp, -96);
        }
    }
}
