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

//! Exponential and logarithm functions for `Quad`.
//!
//! `exp` and `exp_m1` reduce the argument as `x = k ln2 + r` using the oct
//! value of `ln2`, shrink `r` by `2^9`, evaluate the Taylor series of
//! `exp(r) - 1` and undo the shrinking by repeated squaring in the form
//! `s -> s (s + 2)`, which keeps full relative precision for small results.
//!
//! `ln` uses the rapidly converging series of `2 atanh(d / (2 + d))` close to
//! one and a single Newton step `y + x exp(-y) - 1` from the native logarithm
//! elsewhere.

use super::Quad;
use crate::{
    Oct,
    constants::{INV_FACTORIALS, ODD_RECIPROCALS},
};
use multidouble_core::{
    eft::binary_exponent, error::DomainError, num::constants::MathConstants,
};

/// Below this magnitude `exp` and `exp_m1` evaluate the Taylor series directly.
const EXP_SERIES_THRESHOLD: f64 = 1.36e-3;

/// Number of Taylor terms used below `EXP_SERIES_THRESHOLD`.
const EXP_DIRECT_TERMS: usize = 14;

/// Number of Taylor terms used for the reduced argument `|r| <= ln2 / 2^10`.
const EXP_REDUCED_TERMS: usize = 12;

/// The reduced argument is divided by `2^EXP_SQUARINGS`.
const EXP_SQUARINGS: i32 = 9;

/// `ln(f64::MAX)`; above this `exp` overflows.
const EXP_OVERFLOW_THRESHOLD: f64 = 709.782_712_893_384;

/// Below this `exp` underflows to zero.
const EXP_UNDERFLOW_THRESHOLD: f64 = -745.2;

/// Within this distance of one `ln` evaluates the atanh series.
const LN_SERIES_THRESHOLD: f64 = 0.0625;

/// Beyond this binary exponent `ln` splits off the exponent so that the
/// Newton step never overflows `exp`.
const LN_SCALING_EXPONENT: i32 = 512;

/// Evaluates `exp(x) - 1` by its Taylor series with `terms` terms.
fn exp_m1_series(x: Quad, terms: usize) -> Quad {
    let mut sum = INV_FACTORIALS[terms];
    for k in (1..terms).rev() {
        sum = sum * x + INV_FACTORIALS[k];
    }
    sum * x
}

/// Reduces `x` to `x = k ln2 + r` and returns `k` and `exp(r) - 1`.
fn exp_m1_reduced(x: Quad) -> (i32, Quad) {
    let k = (x.high / std::f64::consts::LN_2).round();
    let r = (Oct::from(x) - Oct::LN_2 * k).to_quad();
    let mut s = exp_m1_series(r.mul_pow2(-EXP_SQUARINGS), EXP_REDUCED_TERMS);
    for _ in 0..EXP_SQUARINGS {
        s = s * (s + 2.0);
    }
    (k as i32, s)
}

/// Evaluates `ln(1 + d)` as `2 atanh(z)` with `z = d / (2 + d)`, for small `|d|`.
fn ln_1p_series(d: Quad) -> Quad {
    let z = Quad::quotient(d, d + 2.0);
    let z2 = z.square();
    let last = ODD_RECIPROCALS.len() - 1;
    let mut sum = ODD_RECIPROCALS[last];
    for k in (0..last).rev() {
        sum = sum * z2 + ODD_RECIPROCALS[k];
    }
    (sum * z).mul_pow2(1)
}

/// Natural logarithm of a finite positive value.
pub(super) fn ln_positive(x: Quad) -> Quad {
    debug_assert!(x.high > 0.0 && x.high.is_finite());
    if x == Quad::ONE {
        return Quad::ZERO;
    }
    let d = x - 1.0;
    if d.high.abs() < LN_SERIES_THRESHOLD {
        return ln_1p_series(d);
    }
    if let Some(exponent) = binary_exponent(x.high) {
        if exponent.abs() > LN_SCALING_EXPONENT {
            let mantissa = x.mul_pow2(-exponent);
            return ln_positive(mantissa) + Quad::LN_2 * f64::from(exponent);
        }
    }
    let y = Quad::from(x.high.ln());
    y + x * (-y).exp() - 1.0
}

/// `ln(1 + x)` of a finite value `x > -1`.
pub(super) fn ln_1p_above_minus_one(x: Quad) -> Quad {
    if x.high.abs() < LN_SERIES_THRESHOLD {
        ln_1p_series(x)
    } else {
        ln_positive(x + 1.0)
    }
}

impl Quad {
    /// Returns `e^self`.
    ///
    /// Overflows to infinity above `ln(f64::MAX)` and underflows to zero
    /// below about `-745`. Results in the subnormal range lose precision.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::{MathConstants, Quad};
    /// let e = Quad::ONE.exp();
    /// assert!((e - Quad::E).abs() < Quad::from(1e-31));
    /// ```
    pub fn exp(self) -> Quad {
        if self.high.is_nan() {
            return Quad::NAN;
        }
        if self.high == 0.0 {
            return Quad::ONE;
        }
        if self.high > EXP_OVERFLOW_THRESHOLD {
            return Quad::INFINITY;
        }
        if self.high < EXP_UNDERFLOW_THRESHOLD {
            return Quad::ZERO;
        }
        if self.high.abs() < EXP_SERIES_THRESHOLD {
            return exp_m1_series(self, EXP_DIRECT_TERMS) + 1.0;
        }
        let (k, s) = exp_m1_reduced(self);
        (s + 1.0).mul_pow2(k)
    }

    /// Returns `e^self - 1`, accurate even when `self` is close to zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// let tiny = Quad::from(1e-20);
    /// assert_eq!(tiny.exp_m1().high(), 1e-20);
    /// ```
    pub fn exp_m1(self) -> Quad {
        if self.high.is_nan() {
            return Quad::NAN;
        }
        if self.high == 0.0 {
            return self;
        }
        if self.high > EXP_OVERFLOW_THRESHOLD {
            return Quad::INFINITY;
        }
        if self.high < EXP_UNDERFLOW_THRESHOLD {
            return -Quad::ONE;
        }
        if self.high.abs() < EXP_SERIES_THRESHOLD {
            return exp_m1_series(self, EXP_DIRECT_TERMS);
        }
        let (k, s) = exp_m1_reduced(self);
        if k == 0 {
            s
        } else {
            (s + 1.0).mul_pow2(k) - 1.0
        }
    }

    /// Returns the natural logarithm.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `self <= 0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::{MathConstants, Quad};
    /// let ln2 = Quad::from(2.0).ln().unwrap();
    /// assert!((ln2 - Quad::LN_2).abs() < Quad::from(1e-31));
    /// assert!(Quad::ZERO.ln().is_err());
    /// ```
    pub fn ln(self) -> Result<Quad, DomainError> {
        if self.high.is_nan() {
            return Ok(Quad::NAN);
        }
        if self.high <= 0.0 {
            return Err(DomainError::out_of_domain("ln", self.high));
        }
        if self.high.is_infinite() {
            return Ok(Quad::INFINITY);
        }
        Ok(ln_positive(self))
    }

    /// Returns `ln(1 + self)`, accurate even when `self` is close to zero.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `self <= -1`.
    pub fn ln_1p(self) -> Result<Quad, DomainError> {
        if self.high.is_nan() {
            return Ok(Quad::NAN);
        }
        if self <= -Quad::ONE {
            return Err(DomainError::out_of_domain("ln_1p", self.high));
        }
        if self.high.is_infinite() {
            return Ok(Quad::INFINITY);
        }
        Ok(ln_1p_above_minus_one(self))
    }

    /// Returns the base 10 logarithm.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `self <= 0`.
    pub fn log10(self) -> Result<Quad, DomainError> {
        self.ln()
            .map(|ln| ln * Quad::LOG10_E)
            .map_err(|_| DomainError::out_of_domain("log10", self.high))
    }

    /// Returns the base 2 logarithm. Exact for powers of two.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `self <= 0`.
    pub fn log2(self) -> Result<Quad, DomainError> {
        const MANTISSA_MASK: u64 = 0x000f_ffff_ffff_ffff;
        if self.low == 0.0 && self.high > 0.0 && self.high.to_bits() & MANTISSA_MASK == 0 {
            if let Some(exponent) = binary_exponent(self.high) {
                return Ok(Quad::from(exponent));
            }
        }
        self.ln()
            .map(|ln| ln * Quad::LOG2_E)
            .map_err(|_| DomainError::out_of_domain("log2", self.high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::assert_quad_close;

    const EXP_CASES: &[(Quad, Quad)] = &[
        (Quad::from_raw(0.5, 0.0), Quad::from_raw(1.6487212707001282, -4.731568479435833e-17)),
        (Quad::from_raw(-0.5, 0.0), Quad::from_raw(0.6065306597126334, -6.593178415491414e-19)),
        (Quad::from_raw(0.0001, -4.79217360238593e-21), Quad::from_raw(1.0001000050001667, -4.326411477156449e-17)),
        (Quad::from_raw(-0.0003, -2.6281060661048628e-20), Quad::from_raw(0.9997000449955004, -2.122239413697994e-17)),
        (Quad::from_raw(0.00135999999, 7.91827803325873e-20), Quad::from_raw(1.0013609252093716, 5.0250250954829876e-17)),
        (Quad::from_raw(0.00136000001, -5.774159816951396e-20), Quad::from_raw(1.001360925229399, -4.438657453904375e-17)),
        (Quad::from_raw(-0.00135999999, -7.91827803325873e-20), Quad::from_raw(0.9986409243908863, -6.871350565909198e-18)),
        (Quad::from_raw(-0.00136000001, 5.774159816951396e-20), Quad::from_raw(0.9986409243709135, -2.4168264459004175e-17)),
        (Quad::from_raw(1.5, 0.0), Quad::from_raw(4.4816890703380645, 3.0481759556536343e-16)),
        (Quad::from_raw(2.5, 0.0), Quad::from_raw(12.182493960703473, 2.0334002173348147e-16)),
        (Quad::from_raw(10.1, 3.552713678800501e-16), Quad::from_raw(24343.00942440839, -9.451163961971471e-14)),
        (Quad::from_raw(-10.1, -3.552713678800501e-16), Quad::from_raw(4.107955522530071e-05, -2.0302221126094116e-21)),
        (Quad::from_raw(100.3, 2.842170943040401e-15), Quad::from_raw(3.628578599676542e43, 5.940004662229952e24)),
        (Quad::from_raw(-300.7, -1.1368683772161604e-14), Quad::from_raw(2.556520571425472e-131, -2.3367456543019175e-147)),
        (Quad::from_raw(600.25, 0.0), Quad::from_raw(4.844653964072874e260, -2.6703522180615434e244)),
    ];
    const EXP_M1_CASES: &[(Quad, Quad)] = &[
        (Quad::from_raw(1e-10, -3.643219731549774e-27), Quad::from_raw(1.00000000005e-10, -2.532064097923231e-28)),
        (Quad::from_raw(-1e-05, 8.180305391403131e-22), Quad::from_raw(-9.999950000166666e-06, 4.9227686444465254e-23)),
        (Quad::from_raw(0.001, -2.0816681711721686e-20), Quad::from_raw(0.0010005001667083417, 5.147932136792911e-21)),
        (Quad::from_raw(0.00135999999, 7.91827803325873e-20), Quad::from_raw(0.0013609252093716388, -5.672984849752742e-20)),
        (Quad::from_raw(0.00136000001, -5.774159816951396e-20), Quad::from_raw(0.0013609252293988571, 6.571453286193226e-20)),
        (Quad::from_raw(-0.00135999999, -7.91827803325873e-20), Quad::from_raw(-0.0013590756091137537, 6.754333799803e-20)),
        (Quad::from_raw(-0.00136000001, 5.774159816951396e-20), Quad::from_raw(-0.001359075629086572, -9.897622982597768e-20)),
        (Quad::from_raw(0.1, -5.551115123125783e-18), Quad::from_raw(0.10517091807564763, -4.3634432833579836e-18)),
        (Quad::from_raw(-0.3, -1.1102230246251566e-17), Quad::from_raw(-0.2591817793182821, -1.0030264962579836e-17)),
        (Quad::from_raw(1.0, 0.0), Quad::from_raw(1.7182818284590453, -7.747991575210629e-17)),
        (Quad::from_raw(-2.2, 1.7763568394002506e-16), Quad::from_raw(-0.8891968416376661, -1.4478701436213174e-17)),
        (Quad::from_raw(5.5, 0.0), Quad::from_raw(243.69193226422038, 4.129320187450839e-15)),
    ];
    const LN_CASES: &[(Quad, Quad)] = &[
        (Quad::from_raw(0.5, 0.0), Quad::from_raw(-0.6931471805599453, -2.3190468138462996e-17)),
        (Quad::from_raw(1.01, -8.881784197001253e-18), Quad::from_raw(0.009950330853168083, -4.938709121937865e-19)),
        (Quad::from_raw(0.97, 2.6645352591003756e-17), Quad::from_raw(-0.030459207484708546, 2.460360615971235e-19)),
        (Quad::from_raw(2.0, 0.0), Quad::from_raw(0.6931471805599453, 2.3190468138462996e-17)),
        (Quad::from_raw(10.0, 0.0), Quad::from_raw(2.302585092994046, -2.1707562233822494e-16)),
        (Quad::from_raw(1234.5678, -3.383320290595293e-14), Quad::from_raw(7.118476228297786, 3.5648756744626776e-17)),
        (Quad::from_raw(1e-50, -7.616223705782342e-68), Quad::from_raw(-115.12925464970229, 5.524710598710496e-15)),
        (Quad::from_raw(1e200, 3.0266877787489637e183), Quad::from_raw(460.51701859880916, -2.2098842394841984e-14)),
        (Quad::from_raw(3.3e-300, -1.98741646e-316), Quad::from_raw(-689.5816054297412, -5.41142619138957e-14)),
    ];
    const LN_1P_CASES: &[(Quad, Quad)] = &[
        (Quad::from_raw(1e-12, 2.0113352370744385e-29), Quad::from_raw(9.999999999995e-13, 4.433129247373665e-29)),
        (Quad::from_raw(-0.05, 2.7755575615628915e-18), Quad::from_raw(-0.051293294387550536, 3.068816776313428e-18)),
        (Quad::from_raw(0.04, -8.326672684688674e-19), Quad::from_raw(0.039220713153281295, 1.5641905007975499e-18)),
        (Quad::from_raw(0.5, 0.0), Quad::from_raw(0.4054651081081644, -2.8811380259626426e-18)),
        (Quad::from_raw(10.0, 0.0), Quad::from_raw(2.3978952727983707, -1.253584211423161e-16)),
        (Quad::from_raw(-0.9, 2.2204460492503132e-17), Quad::from_raw(-2.302585092994046, 2.1707562233822496e-16)),
    ];

    #[test]
    fn test_exp_reference_values() {
        for &(x, expected) in EXP_CASES {
            assert_quad_close(x.exp(), expected, -98);
        }
    }

    #[test]
    fn test_exp_m1_reference_values() {
        for &(x, expected) in EXP_M1_CASES {
            assert_quad_close(x.exp_m1(), expected, -99);
        }
    }

    #[test]
    fn test_ln_reference_values() {
        for &(x, expected) in LN_CASES {
            assert_quad_close(x.ln().unwrap(), expected, -99);
        }
    }

    #[test]
    fn test_ln_1p_reference_values() {
        for &(x, expected) in LN_1P_CASES {
            assert_quad_close(x.ln_1p().unwrap(), expected, -99);
        }
    }

    #[test]
    fn test_exp_special_values() {
        assert_eq!(Quad::ZERO.exp(), Quad::ONE);
        assert_eq!(Quad::from(-0.0).exp(), Quad::ONE);
        assert_eq!(Quad::from(710.0).exp(), Quad::INFINITY);
        assert_eq!(Quad::INFINITY.exp(), Quad::INFINITY);
        assert_eq!(Quad::from(-746.0).exp(), Quad::ZERO);
        assert_eq!(Quad::NEG_INFINITY.exp(), Quad::ZERO);
        assert!(Quad::NAN.exp().is_nan());
        assert!(Quad::from(709.5).exp().is_finite());
    }

    #[test]
    fn test_exp_m1_special_values() {
        let neg_zero = Quad::from(-0.0).exp_m1();
        assert!(neg_zero.high() == 0.0 && neg_zero.is_sign_negative());
        assert_eq!(Quad::NEG_INFINITY.exp_m1(), -Quad::ONE);
        assert_eq!(Quad::INFINITY.exp_m1(), Quad::INFINITY);
        assert!(Quad::NAN.exp_m1().is_nan());
        // e^-100 survives in the trailing term.
        let q = Quad::from(-100.0).exp_m1();
        assert_eq!(q.high(), -1.0);
        assert!(q.low() > 0.0);
    }

    #[test]
    fn test_exp_matches_reference_on_both_sides_of_series_cutoff() {
        let near_cutoff = |x: Quad| (x.high().abs() / EXP_SERIES_THRESHOLD - 1.0).abs() < 1e-6;
        let mut checked = 0;
        for &(x, expected) in EXP_CASES.iter().filter(|(x, _)| near_cutoff(*x)) {
            assert_quad_close(x.exp(), expected, -103);
            checked += 1;
        }
        for &(x, expected) in EXP_M1_CASES.iter().filter(|(x, _)| near_cutoff(*x)) {
            assert_quad_close(x.exp_m1(), expected, -103);
            checked += 1;
        }
        assert_eq!(checked, 8);
    }

    #[test]
    fn test_exp_is_continuous_at_series_cutoff() {
        for cutoff in [EXP_SERIES_THRESHOLD, -EXP_SERIES_THRESHOLD] {
            let below = Quad::from(cutoff * (1.0 - f64::EPSILON));
            let above = Quad::from(cutoff * (1.0 + f64::EPSILON));
            let step = above - below;
            // The derivative of both functions is `exp`.
            let slope = below.exp();
            assert_quad_close(above.exp() - below.exp(), step * slope, -40);
            assert_quad_close(above.exp_m1() - below.exp_m1(), step * slope, -40);
        }
    }

    #[test]
    fn test_ln_is_continuous_at_series_cutoff() {
        for cutoff in [1.0 + LN_SERIES_THRESHOLD, 1.0 - LN_SERIES_THRESHOLD] {
            let below = Quad::from(cutoff - 1e-15);
            let above = Quad::from(cutoff + 1e-15);
            let step = above - below;
            let ln_step = above.ln().unwrap() - below.ln().unwrap();
            assert_quad_close(ln_step * Quad::from(cutoff), step, -40);
        }
    }

    #[test]
    fn test_exp_ln_round_trip() {
        for x in [0.001, 0.3, 1.5, 10.0, 123.456, 1e100, 1e-100, 1e300, 1e-300] {
            let q = Quad::from(x);
            assert_quad_close(q.ln().unwrap().exp(), q, -94);
        }
    }

    #[test]
    fn test_ln_domain() {
        assert_eq!(Quad::ONE.ln(), Ok(Quad::ZERO));
        assert_eq!(
            Quad::from(-1.0).ln(),
            Err(DomainError::out_of_domain("ln", -1.0))
        );
        assert!(Quad::ZERO.ln().is_err());
        assert_eq!(Quad::INFINITY.ln(), Ok(Quad::INFINITY));
        assert!(Quad::NAN.ln().unwrap().is_nan());
    }

    #[test]
    fn test_ln_1p_domain() {
        assert!(Quad::from(-1.0).ln_1p().is_err());
        assert!(Quad::from(-2.0).ln_1p().is_err());
        assert_eq!(Quad::ZERO.ln_1p(), Ok(Quad::ZERO));
        let tiny = Quad::from(1e-30).ln_1p().unwrap();
        assert_quad_close(tiny, Quad::from(1e-30) - Quad::from(5e-61), -100);
    }

    #[test]
    fn test_log10_and_log2() {
        assert_quad_close(Quad::from(1000.0).log10().unwrap(), Quad::from(3.0), -100);
        assert_quad_close(Quad::from(1e-20).log10().unwrap(), Quad::from(-20.0), -100);
        assert_eq!(Quad::from(1024.0).log2(), Ok(Quad::from(10.0)));
        assert_eq!(Quad::from(0.125).log2(), Ok(Quad::from(-3.0)));
        assert_quad_close(Quad::from(3.0).log2().unwrap(), LOG2_3, -100);
        assert_eq!(
            Quad::from(-3.0).log2(),
            Err(DomainError::out_of_domain("log2", -3.0))
        );
        assert_eq!(
            Quad::ZERO.log10(),
            Err(DomainError::out_of_domain("log10", 0.0))
        );
    }

    const LOG2_3: Quad = Quad::from_raw(1.584962500721156, 1.0579781240112554e-16);
}
