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

/// A trait for types that provide mathematical constants rounded to their
/// own precision.
///
/// For multi-double types every constant is the canonical split of the true
/// value, so `PI` of a quad is the nearest double to π followed by the
/// nearest double to the remainder.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::num::constants::MathConstants;
/// assert_eq!(<f64 as MathConstants>::PI, std::f64::consts::PI);
/// ```
pub trait MathConstants: Sized {
    /// Archimedes' constant π.
    const PI: Self;
    /// π/2.
    const FRAC_PI_2: Self;
    /// π/4.
    const FRAC_PI_4: Self;
    /// The full circle constant τ = 2π.
    const TAU: Self;
    /// Euler's number e.
    const E: Self;
    /// ln(2).
    const LN_2: Self;
    /// ln(10).
    const LN_10: Self;
    /// log2(e).
    const LOG2_E: Self;
    /// log10(e).
    const LOG10_E: Self;
    /// sqrt(2).
    const SQRT_2: Self;
    /// 1/sqrt(2).
    const FRAC_1_SQRT_2: Self;
}

macro_rules! impl_math_constants_for {
    ($t:ident) => {
        impl MathConstants for $t {
            const PI: Self = std::$t::consts::PI;
            const FRAC_PI_2: Self = std::$t::consts::FRAC_PI_2;
            const FRAC_PI_4: Self = std::$t::consts::FRAC_PI_4;
            const TAU: Self = std::$t::consts::TAU;
            const E: Self = std::$t::consts::E;
            const LN_2: Self = std::$t::consts::LN_2;
            const LN_10: Self = std::$t::consts::LN_10;
            const LOG2_E: Self = std::$t::consts::LOG2_E;
            const LOG10_E: Self = std::$t::consts::LOG10_E;
            const SQRT_2: Self = std::$t::consts::SQRT_2;
            const FRAC_1_SQRT_2: Self = std::$t::consts::FRAC_1_SQRT_2;
        }
    };
}

impl_math_constants_for!(f32);
impl_math_constants_for!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn circle_area<T>(r: T) -> T
    where
        T: MathConstants + std::ops::Mul<Output = T> + Copy,
    {
        T::PI * r * r
    }

    #[test]
    fn test_generic_access() {
        assert_eq!(circle_area(1.0_f64), std::f64::consts::PI);
        assert_eq!(circle_area(2.0_f32), 4.0 * std::f32::consts::PI);
    }

    #[test]
    fn test_f64_relations() {
        assert_eq!(<f64 as MathConstants>::TAU, 2.0 * <f64 as MathConstants>::PI);
        assert_eq!(<f64 as MathConstants>::FRAC_PI_2 * 2.0, <f64 as MathConstants>::PI);
        assert!((<f64 as MathConstants>::LN_2 * <f64 as MathConstants>::LOG2_E - 1.0).abs() < 1e-15);
    }
}
