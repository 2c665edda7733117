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

//! Integer rounding for `Quad`.
//!
//! When `high` is already an integer the fractional part lives entirely in
//! `low`, so only `low` is rounded.

use super::Quad;
use multidouble_core::eft::quick_two_sum;

impl Quad {
    fn round_with(self, round: fn(f64) -> f64) -> Quad {
        if !self.is_finite() {
            return self;
        }
        let high = round(self.high);
        if high != self.high {
            return Quad::from_raw(high, 0.0);
        }
        let (high, low) = quick_two_sum(high, round(self.low));
        Quad::from_raw(high, low)
    }

    /// Returns the largest integer less than or equal to `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// let x = Quad::new(3.0, -1e-20);
    /// assert_eq!(x.floor(), Quad::from(2.0));
    /// ```
    pub fn floor(self) -> Quad {
        self.round_with(f64::floor)
    }

    /// Returns the smallest integer greater than or equal to `self`.
    pub fn ceil(self) -> Quad {
        self.round_with(f64::ceil)
    }

    /// Returns the integer part of `self`.
    pub fn trunc(self) -> Quad {
        if self.high >= 0.0 {
            self.floor()
        } else {
            self.ceil()
        }
    }

    /// Returns the nearest integer, rounding halfway cases away from zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble::Quad;
    /// assert_eq!(Quad::from(-2.5).round(), Quad::from(-3.0));
    /// assert_eq!(Quad::new(2.5, -1e-20).round(), Quad::from(2.0));
    /// ```
    pub fn round(self) -> Quad {
        if !self.is_finite() {
            return self;
        }
        let high = self.high.round();
        if high != self.high {
            // On a tie of `high` the trailing term decides the nearer neighbour.
            let is_tie = (high - self.high).abs() == 0.5;
            let high = if is_tie && self.low > 0.0 {
                self.high.ceil()
            } else if is_tie && self.low < 0.0 {
                self.high.floor()
            } else {
                high
            };
            return Quad::from_raw(high, 0.0);
        }
        let low = if (self.low - self.low.trunc()).abs() == 0.5 {
            if self.high > 0.0 {
                self.low.ceil()
            } else if self.high < 0.0 {
                self.low.floor()
            } else {
                self.low.round()
            }
        } else {
            self.low.round()
        };
        let (high, low) = quick_two_sum(high, low);
        Quad::from_raw(high, low)
    }
}
