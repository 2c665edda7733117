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

//! Exact floating-point expansions and canonical renormalization.
//!
//! An expansion is an unevaluated sum of doubles. This module keeps
//! expansions in the non-overlapping, increasing-magnitude form produced by
//! Shewchuk's grow-expansion, which represents the sum of its inputs without
//! any rounding, and then extracts the canonical multi-double terms from it.
//!
//! The canonical form is the greedy nearest split: the leading term is the
//! double nearest to the exact value (ties to even), and every following term
//! is the double nearest to what remains. Results therefore depend only on
//! the exact value of the inputs, never on their order or grouping.

use smallvec::SmallVec;

use crate::eft::{mul_pow2, two_sum};

/// Inline capacity of an expansion; larger expansions spill to the heap.
const INLINE_TERMS: usize = 16;

/// Inputs at least this large are scaled down by `2^OVERFLOW_SCALE` while
/// renormalizing.
const OVERFLOW_GUARD: f64 = 6.696928794914171e299; // 2^996

/// Binary exponent of the scaling applied near the overflow threshold.
const OVERFLOW_SCALE: i32 = 64;

/// Maximum number of one-ulp corrections applied when rounding an expansion
/// to its nearest double. A single correction always suffices when the
/// initial estimate is the recursive sum of the components.
const MAX_ROUNDING_CORRECTIONS: usize = 2;

/// A non-overlapping expansion stored in order of increasing magnitude,
/// without zero components.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expansion {
    components: SmallVec<[f64; INLINE_TERMS]>,
}

impl Expansion {
    /// Creates an empty expansion representing zero.
    #[inline]
    pub fn new() -> Self {
        Self {
            components: SmallVec::new(),
        }
    }

    /// Creates the exact expansion of the sum of `terms`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multidouble_core::expansion::Expansion;
    /// let e = Expansion::from_terms(&[1.0, 1e-30, -1.0]);
    /// assert_eq!(e.components(), &[1e-30]);
    /// ```
    pub fn from_terms(terms: &[f64]) -> Self {
        let mut expansion = Self::new();
        for &term in terms {
            expansion.grow(term);
        }
        expansion
    }

    /// Returns the components in order of increasing magnitude.
    #[inline]
    pub fn components(&self) -> &[f64] {
        &self.components
    }

    /// Returns `true` if the expansion represents exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the sign of the exact value: `-1`, `0` or `1`.
    ///
    /// The largest component dominates the sum of all others.
    #[inline]
    pub fn signum(&self) -> i32 {
        match self.components.last() {
            None => 0,
            Some(&x) if x > 0.0 => 1,
            Some(_) => -1,
        }
    }

    /// Adds `x` to the expansion without rounding (grow-expansion with zero
    /// elimination).
    pub fn grow(&mut self, x: f64) {
        if x == 0.0 {
            return;
        }
        let mut q = x;
        let mut write = 0;
        for read in 0..self.components.len() {
            let (sum, err) = two_sum(q, self.components[read]);
            q = sum;
            if err != 0.0 {
                self.components[write] = err;
                write += 1;
            }
        }
        self.components.truncate(write);
        if q != 0.0 {
            self.components.push(q);
        }
    }

    /// Returns the recursive floating-point sum of the components, smallest
    /// first. This is within one ulp of the exact value.
    #[inline]
    pub fn estimate(&self) -> f64 {
        self.components.iter().fold(0.0, |acc, &x| acc + x)
    }

    /// Removes the double nearest to the exact value from the expansion and
    /// returns it. Ties are resolved to the double with an even mantissa.
    pub fn take_nearest(&mut self) -> f64 {
        let mut nearest = self.estimate();
        self.grow(-nearest);

        for _ in 0..MAX_ROUNDING_CORRECTIONS {
            let direction = self.signum();
            if direction == 0 {
                break;
            }
            let neighbour = next_toward(nearest, direction > 0);
            if !neighbour.is_finite() {
                break;
            }
            let gap = neighbour - nearest;

            // Compare the remainder against half the gap to the neighbour.
            let mut beyond_half = self.clone();
            beyond_half.grow(-0.5 * gap);
            let side = beyond_half.signum();
            let odd = nearest.to_bits() & 1 == 1;
            if side == direction || (side == 0 && odd) {
                nearest = neighbour;
                self.grow(-gap);
            } else {
                break;
            }
        }
        nearest
    }
}

/// Returns the double adjacent to the finite `x` in the direction of positive
/// infinity (`up == true`) or negative infinity.
#[inline]
fn next_toward(x: f64, up: bool) -> f64 {
    if x == 0.0 {
        let tiny = f64::from_bits(1);
        return if up { tiny } else { -tiny };
    }
    let bits = x.to_bits();
    if (x > 0.0) == up {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Renormalizes an unevaluated sum of doubles into `N` canonical terms.
///
/// The result is non-overlapping with strictly decreasing magnitude: each
/// term is the double nearest to the exact remaining value, so the result
/// matches the greedy nearest split used by high-precision reference tools.
/// Components beyond the `N`th are discarded, which bounds the relative loss
/// by roughly `2^(-53 N)`.
///
/// If an input is infinite or NaN, the first term holds the floating-point
/// sum of the inputs and the remaining terms are zero. Finite inputs whose
/// exact sum overflows give a signed infinity in the same way, while partial
/// sums beyond `f64::MAX` are harmless as long as the exact value is finite.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::expansion::renormalize;
/// let terms: [f64; 4] = renormalize(&[1e-40, 1.0, 1e-20, -1.0]);
/// assert_eq!(terms, [1e-20, 1e-40, 0.0, 0.0]);
///
/// let terms: [f64; 2] = renormalize(&[f64::MAX, f64::MAX, -f64::MAX]);
/// assert_eq!(terms, [f64::MAX, 0.0]);
/// ```
pub fn renormalize<const N: usize>(terms: &[f64]) -> [f64; N] {
    let mut result = [0.0; N];
    if N == 0 {
        return result;
    }
    if terms.iter().any(|t| !t.is_finite()) {
        result[0] = terms.iter().fold(0.0, |acc, &x| acc + x);
        return result;
    }

    // Near the overflow threshold the expansion is built on scaled inputs so
    // that no partial sum overflows. Only bits below 2^-1010 are lost.
    let largest = terms.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()));
    let scale = if largest >= OVERFLOW_GUARD { OVERFLOW_SCALE } else { 0 };

    let mut expansion = Expansion::new();
    for &term in terms {
        expansion.grow(mul_pow2(term, -scale));
    }
    if expansion.is_zero() {
        // Only a sum of negative zeros is `-0.0`; any other exact cancellation is `+0.0`.
        let negative = !terms.is_empty() && terms.iter().all(|t| t.is_sign_negative());
        result[0] = if negative { -0.0 } else { 0.0 };
        return result;
    }
    for slot in result.iter_mut() {
        if expansion.is_zero() {
            break;
        }
        *slot = mul_pow2(expansion.take_nearest(), scale);
    }
    if result[0].is_infinite() {
        result[1..].fill(0.0);
    }
    result
}
