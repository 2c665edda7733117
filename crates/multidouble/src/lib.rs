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

//! # Multi-Double
//!
//! **Extended-precision floating-point arithmetic built from native doubles.**
//!
//! A value is stored as an unevaluated sum of non-overlapping `f64` terms.
//! Two terms (`Quad`) carry about 106 significant bits, four terms (`Oct`)
//! about 212. Every operation is expressed through the error-free transforms
//! and renormalization of `multidouble_core`, so results are reproducible on
//! any IEEE-754 platform with round-to-nearest.
//!
//! ## Architecture
//!
//! * **`quad`**: The double-double type with arithmetic, exponentials,
//!   logarithms, powers, trigonometric and hyperbolic functions.
//! * **`oct`**: The quad-double type with arithmetic, `sqrt` and `powi`.
//! * **`numeric`**: The `MultiDouble` trait shared by both value types.
//! * **`format`**: Decimal scientific formatting (`Display`, `LowerExp`).
//!
//! ## Example
//!
//! ```rust
//! use multidouble::{MathConstants, Quad};
//!
//! let x = Quad::PI.sin();
//! assert!(x.abs() < Quad::EPSILON);
//! assert_eq!(format!("{:.20e}", Quad::PI), "3.14159265358979323846e+00");
//! ```

mod constants;
mod format;
mod interop;
mod numeric;
mod oct;
mod quad;

#[cfg(test)]
mod test_support;

pub use format::to_scientific;
pub use multidouble_core::{error::DomainError, num::constants::MathConstants};
pub use numeric::MultiDouble;
pub use oct::Oct;
pub use quad::Quad;
