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

//! # Multi-Double Core
//!
//! Foundational building blocks for double-double (`quad`) and quad-double
//! (`oct`) arithmetic. This crate contains everything that operates on plain
//! `f64` values; the multi-term value types themselves live in the
//! `multidouble` crate.
//!
//! ## Modules
//!
//! - `eft`: Error-free transforms (`two_sum`, `quick_two_sum`, `split`,
//!   `two_prod`) recovering the exact rounding error of a sum or product,
//!   plus exact power-of-two scaling.
//! - `expansion`: Exact non-overlapping expansions and the canonical
//!   renormalization into a fixed number of terms.
//! - `error`: The `DomainError` raised by operations applied outside their
//!   real domain.
//! - `num`: Associated-constant traits for mathematical constants and
//!   by-value checked operations reporting `DomainError`.
//!
//! ## Purpose
//!
//! These primitives are the only place where floating-point rounding error
//! is examined directly. Keeping them small, exact and well tested lets the
//! higher-level arithmetic be expressed purely in terms of them.

pub mod eft;
pub mod error;
pub mod expansion;
pub mod num;
