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

//! Domain errors of extended-precision arithmetic.

use std::fmt::Display;

/// The error raised when an operation is applied outside of its real
/// domain.
///
/// Overflow to infinity, underflow to zero and loss of trailing terms are
/// ordinary floating-point behavior and never produce this error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    /// The divisor of a division, or the base of a negative power, is exactly zero.
    DivisionByZero,
    /// A function was called with an argument outside of its real domain.
    OutOfDomain {
        /// Name of the function (e.g. `"sqrt"`).
        function: &'static str,
        /// Leading term of the offending argument.
        argument: f64,
    },
}

impl DomainError {
    /// Creates an [`DomainError::OutOfDomain`] error.
    #[inline]
    pub fn out_of_domain(function: &'static str, argument: f64) -> Self {
        Self::OutOfDomain { function, argument }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::OutOfDomain { function, argument } => {
                write!(f, "Argument {argument:e} is outside the domain of {function}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DomainError::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(
            DomainError::out_of_domain("sqrt", -2.0).to_string(),
            "Argument -2e0 is outside the domain of sqrt"
        );
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(DomainError::DivisionByZero);
        assert!(err.source().is_none());
    }
}
