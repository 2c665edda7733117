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

use crate::error::DomainError;
use core::ops::Div;

/// A trait for types that support checked division by value.
///
/// Division by an exact zero is reported as [`DomainError::DivisionByZero`].
/// NaN operands propagate without error.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::num::ops::checked_arithmetic::CheckedDivVal;
/// # use multidouble_core::error::DomainError;
/// assert_eq!(1.0_f64.checked_div_val(4.0), Ok(0.25));
/// assert_eq!(1.0_f64.checked_div_val(-0.0), Err(DomainError::DivisionByZero));
/// ```
pub trait CheckedDivVal: Sized + Div<Self, Output = Self> {
    /// Performs checked division by value.
    fn checked_div_val(self, v: Self) -> Result<Self, DomainError>;
}

/// A trait for types that support a checked square root.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::num::ops::checked_arithmetic::CheckedSqrtVal;
/// assert_eq!(4.0_f64.checked_sqrt_val(), Ok(2.0));
/// assert!((-4.0_f64).checked_sqrt_val().is_err());
/// ```
pub trait CheckedSqrtVal: Sized {
    /// Computes the square root, failing for negative arguments.
    fn checked_sqrt_val(self) -> Result<Self, DomainError>;
}

/// A trait for types that support a checked natural logarithm.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::num::ops::checked_arithmetic::CheckedLnVal;
/// assert_eq!(1.0_f64.checked_ln_val(), Ok(0.0));
/// assert!(0.0_f64.checked_ln_val().is_err());
/// ```
pub trait CheckedLnVal: Sized {
    /// Computes the natural logarithm, failing for arguments `<= 0`.
    fn checked_ln_val(self) -> Result<Self, DomainError>;
}

/// A trait for types that support checked integer powers.
///
/// # Examples
///
/// ```rust
/// # use multidouble_core::num::ops::checked_arithmetic::CheckedPowiVal;
/// assert_eq!(2.0_f64.checked_powi_val(-2), Ok(0.25));
/// assert!(0.0_f64.checked_powi_val(-1).is_err());
/// ```
pub trait CheckedPowiVal: Sized {
    /// Raises to an integer power, failing for a zero base with a negative exponent.
    fn checked_powi_val(self, n: i32) -> Result<Self, DomainError>;
}

macro_rules! checked_float_impl {
    ($t:ty) => {
        impl CheckedDivVal for $t {
            #[inline]
            fn checked_div_val(self, v: $t) -> Result<$t, DomainError> {
                if v == 0.0 {
                    Err(DomainError::DivisionByZero)
                } else {
                    Ok(self / v)
                }
            }
        }

        impl CheckedSqrtVal for $t {
            #[inline]
            fn checked_sqrt_val(self) -> Result<$t, DomainError> {
                if self < 0.0 {
                    Err(DomainError::out_of_domain("sqrt", f64::from(self)))
                } else {
                    Ok(self.sqrt())
                }
            }
        }

        impl CheckedLnVal for $t {
            #[inline]
            fn checked_ln_val(self) -> Result<$t, DomainError> {
                if self <= 0.0 {
                    Err(DomainError::out_of_domain("ln", f64::from(self)))
                } else {
                    Ok(self.ln())
                }
            }
        }

        impl CheckedPowiVal for $t {
            #[inline]
            fn checked_powi_val(self, n: i32) -> Result<$t, DomainError> {
                if self == 0.0 && n < 0 {
                    Err(DomainError::DivisionByZero)
                } else {
                    Ok(self.powi(n))
                }
            }
        }
    };
}

checked_float_impl!(f32);
checked_float_impl!(f64);
