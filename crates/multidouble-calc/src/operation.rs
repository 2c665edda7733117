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

//! The operations understood by the calculator and their evaluation.
//!
//! Every operation is spelled the way the integration scripts name it
//! (`operator+`, `expm1`, `pow_int`, ...); the Rust method names are accepted
//! as aliases. `Quad` supports all of them, `Oct` only arithmetic, `abs`,
//! `sqrt`, `pow_int` and the rounding functions.

use clap::ValueEnum;
use multidouble::{DomainError, MultiDouble, Oct, Quad};
use std::fmt::Display;
use tracing::warn;

/// A calculator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    #[value(name = "operator+", alias = "add")]
    Add,
    #[value(name = "operator-", alias = "sub")]
    Sub,
    #[value(name = "operator*", alias = "mul")]
    Mul,
    #[value(name = "operator/", alias = "div")]
    Div,
    Abs,
    Sqrt,
    Exp,
    #[value(name = "expm1", alias = "exp_m1")]
    ExpM1,
    #[value(name = "log", alias = "ln")]
    Ln,
    #[value(name = "log1p", alias = "ln_1p")]
    Ln1p,
    Log10,
    Log2,
    #[value(name = "pow", alias = "powf")]
    Pow,
    #[value(name = "pow_int", alias = "powi")]
    PowInt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Floor,
    Ceil,
    Trunc,
    Round,
}

impl Operation {
    /// Returns the number of operands.
    pub fn arity(self) -> usize {
        match self {
            Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::Pow
            | Self::PowInt
            | Self::Atan2 => 2,
            _ => 1,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{self:?}"),
        }
    }
}

/// The error returned when an operation cannot produce a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvaluationError {
    /// The operands lie outside the domain of the operation.
    Domain(DomainError),
    /// The operation is not available at this precision.
    Unsupported(Operation),
    /// The number of operands does not match the arity of the operation.
    Arity {
        /// The operation being evaluated.
        operation: Operation,
        /// Number of operands supplied.
        found: usize,
    },
}

impl Display for EvaluationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Unsupported(operation) => {
                write!(f, "Operation {operation} is not supported at this precision")
            }
            Self::Arity { operation, found } => write!(
                f,
                "Operation {operation} takes {} operands, but {found} were given",
                operation.arity()
            ),
        }
    }
}

impl std::error::Error for EvaluationError {}

impl From<DomainError> for EvaluationError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

/// A multi-double type the calculator can evaluate operations on.
pub trait Evaluate: MultiDouble {
    /// Name of the precision in messages.
    const PRECISION_NAME: &'static str;

    /// Returns whether `operation` is available for this type.
    fn supports(operation: Operation) -> bool;

    /// Applies `operation` to `args`.
    fn evaluate(operation: Operation, args: &[Self]) -> Result<Self, EvaluationError>;
}

impl Evaluate for Quad {
    const PRECISION_NAME: &'static str = "quad";

    fn supports(_operation: Operation) -> bool {
        true
    }

    fn evaluate(operation: Operation, args: &[Quad]) -> Result<Quad, EvaluationError> {
        let value = match (operation, args) {
            (Operation::Add, &[x, y]) => x + y,
            (Operation::Sub, &[x, y]) => x - y,
            (Operation::Mul, &[x, y]) => x * y,
            (Operation::Div, &[x, y]) => x.checked_div(y)?,
            (Operation::Abs, &[x]) => x.abs(),
            (Operation::Sqrt, &[x]) => x.sqrt()?,
            (Operation::Exp, &[x]) => x.exp(),
            (Operation::ExpM1, &[x]) => x.exp_m1(),
            (Operation::Ln, &[x]) => x.ln()?,
            (Operation::Ln1p, &[x]) => x.ln_1p()?,
            (Operation::Log10, &[x]) => x.log10()?,
            (Operation::Log2, &[x]) => x.log2()?,
            (Operation::Pow, &[x, y]) => x.powf(y)?,
            (Operation::PowInt, &[x, y]) => x.powi(y.high() as i32)?,
            (Operation::Sin, &[x]) => x.sin(),
            (Operation::Cos, &[x]) => x.cos(),
            (Operation::Tan, &[x]) => x.tan(),
            (Operation::Asin, &[x]) => x.asin()?,
            (Operation::Acos, &[x]) => x.acos()?,
            (Operation::Atan, &[x]) => x.atan(),
            (Operation::Atan2, &[y, x]) => y.atan2(x),
            (Operation::Sinh, &[x]) => x.sinh(),
            (Operation::Cosh, &[x]) => x.cosh(),
            (Operation::Tanh, &[x]) => x.tanh(),
            (Operation::Asinh, &[x]) => x.asinh(),
            (Operation::Acosh, &[x]) => x.acosh()?,
            (Operation::Atanh, &[x]) => x.atanh()?,
            (Operation::Floor, &[x]) => x.floor(),
            (Operation::Ceil, &[x]) => x.ceil(),
            (Operation::Trunc, &[x]) => x.trunc(),
            (Operation::Round, &[x]) => x.round(),
            _ => {
                return Err(EvaluationError::Arity {
                    operation,
                    found: args.len(),
                });
            }
        };
        Ok(value)
    }
}

impl Evaluate for Oct {
    const PRECISION_NAME: &'static str = "oct";

    fn supports(operation: Operation) -> bool {
        matches!(
            operation,
            Operation::Add
                | Operation::Sub
                | Operation::Mul
                | Operation::Div
                | Operation::Abs
                | Operation::Sqrt
                | Operation::PowInt
                | Operation::Floor
                | Operation::Ceil
                | Operation::Trunc
        )
    }

    fn evaluate(operation: Operation, args: &[Oct]) -> Result<Oct, EvaluationError> {
        if !Self::supports(operation) {
            return Err(EvaluationError::Unsupported(operation));
        }
        let value = match (operation, args) {
            (Operation::Add, &[x, y]) => x + y,
            (Operation::Sub, &[x, y]) => x - y,
            (Operation::Mul, &[x, y]) => x * y,
            (Operation::Div, &[x, y]) => x.checked_div(y)?,
            (Operation::Abs, &[x]) => x.abs(),
            (Operation::Sqrt, &[x]) => x.sqrt()?,
            (Operation::PowInt, &[x, y]) => x.powi(y.to_f64() as i32)?,
            (Operation::Floor, &[x]) => x.floor(),
            (Operation::Ceil, &[x]) => x.ceil(),
            (Operation::Trunc, &[x]) => x.trunc(),
            _ => {
                return Err(EvaluationError::Arity {
                    operation,
                    found: args.len(),
                });
            }
        };
        Ok(value)
    }
}

/// Evaluates `operation` on every row.
///
/// Rows whose operands fall outside the domain produce NaN and a warning;
/// the remaining rows are still evaluated. Other errors abort.
pub fn evaluate_rows<T: Evaluate>(
    operation: Operation,
    rows: &[Vec<T>],
) -> Result<Vec<T>, EvaluationError> {
    let nan = T::from(f64::NAN);
    rows.iter()
        .enumerate()
        .map(|(row, args)| match T::evaluate(operation, args) {
            Err(EvaluationError::Domain(e)) => {
                warn!(row, %operation, error = %e, "Domain error, writing NaN");
                Ok(nan)
            }
            result => result,
        })
        .collect()
}
