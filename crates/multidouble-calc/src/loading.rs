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

//! Reading operand rows and writing result rows.
//!
//! Both files are plain CSV. An input row holds `arity` multi-double
//! operands, each spelled as its `T::TERMS` terms in order, so a binary quad
//! operation reads four columns per line and a unary oct operation reads
//! four as well. Terms may be hexadecimal (`0x1.8p+1`) or decimal literals and
//! must be finite; they are renormalized on load, so any split of the value
//! is accepted. Blank lines and lines starting with `#` are skipped.
//!
//! Result rows hold the `T::TERMS` terms of one value in `%.13a` notation,
//! which reproduces every bit when read back.

use crate::hexfloat::{ParseFloatError, format_hex, parse_f64};
use multidouble::MultiDouble;
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    marker::PhantomData,
    path::Path,
};

/// The error type for reading operands and writing results.
#[derive(Debug)]
pub enum CalcLoaderError {
    /// An I/O error occurred while reading or writing a stream.
    Io(std::io::Error),
    /// A term could not be parsed as a floating-point literal.
    Parse {
        /// One-based line number.
        line: usize,
        /// The underlying parse failure.
        source: ParseFloatError,
    },
    /// A term parsed to NaN or an infinity.
    NonFinite {
        /// One-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A row does not hold `arity * T::TERMS` columns.
    ColumnCount {
        /// One-based line number.
        line: usize,
        /// Required number of columns.
        expected: usize,
        /// Number of columns found.
        found: usize,
    },
}

impl Display for CalcLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse { line, source } => write!(f, "Parse error on line {line}: {source}"),
            Self::NonFinite { line, token } => {
                write!(f, "Non-finite value '{token}' on line {line}")
            }
            Self::ColumnCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "Line {line} has {found} columns, but {expected} were expected"
            ),
        }
    }
}

impl std::error::Error for CalcLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CalcLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Loads rows of `arity` operands of type `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandLoader<T> {
    arity: usize,
    _marker: PhantomData<T>,
}

impl<T: MultiDouble> OperandLoader<T> {
    /// Creates a loader for rows of `arity` operands.
    #[inline]
    pub fn new(arity: usize) -> Self {
        Self {
            arity,
            _marker: PhantomData,
        }
    }

    /// Returns the number of columns per row.
    #[inline]
    pub fn columns(&self) -> usize {
        self.arity * T::TERMS
    }

    /// Loads all rows from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Vec<Vec<T>>, CalcLoaderError> {
        let mut rows = Vec::new();
        let mut terms = Vec::with_capacity(self.columns());
        for (index, line) in rdr.lines().enumerate() {
            let line = line?;
            let content = line.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }
            let line = index + 1;

            terms.clear();
            for token in content.split(',') {
                let value =
                    parse_f64(token).map_err(|source| CalcLoaderError::Parse { line, source })?;
                if !value.is_finite() {
                    return Err(CalcLoaderError::NonFinite {
                        line,
                        token: token.trim().to_string(),
                    });
                }
                terms.push(value);
            }
            if terms.len() != self.columns() {
                return Err(CalcLoaderError::ColumnCount {
                    line,
                    expected: self.columns(),
                    found: terms.len(),
                });
            }

            rows.push(terms.chunks_exact(T::TERMS).map(T::from_terms).collect());
        }
        Ok(rows)
    }

    /// Loads all rows from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Vec<T>>, CalcLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }
}

/// Writes one row per value, holding its terms in hexadecimal.
pub fn write_values<W: Write, T: MultiDouble>(
    mut writer: W,
    values: &[T],
) -> Result<(), CalcLoaderError> {
    for &value in values {
        let row = (0..T::TERMS)
            .map(|i| format_hex(value.term(i)))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{row}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the values to a newly created file at `path`.
pub fn write_values_to_path<P: AsRef<Path>, T: MultiDouble>(
    path: P,
    values: &[T],
) -> Result<(), CalcLoaderError> {
    let file = File::create(path)?;
    write_values(BufWriter::new(file), values)
}
