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

//! # Multi-Double Calculator
//!
//! Evaluates one operation over every row of a CSV file of multi-double
//! operands and writes the results as hexadecimal terms, one value per line.
//! The wall time of the evaluation loop (excluding file I/O) is printed to
//! stdout as `Time: <ms> ms`.
//!
//! ```text
//! multidouble-calc [-v] [--precision quad|oct] <OPERATION> <INPUT> <OUTPUT>
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG` when no `-v` is given.

use clap::{Parser, ValueEnum};
use multidouble::{Oct, Quad};
use std::{fmt::Display, path::PathBuf, time::Instant};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

mod hexfloat;
mod loading;
mod operation;

use loading::{CalcLoaderError, OperandLoader, write_values_to_path};
use operation::{Evaluate, EvaluationError, Operation, evaluate_rows};

/// Evaluate quad and oct operations over CSV files of hexadecimal terms
#[derive(Parser)]
#[command(name = "multidouble-calc")]
#[command(version)]
#[command(about = "Evaluate quad and oct operations over CSV files of hexadecimal terms")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Precision of operands and results
    #[arg(short, long, value_enum, default_value_t = Precision::Quad)]
    precision: Precision,

    /// Operation to evaluate
    #[arg(value_enum)]
    operation: Operation,

    /// CSV file with one row of operands per line
    input: PathBuf,

    /// CSV file receiving one result per line
    output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Precision {
    /// Double-double, two terms per value
    Quad,
    /// Quad-double, four terms per value
    Oct,
}

/// The error type of a calculator run.
#[derive(Debug)]
enum CalcError {
    Load(CalcLoaderError),
    Evaluation(EvaluationError),
}

impl Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(e) => write!(f, "{e}"),
            Self::Evaluation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CalcError {}

impl From<CalcLoaderError> for CalcError {
    fn from(e: CalcLoaderError) -> Self {
        Self::Load(e)
    }
}

impl From<EvaluationError> for CalcError {
    fn from(e: EvaluationError) -> Self {
        Self::Evaluation(e)
    }
}

fn run<T: Evaluate>(cli: &Cli) -> Result<(), CalcError> {
    if !T::supports(cli.operation) {
        return Err(EvaluationError::Unsupported(cli.operation).into());
    }

    let rows = OperandLoader::<T>::new(cli.operation.arity()).from_path(&cli.input)?;
    info!(
        rows = rows.len(),
        operation = %cli.operation,
        precision = T::PRECISION_NAME,
        "Loaded operands from {}",
        cli.input.display()
    );

    let start = Instant::now();
    let results = evaluate_rows(cli.operation, &rows)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    println!("Time: {elapsed_ms:.3e} ms");

    write_values_to_path(&cli.output, &results)?;
    debug!("Wrote {} results to {}", results.len(), cli.output.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.precision {
        Precision::Quad => run::<Quad>(&cli),
        Precision::Oct => run::<Oct>(&cli),
    };
    if let Err(e) = outcome {
        error!("{e}");
        std::process::exit(1);
    }
}
