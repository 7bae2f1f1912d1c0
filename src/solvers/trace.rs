//! Iteration trace and run-result plumbing shared by every iterative
//! algorithm in the crate.
//!
//! A run appends exactly one `TraceRow` per loop pass; a converged run of
//! length K carries K rows, a failed run carries the partial trace produced
//! before the failure. Failures are typed values, never panics: the
//! `SolverError` kind plus the partial trace cross the library boundary
//! together.

use crate::utils::fmt::format_value;
use nalgebra::DVector;
use tabled::{builder::Builder, settings::Style};
use thiserror::Error;

/// Failure taxonomy for the whole engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("f(a) and f(b) must have opposite signs on the bracket")]
    InvalidBracket,
    #[error("difference f(x_i) - f(x_i-1) is too small, the secant step degenerates")]
    DegenerateSecant,
    #[error("derivative is near zero at the current iterate")]
    NearZeroDerivative,
    #[error("diagonal element A[{0}][{0}] is zero")]
    SingularPivot(usize),
    #[error("relaxation factor omega must lie in (0, 2), got {0}")]
    InvalidRelaxationFactor(f64),
    #[error("Vandermonde matrix is singular")]
    SingularMatrix,
    #[error("duplicate x value among interpolation points")]
    DuplicateXValue,
    #[error("maximum number of iterations reached without convergence")]
    MaxIterationsExceeded,
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// One iteration record: 1-based index, the algorithm's state values in
/// column order, and a non-negative error estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRow {
    pub iteration: usize,
    pub values: Vec<f64>,
    pub error: f64,
}

/// Ordered, append-only log of per-iteration records.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationTrace {
    headers: Vec<String>,
    rows: Vec<TraceRow>,
}

impl IterationTrace {
    /// Column names for the state values; "iter" and "error" columns are
    /// implicit.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        IterationTrace {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, iteration: usize, values: Vec<f64>, error: f64) {
        self.rows.push(TraceRow {
            iteration,
            values,
            error,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    pub fn last(&self) -> Option<&TraceRow> {
        self.rows.last()
    }

    /// Renders the trace as a display table, every number going through the
    /// display contract formatter.
    pub fn render_table(&self) -> String {
        let mut builder = Builder::default();
        let mut header = vec!["iter".to_string()];
        header.extend(self.headers.iter().cloned());
        header.push("error".to_string());
        builder.push_record(header);
        for row in &self.rows {
            let mut record = vec![row.iteration.to_string()];
            record.extend(row.values.iter().map(|v| format_value(*v)));
            record.push(format_value(row.error));
            builder.push_record(record);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}

/// Relative error between consecutive scalar iterates:
/// |cur - prev| / |cur| when cur != 0, else 0.
pub fn relative_error(cur: f64, prev: f64) -> f64 {
    if cur != 0.0 {
        ((cur - prev) / cur).abs()
    } else {
        0.0
    }
}

/// Converged root-finder run. `derivative` carries the printable form of f'
/// for Newton; the other methods leave it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RootSolution {
    pub root: f64,
    pub trace: IterationTrace,
    pub derivative: Option<String>,
}

/// Failed root-finder run with the partial trace accumulated so far.
#[derive(Debug, Clone, PartialEq)]
pub struct RootFailed {
    pub kind: SolverError,
    pub trace: IterationTrace,
    pub derivative: Option<String>,
}

pub type RootResult = Result<RootSolution, RootFailed>;

/// Converged linear-solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSolution {
    pub x: DVector<f64>,
    pub trace: IterationTrace,
}

/// Failed linear-solver run with the partial trace.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFailed {
    pub kind: SolverError,
    pub trace: IterationTrace,
}

pub type LinearResult = Result<LinearSolution, LinearFailed>;
