//! Root Finder family: five single-variable solvers sharing one iteration
//! driver and one stop/trace contract.
//!
//! Each pass appends one trace row, then converges when the residual
//! |f(candidate)| is below tolerance (where a residual exists) or the
//! relative error between consecutive iterates is. Exhausting the iteration
//! budget yields `MaxIterationsExceeded` together with the full partial
//! trace; guard failures (invalid bracket, degenerate secant, near-zero
//! derivative) abort with whatever trace was accumulated.
//!
//! # Example
//! ```
//! use metnum::solvers::root_finders::RootFinder;
//! let finder = RootFinder::from_str("x^2 - 2", 1e-8, 20).unwrap();
//! let solution = finder.newton(1.0).unwrap();
//! assert!((solution.root - 2f64.sqrt()).abs() < 1e-8);
//! println!("f' = {}", solution.derivative.unwrap());
//! ```

use crate::solvers::trace::{
    IterationTrace, RootFailed, RootResult, RootSolution, SolverError, relative_error,
};
use crate::symbolic::symbolic_engine::Expr;
use log::{error, info};

/// Denominator guard threshold for Secant and Newton.
const DENOMINATOR_EPS: f64 = 1e-10;

/// One iteration step produced by an algorithm closure: the state values for
/// the trace row, the new candidate, an optional residual f(candidate) and
/// the relative error against the previous iterate.
struct Step {
    values: Vec<f64>,
    candidate: f64,
    residual: Option<f64>,
    error: f64,
}

/// Single-variable root solver over a parsed symbolic expression.
///
/// For `fixed_point` the stored expression is the iterating function g, not
/// a root function f.
pub struct RootFinder {
    pub f: Expr,
    pub var: String,
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl RootFinder {
    pub fn new(f: Expr, tolerance: f64, max_iterations: usize) -> Result<Self, SolverError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(SolverError::MalformedInput(format!(
                "tolerance must be a positive finite number, got {}",
                tolerance
            )));
        }
        if max_iterations == 0 {
            return Err(SolverError::MalformedInput(
                "maximum iteration count must be positive".to_string(),
            ));
        }
        let vars = f.variables();
        if vars.len() > 1 {
            return Err(SolverError::MalformedInput(format!(
                "expected a single-variable expression, found variables {:?}",
                vars
            )));
        }
        let var = vars.into_iter().next().unwrap_or_else(|| "x".to_string());
        Ok(RootFinder {
            f,
            var,
            tolerance,
            max_iterations,
        })
    }

    /// Parses the expression string and builds the solver; parse failures map
    /// to `MalformedInput`.
    pub fn from_str(
        expr: &str,
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<Self, SolverError> {
        let f = Expr::parse_expression(expr).map_err(SolverError::MalformedInput)?;
        Self::new(f, tolerance, max_iterations)
    }

    /// Shared iteration driver: runs the bounded loop, appends one row per
    /// pass and applies the stop rule. Algorithms supply only their update
    /// formula and guards through the step closure.
    fn run<F>(
        &self,
        headers: &[&str],
        derivative: Option<String>,
        mut step: F,
    ) -> RootResult
    where
        F: FnMut(usize) -> Result<Step, SolverError>,
    {
        let mut trace = IterationTrace::new(headers.iter().copied());
        for i in 1..=self.max_iterations {
            let s = match step(i) {
                Ok(s) => s,
                Err(kind) => {
                    error!("{}", kind);
                    return Err(RootFailed {
                        kind,
                        trace,
                        derivative,
                    });
                }
            };
            trace.push(i, s.values, s.error);
            info!("iteration = {}, error = {}", i, s.error);
            let residual_met = s.residual.is_some_and(|r| r.abs() < self.tolerance);
            if residual_met || s.error < self.tolerance {
                info!("converged at iteration {} with root = {}", i, s.candidate);
                return Ok(RootSolution {
                    root: s.candidate,
                    trace,
                    derivative,
                });
            }
        }
        error!("maximum number of iterations reached, no root found");
        Err(RootFailed {
            kind: SolverError::MaxIterationsExceeded,
            trace,
            derivative,
        })
    }

    /// Bisection on the bracket [a, b]. Requires f(a)*f(b) < 0, checked
    /// before any iteration. The error is computed against the previous
    /// midpoint, seeded with `a`.
    pub fn bisection(&self, a: f64, b: f64) -> RootResult {
        let headers = ["a", "b", "c", "f(c)"];
        let f = self.f.lambdify1D();
        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let fb = f(b);
        if fa * fb >= 0.0 {
            return Err(RootFailed {
                kind: SolverError::InvalidBracket,
                trace: IterationTrace::new(headers),
                derivative: None,
            });
        }
        let mut c_prev = a;
        self.run(&headers, None, |_| {
            let c = (a + b) / 2.0;
            let fc = f(c);
            let err = relative_error(c, c_prev);
            let row = vec![a, b, c, fc];
            if fa * fc < 0.0 {
                b = c;
            } else {
                a = c;
                fa = fc;
            }
            c_prev = c;
            Ok(Step {
                values: row,
                candidate: c,
                residual: Some(fc),
                error: err,
            })
        })
    }

    /// False Position on the bracket [a, b]: same precondition and stop rule
    /// as bisection, secant-style candidate. The replaced endpoint's cached
    /// function value is refreshed, the formula depends on both values.
    pub fn false_position(&self, a: f64, b: f64) -> RootResult {
        let headers = ["a", "b", "c", "f(c)"];
        let f = self.f.lambdify1D();
        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);
        if fa * fb >= 0.0 {
            return Err(RootFailed {
                kind: SolverError::InvalidBracket,
                trace: IterationTrace::new(headers),
                derivative: None,
            });
        }
        let mut c_prev = a;
        self.run(&headers, None, |_| {
            let c = b - fb * (b - a) / (fb - fa);
            let fc = f(c);
            let err = relative_error(c, c_prev);
            let row = vec![a, b, c, fc];
            if fa * fc < 0.0 {
                b = c;
                fb = fc;
            } else {
                a = c;
                fa = fc;
            }
            c_prev = c;
            Ok(Step {
                values: row,
                candidate: c,
                residual: Some(fc),
                error: err,
            })
        })
    }

    /// Secant from two seeds; no sign precondition. A near-zero denominator
    /// f(x1) - f(x0) aborts with `DegenerateSecant` and the partial trace.
    pub fn secant(&self, x0: f64, x1: f64) -> RootResult {
        let f = self.f.lambdify1D();
        let mut x0 = x0;
        let mut x1 = x1;
        self.run(&["x_i-1", "x_i", "f(x_i)"], None, |_| {
            let fx0 = f(x0);
            let fx1 = f(x1);
            if (fx1 - fx0).abs() < DENOMINATOR_EPS {
                return Err(SolverError::DegenerateSecant);
            }
            let x_new = x1 - fx1 * (x1 - x0) / (fx1 - fx0);
            let err = relative_error(x_new, x1);
            let row = vec![x0, x1, fx1];
            x0 = x1;
            x1 = x_new;
            Ok(Step {
                values: row,
                candidate: x_new,
                residual: Some(fx1),
                error: err,
            })
        })
    }

    /// Fixed-point iteration x_new = g(x_old); the solver's expression is g.
    /// No residual test exists, only the relative error; a non-contractive g
    /// runs to exhaustion and reports `MaxIterationsExceeded`.
    pub fn fixed_point(&self, x0: f64) -> RootResult {
        let g = self.f.lambdify1D();
        let mut xn = x0;
        self.run(&["x_n", "g(x_n)"], None, |_| {
            let x_new = g(xn);
            let err = relative_error(x_new, xn);
            let row = vec![xn, x_new];
            xn = x_new;
            Ok(Step {
                values: row,
                candidate: x_new,
                residual: None,
                error: err,
            })
        })
    }

    /// Newton's method. The derivative is obtained symbolically once and
    /// fixed for the whole run; its printable form is attached to both
    /// success and failure results as a diagnostic.
    pub fn newton(&self, x0: f64) -> RootResult {
        let df_expr = self.f.diff(&self.var).simplify_();
        let derivative = Some(df_expr.to_string());
        info!("newton: f' = {}", df_expr);
        let f = self.f.lambdify1D();
        let df = df_expr.lambdify1D();
        let mut xn = x0;
        self.run(&["x_n", "f(x_n)", "f'(x_n)"], derivative, |_| {
            let fxn = f(xn);
            let dfxn = df(xn);
            if dfxn.abs() < DENOMINATOR_EPS {
                return Err(SolverError::NearZeroDerivative);
            }
            let x_new = xn - fxn / dfxn;
            let err = relative_error(x_new, xn);
            let row = vec![xn, fxn, dfxn];
            xn = x_new;
            Ok(Step {
                values: row,
                candidate: x_new,
                residual: Some(fxn),
                error: err,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SQRT2: f64 = std::f64::consts::SQRT_2;

    #[test]
    fn test_bisection_sqrt2() {
        let finder = RootFinder::from_str("x^2 - 2", 1e-6, 50).unwrap();
        let solution = finder.bisection(0.0, 2.0).unwrap();
        assert_relative_eq!(solution.root, SQRT2, epsilon = 1e-5);
        assert!(solution.trace.len() <= 50);
        assert!(solution.derivative.is_none());
        let last = solution.trace.last().unwrap();
        // stop rule: residual or relative error below tolerance
        assert!(last.error < 1e-6 || last.values[3].abs() < 1e-6);
    }

    #[test]
    fn test_bisection_invalid_bracket() {
        let finder = RootFinder::from_str("x^2 - 2", 1e-6, 50).unwrap();
        let failed = finder.bisection(2.0, 3.0).unwrap_err();
        assert_eq!(failed.kind, SolverError::InvalidBracket);
        assert!(failed.trace.is_empty());
    }

    #[test]
    fn test_bisection_bracket_invariant() {
        // f(a)*f(b) < 0 must hold at every recorded bracket
        let finder = RootFinder::from_str("x^2 - 2", 1e-6, 50).unwrap();
        let f = finder.f.lambdify1D();
        let solution = finder.bisection(0.0, 2.0).unwrap();
        for row in solution.trace.rows() {
            let (a, b) = (row.values[0], row.values[1]);
            assert!(f(a) * f(b) < 0.0, "bracket lost at iteration {}", row.iteration);
        }
    }

    #[test]
    fn test_false_position_sqrt2() {
        let finder = RootFinder::from_str("x^2 - 2", 1e-6, 100).unwrap();
        let solution = finder.false_position(0.0, 2.0).unwrap();
        assert_relative_eq!(solution.root, SQRT2, epsilon = 1e-5);
    }

    #[test]
    fn test_false_position_invalid_bracket() {
        let finder = RootFinder::from_str("x^2 - 2", 1e-6, 100).unwrap();
        let failed = finder.false_position(2.0, 3.0).unwrap_err();
        assert_eq!(failed.kind, SolverError::InvalidBracket);
    }

    #[test]
    fn test_secant_sqrt2() {
        let finder = RootFinder::from_str("x^2 - 2", 1e-8, 50).unwrap();
        let solution = finder.secant(1.0, 2.0).unwrap();
        assert_relative_eq!(solution.root, SQRT2, epsilon = 1e-7);
    }

    #[test]
    fn test_secant_degenerate_denominator() {
        // symmetric seeds around the minimum of x^2: f(-1) == f(1)
        let finder = RootFinder::from_str("x^2", 1e-8, 50).unwrap();
        let failed = finder.secant(-1.0, 1.0).unwrap_err();
        assert_eq!(failed.kind, SolverError::DegenerateSecant);
        assert!(failed.trace.is_empty());
    }

    #[test]
    fn test_fixed_point_converges() {
        // g(x) = (x + 2/x)/2 is the Babylonian step for sqrt(2)
        let finder = RootFinder::from_str("(x + 2/x) / 2", 1e-10, 50).unwrap();
        let solution = finder.fixed_point(1.0).unwrap();
        assert_relative_eq!(solution.root, SQRT2, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_point_exhausts_on_divergent_g() {
        // |g'| = 2 at the fixed point x = 0: never converges
        let finder = RootFinder::from_str("2*x + 1", 1e-12, 15).unwrap();
        let failed = finder.fixed_point(1.0).unwrap_err();
        assert_eq!(failed.kind, SolverError::MaxIterationsExceeded);
        assert_eq!(failed.trace.len(), 15);
    }

    #[test]
    fn test_newton_sqrt2_fast() {
        let finder = RootFinder::from_str("x^2 - 2", 1e-8, 20).unwrap();
        let solution = finder.newton(1.0).unwrap();
        assert_relative_eq!(solution.root, SQRT2, epsilon = 1e-8);
        assert!(solution.trace.len() <= 6);
        // derivative diagnostic travels with the result
        let printable = solution.derivative.unwrap();
        assert!(printable.contains('x'));
    }

    #[test]
    fn test_newton_near_zero_derivative() {
        // f = x^2, f' = 2x vanishes at the seed
        let finder = RootFinder::from_str("x^2", 1e-8, 20).unwrap();
        let failed = finder.newton(0.0).unwrap_err();
        assert_eq!(failed.kind, SolverError::NearZeroDerivative);
        assert!(failed.derivative.is_some());
    }

    #[test]
    fn test_trace_never_exceeds_max_iterations() {
        let finder = RootFinder::from_str("x^2 - 2", 1e-15, 7).unwrap();
        let failed = finder.bisection(0.0, 2.0).unwrap_err();
        assert_eq!(failed.kind, SolverError::MaxIterationsExceeded);
        assert_eq!(failed.trace.len(), 7);
    }

    #[test]
    fn test_malformed_inputs_rejected() {
        assert!(matches!(
            RootFinder::from_str("x^2 - 2", 0.0, 50),
            Err(SolverError::MalformedInput(_))
        ));
        assert!(matches!(
            RootFinder::from_str("x^2 - 2", 1e-6, 0),
            Err(SolverError::MalformedInput(_))
        ));
        assert!(matches!(
            RootFinder::from_str("x +", 1e-6, 50),
            Err(SolverError::MalformedInput(_))
        ));
        assert!(matches!(
            RootFinder::from_str("x + y", 1e-6, 50),
            Err(SolverError::MalformedInput(_))
        ));
    }
}
