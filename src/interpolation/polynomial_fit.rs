//! Interpolating polynomial builders.
//!
//! Three constructions of the same mathematical object with different
//! numerics and failure modes:
//! - `vandermonde` solves the N x N power-basis system exactly (LU); a
//!   duplicate abscissa makes the matrix singular,
//! - `lagrange` assembles the basis products symbolically and expands them,
//! - `newton_divided_differences` builds the triangular difference table and
//!   the running-product form, then expands.
//!
//! Construction is not iterative, so failures carry no trace - just the
//! `SolverError` kind.

use crate::solvers::trace::SolverError;
use crate::symbolic::polynomial::{expand_polynomial, horner, poly_to_string};
use crate::symbolic::symbolic_engine::Expr;
use nalgebra::{DMatrix, DVector};

/// One interpolation node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Interpolating polynomial: dense coefficients (index = power) plus the
/// printable rendering. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    pub coefficients: Vec<f64>,
    pub rendering: String,
}

impl Polynomial {
    /// Horner evaluation at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        horner(&self.coefficients, x)
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }
}

pub(crate) fn validate_points(points: &[Point]) -> Result<(), SolverError> {
    if points.len() < 2 {
        return Err(SolverError::MalformedInput(format!(
            "at least two points are required, got {}",
            points.len()
        )));
    }
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(SolverError::MalformedInput(
            "points must have finite coordinates".to_string(),
        ));
    }
    Ok(())
}

/// Exact polynomial through the points via the Vandermonde system: row i is
/// [x_i^0, x_i^1, ..., x_i^(N-1)], solved for the coefficient vector with an
/// LU decomposition. Duplicate x values make the matrix singular.
///
/// The rendering follows the classic descending-power, 4-decimal format.
pub fn vandermonde(points: &[Point]) -> Result<Polynomial, SolverError> {
    validate_points(points)?;
    let n = points.len();
    let v = DMatrix::from_fn(n, n, |i, j| points[i].x.powi(j as i32));
    let y = DVector::from_iterator(n, points.iter().map(|p| p.y));
    let c = v.lu().solve(&y).ok_or(SolverError::SingularMatrix)?;
    let coefficients: Vec<f64> = c.iter().copied().collect();
    let rendering = vandermonde_string(&coefficients);
    Ok(Polynomial {
        coefficients,
        rendering,
    })
}

/// Descending powers, fixed 4-decimal coefficients; the terms are joined
/// with " + " and the "+ -" sign pair is collapsed to "- " afterwards so it
/// never appears in the output.
fn vandermonde_string(coefficients: &[f64]) -> String {
    let mut out = String::from("P(x) = ");
    for i in (0..coefficients.len()).rev() {
        out.push_str(&format!("{:.4}", coefficients[i]));
        if i > 0 {
            out.push_str(&format!("*x^{} + ", i));
        }
    }
    out.replace("+ -", "- ")
}

/// Lagrange form: P(x) = sum_j y_j * prod_{i != j} (x - x_i)/(x_j - x_i),
/// built symbolically and expanded to the canonical polynomial. A zero
/// basis denominator (duplicate x) fails with `DuplicateXValue`.
pub fn lagrange(points: &[Point]) -> Result<Polynomial, SolverError> {
    validate_points(points)?;
    let n = points.len();
    let x = Expr::Var("x".to_string());
    let mut p = Expr::Const(0.0);
    for j in 0..n {
        let mut basis = Expr::Const(1.0);
        for i in 0..n {
            if i == j {
                continue;
            }
            let denominator = points[j].x - points[i].x;
            if denominator == 0.0 {
                return Err(SolverError::DuplicateXValue);
            }
            basis = basis * (x.clone() - Expr::Const(points[i].x)) / Expr::Const(denominator);
        }
        p = p + Expr::Const(points[j].y) * basis;
    }
    expand_to_polynomial(&p)
}

/// Newton form from the divided-difference table: dd[i][0] = y_i and
/// dd[i][j] = (dd[i+1][j-1] - dd[i][j-1]) / (x[i+j] - x[i]); the
/// coefficients are the top row, attached to a running product
/// prod_{m < k} (x - x_m). A zero table denominator fails with
/// `DuplicateXValue`.
pub fn newton_divided_differences(points: &[Point]) -> Result<Polynomial, SolverError> {
    validate_points(points)?;
    let n = points.len();
    let mut dd = vec![vec![0.0; n]; n];
    for (i, p) in points.iter().enumerate() {
        dd[i][0] = p.y;
    }
    for j in 1..n {
        for i in 0..n - j {
            let denominator = points[i + j].x - points[i].x;
            if denominator == 0.0 {
                return Err(SolverError::DuplicateXValue);
            }
            dd[i][j] = (dd[i + 1][j - 1] - dd[i][j - 1]) / denominator;
        }
    }
    let x = Expr::Var("x".to_string());
    let mut p = Expr::Const(0.0);
    let mut term = Expr::Const(1.0);
    for k in 0..n {
        p = p + Expr::Const(dd[0][k]) * term.clone();
        term = term * (x.clone() - Expr::Const(points[k].x));
    }
    expand_to_polynomial(&p)
}

fn expand_to_polynomial(p: &Expr) -> Result<Polynomial, SolverError> {
    // the assembled expression is polynomial by construction
    let coefficients = expand_polynomial(p, "x").map_err(SolverError::MalformedInput)?;
    let rendering = format!("P(x) = {}", poly_to_string(&coefficients));
    Ok(Polynomial {
        coefficients,
        rendering,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parabola() -> Vec<Point> {
        vec![
            Point { x: 1.0, y: 1.0 },
            Point { x: 2.0, y: 4.0 },
            Point { x: 3.0, y: 9.0 },
        ]
    }

    #[test]
    fn test_vandermonde_recovers_x_squared() {
        let poly = vandermonde(&parabola()).unwrap();
        assert_eq!(poly.degree(), 2);
        assert_relative_eq!(poly.coefficients[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(poly.coefficients[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(poly.coefficients[2], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vandermonde_rendering_never_prints_plus_minus() {
        // y = -x^2 forces negative leading and mixed signs
        let points = vec![
            Point { x: 1.0, y: -1.0 },
            Point { x: 2.0, y: -4.0 },
            Point { x: 3.0, y: -9.0 },
        ];
        let poly = vandermonde(&points).unwrap();
        assert!(poly.rendering.starts_with("P(x) = "));
        assert!(!poly.rendering.contains("+ -"));
    }

    #[test]
    fn test_vandermonde_duplicate_x_is_singular() {
        let points = vec![
            Point { x: 1.0, y: 1.0 },
            Point { x: 1.0, y: 2.0 },
            Point { x: 3.0, y: 9.0 },
        ];
        assert_eq!(
            vandermonde(&points).unwrap_err(),
            SolverError::SingularMatrix
        );
    }

    #[test]
    fn test_lagrange_round_trip() {
        let points = vec![
            Point { x: -1.0, y: 2.0 },
            Point { x: 0.5, y: -1.0 },
            Point { x: 2.0, y: 3.0 },
            Point { x: 4.0, y: 0.5 },
        ];
        let poly = lagrange(&points).unwrap();
        for p in &points {
            assert_relative_eq!(poly.eval(p.x), p.y, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_lagrange_duplicate_x() {
        let points = vec![
            Point { x: 1.0, y: 1.0 },
            Point { x: 1.0, y: 4.0 },
            Point { x: 3.0, y: 9.0 },
        ];
        assert_eq!(lagrange(&points).unwrap_err(), SolverError::DuplicateXValue);
    }

    #[test]
    fn test_newton_divided_differences_round_trip() {
        let points = vec![
            Point { x: 0.0, y: 1.0 },
            Point { x: 1.0, y: 2.0 },
            Point { x: 2.0, y: 5.0 },
            Point { x: 3.0, y: 10.0 },
        ];
        let poly = newton_divided_differences(&points).unwrap();
        for p in &points {
            assert_relative_eq!(poly.eval(p.x), p.y, epsilon = 1e-6);
        }
        // the data is y = x^2 + 1
        assert_relative_eq!(poly.coefficients[2], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_newton_divided_differences_duplicate_x() {
        let points = vec![
            Point { x: 2.0, y: 1.0 },
            Point { x: 2.0, y: 4.0 },
        ];
        assert_eq!(
            newton_divided_differences(&points).unwrap_err(),
            SolverError::DuplicateXValue
        );
    }

    #[test]
    fn test_all_three_builders_agree() {
        let points = parabola();
        let v = vandermonde(&points).unwrap();
        let l = lagrange(&points).unwrap();
        let n = newton_divided_differences(&points).unwrap();
        for x in [0.0, 1.5, 2.5, 10.0] {
            assert_relative_eq!(v.eval(x), l.eval(x), epsilon = 1e-8);
            assert_relative_eq!(v.eval(x), n.eval(x), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_too_few_points_rejected() {
        let points = vec![Point { x: 1.0, y: 1.0 }];
        assert!(matches!(
            vandermonde(&points),
            Err(SolverError::MalformedInput(_))
        ));
        assert!(matches!(
            lagrange(&points),
            Err(SolverError::MalformedInput(_))
        ));
        assert!(matches!(
            newton_divided_differences(&points),
            Err(SolverError::MalformedInput(_))
        ));
    }
}
