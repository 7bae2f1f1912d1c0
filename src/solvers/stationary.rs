//! Stationary iterative solvers for square linear systems Ax = b: Jacobi,
//! Gauss-Seidel and Successive Over-Relaxation.
//!
//! All three start from the zero vector, append one trace row per full sweep
//! (the post-sweep solution components plus the infinity norm of the update)
//! and stop when that norm falls below tolerance. A zero diagonal entry is
//! only detected when the sweep reaches it: the run aborts mid-pass with
//! `SingularPivot(j)` and the partial trace. Neither diagonal dominance nor
//! the spectral radius is verified upfront; a divergent system simply
//! exhausts the iteration budget.

use crate::solvers::trace::{
    IterationTrace, LinearFailed, LinearResult, LinearSolution, SolverError,
};
use log::{error, info};
use nalgebra::{DMatrix, DVector};

pub struct StationarySolver {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl StationarySolver {
    /// Validates dimensions and loop parameters before any iteration.
    pub fn new(
        a: DMatrix<f64>,
        b: DVector<f64>,
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<Self, SolverError> {
        if a.nrows() != a.ncols() {
            return Err(SolverError::MalformedInput(format!(
                "coefficient matrix must be square, got {}x{}",
                a.nrows(),
                a.ncols()
            )));
        }
        if a.nrows() != b.len() {
            return Err(SolverError::MalformedInput(format!(
                "matrix is {0}x{0} but right-hand side has length {1}",
                a.nrows(),
                b.len()
            )));
        }
        if b.is_empty() {
            return Err(SolverError::MalformedInput(
                "system must have at least one equation".to_string(),
            ));
        }
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
        Ok(StationarySolver {
            a,
            b,
            tolerance,
            max_iterations,
        })
    }

    fn headers(&self) -> Vec<String> {
        (1..=self.b.len()).map(|i| format!("x{}", i)).collect()
    }

    /// Jacobi: every component of the new vector is computed from the
    /// previous full vector only, so a sweep never sees its own updates.
    pub fn jacobi(&self) -> LinearResult {
        let n = self.b.len();
        let mut trace = IterationTrace::new(self.headers());
        let mut x_old: DVector<f64> = DVector::zeros(n);
        let mut x_new: DVector<f64> = DVector::zeros(n);
        for i in 1..=self.max_iterations {
            for j in 0..n {
                let mut sum = 0.0;
                for k in 0..n {
                    if k != j {
                        sum += self.a[(j, k)] * x_old[k];
                    }
                }
                let pivot = self.a[(j, j)];
                if pivot == 0.0 {
                    error!("zero pivot on row {}", j);
                    return Err(LinearFailed {
                        kind: SolverError::SingularPivot(j),
                        trace,
                    });
                }
                x_new[j] = (self.b[j] - sum) / pivot;
            }
            let error = (&x_new - &x_old).amax();
            trace.push(i, x_new.iter().copied().collect(), error);
            info!("jacobi sweep = {}, error = {}", i, error);
            x_old.copy_from(&x_new);
            if error < self.tolerance {
                return Ok(LinearSolution { x: x_new, trace });
            }
        }
        error!("maximum number of iterations reached, no solution found");
        Err(LinearFailed {
            kind: SolverError::MaxIterationsExceeded,
            trace,
        })
    }

    /// Gauss-Seidel: within a sweep, component j uses the already-updated
    /// components before it and the pre-sweep snapshot after it.
    pub fn gauss_seidel(&self) -> LinearResult {
        self.relaxation_loop(1.0, "gauss-seidel")
    }

    /// SOR with relaxation factor omega in (0, 2); the Gauss-Seidel candidate
    /// is blended with the old component. omega = 1 reproduces Gauss-Seidel
    /// exactly.
    pub fn sor(&self, omega: f64) -> LinearResult {
        if !(omega > 0.0 && omega < 2.0) {
            return Err(LinearFailed {
                kind: SolverError::InvalidRelaxationFactor(omega),
                trace: IterationTrace::new(self.headers()),
            });
        }
        self.relaxation_loop(omega, "sor")
    }

    fn relaxation_loop(&self, omega: f64, method: &str) -> LinearResult {
        let n = self.b.len();
        let mut trace = IterationTrace::new(self.headers());
        let mut x: DVector<f64> = DVector::zeros(n);
        for i in 1..=self.max_iterations {
            let x_old = x.clone();
            for j in 0..n {
                let mut sum_updated = 0.0;
                for k in 0..j {
                    sum_updated += self.a[(j, k)] * x[k];
                }
                let mut sum_snapshot = 0.0;
                for k in j + 1..n {
                    sum_snapshot += self.a[(j, k)] * x_old[k];
                }
                let pivot = self.a[(j, j)];
                if pivot == 0.0 {
                    error!("zero pivot on row {}", j);
                    return Err(LinearFailed {
                        kind: SolverError::SingularPivot(j),
                        trace,
                    });
                }
                let x_gs = (self.b[j] - sum_updated - sum_snapshot) / pivot;
                x[j] = (1.0 - omega) * x_old[j] + omega * x_gs;
            }
            let error = (&x - &x_old).amax();
            trace.push(i, x.iter().copied().collect(), error);
            info!("{} sweep = {}, error = {}", method, i, error);
            if error < self.tolerance {
                return Ok(LinearSolution { x, trace });
            }
        }
        error!("maximum number of iterations reached, no solution found");
        Err(LinearFailed {
            kind: SolverError::MaxIterationsExceeded,
            trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn diagonally_dominant() -> StationarySolver {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![5.0, 4.0]);
        StationarySolver::new(a, b, 1e-6, 100).unwrap()
    }

    #[test]
    fn test_jacobi_diagonally_dominant() {
        let solution = diagonally_dominant().jacobi().unwrap();
        assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-5);
        assert_relative_eq!(solution.x[1], 1.0, epsilon = 1e-5);
        assert!(solution.trace.len() <= 100);
        assert!(solution.trace.last().unwrap().error < 1e-6);
    }

    #[test]
    fn test_gauss_seidel_converges_faster_than_jacobi() {
        let solver = diagonally_dominant();
        let jacobi = solver.jacobi().unwrap();
        let gs = solver.gauss_seidel().unwrap();
        assert_relative_eq!(gs.x[0], 1.0, epsilon = 1e-5);
        assert!(gs.trace.len() <= jacobi.trace.len());
    }

    #[test]
    fn test_sor_with_unit_omega_matches_gauss_seidel_exactly() {
        let solver = diagonally_dominant();
        let gs = solver.gauss_seidel().unwrap();
        let sor = solver.sor(1.0).unwrap();
        assert_eq!(gs.trace, sor.trace);
        assert_eq!(gs.x, sor.x);
    }

    #[test]
    fn test_sor_rejects_omega_outside_open_interval() {
        let solver = diagonally_dominant();
        for omega in [0.0, 2.0, -0.5, 2.5] {
            let failed = solver.sor(omega).unwrap_err();
            assert_eq!(failed.kind, SolverError::InvalidRelaxationFactor(omega));
            assert!(failed.trace.is_empty());
        }
    }

    #[test]
    fn test_singular_pivot_aborts_with_index() {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![5.0, 4.0]);
        let solver = StationarySolver::new(a, b, 1e-6, 100).unwrap();
        let failed = solver.jacobi().unwrap_err();
        assert_eq!(failed.kind, SolverError::SingularPivot(0));
        let failed = solver.gauss_seidel().unwrap_err();
        assert_eq!(failed.kind, SolverError::SingularPivot(0));
    }

    #[test]
    fn test_divergent_system_exhausts_budget() {
        // dominance reversed: spectral radius above one
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 4.0, 3.0, 1.0]);
        let b = DVector::from_vec(vec![5.0, 4.0]);
        let solver = StationarySolver::new(a, b, 1e-6, 25).unwrap();
        let failed = solver.jacobi().unwrap_err();
        assert_eq!(failed.kind, SolverError::MaxIterationsExceeded);
        assert_eq!(failed.trace.len(), 25);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![5.0, 4.0, 3.0]);
        assert!(matches!(
            StationarySolver::new(a, b, 1e-6, 100),
            Err(SolverError::MalformedInput(_))
        ));
        let a = DMatrix::from_row_slice(2, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 0.0]);
        let b = DVector::from_vec(vec![5.0, 4.0]);
        assert!(matches!(
            StationarySolver::new(a, b, 1e-6, 100),
            Err(SolverError::MalformedInput(_))
        ));
    }
}
