/// shared trace/result plumbing: iteration records, error metric,
/// failure taxonomy and tabled rendering
pub mod trace;
/// Root Finder family: Bisection, False Position, Secant, Fixed-Point and
/// Newton over a parsed symbolic expression
/// # Example
/// ```
/// use metnum::solvers::root_finders::RootFinder;
/// let finder = RootFinder::from_str("x^2 - 2", 1e-6, 50).unwrap();
/// let solution = finder.bisection(0.0, 2.0).unwrap();
/// assert!((solution.root - 2f64.sqrt()).abs() < 1e-5);
/// println!("{}", solution.trace.render_table());
/// ```
pub mod root_finders;
/// stationary iterative solvers for Ax = b: Jacobi, Gauss-Seidel and SOR
/// # Example
/// ```
/// use metnum::solvers::stationary::StationarySolver;
/// use nalgebra::{DMatrix, DVector};
/// let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
/// let b = DVector::from_vec(vec![5.0, 4.0]);
/// let solver = StationarySolver::new(a, b, 1e-6, 100).unwrap();
/// let solution = solver.jacobi().unwrap();
/// assert!((solution.x[0] - 1.0).abs() < 1e-5);
/// ```
pub mod stationary;
