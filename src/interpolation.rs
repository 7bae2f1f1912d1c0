/// polynomial builders over discrete point sets: Vandermonde (exact linear
/// solve), Lagrange (symbolic basis construction) and Newton divided
/// differences
/// # Example
/// ```
/// use metnum::interpolation::polynomial_fit::{Point, vandermonde};
/// let points = [
///     Point { x: 1.0, y: 1.0 },
///     Point { x: 2.0, y: 4.0 },
///     Point { x: 3.0, y: 9.0 },
/// ];
/// let poly = vandermonde(&points).unwrap();
/// assert!((poly.eval(2.5) - 6.25).abs() < 1e-9);
/// println!("{}", poly.rendering);
/// ```
pub mod polynomial_fit;
/// piecewise-linear interpolation: one slope/intercept segment per
/// consecutive pair of points, each valid on its own interval
pub mod linear_spline;
