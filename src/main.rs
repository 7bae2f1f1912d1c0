use metnum::interpolation::linear_spline::linear_spline;
use metnum::interpolation::polynomial_fit::{Point, lagrange, newton_divided_differences, vandermonde};
use metnum::solvers::root_finders::RootFinder;
use metnum::solvers::stationary::StationarySolver;
use metnum::symbolic::symbolic_engine::Expr;
use metnum::utils::logger::init_logging;
use nalgebra::{DMatrix, DVector};

fn main() {
    init_logging("warn").unwrap();

    // SYMBOLIC ENGINE
    // parse expression from string to symbolic expression
    let input = "x^2 - 2";
    let f = Expr::parse_expression(input).unwrap();
    // differentiate analytically and simplify the result
    let df = f.diff("x").simplify_();
    println!("f = {}, f' = {}", f, df);
    // turn the symbolic expression into a Rust closure for fast evaluation
    let fun = f.lambdify1D();
    println!("f(1.5) = {}\n", fun(1.5));

    // ROOT FINDING
    // five methods over the same expression, each with a full iteration trace
    let finder = RootFinder::from_str(input, 1e-8, 50).unwrap();
    let solution = finder.bisection(0.0, 2.0).unwrap();
    println!("bisection root = {}", solution.root);
    println!("{}", solution.trace.render_table());

    let solution = finder.newton(1.0).unwrap();
    println!(
        "newton root = {} (f' = {})",
        solution.root,
        solution.derivative.unwrap()
    );
    println!("{}", solution.trace.render_table());

    let solution = finder.secant(1.0, 2.0).unwrap();
    println!("secant root = {}", solution.root);
    let solution = finder.false_position(0.0, 2.0).unwrap();
    println!("false position root = {}", solution.root);
    // fixed point iterates g, not f: g(x) = (x + 2/x)/2 converges to sqrt(2)
    let finder = RootFinder::from_str("(x + 2/x) / 2", 1e-10, 50).unwrap();
    let solution = finder.fixed_point(1.0).unwrap();
    println!("fixed point root = {}\n", solution.root);

    // STATIONARY LINEAR SOLVERS
    let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
    let b = DVector::from_vec(vec![5.0, 4.0]);
    let solver = StationarySolver::new(a, b, 1e-6, 100).unwrap();
    let solution = solver.jacobi().unwrap();
    println!("jacobi x = {:?}", solution.x.as_slice());
    println!("{}", solution.trace.render_table());
    let solution = solver.gauss_seidel().unwrap();
    println!("gauss-seidel x = {:?}", solution.x.as_slice());
    let solution = solver.sor(1.1).unwrap();
    println!("sor(1.1) x = {:?}\n", solution.x.as_slice());

    // INTERPOLATION
    let points = [
        Point { x: 1.0, y: 1.0 },
        Point { x: 2.0, y: 4.0 },
        Point { x: 3.0, y: 9.0 },
    ];
    let poly = vandermonde(&points).unwrap();
    println!("vandermonde: {}", poly.rendering);
    let poly = lagrange(&points).unwrap();
    println!("lagrange:    {}", poly.rendering);
    let poly = newton_divided_differences(&points).unwrap();
    println!("newton dd:   {}", poly.rendering);
    println!("P(2.5) = {}", poly.eval(2.5));

    let segments = linear_spline(&points).unwrap();
    for segment in &segments {
        println!("{}", segment.rendering);
    }
}
