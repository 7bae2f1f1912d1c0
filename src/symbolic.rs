/// # Symbolic engine
/// a module
/// 1) turns a String expression into a symbolic expression
/// 2) computes analytical derivatives and simplifies them
/// 3) turns a symbolic expression into a Rust closure for fast evaluation
/// # Example
/// ```
/// use metnum::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("x^2 - 2").unwrap();
/// let df = f.diff("x").simplify_();
/// println!("f = {}, f' = {}", f, df);
/// let fun = f.lambdify1D();
/// assert_eq!(fun(2.0), 2.0);
/// ```
pub mod symbolic_engine;
/// a module turns a String expression into a symbolic expression
/// # Example
/// ```
/// use metnum::symbolic::symbolic_engine::Expr;
/// let parsed = Expr::parse_expression("sin(x)*exp(-x) + 1").unwrap();
/// println!("parsed expression {}", parsed);
/// ```
pub mod parse_expr;
/// expansion of a symbolic expression into a dense polynomial:
/// coefficient vector (index = power), Horner evaluation and the
/// canonical descending-power string rendering
pub mod polynomial;
