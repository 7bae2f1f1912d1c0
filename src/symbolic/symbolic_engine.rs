//! Core symbolic expression type.
//!
//! `Expr` is an abstract syntax tree for single-variable real expressions:
//! variables, constants, the four arithmetic operations, powers and the
//! elementary functions (exp, ln, sin, cos, tg, ctg). On top of the tree the
//! module provides:
//! - operator overloading so expressions compose with natural syntax,
//! - `diff` - analytical differentiation by recursive pattern matching,
//! - `simplify_` - algebraic cleanup (constant folding, x+0, x*1, ...),
//! - `eval1D` / `lambdify1D` - direct evaluation and closure compilation,
//! - `Display` for printable mathematical notation.
//!
//! Trigonometric variants use mathematical notation (tg, ctg) rather than
//! programming names; `tan`/`cot` are accepted as parser aliases.

#![allow(non_camel_case_types)]

use std::fmt;

/// Symbolic expression tree. Recursive variants hold `Box<Expr>`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Sine
    sin(Box<Expr>),
    /// Cosine
    cos(Box<Expr>),
    /// Tangent - mathematical notation 'tg'
    tg(Box<Expr>),
    /// Cotangent - mathematical notation 'ctg'
    ctg(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Wraps the expression in a Box; recursive variants all hold `Box<Expr>`.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates natural logarithm ln(self).
    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// true if the expression is exactly Const(0.0)
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// All distinct variable names in the expression, sorted.
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names.sort();
        names.dedup();
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            Expr::Var(name) => names.push(name.clone()),
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr) => expr.collect_variables(names),
        }
    }

    /// Analytical differentiation with respect to `var`.
    ///
    /// Product, quotient, power and chain rules applied by recursive pattern
    /// matching. The result is not simplified; call `simplify_` for a
    /// readable form.
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(Box::new(rhs.diff(var)), lhs.clone())),
                )),
                Box::new(Expr::Mul(rhs.clone(), rhs.clone())),
            ),
            // d/dx base^exp for constant exp; the general case would need
            // the logarithmic form, the power rule covers what the parser
            // produces for polynomial and rational inputs
            Expr::Pow(base, exp) => Expr::Mul(
                Box::new(Expr::Mul(
                    exp.clone(),
                    Box::new(Expr::Pow(
                        base.clone(),
                        Box::new(Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0)))),
                    )),
                )),
                Box::new(base.diff(var)),
            ),
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::Ln(expr) => Expr::Div(Box::new(expr.diff(var)), expr.clone()),
            Expr::sin(expr) => {
                Expr::Mul(Box::new(Expr::cos(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::sin(expr.clone())),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::tg(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::cos(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::ctg(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::sin(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)),
            ),
        }
    }

    /// Algebraic simplification: constant folding and identity rules
    /// (x + 0 = x, x * 1 = x, 0 * x = 0, x / 1 = x, x^1 = x, x^0 = 1),
    /// applied bottom-up.
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Add(lhs, rhs) => match (lhs.simplify_(), rhs.simplify_()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                (l, r) if r.is_zero() => l,
                (l, r) if l.is_zero() => r,
                (l, r) => l + r,
            },
            Expr::Sub(lhs, rhs) => match (lhs.simplify_(), rhs.simplify_()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                (l, r) if r.is_zero() => l,
                (l, r) => l - r,
            },
            Expr::Mul(lhs, rhs) => match (lhs.simplify_(), rhs.simplify_()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                (l, r) if l.is_zero() || r.is_zero() => Expr::Const(0.0),
                (Expr::Const(c), r) if c == 1.0 => r,
                (l, Expr::Const(c)) if c == 1.0 => l,
                (l, r) => l * r,
            },
            Expr::Div(lhs, rhs) => match (lhs.simplify_(), rhs.simplify_()) {
                (Expr::Const(a), Expr::Const(b)) if b != 0.0 => Expr::Const(a / b),
                (l, _) if l.is_zero() => Expr::Const(0.0),
                (l, Expr::Const(c)) if c == 1.0 => l,
                (l, r) => l / r,
            },
            Expr::Pow(base, exp) => match (base.simplify_(), exp.simplify_()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(b)),
                (b, Expr::Const(c)) if c == 1.0 => b,
                (_, e) if e.is_zero() => Expr::Const(1.0),
                (b, e) => b.pow(e),
            },
            Expr::Exp(expr) => Expr::Exp(Box::new(expr.simplify_())),
            Expr::Ln(expr) => Expr::Ln(Box::new(expr.simplify_())),
            Expr::sin(expr) => Expr::sin(Box::new(expr.simplify_())),
            Expr::cos(expr) => Expr::cos(Box::new(expr.simplify_())),
            Expr::tg(expr) => Expr::tg(Box::new(expr.simplify_())),
            Expr::ctg(expr) => Expr::ctg(Box::new(expr.simplify_())),
            _ => self.clone(),
        }
    }

    /// Evaluates the expression at `x`, treating every variable as the single
    /// free variable. Use `lambdify1D` for repeated evaluation inside loops.
    pub fn eval1D(&self, x: f64) -> f64 {
        match self {
            Expr::Var(_) => x,
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval1D(x) + rhs.eval1D(x),
            Expr::Sub(lhs, rhs) => lhs.eval1D(x) - rhs.eval1D(x),
            Expr::Mul(lhs, rhs) => lhs.eval1D(x) * rhs.eval1D(x),
            Expr::Div(lhs, rhs) => lhs.eval1D(x) / rhs.eval1D(x),
            Expr::Pow(base, exp) => base.eval1D(x).powf(exp.eval1D(x)),
            Expr::Exp(expr) => expr.eval1D(x).exp(),
            Expr::Ln(expr) => expr.eval1D(x).ln(),
            Expr::sin(expr) => expr.eval1D(x).sin(),
            Expr::cos(expr) => expr.eval1D(x).cos(),
            Expr::tg(expr) => expr.eval1D(x).tan(),
            Expr::ctg(expr) => 1.0 / expr.eval1D(x).tan(),
        }
    }

    /// Compiles the expression into a `Fn(f64) -> f64` closure by recursive
    /// composition, so the tree is walked once at compile time instead of at
    /// every evaluation.
    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64> {
        match self {
            Expr::Var(_) => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) + rhs_fn(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) - rhs_fn(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) * rhs_fn(x))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) / rhs_fn(x))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify1D();
                let exp_fn = exp.lambdify1D();
                Box::new(move |x| base_fn(x).powf(exp_fn(x)))
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).exp())
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).ln())
            }
            Expr::sin(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).sin())
            }
            Expr::cos(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).cos())
            }
            Expr::tg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).tan())
            }
            Expr::ctg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| 1.0 / expr_fn(x).tan())
            }
        }
    }

    /// Parses a mathematical expression from its string representation.
    ///
    /// Supports `+ - * / ^`, parentheses, floating literals and the named
    /// functions exp, ln/log, sin, cos, tg/tan, ctg/cot.
    pub fn parse_expression(input: &str) -> Result<Expr, String> {
        crate::symbolic::parse_expr::parse_expression_str(input)
    }
}
