//! Dense polynomial expansion of symbolic expressions.
//!
//! Turns an `Expr` that is polynomial in one variable into its coefficient
//! vector (index = power): sums and differences map to coefficient-wise
//! arithmetic, products to convolution, non-negative integer powers to
//! repeated convolution. This is the expand/simplify step the Lagrange and
//! Newton interpolation builders rely on for their canonical output.

use crate::symbolic::symbolic_engine::Expr;
use crate::utils::fmt::format_value;

/// Coefficients below this magnitude are treated as exact zeros when
/// trimming and rendering.
const COEFF_EPS: f64 = 1e-12;

/// Expands `expr` into dense coefficients over `var`, lowest power first.
/// Trailing near-zero coefficients are trimmed. Fails when the expression
/// contains another variable, a non-constant divisor, a non-integer or
/// negative power, or a transcendental function.
pub fn expand_polynomial(expr: &Expr, var: &str) -> Result<Vec<f64>, String> {
    let mut coeffs = expand(expr, var)?;
    while coeffs.len() > 1 && coeffs.last().is_some_and(|c| c.abs() < COEFF_EPS) {
        coeffs.pop();
    }
    Ok(coeffs)
}

fn expand(expr: &Expr, var: &str) -> Result<Vec<f64>, String> {
    match expr {
        Expr::Const(c) => Ok(vec![*c]),
        Expr::Var(name) if name == var => Ok(vec![0.0, 1.0]),
        Expr::Var(name) => Err(format!(
            "unexpected variable '{}' in polynomial expansion over '{}'",
            name, var
        )),
        Expr::Add(lhs, rhs) => Ok(combine(&expand(lhs, var)?, &expand(rhs, var)?, 1.0)),
        Expr::Sub(lhs, rhs) => Ok(combine(&expand(lhs, var)?, &expand(rhs, var)?, -1.0)),
        Expr::Mul(lhs, rhs) => Ok(convolve(&expand(lhs, var)?, &expand(rhs, var)?)),
        Expr::Div(lhs, rhs) => {
            let denominator = expand(rhs, var)?;
            if denominator.len() != 1 {
                return Err("division by a non-constant is not polynomial".to_string());
            }
            let d = denominator[0];
            if d == 0.0 {
                return Err("division by zero in polynomial expansion".to_string());
            }
            Ok(expand(lhs, var)?.iter().map(|c| c / d).collect())
        }
        Expr::Pow(base, exp) => {
            let k = match **exp {
                Expr::Const(k) if k >= 0.0 && k.fract() == 0.0 => k as usize,
                _ => {
                    return Err(
                        "only non-negative integer powers expand to polynomials".to_string()
                    );
                }
            };
            let base = expand(base, var)?;
            let mut acc = vec![1.0];
            for _ in 0..k {
                acc = convolve(&acc, &base);
            }
            Ok(acc)
        }
        other => Err(format!("expression '{}' is not polynomial", other)),
    }
}

/// a + sign*b, coefficient-wise
fn combine(a: &[f64], b: &[f64], sign: f64) -> Vec<f64> {
    let mut out = vec![0.0; a.len().max(b.len())];
    for (i, c) in a.iter().enumerate() {
        out[i] += c;
    }
    for (i, c) in b.iter().enumerate() {
        out[i] += sign * c;
    }
    out
}

fn convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            out[i + j] += ca * cb;
        }
    }
    out
}

/// Horner evaluation of a coefficient vector (index = power) at `x`.
pub fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Canonical rendering in descending powers through the display contract
/// formatter; near-zero terms are skipped, signs are folded into the
/// separators so "+ -" never appears.
pub fn poly_to_string(coeffs: &[f64]) -> String {
    let mut out = String::new();
    for power in (0..coeffs.len()).rev() {
        let c = coeffs[power];
        if c.abs() < COEFF_EPS {
            continue;
        }
        if out.is_empty() {
            if c < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if c < 0.0 { " - " } else { " + " });
        }
        out.push_str(&format_value(c.abs()));
        match power {
            0 => {}
            1 => out.push_str("*x"),
            p => out.push_str(&format!("*x^{}", p)),
        }
    }
    if out.is_empty() {
        out = format_value(0.0);
    }
    out
}
