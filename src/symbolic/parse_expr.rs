//! String to `Expr` parser.
//!
//! Decomposition strategy: find the rightmost `+`/`-` outside brackets and
//! split there, then the rightmost `*`/`/`, then the leftmost `^` (power is
//! right-associative), then named function prefixes, then atoms (literals and
//! variables). An expression fully wrapped in brackets is unwrapped first.
//
//                  search recursion diagram
//                "y^2+exp(x)+ln(x)/y-x^2.3"        |
//                |       left  | right             |
//                |_________________________________|
//                |           split by last +/-     |
//                |_________________________________|
//                | y^2+exp(x)+ln(x)/y  |  x^2.3    |
//                |          |          |    |      |
//                |         \|/         |    |      |
//                |   split by last +   |    |      |
//                |_____________________|___\|/_____|
//                |  y^2+exp(x) | ln(x)/y |  ^      |
//                  etc...

use crate::symbolic::symbolic_engine::Expr;

/// Named function prefixes recognized by the parser. `tan`/`cot` are aliases
/// for the mathematical notation variants.
const FUNCTIONS: [(&str, fn(Box<Expr>) -> Expr); 9] = [
    ("exp", Expr::Exp),
    ("ln", Expr::Ln),
    ("log", Expr::Ln),
    ("sin", Expr::sin),
    ("cos", Expr::cos),
    ("tan", Expr::tg),
    ("tg", Expr::tg),
    ("cot", Expr::ctg),
    ("ctg", Expr::ctg),
];

pub fn parse_expression_str(input: &str) -> Result<Expr, String> {
    check_brackets(input)?;
    parse(input)
}

fn check_brackets(input: &str) -> Result<(), String> {
    let mut depth: i32 = 0;
    for c in input.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(format!("unbalanced brackets in '{}'", input));
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(format!("unbalanced brackets in '{}'", input));
    }
    Ok(())
}

fn parse(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty expression".to_string());
    }
    if let Some(inner) = strip_outer_brackets(input) {
        return parse(inner);
    }
    if let Some((pos, op)) = find_rightmost_binary(input, &['+', '-']) {
        let lhs = parse(&input[..pos])?;
        let rhs = parse(&input[pos + 1..])?;
        return Ok(if op == '+' { lhs + rhs } else { lhs - rhs });
    }
    // unary minus: no binary +/- was found at the top level
    if let Some(rest) = input.strip_prefix('-') {
        return Ok(-parse(rest)?);
    }
    if let Some((pos, op)) = find_rightmost_binary(input, &['*', '/']) {
        let lhs = parse(&input[..pos])?;
        let rhs = parse(&input[pos + 1..])?;
        return Ok(if op == '*' { lhs * rhs } else { lhs / rhs });
    }
    if let Some(pos) = find_leftmost_power(input) {
        let base = parse(&input[..pos])?;
        let exponent = parse(&input[pos + 1..])?;
        return Ok(base.pow(exponent));
    }
    for (name, constructor) in FUNCTIONS {
        if let Some(rest) = input.strip_prefix(name) {
            if let Some(inner) = strip_outer_brackets(rest) {
                return Ok(constructor(Box::new(parse(inner)?)));
            }
        }
    }
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }
    if is_identifier(input) {
        return Ok(Expr::Var(input.to_string()));
    }
    Err(format!("invalid expression fragment '{}'", input))
}

/// Returns the bracket-free interior when the whole input is wrapped in one
/// pair of matching brackets.
fn strip_outer_brackets(input: &str) -> Option<&str> {
    if !input.starts_with('(') || !input.ends_with(')') {
        return None;
    }
    let mut depth = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return if i == input.len() - 1 {
                        Some(&input[1..i])
                    } else {
                        None
                    };
                }
            }
            _ => {}
        }
    }
    None
}

/// Rightmost occurrence of one of `operators` outside brackets that acts as a
/// binary operator: it must follow an operand, not another operator or an
/// opening bracket, and must not be the sign of a scientific-notation
/// exponent (`1e-5`).
fn find_rightmost_binary(input: &str, operators: &[char]) -> Option<(usize, char)> {
    let mut depth = 0;
    let mut found = None;
    let mut prev: Option<char> = None;
    let mut prev2: Option<char> = None;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && operators.contains(&c) => {
                let after_operand = prev.is_some_and(|p| !"+-*/^(".contains(p));
                let exponent_sign = (c == '+' || c == '-')
                    && prev.is_some_and(|p| p == 'e' || p == 'E')
                    && prev2.is_some_and(|p| p.is_ascii_digit() || p == '.');
                if after_operand && !exponent_sign {
                    found = Some((i, c));
                }
            }
            _ => {}
        }
        if !c.is_whitespace() {
            prev2 = prev;
            prev = Some(c);
        }
    }
    found
}

/// Leftmost top-level `^`, so `a^b^c` parses right-associatively.
fn find_leftmost_power(input: &str) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '^' if depth == 0 && i > 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression_str("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression_str("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_addition() {
        let expr = parse_expression_str("x + 2").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_power() {
        let expr = parse_expression_str("x^2").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_exponential() {
        let expr = parse_expression_str("exp(x)").unwrap();
        assert_eq!(expr, Expr::Exp(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_logarithm_aliases() {
        let expr = parse_expression_str("log(x)").unwrap();
        assert_eq!(expr, Expr::Ln(Box::new(Expr::Var("x".to_string()))));
        let expr = parse_expression_str("ln(x)").unwrap();
        assert_eq!(expr, Expr::Ln(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_trig_aliases() {
        assert_eq!(
            parse_expression_str("tan(x)").unwrap(),
            Expr::tg(Box::new(Expr::Var("x".to_string())))
        );
        assert_eq!(
            parse_expression_str("cot(x)").unwrap(),
            Expr::ctg(Box::new(Expr::Var("x".to_string())))
        );
    }

    #[test]
    fn test_parse_with_brackets() {
        let expr = parse_expression_str("(x + y) * z").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Add(
                    Box::new(Expr::Var("x".to_string())),
                    Box::new(Expr::Var("y".to_string()))
                )),
                Box::new(Expr::Var("z".to_string()))
            )
        );
    }

    #[test]
    fn test_multiple_subtraction() {
        let result = parse_expression_str("x^2 - x - 1").unwrap();
        let x = Box::new(Expr::Var("x".to_string()));
        let to_check = Expr::Pow(x.clone(), Box::new(Expr::Const(2.0))) - *x - Expr::Const(1.0);
        assert_eq!(result, to_check);
    }

    #[test]
    fn test_division_is_left_associative() {
        // a/b*c must mean (a/b)*c
        let expr = parse_expression_str("8/2*2").unwrap();
        assert_eq!(expr.eval1D(0.0), 8.0);
    }

    #[test]
    fn test_unary_minus() {
        let expr = parse_expression_str("-x^2 + 3").unwrap();
        assert_eq!(expr.eval1D(2.0), -1.0);
    }

    #[test]
    fn test_scientific_literal() {
        let expr = parse_expression_str("1e-5 + x").unwrap();
        assert_eq!(expr.eval1D(0.0), 1e-5);
    }

    #[test]
    fn test_nested_functions() {
        let expr = parse_expression_str("sin(cos(x))").unwrap();
        assert_eq!(
            expr,
            Expr::sin(Box::new(Expr::cos(Box::new(Expr::Var("x".to_string())))))
        );
    }

    #[test]
    fn test_unmatched_brackets() {
        assert!(parse_expression_str("(x + y").is_err());
        assert!(parse_expression_str("x + y)").is_err());
    }

    #[test]
    fn test_invalid_expression() {
        assert!(parse_expression_str("(x +").is_err());
        assert!(parse_expression_str("2 $ 3").is_err());
    }
}
