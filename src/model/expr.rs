//! Rate-law expressions
//!
//! Kinetic rate laws and observable rules are arithmetic expressions over
//! species concentrations, global parameters and simulation time. They are
//! parsed once at model-load time and *bound*: every identifier is resolved
//! to a species slot, a parameter slot or the time variable. Evaluation
//! during integration is therefore infallible — an undefined identifier is
//! a [`KinetError::ModelLoad`] long before the solver runs.
//!
//! # Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := factor (('*' | '/') factor)*
//! factor  := '-' factor | power
//! power   := primary ('^' factor)?          // right-associative
//! primary := number | ident | ident '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//!
//! Builtin functions: `exp`, `ln`, `log10`, `sqrt`, `abs`, `min`, `max`,
//! `pow`.

use std::collections::HashMap;

use nalgebra::DVector;

use crate::error::KinetError;

// =================================================================================================
// Tokens
// =================================================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

fn tokenize(src: &str) -> Result<Vec<Token>, KinetError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\r' | '\n' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // Scientific notation: 1.5e-3, 2E+8
                if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        i = j;
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let text: String = chars[start..i].iter().collect();
                let value = text.parse::<f64>().map_err(|_| {
                    KinetError::ModelLoad(format!("malformed number '{}' in '{}'", text, src))
                })?;
                tokens.push(Token::Number(value));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_ascii_alphanumeric() || chars[i] == '_')
                {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            other => {
                return Err(KinetError::ModelLoad(format!(
                    "unexpected character '{}' in expression '{}'",
                    other, src
                )));
            }
        }
    }

    Ok(tokens)
}

// =================================================================================================
// Abstract syntax
// =================================================================================================

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Builtin functions usable in rate laws and rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Exp,
    Ln,
    Log10,
    Sqrt,
    Abs,
    Min,
    Max,
    Pow,
}

impl Builtin {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "exp" => Some(Builtin::Exp),
            "ln" => Some(Builtin::Ln),
            "log10" => Some(Builtin::Log10),
            "sqrt" => Some(Builtin::Sqrt),
            "abs" => Some(Builtin::Abs),
            "min" => Some(Builtin::Min),
            "max" => Some(Builtin::Max),
            "pow" => Some(Builtin::Pow),
            _ => None,
        }
    }

    fn arity(&self) -> usize {
        match self {
            Builtin::Min | Builtin::Max | Builtin::Pow => 2,
            _ => 1,
        }
    }

    fn apply(&self, args: &[f64]) -> f64 {
        match self {
            Builtin::Exp => args[0].exp(),
            Builtin::Ln => args[0].ln(),
            Builtin::Log10 => args[0].log10(),
            Builtin::Sqrt => args[0].sqrt(),
            Builtin::Abs => args[0].abs(),
            Builtin::Min => args[0].min(args[1]),
            Builtin::Max => args[0].max(args[1]),
            Builtin::Pow => args[0].powf(args[1]),
        }
    }
}

/// Parsed, unbound expression. Identifiers are still plain strings.
#[derive(Debug, Clone)]
pub(crate) enum Expr {
    Number(f64),
    Ident(String),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(Builtin, Vec<Expr>),
}

/// Parse an expression source string into an [`Expr`] tree.
pub(crate) fn parse_expression(src: &str) -> Result<Expr, KinetError> {
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err(KinetError::ModelLoad(format!("empty expression in '{}'", src)));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        src,
    };
    let expr = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(KinetError::ModelLoad(format!(
            "trailing input after expression in '{}'",
            src
        )));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    src: &'a str,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn error(&self, message: &str) -> KinetError {
        KinetError::ModelLoad(format!("{} in expression '{}'", message, self.src))
    }

    fn expr(&mut self) -> Result<Expr, KinetError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, KinetError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.factor()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, KinetError> {
        if let Some(Token::Minus) = self.peek() {
            self.advance();
            let inner = self.factor()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, KinetError> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.advance();
            // Right-associative: a^b^c = a^(b^c)
            let exponent = self.factor()?;
            return Ok(Expr::Binary(
                BinOp::Pow,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, KinetError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Ident(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.advance();
                    let builtin = Builtin::lookup(&name)
                        .ok_or_else(|| self.error(&format!("unknown function '{}'", name)))?;
                    let mut args = vec![self.expr()?];
                    while let Some(Token::Comma) = self.peek() {
                        self.advance();
                        args.push(self.expr()?);
                    }
                    match self.advance() {
                        Some(Token::RParen) => {}
                        _ => return Err(self.error("missing ')' after function arguments")),
                    }
                    if args.len() != builtin.arity() {
                        return Err(self.error(&format!(
                            "function '{}' expects {} argument(s), got {}",
                            name,
                            builtin.arity(),
                            args.len()
                        )));
                    }
                    Ok(Expr::Call(builtin, args))
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("missing closing ')'")),
                }
            }
            _ => Err(self.error("unexpected end of expression")),
        }
    }
}

impl Expr {
    /// Evaluate an expression that may only reference the given constant
    /// environment (used for `id = expr` assignments at load time).
    pub(crate) fn eval_const(&self, env: &HashMap<String, f64>) -> Result<f64, KinetError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Ident(name) => env.get(name).copied().ok_or_else(|| {
                KinetError::ModelLoad(format!(
                    "identifier '{}' is not defined at this point",
                    name
                ))
            }),
            Expr::Neg(inner) => Ok(-inner.eval_const(env)?),
            Expr::Binary(op, lhs, rhs) => {
                let l = lhs.eval_const(env)?;
                let r = rhs.eval_const(env)?;
                Ok(apply_binop(*op, l, r))
            }
            Expr::Call(builtin, args) => {
                let values: Vec<f64> = args
                    .iter()
                    .map(|a| a.eval_const(env))
                    .collect::<Result<_, _>>()?;
                Ok(builtin.apply(&values))
            }
        }
    }

    /// Resolve all identifiers against the model's symbol tables.
    ///
    /// `time` is a reserved identifier bound to the simulation clock unless
    /// the model shadows it with a species or parameter of the same name.
    pub(crate) fn bind(&self, symbols: &SymbolTable<'_>) -> Result<CompiledExpr, KinetError> {
        match self {
            Expr::Number(value) => Ok(CompiledExpr::Number(*value)),
            Expr::Ident(name) => {
                if let Some(&index) = symbols.species.get(name) {
                    Ok(CompiledExpr::Species(index))
                } else if let Some(&index) = symbols.parameters.get(name) {
                    Ok(CompiledExpr::Parameter(index))
                } else if name == "time" {
                    Ok(CompiledExpr::Time)
                } else {
                    Err(KinetError::ModelLoad(format!(
                        "undefined identifier '{}' (not a species or parameter)",
                        name
                    )))
                }
            }
            Expr::Neg(inner) => Ok(CompiledExpr::Neg(Box::new(inner.bind(symbols)?))),
            Expr::Binary(op, lhs, rhs) => Ok(CompiledExpr::Binary(
                *op,
                Box::new(lhs.bind(symbols)?),
                Box::new(rhs.bind(symbols)?),
            )),
            Expr::Call(builtin, args) => {
                let bound: Vec<CompiledExpr> = args
                    .iter()
                    .map(|a| a.bind(symbols))
                    .collect::<Result<_, _>>()?;
                Ok(CompiledExpr::Call(*builtin, bound))
            }
        }
    }
}

fn apply_binop(op: BinOp, l: f64, r: f64) -> f64 {
    match op {
        BinOp::Add => l + r,
        BinOp::Sub => l - r,
        BinOp::Mul => l * r,
        BinOp::Div => l / r,
        BinOp::Pow => l.powf(r),
    }
}

/// Identifier resolution context used by [`Expr::bind`].
pub(crate) struct SymbolTable<'a> {
    pub species: &'a HashMap<String, usize>,
    pub parameters: &'a HashMap<String, usize>,
}

// =================================================================================================
// Compiled (bound) expressions
// =================================================================================================

/// Expression with all identifiers resolved to slots.
///
/// Evaluation is infallible and allocation-free; it runs once per reaction
/// per solver step.
#[derive(Debug, Clone)]
pub(crate) enum CompiledExpr {
    Number(f64),
    Species(usize),
    Parameter(usize),
    Time,
    Neg(Box<CompiledExpr>),
    Binary(BinOp, Box<CompiledExpr>, Box<CompiledExpr>),
    Call(Builtin, Vec<CompiledExpr>),
}

impl CompiledExpr {
    pub(crate) fn eval(&self, t: f64, y: &DVector<f64>, params: &[f64]) -> f64 {
        match self {
            CompiledExpr::Number(value) => *value,
            CompiledExpr::Species(index) => y[*index],
            CompiledExpr::Parameter(index) => params[*index],
            CompiledExpr::Time => t,
            CompiledExpr::Neg(inner) => -inner.eval(t, y, params),
            CompiledExpr::Binary(op, lhs, rhs) => {
                apply_binop(*op, lhs.eval(t, y, params), rhs.eval(t, y, params))
            }
            CompiledExpr::Call(builtin, args) => {
                // Builtins have arity <= 2, so a fixed buffer avoids allocation
                let mut values = [0.0; 2];
                for (slot, arg) in values.iter_mut().zip(args.iter()) {
                    *slot = arg.eval(t, y, params);
                }
                builtin.apply(&values[..args.len()])
            }
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bind_with(
        src: &str,
        species: &[(&str, usize)],
        params: &[(&str, usize)],
    ) -> Result<CompiledExpr, KinetError> {
        let species: HashMap<String, usize> =
            species.iter().map(|(s, i)| (s.to_string(), *i)).collect();
        let parameters: HashMap<String, usize> =
            params.iter().map(|(s, i)| (s.to_string(), *i)).collect();
        parse_expression(src)?.bind(&SymbolTable {
            species: &species,
            parameters: &parameters,
        })
    }

    fn eval_simple(src: &str, y: &[f64], params: &[f64]) -> f64 {
        let compiled = bind_with(src, &[("S1", 0), ("S2", 1)], &[("k1", 0), ("k2", 1)])
            .expect("bind failed");
        compiled.eval(0.0, &DVector::from_row_slice(y), params)
    }

    #[test]
    fn test_mass_action_rate() {
        // k1 * S1 with k1 = 0.1, S1 = 10 -> rate 1.0
        let rate = eval_simple("k1*S1", &[10.0, 0.0], &[0.1, 0.0]);
        assert!((rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_precedence_and_unary_minus() {
        let value = eval_simple("-k1 + S1 * 2", &[3.0, 0.0], &[1.0, 0.0]);
        assert!((value - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_right_associative() {
        // 2^3^2 = 2^9 = 512
        let value = eval_simple("2^3^2", &[0.0, 0.0], &[0.0, 0.0]);
        assert!((value - 512.0).abs() < 1e-9);
    }

    #[test]
    fn test_builtin_functions() {
        let value = eval_simple("exp(0) + min(S1, S2) + pow(2, 3)", &[4.0, 7.0], &[0.0, 0.0]);
        assert!((value - (1.0 + 4.0 + 8.0)).abs() < 1e-12);
    }

    #[test]
    fn test_scientific_notation() {
        let value = eval_simple("1.5e-3 * 1e3", &[0.0, 0.0], &[0.0, 0.0]);
        assert!((value - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_time_identifier() {
        let compiled = bind_with("time * 2", &[], &[]).expect("bind failed");
        let value = compiled.eval(3.5, &DVector::zeros(0), &[]);
        assert!((value - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_identifier_is_load_error() {
        let err = bind_with("k9 * S1", &[("S1", 0)], &[("k1", 0)]).unwrap_err();
        match err {
            KinetError::ModelLoad(msg) => assert!(msg.contains("k9")),
            other => panic!("expected ModelLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_function_rejected() {
        assert!(parse_expression("frobnicate(1)").is_err());
    }

    #[test]
    fn test_wrong_arity_rejected() {
        assert!(parse_expression("exp(1, 2)").is_err());
        assert!(parse_expression("min(1)").is_err());
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(parse_expression("1 + 2 )").is_err());
    }

    #[test]
    fn test_eval_const_with_environment() {
        let mut env = HashMap::new();
        env.insert("ka".to_string(), 0.25);
        let expr = parse_expression("ka * 4").unwrap();
        assert!((expr.eval_const(&env).unwrap() - 1.0).abs() < 1e-12);

        let unknown = parse_expression("kb * 4").unwrap();
        assert!(unknown.eval_const(&env).is_err());
    }
}
