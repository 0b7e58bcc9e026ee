//! Arithmetic expression parser and evaluator.
//!
//! Grammar (all operators left-associative, unary binds tighter than `*`):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | 'pi' | 'e' | FUNC '(' expr ')' | '(' expr ')'
//! FUNC    := 'sqrt' | 'sin' | 'cos' | 'tan'
//! NUMBER  := DIGIT+ ('.' DIGIT*)? | '.' DIGIT+
//! ```
//!
//! Input is tokenized against this fixed alphabet first; anything else is
//! rejected before parsing. Evaluation only ever walks the resulting tree.
//!
//! Both the token count and the parenthesis/unary nesting are bounded, which
//! bounds the tree height and so the recursion in `eval` and in drop.

use std::fmt;

use thiserror::Error;

/// Errors produced while tokenizing, parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),

    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected {0}")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expression is empty")]
    Empty,

    #[error("expression nesting is too deep")]
    TooDeep,

    #[error("expression is too long (limit is {0} tokens)")]
    TooLong(usize),

    #[error("result is not a finite number")]
    NonFinite,
}

const MAX_DEPTH: usize = 64;
const MAX_TOKENS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sqrt,
    Sin,
    Cos,
    Tan,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(Self::Sqrt),
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            _ => None,
        }
    }

    fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sqrt => x.sqrt(),
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

impl Expr {
    /// Evaluate the tree. Non-finite values are returned as-is.
    pub fn eval(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Neg(inner) => -inner.eval(),
            Self::Binary(op, lhs, rhs) => {
                let (a, b) = (lhs.eval(), rhs.eval());
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                }
            }
            Self::Call(func, arg) => func.apply(arg.eval()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Func(Func),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Func(func) => write!(f, "function {func:?}"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if tokens.len() > MAX_TOKENS {
            return Err(ExprError::TooLong(MAX_TOKENS));
        }
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
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
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                if text == "." || text.matches('.').count() > 1 {
                    return Err(ExprError::InvalidNumber(text));
                }
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ExprError::InvalidNumber(text.clone()))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let ident: String = chars[start..i].iter().collect();
                let token = match ident.as_str() {
                    "pi" => Token::Number(std::f64::consts::PI),
                    "e" => Token::Number(std::f64::consts::E),
                    name => Func::from_name(name)
                        .map(Token::Func)
                        .ok_or(ExprError::UnknownIdentifier(ident.clone()))?,
                };
                tokens.push(token);
            }
            other => return Err(ExprError::UnexpectedChar(other, i)),
        }
    }

    if tokens.len() > MAX_TOKENS {
        return Err(ExprError::TooLong(MAX_TOKENS));
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), ExprError> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(ExprError::UnexpectedToken(token.to_string())),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    fn descend(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        self.descend()?;
        let result = match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.unary().map(|inner| Expr::Neg(Box::new(inner)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        };
        self.depth -= 1;
        result
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Func(func)) => {
                self.expect(Token::LParen)?;
                let arg = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(Expr::Call(func, Box::new(arg)))
            }
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(token) => Err(ExprError::UnexpectedToken(token.to_string())),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

/// Parse an expression into a tree.
pub fn parse(input: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;

    match parser.next() {
        None => Ok(expr),
        Some(token) => Err(ExprError::UnexpectedToken(token.to_string())),
    }
}

/// Parse and evaluate an expression, rejecting non-finite results.
pub fn evaluate(input: &str) -> Result<f64, ExprError> {
    let value = parse(input)?.eval();
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExprError::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("2 + 2"), Ok(4.0));
        assert_eq!(evaluate("10 - 4 - 3"), Ok(3.0));
        assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(evaluate("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(evaluate("8 / 4 / 2"), Ok(1.0));
        assert_eq!(evaluate("1.5 * 2"), Ok(3.0));
        assert_eq!(evaluate(".5 + .5"), Ok(1.0));
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(evaluate("-3"), Ok(-3.0));
        assert_eq!(evaluate("-2 * 3"), Ok(-6.0));
        assert_eq!(evaluate("2 - -3"), Ok(5.0));
        assert_eq!(evaluate("+4"), Ok(4.0));
        assert_eq!(evaluate("-(1 + 1)"), Ok(-2.0));
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(evaluate("sqrt(16)"), Ok(4.0));
        assert!(approx(evaluate("sin(0)").unwrap(), 0.0));
        assert!(approx(evaluate("cos(0)").unwrap(), 1.0));
        assert!(approx(evaluate("tan(0)").unwrap(), 0.0));
        assert!(approx(evaluate("pi").unwrap(), std::f64::consts::PI));
        assert!(approx(evaluate("2 * e").unwrap(), 2.0 * std::f64::consts::E));
        assert!(approx(evaluate("sqrt(sqrt(16)) + cos(pi)").unwrap(), 1.0));
    }

    #[test]
    fn test_token_limit() {
        // 1 + 255 * "+1" = 511 tokens
        let at_limit = format!("1{}", "+1".repeat(255));
        assert_eq!(evaluate(&at_limit), Ok(256.0));

        let over_limit = format!("1{}", "+1".repeat(256));
        assert_eq!(evaluate(&over_limit), Err(ExprError::TooLong(MAX_TOKENS)));

        let huge = format!("1{}", "*1".repeat(300_000));
        assert_eq!(evaluate(&huge), Err(ExprError::TooLong(MAX_TOKENS)));
    }

    #[test]
    fn test_non_finite_results_rejected() {
        assert_eq!(evaluate("1/0"), Err(ExprError::NonFinite));
        assert_eq!(evaluate("-1/0"), Err(ExprError::NonFinite));
        assert_eq!(evaluate("sqrt(-1)"), Err(ExprError::NonFinite));
        assert_eq!(evaluate("0/0"), Err(ExprError::NonFinite));
    }

    #[test]
    fn test_rejects_characters_outside_alphabet() {
        assert!(matches!(
            evaluate("2 ^ 3"),
            Err(ExprError::UnexpectedChar('^', 2))
        ));
        assert!(matches!(
            evaluate("process.exit()"),
            Err(ExprError::UnknownIdentifier(_))
        ));
        assert!(matches!(
            evaluate("log(10)"),
            Err(ExprError::UnknownIdentifier(_))
        ));
        assert!(matches!(evaluate("2; 3"), Err(ExprError::UnexpectedChar(';', 1))));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(evaluate(""), Err(ExprError::Empty));
        assert_eq!(evaluate("   "), Err(ExprError::Empty));
        assert_eq!(evaluate("2 +"), Err(ExprError::UnexpectedEnd));
        assert_eq!(evaluate("(2 + 3"), Err(ExprError::UnexpectedEnd));
        assert!(matches!(evaluate("2 3"), Err(ExprError::UnexpectedToken(_))));
        assert!(matches!(evaluate("sqrt 4"), Err(ExprError::UnexpectedToken(_))));
        assert!(matches!(evaluate("1..2"), Err(ExprError::InvalidNumber(_))));
        assert!(matches!(evaluate("."), Err(ExprError::InvalidNumber(_))));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(evaluate(&deep), Err(ExprError::TooDeep));

        let unary = format!("{}1", "-".repeat(200));
        assert_eq!(evaluate(&unary), Err(ExprError::TooDeep));
    }

    #[test]
    fn test_parse_builds_left_associative_tree() {
        let tree = parse("1 - 2 - 3").unwrap();
        assert_eq!(
            tree,
            Expr::Binary(
                BinOp::Sub,
                Box::new(Expr::Binary(
                    BinOp::Sub,
                    Box::new(Expr::Number(1.0)),
                    Box::new(Expr::Number(2.0)),
                )),
                Box::new(Expr::Number(3.0)),
            )
        );
    }
}
