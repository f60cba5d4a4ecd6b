//! Arithmetic expression evaluator.
//!
//! # Responsibility
//! - Sanitize raw calculator input and evaluate it against a fixed
//!   arithmetic grammar with conventional operator precedence.
//! - Reject anything that does not reduce to that grammar instead of
//!   guessing (no dynamic code evaluation of any kind).
//!
//! # Invariants
//! - Sanitization is unconditional and silent: characters outside digits,
//!   `.`, parentheses and `+ - * /` are stripped before tokenizing.
//! - Division by an exact zero fails with [`EvalError::DivisionByZero`];
//!   the evaluator never returns an infinite or NaN result string.
//!
//! Grammar:
//! ```text
//! expr   := term (('+'|'-') term)*
//! term   := factor (('*'|'/') factor)*
//! factor := number | '(' expr ')'
//! number := digits ('.' digits)?
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

static SANITIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.()+\-*/]").expect("valid sanitize regex"));

pub type EvalResult = Result<String, EvalError>;

/// Evaluation failure for malformed or non-finite arithmetic input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Nothing left to evaluate after sanitization.
    EmptyExpression,
    /// A numeric literal violates `digits ('.' digits)?`.
    InvalidNumber(String),
    /// A token appeared where the grammar does not allow it.
    UnexpectedToken(String),
    /// Input ended while an operand was still expected.
    UnexpectedEnd,
    /// Parentheses do not pair up.
    UnbalancedParens,
    /// Right operand of `/` evaluated to exactly zero.
    DivisionByZero,
    /// The result overflowed to a non-finite value.
    NonFiniteResult,
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyExpression => write!(f, "expression is empty"),
            Self::InvalidNumber(literal) => write!(f, "invalid number literal `{literal}`"),
            Self::UnexpectedToken(token) => write!(f, "unexpected token `{token}`"),
            Self::UnexpectedEnd => write!(f, "expression ended unexpectedly"),
            Self::UnbalancedParens => write!(f, "unbalanced parentheses"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::NonFiniteResult => write!(f, "result is not a finite number"),
        }
    }
}

impl Error for EvalError {}

/// Evaluates one arithmetic expression to its canonical result string.
///
/// Integer-valued results render without a decimal point; fractional
/// results use the shortest digits that round-trip through `f64`.
///
/// # Errors
/// - Returns [`EvalError`] for empty, malformed, or unbalanced input, for
///   division by zero, and for non-finite results.
pub fn evaluate(expression: &str) -> EvalResult {
    let sanitized = SANITIZE_RE.replace_all(expression, "");
    let tokens = tokenize(&sanitized)?;
    if tokens.is_empty() {
        return Err(EvalError::EmptyExpression);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.parse_expr()?;
    match parser.peek() {
        None => {}
        Some(Token::RParen) => return Err(EvalError::UnbalancedParens),
        Some(token) => return Err(EvalError::UnexpectedToken(token.describe())),
    }

    if !value.is_finite() {
        return Err(EvalError::NonFiniteResult);
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Plus => "+".to_string(),
            Self::Minus => "-".to_string(),
            Self::Star => "*".to_string(),
            Self::Slash => "/".to_string(),
            Self::LParen => "(".to_string(),
            Self::RParen => ")".to_string(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'+' => {
                tokens.push(Token::Plus);
                pos += 1;
            }
            b'-' => {
                tokens.push(Token::Minus);
                pos += 1;
            }
            b'*' => {
                tokens.push(Token::Star);
                pos += 1;
            }
            b'/' => {
                tokens.push(Token::Slash);
                pos += 1;
            }
            b'(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            b'0'..=b'9' => {
                let (token, next) = scan_number(input, pos)?;
                tokens.push(token);
                pos = next;
            }
            // A dot with no leading digit ("." or ".5") is outside the
            // grammar's number production.
            b'.' => return Err(EvalError::InvalidNumber(".".to_string())),
            // Sanitization removed everything else already.
            other => return Err(EvalError::UnexpectedToken((other as char).to_string())),
        }
    }

    Ok(tokens)
}

fn scan_number(input: &str, start: usize) -> Result<(Token, usize), EvalError> {
    let bytes = input.as_bytes();
    let mut end = start;

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let fraction_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        // `('.' digits)?` requires at least one digit after the dot.
        if end == fraction_start {
            return Err(EvalError::InvalidNumber(input[start..end].to_string()));
        }
    }

    let literal = &input[start..end];
    let value = literal
        .parse::<f64>()
        .map_err(|_| EvalError::InvalidNumber(literal.to_string()))?;
    Ok((Token::Number(value), end))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.parse_term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.parse_term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.parse_factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.parse_factor()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    let divisor = self.parse_factor()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_factor(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.parse_expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(token) => Err(EvalError::UnexpectedToken(token.describe())),
                    None => Err(EvalError::UnbalancedParens),
                }
            }
            Some(token) => Err(EvalError::UnexpectedToken(token.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate, EvalError};

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), "14");
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), "20");
    }

    #[test]
    fn left_associative_subtraction_and_division() {
        assert_eq!(evaluate("10 - 3 - 2").unwrap(), "5");
        assert_eq!(evaluate("100 / 5 / 2").unwrap(), "10");
    }

    #[test]
    fn decimal_arithmetic_keeps_round_trip_digits() {
        assert_eq!(evaluate("1.5 * 2").unwrap(), "3");
        assert_eq!(evaluate("0.1 + 0.2").unwrap(), "0.30000000000000004");
    }

    #[test]
    fn nested_parentheses() {
        assert_eq!(evaluate("((1 + 2) * (3 + 4))").unwrap(), "21");
    }

    #[test]
    fn stray_characters_are_stripped_silently() {
        assert_eq!(evaluate("2 + x3").unwrap(), "5");
        assert_eq!(evaluate("$1,000 / 4").unwrap(), "250");
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(evaluate(""), Err(EvalError::EmptyExpression));
        assert_eq!(evaluate("abc"), Err(EvalError::EmptyExpression));
    }

    #[test]
    fn incomplete_expression_fails() {
        assert_eq!(evaluate("2 + "), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("* 3"), Err(EvalError::UnexpectedToken("*".to_string())));
    }

    #[test]
    fn unbalanced_parentheses_fail() {
        assert_eq!(evaluate("(2 + 3"), Err(EvalError::UnbalancedParens));
        assert_eq!(evaluate("2 + 3)"), Err(EvalError::UnbalancedParens));
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(evaluate("5 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("5 / (2 - 2)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn malformed_number_literals_fail() {
        assert_eq!(evaluate("1.2.3"), Err(EvalError::InvalidNumber(".".to_string())));
        assert_eq!(evaluate("5."), Err(EvalError::InvalidNumber("5.".to_string())));
        assert_eq!(evaluate(".5"), Err(EvalError::InvalidNumber(".".to_string())));
    }

    #[test]
    fn adjacent_numbers_do_not_concatenate() {
        // "2 3" sanitizes to "23": the stripped space joins the digits,
        // matching the reference sanitizer's behavior.
        assert_eq!(evaluate("2 3").unwrap(), "23");
        assert_eq!(evaluate("(2)(3)"), Err(EvalError::UnexpectedToken("(".to_string())));
    }
}
