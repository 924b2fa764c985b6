//! Errors that can occur while parsing an expression.

use ariadne::Fmt;
use calc_attrs::ErrorKind;
use calc_error::EXPR;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", self.found),
    labels = ["I could not understand this"],
)]
pub struct UnexpectedToken {
    /// The lexeme that was found.
    pub found: String,
}

/// Unexpected end of an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("I expected to see more {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEoExpr;

/// The end of the expression was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of expression",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An opening parenthesis was never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing closing parenthesis",
    labels = ["this parenthesis is never closed"],
    help = format!("add a {} to close it", "`)`".fg(EXPR)),
)]
pub struct UnclosedParenthesis;

/// An `=` appeared somewhere other than after a variable name at the start of the input.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected assignment",
    labels = ["this assignment"],
    help = format!(
        "variables are single lowercase letters other than `x` and `y`, e.g. {}",
        "a = 3".fg(EXPR),
    ),
)]
pub struct InvalidAssignment;

/// A number literal could not be represented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid number", self.lexeme),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The text of the literal.
    pub lexeme: String,
}

/// Parentheses, calls or prefix operators were nested past the parser's limit.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = [format!("nesting goes past {} levels here", self.max)],
    help = "simplify the expression, or split it into several inputs using variables",
)]
pub struct ExpressionTooDeep {
    /// The maximum nesting depth.
    pub max: usize,
}

/// The expression contains more operators than the parser accepts.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is too long",
    labels = [format!("this is operator number {}, past the limit of {}", self.max + 1, self.max)],
    help = "split the expression into several inputs using variables or `ans`",
)]
pub struct ExpressionTooLong {
    /// The maximum number of operators.
    pub max: usize,
}
