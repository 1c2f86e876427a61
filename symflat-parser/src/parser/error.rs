use ariadne::Fmt;
use symflat_attrs::ErrorKind;
use symflat_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of file",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the statement was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of statement",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "separate statements with a new line or `;`",
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A value was expected, but the token found cannot start one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected an {}", "expression".fg(EXPR)),
    labels = [format!("found {:?} here", found)],
    help = "expressions start with a number, a name, a string, `(`, `{` or a sign",
)]
pub struct ExpectedExpr {
    /// The token that was found.
    pub found: TokenKind,
}
