use crate::{
    parser::{
        ast::{
            call::Call,
            literal::{LitNum, LitStr, LitSym},
            sum::Sum,
        },
        error::{ExpectedExpr, UnexpectedEof},
        token::{CloseCurly, CloseParen, Comma},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;
use symflat_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The smallest unit of a value: a literal, a call, or a bracketed group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Atom {
    /// A number literal, such as `2` or `0.5`.
    Number(LitNum),

    /// A symbol, such as `x`.
    Symbol(LitSym),

    /// A string literal, such as `"text"`.
    Str(LitStr),

    /// A parenthesized sum, such as `(x + 1)`.
    Paren(Box<Sum>, Range<usize>),

    /// A list of sums, such as `{1, x, y^2}`.
    List(Vec<Sum>, Range<usize>),

    /// A function call, such as `Sin[x]`.
    Call(Call),

    /// A negated atom, such as the `-x` in `2 * -x`.
    Neg(Box<Atom>, Range<usize>),
}

impl Atom {
    /// Returns the span of the atom.
    pub fn span(&self) -> Range<usize> {
        match self {
            Atom::Number(num) => num.span.clone(),
            Atom::Symbol(sym) => sym.span.clone(),
            Atom::Str(string) => string.span.clone(),
            Atom::Paren(_, span) | Atom::List(_, span) | Atom::Neg(_, span) => span.clone(),
            Atom::Call(call) => call.span(),
        }
    }
}

impl Parse for Atom {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let Some(kind) = input.peek_kind() else {
            return Err(input.error(UnexpectedEof));
        };

        match kind {
            TokenKind::Int | TokenKind::Float => input.try_parse().map(Atom::Number),
            TokenKind::Str => input.try_parse().map(Atom::Str),
            TokenKind::Name => {
                let name = input.try_parse::<LitSym>()?;
                if input.peek_kind() == Some(TokenKind::OpenSquare) {
                    Call::parse_args(input, name).map(Atom::Call)
                } else {
                    Ok(Atom::Symbol(name))
                }
            },
            TokenKind::OpenParen => {
                let open = input.next_token()?;
                let sum = input.try_parse::<Sum>()?;
                let close = input.try_parse::<CloseParen>()?;
                Ok(Atom::Paren(Box::new(sum), open.span.start..close.span.end))
            },
            TokenKind::OpenCurly => {
                let open = input.next_token()?;
                let items = if input.peek_kind() == Some(TokenKind::CloseCurly) {
                    Vec::new()
                } else {
                    input.parse_delimited::<Sum, Comma>()?
                };
                let close = input.try_parse::<CloseCurly>()?;
                Ok(Atom::List(items, open.span.start..close.span.end))
            },
            TokenKind::Sub => {
                let sign = input.next_token()?;
                let inner = input.try_parse::<Atom>()?;
                let span = sign.span.start..inner.span().end;
                Ok(Atom::Neg(Box::new(inner), span))
            },
            TokenKind::Add => {
                input.next_token()?;
                input.try_parse::<Atom>()
            },
            found => Err(input.error(ExpectedExpr { found })),
        }
    }
}
