use crate::{
    parser::{
        ast::{equation::Equation, literal::LitSym},
        token::{CloseSquare, Comma, Define, OpenSquare},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;
use symflat_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The header of a function definition, such as `f[x, y]` in `f[x, y] := x + y`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FuncHeader {
    /// The name of the function.
    pub name: LitSym,

    /// The names of the parameters, in order.
    pub params: Vec<LitSym>,

    /// The region of the source code that this header was parsed from.
    pub span: Range<usize>,
}

impl Parse for FuncHeader {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        input.try_parse::<OpenSquare>()?;
        let params = if input.peek_kind() == Some(TokenKind::CloseSquare) {
            Vec::new()
        } else {
            input.parse_delimited::<LitSym, Comma>()?
        };
        let close = input.try_parse::<CloseSquare>()?;

        Ok(Self {
            span: name.span.start..close.span.end,
            name,
            params,
        })
    }
}

/// A single statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stmt {
    /// An equation or expression to evaluate, including assignments such as `x = 2`.
    Equation(Equation),

    /// A user function definition, such as `f[x] := x^2`.
    Define(FuncHeader, Equation),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn span(&self) -> Range<usize> {
        match self {
            Stmt::Equation(equation) => equation.span.clone(),
            Stmt::Define(header, body) => header.span.start..body.span.end,
        }
    }
}

impl Parse for Stmt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let definition = input.try_parse_with_fn(|input| {
            let header = input.try_parse::<FuncHeader>()?;
            input.try_parse::<Define>()?;
            Ok(header)
        });

        match definition {
            Ok(header) => Ok(Stmt::Define(header, input.try_parse()?)),
            Err(_) => input.try_parse().map(Stmt::Equation),
        }
    }
}
