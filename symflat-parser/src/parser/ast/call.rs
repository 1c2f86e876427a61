use crate::{
    parser::{
        ast::{equation::Equation, literal::LitSym},
        token::{CloseSquare, Comma, OpenSquare},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;
use symflat_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `Sin[x]` or `f[1, y = 2]`. Arguments are equations, so commands can
/// receive relations as well as plain expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Equation>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the bracketed argument list of a call whose name has already been parsed.
    pub(crate) fn parse_args(input: &mut Parser, name: LitSym) -> Result<Self, Error> {
        input.try_parse::<OpenSquare>()?;
        let args = if input.peek_kind() == Some(TokenKind::CloseSquare) {
            Vec::new()
        } else {
            input.parse_delimited::<Equation, Comma>()?
        };
        let close = input.try_parse::<CloseSquare>()?;

        Ok(Self {
            span: name.span.start..close.span.end,
            name,
            args,
        })
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        Self::parse_args(input, name)
    }
}
