use crate::parser::{ast::sum::Sum, token::Assign, Parse, Parser};
use std::ops::Range;
use symflat_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An expression, optionally related to another by `=`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side.
    pub lhs: Sum,

    /// The right-hand side, if the equation has one.
    pub rhs: Option<Sum>,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl Parse for Equation {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = input.try_parse::<Sum>()?;
        let rhs = if input.try_parse::<Assign>().is_ok() {
            Some(input.try_parse::<Sum>()?)
        } else {
            None
        };

        let span = lhs.span.start..rhs.as_ref().map_or(lhs.span.end, |rhs| rhs.span.end);
        Ok(Self { lhs, rhs, span })
    }
}
