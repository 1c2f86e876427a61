use crate::{
    parser::{ast::chain::Chain, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;
use symflat_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The operator joining two chains in a [`Product`]. Implicit multiplication, as in `2x`, is
/// represented as [`MulOp::Mul`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MulOp {
    Mul,
    Div,
}

/// A product or quotient of chains, such as `3x^2/y`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Product {
    /// The first chain.
    pub first: Chain,

    /// The remaining chains, with the operator preceding each one.
    pub rest: Vec<(MulOp, Chain)>,

    /// The region of the source code that this product was parsed from.
    pub span: Range<usize>,
}

impl Parse for Product {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let first = input.try_parse::<Chain>()?;
        let start = first.span.start;
        let mut end = first.span.end;
        let mut rest = Vec::new();

        loop {
            let op = match input.peek_kind() {
                Some(TokenKind::Mul) => {
                    input.next_token()?;
                    MulOp::Mul
                },
                Some(TokenKind::Div) => {
                    input.next_token()?;
                    MulOp::Div
                },
                Some(kind) if kind.starts_implicit_factor() => MulOp::Mul,
                _ => break,
            };

            let chain = input.try_parse::<Chain>()?;
            end = chain.span.end;
            rest.push((op, chain));
        }

        Ok(Self { first, rest, span: start..end })
    }
}
