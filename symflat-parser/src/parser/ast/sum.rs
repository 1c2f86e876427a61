use crate::{
    parser::{ast::product::Product, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;
use symflat_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The operator joining two products in a [`Sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AddOp {
    Add,
    Sub,
}

/// A sum or difference of products, such as `-x + 2y - 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sum {
    /// Whether the first product is preceded by a `-` sign.
    pub negated: bool,

    /// The first product.
    pub first: Product,

    /// The remaining products, with the operator preceding each one.
    pub rest: Vec<(AddOp, Product)>,

    /// The region of the source code that this sum was parsed from.
    pub span: Range<usize>,
}

impl Parse for Sum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let start = input.span().start;
        let negated = match input.peek_kind() {
            Some(TokenKind::Sub) => {
                input.next_token()?;
                true
            },
            Some(TokenKind::Add) => {
                input.next_token()?;
                false
            },
            _ => false,
        };

        let first = input.try_parse::<Product>()?;
        let mut end = first.span.end;
        let mut rest = Vec::new();

        loop {
            let op = match input.peek_kind() {
                Some(TokenKind::Add) => AddOp::Add,
                Some(TokenKind::Sub) => AddOp::Sub,
                _ => break,
            };
            input.next_token()?;

            let product = input.try_parse::<Product>()?;
            end = product.span.end;
            rest.push((op, product));
        }

        Ok(Self { negated, first, rest, span: start..end })
    }
}
