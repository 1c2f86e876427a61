use crate::{
    parser::{error::UnexpectedToken, token::Name, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;
use symflat_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal. The digits are kept as written, so that the evaluator can read them at any
/// precision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The digits of the number literal, such as `12` or `0.5`.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Int | TokenKind::Float => Ok(Self {
                value: token.lexeme.to_owned(),
                span: token.span,
            }),
            found => Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float],
                found,
            })),
        }
    }
}

/// A symbol / identifier literal. Symbols are used to represent variables and functions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Name>()?;
        Ok(Self {
            name: token.lexeme,
            span: token.span,
        })
    }
}

/// A string literal, such as `"hello"`. The value does not include the quotes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitStr {
    /// The contents of the string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitStr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        if token.kind == TokenKind::Str {
            let value = token.lexeme
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or(token.lexeme);
            Ok(Self {
                value: value.to_owned(),
                span: token.span,
            })
        } else {
            Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[TokenKind::Str],
                found: token.kind,
            }))
        }
    }
}
