use crate::parser::{ast::atom::Atom, token::Exp, Parse, Parser};
use std::ops::Range;
use symflat_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tower of exponents, such as `x^2^y`. The first atom is the base; the exponents apply from
/// the right, so `x^2^y` means `x^(2^y)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chain {
    /// The base followed by each exponent. Never empty.
    pub atoms: Vec<Atom>,

    /// The region of the source code that this chain was parsed from.
    pub span: Range<usize>,
}

impl Parse for Chain {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let base = input.try_parse::<Atom>()?;
        let start = base.span().start;
        let mut end = base.span().end;
        let mut atoms = vec![base];

        while input.try_parse::<Exp>().is_ok() {
            let exponent = input.try_parse::<Atom>()?;
            end = exponent.span().end;
            atoms.push(exponent);
        }

        Ok(Self { atoms, span: start..end })
    }
}
