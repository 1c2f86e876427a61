use crate::{
    error::{kind::EmptyPower, ExpressionError},
    number::Number,
};
use super::Factor;

/// An exponent tower `f0 ^ f1 ^ f2 ...`, stored as a flat, non-empty list. The first factor is the
/// base; the exponents apply from the right, so `[x, 2, 3]` is `x^(2^3)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Power {
    factors: Vec<Factor>,
}

impl Power {
    /// Creates a power from its factors.
    pub fn new(factors: Vec<Factor>) -> Result<Self, ExpressionError> {
        if factors.is_empty() {
            Err(EmptyPower.into())
        } else {
            Ok(Self { factors })
        }
    }

    /// Creates a power with a single factor and no exponent.
    pub fn single(factor: Factor) -> Self {
        Self { factors: vec![factor] }
    }

    /// Creates a power holding a single number.
    pub fn number(number: Number) -> Self {
        Self::single(Factor::Number(number))
    }

    /// Creates the power `base ^ exponent`.
    pub fn with_exponent(base: Factor, exponent: Number) -> Self {
        Self { factors: vec![base, Factor::Number(exponent)] }
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn into_factors(self) -> Vec<Factor> {
        self.factors
    }

    /// The base of the tower.
    pub fn base(&self) -> &Factor {
        &self.factors[0]
    }

    /// Returns the factor if the power has no exponents.
    pub fn as_single(&self) -> Option<&Factor> {
        match self.factors.as_slice() {
            [factor] => Some(factor),
            _ => None,
        }
    }

    /// Returns the number if the power is a single number.
    pub fn as_number(&self) -> Option<&Number> {
        self.as_single().and_then(Factor::as_number)
    }

    /// Returns the base and the exponent if the power is `base ^ n` for a real number `n`.
    pub fn as_real_exponent(&self) -> Option<(&Factor, &Number)> {
        match self.factors.as_slice() {
            [base, Factor::Number(exponent)] if !exponent.is_imaginary() => Some((base, exponent)),
            _ => None,
        }
    }
}

impl From<Factor> for Power {
    fn from(factor: Factor) -> Self {
        Self::single(factor)
    }
}
