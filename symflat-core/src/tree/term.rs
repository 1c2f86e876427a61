use crate::{
    error::{kind::{EmptyTerm, LeadingDivide}, ExpressionError},
    number::Number,
};
use std::hash::{Hash, Hasher};
use super::{hash_unordered, multiset_eq, Factor, Power};

/// The operator preceding a [`Power`] in a [`Term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MulOp {
    /// The sentinel operator of the first power.
    None,
    Multiply,
    Divide,
}

impl MulOp {
    pub fn is_divide(self) -> bool {
        self == MulOp::Divide
    }
}

/// A product / quotient of powers, such as `3x^2/y`. A term is never empty, and its first operator
/// is always [`MulOp::None`].
#[derive(Debug, Clone)]
pub struct Term {
    powers: Vec<(Power, MulOp)>,
}

impl Term {
    /// Creates a term from its powers.
    ///
    /// A leading [`MulOp::Multiply`] is normalized to [`MulOp::None`], and [`MulOp::None`] anywhere
    /// else means multiplication. A leading [`MulOp::Divide`] is an error.
    pub fn new(mut powers: Vec<(Power, MulOp)>) -> Result<Self, ExpressionError> {
        let Some((_, first_op)) = powers.first_mut() else {
            return Err(EmptyTerm.into());
        };
        match first_op {
            MulOp::Divide => return Err(LeadingDivide.into()),
            op => *op = MulOp::None,
        }
        for (_, op) in powers.iter_mut().skip(1) {
            if *op == MulOp::None {
                *op = MulOp::Multiply;
            }
        }
        Ok(Self { powers })
    }

    /// Creates a term with a single power.
    pub fn single(power: Power) -> Self {
        Self { powers: vec![(power, MulOp::None)] }
    }

    /// Creates a term with a single factor.
    pub fn from_factor(factor: Factor) -> Self {
        Self::single(Power::single(factor))
    }

    /// Creates a term holding a single number.
    pub fn number(number: Number) -> Self {
        Self::single(Power::number(number))
    }

    pub fn powers(&self) -> &[(Power, MulOp)] {
        &self.powers
    }

    pub fn into_powers(self) -> Vec<(Power, MulOp)> {
        self.powers
    }

    /// Returns the factor if the term is a single power with a single factor.
    pub fn as_single_factor(&self) -> Option<&Factor> {
        match self.powers.as_slice() {
            [(power, _)] => power.as_single(),
            _ => None,
        }
    }

    /// Splits the term into its leading numeric coefficient and the remainder.
    ///
    /// If the first power is a bare number, it is returned as the coefficient, along with the rest
    /// of the term (or [`None`] if the number was the whole term). If the rest would start with a
    /// division, a leading `1` is kept in front of it. If the term has no leading number, the
    /// coefficient is [`None`] and the remainder is the whole term.
    pub fn split_coefficient(&self) -> (Option<Number>, Option<Term>) {
        let Some(coefficient) = self.powers[0].0.as_number() else {
            return (None, Some(self.clone()));
        };

        let rest = &self.powers[1..];
        if rest.is_empty() {
            return (Some(coefficient.clone()), None);
        }

        let mut powers = Vec::with_capacity(rest.len() + 1);
        if rest[0].1.is_divide() {
            powers.push((Power::number(Number::one()), MulOp::None));
        }
        powers.extend(rest.iter().cloned());
        powers[0].1 = MulOp::None;
        (Some(coefficient.clone()), Some(Self { powers }))
    }

    /// Returns this term multiplied by a numeric coefficient, placed in front. A leading `1` that
    /// only exists to hold a division is replaced by the coefficient.
    pub fn with_coefficient(&self, coefficient: Number) -> Term {
        let mut powers = self.powers.clone();
        let placeholder = powers[0].0.as_number().is_some_and(Number::is_one)
            && powers.get(1).is_some_and(|(_, op)| op.is_divide());

        if placeholder {
            powers[0].0 = Power::number(coefficient);
        } else {
            powers[0].1 = MulOp::Multiply;
            powers.insert(0, (Power::number(coefficient), MulOp::None));
        }
        Self { powers }
    }

    /// Returns the (power, is divided) pairs that equality and hashing are defined over.
    fn entries(&self) -> impl ExactSizeIterator<Item = (&Power, bool)> {
        self.powers.iter().map(|(power, op)| (power, op.is_divide()))
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        let a = self.entries().collect::<Vec<_>>();
        let b = other.entries().collect::<Vec<_>>();
        multiset_eq(&a, &b)
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_unordered(self.entries(), state);
    }
}

impl From<Power> for Term {
    fn from(power: Power) -> Self {
        Self::single(power)
    }
}
