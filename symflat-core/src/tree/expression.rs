use crate::number::Number;
use std::{collections::HashMap, hash::{Hash, Hasher}};
use super::{hash_unordered, multiset_eq, Equation, Factor, Power, SymbolicFunction, Term};

/// The operator preceding a [`Term`] in an [`Expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddOp {
    /// The sentinel operator of the first term.
    None,
    Add,
    Subtract,
}

impl AddOp {
    pub fn is_subtract(self) -> bool {
        self == AddOp::Subtract
    }

    /// Returns the operator with its sign flipped. [`AddOp::None`] counts as addition.
    pub fn negate(self) -> Self {
        match self {
            AddOp::None | AddOp::Add => AddOp::Subtract,
            AddOp::Subtract => AddOp::Add,
        }
    }
}

/// A sum / difference of terms, such as `3x - y + 2`.
///
/// The first term's operator is either [`AddOp::None`] or [`AddOp::Subtract`] (a leading minus).
/// Every other term is preceded by [`AddOp::Add`] or [`AddOp::Subtract`].
#[derive(Debug, Clone, Default)]
pub struct Expression {
    terms: Vec<(Term, AddOp)>,
}

/// A view of an expression that consists of a single factor, possibly negated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleExpression<'a> {
    pub factor: &'a Factor,
    pub negated: bool,
}

impl Expression {
    /// Creates an expression from its terms, normalizing the operators.
    pub fn new(mut terms: Vec<(Term, AddOp)>) -> Self {
        for (i, (_, op)) in terms.iter_mut().enumerate() {
            *op = match (i, *op) {
                (0, AddOp::Add) => AddOp::None,
                (i, AddOp::None) if i > 0 => AddOp::Add,
                (_, op) => op,
            };
        }
        Self { terms }
    }

    /// Creates an expression with a single term.
    pub fn from_term(term: Term) -> Self {
        Self { terms: vec![(term, AddOp::None)] }
    }

    /// Creates an expression with a single power.
    pub fn from_power(power: Power) -> Self {
        Self::from_term(Term::single(power))
    }

    /// Creates an expression with a single factor.
    pub fn from_factor(factor: Factor) -> Self {
        Self::from_term(Term::from_factor(factor))
    }

    /// Creates an expression holding a single number.
    pub fn number(number: Number) -> Self {
        Self::from_factor(Factor::Number(number))
    }

    /// Creates an expression holding a single symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::from_factor(Factor::symbol(name))
    }

    /// The expression `0`.
    pub fn zero() -> Self {
        Self::number(Number::zero())
    }

    pub fn terms(&self) -> &[(Term, AddOp)] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<(Term, AddOp)> {
        self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the factor if the expression is a single term, with a single power, with a single
    /// factor. The view records whether the term was subtracted.
    pub fn as_single(&self) -> Option<SingleExpression<'_>> {
        match self.terms.as_slice() {
            [(term, op)] => term.as_single_factor().map(|factor| SingleExpression {
                factor,
                negated: op.is_subtract(),
            }),
            _ => None,
        }
    }

    /// Returns the number if the expression is a single, non-negated number.
    pub fn as_number(&self) -> Option<&Number> {
        self.as_single()
            .filter(|single| !single.negated)
            .and_then(|single| single.factor.as_number())
    }

    /// Converts the expression into a factor that can stand in its place.
    ///
    /// A single non-negated factor is returned as-is, and a negated single number is returned
    /// negated. Anything else is wrapped in [`Factor::Nested`].
    pub fn into_factor(self) -> Factor {
        match self.as_single() {
            Some(SingleExpression { factor, negated: false }) => return factor.clone(),
            Some(SingleExpression { factor: Factor::Number(n), negated: true }) => {
                return Factor::Number(n.neg());
            },
            _ => {},
        }
        Factor::Nested(self)
    }

    /// Replaces every occurrence of the symbol `name` with `value`.
    pub fn replace(&self, name: &str, value: &Expression) -> Expression {
        let mut map = HashMap::new();
        map.insert(name.to_string(), value.clone());
        self.replace_many(&map)
    }

    /// Replaces every symbol that is a key of `values` with the corresponding expression, all at
    /// once. Substituted expressions are not searched again.
    pub fn replace_many(&self, values: &HashMap<String, Expression>) -> Expression {
        Self {
            terms: self.terms
                .iter()
                .map(|(term, op)| (replace_in_term(term, values), *op))
                .collect(),
        }
    }

    fn entries(&self) -> impl ExactSizeIterator<Item = (&Term, bool)> {
        self.terms.iter().map(|(term, op)| (term, op.is_subtract()))
    }
}

fn replace_in_term(term: &Term, values: &HashMap<String, Expression>) -> Term {
    let powers = term.powers()
        .iter()
        .map(|(power, op)| (replace_in_power(power, values), *op))
        .collect::<Vec<_>>();

    // the operators are unchanged, so this cannot fail
    Term::new(powers).unwrap_or_else(|_| term.clone())
}

fn replace_in_power(power: &Power, values: &HashMap<String, Expression>) -> Power {
    let factors = power.factors()
        .iter()
        .map(|factor| replace_in_factor(factor, values))
        .collect::<Vec<_>>();
    Power::new(factors).unwrap_or_else(|_| power.clone())
}

pub(crate) fn replace_in_factor(factor: &Factor, values: &HashMap<String, Expression>) -> Factor {
    match factor {
        Factor::Symbol(name) => match values.get(name) {
            Some(value) => value.clone().into_factor(),
            None => factor.clone(),
        },
        Factor::Nested(expr) => Factor::Nested(expr.replace_many(values)),
        Factor::List(items) => Factor::List(items.iter().map(|item| item.replace_many(values)).collect()),
        Factor::Function(function) => Factor::Function(SymbolicFunction {
            name: function.name.clone(),
            args: function.args.iter().map(|arg| arg.replace_many(values)).collect(),
            is_math_function: function.is_math_function,
        }),
        Factor::Number(_) | Factor::String(_) => factor.clone(),
    }
}

impl Equation {
    /// Replaces symbols on both sides of the equation.
    pub fn replace_many(&self, values: &HashMap<String, Expression>) -> Equation {
        Equation {
            lhs: self.lhs.replace_many(values),
            rhs: self.rhs.as_ref().map(|rhs| rhs.replace_many(values)),
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        let a = self.entries().collect::<Vec<_>>();
        let b = other.entries().collect::<Vec<_>>();
        multiset_eq(&a, &b)
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_unordered(self.entries(), state);
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Self::from_term(term)
    }
}

impl From<Factor> for Expression {
    fn from(factor: Factor) -> Self {
        Self::from_factor(factor)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use super::*;

    fn sym(name: &str) -> Term {
        Term::from_factor(Factor::symbol(name))
    }

    #[test]
    fn operator_normalization() {
        let expr = Expression::new(vec![(sym("x"), AddOp::Add), (sym("y"), AddOp::None)]);
        assert_eq!(expr.terms()[0].1, AddOp::None);
        assert_eq!(expr.terms()[1].1, AddOp::Add);

        let expr = Expression::new(vec![(sym("x"), AddOp::Subtract)]);
        assert_eq!(expr.terms()[0].1, AddOp::Subtract);
    }

    #[test]
    fn commutative_equality_and_hash() {
        let a = Expression::new(vec![(sym("x"), AddOp::None), (sym("y"), AddOp::Add), (sym("z"), AddOp::Subtract)]);
        let b = Expression::new(vec![(sym("y"), AddOp::None), (sym("z"), AddOp::Subtract), (sym("x"), AddOp::Add)]);
        assert_eq!(a, b);

        let set = [a, b].into_iter().collect::<HashSet<_>>();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn into_factor_rules() {
        assert_eq!(Expression::symbol("x").into_factor(), Factor::symbol("x"));

        let negated = Expression::new(vec![(Term::number(Number::from(3)), AddOp::Subtract)]);
        assert_eq!(negated.into_factor(), Factor::Number(Number::from(-3)));

        let negated = Expression::new(vec![(sym("x"), AddOp::Subtract)]);
        assert!(matches!(negated.into_factor(), Factor::Nested(_)));

        let sum = Expression::new(vec![(sym("x"), AddOp::None), (sym("y"), AddOp::Add)]);
        assert_eq!(sum.clone().into_factor(), Factor::Nested(sum));
    }

    #[test]
    fn simultaneous_replacement() {
        // x + y with x -> y, y -> x swaps them without chaining
        let expr = Expression::new(vec![(sym("x"), AddOp::None), (sym("y"), AddOp::Subtract)]);
        let mut values = HashMap::new();
        values.insert("x".to_string(), Expression::symbol("y"));
        values.insert("y".to_string(), Expression::symbol("x"));

        let swapped = expr.replace_many(&values);
        assert_eq!(swapped, Expression::new(vec![(sym("y"), AddOp::None), (sym("x"), AddOp::Subtract)]));
    }

    #[test]
    fn replacement_reaches_function_arguments() {
        let call = Factor::Function(SymbolicFunction::new("Sin", vec![Equation::expression(Expression::symbol("x"))]));
        let expr = Expression::from_factor(call);
        let replaced = expr.replace("x", &Expression::number(Number::from(2)));

        let function = replaced.as_single().unwrap().factor.as_function().unwrap();
        assert_eq!(function.args[0].lhs, Expression::number(Number::from(2)));
    }
}
