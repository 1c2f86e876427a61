//! Conversion from the parser's syntax tree to the expression tree.
//!
//! Conversion is purely structural: nothing is evaluated and no symbols are resolved. The only
//! failure is a number literal that cannot be read, which is reported at the literal's span.

use crate::{error::{kind::InvalidNumber, ExpressionError}, number::Number};
use symflat_error::Error;
use symflat_parser::parser::ast;
use super::{AddOp, Equation, Expression, Factor, MulOp, Power, SymbolicFunction, Term};

impl TryFrom<&ast::LitNum> for Number {
    type Error = Error;

    fn try_from(lit: &ast::LitNum) -> Result<Self, Self::Error> {
        lit.value.parse::<Number>().map_err(|_| {
            let err: ExpressionError = InvalidNumber { literal: lit.value.clone() }.into();
            Error::new(vec![lit.span.clone()], err)
        })
    }
}

impl TryFrom<&ast::Atom> for Factor {
    type Error = Error;

    fn try_from(atom: &ast::Atom) -> Result<Self, Self::Error> {
        Ok(match atom {
            ast::Atom::Number(lit) => Factor::Number(Number::try_from(lit)?),
            ast::Atom::Symbol(sym) => Factor::Symbol(sym.name.clone()),
            ast::Atom::Str(lit) => Factor::String(lit.value.clone()),
            ast::Atom::Paren(sum, _) => Factor::Nested(Expression::try_from(sum.as_ref())?),
            ast::Atom::List(items, _) => Factor::List(
                items.iter()
                    .map(Expression::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            ast::Atom::Call(call) => Factor::Function(SymbolicFunction::try_from(call)?),
            ast::Atom::Neg(inner, _) => match Factor::try_from(inner.as_ref())? {
                Factor::Number(n) => Factor::Number(n.neg()),
                other => Factor::Nested(Expression::new(vec![
                    (Term::from_factor(other), AddOp::Subtract),
                ])),
            },
        })
    }
}

impl TryFrom<&ast::Call> for SymbolicFunction {
    type Error = Error;

    fn try_from(call: &ast::Call) -> Result<Self, Self::Error> {
        let args = call.args
            .iter()
            .map(Equation::try_from)
            .collect::<Result<_, _>>()?;
        Ok(SymbolicFunction::new(call.name.name.clone(), args))
    }
}

impl TryFrom<&ast::Chain> for Power {
    type Error = Error;

    fn try_from(chain: &ast::Chain) -> Result<Self, Self::Error> {
        let factors = chain.atoms
            .iter()
            .map(Factor::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Power::new(factors).map_err(|err| Error::new(vec![chain.span.clone()], err))
    }
}

impl TryFrom<&ast::Product> for Term {
    type Error = Error;

    fn try_from(product: &ast::Product) -> Result<Self, Self::Error> {
        let mut powers = vec![(Power::try_from(&product.first)?, MulOp::None)];
        for (op, chain) in &product.rest {
            let op = match op {
                ast::MulOp::Mul => MulOp::Multiply,
                ast::MulOp::Div => MulOp::Divide,
            };
            powers.push((Power::try_from(chain)?, op));
        }
        Term::new(powers).map_err(|err| Error::new(vec![product.span.clone()], err))
    }
}

impl TryFrom<&ast::Sum> for Expression {
    type Error = Error;

    fn try_from(sum: &ast::Sum) -> Result<Self, Self::Error> {
        let first_op = if sum.negated { AddOp::Subtract } else { AddOp::None };
        let mut terms = vec![(Term::try_from(&sum.first)?, first_op)];
        for (op, product) in &sum.rest {
            let op = match op {
                ast::AddOp::Add => AddOp::Add,
                ast::AddOp::Sub => AddOp::Subtract,
            };
            terms.push((Term::try_from(product)?, op));
        }
        Ok(Expression::new(terms))
    }
}

impl TryFrom<&ast::Equation> for Equation {
    type Error = Error;

    fn try_from(equation: &ast::Equation) -> Result<Self, Self::Error> {
        Ok(Equation {
            lhs: Expression::try_from(&equation.lhs)?,
            rhs: equation.rhs.as_ref().map(Expression::try_from).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symflat_parser::Parser;
    use super::*;

    fn convert(source: &str) -> Equation {
        let ast = Parser::new(source).try_parse_full::<ast::Equation>().unwrap();
        Equation::try_from(&ast).unwrap()
    }

    #[test]
    fn structure_follows_source() {
        assert_eq!(convert("3x^2 - y/2").to_string(), "3x^2 - y/2");
        assert_eq!(convert("-(a + b)").to_string(), "-(a + b)");
        assert_eq!(convert("Sin[x] = {1, \"s\"}").to_string(), "Sin[x] = {1, \"s\"}");
    }

    #[test]
    fn negated_atoms() {
        let equation = convert("2 * -3");
        let term = &equation.lhs.terms()[0].0;
        assert_eq!(term.powers()[1].0.as_number(), Some(&Number::from(-3)));

        let equation = convert("2 * -x");
        let term = &equation.lhs.terms()[0].0;
        let nested = term.powers()[1].0.as_single().unwrap().as_nested().unwrap();
        assert_eq!(nested.terms()[0].1, AddOp::Subtract);
    }
}
