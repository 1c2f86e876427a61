use crate::{
    error::Error,
    number::Number,
    tree::{AddOp, Expression, Factor, Term},
};
use std::collections::HashMap;
use super::Toolset;

/// Flattens an expression.
///
/// Each term is flattened, and parenthesized sums are spliced into the outer sum (negating their
/// terms if the parentheses were subtracted). Terms that differ only in their leading numeric
/// coefficient are then combined, constants are summed into a single leading term, and terms
/// whose coefficients cancel out are dropped.
pub(super) fn flatten(toolset: &mut Toolset<'_>, expr: &Expression) -> Result<Expression, Error> {
    let mut terms = Vec::with_capacity(expr.terms().len());
    for (term, op) in expr.terms() {
        let Some(term) = toolset.flatten_term(term)? else {
            continue;
        };

        if let Some(Factor::Nested(inner)) = term.as_single_factor() {
            let negate = op.is_subtract();
            terms.extend(inner.terms().iter().map(|(inner_term, inner_op)| {
                let op = if negate { inner_op.negate() } else { *inner_op };
                (inner_term.clone(), op)
            }));
            continue;
        }
        terms.push((term, *op));
    }

    let ctx = toolset.context;
    let mut constant = Number::zero();
    let mut index = HashMap::<Term, usize>::new();
    let mut entries = Vec::<(Term, Number)>::new();

    for (term, op) in terms {
        let (coefficient, rest) = term.split_coefficient();
        let coefficient = coefficient.unwrap_or_else(Number::one);
        let coefficient = if op.is_subtract() { coefficient.neg() } else { coefficient };

        let Some(rest) = rest else {
            constant = constant.add(&coefficient, &ctx)?;
            continue;
        };
        match index.get(&rest) {
            Some(&i) => entries[i].1 = entries[i].1.add(&coefficient, &ctx)?,
            None => {
                index.insert(rest.clone(), entries.len());
                entries.push((rest, coefficient));
            },
        }
    }

    let mut result = Vec::with_capacity(entries.len() + 1);
    if !constant.is_zero() {
        result.push((Term::number(constant), AddOp::None));
    }

    for (rest, coefficient) in entries {
        if coefficient.is_zero() {
            continue;
        }

        let (coefficient, op) = if coefficient.is_negative() {
            (coefficient.neg(), AddOp::Subtract)
        } else {
            (coefficient, AddOp::Add)
        };

        if coefficient.is_one() {
            result.push((rest, op));
        } else if let Some(term) = toolset.flatten_term(&rest.with_coefficient(coefficient))? {
            result.push((term, op));
        }
    }

    if result.is_empty() {
        Ok(Expression::zero())
    } else {
        Ok(Expression::new(result))
    }
}
