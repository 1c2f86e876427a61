use crate::{
    error::{kind::DivisionByZero, Error, NumericError},
    number::Number,
    tree::{Expression, Factor, MulOp, Power, Term},
};
use std::collections::HashMap;
use super::Toolset;

/// A group of equal powers in a term, with their exponents summed.
#[derive(Debug)]
enum Entry {
    /// Occurrences of `base` or `base^n` for real numbers `n`. Multiplied occurrences add their
    /// exponent, divided occurrences subtract it.
    Simple {
        base: Factor,
        exponent: Number,
        merged: bool,
    },

    /// Occurrences of a power whose exponent is not a single real number, counted as a whole.
    Opaque {
        power: Power,
        count: i64,
    },
}

/// Splits a power into its base and its real exponent, if it has one.
fn simple_parts(power: &Power) -> Option<(Factor, Number)> {
    match power.as_single() {
        Some(factor) => Some((factor.clone(), Number::one())),
        None => power.as_real_exponent().map(|(base, n)| (base.clone(), n.clone())),
    }
}

/// Flattens a term.
///
/// Each power is flattened, and a parenthesized product is spliced into the outer product. Equal
/// powers are then grouped, so that `x*x*x` becomes `x^3` and `x^2/x` becomes `x`. Real numbers
/// are folded into a single leading constant.
pub(super) fn flatten(toolset: &mut Toolset<'_>, term: &Term) -> Result<Option<Term>, Error> {
    let ctx = toolset.context;

    // (power, is divided)
    let mut powers = Vec::<(Power, bool)>::with_capacity(term.powers().len());
    for (power, op) in term.powers() {
        let Some(power) = toolset.flatten_power(power)? else {
            return Ok(None);
        };
        let divide = op.is_divide();

        if let Some(Factor::Nested(inner)) = power.as_single() {
            if let [(inner_term, inner_op)] = inner.terms() {
                for (inner_power, inner_mul_op) in inner_term.powers() {
                    powers.push((inner_power.clone(), divide != inner_mul_op.is_divide()));
                }
                if inner_op.is_subtract() {
                    powers.push((Power::number(Number::from(-1)), false));
                }
                continue;
            }
        }
        powers.push((power, divide));
    }

    let mut entries = Vec::<Entry>::new();
    let mut simple = HashMap::<Factor, usize>::new();
    let mut opaque = HashMap::<Power, usize>::new();

    for (power, divide) in powers {
        match simple_parts(&power) {
            Some((base, exponent)) => {
                let exponent = if divide { exponent.neg() } else { exponent };
                match simple.get(&base) {
                    Some(&i) => {
                        if let Entry::Simple { exponent: total, merged, .. } = &mut entries[i] {
                            *total = total.add(&exponent, &ctx)?;
                            *merged = true;
                        }
                    },
                    None => {
                        simple.insert(base.clone(), entries.len());
                        entries.push(Entry::Simple { base, exponent, merged: false });
                    },
                }
            },
            None => {
                let step = if divide { -1 } else { 1 };
                match opaque.get(&power) {
                    Some(&i) => {
                        if let Entry::Opaque { count, .. } = &mut entries[i] {
                            *count += step;
                        }
                    },
                    None => {
                        opaque.insert(power.clone(), entries.len());
                        entries.push(Entry::Opaque { power, count: step });
                    },
                }
            },
        }
    }

    let mut numerator = Number::one();
    let mut denominator = Number::one();
    let mut imaginary = Vec::new();
    let mut mul = Vec::new();
    let mut div = Vec::new();

    for entry in entries {
        match entry {
            Entry::Simple { base, exponent, merged } => {
                if exponent.is_zero() {
                    continue;
                }

                if let Factor::Number(n) = &base {
                    if !n.is_imaginary() {
                        if let Some(e) = exponent.to_i64().filter(|e| *e != i64::MIN) {
                            if e > 0 {
                                numerator = numerator.mul(&n.pow(e, &ctx)?, &ctx)?;
                            } else {
                                denominator = denominator.mul(&n.pow(-e, &ctx)?, &ctx)?;
                            }
                            continue;
                        }
                    }
                }

                let target = match &base {
                    Factor::Number(n) if n.is_imaginary() && !exponent.is_negative() => &mut imaginary,
                    _ if exponent.is_negative() => &mut div,
                    _ => &mut mul,
                };
                let exponent = exponent.abs()?;
                let power = if exponent.is_one() {
                    Power::single(base)
                } else {
                    Power::with_exponent(base, exponent)
                };
                target.push((power, merged));
            },
            Entry::Opaque { power, count } => {
                let target = match count {
                    0 => continue,
                    c if c > 0 => &mut mul,
                    _ => &mut div,
                };
                if count.abs() == 1 {
                    target.push((power, false));
                } else {
                    let nested = Factor::Nested(Expression::from_power(power));
                    target.push((Power::with_exponent(nested, Number::from(count.abs())), true));
                }
            },
        }
    }

    if denominator.is_zero() {
        return Err(NumericError::from(DivisionByZero).into());
    }
    let constant = if denominator.is_one() {
        numerator
    } else {
        numerator.div(&denominator, &ctx)?
    };

    if constant.is_zero() {
        return Ok(Some(Term::number(constant)));
    }

    let mut result = Vec::with_capacity(imaginary.len() + mul.len() + div.len() + 1);
    if !constant.is_one() || (imaginary.is_empty() && mul.is_empty()) {
        result.push((Power::number(constant), MulOp::None));
    }

    let ops = imaginary.into_iter()
        .chain(mul)
        .map(|entry| (entry, MulOp::Multiply))
        .chain(div.into_iter().map(|entry| (entry, MulOp::Divide)));
    for ((power, synthesized), op) in ops {
        // only powers built here can be simplified further
        let power = if synthesized {
            match toolset.flatten_power(&power)? {
                Some(power) => power,
                None => return Ok(None),
            }
        } else {
            power
        };
        result.push((power, op));
    }

    Ok(Some(Term::new(result)?))
}
