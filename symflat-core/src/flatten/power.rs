use crate::{
    error::Error,
    number::Number,
    tree::{Factor, Power},
};
use super::Toolset;

/// Evaluates `base ^ exponent` for two real numbers.
///
/// Integer exponents are computed exactly, rounded to the context. Any other exponent goes through
/// `f64`, so the result has at most double precision. Returns [`None`] if the result is not
/// finite, in which case the power is left as it is.
fn pow(toolset: &Toolset<'_>, base: &Number, exponent: &Number) -> Result<Option<Number>, Error> {
    if let Some(n) = exponent.to_i64() {
        return Ok(Some(base.pow(n, &toolset.context)?));
    }

    let (Some(base), Some(exponent)) = (base.to_f64(), exponent.to_f64()) else {
        return Ok(None);
    };
    let value = base.powf(exponent);
    if value.is_finite() {
        Ok(Some(Number::from_f64(value)?))
    } else {
        Ok(None)
    }
}

/// Flattens an exponent tower.
///
/// The factors are flattened from the last exponent towards the base. A number whose exponent is
/// `0` collapses the tower built so far into `1`, whatever that `0` is itself raised to. Otherwise,
/// a real number base is combined with its exponent only once everything to its right has already
/// collapsed into a single real number.
pub(super) fn flatten(toolset: &mut Toolset<'_>, power: &Power) -> Result<Option<Power>, Error> {
    // the tower to the right of the current factor, in reverse
    let mut stack = Vec::<Factor>::with_capacity(power.factors().len());

    for factor in power.factors().iter().rev() {
        let Some(factor) = toolset.flatten_factor(factor)? else {
            return Ok(None);
        };

        let collapsed = match (&factor, stack.as_slice()) {
            (Factor::Number(_), [.., Factor::Number(exponent)]) if exponent.is_zero() => Some(Number::one()),
            (Factor::Number(base), [Factor::Number(exponent)])
                if !base.is_imaginary() && !exponent.is_imaginary() => pow(toolset, base, exponent)?,
            _ => None,
        };

        match collapsed {
            Some(value) => stack = vec![Factor::Number(value)],
            None => stack.push(factor),
        }
    }

    stack.reverse();
    Ok(Some(Power::new(stack)?))
}
