use crate::{
    error::CommandError,
    flatten::Toolset,
    number::Number,
    tree::{Equation, Expression, Factor, SymbolicFunction},
};
use rug::Complex;
use std::ops::RangeInclusive;
use super::{Command, CommandResult};

/// Fails if the number of arguments is outside the accepted range.
pub(crate) fn check_arity<C: Command + ?Sized>(
    command: &C,
    args: &[Equation],
    arity: RangeInclusive<usize>,
) -> Result<(), CommandError> {
    if arity.contains(&args.len()) {
        return Ok(());
    }

    let expected = if arity.start() == arity.end() {
        arity.start().to_string()
    } else {
        format!("{} to {}", arity.start(), arity.end())
    };
    Err(CommandError::new(
        command.name(),
        format!("expected {} argument(s), got {}", expected, args.len()),
    ))
}

/// Returns the arguments as expressions, failing on any equation with a right-hand side.
pub(crate) fn expression_args<'a, C: Command + ?Sized>(
    command: &C,
    args: &'a [Equation],
) -> Result<Vec<&'a Expression>, CommandError> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| {
            arg.as_expression().ok_or_else(|| CommandError::new(
                command.name(),
                format!("argument {} must be an expression, not an equation", i + 1),
            ))
        })
        .collect()
}

/// The call itself, left unevaluated.
pub(crate) fn unevaluated<C: Command + ?Sized>(command: &C, args: &[Equation]) -> CommandResult {
    let function = SymbolicFunction {
        name: command.name().to_string(),
        args: args.to_vec(),
        is_math_function: command.is_math_function(),
    };
    CommandResult::Expression(Expression::from_factor(Factor::Function(function)))
}

/// Evaluates a numeric command.
///
/// The arguments are converted to multi-precision complex numbers at the precision of the
/// toolset's context and passed to `f`. If any argument is not a number, or the result is not
/// finite, the call is returned unevaluated.
pub(crate) fn eval_complex<C, F>(
    command: &C,
    args: &[Equation],
    toolset: &Toolset<'_>,
    arity: RangeInclusive<usize>,
    f: F,
) -> Result<CommandResult, CommandError>
where
    C: Command + ?Sized,
    F: FnOnce(&[Complex]) -> Complex,
{
    check_arity(command, args, arity)?;
    let exprs = expression_args(command, args)?;

    let bits = toolset.context.float_bits();
    let Some(values) = exprs.iter()
        .map(|expr| expr.as_number().map(|n| n.to_complex(bits)))
        .collect::<Option<Vec<_>>>()
    else {
        return Ok(unevaluated(command, args));
    };

    let result = f(&values);
    if !result.real().is_finite() || !result.imag().is_finite() {
        return Ok(unevaluated(command, args));
    }

    Number::from_complex(&result, &toolset.context)
        .map(|n| CommandResult::Expression(Expression::number(n)))
        .map_err(|err| CommandError::new(command.name(), err.to_string()))
}

/// Builds commands that take a single numeric argument.
macro_rules! unary_complex {
    ($($(#[$meta:meta])* $upname:ident; $func:expr),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub struct $upname;

            impl $crate::command::Command for $upname {
                fn name(&self) -> &'static str {
                    stringify!($upname)
                }

                fn execute(
                    &self,
                    args: &[$crate::tree::Equation],
                    toolset: &mut $crate::flatten::Toolset<'_>,
                ) -> Result<$crate::command::CommandResult, $crate::error::CommandError> {
                    $crate::command::helper::eval_complex(self, args, toolset, 1..=1, |values| {
                        // the closure call is contained within the macro
                        #[allow(clippy::redundant_closure_call)]
                        ($func)(values[0].clone())
                    })
                }
            }
        )*
    };
}
