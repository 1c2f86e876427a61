//! Functions on the parts of complex numbers.

use crate::{
    error::CommandError,
    flatten::Toolset,
    number::Number,
    tree::{Equation, Expression},
};
use super::{
    helper::{check_arity, expression_args, unevaluated},
    Command,
    CommandResult,
};

/// Builds a command that maps a single number to another number exactly, without going through
/// multi-precision floats.
macro_rules! build_exact {
    ($($(#[$meta:meta])* $upname:ident; $func:expr),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub struct $upname;

            impl Command for $upname {
                fn name(&self) -> &'static str {
                    stringify!($upname)
                }

                fn execute(&self, args: &[Equation], toolset: &mut Toolset<'_>) -> Result<CommandResult, CommandError> {
                    check_arity(self, args, 1..=1)?;
                    let exprs = expression_args(self, args)?;
                    let Some(n) = exprs[0].as_number() else {
                        return Ok(unevaluated(self, args));
                    };

                    #[allow(clippy::redundant_closure_call)]
                    let result: Result<Number, _> = ($func)(n, &*toolset);
                    result
                        .map(|n| CommandResult::Expression(Expression::number(n)))
                        .map_err(|err| CommandError::new(self.name(), err.to_string()))
                }
            }
        )*
    };
}

build_exact! {
    /// The absolute value, or the magnitude of a complex number.
    Abs; |n: &Number, toolset: &Toolset<'_>| if n.is_imaginary() {
        n.magnitude(&toolset.context)
    } else {
        n.abs()
    },
    /// The real part.
    Re; |n: &Number, _: &Toolset<'_>| Ok::<_, crate::error::NumericError>(Number::from(n.re().clone())),
    /// The imaginary part, as a real number.
    Im; |n: &Number, _: &Toolset<'_>| Ok::<_, crate::error::NumericError>(Number::from(n.im().clone())),
}

#[cfg(test)]
mod tests {
    use crate::{
        number::{Context, Decimal, FormatOptions},
        table::{FunctionTable, LookupTable},
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(command: &dyn Command, arg: Expression) -> Expression {
        let symbols = LookupTable::new();
        let functions = FunctionTable::new();
        let builtins = FunctionTable::new();
        let mut sink = ();
        let mut toolset = Toolset::new(
            Context::default(),
            FormatOptions::default(),
            &symbols,
            &functions,
            &builtins,
            &mut sink,
        );
        match command.execute(&[Equation::expression(arg)], &mut toolset).unwrap() {
            CommandResult::Expression(expr) => expr,
            other => panic!("expected an expression, got {:?}", other),
        }
    }

    #[test]
    fn parts_of_complex_numbers() {
        let z = Number::new(Decimal::from(3), Decimal::from(-4));
        assert_eq!(run(&Re, Expression::number(z.clone())), Expression::number(Number::from(3)));
        assert_eq!(run(&Im, Expression::number(z.clone())), Expression::number(Number::from(-4)));
        assert_eq!(run(&Abs, Expression::number(z)), Expression::number(Number::from(5)));
        assert_eq!(run(&Abs, Expression::number(Number::from(-2))), Expression::number(Number::from(2)));
    }

    #[test]
    fn symbolic_argument() {
        assert_eq!(run(&Abs, Expression::symbol("x")).to_string(), "Abs[x]");
    }
}
