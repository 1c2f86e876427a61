//! Exponential, logarithmic and root functions.

use crate::{error::CommandError, flatten::Toolset, tree::Equation};
use rug::Complex;
use super::{helper::eval_complex, Command, CommandResult};

unary_complex! {
    /// `e` raised to the given power.
    Exp; Complex::exp,
    /// The principal square root.
    Sqrt; Complex::sqrt,
}

/// The logarithm. `Log[x]` is the natural logarithm, and `Log[b, x]` is the logarithm of `x` in
/// base `b`.
#[derive(Debug)]
pub struct Log;

impl Command for Log {
    fn name(&self) -> &'static str {
        "Log"
    }

    fn execute(&self, args: &[Equation], toolset: &mut Toolset<'_>) -> Result<CommandResult, CommandError> {
        eval_complex(self, args, toolset, 1..=2, |values| match values {
            [x] => x.clone().ln(),
            [base, x, ..] => x.clone().ln() / base.clone().ln(),
            [] => Complex::new(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use crate::{
        number::{Context, FormatOptions, Number},
        table::{FunctionTable, LookupTable},
        tree::Expression,
    };
    use super::*;

    fn run(command: &dyn Command, args: &[i64]) -> Result<CommandResult, CommandError> {
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
        let args = args.iter()
            .map(|n| Equation::expression(Expression::number(Number::from(*n))))
            .collect::<Vec<_>>();
        command.execute(&args, &mut toolset)
    }

    fn number(result: Result<CommandResult, CommandError>) -> Number {
        match result.unwrap() {
            CommandResult::Expression(expr) => expr.as_number().cloned().unwrap(),
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn log_in_any_base() {
        assert_float_absolute_eq!(number(run(&Log, &[2, 1024])).to_f64().unwrap(), 10.0, 1e-20);
        assert_float_absolute_eq!(number(run(&Log, &[10])).to_f64().unwrap(), 10f64.ln(), 1e-14);
        assert!(run(&Log, &[1, 2, 3]).is_err());
    }

    #[test]
    fn square_root_of_negative_is_imaginary() {
        assert_eq!(number(run(&Sqrt, &[-4])), Number::i().mul(&Number::from(2), &Context::default()).unwrap());
        assert_eq!(number(run(&Sqrt, &[49])), Number::from(7));
    }
}
