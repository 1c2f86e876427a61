//! The flattening engine, which rewrites expression trees into a canonical form.
//!
//! Flattening combines like terms (`3x + 2x` becomes `5x`), collects repeated factors into powers
//! (`x * x^2` becomes `x^3`), cancels factors shared by the numerator and the denominator, folds
//! numeric constants, and removes parentheses that do not change the value. Symbols bound in the
//! [`LookupTable`] are replaced by their values, and function calls are evaluated.
//!
//! All of this state is threaded through the [`Toolset`]. The engine never mutates its input and
//! performs no I/O; the only side effect is appending [`Output`]s to the toolset's sink.

mod expression;
mod factor;
pub mod output;
mod power;
mod term;

use crate::{
    command::Command,
    error::{kind::RecursionLimitExceeded, Error},
    number::{Context, FormatOptions},
    table::{FunctionTable, LookupTable, UserFunction},
    tree::{Equation, Expression, Factor, Power, Term},
};
use log::{trace, warn};
use std::sync::Arc;

pub use output::{Image, Output, OutputSink};

/// The maximum number of nested flatten calls before evaluation is aborted.
pub const MAX_RECURSION_DEPTH: usize = 256;

/// Wraps a flatten step in the recursion guard.
macro_rules! guarded {
    ($self:ident, $body:expr) => {{
        $self.enter()?;
        let result = $body;
        $self.leave();
        result
    }};
}

/// Everything the flattening engine needs: the rounding context, the symbol table, both function
/// tables and the sink for side-channel output.
pub struct Toolset<'a> {
    /// The precision and rounding mode of all arithmetic.
    pub context: Context,

    /// How numbers are displayed by commands that render text.
    pub format: FormatOptions,

    /// Variable bindings.
    pub symbols: &'a LookupTable,

    /// User-defined functions.
    pub functions: &'a FunctionTable<UserFunction>,

    /// Built-in commands. These take priority over user-defined functions.
    pub builtins: &'a FunctionTable<Arc<dyn Command>>,

    sink: &'a mut dyn OutputSink,
    depth: usize,
}

impl<'a> Toolset<'a> {
    pub fn new(
        context: Context,
        format: FormatOptions,
        symbols: &'a LookupTable,
        functions: &'a FunctionTable<UserFunction>,
        builtins: &'a FunctionTable<Arc<dyn Command>>,
        sink: &'a mut dyn OutputSink,
    ) -> Self {
        Self { context, format, symbols, functions, builtins, sink, depth: 0 }
    }

    /// The number of flatten calls currently in progress.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Appends a result to the side channel.
    pub fn emit(&mut self, output: Output) {
        self.sink.push(output);
    }

    fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_RECURSION_DEPTH {
            warn!("recursion limit of {} reached", MAX_RECURSION_DEPTH);
            return Err(RecursionLimitExceeded { limit: MAX_RECURSION_DEPTH }.into());
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Flattens both sides of an equation.
    pub fn flatten_equation(&mut self, equation: &Equation) -> Result<Equation, Error> {
        trace!("flatten_equation: {}", equation);
        Ok(Equation {
            lhs: self.flatten_expression(&equation.lhs)?,
            rhs: equation.rhs.as_ref().map(|rhs| self.flatten_expression(rhs)).transpose()?,
        })
    }

    /// Flattens an expression. The result always has at least one term.
    pub fn flatten_expression(&mut self, expr: &Expression) -> Result<Expression, Error> {
        trace!("flatten_expression: {}", expr);
        guarded!(self, expression::flatten(self, expr))
    }

    /// Flattens a term. Returns [`None`] if the term has no algebraic value, which happens when
    /// one of its factors is a call that only produced side-channel output.
    pub fn flatten_term(&mut self, term: &Term) -> Result<Option<Term>, Error> {
        guarded!(self, term::flatten(self, term))
    }

    /// Flattens a power, evaluating numeric exponents.
    pub fn flatten_power(&mut self, power: &Power) -> Result<Option<Power>, Error> {
        guarded!(self, power::flatten(self, power))
    }

    /// Flattens a single factor, resolving symbols and evaluating calls.
    pub fn flatten_factor(&mut self, factor: &Factor) -> Result<Option<Factor>, Error> {
        guarded!(self, factor::flatten(self, factor))
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use crate::{
        command::CommandResult,
        error::CommandError,
        number::Number,
        tree::{AddOp, MulOp},
    };
    use pretty_assertions::assert_eq;
    use symflat_parser::{parser::ast, Parser};
    use super::*;

    fn parse(source: &str) -> Expression {
        let ast = Parser::new(source).try_parse_full::<ast::Equation>().unwrap();
        Equation::try_from(&ast).unwrap().lhs
    }

    /// Owns the tables a [`Toolset`] borrows.
    struct Env {
        symbols: LookupTable,
        functions: FunctionTable<UserFunction>,
        builtins: FunctionTable<Arc<dyn Command>>,
        outputs: Vec<Output>,
    }

    impl Env {
        fn new() -> Self {
            Self {
                symbols: LookupTable::with_constants(&Context::default()).unwrap(),
                functions: FunctionTable::new(),
                builtins: FunctionTable::builtins(),
                outputs: Vec::new(),
            }
        }

        fn flatten(&mut self, source: &str) -> Result<Expression, Error> {
            let expr = parse(source);
            let mut toolset = Toolset::new(
                Context::default(),
                FormatOptions::default(),
                &self.symbols,
                &self.functions,
                &self.builtins,
                &mut self.outputs,
            );
            let result = toolset.flatten_expression(&expr);
            assert_eq!(toolset.depth(), 0);
            result
        }
    }

    fn flatten(source: &str) -> Expression {
        Env::new().flatten(source).unwrap()
    }

    #[test]
    fn additive_identity() {
        assert_eq!(flatten("x - x"), Expression::zero());
        assert_eq!(flatten("2x + 3y - y - 2y - 2x"), Expression::zero());
    }

    #[test]
    fn combine_coefficients() {
        let result = flatten("3x + 2x");
        assert_eq!(result.terms().len(), 1);
        assert_eq!(result.terms()[0].0, Term::new(vec![
            (Power::number(Number::from(5)), MulOp::None),
            (Power::single(Factor::symbol("x")), MulOp::Multiply),
        ]).unwrap());
        assert_eq!(result.terms()[0].1, AddOp::None);

        let result = flatten("3x - 11x");
        assert_eq!(result.terms().len(), 1);
        assert_eq!(result.terms()[0].1, AddOp::Subtract);
        assert_eq!(result.to_string(), "-8x");
    }

    #[test]
    fn combine_powers() {
        let result = flatten("x * x^2");
        assert_eq!(result, Expression::from_power(Power::with_exponent(Factor::symbol("x"), Number::from(3))));
        assert_eq!(flatten("x^2 * y / x").to_string(), "x*y");
        assert_eq!(flatten("x / x^3").to_string(), "1/x^2");
    }

    #[test]
    fn cancellation() {
        assert_eq!(flatten("x / x"), Expression::number(Number::one()));
        assert_eq!(flatten("2x*y / (x*y)"), Expression::number(Number::from(2)));
    }

    #[test]
    fn nesting_removal() {
        let result = flatten("(-x)");
        assert_eq!(result, Expression::new(vec![(Term::from_factor(Factor::symbol("x")), AddOp::Subtract)]));

        let result = flatten("-1*(-x)");
        assert_eq!(result, Expression::symbol("x"));
        assert_eq!(result.terms()[0].1, AddOp::None);

        assert_eq!(flatten("a - (b - c)").to_string(), "a - b + c");
        assert_eq!(flatten("((x + 1)) - 1"), Expression::symbol("x"));
    }

    #[test]
    fn constant_folding() {
        assert_eq!(flatten("2^10 - 24"), Expression::number(Number::from(1000)));
        assert_eq!(flatten("3 * 4 / 6 + 1"), Expression::number(Number::from(3)));
        assert_eq!(flatten("x^0"), Expression::number(Number::one()));
        assert_eq!(flatten("0 * x + y"), Expression::symbol("y"));
        assert_eq!(flatten("2^3^2"), Expression::number(Number::from(512)));
    }

    #[test]
    fn zero_exponent_ends_the_tower() {
        assert_eq!(flatten("2^0^x"), Expression::number(Number::one()));
        assert_eq!(flatten("5^0^y^2"), Expression::number(Number::one()));
        assert_eq!(flatten("x + 3^(1 - 1)^z"), flatten("x + 1"));

        // a nonzero exponent under a symbolic one is left alone
        assert_eq!(flatten("2^3^x").to_string(), "2^3^x");
    }

    #[test]
    fn huge_exponents() {
        let huge = Expression::number("1e4294967296".parse::<Number>().unwrap());
        assert_eq!(flatten("10^4294967296"), huge);
        assert_ne!(flatten("10^4294967296"), Expression::number(Number::one()));
        assert_ne!(flatten("10^4294967297"), huge);

        assert_eq!(flatten("10^4294967296 + 1"), huge);
        assert_eq!(flatten("1 + 10^4294967296 - 1"), huge);
        assert_eq!(flatten("10^4294967296 - 10^4294967296"), Expression::zero());
        assert_eq!(flatten("10^4294967296 / 10^4294967295"), Expression::number(Number::from(10)));
    }

    #[test]
    fn lists() {
        let result = flatten("{1 + 1, x - x}");
        assert_eq!(result, Expression::from_factor(Factor::List(vec![
            Expression::number(Number::from(2)),
            Expression::zero(),
        ])));
        assert_eq!(result.to_string(), "{2, 0}");
        assert_eq!(flatten("{x + x, {3 * 4}}").to_string(), "{2x, {12}}");
    }

    #[test]
    fn length_of_a_list() {
        assert_eq!(flatten("Length[{1, 2, 3}]"), Expression::number(Number::from(3)));
        assert_eq!(flatten("Length[{}] + Length[{x, y}]"), Expression::number(Number::from(2)));
        assert_eq!(flatten("Length[x]").to_string(), "Length[x]");
    }

    #[test]
    fn constants_are_resolved() {
        let result = flatten("Pi");
        let pi = result.as_number().and_then(Number::to_f64).unwrap();
        assert_float_absolute_eq!(pi, std::f64::consts::PI, 1e-15);
    }

    #[test]
    fn sine_of_two() {
        let result = flatten("Sin[2]");
        let value = result.as_number().and_then(Number::to_f64).unwrap();
        assert_float_absolute_eq!(value, 0.9092974268256817, 1e-14);
    }

    #[test]
    fn unknown_functions_stay_symbolic() {
        assert_eq!(flatten("Foo[1 + 1, x]").to_string(), "Foo[2, x]");
        assert_eq!(flatten("2Sin[x] + Sin[x]").to_string(), "3Sin[x]");
    }

    #[test]
    fn division_by_zero() {
        let err = Env::new().flatten("x / 0").unwrap_err();
        assert_eq!(err.to_string(), "division by zero");
    }

    #[derive(Debug)]
    struct Plot;

    impl Command for Plot {
        fn name(&self) -> &'static str {
            "Plot"
        }

        fn is_math_function(&self) -> bool {
            false
        }

        fn execute(&self, _: &[Equation], _: &mut Toolset<'_>) -> Result<CommandResult, CommandError> {
            Ok(CommandResult::Image(Image { width: 1, height: 1, rgba: vec![0, 0, 0, 255] }))
        }
    }

    #[derive(Debug)]
    struct Solve;

    impl Command for Solve {
        fn name(&self) -> &'static str {
            "Solve"
        }

        fn execute(&self, args: &[Equation], _: &mut Toolset<'_>) -> Result<CommandResult, CommandError> {
            match args {
                [equation] => Ok(CommandResult::Equation(equation.clone())),
                _ => Ok(CommandResult::Equation(Equation::new(Expression::symbol("x"), Expression::number(Number::from(2))))),
            }
        }
    }

    #[test]
    fn equation_as_factor() {
        let mut env = Env::new();
        env.builtins.insert("Solve", Arc::new(Solve) as Arc<dyn Command>);

        let err = env.flatten("Solve[] + 1").unwrap_err();
        assert_eq!(err.to_string(), "`Solve` returned an equation, which cannot be used as a value");
        assert!(!err.is_fatal());

        // an equation without a right-hand side stands in for its left-hand side
        assert_eq!(env.flatten("Solve[y + y] + 1").unwrap().to_string(), "2y + 1");
    }

    #[test]
    fn side_channel_outputs() {
        let mut env = Env::new();
        env.builtins.insert("Plot", Arc::new(Plot) as Arc<dyn Command>);

        let result = env.flatten("Print[\"value:\", 1 + 1] + Plot[x] + 3").unwrap();
        assert_eq!(result, Expression::number(Number::from(3)));
        assert_eq!(env.outputs, vec![
            Output::Text("value: 2".to_string()),
            Output::Image(Image { width: 1, height: 1, rgba: vec![0, 0, 0, 255] }),
        ]);

        // an expression with nothing but side effects is zero
        let result = env.flatten("Print[x]").unwrap();
        assert_eq!(result, Expression::zero());
    }

    #[test]
    fn recursion_guard() {
        let mut env = Env::new();
        env.symbols.assign("x", parse("x + 1")).unwrap();
        let err = env.flatten("x").unwrap_err();
        assert!(err.is_fatal());
    }
}
