//! Random expression trees, for property testing.

use crate::{
    number::Number,
    tree::{AddOp, Expression, Factor, MulOp, Power, Term},
};
use rand::{seq::SliceRandom, Rng};
use std::ops::RangeInclusive;

/// Generates random, well-formed expressions.
///
/// Expressions have one to three terms, terms have one to three powers, and powers are a base
/// factor with an optional small integer exponent. Factors are integers, symbols or (up to the
/// maximum depth) nested expressions.
#[derive(Debug, Clone)]
pub struct RandomExpressionGenerator<R: Rng> {
    rng: R,
    symbols: Vec<String>,
    max_depth: usize,
    int_range: RangeInclusive<i64>,
    allow_division: bool,
}

impl<R: Rng> RandomExpressionGenerator<R> {
    /// Creates a generator using the symbols `x`, `y` and `z`, integers from 1 to 9, nesting up to
    /// two levels deep, and division.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            symbols: vec!["x".to_string(), "y".to_string(), "z".to_string()],
            max_depth: 2,
            int_range: 1..=9,
            allow_division: true,
        }
    }

    /// Sets the symbols that may appear. An empty list means only numbers appear.
    pub fn symbols(mut self, symbols: &[&str]) -> Self {
        self.symbols = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets how deeply expressions may be nested inside parentheses.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the range integers are drawn from. If the range contains zero and division is
    /// allowed, generated expressions may divide by zero.
    pub fn int_range(mut self, int_range: RangeInclusive<i64>) -> Self {
        self.int_range = int_range;
        self
    }

    pub fn allow_division(mut self, allow_division: bool) -> Self {
        self.allow_division = allow_division;
        self
    }

    /// Generates an expression.
    pub fn expression(&mut self) -> Expression {
        self.gen_expression(0)
    }

    fn gen_expression(&mut self, depth: usize) -> Expression {
        let count = self.rng.gen_range(1..=3usize);
        let terms = (0..count)
            .map(|i| {
                let op = match (i, self.rng.gen_bool(0.5)) {
                    (0, false) => AddOp::None,
                    (_, true) => AddOp::Subtract,
                    (_, false) => AddOp::Add,
                };
                (self.gen_term(depth), op)
            })
            .collect();
        Expression::new(terms)
    }

    fn gen_term(&mut self, depth: usize) -> Term {
        let count = self.rng.gen_range(1..=3usize);
        let mut powers = Vec::with_capacity(count);
        powers.push((self.gen_power(depth), MulOp::None));
        for _ in 1..count {
            let op = if self.allow_division && self.rng.gen_bool(0.3) {
                MulOp::Divide
            } else {
                MulOp::Multiply
            };
            powers.push((self.gen_power(depth), op));
        }

        // the first operator is always `None`
        Term::new(powers).unwrap_or_else(|_| Term::number(Number::one()))
    }

    fn gen_power(&mut self, depth: usize) -> Power {
        let base = self.gen_factor(depth);
        if self.rng.gen_ratio(1, 4) {
            Power::with_exponent(base, Number::from(self.rng.gen_range(1..=3i64)))
        } else {
            Power::single(base)
        }
    }

    fn gen_factor(&mut self, depth: usize) -> Factor {
        if depth < self.max_depth && self.rng.gen_ratio(1, 5) {
            return Factor::Nested(self.gen_expression(depth + 1));
        }

        let use_symbol = self.rng.gen_bool(0.5);
        match self.symbols.choose(&mut self.rng) {
            Some(symbol) if use_symbol => Factor::Symbol(symbol.clone()),
            _ => Factor::Number(Number::from(self.rng.gen_range(self.int_range.clone()))),
        }
    }

    /// Returns a copy of the expression with its terms, and the powers of every term, shuffled.
    /// Nested expressions are shuffled too. The result is equal to the input.
    pub fn shuffle_expression(&mut self, expr: &Expression) -> Expression {
        let mut terms = expr.terms()
            .iter()
            .map(|(term, op)| (self.shuffle_term(term), *op))
            .collect::<Vec<_>>();
        terms.shuffle(&mut self.rng);
        Expression::new(terms)
    }

    fn shuffle_term(&mut self, term: &Term) -> Term {
        let mut powers = term.powers()
            .iter()
            .map(|(power, op)| (self.shuffle_power(power), *op))
            .collect::<Vec<_>>();
        powers.shuffle(&mut self.rng);

        // a divided power cannot come first
        if let Some(first) = powers.iter().position(|(_, op)| !op.is_divide()) {
            powers.swap(0, first);
        }
        Term::new(powers).unwrap_or_else(|_| term.clone())
    }

    fn shuffle_power(&mut self, power: &Power) -> Power {
        let factors = power.factors()
            .iter()
            .map(|factor| match factor {
                Factor::Nested(expr) => Factor::Nested(self.shuffle_expression(expr)),
                other => other.clone(),
            })
            .collect();
        Power::new(factors).unwrap_or_else(|_| power.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        command::Command,
        error::Error,
        flatten::Toolset,
        number::{Context, FormatOptions},
        table::{FunctionTable, LookupTable, UserFunction},
        tree::Equation,
    };
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use std::{collections::HashMap, sync::Arc};
    use symflat_parser::{parser::ast, Parser};
    use super::*;

    struct Env {
        context: Context,
        symbols: LookupTable,
        functions: FunctionTable<UserFunction>,
        builtins: FunctionTable<Arc<dyn Command>>,
    }

    impl Env {
        fn new(context: Context) -> Self {
            Self {
                context,
                symbols: LookupTable::new(),
                functions: FunctionTable::new(),
                builtins: FunctionTable::builtins(),
            }
        }

        fn flatten(&self, expr: &Expression) -> Result<Expression, Error> {
            let mut sink = ();
            Toolset::new(
                self.context,
                FormatOptions::default(),
                &self.symbols,
                &self.functions,
                &self.builtins,
                &mut sink,
            ).flatten_expression(expr)
        }

        fn flatten_source(&self, source: &str) -> Result<Expression, Error> {
            let ast = Parser::new(source).try_parse_full::<ast::Equation>().unwrap();
            self.flatten(&Equation::try_from(&ast).unwrap().lhs)
        }
    }

    /// Wide enough that every generated constant is computed exactly.
    fn exact() -> Env {
        Env::new(Context::new(100, crate::number::RoundingMode::HalfEven))
    }

    fn generator(seed: u64) -> RandomExpressionGenerator<StdRng> {
        RandomExpressionGenerator::new(StdRng::seed_from_u64(seed))
            .symbols(&["x", "y"])
            .max_depth(1)
            .int_range(1..=5)
            .allow_division(false)
    }

    fn dividing_generator(seed: u64) -> RandomExpressionGenerator<StdRng> {
        RandomExpressionGenerator::new(StdRng::seed_from_u64(seed))
            .symbols(&["x", "y"])
            .max_depth(2)
            .int_range(1..=5)
            .allow_division(true)
    }

    /// The value of the expression at `x = 0.37`, `y = 1.91`, if it has one.
    fn value_at(env: &Env, expr: &Expression) -> Option<f64> {
        let values = HashMap::from([
            ("x".to_string(), Expression::number("0.37".parse().unwrap())),
            ("y".to_string(), Expression::number("1.91".parse().unwrap())),
        ]);
        let flat = env.flatten(&expr.replace_many(&values)).ok()?;
        let single = flat.as_single()?;
        let value = single.factor.as_number()?.to_f64()?;
        Some(if single.negated { -value } else { value })
    }

    fn assert_close(actual: f64, expected: f64, expr: &Expression) {
        let tolerance = 1e-9 * actual.abs().max(expected.abs()).max(1.0);
        assert!((actual - expected).abs() <= tolerance, "{} != {} for {}", actual, expected, expr);
    }

    #[test]
    fn generated_terms_are_well_formed() {
        let mut gen = RandomExpressionGenerator::new(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let expr = gen.expression();
            assert!(!expr.is_empty());
            for (term, _) in expr.terms() {
                assert_eq!(term.powers()[0].1, MulOp::None);
            }
        }
    }

    #[test]
    fn shuffled_expressions_are_equal() {
        let mut gen = generator(1);
        for _ in 0..200 {
            let expr = gen.expression();
            let shuffled = gen.shuffle_expression(&expr);
            assert_eq!(shuffled, expr);
        }
    }

    #[test]
    fn flatten_ignores_order() {
        let env = exact();
        let mut gen = generator(2);
        for _ in 0..200 {
            let expr = gen.expression();
            let shuffled = gen.shuffle_expression(&expr);
            assert_eq!(env.flatten(&shuffled).unwrap(), env.flatten(&expr).unwrap(), "{}", expr);
        }
    }

    #[test]
    fn flatten_is_idempotent() {
        let env = exact();
        let mut gen = generator(3);
        for _ in 0..200 {
            let expr = gen.expression();
            let once = env.flatten(&expr).unwrap();
            let twice = env.flatten(&once).unwrap();
            assert_eq!(twice, once, "{}", expr);
        }
    }

    #[test]
    fn flatten_with_division_keeps_values() {
        let env = exact();
        let mut gen = dividing_generator(5);
        let mut checked = 0;
        for _ in 0..300 {
            let expr = gen.expression();

            // divides by zero somewhere
            let Some(expected) = value_at(&env, &expr) else {
                continue;
            };

            let flat = env.flatten(&expr).unwrap();
            assert_close(value_at(&env, &flat).unwrap(), expected, &expr);

            let shuffled = env.flatten(&gen.shuffle_expression(&expr)).unwrap();
            assert_close(value_at(&env, &shuffled).unwrap(), expected, &expr);
            checked += 1;
        }
        assert!(checked > 150, "only {} expressions could be evaluated", checked);
    }

    #[test]
    fn flatten_with_division_is_idempotent() {
        let env = exact();
        let mut gen = dividing_generator(6);
        for _ in 0..200 {
            let expr = gen.expression();
            let Ok(once) = env.flatten(&expr) else {
                continue;
            };
            let twice = env.flatten(&once).unwrap();
            assert_eq!(twice, once, "{}", expr);
        }
    }

    #[test]
    fn constant_folding_matches_arithmetic() {
        let env = Env::new(Context::default());
        let ctx = Context::default();
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..1000 {
            let a = rng.gen_range(-1000..=1000i64);
            let mut b = rng.gen_range(-1000..=1000i64);
            let (na, nb) = (Number::from(a), Number::from(b));

            let sum = env.flatten_source(&format!("{} + {}", a, b)).unwrap();
            assert_eq!(sum.as_number(), Some(&na.add(&nb, &ctx).unwrap()), "{} + {}", a, b);

            let difference = env.flatten_source(&format!("{} - {}", a, b)).unwrap();
            assert_eq!(difference.as_number(), Some(&na.sub(&nb, &ctx).unwrap()), "{} - {}", a, b);

            let product = env.flatten_source(&format!("{} * {}", a, b)).unwrap();
            assert_eq!(product.as_number(), Some(&na.mul(&nb, &ctx).unwrap()), "{} * {}", a, b);

            if b == 0 {
                b = 1;
            }
            let nb = Number::from(b);
            let quotient = env.flatten_source(&format!("{} / {}", a, b)).unwrap();
            assert_eq!(quotient.as_number(), Some(&na.div(&nb, &ctx).unwrap()), "{} / {}", a, b);
        }
    }
}
