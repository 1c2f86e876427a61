use crate::{
    command::{self, Command},
    error::{
        kind::{ArgumentCount, EquationArgument, NonExpressionResult},
        ExecutionError,
    },
    tree::{Equation, Expression},
};
use once_cell::sync::Lazy;
use std::{collections::HashMap, sync::Arc};

/// Maps function names to their definitions.
#[derive(Debug, Clone)]
pub struct FunctionTable<F> {
    functions: HashMap<String, F>,
}

impl<F> Default for FunctionTable<F> {
    fn default() -> Self {
        Self { functions: HashMap::new() }
    }
}

impl<F> FunctionTable<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function, returning the definition it replaced.
    pub fn insert(&mut self, name: impl Into<String>, function: F) -> Option<F> {
        self.functions.insert(name.into(), function)
    }

    pub fn get(&self, name: &str) -> Option<&F> {
        self.functions.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<F> {
        self.functions.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// The names of every function, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.functions.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// The names within a small edit distance of `name`, closest first.
    pub fn similar_names(&self, name: &str) -> Vec<&str> {
        let mut similar = self.functions
            .keys()
            .map(|candidate| (levenshtein::levenshtein(name, candidate), candidate.as_str()))
            .filter(|(distance, _)| *distance > 0 && *distance <= 2)
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar.into_iter().map(|(_, name)| name).collect()
    }
}

static BUILTINS: Lazy<FunctionTable<Arc<dyn Command>>> = Lazy::new(|| FunctionTable {
    functions: command::all()
        .into_iter()
        .map(|(name, command)| (name.to_string(), command))
        .collect(),
});

impl FunctionTable<Arc<dyn Command>> {
    /// The table of every built-in command.
    pub fn builtins() -> Self {
        BUILTINS.clone()
    }
}

/// A function defined with `name[params] := body`.
///
/// The body is stored exactly as it was written. It is only flattened after the arguments are
/// substituted, so it sees the variable bindings in effect when it is called.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFunction {
    pub params: Vec<String>,
    pub body: Equation,
}

impl UserFunction {
    pub fn new(params: Vec<String>, body: Equation) -> Self {
        Self { params, body }
    }

    /// Substitutes the arguments for the parameters in the body, all at once.
    ///
    /// Every argument must be an expression, and the body must be an expression too.
    pub fn invoke(&self, name: &str, args: &[Equation]) -> Result<Expression, ExecutionError> {
        if args.len() != self.params.len() {
            return Err(ArgumentCount {
                name: name.to_string(),
                expected: self.params.len(),
                given: args.len(),
            }.into());
        }

        let mut values = HashMap::with_capacity(args.len());
        for (index, (param, arg)) in self.params.iter().zip(args).enumerate() {
            let Some(value) = arg.as_expression() else {
                return Err(EquationArgument { name: name.to_string(), index }.into());
            };
            values.insert(param.clone(), value.clone());
        }

        let Some(body) = self.body.as_expression() else {
            return Err(NonExpressionResult { name: name.to_string() }.into());
        };
        Ok(body.replace_many(&values))
    }
}

#[cfg(test)]
mod tests {
    use crate::{number::Number, tree::{AddOp, Factor, Term}};
    use pretty_assertions::assert_eq;
    use super::*;

    fn arg(expr: Expression) -> Equation {
        Equation::expression(expr)
    }

    #[test]
    fn invoke_substitutes_all_parameters() {
        // f[x, y] := x - y
        let body = Expression::new(vec![
            (Term::from_factor(Factor::symbol("x")), AddOp::None),
            (Term::from_factor(Factor::symbol("y")), AddOp::Subtract),
        ]);
        let f = UserFunction::new(vec!["x".into(), "y".into()], Equation::expression(body));

        let result = f.invoke("f", &[arg(Expression::symbol("y")), arg(Expression::number(Number::from(2)))]).unwrap();
        assert_eq!(result.to_string(), "y - 2");
    }

    #[test]
    fn invoke_checks_arguments() {
        let f = UserFunction::new(vec!["x".into()], Equation::expression(Expression::symbol("x")));
        assert_eq!(
            f.invoke("f", &[]).unwrap_err(),
            ArgumentCount { name: "f".into(), expected: 1, given: 0 }.into(),
        );

        let equation = Equation::new(Expression::symbol("a"), Expression::symbol("b"));
        assert_eq!(
            f.invoke("f", &[equation]).unwrap_err(),
            EquationArgument { name: "f".into(), index: 0 }.into(),
        );

        let g = UserFunction::new(vec![], Equation::new(Expression::symbol("a"), Expression::zero()));
        assert_eq!(g.invoke("g", &[]).unwrap_err(), NonExpressionResult { name: "g".into() }.into());
    }

    #[test]
    fn builtins_suggest_similar_names() {
        let builtins = FunctionTable::builtins();
        assert!(builtins.contains("Sin"));
        assert!(builtins.similar_names("Sinn").contains(&"Sin"));
        assert!(builtins.similar_names("Sin").iter().all(|name| *name != "Sin"));
    }
}
