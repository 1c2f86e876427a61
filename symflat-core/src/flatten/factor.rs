use crate::{
    command::CommandResult,
    error::{kind::EquationAsFactor, Error, ExecutionError},
    tree::{Equation, Expression, Factor, SymbolicFunction},
};
use log::debug;
use super::{Output, Toolset};

/// Flattens a single factor.
///
/// Bound symbols are replaced by their flattened value, nested expressions and list elements are
/// flattened, and function calls are evaluated. Returns [`None`] if the factor is a call with no
/// algebraic value.
pub(super) fn flatten(toolset: &mut Toolset<'_>, factor: &Factor) -> Result<Option<Factor>, Error> {
    match factor {
        Factor::Symbol(name) => {
            let symbols = toolset.symbols;
            match symbols.get(name) {
                Some(value) => {
                    debug!("resolving `{}` to {}", name, value);
                    Ok(Some(toolset.flatten_expression(value)?.into_factor()))
                },
                None => Ok(Some(factor.clone())),
            }
        },
        Factor::Nested(expr) => Ok(Some(toolset.flatten_expression(expr)?.into_factor())),
        Factor::List(items) => {
            let items = items.iter()
                .map(|item| toolset.flatten_expression(item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(Factor::List(items)))
        },
        Factor::Function(function) => evaluate_call(toolset, function),
        Factor::Number(_) | Factor::String(_) => Ok(Some(factor.clone())),
    }
}

/// Converts the algebraic result of a call into a factor.
fn result_factor(toolset: &mut Toolset<'_>, name: &str, expr: Expression) -> Result<Option<Factor>, Error> {
    // a command that could not evaluate returns the call itself, which is already flat
    if let Some(single) = expr.as_single() {
        if let Factor::Function(function) = single.factor {
            if !single.negated && function.name == name {
                return Ok(Some(single.factor.clone()));
            }
        }
    }
    Ok(Some(toolset.flatten_expression(&expr)?.into_factor()))
}

/// Evaluates a call.
///
/// The arguments are flattened first. Built-in commands take priority over user-defined functions
/// with the same name; a name that is neither is left as an unevaluated call.
fn evaluate_call(toolset: &mut Toolset<'_>, function: &SymbolicFunction) -> Result<Option<Factor>, Error> {
    let args = function.args
        .iter()
        .map(|arg| toolset.flatten_equation(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let name = function.name.as_str();

    let builtins = toolset.builtins;
    if let Some(command) = builtins.get(name) {
        debug!("calling built-in `{}`", name);
        return match command.execute(&args, toolset)? {
            CommandResult::Expression(expr) => result_factor(toolset, name, expr),
            CommandResult::Equation(Equation { lhs, rhs: None }) => result_factor(toolset, name, lhs),
            CommandResult::Equation(_) => {
                Err(ExecutionError::from(EquationAsFactor { name: name.to_string() }).into())
            },
            CommandResult::String(text) => {
                toolset.emit(Output::Text(text));
                Ok(None)
            },
            CommandResult::Image(image) => {
                toolset.emit(Output::Image(image));
                Ok(None)
            },
        };
    }

    let functions = toolset.functions;
    if let Some(user) = functions.get(name) {
        debug!("calling user function `{}`", name);
        let body = user.invoke(name, &args)?;
        return Ok(Some(toolset.flatten_expression(&body)?.into_factor()));
    }

    debug!(
        "`{}` is not a function, leaving it unevaluated (similar: {:?}, {:?})",
        name,
        builtins.similar_names(name),
        functions.similar_names(name),
    );
    Ok(Some(Factor::Function(SymbolicFunction {
        name: function.name.clone(),
        args,
        is_math_function: function.is_math_function,
    })))
}
