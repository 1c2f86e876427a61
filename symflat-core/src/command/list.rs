//! Functions on lists.

use crate::{
    error::CommandError,
    flatten::Toolset,
    number::Number,
    tree::{Equation, Expression, Factor},
};
use super::{
    helper::{check_arity, expression_args, unevaluated},
    Command,
    CommandResult,
};

/// The number of elements in a list.
#[derive(Debug)]
pub struct Length;

impl Command for Length {
    fn name(&self) -> &'static str {
        "Length"
    }

    fn execute(&self, args: &[Equation], _: &mut Toolset<'_>) -> Result<CommandResult, CommandError> {
        check_arity(self, args, 1..=1)?;
        let exprs = expression_args(self, args)?;

        match exprs[0].as_single() {
            Some(single) if !single.negated => match single.factor {
                Factor::List(items) => {
                    let len = i64::try_from(items.len())
                        .map_err(|_| CommandError::new(self.name(), "list is too long"))?;
                    Ok(CommandResult::Expression(Expression::number(Number::from(len))))
                },
                _ => Ok(unevaluated(self, args)),
            },
            _ => Ok(unevaluated(self, args)),
        }
    }
}
