use crate::{
    error::CommandError,
    flatten::Toolset,
    number::FormatWith,
    tree::{Equation, Factor},
};
use super::{Command, CommandResult};

/// Renders its arguments as text, separated by spaces. String arguments are written without
/// quotes.
///
/// The text goes to the side channel, so a call to `Print` has no algebraic value.
#[derive(Debug)]
pub struct Print;

impl Command for Print {
    fn name(&self) -> &'static str {
        "Print"
    }

    fn is_math_function(&self) -> bool {
        false
    }

    fn execute(&self, args: &[Equation], toolset: &mut Toolset<'_>) -> Result<CommandResult, CommandError> {
        let text = args.iter()
            .map(|arg| match arg.as_expression().and_then(|expr| expr.as_single()) {
                Some(single) if !single.negated => match single.factor {
                    Factor::String(s) => s.clone(),
                    factor => factor.display(toolset.format).to_string(),
                },
                _ => arg.display(toolset.format).to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        Ok(CommandResult::String(text))
    }
}
