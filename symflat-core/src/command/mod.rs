//! Built-in commands that the flattening engine can call by name.
//!
//! Each command is a unit `struct` implementing [`Command`]. Numeric commands evaluate their
//! arguments with multi-precision complex arithmetic and round the result to the evaluation
//! [`Context`](crate::number::Context). If an argument is not a number (or the result is not
//! finite), the command returns the call unevaluated, so `Sin[x]` stays `Sin[x]` until `x` has a
//! value.

#[macro_use]
mod helper;

pub mod complex;
pub mod list;
pub mod power;
pub mod print;
pub mod trigonometry;

use crate::{
    error::CommandError,
    flatten::{output::Image, Toolset},
    tree::{Equation, Expression},
};
use std::{collections::HashMap, fmt::Debug, sync::Arc};

/// The value returned by a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// An algebraic value, which takes the place of the call.
    Expression(Expression),

    /// An equation. It can only take the place of the call if it has no right-hand side.
    Equation(Equation),

    /// Text for the side channel. The call has no algebraic value.
    String(String),

    /// An image for the side channel. The call has no algebraic value.
    Image(Image),
}

/// A built-in function.
pub trait Command: Debug + Send + Sync {
    /// The name the command is called by.
    fn name(&self) -> &'static str;

    /// Returns true if the command is a pure function of its arguments. Calls to commands that
    /// are not are never considered equal to each other.
    fn is_math_function(&self) -> bool {
        true
    }

    /// Runs the command with arguments that have already been flattened.
    fn execute(&self, args: &[Equation], toolset: &mut Toolset<'_>) -> Result<CommandResult, CommandError>;
}

/// Returns every built-in command, keyed by name.
pub fn all() -> HashMap<&'static str, Arc<dyn Command>> {
    use complex::*;
    use list::*;
    use power::*;
    use print::*;
    use trigonometry::*;

    macro_rules! build {
        ($($upname:ident),* $(,)?) => {
            [
                $(
                    Arc::new($upname) as Arc<dyn Command>,
                )*
            ]
                .into_iter()
                .map(|command| (command.name(), command))
                .collect()
        };
    }

    build! {
        Sin,
        Cos,
        Tan,
        Csc,
        Sec,
        Cot,
        ArcSin,
        ArcCos,
        ArcTan,
        Sinh,
        Cosh,
        Tanh,
        Exp,
        Log,
        Sqrt,
        Abs,
        Re,
        Im,
        Length,
        Print,
    }
}
