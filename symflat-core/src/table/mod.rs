//! The evaluation context: variables, user-defined functions and built-in commands.

pub mod function;
pub mod lookup;

pub use function::{FunctionTable, UserFunction};
pub use lookup::LookupTable;
