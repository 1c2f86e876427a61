use std::hash::{Hash, Hasher};
use super::Equation;

/// A call to a named function, such as `Sin[x]`.
///
/// Two calls are equal only if both are pure math functions with the same name and arguments.
/// Calls to functions with side effects (like `Print`) are never equal to anything, not even to
/// themselves, so like terms containing them are never combined.
#[derive(Debug, Clone)]
pub struct SymbolicFunction {
    pub name: String,
    pub args: Vec<Equation>,
    pub is_math_function: bool,
}

impl SymbolicFunction {
    /// Creates a call to a math function.
    pub fn new(name: impl Into<String>, args: Vec<Equation>) -> Self {
        Self { name: name.into(), args, is_math_function: true }
    }

    /// Creates a call to a function with side effects.
    pub fn non_math(name: impl Into<String>, args: Vec<Equation>) -> Self {
        Self { name: name.into(), args, is_math_function: false }
    }
}

impl PartialEq for SymbolicFunction {
    fn eq(&self, other: &Self) -> bool {
        self.is_math_function
            && other.is_math_function
            && self.name == other.name
            && self.args == other.args
    }
}

// not reflexive for non-math calls
impl Eq for SymbolicFunction {}

impl Hash for SymbolicFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.args.hash(state);
    }
}
