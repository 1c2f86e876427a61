use crate::{
    error::{kind::ReservedWord, ExecutionError, NumericError},
    number::{Context, Number},
    tree::Expression,
};
use std::collections::{HashMap, HashSet};

/// The names of the constants bound by [`LookupTable::with_constants`].
pub const CONSTANTS: [&str; 3] = ["Pi", "E", "I"];

/// Maps variable names to their values.
///
/// Some names are reserved: they are bound when the table is created and can never be reassigned
/// or removed.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    vars: HashMap<String, Expression>,
    reserved: HashSet<String>,
}

impl LookupTable {
    /// Creates an empty table with no reserved names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding the constants `Pi`, `E` and the imaginary unit `I`, computed to the
    /// precision of the context. All three names are reserved.
    pub fn with_constants(ctx: &Context) -> Result<Self, NumericError> {
        let mut table = Self::new();
        table.reserve("Pi", Expression::number(Number::pi(ctx)?));
        table.reserve("E", Expression::number(Number::e(ctx)?));
        table.reserve("I", Expression::number(Number::i()));
        Ok(table)
    }

    /// Binds a reserved name.
    pub fn reserve(&mut self, name: &str, value: Expression) {
        self.vars.insert(name.to_string(), value);
        self.reserved.insert(name.to_string());
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Returns the value bound to the name.
    pub fn get(&self, name: &str) -> Option<&Expression> {
        self.vars.get(name)
    }

    /// Binds a value to a name, replacing any previous value.
    pub fn assign(&mut self, name: &str, value: Expression) -> Result<(), ExecutionError> {
        if self.is_reserved(name) {
            return Err(ReservedWord { name: name.to_string() }.into());
        }
        self.vars.insert(name.to_string(), value);
        Ok(())
    }

    /// Removes a binding, returning its value.
    pub fn remove(&mut self, name: &str) -> Result<Option<Expression>, ExecutionError> {
        if self.is_reserved(name) {
            return Err(ReservedWord { name: name.to_string() }.into());
        }
        Ok(self.vars.remove(name))
    }

    /// The names of the variables that were assigned, excluding the reserved constants, in sorted
    /// order.
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.vars
            .keys()
            .filter(|name| !self.is_reserved(name))
            .map(String::as_str)
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Iterates over every binding, including the reserved constants.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expression)> {
        self.vars.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn reserved_names_are_read_only() {
        let mut table = LookupTable::with_constants(&Context::default()).unwrap();
        assert_eq!(table.get("I"), Some(&Expression::number(Number::i())));

        let err = table.assign("Pi", Expression::zero()).unwrap_err();
        assert_eq!(err, ReservedWord { name: "Pi".to_string() }.into());
        assert!(table.remove("E").is_err());
    }

    #[test]
    fn assign_and_remove() {
        let mut table = LookupTable::with_constants(&Context::default()).unwrap();
        table.assign("y", Expression::symbol("x")).unwrap();
        table.assign("x", Expression::zero()).unwrap();
        table.assign("x", Expression::number(Number::one())).unwrap();

        assert_eq!(table.names(), vec!["x", "y"]);
        assert_eq!(table.get("x"), Some(&Expression::number(Number::one())));
        assert_eq!(table.remove("y").unwrap(), Some(Expression::symbol("x")));
        assert_eq!(table.get("y"), None);
    }

    #[test]
    fn pi_has_context_precision() {
        let table = LookupTable::with_constants(&Context::new(5, Default::default())).unwrap();
        let pi = table.get("Pi").and_then(Expression::as_number).unwrap();
        assert_eq!(pi.to_string(), "3.1416");
    }
}
