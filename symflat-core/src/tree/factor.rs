use crate::{
    error::{kind::FactorMismatch, ExpressionError},
    number::Number,
};
use super::{Expression, SymbolicFunction};

/// The atomic unit of an expression tree. Exactly one variant is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Factor {
    /// A (possibly complex) number.
    Number(Number),

    /// A variable, such as `x`.
    Symbol(String),

    /// A string literal.
    String(String),

    /// A parenthesized sub-expression.
    Nested(Expression),

    /// An ordered list of expressions.
    List(Vec<Expression>),

    /// A call to a named function.
    Function(SymbolicFunction),
}

/// Generates an `as_*` accessor returning [`Option`], and a checked accessor returning an
/// [`ExpressionError`] on a variant mismatch.
macro_rules! accessors {
    ($($variant:ident $as_fn:ident $checked_fn:ident $kind:literal -> $ty:ty;)*) => {
        $(
            #[doc = concat!("Returns the value if this is a [`Factor::", stringify!($variant), "`].")]
            pub fn $as_fn(&self) -> Option<&$ty> {
                match self {
                    Factor::$variant(value) => Some(value),
                    _ => None,
                }
            }

            #[doc = concat!("Returns the value of a [`Factor::", stringify!($variant), "`], or an error for any other variant.")]
            pub fn $checked_fn(&self) -> Result<&$ty, ExpressionError> {
                self.$as_fn().ok_or_else(|| FactorMismatch {
                    expected: $kind,
                    found: self.kind_name(),
                }.into())
            }
        )*
    };
}

impl Factor {
    /// Creates a symbol factor.
    pub fn symbol(name: impl Into<String>) -> Self {
        Factor::Symbol(name.into())
    }

    /// The name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Factor::Number(_) => "number",
            Factor::Symbol(_) => "symbol",
            Factor::String(_) => "string",
            Factor::Nested(_) => "nested",
            Factor::List(_) => "list",
            Factor::Function(_) => "function",
        }
    }

    accessors! {
        Number as_number number "number" -> Number;
        Symbol as_symbol symbol_name "symbol" -> String;
        String as_string string "string" -> String;
        Nested as_nested nested "nested" -> Expression;
        List as_list list "list" -> Vec<Expression>;
        Function as_function function "function" -> SymbolicFunction;
    }

    /// Converts the factor into an expression. A nested expression is unwrapped; anything else
    /// becomes the only factor of a single term.
    pub fn into_expression(self) -> Expression {
        match self {
            Factor::Nested(expr) => expr,
            other => Expression::from_factor(other),
        }
    }
}

impl From<Number> for Factor {
    fn from(number: Number) -> Self {
        Factor::Number(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_access() {
        let factor = Factor::symbol("x");
        assert_eq!(factor.symbol_name().unwrap(), "x");
        assert_eq!(factor.as_number(), None);

        let err = factor.number().unwrap_err();
        assert_eq!(err, FactorMismatch { expected: "number", found: "symbol" }.into());
    }
}
