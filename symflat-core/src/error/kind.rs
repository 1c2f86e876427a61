use ariadne::Fmt;
use symflat_attrs::ErrorKind;
use symflat_error::{ErrorKind, EXPR};

/// A [`Factor`](crate::tree::Factor) was accessed as a variant it does not hold.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected a {} factor, found a {} factor", expected, found),
    labels = ["this expression"],
)]
pub struct FactorMismatch {
    /// The variant that was requested.
    pub expected: &'static str,

    /// The variant that was present.
    pub found: &'static str,
}

/// A power was built without any factors.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "a power must contain at least one factor", labels = ["this expression"])]
pub struct EmptyPower;

/// A term was built without any powers.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "a term must contain at least one power", labels = ["this expression"])]
pub struct EmptyTerm;

/// A term was built with division as the operator of its first power.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a term cannot start with a division",
    labels = ["this expression"],
    help = format!("write the numerator explicitly, as in `{}`", "1/x".fg(EXPR)),
)]
pub struct LeadingDivide;

/// A number literal could not be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid number", literal),
    labels = ["this literal"],
)]
pub struct InvalidNumber {
    /// The text of the literal.
    pub literal: String,
}

/// Attempted to assign to or redefine a reserved name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is a reserved name", name),
    labels = ["this statement"],
    help = "constants and built-in functions cannot be reassigned; pick a different name",
)]
pub struct ReservedWord {
    /// The reserved name.
    pub name: String,
}

/// A user function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} argument(s), but {} were given", name, expected, given),
    labels = ["this call"],
)]
pub struct ArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The number of parameters the function declares.
    pub expected: usize,

    /// The number of arguments given.
    pub given: usize,
}

/// An equation with a right-hand side was passed where an expression is required.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("argument {} of `{}` must be an expression, not an equation", index + 1, name),
    labels = ["this call"],
)]
pub struct EquationArgument {
    /// The name of the function.
    pub name: String,

    /// The zero-based index of the offending argument.
    pub index: usize,
}

/// A user function's body is an equation, so calling it has no expression value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` does not evaluate to an expression", name),
    labels = ["this call"],
    help = "the body of a function used inside an expression cannot contain `=`",
)]
pub struct NonExpressionResult {
    /// The name of the function.
    pub name: String,
}

/// A built-in returned an equation where a single value was required.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` returned an equation, which cannot be used as a value", name),
    labels = ["this statement"],
)]
pub struct EquationAsFactor {
    /// The name of the built-in.
    pub name: String,
}

/// A function definition names the same parameter twice.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the parameter `{}` is declared more than once", name),
    labels = ["this definition"],
)]
pub struct DuplicateParameter {
    /// The repeated parameter name.
    pub name: String,
}

/// Division by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "division by zero", labels = ["this expression"])]
pub struct DivisionByZero;

/// An operation that is only defined for real numbers received an imaginary operand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "this operation is not supported for imaginary numbers",
    labels = ["this expression"],
)]
pub struct ImaginaryUnsupported;

/// The `UNNECESSARY` rounding mode was in effect but a result needed rounding.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "rounding is necessary to represent this result",
    labels = ["this expression"],
    help = format!("switch to a different rounding mode with `{}`", ":rounding HALF_EVEN".fg(EXPR)),
)]
pub struct RoundingNecessary;

/// A computation produced an infinite or undefined value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "the result is not a finite number", labels = ["this expression"])]
pub struct NotFinite;

/// A number's exponent is too large for its digits to be computed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the exponent of this number is too large to compute with",
    labels = ["this expression"],
)]
pub struct ExponentOverflow;

/// The recursion guard tripped while flattening.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "maximum recursion depth exceeded",
    labels = ["while evaluating this statement"],
    help = format!("the limit is {} nested evaluations; check for variables or functions that refer to themselves", limit),
)]
pub struct RecursionLimitExceeded {
    /// The recursion limit that was reached.
    pub limit: usize,
}

/// The precision must be positive.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "precision must be a positive number of digits", labels = ["this value"])]
pub struct InvalidPrecision;

/// The name of a rounding mode was not recognized.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown rounding mode `{}`", name),
    labels = ["this value"],
    help = "use one of: CEILING, FLOOR, UP, DOWN, HALF_EVEN, HALF_UP, HALF_DOWN, UNNECESSARY",
)]
pub struct UnknownRoundingMode {
    /// The name that was given.
    pub name: String,
}

/// Another submission is already being evaluated.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "another evaluation is already running",
    help = "wait for it to finish before submitting again",
)]
pub struct Busy;
