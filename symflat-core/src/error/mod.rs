//! Errors raised by the numeric kernel, the tree data model and the flattening engine.
//!
//! Every error is a small struct implementing [`ErrorKind`], so that it can be rendered with
//! [`ariadne`]. The structs are grouped into the tagged enums below, and all of them fold into
//! [`Error`], which is what the flattening engine returns.

pub mod kind;

use ariadne::Report;
use std::ops::Range;
use symflat_error::ErrorKind;

/// Generates an enum grouping a set of error kinds, with [`From`] conversions from each kind and
/// an [`ErrorKind`] implementation that forwards to the wrapped kind.
macro_rules! error_group {
    ($(#[$meta:meta])* $group:ident { $($(#[$variant_meta:meta])* $variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $group {
            $(
                $(#[$variant_meta])*
                $variant(kind::$variant),
            )*
        }

        impl ErrorKind for $group {
            fn message(&self) -> String {
                match self {
                    $(Self::$variant(kind) => kind.message(),)*
                }
            }

            fn help(&self) -> Option<String> {
                match self {
                    $(Self::$variant(kind) => kind.help(),)*
                }
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[Range<usize>],
            ) -> Report<(&'a str, Range<usize>)> {
                match self {
                    $(Self::$variant(kind) => kind.build_report(src_id, spans),)*
                }
            }
        }

        impl std::fmt::Display for $group {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.message())
            }
        }

        impl std::error::Error for $group {}

        $(
            impl From<kind::$variant> for $group {
                fn from(kind: kind::$variant) -> Self {
                    Self::$variant(kind)
                }
            }
        )*
    };
}

error_group! {
    /// A structural or type violation in an expression tree.
    ExpressionError {
        FactorMismatch,
        EmptyPower,
        EmptyTerm,
        LeadingDivide,
        InvalidNumber,
    }
}

error_group! {
    /// A violation of the evaluation context: the symbol table or the function tables.
    ExecutionError {
        ReservedWord,
        ArgumentCount,
        EquationArgument,
        NonExpressionResult,
        EquationAsFactor,
        DuplicateParameter,
    }
}

error_group! {
    /// A failure of the decimal arithmetic kernel.
    NumericError {
        DivisionByZero,
        ImaginaryUnsupported,
        RoundingNecessary,
        NotFinite,
        ExponentOverflow,
    }
}

error_group! {
    /// An invalid configuration value.
    ConfigError {
        InvalidPrecision,
        UnknownRoundingMode,
    }
}

/// A built-in command could not run, and could not fall back to its unevaluated form either.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandError {
    /// The name of the command.
    pub function: String,

    /// What went wrong.
    pub message: String,
}

impl CommandError {
    /// Creates a new command error.
    pub fn new(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self { function: function.into(), message: message.into() }
    }
}

impl ErrorKind for CommandError {
    fn message(&self) -> String {
        format!("`{}`: {}", self.function, self.message)
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        let offset = spans.first().map_or(0, |span| span.start);
        Report::build(ariadne::ReportKind::Error, src_id, offset)
            .with_message(self.message())
            .with_labels(spans.iter().map(|span| {
                ariadne::Label::new((src_id, span.clone()))
                    .with_color(symflat_error::EXPR)
                    .with_message(format!("while calling `{}` here", self.function))
            }))
            .finish()
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CommandError {}

/// Any error that can stop the flattening of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The expression tree is malformed.
    Expression(ExpressionError),

    /// The evaluation context was used incorrectly.
    Execution(ExecutionError),

    /// The arithmetic kernel failed.
    Numeric(NumericError),

    /// A built-in command failed.
    Command(CommandError),

    /// A configuration value was rejected.
    Config(ConfigError),

    /// The recursion guard tripped.
    RecursionLimitExceeded(kind::RecursionLimitExceeded),
}

impl Error {
    /// Returns true if the error aborts the whole pass rather than describing a bad input. Only
    /// the recursion guard is fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::RecursionLimitExceeded(_))
    }

    /// Returns the wrapped kind as a trait object.
    fn kind(&self) -> &dyn ErrorKind {
        match self {
            Error::Expression(err) => err,
            Error::Execution(err) => err,
            Error::Numeric(err) => err,
            Error::Command(err) => err,
            Error::Config(err) => err,
            Error::RecursionLimitExceeded(err) => err,
        }
    }
}

impl ErrorKind for Error {
    fn message(&self) -> String {
        self.kind().message()
    }

    fn help(&self) -> Option<String> {
        self.kind().help()
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        self.kind().build_report(src_id, spans)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for Error {}

impl From<ExpressionError> for Error {
    fn from(err: ExpressionError) -> Self {
        Error::Expression(err)
    }
}

impl From<ExecutionError> for Error {
    fn from(err: ExecutionError) -> Self {
        Error::Execution(err)
    }
}

impl From<NumericError> for Error {
    fn from(err: NumericError) -> Self {
        Error::Numeric(err)
    }
}

impl From<CommandError> for Error {
    fn from(err: CommandError) -> Self {
        Error::Command(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<kind::RecursionLimitExceeded> for Error {
    fn from(err: kind::RecursionLimitExceeded) -> Self {
        Error::RecursionLimitExceeded(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_forward_messages() {
        let err: Error = NumericError::from(kind::DivisionByZero).into();
        assert_eq!(err.to_string(), "division by zero");
        assert!(!err.is_fatal());

        let err: Error = kind::RecursionLimitExceeded { limit: 256 }.into();
        assert!(err.is_fatal());
        assert!(err.help().is_some_and(|help| help.contains("256")));
    }

    #[test]
    fn command_error_message() {
        let err = CommandError::new("Length", "expected 1 argument, got 2");
        assert_eq!(err.message(), "`Length`: expected 1 argument, got 2");
    }
}
