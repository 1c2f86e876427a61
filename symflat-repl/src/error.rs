use ariadne::Fmt;
use std::ops::Range;
use symflat_attrs::ErrorKind;
use symflat_error::{ErrorKind, EXPR};

/// The meta command is not one of the known commands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `:{}`", name),
    labels = ["this command"],
    help = format!("available commands: {}", ":precision :rounding :display :vars :funcs :help".fg(EXPR)),
)]
pub struct UnknownCommand {
    pub name: String,
}

/// The meta command needs an argument that was not given.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`:{}` expects {}", command, expected),
    labels = ["this command"],
)]
pub struct MissingArgument {
    pub command: &'static str,
    pub expected: &'static str,
}

/// The argument of a meta command is not a non-negative integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a non-negative integer",
    labels = ["this argument"],
)]
pub struct InvalidInteger;

/// A meta command that could not be run, with the region of the input line to highlight.
#[derive(Debug)]
pub struct MetaError {
    pub span: Range<usize>,
    pub kind: Box<dyn ErrorKind>,
}

impl MetaError {
    pub fn new(span: Range<usize>, kind: impl ErrorKind + 'static) -> Self {
        Self { span, kind: Box::new(kind) }
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Report the error to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        let report = self.kind.build_report("input", &[self.span.clone()]);
        if let Err(err) = report.eprint(("input", ariadne::Source::from(input))) {
            eprintln!("{}: {}", self.message(), err);
        }
    }
}
