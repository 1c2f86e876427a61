//! Commands that change or inspect the session instead of being evaluated, written as `:name arg`.

use crate::error::{InvalidInteger, MetaError, MissingArgument, UnknownCommand};
use std::ops::Range;
use symflat_core::{error::ConfigError, EvalConfig, RoundingMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    /// `:precision N` sets the number of significant digits kept by arithmetic.
    Precision(u32),

    /// `:rounding MODE` sets the rounding mode.
    Rounding(RoundingMode),

    /// `:display N` sets the number of significant digits shown.
    Display(u32),

    /// `:vars` lists the assigned variables.
    Vars,

    /// `:funcs` lists the user-defined and built-in functions.
    Funcs,

    /// `:help` lists the meta commands.
    Help,
}

/// Returns the span of `word` within `line`. `word` must be a subslice of `line`.
fn span_of(line: &str, word: &str) -> Range<usize> {
    let start = word.as_ptr() as usize - line.as_ptr() as usize;
    start..start + word.len()
}

fn parse_integer(line: &str, command: &'static str, arg: Option<&str>) -> Result<u32, MetaError> {
    let arg = arg.ok_or_else(|| MetaError::new(
        0..line.trim_end().len(),
        MissingArgument { command, expected: "a non-negative integer" },
    ))?;
    arg.parse().map_err(|_| MetaError::new(span_of(line, arg), InvalidInteger))
}

impl MetaCommand {
    /// Parses a meta command. Returns [`None`] if the line is not a meta command at all.
    pub fn parse(line: &str) -> Option<Result<Self, MetaError>> {
        let rest = line.trim_start().strip_prefix(':')?;
        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or("");
        let arg = words.next();

        Some(match name {
            "precision" => parse_integer(line, "precision", arg).map(MetaCommand::Precision),
            "display" => parse_integer(line, "display", arg).map(MetaCommand::Display),
            "rounding" => match arg {
                Some(arg) => arg.parse()
                    .map(MetaCommand::Rounding)
                    .map_err(|err| MetaError::new(span_of(line, arg), ConfigError::from(err))),
                None => Err(MetaError::new(
                    0..line.trim_end().len(),
                    MissingArgument { command: "rounding", expected: "a rounding mode" },
                )),
            },
            "vars" => Ok(MetaCommand::Vars),
            "funcs" => Ok(MetaCommand::Funcs),
            "help" => Ok(MetaCommand::Help),
            _ => Err(MetaError::new(
                0..line.trim_end().len(),
                UnknownCommand { name: name.to_string() },
            )),
        })
    }

    /// Returns the configuration with this command applied, or [`None`] if the command does not
    /// change the configuration.
    pub fn apply(self, config: EvalConfig) -> Option<EvalConfig> {
        match self {
            MetaCommand::Precision(precision) => Some(EvalConfig { precision, ..config }),
            MetaCommand::Rounding(rounding_mode) => Some(EvalConfig { rounding_mode, ..config }),
            MetaCommand::Display(display_precision) => Some(EvalConfig { display_precision, ..config }),
            MetaCommand::Vars | MetaCommand::Funcs | MetaCommand::Help => None,
        }
    }
}

pub const HELP: &str = "\
:precision N    set the number of significant digits kept by arithmetic
:rounding MODE  set the rounding mode (CEILING, FLOOR, UP, DOWN, HALF_EVEN, HALF_UP, HALF_DOWN, UNNECESSARY)
:display N      set the number of significant digits shown
:vars           list assigned variables
:funcs          list functions";

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn not_a_meta_command() {
        assert!(MetaCommand::parse("x = 2").is_none());
    }

    #[test]
    fn parse_commands() {
        assert_eq!(MetaCommand::parse(":precision 5").unwrap().unwrap(), MetaCommand::Precision(5));
        assert_eq!(MetaCommand::parse("  :display 3").unwrap().unwrap(), MetaCommand::Display(3));
        assert_eq!(
            MetaCommand::parse(":rounding half-up").unwrap().unwrap(),
            MetaCommand::Rounding(RoundingMode::HalfUp),
        );
        assert_eq!(MetaCommand::parse(":vars").unwrap().unwrap(), MetaCommand::Vars);
    }

    #[test]
    fn bad_arguments() {
        let err = MetaCommand::parse(":precision abc").unwrap().unwrap_err();
        assert_eq!(err.span, 11..14);
        assert_eq!(err.message(), "expected a non-negative integer");

        let err = MetaCommand::parse(":rounding sideways").unwrap().unwrap_err();
        assert_eq!(err.span, 10..18);

        let err = MetaCommand::parse(":display").unwrap().unwrap_err();
        assert_eq!(err.message(), "`:display` expects a non-negative integer");

        let err = MetaCommand::parse(":frobnicate").unwrap().unwrap_err();
        assert_eq!(err.message(), "unknown command `:frobnicate`");
    }

    #[test]
    fn apply_to_config() {
        let config = EvalConfig::default();
        let changed = MetaCommand::Precision(5).apply(config).unwrap();
        assert_eq!(changed.precision, 5);
        assert_eq!(changed.display_precision, config.display_precision);
        assert_eq!(MetaCommand::Vars.apply(config), None);
    }
}
