use crate::number::{FormatOptions, FormatWith, Number};
use std::fmt::{self, Display, Formatter};
use super::{AddOp, Equation, Expression, Factor, MulOp, Power, SymbolicFunction, Term};

fn is_pure_imaginary(n: &Number) -> bool {
    n.is_imaginary() && n.re().is_zero()
}

/// Returns true if the number is written with a leading minus sign.
fn reads_negative(n: &Number) -> bool {
    n.is_negative() || (is_pure_imaginary(n) && n.im().is_negative())
}

/// Returns true if the number needs parentheses when it is the base of an exponent tower.
fn base_needs_parens(n: &Number) -> bool {
    reads_negative(n) || exponent_needs_parens(n)
}

/// Returns true if the number needs parentheses when it is an exponent.
fn exponent_needs_parens(n: &Number) -> bool {
    is_pure_imaginary(n) && !n.im().is_one()
}

/// Returns true if the power can be written directly after a number, as in `3x`.
fn juxtaposes(power: &Power) -> bool {
    matches!(power.base(), Factor::Symbol(_) | Factor::Nested(_) | Factor::Function(_))
}

impl FormatWith for Factor {
    fn fmt_with(&self, f: &mut Formatter<'_>, options: &FormatOptions) -> fmt::Result {
        match self {
            Factor::Number(n) => n.fmt_with(f, options),
            Factor::Symbol(name) => write!(f, "{}", name),
            Factor::String(s) => write!(f, "\"{}\"", s),
            Factor::Nested(expr) => {
                write!(f, "(")?;
                expr.fmt_with(f, options)?;
                write!(f, ")")
            },
            Factor::List(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_with(f, options)?;
                }
                write!(f, "}}")
            },
            Factor::Function(function) => function.fmt_with(f, options),
        }
    }
}

impl FormatWith for Power {
    fn fmt_with(&self, f: &mut Formatter<'_>, options: &FormatOptions) -> fmt::Result {
        let tower = self.factors().len() > 1;
        for (i, factor) in self.factors().iter().enumerate() {
            if i > 0 {
                write!(f, "^")?;
            }

            let parens = match factor {
                Factor::Number(n) if tower && i == 0 => base_needs_parens(n),
                Factor::Number(n) if i > 0 => exponent_needs_parens(n),
                _ => false,
            };
            if parens {
                write!(f, "(")?;
                factor.fmt_with(f, options)?;
                write!(f, ")")?;
            } else {
                factor.fmt_with(f, options)?;
            }
        }
        Ok(())
    }
}

impl FormatWith for Term {
    fn fmt_with(&self, f: &mut Formatter<'_>, options: &FormatOptions) -> fmt::Result {
        let mut previous: Option<&Power> = None;
        for (power, op) in self.powers() {
            match op {
                MulOp::None => {},
                MulOp::Multiply => {
                    let coefficient = previous
                        .and_then(Power::as_number)
                        .is_some_and(|n| !n.is_negative() && !n.is_imaginary());
                    if !(coefficient && juxtaposes(power)) {
                        write!(f, "*")?;
                    }
                },
                MulOp::Divide => write!(f, "/")?,
            }

            // a negative number after an operator would read as subtraction
            match power.as_number() {
                Some(n) if previous.is_some() && reads_negative(n) => {
                    write!(f, "(")?;
                    power.fmt_with(f, options)?;
                    write!(f, ")")?;
                },
                _ => power.fmt_with(f, options)?,
            }
            previous = Some(power);
        }
        Ok(())
    }
}

impl FormatWith for Expression {
    fn fmt_with(&self, f: &mut Formatter<'_>, options: &FormatOptions) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }

        for (i, (term, op)) in self.terms().iter().enumerate() {
            match (i, op) {
                (0, AddOp::Subtract) => write!(f, "-")?,
                (0, _) => {},
                (_, AddOp::Subtract) => write!(f, " - ")?,
                (_, _) => write!(f, " + ")?,
            }
            term.fmt_with(f, options)?;
        }
        Ok(())
    }
}

impl FormatWith for Equation {
    fn fmt_with(&self, f: &mut Formatter<'_>, options: &FormatOptions) -> fmt::Result {
        self.lhs.fmt_with(f, options)?;
        if let Some(rhs) = &self.rhs {
            write!(f, " = ")?;
            rhs.fmt_with(f, options)?;
        }
        Ok(())
    }
}

impl FormatWith for SymbolicFunction {
    fn fmt_with(&self, f: &mut Formatter<'_>, options: &FormatOptions) -> fmt::Result {
        write!(f, "{}[", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            arg.fmt_with(f, options)?;
        }
        write!(f, "]")
    }
}

/// Implements [`Display`] with the default [`FormatOptions`].
macro_rules! display_with_defaults {
    ($($ty:ty),*) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    self.fmt_with(f, &FormatOptions::default())
                }
            }
        )*
    };
}

display_with_defaults!(Factor, Power, Term, Expression, Equation, SymbolicFunction);
