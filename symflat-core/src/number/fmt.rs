//! Display formatting for numbers and expression trees.

use std::fmt::{self, Display, Formatter, Write};
use super::{decimal::pow10, Context, Decimal, Number, RoundingMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Formatting options for numbers. These only control how numbers are displayed, never the
/// precision they are computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormatOptions {
    /// The number of significant digits to show for non-integral values. Integral values are
    /// shown in full, unless they end in more zeros than this, in which case they are shown in
    /// engineering notation.
    pub display_precision: u32,

    /// The rounding mode used to cut values down to the display precision. [`RoundingMode::Unnecessary`]
    /// is treated as [`RoundingMode::HalfEven`] here.
    pub rounding: RoundingMode,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { display_precision: 12, rounding: RoundingMode::HalfEven }
    }
}

/// A value that can be formatted with [`FormatOptions`].
pub trait FormatWith {
    /// Formats the value with the given options.
    fn fmt_with(&self, f: &mut Formatter<'_>, options: &FormatOptions) -> fmt::Result;

    /// Wraps the value so that it can be formatted with [`Display`] using the given options.
    fn display(&self, options: FormatOptions) -> Formatted<'_, Self> {
        Formatted { value: self, options }
    }
}

/// A value paired with the options to format it with.
pub struct Formatted<'a, T: ?Sized> {
    value: &'a T,
    options: FormatOptions,
}

impl<T: FormatWith + ?Sized> Display for Formatted<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.value.fmt_with(f, &self.options)
    }
}

/// Writes the digits of an unscaled value with a decimal point inserted `scale` digits from the
/// right.
fn write_plain<W: Write>(f: &mut W, value: &Decimal) -> fmt::Result {
    let digits = value.unscaled().to_string_radix(10);
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };
    let scale = value.scale();

    if scale <= 0 {
        write!(f, "{}{}{}", sign, digits, "0".repeat(scale.unsigned_abs() as usize))
    } else if scale as usize >= digits.len() {
        write!(f, "{}0.{}{}", sign, "0".repeat(scale as usize - digits.len()), digits)
    } else {
        let point = digits.len() - scale as usize;
        write!(f, "{}{}.{}", sign, &digits[..point], &digits[point..])
    }
}

/// Writes an integral value, switching to engineering notation when it ends in more zeros than
/// the display precision.
fn write_integer<W: Write>(f: &mut W, value: &Decimal, options: &FormatOptions) -> fmt::Result {
    let trailing = value.scale().unsigned_abs();
    if trailing <= u64::from(options.display_precision) {
        return write_plain(f, value);
    }

    let exponent = trailing - trailing % 3;
    let mantissa = value.unscaled().clone() * pow10(trailing % 3).map_err(|_| fmt::Error)?;
    write!(f, "{}E+{}", mantissa, exponent)
}

/// Writes a very small value in scientific notation.
fn write_scientific<W: Write>(f: &mut W, value: &Decimal) -> fmt::Result {
    let digits = value.unscaled().to_string_radix(10);
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };
    let (first, rest) = digits.split_at(1);

    write!(f, "{}{}", sign, first)?;
    if !rest.is_empty() {
        write!(f, ".{}", rest)?;
    }
    write!(f, "E{}", value.adjusted_exponent())
}

/// Writes a real value with the given options.
pub fn fmt_decimal<W: Write>(f: &mut W, value: &Decimal, options: &FormatOptions) -> fmt::Result {
    if value.is_integer() {
        return write_integer(f, value, options);
    }

    let rounding = match options.rounding {
        RoundingMode::Unnecessary => RoundingMode::HalfEven,
        mode => mode,
    };
    let ctx = Context::new(options.display_precision.max(1), rounding);
    let rounded = value.round(&ctx).unwrap_or_else(|_| value.clone());

    if rounded.is_integer() {
        write_integer(f, &rounded, options)
    } else if rounded.adjusted_exponent() < -i64::from(options.display_precision.max(6)) {
        write_scientific(f, &rounded)
    } else {
        write_plain(f, &rounded)
    }
}

impl FormatWith for Decimal {
    fn fmt_with(&self, f: &mut Formatter<'_>, options: &FormatOptions) -> fmt::Result {
        fmt_decimal(f, self, options)
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, &FormatOptions::default())
    }
}

/// Writes the imaginary part of a number, as `i`, `-i` or `bi`.
fn fmt_imaginary<W: Write>(f: &mut W, imag: &Decimal, options: &FormatOptions) -> fmt::Result {
    if imag.is_one() {
        write!(f, "i")
    } else if imag.neg().is_one() {
        write!(f, "-i")
    } else {
        fmt_decimal(f, imag, options)?;
        write!(f, "i")
    }
}

impl FormatWith for Number {
    fn fmt_with(&self, f: &mut Formatter<'_>, options: &FormatOptions) -> fmt::Result {
        if !self.is_imaginary() {
            return fmt_decimal(f, self.re(), options);
        }
        if self.re().is_zero() {
            return fmt_imaginary(f, self.im(), options);
        }

        write!(f, "(")?;
        fmt_decimal(f, self.re(), options)?;
        if self.im().is_negative() {
            write!(f, " - ")?;
            fmt_imaginary(f, &self.im().abs(), options)?;
        } else {
            write!(f, " + ")?;
            fmt_imaginary(f, self.im(), options)?;
        }
        write!(f, ")")
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, &FormatOptions::default())
    }
}
