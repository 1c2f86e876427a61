//! Arbitrary-precision decimal numbers.

use crate::error::{
    kind::{DivisionByZero, ExponentOverflow, InvalidNumber, NotFinite, RoundingNecessary},
    NumericError,
};
use rug::{Float, Integer};
use std::{cmp::Ordering, str::FromStr};
use super::context::{Context, RoundingMode};

/// Returns the number of decimal digits in the magnitude of `n`. Zero has one digit.
pub(crate) fn digit_count(n: &Integer) -> u64 {
    if n.is_zero() {
        return 1;
    }
    let len = n.to_string_radix(10).len();
    (len - usize::from(n.is_negative())) as u64
}

/// Returns `10^exp`, or [`ExponentOverflow`] if the exponent does not fit in a `u32`.
pub(crate) fn pow10(exp: u64) -> Result<Integer, NumericError> {
    let exp = u32::try_from(exp).map_err(|_| ExponentOverflow)?;
    Ok(Integer::from(Integer::u_pow_u(10, exp)))
}

/// Divides `n` by the positive integer `d`, rounding the quotient to an integer with the given
/// rounding mode.
fn divide_rounded(n: Integer, d: &Integer, mode: RoundingMode) -> Result<Integer, NumericError> {
    let negative = n.is_negative();
    let (quotient, remainder) = n.div_rem(d.clone());
    if remainder.is_zero() {
        return Ok(quotient);
    }

    let away_from_zero = match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::HalfEven | RoundingMode::HalfUp | RoundingMode::HalfDown => {
            let twice = Integer::from(remainder.abs_ref()) * 2;
            match twice.cmp(d) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => match mode {
                    RoundingMode::HalfUp => true,
                    RoundingMode::HalfDown => false,
                    _ => quotient.is_odd(),
                },
            }
        },
        RoundingMode::Unnecessary => return Err(RoundingNecessary.into()),
    };

    Ok(match (away_from_zero, negative) {
        (false, _) => quotient,
        (true, false) => quotient + 1,
        (true, true) => quotient - 1,
    })
}

/// A decimal number `unscaled × 10^-scale`.
///
/// The representation is always normalized: the unscaled value has no trailing zeros, and zero is
/// stored with a scale of zero. Two decimals with the same value therefore compare and hash equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    unscaled: Integer,
    scale: i64,
}

impl Decimal {
    /// Creates a decimal equal to `unscaled × 10^-scale`.
    pub fn new(mut unscaled: Integer, scale: i64) -> Self {
        if unscaled.is_zero() {
            return Self::zero();
        }
        let removed = unscaled.remove_factor_mut(&Integer::from(10));
        Self { unscaled, scale: scale - i64::from(removed) }
    }

    /// Returns zero.
    pub fn zero() -> Self {
        Self { unscaled: Integer::new(), scale: 0 }
    }

    /// Returns one.
    pub fn one() -> Self {
        Self { unscaled: Integer::from(1), scale: 0 }
    }

    /// The digits of the decimal, without the decimal point.
    pub fn unscaled(&self) -> &Integer {
        &self.unscaled
    }

    /// The power of ten the unscaled value is divided by.
    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.scale == 0 && self.unscaled == 1
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    /// Returns true if the decimal has no fractional part.
    pub fn is_integer(&self) -> bool {
        self.scale <= 0
    }

    /// The number of significant digits.
    pub fn digits(&self) -> u64 {
        digit_count(&self.unscaled)
    }

    /// The power of ten of the most significant digit, so that the value is `d.ddd × 10^exp`.
    pub fn adjusted_exponent(&self) -> i64 {
        self.digits() as i64 - 1 - self.scale
    }

    pub fn neg(&self) -> Self {
        Self { unscaled: Integer::from(-&self.unscaled), scale: self.scale }
    }

    pub fn abs(&self) -> Self {
        Self { unscaled: Integer::from(self.unscaled.abs_ref()), scale: self.scale }
    }

    /// Returns the unscaled values of both decimals, brought to a common scale.
    fn aligned(&self, other: &Self) -> Result<(Integer, Integer, i64), NumericError> {
        let scale = self.scale.max(other.scale);
        let a = self.unscaled.clone() * pow10(scale.abs_diff(self.scale))?;
        let b = other.unscaled.clone() * pow10(scale.abs_diff(other.scale))?;
        Ok((a, b, scale))
    }

    /// Adds two decimals without rounding. Fails with [`ExponentOverflow`] if the operands are so
    /// far apart that the exact sum cannot be represented.
    pub fn add_exact(&self, other: &Self) -> Result<Self, NumericError> {
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }
        let (a, b, scale) = self.aligned(other)?;
        Ok(Self::new(a + b, scale))
    }

    /// Subtracts two decimals without rounding.
    pub fn sub_exact(&self, other: &Self) -> Result<Self, NumericError> {
        self.add_exact(&other.neg())
    }

    /// Multiplies two decimals without rounding.
    pub fn mul_exact(&self, other: &Self) -> Self {
        Self::new(Integer::from(&self.unscaled * &other.unscaled), self.scale + other.scale)
    }

    /// Adds two decimals, rounding the sum once to the context's precision.
    ///
    /// If one operand lies entirely below both the rounding position and the last digit of the
    /// other, it is replaced by a single sticky digit of the same sign. The rounded result is the
    /// same, and the operands never have to be aligned across a huge gap in exponents.
    pub fn add(&self, other: &Self, ctx: &Context) -> Result<Self, NumericError> {
        if self.is_zero() {
            return other.round(ctx);
        }
        if other.is_zero() {
            return self.round(ctx);
        }

        let (big, small) = if self.adjusted_exponent() >= other.adjusted_exponent() {
            (self, other)
        } else {
            (other, self)
        };
        let sticky_exponent = (big.adjusted_exponent() - i64::from(ctx.precision.max(1)) - 2)
            .min(-big.scale - 1);
        if small.adjusted_exponent() <= sticky_exponent {
            let sign = if small.is_negative() { -1 } else { 1 };
            let sticky = Self { unscaled: Integer::from(sign), scale: -sticky_exponent };
            return big.add_exact(&sticky)?.round(ctx);
        }

        self.add_exact(other)?.round(ctx)
    }

    pub fn sub(&self, other: &Self, ctx: &Context) -> Result<Self, NumericError> {
        self.add(&other.neg(), ctx)
    }

    pub fn mul(&self, other: &Self, ctx: &Context) -> Result<Self, NumericError> {
        self.mul_exact(other).round(ctx)
    }

    /// Divides two decimals, rounding the quotient once to the context's precision.
    pub fn div(&self, other: &Self, ctx: &Context) -> Result<Self, NumericError> {
        if other.is_zero() {
            return Err(DivisionByZero.into());
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }

        // enough digits in the quotient that one extra sticky digit decides the rounding
        let shift = (u64::from(ctx.precision) + other.digits() + 2).saturating_sub(self.digits());
        let numerator = Integer::from(self.unscaled.abs_ref()) * pow10(shift)?;
        let denominator = Integer::from(other.unscaled.abs_ref());
        let (mut quotient, remainder) = numerator.div_rem(denominator);
        let mut scale = self.scale - other.scale + shift as i64;

        if !remainder.is_zero() {
            quotient = quotient * 10 + 1;
            scale += 1;
        }
        if self.is_negative() != other.is_negative() {
            quotient = -quotient;
        }

        Self::new(quotient, scale).round(ctx)
    }

    /// Raises the decimal to an integer power by repeated squaring.
    pub fn pow(&self, exponent: i64, ctx: &Context) -> Result<Self, NumericError> {
        if exponent == 0 {
            return Ok(Self::one());
        }
        if self.is_zero() {
            return if exponent < 0 {
                Err(DivisionByZero.into())
            } else {
                Ok(Self::zero())
            };
        }

        let mut remaining = exponent.unsigned_abs();
        let guard = digit_count(&Integer::from(remaining)) as u32 + 2;
        let work = ctx.widened(guard);
        let mut result = Self::one();
        let mut base = self.clone();

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base, &work)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base, &work)?;
            }
        }

        if exponent < 0 {
            Self::one().div(&result, ctx)
        } else {
            result.round(ctx)
        }
    }

    /// Rounds the decimal to the context's precision.
    pub fn round(&self, ctx: &Context) -> Result<Self, NumericError> {
        let digits = self.digits();
        let precision = u64::from(ctx.precision.max(1));
        if digits <= precision {
            return Ok(self.clone());
        }

        let dropped = digits - precision;
        let unscaled = divide_rounded(self.unscaled.clone(), &pow10(dropped)?, ctx.rounding)?;
        Ok(Self::new(unscaled, self.scale - dropped as i64))
    }

    /// Returns the value as an `i64`, if it is an integer in range.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() || self.scale < -18 {
            return None;
        }
        Integer::from(&self.unscaled * pow10(self.scale.unsigned_abs()).ok()?).to_i64()
    }

    /// Returns the nearest `f64`. Values out of range become infinite.
    pub fn to_f64(&self) -> f64 {
        format!("{}e{}", self.unscaled, -self.scale)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /// Creates a decimal from the shortest representation of an `f64` that reads back as the same
    /// value.
    pub fn from_f64(value: f64) -> Result<Self, NumericError> {
        if !value.is_finite() {
            return Err(NotFinite.into());
        }
        format!("{:e}", value).parse().map_err(|_| NotFinite.into())
    }

    /// Converts to a binary float with the given number of bits of precision. Values beyond the
    /// float's exponent range become zero or infinite.
    pub fn to_float(&self, bits: u32) -> Float {
        match Float::parse(format!("{}e{}", self.unscaled, -self.scale)) {
            Ok(parsed) => Float::with_val(bits, parsed),
            Err(_) => Float::with_val(bits, rug::float::Special::Nan),
        }
    }

    /// Converts a binary float to a decimal rounded to the context's precision.
    pub fn from_float(value: &Float, ctx: &Context) -> Result<Self, NumericError> {
        if !value.is_finite() {
            return Err(NotFinite.into());
        }

        let digits = ctx.precision as usize + 3;
        let (negative, mantissa, exponent) = value.to_sign_string_exp(10, Some(digits));
        let Some(exponent) = exponent else {
            return Ok(Self::zero());
        };
        let mut unscaled = Integer::from_str_radix(&mantissa, 10).map_err(|_| NotFinite)?;
        if negative {
            unscaled = -unscaled;
        }

        Self::new(unscaled, mantissa.len() as i64 - i64::from(exponent)).round(ctx)
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::new(Integer::from(value), 0)
    }
}

impl FromStr for Decimal {
    type Err = InvalidNumber;

    /// Reads a decimal such as `12`, `-0.5`, `.25` or `1.5e-3`. The value is kept exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidNumber { literal: s.to_string() };

        let (mantissa, exponent) = match s.find(|c| c == 'e' || c == 'E') {
            Some(index) => (&s[..index], s[index + 1..].parse::<i64>().map_err(|_| invalid())?),
            None => (s, 0),
        };
        let (negative, digits) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

        if int_part.is_empty() && frac_part.is_empty()
            || !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mut unscaled = Integer::from_str_radix(&format!("{}{}", int_part, frac_part), 10)
            .map_err(|_| invalid())?;
        if negative {
            unscaled = -unscaled;
        }

        Ok(Self::new(unscaled, frac_part.len() as i64 - exponent))
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right) = (self.unscaled.cmp0(), other.unscaled.cmp0());
        if left != right || left == Ordering::Equal {
            return left.cmp(&right);
        }

        let magnitude = self.adjusted_exponent()
            .cmp(&other.adjusted_exponent())
            .then_with(|| {
                // equal adjusted exponents bound the alignment by the digit counts
                let scale = self.scale.max(other.scale);
                let shifted = |d: &Self| pow10(scale.abs_diff(d.scale))
                    .map(|factor| Integer::from(d.unscaled.abs_ref()) * factor);
                match (shifted(self), shifted(other)) {
                    (Ok(a), Ok(b)) => a.cmp(&b),
                    _ => self.digits().cmp(&other.digits()),
                }
            });
        if left == Ordering::Less {
            magnitude.reverse()
        } else {
            magnitude
        }
    }
}
