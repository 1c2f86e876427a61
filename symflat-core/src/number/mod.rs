//! The numeric kernel: complex numbers built from a pair of arbitrary-precision decimals.
//!
//! Every operation that can produce more digits than it was given takes an explicit [`Context`],
//! which fixes the precision and rounding mode of the result. There is no global configuration.

pub mod context;
pub mod decimal;
pub mod fmt;

pub use context::{Context, RoundingMode};
pub use decimal::Decimal;
pub use fmt::{FormatOptions, FormatWith, Formatted};

use crate::error::{
    kind::{ImaginaryUnsupported, InvalidNumber},
    NumericError,
};
use rug::{float::Constant, Complex, Float};
use std::{cmp::Ordering, str::FromStr};

/// A complex number `real + imag·i`. The number is imaginary if its imaginary part is nonzero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Number {
    real: Decimal,
    imag: Decimal,
}

impl Number {
    /// Creates a number from its real and imaginary parts.
    pub fn new(real: Decimal, imag: Decimal) -> Self {
        Self { real, imag }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::from(Decimal::one())
    }

    /// The imaginary unit.
    pub fn i() -> Self {
        Self::new(Decimal::zero(), Decimal::one())
    }

    /// The real part.
    pub fn re(&self) -> &Decimal {
        &self.real
    }

    /// The imaginary part.
    pub fn im(&self) -> &Decimal {
        &self.imag
    }

    /// Returns true if the imaginary part is nonzero.
    pub fn is_imaginary(&self) -> bool {
        !self.imag.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.real.is_zero() && self.imag.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.real.is_one() && self.imag.is_zero()
    }

    /// Returns true if the number is real and less than zero.
    pub fn is_negative(&self) -> bool {
        !self.is_imaginary() && self.real.is_negative()
    }

    /// Returns true if the number is real and has no fractional part.
    pub fn is_integer(&self) -> bool {
        !self.is_imaginary() && self.real.is_integer()
    }

    pub fn add(&self, other: &Self, ctx: &Context) -> Result<Self, NumericError> {
        Ok(Self::new(self.real.add(&other.real, ctx)?, self.imag.add(&other.imag, ctx)?))
    }

    pub fn sub(&self, other: &Self, ctx: &Context) -> Result<Self, NumericError> {
        Ok(Self::new(self.real.sub(&other.real, ctx)?, self.imag.sub(&other.imag, ctx)?))
    }

    /// `(a+bi)×(c+di) = (ac−bd)+(ad+bc)i`, with each component rounded once.
    pub fn mul(&self, other: &Self, ctx: &Context) -> Result<Self, NumericError> {
        if !self.is_imaginary() && !other.is_imaginary() {
            return Ok(Self::from(self.real.mul(&other.real, ctx)?));
        }

        let (a, b, c, d) = (&self.real, &self.imag, &other.real, &other.imag);
        let real = a.mul_exact(c).sub(&b.mul_exact(d), ctx)?;
        let imag = a.mul_exact(d).add(&b.mul_exact(c), ctx)?;
        Ok(Self::new(real, imag))
    }

    /// Divides by multiplying with the conjugate of the divisor and dividing by `c²+d²`.
    pub fn div(&self, other: &Self, ctx: &Context) -> Result<Self, NumericError> {
        if !other.is_imaginary() {
            return Ok(Self::new(self.real.div(&other.real, ctx)?, self.imag.div(&other.real, ctx)?));
        }

        let (a, b, c, d) = (&self.real, &self.imag, &other.real, &other.imag);
        let denominator = other.magnitude_squared()?;
        let real = a.mul_exact(c).add_exact(&b.mul_exact(d))?;
        let imag = b.mul_exact(c).sub_exact(&a.mul_exact(d))?;
        Ok(Self::new(real.div(&denominator, ctx)?, imag.div(&denominator, ctx)?))
    }

    pub fn neg(&self) -> Self {
        Self::new(self.real.neg(), self.imag.neg())
    }

    /// The absolute value. Real numbers are handled exactly; the magnitude of an imaginary number
    /// is computed with the default context.
    pub fn abs(&self) -> Result<Self, NumericError> {
        if self.is_imaginary() {
            self.magnitude(&Context::default())
        } else {
            Ok(Self::from(self.real.abs()))
        }
    }

    /// `sqrt(a²+b²)`, rounded to the context.
    pub fn magnitude(&self, ctx: &Context) -> Result<Self, NumericError> {
        let bits = ctx.float_bits();
        let magnitude = self.real.to_float(bits).hypot(&self.imag.to_float(bits));
        Ok(Self::from(Decimal::from_float(&magnitude, ctx)?))
    }

    /// `a²+b²`, exactly.
    pub fn magnitude_squared(&self) -> Result<Decimal, NumericError> {
        self.real.mul_exact(&self.real).add_exact(&self.imag.mul_exact(&self.imag))
    }

    /// Raises a real number to an integer power. Powers of imaginary numbers are not supported.
    pub fn pow(&self, exponent: i64, ctx: &Context) -> Result<Self, NumericError> {
        if self.is_imaginary() {
            return Err(ImaginaryUnsupported.into());
        }
        Ok(Self::from(self.real.pow(exponent, ctx)?))
    }

    /// Compares two numbers. Real numbers are ordered by value; if either number is imaginary,
    /// they are ordered by magnitude instead.
    pub fn compare(&self, other: &Self) -> Ordering {
        if self.is_imaginary() || other.is_imaginary() {
            match (self.magnitude_squared(), other.magnitude_squared()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                // components too far apart to add exactly: compare the larger ones
                _ => self.real.abs().max(self.imag.abs()).cmp(&other.real.abs().max(other.imag.abs())),
            }
        } else {
            self.real.cmp(&other.real)
        }
    }

    /// Returns the value as an `i64`, if it is a real integer in range.
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_imaginary() {
            None
        } else {
            self.real.to_i64()
        }
    }

    /// Returns the value as an `f64`, if it is real.
    pub fn to_f64(&self) -> Option<f64> {
        if self.is_imaginary() {
            None
        } else {
            Some(self.real.to_f64())
        }
    }

    /// Creates a real number from an `f64`.
    pub fn from_f64(value: f64) -> Result<Self, NumericError> {
        Decimal::from_f64(value).map(Self::from)
    }

    /// Converts to a multi-precision complex number with the given number of bits.
    pub fn to_complex(&self, bits: u32) -> Complex {
        Complex::with_val(bits, (self.real.to_float(bits), self.imag.to_float(bits)))
    }

    /// Converts a multi-precision complex number, rounding both parts to the context.
    pub fn from_complex(value: &Complex, ctx: &Context) -> Result<Self, NumericError> {
        Ok(Self::new(
            Decimal::from_float(value.real(), ctx)?,
            Decimal::from_float(value.imag(), ctx)?,
        ))
    }

    /// π, rounded to the context.
    pub fn pi(ctx: &Context) -> Result<Self, NumericError> {
        let pi = Float::with_val(ctx.float_bits(), Constant::Pi);
        Ok(Self::from(Decimal::from_float(&pi, ctx)?))
    }

    /// Euler's number, rounded to the context.
    pub fn e(ctx: &Context) -> Result<Self, NumericError> {
        let e = Float::with_val(ctx.float_bits(), 1).exp();
        Ok(Self::from(Decimal::from_float(&e, ctx)?))
    }
}

impl From<Decimal> for Number {
    fn from(real: Decimal) -> Self {
        Self::new(real, Decimal::zero())
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::from(Decimal::from(value))
    }
}

impl FromStr for Number {
    type Err = InvalidNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::from)
    }
}
