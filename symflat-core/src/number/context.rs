use crate::error::kind::UnknownRoundingMode;
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How to round a result that has more significant digits than the precision allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RoundingMode {
    /// Round towards positive infinity.
    Ceiling,

    /// Round towards negative infinity.
    Floor,

    /// Round away from zero.
    Up,

    /// Round towards zero.
    Down,

    /// Round to the nearest neighbor, or to the even neighbor if both are equally near.
    #[default]
    HalfEven,

    /// Round to the nearest neighbor, or away from zero if both are equally near.
    HalfUp,

    /// Round to the nearest neighbor, or towards zero if both are equally near.
    HalfDown,

    /// Do not round; any result that would need rounding is an error.
    Unnecessary,
}

impl RoundingMode {
    /// All rounding modes, in the order they are usually listed.
    pub const ALL: [RoundingMode; 8] = [
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::HalfEven,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::Unnecessary,
    ];

    /// Returns the canonical name of the rounding mode.
    pub fn name(self) -> &'static str {
        match self {
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::Unnecessary => "UNNECESSARY",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = UnknownRoundingMode;

    /// Parses a rounding mode from its name, ignoring case. Hyphens may be used in place of
    /// underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| UnknownRoundingMode { name: s.to_string() })
    }
}

/// The precision and rounding mode used by every arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Context {
    /// The number of significant decimal digits to keep. Always positive.
    pub precision: u32,

    /// How to round results with more digits than [`Context::precision`].
    pub rounding: RoundingMode,
}

impl Context {
    /// 34 digits, rounding half to even.
    pub const DECIMAL128: Context = Context { precision: 34, rounding: RoundingMode::HalfEven };

    /// Creates a new context. A precision of zero is raised to one digit.
    pub fn new(precision: u32, rounding: RoundingMode) -> Self {
        Self { precision: precision.max(1), rounding }
    }

    /// Returns a copy of this context with the given number of extra digits of precision.
    pub fn widened(self, extra: u32) -> Self {
        Self { precision: self.precision.saturating_add(extra), ..self }
    }

    /// Returns the number of bits needed by a binary float to hold this many decimal digits, with
    /// some headroom for the rounding of intermediate results.
    pub fn float_bits(&self) -> u32 {
        (self.precision as f64 * std::f64::consts::LOG2_10).ceil() as u32 + 32
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::DECIMAL128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rounding_modes() {
        assert_eq!("half_even".parse::<RoundingMode>().unwrap(), RoundingMode::HalfEven);
        assert_eq!("Half-Up".parse::<RoundingMode>().unwrap(), RoundingMode::HalfUp);
        assert_eq!("CEILING".parse::<RoundingMode>().unwrap(), RoundingMode::Ceiling);
        assert_eq!(
            "nearest".parse::<RoundingMode>().unwrap_err(),
            UnknownRoundingMode { name: "nearest".to_string() },
        );
    }

    #[test]
    fn names_round_trip() {
        for mode in RoundingMode::ALL {
            assert_eq!(mode.to_string().parse::<RoundingMode>().unwrap(), mode);
        }
    }
}
