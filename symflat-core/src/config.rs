use crate::{
    error::{kind::InvalidPrecision, ConfigError},
    number::{Context, FormatOptions, RoundingMode},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// User-facing evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvalConfig {
    /// The number of significant digits kept by arithmetic. Must be positive.
    pub precision: u32,

    /// How arithmetic results are rounded to the precision.
    pub rounding_mode: RoundingMode,

    /// The number of significant digits shown when displaying non-integral numbers.
    pub display_precision: u32,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            precision: Context::DECIMAL128.precision,
            rounding_mode: RoundingMode::HalfEven,
            display_precision: FormatOptions::default().display_precision,
        }
    }
}

impl EvalConfig {
    /// Checks that the settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision == 0 {
            return Err(InvalidPrecision.into());
        }
        Ok(())
    }

    /// The context all arithmetic is done in.
    pub fn context(&self) -> Context {
        Context::new(self.precision, self.rounding_mode)
    }

    /// The options numbers are displayed with.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            display_precision: self.display_precision,
            rounding: self.rounding_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EvalConfig::default();
        assert_eq!(config.context(), Context::DECIMAL128);
        assert_eq!(config.format_options(), FormatOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_precision_is_rejected() {
        let config = EvalConfig { precision: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(InvalidPrecision.into()));
    }
}
