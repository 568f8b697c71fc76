//! Shared constants and configuration validation errors.

use thiserror::Error;

use crate::effect::EffectError;

/// Lowest non-zero 8-bit level; default lower bound for oscillating channels.
pub const MIN_LEVEL: f64 = 1.0 / 255.0;

/// Invalid setup detected before or during a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The schedule has no entries.
    #[error("schedule must have at least one entry")]
    EmptySchedule,

    /// No devices were discovered or configured.
    #[error("no RGB devices found")]
    NoDevices,

    /// Device and color counts differ.
    #[error("{devices} devices but {colors} colors")]
    DeviceColorMismatch {
        /// Number of devices.
        devices: usize,
        /// Number of colors.
        colors: usize,
    },

    /// A hue palette was empty.
    #[error("effect `{effect}` needs at least one hue")]
    EmptyPalette {
        /// Effect being configured.
        effect: &'static str,
    },

    /// A lower bound is above its upper bound or either is outside `[0, 1]`.
    #[error("effect `{effect}` has invalid {channel} bounds [{min}, {max}]")]
    InvalidBounds {
        /// Effect being configured.
        effect: &'static str,
        /// `"saturation"` or `"value"`.
        channel: &'static str,
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// A tunable is NaN, infinite, or outside its allowed range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A schedule delay is negative or not finite.
    #[error("invalid delay {0} seconds")]
    InvalidDelay(f64),

    /// An effect was stepped with a different number of colors than it started with.
    #[error("effect `{effect}` tracks {expected} colors but was stepped with {actual}")]
    EffectStateMismatch {
        /// Effect that detected the mismatch.
        effect: &'static str,
        /// Colors captured on the first step.
        expected: usize,
        /// Colors passed to the failing step.
        actual: usize,
    },
}

impl From<EffectError> for ConfigurationError {
    fn from(err: EffectError) -> Self {
        match err {
            EffectError::LengthMismatch {
                effect,
                expected,
                actual,
            } => ConfigurationError::EffectStateMismatch {
                effect,
                expected,
                actual,
            },
        }
    }
}

/// Checks that `[min, max]` is an ordered sub-range of `[0, 1]`.
pub(crate) fn validate_bounds(
    effect: &'static str,
    channel: &'static str,
    min: f64,
    max: f64,
) -> Result<(), ConfigurationError> {
    let unit = 0.0..=1.0;
    if unit.contains(&min) && unit.contains(&max) && min <= max {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidBounds {
            effect,
            channel,
            min,
            max,
        })
    }
}

/// Checks that a tunable is finite.
pub(crate) fn validate_finite(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter { name, value })
    }
}
