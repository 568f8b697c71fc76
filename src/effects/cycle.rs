use rand::RngCore;

use crate::colors::{HsvColor, wrap_hue};
use crate::effect::{Effect, EffectError, Oscillation, ensure_len};
use crate::types::{ConfigurationError, MIN_LEVEL, validate_bounds, validate_finite};

/// Drifts hue linearly and oscillates saturation and value.
///
/// On step `n` of a run:
/// - `h += dh` (mod 1)
/// - `s = min_s + (max_s - min_s) * (1 + sin(phase_s + ds * n)) / 2`
/// - `v = min_v + (max_v - min_v) * (1 + sin(phase_v + dv * n)) / 2`
///
/// The phases are captured on the first step so that each sinusoid passes
/// through the color's starting saturation and value.
#[derive(Debug, Clone)]
pub struct HsvCycleEffect {
    dh: f64,
    ds: f64,
    dv: f64,
    saturation: Oscillation,
    value: Oscillation,
    steps: u64,
    phases: Vec<(f64, f64)>,
}

impl HsvCycleEffect {
    const NAME: &'static str = "hsv_cycle";

    /// Creates a cycle with the given per-step increments and full `[1/255, 1]` bounds.
    ///
    /// # Errors
    /// [`ConfigurationError::InvalidParameter`] if an increment is not finite.
    pub fn new(dh: f64, ds: f64, dv: f64) -> Result<Self, ConfigurationError> {
        validate_finite("hsv_cycle dh", dh)?;
        validate_finite("hsv_cycle ds", ds)?;
        validate_finite("hsv_cycle dv", dv)?;
        Ok(Self {
            dh,
            ds,
            dv,
            saturation: Oscillation::new(MIN_LEVEL, 1.0),
            value: Oscillation::new(MIN_LEVEL, 1.0),
            steps: 0,
            phases: Vec::new(),
        })
    }

    /// Restricts the saturation oscillation to `[min, max]`.
    ///
    /// # Errors
    /// [`ConfigurationError::InvalidBounds`] unless `0 <= min <= max <= 1`.
    pub fn with_saturation_bounds(mut self, min: f64, max: f64) -> Result<Self, ConfigurationError> {
        validate_bounds(Self::NAME, "saturation", min, max)?;
        self.saturation = Oscillation::new(min, max);
        Ok(self)
    }

    /// Restricts the value oscillation to `[min, max]`.
    ///
    /// # Errors
    /// [`ConfigurationError::InvalidBounds`] unless `0 <= min <= max <= 1`.
    pub fn with_value_bounds(mut self, min: f64, max: f64) -> Result<Self, ConfigurationError> {
        validate_bounds(Self::NAME, "value", min, max)?;
        self.value = Oscillation::new(min, max);
        Ok(self)
    }
}

impl Default for HsvCycleEffect {
    fn default() -> Self {
        Self {
            dh: 0.05,
            ds: 0.0,
            dv: 0.0,
            saturation: Oscillation::new(MIN_LEVEL, 1.0),
            value: Oscillation::new(MIN_LEVEL, 1.0),
            steps: 0,
            phases: Vec::new(),
        }
    }
}

impl Effect for HsvCycleEffect {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn step(&mut self, colors: &mut [HsvColor], _rng: &mut dyn RngCore) -> Result<(), EffectError> {
        if self.steps == 0 {
            self.phases = colors
                .iter()
                .map(|c| (self.saturation.phase_of(c.s), self.value.phase_of(c.v)))
                .collect();
        }
        ensure_len(Self::NAME, self.phases.len(), colors.len())?;

        self.steps += 1;
        let n = self.steps as f64;
        for (color, &(phase_s, phase_v)) in colors.iter_mut().zip(&self.phases) {
            color.h = wrap_hue(color.h + self.dh);
            color.s = self.saturation.value_at(phase_s, self.ds * n);
            color.v = self.value.value_at(phase_v, self.dv * n);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.steps = 0;
        self.phases.clear();
    }
}
