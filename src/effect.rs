//! The effect contract shared by every animation.
//!
//! An [`Effect`] mutates the live [`HsvColor`] slice in place, one discrete
//! step at a time. Effects keep private memory between steps (phase offsets,
//! switch latches) which is set up lazily on the first step of a run and
//! thrown away by [`Effect::reset`].

use rand::RngCore;
use thiserror::Error;

use crate::colors::HsvColor;

/// Errors raised while stepping an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EffectError {
    /// The color slice no longer matches the state captured on the first step.
    #[error("effect `{effect}` tracks {expected} colors but was stepped with {actual}")]
    LengthMismatch {
        /// Name of the effect that detected the mismatch.
        effect: &'static str,
        /// Number of colors captured when the run started.
        expected: usize,
        /// Number of colors passed to this step.
        actual: usize,
    },
}

/// A stateful per-step color transform.
pub trait Effect {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Advances the effect by one step, mutating `colors` in place.
    ///
    /// Randomized effects draw from `rng`; deterministic effects ignore it.
    ///
    /// # Errors
    /// [`EffectError::LengthMismatch`] if the slice length changed since the
    /// first step of the current run.
    fn step(&mut self, colors: &mut [HsvColor], rng: &mut dyn RngCore) -> Result<(), EffectError>;

    /// Clears all run memory so the next step behaves like the first one.
    fn reset(&mut self) {}
}

impl<E: Effect + ?Sized> Effect for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn step(&mut self, colors: &mut [HsvColor], rng: &mut dyn RngCore) -> Result<(), EffectError> {
        (**self).step(colors, rng)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// A sinusoid mapped onto `[min, max]`.
///
/// `value_at(phase, t) = min + (max - min) * (1 + sin(phase + t)) / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Oscillation {
    pub min: f64,
    pub max: f64,
}

impl Oscillation {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Phase at which the oscillation passes through `current`.
    ///
    /// Values outside `[min, max]` clamp to the nearest extremum.
    pub fn phase_of(&self, current: f64) -> f64 {
        let range = self.range();
        if range == 0.0 || !range.is_finite() {
            return 0.0;
        }
        let normalized = 2.0 * (current - self.min) / range - 1.0;
        normalized.clamp(-1.0, 1.0).asin()
    }

    /// Like [`Self::phase_of`], but on the falling half of the sinusoid.
    pub fn falling_phase_of(&self, current: f64) -> f64 {
        core::f64::consts::PI - self.phase_of(current)
    }

    #[inline]
    pub fn value_at(&self, phase: f64, t: f64) -> f64 {
        self.min + self.range() * (1.0 + (phase + t).sin()) / 2.0
    }
}

/// Fails with [`EffectError::LengthMismatch`] unless `expected == actual`.
pub(crate) fn ensure_len(effect: &'static str, expected: usize, actual: usize) -> Result<(), EffectError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EffectError::LengthMismatch {
            effect,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_of_round_trips_through_value_at() {
        let osc = Oscillation::new(0.2, 0.8);
        for current in [0.2, 0.35, 0.5, 0.71, 0.8] {
            let phase = osc.phase_of(current);
            assert!((osc.value_at(phase, 0.0) - current).abs() < 1e-12);
        }
    }

    #[test]
    fn phase_of_clamps_out_of_range_values() {
        let osc = Oscillation::new(0.2, 0.8);
        assert!((osc.value_at(osc.phase_of(1.0), 0.0) - 0.8).abs() < 1e-12);
        assert!((osc.value_at(osc.phase_of(0.0), 0.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn falling_phase_starts_downhill() {
        let osc = Oscillation::new(0.0, 1.0);
        for current in [0.1, 0.5, 0.9] {
            let phase = osc.falling_phase_of(current);
            assert!((osc.value_at(phase, 0.0) - current).abs() < 1e-12);
            assert!(osc.value_at(phase, 0.1) < current);
        }
    }

    #[test]
    fn degenerate_range_stays_constant() {
        let osc = Oscillation::new(0.5, 0.5);
        assert_eq!(osc.phase_of(0.9), 0.0);
        assert_eq!(osc.value_at(0.0, 3.0), 0.5);
    }

    #[test]
    fn ensure_len_reports_both_lengths() {
        assert!(ensure_len("test", 3, 3).is_ok());
        assert_eq!(
            ensure_len("test", 3, 2),
            Err(EffectError::LengthMismatch {
                effect: "test",
                expected: 3,
                actual: 2
            })
        );
    }
}
