//! Fade-and-switch effects.
//!
//! All three variants fade brightness along a sinusoid and change hue when
//! the fade bottoms out. A switch latch fires on the first rising step after
//! a fall and releases on the first falling step after a rise, so each trough
//! produces exactly one hue change. When several fades share one latch it is
//! fed once per step: any rising fade fires it, and it only releases once
//! every fade is falling again.

use rand::{Rng, RngCore};
use tracing::debug;

use crate::colors::{HsvColor, wrap_hue};
use crate::effect::{Effect, EffectError, Oscillation, ensure_len};
use crate::types::{ConfigurationError, MIN_LEVEL, validate_bounds, validate_finite};

const DEFAULT_DV: f64 = 0.1;
const DEFAULT_MAX_V: f64 = 0.7;
const DEFAULT_STEP_AMPLITUDE: f64 = 0.3;

/// Default palette: red, gold, green.
pub const DEFAULT_HUES: [f64; 3] = [0.0, 51.0 / 360.0, 0.33];

/// Edge detector over a continuous signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SwitchLatch {
    switched: bool,
}

impl SwitchLatch {
    /// Feeds one transition; returns true when the latch fires.
    fn update(&mut self, old: f64, new: f64) -> bool {
        self.update_edges(new > old, new < old)
    }

    /// Feeds one step of edge flags; returns true when the latch fires.
    fn update_edges(&mut self, rising: bool, falling: bool) -> bool {
        if rising && !self.switched {
            self.switched = true;
            true
        } else {
            if falling && self.switched {
                self.switched = false;
            }
            false
        }
    }
}

/// Synchronized fade through a round-robin hue palette.
///
/// Color `i` starts on `hues[i % len]`. Every color fades down from its
/// current value along its own sinusoid; the first time any color starts
/// rising again, every color moves to its next palette entry at once. The
/// next switch waits until all colors are fading down again, so there is one
/// switch per fade period even when the colors start at different values.
#[derive(Debug, Clone)]
pub struct ChristmasEffect {
    dv: f64,
    value: Oscillation,
    hues: Vec<f64>,
    steps: u64,
    latch: SwitchLatch,
    positions: Vec<usize>,
    phases: Vec<f64>,
}

impl ChristmasEffect {
    const NAME: &'static str = "christmas";

    /// Creates the effect.
    ///
    /// # Errors
    /// [`ConfigurationError::EmptyPalette`] if `hues` is empty, or a bounds
    /// or parameter error for invalid tunables.
    pub fn new(dv: f64, min_v: f64, max_v: f64, hues: Vec<f64>) -> Result<Self, ConfigurationError> {
        validate_finite("christmas dv", dv)?;
        validate_bounds(Self::NAME, "value", min_v, max_v)?;
        if hues.is_empty() {
            return Err(ConfigurationError::EmptyPalette { effect: Self::NAME });
        }
        for &hue in &hues {
            validate_finite("christmas hue", hue)?;
        }

        Ok(Self {
            dv,
            value: Oscillation::new(min_v, max_v),
            hues: hues.into_iter().map(wrap_hue).collect(),
            steps: 0,
            latch: SwitchLatch::default(),
            positions: Vec::new(),
            phases: Vec::new(),
        })
    }

    /// Palette position of every color in the current run.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    fn advance_all(&mut self, colors: &mut [HsvColor]) {
        let len = self.hues.len();
        for (position, color) in self.positions.iter_mut().zip(colors.iter_mut()) {
            *position = (*position + 1) % len;
            color.h = self.hues[*position];
        }
    }
}

impl Default for ChristmasEffect {
    fn default() -> Self {
        Self {
            dv: DEFAULT_DV,
            value: Oscillation::new(MIN_LEVEL, DEFAULT_MAX_V),
            hues: DEFAULT_HUES.to_vec(),
            steps: 0,
            latch: SwitchLatch::default(),
            positions: Vec::new(),
            phases: Vec::new(),
        }
    }
}

impl Effect for ChristmasEffect {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn step(&mut self, colors: &mut [HsvColor], _rng: &mut dyn RngCore) -> Result<(), EffectError> {
        if self.steps == 0 {
            let len = self.hues.len();
            self.positions = (0..colors.len()).map(|i| i % len).collect();
            self.phases = colors.iter().map(|c| self.value.falling_phase_of(c.v)).collect();
            for (color, &position) in colors.iter_mut().zip(&self.positions) {
                color.h = self.hues[position];
            }
        }
        ensure_len(Self::NAME, self.phases.len(), colors.len())?;

        self.steps += 1;
        let t = self.dv * self.steps as f64;
        let levels: Vec<f64> = self.phases.iter().map(|&phase| self.value.value_at(phase, t)).collect();
        let first_rising = colors.iter().zip(&levels).position(|(c, &new_v)| new_v > c.v);
        let all_falling = colors.iter().zip(&levels).all(|(c, &new_v)| new_v < c.v);

        if self.latch.update_edges(first_rising.is_some(), all_falling) {
            self.advance_all(colors);
            debug!(step = self.steps, device = ?first_rising, "palette switch");
        }
        for (color, new_v) in colors.iter_mut().zip(levels) {
            color.v = new_v;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.steps = 0;
        self.latch = SwitchLatch::default();
        self.positions.clear();
        self.phases.clear();
    }
}

/// One shared fade for all colors; each trough picks a new random rotation.
///
/// Colors always stay `1 / count` apart in hue. The fade starts at the top of
/// the value range.
#[derive(Debug, Clone)]
pub struct ChristmasRandomEffect {
    dv: f64,
    value: Oscillation,
    steps: u64,
    latch: SwitchLatch,
    level: f64,
    phase: f64,
}

impl ChristmasRandomEffect {
    const NAME: &'static str = "christmas_random";

    /// Creates the effect.
    pub fn new(dv: f64, min_v: f64, max_v: f64) -> Result<Self, ConfigurationError> {
        validate_finite("christmas_random dv", dv)?;
        validate_bounds(Self::NAME, "value", min_v, max_v)?;
        Ok(Self {
            dv,
            value: Oscillation::new(min_v, max_v),
            steps: 0,
            latch: SwitchLatch::default(),
            level: max_v,
            phase: 0.0,
        })
    }
}

impl Default for ChristmasRandomEffect {
    fn default() -> Self {
        Self {
            dv: DEFAULT_DV,
            value: Oscillation::new(MIN_LEVEL, DEFAULT_MAX_V),
            steps: 0,
            latch: SwitchLatch::default(),
            level: DEFAULT_MAX_V,
            phase: 0.0,
        }
    }
}

/// Rotates an even spread of hues by a random amount.
fn set_random_hues(colors: &mut [HsvColor], rng: &mut dyn RngCore) {
    if colors.is_empty() {
        return;
    }
    let distance = 1.0 / colors.len() as f64;
    let base = rng.random::<f64>();
    for (i, color) in colors.iter_mut().enumerate() {
        color.h = wrap_hue(base + distance * i as f64);
    }
}

impl Effect for ChristmasRandomEffect {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn step(&mut self, colors: &mut [HsvColor], rng: &mut dyn RngCore) -> Result<(), EffectError> {
        if self.steps == 0 {
            self.level = self.value.max;
            self.phase = self.value.phase_of(self.level);
            for color in colors.iter_mut() {
                color.v = self.level;
            }
            set_random_hues(colors, rng);
        }

        self.steps += 1;
        let new_v = self.value.value_at(self.phase, self.dv * self.steps as f64);
        if self.latch.update(self.level, new_v) {
            set_random_hues(colors, rng);
            debug!(step = self.steps, "random rotation switch");
        }
        self.level = new_v;
        for color in colors.iter_mut() {
            color.v = new_v;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.steps = 0;
        self.latch = SwitchLatch::default();
        self.level = self.value.max;
        self.phase = 0.0;
    }
}

/// Desynchronized per-color fades with independent random hues.
///
/// Each color gets a random starting phase in `[min_v, max_v]` and a random
/// speed multiplier in `[1 - step_amplitude, 1 + step_amplitude]`, so the
/// colors drift apart over time. A color picks a fresh random hue at its own
/// troughs.
#[derive(Debug, Clone)]
pub struct ChristmasAsyncEffect {
    dv: f64,
    value: Oscillation,
    step_amplitude: f64,
    steps: u64,
    phases: Vec<f64>,
    latches: Vec<SwitchLatch>,
    step_sizes: Vec<f64>,
}

impl ChristmasAsyncEffect {
    const NAME: &'static str = "christmas_async";

    /// Creates the effect.
    ///
    /// # Errors
    /// `step_amplitude` must be in `[0, 1]`.
    pub fn new(dv: f64, min_v: f64, max_v: f64, step_amplitude: f64) -> Result<Self, ConfigurationError> {
        validate_finite("christmas_async dv", dv)?;
        validate_bounds(Self::NAME, "value", min_v, max_v)?;
        if !(0.0..=1.0).contains(&step_amplitude) {
            return Err(ConfigurationError::InvalidParameter {
                name: "christmas_async step_amplitude",
                value: step_amplitude,
            });
        }
        Ok(Self {
            dv,
            value: Oscillation::new(min_v, max_v),
            step_amplitude,
            steps: 0,
            phases: Vec::new(),
            latches: Vec::new(),
            step_sizes: Vec::new(),
        })
    }

    fn random_step_size(&self, rng: &mut dyn RngCore) -> f64 {
        1.0 - self.step_amplitude + rng.random::<f64>() * 2.0 * self.step_amplitude
    }
}

impl Default for ChristmasAsyncEffect {
    fn default() -> Self {
        Self {
            dv: DEFAULT_DV,
            value: Oscillation::new(MIN_LEVEL, DEFAULT_MAX_V),
            step_amplitude: DEFAULT_STEP_AMPLITUDE,
            steps: 0,
            phases: Vec::new(),
            latches: Vec::new(),
            step_sizes: Vec::new(),
        }
    }
}

impl Effect for ChristmasAsyncEffect {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn step(&mut self, colors: &mut [HsvColor], rng: &mut dyn RngCore) -> Result<(), EffectError> {
        if self.steps == 0 {
            self.phases = (0..colors.len())
                .map(|_| self.value.min + rng.random::<f64>() * self.value.range())
                .collect();
            self.latches = vec![SwitchLatch::default(); colors.len()];
            self.step_sizes = (0..colors.len()).map(|_| self.random_step_size(rng)).collect();
        }
        ensure_len(Self::NAME, self.phases.len(), colors.len())?;

        self.steps += 1;
        let n = self.steps as f64;
        for (i, color) in colors.iter_mut().enumerate() {
            let new_v = self.value.value_at(self.phases[i], self.dv * n * self.step_sizes[i]);
            if self.latches[i].update(color.v, new_v) {
                color.h = rng.random::<f64>();
                debug!(step = self.steps, device = i, hue = color.h, "independent switch");
            }
            color.v = new_v;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.steps = 0;
        self.phases.clear();
        self.latches.clear();
        self.step_sizes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn latch_fires_once_per_trough() {
        let mut latch = SwitchLatch::default();
        let signal = [0.5, 0.4, 0.3, 0.35, 0.4, 0.5, 0.45, 0.3, 0.31];
        let fired: Vec<bool> = signal.windows(2).map(|w| latch.update(w[0], w[1])).collect();
        assert_eq!(
            fired,
            vec![false, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn shared_latch_waits_for_every_fade_to_fall() {
        let mut latch = SwitchLatch::default();
        // One fade rising while another still falls.
        assert!(latch.update_edges(true, false));
        assert!(!latch.update_edges(false, false));
        assert!(!latch.update_edges(true, false));
        // Everything falling releases; the next rise fires again.
        assert!(!latch.update_edges(false, true));
        assert!(latch.update_edges(true, false));
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(
            ChristmasEffect::new(0.1, 0.0, 0.7, vec![]).unwrap_err(),
            ConfigurationError::EmptyPalette { effect: "christmas" }
        );
    }

    #[test]
    fn first_step_assigns_round_robin_hues() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut colors = vec![HsvColor::new(0.9, 0.99, 0.7); 4];
        let mut effect = ChristmasEffect::new(0.1, MIN_LEVEL, 0.7, vec![0.0, 0.25, 0.5]).unwrap();
        effect.step(&mut colors, &mut rng).unwrap();

        let hues: Vec<f64> = colors.iter().map(|c| c.h).collect();
        assert_eq!(hues, vec![0.0, 0.25, 0.5, 0.0]);
        assert_eq!(effect.positions(), &[0, 1, 2, 0]);
    }

    #[test]
    fn random_variant_keeps_even_spacing_and_shared_value() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut colors = vec![HsvColor::new(0.0, 0.99, 0.2); 4];
        let mut effect = ChristmasRandomEffect::default();

        for _ in 0..120 {
            effect.step(&mut colors, &mut rng).unwrap();
            let v = colors[0].v;
            for (i, color) in colors.iter().enumerate() {
                assert_eq!(color.v, v);
                let expected = wrap_hue(colors[0].h + 0.25 * i as f64);
                let gap = (color.h - expected).abs();
                assert!(gap < 1e-9 || (1.0 - gap) < 1e-9);
            }
        }
    }

    #[test]
    fn random_variant_starts_from_the_top() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut colors = vec![HsvColor::new(0.0, 0.99, 0.2); 2];
        let mut effect = ChristmasRandomEffect::default();
        effect.step(&mut colors, &mut rng).unwrap();

        assert!(colors[0].v < DEFAULT_MAX_V);
        assert!(colors[0].v > DEFAULT_MAX_V - 0.01);
    }

    #[test]
    fn async_variant_rejects_large_step_amplitude() {
        assert!(ChristmasAsyncEffect::new(0.1, 0.0, 0.7, 1.5).is_err());
        assert!(ChristmasAsyncEffect::new(0.1, 0.0, 0.7, 0.0).is_ok());
    }

    #[test]
    fn async_variant_values_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut colors = vec![HsvColor::new(0.5, 0.99, 0.7); 6];
        let mut effect = ChristmasAsyncEffect::default();
        for _ in 0..300 {
            effect.step(&mut colors, &mut rng).unwrap();
            for color in &colors {
                assert!(color.v >= MIN_LEVEL - 1e-12 && color.v <= DEFAULT_MAX_V + 1e-12);
                assert!((0.0..1.0).contains(&color.h));
            }
        }
    }
}
