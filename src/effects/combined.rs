use rand::RngCore;

use crate::colors::HsvColor;
use crate::effect::{Effect, EffectError};

/// Applies several effects in sequence to the same colors.
///
/// Effects compose by successive mutation, not blending. Resetting the
/// combination resets every member.
#[derive(Default)]
pub struct CombinedEffects {
    effects: Vec<Box<dyn Effect>>,
}

impl CombinedEffects {
    /// Combines `effects`, applied in the given order.
    pub fn new(effects: Vec<Box<dyn Effect>>) -> Self {
        Self { effects }
    }

    /// Appends an effect to the end of the chain.
    pub fn push(&mut self, effect: impl Effect + 'static) {
        self.effects.push(Box::new(effect));
    }

    /// Number of combined effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Returns true if nothing is combined.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Effect for CombinedEffects {
    fn name(&self) -> &'static str {
        "combined"
    }

    fn step(&mut self, colors: &mut [HsvColor], rng: &mut dyn RngCore) -> Result<(), EffectError> {
        for effect in &mut self.effects {
            effect.step(colors, rng)?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        for effect in &mut self.effects {
            effect.reset();
        }
    }
}

impl core::fmt::Debug for CombinedEffects {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.effects.iter().map(|e| e.name()))
            .finish()
    }
}
