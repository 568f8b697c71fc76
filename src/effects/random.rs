use rand::{Rng, RngCore};

use crate::colors::HsvColor;
use crate::effect::{Effect, EffectError};

/// Gives every color an independent uniformly random hue each step.
///
/// Saturation and value are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEffect;

impl Effect for RandomEffect {
    fn name(&self) -> &'static str {
        "random"
    }

    fn step(&mut self, colors: &mut [HsvColor], rng: &mut dyn RngCore) -> Result<(), EffectError> {
        for color in colors {
            color.h = rng.random::<f64>();
        }
        Ok(())
    }
}
